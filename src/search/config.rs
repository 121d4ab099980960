//! Local search driver configuration.

use serde::{Deserialize, Serialize};

use crate::local_search::Operator;

/// Strict-improvement tolerance: a move is accepted only when it lowers the
/// total cost by more than this amount.
pub const DEFAULT_EPSILON: f64 = 1e-6;

/// Largest accepted gap between the incrementally tracked total cost and a
/// full recomputation.
pub const DEFAULT_DRIFT_TOLERANCE: f64 = 1e-6;

/// Constructive heuristic used to build the starting solution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Construction {
    /// Demand-descending first-fit packing, one vehicle at a time.
    #[default]
    GreedyPacking,
    /// Capacity-aware nearest-neighbor routes.
    NearestNeighbor,
}

/// Configuration parameters for the local search driver.
///
/// # Examples
///
/// ```
/// use u_cvrp::local_search::Operator;
/// use u_cvrp::search::{Construction, SearchConfig};
///
/// let config = SearchConfig::default()
///     .with_operators(vec![Operator::Exchange])
///     .with_construction(Construction::NearestNeighbor)
///     .with_time_limit_ms(500);
/// assert_eq!(config.operators, vec![Operator::Exchange]);
/// assert_eq!(config.time_limit_ms, Some(500));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Strict-improvement tolerance.
    pub epsilon: f64,

    /// Tolerance of the per-round cost drift check.
    pub drift_tolerance: f64,

    /// Optional wall-clock time limit in milliseconds.
    ///
    /// Checked before every operator attempt, never in the middle of one,
    /// so the actual runtime may exceed the limit by one operator pass.
    /// Expiry ends the search with the current solution; it is not an
    /// error.
    ///
    /// `None` disables time-based termination (the default).
    pub time_limit_ms: Option<u64>,

    /// Operators in priority order. After any accepted move the round
    /// restarts from the first one.
    pub operators: Vec<Operator>,

    /// Starting solution heuristic for [`run`](super::LocalSearch::run).
    pub construction: Construction,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            epsilon: DEFAULT_EPSILON,
            drift_tolerance: DEFAULT_DRIFT_TOLERANCE,
            time_limit_ms: None,
            operators: Operator::ALL.to_vec(),
            construction: Construction::default(),
        }
    }
}

impl SearchConfig {
    /// Configuration for a single-vehicle tour: 2-opt from a
    /// nearest-neighbor start.
    pub fn tour() -> Self {
        Self::default()
            .with_operators(vec![Operator::Exchange])
            .with_construction(Construction::NearestNeighbor)
    }

    /// Sets the strict-improvement tolerance.
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Sets the cost drift tolerance.
    pub fn with_drift_tolerance(mut self, tolerance: f64) -> Self {
        self.drift_tolerance = tolerance;
        self
    }

    /// Sets the wall-clock time limit in milliseconds.
    pub fn with_time_limit_ms(mut self, ms: u64) -> Self {
        self.time_limit_ms = Some(ms);
        self
    }

    /// Sets the operator priority order.
    pub fn with_operators(mut self, operators: Vec<Operator>) -> Self {
        self.operators = operators;
        self
    }

    /// Sets the construction heuristic.
    pub fn with_construction(mut self, construction: Construction) -> Self {
        self.construction = construction;
        self
    }
}
