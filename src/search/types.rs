//! Driver states and search results.

use serde::{Deserialize, Serialize};

use crate::local_search::Operator;
use crate::models::Solution;

/// Lifecycle of a [`LocalSearch`](super::LocalSearch) driver.
///
/// ```text
/// Init → Constructing → Searching → Done
///             │              │
///             └──→ Failed ←──┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchState {
    /// Created, nothing run yet.
    Init,
    /// Building the starting solution.
    Constructing,
    /// Applying operator rounds.
    Searching,
    /// Terminated with a feasible solution.
    Done,
    /// Construction found no feasible assignment, or a defect was detected.
    Failed,
}

impl SearchState {
    /// Whether the driver has stopped, successfully or not.
    pub fn is_terminal(&self) -> bool {
        matches!(self, SearchState::Done | SearchState::Failed)
    }
}

/// Why a search reached [`SearchState::Done`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Termination {
    /// A full round over every operator produced no improvement.
    LocalOptimum,
    /// The time limit expired first.
    TimeLimit,
}

/// Result of a local search run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    /// Final feasible solution.
    pub solution: Solution,
    /// Reason the search stopped.
    pub termination: Termination,
    /// Operator rounds executed, including the final unproductive one.
    pub rounds: usize,
    /// Accepted moves per operator, in configured priority order.
    pub improvements: Vec<(Operator, usize)>,
    /// Total cost of the starting solution followed by the cost after each
    /// accepted move. Strictly decreasing.
    pub cost_history: Vec<f64>,
    /// Wall-clock time of the run in milliseconds.
    pub elapsed_ms: u64,
}

impl SearchResult {
    /// Total cost of the final solution.
    pub fn cost(&self) -> f64 {
        self.solution.total_cost()
    }

    /// Number of accepted moves across all operators.
    pub fn total_improvements(&self) -> usize {
        self.improvements.iter().map(|(_, n)| n).sum()
    }

    /// Accepted moves for one operator.
    pub fn improvements_of(&self, operator: Operator) -> usize {
        self.improvements
            .iter()
            .filter(|(op, _)| *op == operator)
            .map(|(_, n)| n)
            .sum()
    }
}
