//! Neighborhood operator selection.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{exchange, interchange, ladder, shift};
use crate::evaluation::Evaluator;
use crate::models::Solution;

/// A neighborhood move family.
///
/// Each operator scans its neighborhood in a fixed order and applies the
/// first candidate that lowers the total cost by more than `epsilon`
/// (first improvement).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    /// Move a segment of one route into another, forward or reversed.
    Shift,
    /// Swap segments between two routes, each optionally reversed.
    Interchange,
    /// Reverse a segment within one route (2-opt).
    Exchange,
    /// Cut two routes and cross-join their heads and tails.
    Ladder,
}

impl Operator {
    /// All operators in default priority order.
    pub const ALL: [Operator; 4] = [
        Operator::Shift,
        Operator::Interchange,
        Operator::Exchange,
        Operator::Ladder,
    ];

    /// Short lowercase name, used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Operator::Shift => "shift",
            Operator::Interchange => "interchange",
            Operator::Exchange => "exchange",
            Operator::Ladder => "ladder",
        }
    }

    /// Applies the first strictly improving move of this neighborhood.
    ///
    /// Returns `None`, leaving the solution untouched, when no candidate
    /// improves by more than `epsilon`.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_cvrp::models::{Instance, Route, Solution};
    /// use u_cvrp::evaluation::Evaluator;
    /// use u_cvrp::local_search::Operator;
    ///
    /// let instance = Instance::tour(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (3.0, 0.0)]).unwrap();
    /// let mut solution =
    ///     Solution::from_routes(&instance, vec![Route::from_customers(&[2, 1, 3])]).unwrap();
    /// let evaluator = Evaluator::new(&instance);
    ///
    /// let applied = Operator::Exchange.apply(&evaluator, &mut solution, 1e-6).unwrap();
    /// assert!(applied.delta < 0.0);
    /// assert_eq!(solution.route(0).customers(), &[1, 2, 3]);
    /// ```
    pub fn apply(
        &self,
        evaluator: &Evaluator<'_>,
        solution: &mut Solution,
        epsilon: f64,
    ) -> Option<AcceptedMove> {
        match self {
            Operator::Shift => shift::shift(evaluator, solution, epsilon),
            Operator::Interchange => interchange::interchange(evaluator, solution, epsilon),
            Operator::Exchange => exchange::exchange(evaluator, solution, epsilon),
            Operator::Ladder => ladder::ladder(evaluator, solution, epsilon),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A move applied to the solution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AcceptedMove {
    /// Operator that produced the move.
    pub operator: Operator,
    /// Route the move was cut from.
    pub first_route: usize,
    /// Second route touched by inter-route moves.
    pub second_route: Option<usize>,
    /// Change in total cost, always below `-epsilon`.
    pub delta: f64,
}

impl AcceptedMove {
    pub(crate) fn new(
        operator: Operator,
        first_route: usize,
        second_route: Option<usize>,
        delta: f64,
    ) -> Self {
        Self {
            operator,
            first_route,
            second_route,
            delta,
        }
    }
}
