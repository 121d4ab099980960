//! Error taxonomy for instance loading, construction, and search.

use thiserror::Error;

use crate::models::Violation;

/// Errors raised while building an instance or solving it.
///
/// `NoFeasibleAssignment` is an input infeasibility surfaced to the caller.
/// `InvalidSolution` and `CostDrift` indicate a defect in the search and are
/// never produced by a correct run.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RoutingError {
    #[error("instance has no depot record")]
    EmptyInstance,

    #[error("depot must have zero demand, found {0}")]
    DepotDemand(u32),

    #[error("customer at position {position} carries index {index}")]
    CustomerIndex { position: usize, index: usize },

    #[error(
        "no feasible assignment: {} customer(s) left after filling {vehicles} vehicle(s)",
        unassigned.len()
    )]
    NoFeasibleAssignment {
        vehicles: usize,
        unassigned: Vec<usize>,
    },

    #[error("invalid solution: {} violation(s), first: {:?}", .0.len(), .0.first())]
    InvalidSolution(Vec<Violation>),

    #[error("cost drift: tracked {tracked}, recomputed {recomputed}")]
    CostDrift { tracked: f64, recomputed: f64 },
}
