//! Objective evaluation: absolute costs, incremental deltas, and the
//! consistency checks run by the search driver.

mod evaluator;

pub use evaluator::{Evaluator, RouteDelta};
