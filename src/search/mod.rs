//! First-improvement local search driver.
//!
//! Builds a starting solution with a constructive heuristic, then applies
//! the neighborhood operators in priority order, restarting from the first
//! operator after every accepted move, until a full round finds nothing or
//! the time limit expires.

mod config;
mod runner;
mod types;

pub use config::{Construction, SearchConfig, DEFAULT_DRIFT_TOLERANCE, DEFAULT_EPSILON};
pub use runner::{solve, LocalSearch};
pub use types::{SearchResult, SearchState, Termination};
