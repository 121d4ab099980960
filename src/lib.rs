//! # u-cvrp
//!
//! Capacitated vehicle routing by first-improvement local search: a greedy
//! construction followed by segment shift, interchange, intra-route
//! reversal and tail crossing moves until no move improves the total
//! Euclidean distance.
//!
//! ## Modules
//!
//! - [`models`] — Domain model types (Customer, Instance, Route, Solution)
//! - [`distance`] — Euclidean distance and precomputed matrix
//! - [`evaluation`] — Route cost, move deltas and solution validation
//! - [`constructive`] — Constructive heuristics (Greedy packing, Nearest Neighbor)
//! - [`local_search`] — Neighborhood operators (Shift, Interchange, Exchange, Ladder)
//! - [`search`] — Local search driver, configuration and results
//! - [`io`] — Plain-text instance parsing and solution formatting
//!
//! ## Example
//!
//! ```
//! use u_cvrp::io::{format_solution, parse_instance};
//! use u_cvrp::search::{solve, SearchConfig};
//!
//! let instance = parse_instance("5 2 10\n0 0 0\n6 10 0\n6 -10 0\n4 -11 0\n4 11 0\n").unwrap();
//! let result = solve(&instance, &SearchConfig::default()).unwrap();
//! assert!(format_solution(&result.solution).starts_with("44.00 0\n"));
//! ```

pub mod constructive;
pub mod distance;
pub mod error;
pub mod evaluation;
pub mod io;
pub mod local_search;
pub mod models;
pub mod search;

pub use error::RoutingError;
