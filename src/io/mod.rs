//! Plain-text instance input and solution output.
//!
//! - [`parse_instance`] / [`format_solution`] — CVRP instances and fleet solutions
//! - [`parse_tour`] / [`format_tour`] — single-vehicle tours

mod format;
mod parse;

pub use format::{format_solution, format_tour};
pub use parse::{parse_instance, parse_tour, ParseError};
