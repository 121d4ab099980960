//! Local search neighborhoods for improving CVRP solutions.
//!
//! - [`Operator::Shift`] — Move a segment between routes
//! - [`Operator::Interchange`] — Swap segments between routes
//! - [`Operator::Exchange`] — Intra-route segment reversal (2-opt)
//! - [`Operator::Ladder`] — Inter-route tail crossing (2-opt*)
//!
//! All four share one recombination engine: a move cuts its routes into
//! head, segment and tail pieces and reassembles them from a fixed list of
//! templates, pricing each candidate on the touched routes only.

mod exchange;
mod interchange;
mod ladder;
mod operator;
mod recombine;
mod shift;

pub use operator::{AcceptedMove, Operator};
