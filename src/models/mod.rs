//! Domain model types for capacitated vehicle routing.
//!
//! Customers with demands and coordinates, an instance that owns the fleet
//! parameters and answers route feasibility and cost queries, routes as
//! depot-framed stop sequences, and solutions holding one route per vehicle.

mod customer;
mod instance;
mod route;
mod solution;

pub use customer::Customer;
pub use instance::Instance;
pub use route::{Route, DEPOT};
pub use solution::{Solution, Violation, ViolationType};
