//! Euclidean distances between locations.
//!
//! [`euclidean`] is the pure cost function between two customers;
//! [`DistanceMatrix`] caches it for every pair of an instance.

mod matrix;

pub use matrix::DistanceMatrix;

use crate::models::Customer;

/// Euclidean distance between two customers.
///
/// # Examples
///
/// ```
/// use u_cvrp::models::Customer;
/// use u_cvrp::distance::euclidean;
///
/// let a = Customer::depot(0.0, 0.0);
/// let b = Customer::new(1, 0, 3.0, 4.0);
/// assert!((euclidean(&a, &b) - 5.0).abs() < 1e-12);
/// ```
pub fn euclidean(a: &Customer, b: &Customer) -> f64 {
    (a.x() - b.x()).hypot(a.y() - b.y())
}
