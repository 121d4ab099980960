//! Customer records.

use serde::{Deserialize, Serialize};

/// A customer (or the depot) in a routing instance.
///
/// Index 0 is reserved for the depot, which carries no demand. Records are
/// immutable once the instance is built.
///
/// # Examples
///
/// ```
/// use u_cvrp::models::Customer;
///
/// let depot = Customer::depot(35.0, 35.0);
/// assert_eq!(depot.index(), 0);
/// assert_eq!(depot.demand(), 0);
///
/// let c = Customer::new(1, 10, 41.0, 49.0);
/// assert_eq!(c.index(), 1);
/// assert_eq!(c.demand(), 10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    index: usize,
    demand: u32,
    x: f64,
    y: f64,
}

impl Customer {
    /// Creates a new customer.
    pub fn new(index: usize, demand: u32, x: f64, y: f64) -> Self {
        Self { index, demand, x, y }
    }

    /// Creates a depot at the given coordinates (index 0, demand 0).
    pub fn depot(x: f64, y: f64) -> Self {
        Self::new(0, 0, x, y)
    }

    /// Customer index (0 = depot).
    pub fn index(&self) -> usize {
        self.index
    }

    /// Units to deliver to this customer.
    pub fn demand(&self) -> u32 {
        self.demand
    }

    /// X-coordinate.
    pub fn x(&self) -> f64 {
        self.x
    }

    /// Y-coordinate.
    pub fn y(&self) -> f64 {
        self.y
    }

    /// Euclidean distance to another customer.
    pub fn distance_to(&self, other: &Customer) -> f64 {
        crate::distance::euclidean(self, other)
    }
}
