//! Vehicle routes.

use serde::{Deserialize, Serialize};

/// Location index of the depot.
pub const DEPOT: usize = 0;

/// The visiting order of one vehicle, depot to depot.
///
/// Stops are stored with both depot endpoints, so an unused vehicle is
/// `[0, 0]`. The interior holds the customers in visiting order. Structural
/// validity (depot endpoints, no depot or duplicate in the interior) is
/// checked by [`Instance::is_feasible`](super::Instance::is_feasible), not
/// enforced on construction.
///
/// # Examples
///
/// ```
/// use u_cvrp::models::Route;
///
/// let route = Route::from_customers(&[3, 1, 2]);
/// assert_eq!(route.stops(), &[0, 3, 1, 2, 0]);
/// assert_eq!(route.customers(), &[3, 1, 2]);
/// assert!(!route.is_unused());
/// assert!(Route::unused().is_unused());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Route {
    stops: Vec<usize>,
}

impl Route {
    /// Creates the route of an unused vehicle, `[0, 0]`.
    pub fn unused() -> Self {
        Self {
            stops: vec![DEPOT, DEPOT],
        }
    }

    /// Creates a route visiting `customers` in order, framed by the depot.
    pub fn from_customers(customers: &[usize]) -> Self {
        let mut stops = Vec::with_capacity(customers.len() + 2);
        stops.push(DEPOT);
        stops.extend_from_slice(customers);
        stops.push(DEPOT);
        Self { stops }
    }

    /// Wraps a full stop sequence (including depot endpoints) as-is.
    pub fn from_stops(stops: Vec<usize>) -> Self {
        Self { stops }
    }

    /// All stops including the leading and trailing depot.
    pub fn stops(&self) -> &[usize] {
        &self.stops
    }

    /// Customers strictly between the depot endpoints.
    pub fn customers(&self) -> &[usize] {
        if self.stops.len() < 2 {
            return &[];
        }
        &self.stops[1..self.stops.len() - 1]
    }

    /// Number of stops, depot endpoints included.
    pub fn len(&self) -> usize {
        self.stops.len()
    }

    /// Returns `true` if the route holds no stops at all.
    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    /// Returns `true` if the vehicle visits no customer.
    pub fn is_unused(&self) -> bool {
        self.customers().is_empty()
    }

    /// Consumes the route, returning its stops.
    pub fn into_stops(self) -> Vec<usize> {
        self.stops
    }
}

impl AsRef<[usize]> for Route {
    fn as_ref(&self) -> &[usize] {
        &self.stops
    }
}

impl Default for Route {
    fn default() -> Self {
        Self::unused()
    }
}
