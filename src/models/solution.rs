//! Solution and violation types.

use serde::{Deserialize, Serialize};

use super::{Instance, Route};
use crate::error::RoutingError;

/// A type of invariant violation in a route or solution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ViolationType {
    /// Vehicle capacity exceeded.
    CapacityExceeded {
        /// Route index in the solution.
        route_index: usize,
        /// Load carried by the route.
        load: u64,
        /// Vehicle capacity.
        capacity: u32,
    },
    /// Route does not start and end at the depot.
    DepotEndpoints {
        /// Route index in the solution.
        route_index: usize,
    },
    /// Route returns to the depot between its endpoints.
    DepotInInterior {
        /// Route index in the solution.
        route_index: usize,
    },
    /// Route refers to a location the instance does not have.
    UnknownCustomer {
        /// Route index in the solution.
        route_index: usize,
        /// Offending location index.
        customer: usize,
    },
    /// Customer visited more than once across the solution.
    DuplicateCustomer {
        /// Customer visited twice.
        customer: usize,
    },
    /// Customer not visited by any route.
    MissingCustomer {
        /// Customer never visited.
        customer: usize,
    },
    /// Number of routes differs from the fleet size.
    RouteCount {
        /// Fleet size of the instance.
        expected: usize,
        /// Routes in the solution.
        found: usize,
    },
}

/// An invariant violation in a solution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Violation {
    /// The type of violation.
    pub kind: ViolationType,
}

impl Violation {
    /// Creates a new violation.
    pub fn new(kind: ViolationType) -> Self {
        Self { kind }
    }
}

/// A complete assignment of customers to the fleet.
///
/// Holds one route per vehicle plus the cost of each route and their sum.
/// The total is maintained incrementally as routes are replaced; the search
/// periodically compares it against a full recomputation.
///
/// # Examples
///
/// ```
/// use u_cvrp::models::{Customer, Instance, Route, Solution};
///
/// let customers = vec![
///     Customer::depot(0.0, 0.0),
///     Customer::new(1, 5, 3.0, 4.0),
/// ];
/// let instance = Instance::new(customers, 2, 10).unwrap();
/// let sol = Solution::from_routes(
///     &instance,
///     vec![Route::from_customers(&[1]), Route::unused()],
/// ).unwrap();
/// assert_eq!(sol.num_routes(), 2);
/// assert_eq!(sol.vehicles_used(), 1);
/// assert!((sol.total_cost() - 10.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Solution {
    routes: Vec<Route>,
    route_costs: Vec<f64>,
    total_cost: f64,
}

impl Solution {
    /// Builds a solution from caller-supplied routes, validating every
    /// invariant against the instance.
    pub fn from_routes(instance: &Instance, routes: Vec<Route>) -> Result<Self, RoutingError> {
        let violations = instance.violations(&routes);
        if !violations.is_empty() {
            return Err(RoutingError::InvalidSolution(violations));
        }
        let route_costs = routes.iter().map(|r| instance.route_cost(r.stops())).collect();
        Ok(Self::from_parts(routes, route_costs))
    }

    /// Assembles a solution from routes already known to be feasible.
    pub(crate) fn from_parts(routes: Vec<Route>, route_costs: Vec<f64>) -> Self {
        let total_cost = route_costs.iter().sum();
        Self {
            routes,
            route_costs,
            total_cost,
        }
    }

    /// Replaces one route, adjusting the tracked total by the cost change.
    pub(crate) fn replace_route(&mut self, index: usize, route: Route, cost: f64) {
        self.total_cost += cost - self.route_costs[index];
        self.routes[index] = route;
        self.route_costs[index] = cost;
    }

    /// Overwrites the tracked total, used after a consistency check.
    pub(crate) fn set_total_cost(&mut self, cost: f64) {
        self.total_cost = cost;
    }

    /// Returns the routes, one per vehicle.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Returns the route driven by vehicle `index`.
    pub fn route(&self, index: usize) -> &Route {
        &self.routes[index]
    }

    /// Cached cost of each route.
    pub fn route_costs(&self) -> &[f64] {
        &self.route_costs
    }

    /// Cached cost of route `index`.
    pub fn route_cost(&self, index: usize) -> f64 {
        self.route_costs[index]
    }

    /// Incrementally tracked total cost.
    pub fn total_cost(&self) -> f64 {
        self.total_cost
    }

    /// Number of routes (the fleet size).
    pub fn num_routes(&self) -> usize {
        self.routes.len()
    }

    /// Number of routes that visit at least one customer.
    pub fn vehicles_used(&self) -> usize {
        self.routes.iter().filter(|r| !r.is_unused()).count()
    }

    /// Total number of customers served across all routes.
    pub fn num_served(&self) -> usize {
        self.routes.iter().map(|r| r.customers().len()).sum()
    }

    /// Consumes the solution, returning its routes.
    pub fn into_routes(self) -> Vec<Route> {
        self.routes
    }
}
