//! Routing instance and route-level feasibility and cost queries.

use super::{Customer, Route, Solution, Violation, ViolationType, DEPOT};
use crate::distance::DistanceMatrix;
use crate::error::RoutingError;

/// A capacitated vehicle routing instance.
///
/// A homogeneous fleet of `vehicle_count` vehicles, each able to carry
/// `capacity` units, serves the customers from the depot at index 0. The
/// distance matrix is computed once on construction.
///
/// # Examples
///
/// ```
/// use u_cvrp::models::{Customer, Instance};
///
/// let customers = vec![
///     Customer::depot(0.0, 0.0),
///     Customer::new(1, 3, 3.0, 4.0),
///     Customer::new(2, 5, 0.0, 8.0),
/// ];
/// let instance = Instance::new(customers, 1, 10).unwrap();
/// assert_eq!(instance.num_customers(), 2);
/// assert_eq!(instance.route_demand(&[0, 1, 2, 0]), 8);
/// assert!(instance.is_feasible(&[0, 1, 2, 0]));
/// assert!(!instance.is_feasible(&[0, 1, 1, 0]));
/// assert!(instance.route_cost(&[0, 2, 2, 0]).is_infinite());
/// ```
#[derive(Debug, Clone)]
pub struct Instance {
    customers: Vec<Customer>,
    distances: DistanceMatrix,
    vehicle_count: usize,
    capacity: u32,
}

impl Instance {
    /// Creates an instance, checking the load-time preconditions: the depot
    /// comes first with zero demand and every record is indexed by position.
    pub fn new(
        customers: Vec<Customer>,
        vehicle_count: usize,
        capacity: u32,
    ) -> Result<Self, RoutingError> {
        let depot = customers.first().ok_or(RoutingError::EmptyInstance)?;
        if depot.demand() != 0 {
            return Err(RoutingError::DepotDemand(depot.demand()));
        }
        if let Some((position, c)) = customers
            .iter()
            .enumerate()
            .find(|(position, c)| c.index() != *position)
        {
            return Err(RoutingError::CustomerIndex {
                position,
                index: c.index(),
            });
        }

        let distances = DistanceMatrix::from_customers(&customers);
        Ok(Self {
            customers,
            distances,
            vehicle_count,
            capacity,
        })
    }

    /// Creates a single-vehicle tour instance over the given points.
    ///
    /// The first point is the start of the tour. Demands are zero, so the
    /// capacity never binds.
    pub fn tour(points: &[(f64, f64)]) -> Result<Self, RoutingError> {
        let customers = points
            .iter()
            .enumerate()
            .map(|(i, &(x, y))| Customer::new(i, 0, x, y))
            .collect();
        Self::new(customers, 1, 0)
    }

    /// All locations (index 0 = depot).
    pub fn customers(&self) -> &[Customer] {
        &self.customers
    }

    /// Location `index`.
    pub fn customer(&self, index: usize) -> &Customer {
        &self.customers[index]
    }

    /// Number of customers, excluding the depot.
    pub fn num_customers(&self) -> usize {
        self.customers.len() - 1
    }

    /// Size of the fleet.
    pub fn vehicle_count(&self) -> usize {
        self.vehicle_count
    }

    /// Capacity of every vehicle.
    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Precomputed distance matrix.
    pub fn distances(&self) -> &DistanceMatrix {
        &self.distances
    }

    /// Distance between locations `from` and `to`.
    pub fn distance(&self, from: usize, to: usize) -> f64 {
        self.distances.get(from, to)
    }

    /// Sum of the demands along `stops`. Unknown locations count as zero.
    pub fn route_demand(&self, stops: &[usize]) -> u64 {
        stops
            .iter()
            .filter_map(|&c| self.customers.get(c))
            .map(|c| u64::from(c.demand()))
            .sum()
    }

    /// Returns `true` if the route starts and ends at the depot, never
    /// returns to it in between, visits known customers at most once, and
    /// fits in one vehicle.
    pub fn is_feasible(&self, stops: &[usize]) -> bool {
        let [first, interior @ .., last] = stops else {
            return false;
        };
        if *first != DEPOT || *last != DEPOT {
            return false;
        }
        if self.route_demand(interior) > u64::from(self.capacity) {
            return false;
        }
        let mut seen = vec![false; self.customers.len()];
        interior
            .iter()
            .all(|&c| c != DEPOT && c < seen.len() && !std::mem::replace(&mut seen[c], true))
    }

    /// Sum of consecutive distances along the route, or `f64::INFINITY` if
    /// the route is infeasible.
    pub fn route_cost(&self, stops: &[usize]) -> f64 {
        if !self.is_feasible(stops) {
            return f64::INFINITY;
        }
        self.distances.path_length(stops)
    }

    /// Recomputes the total cost of a solution from scratch.
    ///
    /// Fails with [`RoutingError::InvalidSolution`] if any route is
    /// infeasible.
    pub fn solution_cost(&self, solution: &Solution) -> Result<f64, RoutingError> {
        let violations: Vec<Violation> = solution
            .routes()
            .iter()
            .enumerate()
            .flat_map(|(i, r)| self.route_violations(i, r.stops()))
            .collect();
        if !violations.is_empty() {
            return Err(RoutingError::InvalidSolution(violations));
        }
        Ok(solution
            .routes()
            .iter()
            .map(|r| self.distances.path_length(r.stops()))
            .sum())
    }

    /// Structural and capacity violations of a single route.
    pub fn route_violations(&self, route_index: usize, stops: &[usize]) -> Vec<Violation> {
        let mut violations = Vec::new();
        if stops.len() < 2 || stops[0] != DEPOT || stops[stops.len() - 1] != DEPOT {
            violations.push(Violation::new(ViolationType::DepotEndpoints { route_index }));
        }

        let interior = if stops.len() >= 2 {
            &stops[1..stops.len() - 1]
        } else {
            &[][..]
        };
        let mut seen = vec![false; self.customers.len()];
        for &c in interior {
            if c == DEPOT {
                violations.push(Violation::new(ViolationType::DepotInInterior { route_index }));
            } else if c >= self.customers.len() {
                violations.push(Violation::new(ViolationType::UnknownCustomer {
                    route_index,
                    customer: c,
                }));
            } else if seen[c] {
                violations.push(Violation::new(ViolationType::DuplicateCustomer { customer: c }));
            } else {
                seen[c] = true;
            }
        }

        let load = self.route_demand(interior);
        if load > u64::from(self.capacity) {
            violations.push(Violation::new(ViolationType::CapacityExceeded {
                route_index,
                load,
                capacity: self.capacity,
            }));
        }
        violations
    }

    /// Every invariant violation of a full set of routes: fleet size,
    /// per-route structure and capacity, and coverage of each customer
    /// exactly once.
    pub fn violations(&self, routes: &[Route]) -> Vec<Violation> {
        let mut violations = Vec::new();
        if routes.len() != self.vehicle_count {
            violations.push(Violation::new(ViolationType::RouteCount {
                expected: self.vehicle_count,
                found: routes.len(),
            }));
        }

        let mut visits = vec![0usize; self.customers.len()];
        for (i, route) in routes.iter().enumerate() {
            violations.extend(
                self.route_violations(i, route.stops())
                    .into_iter()
                    // duplicates are reported once below, across routes
                    .filter(|v| !matches!(v.kind, ViolationType::DuplicateCustomer { .. })),
            );
            for &c in route.customers() {
                if c != DEPOT && c < visits.len() {
                    visits[c] += 1;
                }
            }
        }

        for (customer, &count) in visits.iter().enumerate().skip(1) {
            if count == 0 {
                violations.push(Violation::new(ViolationType::MissingCustomer { customer }));
            } else if count > 1 {
                violations.push(Violation::new(ViolationType::DuplicateCustomer { customer }));
            }
        }
        violations
    }
}
