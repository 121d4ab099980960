//! Demand-descending greedy packing.
//!
//! # Algorithm
//!
//! Customers are ranked by descending demand, ties broken by ascending
//! index. Vehicles are filled one at a time: the open route repeatedly takes
//! the first remaining customer in rank order whose demand fits the
//! remaining capacity. When nothing fits, the route is closed and the next
//! vehicle opened. Vehicles left over once every customer is placed stay
//! unused (`[0, 0]`).
//!
//! # Complexity
//!
//! O(n log n + V·n) where n = customers and V = vehicles.

use tracing::{debug, instrument};

use crate::error::RoutingError;
use crate::models::{Instance, Route, Solution};

/// Builds the initial solution by greedy capacity packing.
///
/// Fails with [`RoutingError::NoFeasibleAssignment`] if customers remain
/// after the last vehicle closes.
///
/// # Examples
///
/// ```
/// use u_cvrp::models::{Customer, Instance};
/// use u_cvrp::constructive::greedy_packing;
///
/// let customers = vec![
///     Customer::depot(0.0, 0.0),
///     Customer::new(1, 6, 1.0, 0.0),
///     Customer::new(2, 4, 2.0, 0.0),
///     Customer::new(3, 6, 3.0, 0.0),
///     Customer::new(4, 4, 4.0, 0.0),
/// ];
/// let instance = Instance::new(customers, 3, 10).unwrap();
///
/// let solution = greedy_packing(&instance).unwrap();
/// assert_eq!(solution.route(0).customers(), &[1, 2]);
/// assert_eq!(solution.route(1).customers(), &[3, 4]);
/// assert!(solution.route(2).is_unused());
/// ```
#[instrument(skip_all, level = "debug")]
pub fn greedy_packing(instance: &Instance) -> Result<Solution, RoutingError> {
    let mut remaining: Vec<usize> = (1..=instance.num_customers()).collect();
    remaining.sort_by_key(|&c| (std::cmp::Reverse(instance.customer(c).demand()), c));

    let capacity = u64::from(instance.capacity());
    let mut routes = Vec::with_capacity(instance.vehicle_count());

    for vehicle in 0..instance.vehicle_count() {
        let mut load: u64 = 0;
        let mut assigned = Vec::new();

        // Remaining capacity only shrinks, so one pass in rank order takes
        // exactly the customers a restart-from-the-top scan would.
        remaining.retain(|&c| {
            let demand = u64::from(instance.customer(c).demand());
            if load + demand <= capacity {
                load += demand;
                assigned.push(c);
                false
            } else {
                true
            }
        });

        debug!(vehicle, load, customers = assigned.len(), "closed route");
        routes.push(Route::from_customers(&assigned));
    }

    if !remaining.is_empty() {
        remaining.sort_unstable();
        return Err(RoutingError::NoFeasibleAssignment {
            vehicles: instance.vehicle_count(),
            unassigned: remaining,
        });
    }

    let route_costs = routes.iter().map(|r| instance.route_cost(r.stops())).collect();
    Ok(Solution::from_parts(routes, route_costs))
}
