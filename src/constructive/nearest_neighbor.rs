//! Nearest-neighbor constructive heuristic.
//!
//! Builds routes greedily: starting from the depot, always visit the nearest
//! unvisited customer that still fits. When none fits, close the route and
//! start the next vehicle. With one vehicle and zero demands this is the
//! classic greedy tour for the travelling salesman problem.
//!
//! # Complexity
//!
//! O(n²) where n = number of customers.

use tracing::{debug, instrument};

use crate::error::RoutingError;
use crate::models::{Instance, Route, Solution, DEPOT};

/// Constructs a solution using the nearest-neighbor heuristic.
///
/// Fails with [`RoutingError::NoFeasibleAssignment`] if customers remain
/// after the last vehicle closes.
///
/// # Examples
///
/// ```
/// use u_cvrp::models::Instance;
/// use u_cvrp::constructive::nearest_neighbor;
///
/// let instance = Instance::tour(&[(0.0, 0.0), (3.0, 0.0), (1.0, 0.0), (2.0, 0.0)]).unwrap();
/// let solution = nearest_neighbor(&instance).unwrap();
/// assert_eq!(solution.route(0).stops(), &[0, 2, 3, 1, 0]);
/// ```
#[instrument(skip_all, level = "debug")]
pub fn nearest_neighbor(instance: &Instance) -> Result<Solution, RoutingError> {
    let n = instance.customers().len();
    let capacity = u64::from(instance.capacity());
    let distances = instance.distances();

    let mut visited = vec![false; n];
    visited[DEPOT] = true;
    let mut routes = Vec::with_capacity(instance.vehicle_count());

    for vehicle in 0..instance.vehicle_count() {
        let mut current = DEPOT;
        let mut route_customers = Vec::new();
        let mut load: u64 = 0;

        loop {
            let fits = (1..n).filter(|&i| {
                !visited[i] && load + u64::from(instance.customer(i).demand()) <= capacity
            });
            match distances.nearest_neighbor(current, fits) {
                Some(next) => {
                    visited[next] = true;
                    load += u64::from(instance.customer(next).demand());
                    route_customers.push(next);
                    current = next;
                }
                None => break,
            }
        }

        debug!(vehicle, load, customers = route_customers.len(), "closed route");
        routes.push(Route::from_customers(&route_customers));
    }

    let unassigned: Vec<usize> = (1..n).filter(|&i| !visited[i]).collect();
    if !unassigned.is_empty() {
        return Err(RoutingError::NoFeasibleAssignment {
            vehicles: instance.vehicle_count(),
            unassigned,
        });
    }

    let route_costs = routes.iter().map(|r| instance.route_cost(r.stops())).collect();
    Ok(Solution::from_parts(routes, route_costs))
}
