//! Objective evaluator over an instance.

use tracing::error;

use crate::error::RoutingError;
use crate::models::{Instance, Solution};

/// Cost change of replacing one or two routes of a solution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteDelta {
    /// New total minus old total.
    pub delta: f64,
    /// Cost of the first replacement route.
    pub first_cost: f64,
    /// Cost of the second replacement route, if any.
    pub second_cost: Option<f64>,
}

/// Stateless objective evaluator.
///
/// Wraps the instance's route cost so that operators can price a candidate
/// from the routes it touches alone: every other route is unchanged, so the
/// delta only involves the replaced routes.
///
/// # Examples
///
/// ```
/// use u_cvrp::models::{Customer, Instance, Route, Solution};
/// use u_cvrp::evaluation::Evaluator;
///
/// let customers = vec![
///     Customer::depot(0.0, 0.0),
///     Customer::new(1, 1, 1.0, 0.0),
///     Customer::new(2, 1, 2.0, 0.0),
///     Customer::new(3, 1, 3.0, 0.0),
/// ];
/// let instance = Instance::new(customers, 1, 10).unwrap();
/// let solution = Solution::from_routes(&instance, vec![Route::from_customers(&[2, 1, 3])]).unwrap();
///
/// let evaluator = Evaluator::new(&instance);
/// let delta = evaluator.delta(&solution, (0, &[0, 1, 2, 3, 0]), None).unwrap();
/// assert!((delta.delta + 2.0).abs() < 1e-10); // 8 -> 6
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Evaluator<'a> {
    instance: &'a Instance,
}

impl<'a> Evaluator<'a> {
    /// Creates an evaluator for the given instance.
    pub fn new(instance: &'a Instance) -> Self {
        Self { instance }
    }

    /// The instance being evaluated.
    pub fn instance(&self) -> &'a Instance {
        self.instance
    }

    /// Cost of a single route, infinite if infeasible.
    pub fn route_cost(&self, stops: &[usize]) -> f64 {
        self.instance.route_cost(stops)
    }

    /// Total cost recomputed from scratch.
    pub fn solution_cost(&self, solution: &Solution) -> Result<f64, RoutingError> {
        self.instance.solution_cost(solution)
    }

    /// Prices replacing route `first.0` (and optionally `second.0`) with the
    /// given stop sequences.
    ///
    /// Returns `None` if a replacement route is infeasible, so infeasible
    /// candidates never reach a cost comparison.
    pub fn delta(
        &self,
        solution: &Solution,
        first: (usize, &[usize]),
        second: Option<(usize, &[usize])>,
    ) -> Option<RouteDelta> {
        let first_cost = self.route_cost(first.1);
        if !first_cost.is_finite() {
            return None;
        }
        let mut old = solution.route_cost(first.0);
        let mut new = first_cost;

        let second_cost = match second {
            Some((index, stops)) => {
                let cost = self.route_cost(stops);
                if !cost.is_finite() {
                    return None;
                }
                old += solution.route_cost(index);
                new += cost;
                Some(cost)
            }
            None => None,
        };

        Some(RouteDelta {
            delta: new - old,
            first_cost,
            second_cost,
        })
    }

    /// Compares the tracked total with a full recomputation and resyncs it.
    ///
    /// A difference above `tolerance` is a defect and fails with
    /// [`RoutingError::CostDrift`].
    pub fn verify_cost(&self, solution: &mut Solution, tolerance: f64) -> Result<f64, RoutingError> {
        let recomputed = self.solution_cost(solution).inspect_err(|e| {
            error!(error = %e, "infeasible route reached after acceptance");
        })?;
        let tracked = solution.total_cost();
        if (tracked - recomputed).abs() > tolerance {
            error!(tracked, recomputed, "tracked cost drifted from recomputation");
            return Err(RoutingError::CostDrift { tracked, recomputed });
        }
        solution.set_total_cost(recomputed);
        Ok(recomputed)
    }

    /// Checks every solution invariant: fleet size, coverage and uniqueness,
    /// route structure and capacity, and cost consistency within `tolerance`.
    ///
    /// Both the cached cost of every route and the tracked total must match
    /// recomputation.
    pub fn check(&self, solution: &Solution, tolerance: f64) -> Result<(), RoutingError> {
        let violations = self.instance.violations(solution.routes());
        if !violations.is_empty() {
            return Err(RoutingError::InvalidSolution(violations));
        }
        let recomputed = self.solution_cost(solution)?;
        let cached = solution.route_costs();
        if cached.len() != solution.num_routes() {
            return Err(RoutingError::CostDrift {
                tracked: cached.iter().sum(),
                recomputed,
            });
        }
        for (route, &tracked) in solution.routes().iter().zip(cached) {
            let exact = self.route_cost(route.stops());
            if (tracked - exact).abs() > tolerance {
                return Err(RoutingError::CostDrift {
                    tracked,
                    recomputed: exact,
                });
            }
        }
        let tracked = solution.total_cost();
        if (tracked - recomputed).abs() > tolerance {
            return Err(RoutingError::CostDrift { tracked, recomputed });
        }
        Ok(())
    }
}
