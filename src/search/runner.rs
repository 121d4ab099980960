//! Local search execution engine.
//!
//! # Algorithm (first-improvement descent)
//!
//! 1. Build a starting solution with the configured construction
//! 2. Repeat a round:
//!    a. Try each operator in priority order
//!    b. On the first accepted move, recheck the tracked cost and restart
//!    the round from the first operator
//!    c. If no operator improves, the solution is a local optimum
//! 3. The time limit is checked before every operator attempt; expiry stops
//!    the search with the current solution
//! 4. Validate the final solution against every invariant

use std::time::Instant;

use tracing::{debug, error, info, instrument, warn};

use super::config::{Construction, SearchConfig};
use super::types::{SearchResult, SearchState, Termination};
use crate::constructive::{greedy_packing, nearest_neighbor};
use crate::error::RoutingError;
use crate::evaluation::Evaluator;
use crate::models::{Instance, Solution};

/// Local search driver over one instance.
///
/// Each call to [`run`](Self::run) or [`improve`](Self::improve) owns its
/// solution for the whole trajectory and leaves the driver in
/// [`SearchState::Done`] or [`SearchState::Failed`].
///
/// # Examples
///
/// ```
/// use u_cvrp::models::{Customer, Instance};
/// use u_cvrp::search::{LocalSearch, SearchConfig, SearchState, Termination};
///
/// let customers = vec![
///     Customer::depot(0.0, 0.0),
///     Customer::new(1, 6, 10.0, 0.0),
///     Customer::new(2, 6, -10.0, 0.0),
///     Customer::new(3, 4, 11.0, 0.0),
///     Customer::new(4, 4, -11.0, 0.0),
/// ];
/// let instance = Instance::new(customers, 2, 10).unwrap();
///
/// let mut search = LocalSearch::new(&instance, SearchConfig::default());
/// let result = search.run().unwrap();
/// assert_eq!(search.state(), SearchState::Done);
/// assert_eq!(result.termination, Termination::LocalOptimum);
/// assert!((result.cost() - 44.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone)]
pub struct LocalSearch<'a> {
    instance: &'a Instance,
    config: SearchConfig,
    state: SearchState,
}

impl<'a> LocalSearch<'a> {
    /// Creates a driver in [`SearchState::Init`].
    pub fn new(instance: &'a Instance, config: SearchConfig) -> Self {
        Self {
            instance,
            config,
            state: SearchState::Init,
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SearchState {
        self.state
    }

    /// The driver's configuration.
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Constructs a starting solution and improves it to a local optimum or
    /// until the time limit expires.
    ///
    /// Fails with [`RoutingError::NoFeasibleAssignment`] when construction
    /// cannot place every customer. `InvalidSolution` and `CostDrift`
    /// signal a defect and are never returned by a correct search.
    #[instrument(skip_all, fields(customers = self.instance.num_customers()))]
    pub fn run(&mut self) -> Result<SearchResult, RoutingError> {
        let started = Instant::now();
        self.state = SearchState::Constructing;

        let initial = match self.config.construction {
            Construction::GreedyPacking => greedy_packing(self.instance),
            Construction::NearestNeighbor => nearest_neighbor(self.instance),
        };
        let initial = match initial {
            Ok(solution) => solution,
            Err(e) => {
                warn!(error = %e, "construction failed");
                self.state = SearchState::Failed;
                return Err(e);
            }
        };
        debug!(
            cost = initial.total_cost(),
            vehicles = initial.vehicles_used(),
            "initial solution"
        );

        self.search(initial, started)
    }

    /// Improves a caller-supplied solution, skipping construction.
    ///
    /// Only the routes are trusted: cached costs are recomputed before
    /// searching. Routes that break an invariant fail with
    /// [`RoutingError::InvalidSolution`] without searching.
    #[instrument(skip_all, fields(customers = self.instance.num_customers()))]
    pub fn improve(&mut self, solution: Solution) -> Result<SearchResult, RoutingError> {
        let started = Instant::now();
        let solution = match Solution::from_routes(self.instance, solution.into_routes()) {
            Ok(solution) => solution,
            Err(e) => {
                warn!(error = %e, "rejected starting solution");
                self.state = SearchState::Failed;
                return Err(e);
            }
        };

        self.search(solution, started)
    }

    fn search(
        &mut self,
        mut solution: Solution,
        started: Instant,
    ) -> Result<SearchResult, RoutingError> {
        self.state = SearchState::Searching;
        let evaluator = Evaluator::new(self.instance);
        let epsilon = self.config.epsilon;
        let tolerance = self.config.drift_tolerance;

        let mut improvements: Vec<_> = self.config.operators.iter().map(|&op| (op, 0)).collect();
        let mut cost_history = vec![solution.total_cost()];
        let mut rounds = 0;

        let termination = 'search: loop {
            rounds += 1;
            let mut accepted = None;
            for (slot, operator) in self.config.operators.iter().enumerate() {
                if self.time_exhausted(started) {
                    break 'search Termination::TimeLimit;
                }
                if let Some(mv) = operator.apply(&evaluator, &mut solution, epsilon) {
                    improvements[slot].1 += 1;
                    accepted = Some(mv);
                    break;
                }
            }

            let Some(mv) = accepted else {
                break Termination::LocalOptimum;
            };
            if let Err(e) = evaluator.verify_cost(&mut solution, tolerance) {
                self.state = SearchState::Failed;
                return Err(e);
            }
            debug!(
                operator = %mv.operator,
                first = mv.first_route,
                second = ?mv.second_route,
                delta = mv.delta,
                cost = solution.total_cost(),
                "accepted move"
            );
            cost_history.push(solution.total_cost());
        };

        if let Err(e) = evaluator.check(&solution, tolerance) {
            error!(error = %e, "final solution violates invariants");
            self.state = SearchState::Failed;
            return Err(e);
        }
        self.state = SearchState::Done;

        let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
        if termination == Termination::TimeLimit {
            warn!(
                limit_ms = self.config.time_limit_ms,
                rounds, "time limit reached before local optimum"
            );
        }
        info!(
            ?termination,
            rounds,
            cost = solution.total_cost(),
            elapsed_ms,
            "local search finished"
        );

        Ok(SearchResult {
            solution,
            termination,
            rounds,
            improvements,
            cost_history,
            elapsed_ms,
        })
    }

    fn time_exhausted(&self, started: Instant) -> bool {
        self.config
            .time_limit_ms
            .is_some_and(|limit| started.elapsed().as_millis() >= u128::from(limit))
    }
}

/// Constructs and improves a solution with the given configuration.
///
/// # Examples
///
/// ```
/// use u_cvrp::models::Instance;
/// use u_cvrp::search::{solve, SearchConfig};
///
/// let instance = Instance::tour(&[(0.0, 0.0), (0.0, 1.0), (1.0, 0.0), (1.0, 1.0)]).unwrap();
/// let result = solve(&instance, &SearchConfig::tour()).unwrap();
/// assert!((result.cost() - 4.0).abs() < 1e-9);
/// ```
pub fn solve(instance: &Instance, config: &SearchConfig) -> Result<SearchResult, RoutingError> {
    LocalSearch::new(instance, config.clone()).run()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::local_search::Operator;
    use crate::models::{Customer, Route};
    use crate::search::DEFAULT_EPSILON;
    use proptest::prelude::*;

    fn instance(records: &[(u32, f64, f64)], vehicles: usize, capacity: u32) -> Instance {
        let customers = records
            .iter()
            .enumerate()
            .map(|(i, &(demand, x, y))| Customer::new(i, demand, x, y))
            .collect();
        Instance::new(customers, vehicles, capacity).expect("valid")
    }

    #[test]
    fn test_single_route_already_optimal() {
        let inst = instance(
            &[(0, 0.0, 0.0), (1, 1.0, 0.0), (1, 2.0, 0.0), (1, 3.0, 0.0)],
            1,
            10,
        );
        let mut search = LocalSearch::new(&inst, SearchConfig::default());
        let result = search.run().expect("solvable");

        assert_eq!(result.solution.route(0).stops(), &[0, 1, 2, 3, 0]);
        assert!((result.cost() - 6.0).abs() < 1e-9);
        assert_eq!(result.termination, Termination::LocalOptimum);
        assert_eq!(result.total_improvements(), 0);
        assert_eq!(result.rounds, 1);
    }

    #[test]
    fn test_two_vehicle_packing_and_improvement() {
        // Packing pairs each heavy customer with the light one on its side
        let inst = instance(
            &[
                (0, 0.0, 0.0),
                (6, 10.0, 0.0),
                (6, -10.0, 0.0),
                (4, 11.0, 0.0),
                (4, -11.0, 0.0),
            ],
            2,
            10,
        );
        let initial = greedy_packing(&inst).expect("packs");
        assert_eq!(initial.route(0).customers(), &[1, 3]);
        assert_eq!(initial.route(1).customers(), &[2, 4]);

        let result = solve(&inst, &SearchConfig::default()).expect("solvable");
        assert!(result.cost() <= initial.total_cost() + 1e-9);
        assert!((result.cost() - 44.0).abs() < 1e-9);
        for route in result.solution.routes() {
            assert!(inst.route_demand(route.stops()) <= 10);
        }
    }

    #[test]
    fn test_search_improves_crossed_packing() {
        let inst = instance(
            &[
                (0, 0.0, 0.0),
                (6, 10.0, 0.0),
                (6, -10.0, 0.0),
                (4, -11.0, 0.0),
                (4, 11.0, 0.0),
            ],
            2,
            10,
        );
        // Packing yields [1, 3] and [2, 4], each crossing the depot
        let initial = greedy_packing(&inst).expect("packs");
        let result = solve(&inst, &SearchConfig::default()).expect("solvable");
        assert!(result.cost() < initial.total_cost());
        assert!((result.cost() - 44.0).abs() < 1e-9);
        assert!(result.total_improvements() > 0);
        assert_eq!(result.cost_history.len(), result.total_improvements() + 1);
    }

    #[test]
    fn test_overweight_customer_fails() {
        let inst = instance(&[(0, 0.0, 0.0), (2, 1.0, 0.0)], 1, 1);
        let mut search = LocalSearch::new(&inst, SearchConfig::default());
        let err = search.run().unwrap_err();
        assert_eq!(
            err,
            RoutingError::NoFeasibleAssignment {
                vehicles: 1,
                unassigned: vec![1],
            }
        );
        assert_eq!(search.state(), SearchState::Failed);
        assert!(search.state().is_terminal());
    }

    #[test]
    fn test_done_is_idempotent() {
        let inst = instance(
            &[
                (0, 0.0, 0.0),
                (3, 5.0, 5.0),
                (2, -4.0, 6.0),
                (4, 7.0, -3.0),
                (1, -6.0, -6.0),
                (3, 2.0, 9.0),
                (2, -8.0, 1.0),
            ],
            3,
            7,
        );
        let mut search = LocalSearch::new(&inst, SearchConfig::default());
        let first = search.run().expect("solvable");
        assert_eq!(search.state(), SearchState::Done);

        let evaluator = Evaluator::new(&inst);
        let mut solution = first.solution.clone();
        for op in Operator::ALL {
            assert!(op.apply(&evaluator, &mut solution, DEFAULT_EPSILON).is_none());
        }
        assert_eq!(solution.routes(), first.solution.routes());

        let again = search.improve(first.solution.clone()).expect("valid");
        assert_eq!(again.solution.routes(), first.solution.routes());
        assert_eq!(again.total_improvements(), 0);
    }

    #[test]
    fn test_improve_rejects_invalid_solution() {
        let inst = instance(&[(0, 0.0, 0.0), (1, 1.0, 0.0), (1, 2.0, 0.0)], 1, 5);
        let bad = Solution::from_parts(vec![Route::from_customers(&[1])], vec![2.0]);
        let mut search = LocalSearch::new(&inst, SearchConfig::default());
        let err = search.improve(bad).unwrap_err();
        assert!(matches!(err, RoutingError::InvalidSolution(_)));
        assert_eq!(search.state(), SearchState::Failed);
    }

    fn crossed_packing() -> Instance {
        instance(
            &[
                (0, 0.0, 0.0),
                (6, 10.0, 0.0),
                (6, -10.0, 0.0),
                (4, -11.0, 0.0),
                (4, 11.0, 0.0),
            ],
            2,
            10,
        )
    }

    #[test]
    fn test_improve_recomputes_short_route_costs() {
        let inst = crossed_packing();
        let initial = greedy_packing(&inst).expect("packs");
        // One cached cost for two routes
        let stale = Solution::from_parts(initial.routes().to_vec(), vec![initial.total_cost()]);
        let mut search = LocalSearch::new(&inst, SearchConfig::default());
        let result = search.improve(stale).expect("routes are valid");

        assert_eq!(search.state(), SearchState::Done);
        assert!((result.cost() - 44.0).abs() < 1e-9);
        assert_eq!(result.solution.route_costs().len(), 2);
        assert!(Evaluator::new(&inst).check(&result.solution, 1e-9).is_ok());
    }

    #[test]
    fn test_improve_recomputes_stale_route_split() {
        let inst = crossed_packing();
        let initial = greedy_packing(&inst).expect("packs");
        let (c0, c1) = (initial.route_cost(0), initial.route_cost(1));
        let stale = Solution::from_parts(initial.routes().to_vec(), vec![c0 + c1, 0.0]);
        let result = LocalSearch::new(&inst, SearchConfig::default())
            .improve(stale)
            .expect("routes are valid");

        assert!((result.cost_history[0] - initial.total_cost()).abs() < 1e-9);
        assert!((result.cost() - 44.0).abs() < 1e-9);
        let solution = &result.solution;
        for (route, &cost) in solution.routes().iter().zip(solution.route_costs()) {
            assert!((cost - inst.route_cost(route.stops())).abs() < 1e-9);
        }
        assert!(Evaluator::new(&inst).check(&result.solution, 1e-9).is_ok());
    }

    #[test]
    fn test_zero_time_limit_returns_initial() {
        let inst = instance(
            &[
                (0, 0.0, 0.0),
                (6, 10.0, 0.0),
                (6, -10.0, 0.0),
                (4, -11.0, 0.0),
                (4, 11.0, 0.0),
            ],
            2,
            10,
        );
        let initial = greedy_packing(&inst).expect("packs");
        let config = SearchConfig::default().with_time_limit_ms(0);
        let mut search = LocalSearch::new(&inst, config);
        let result = search.run().expect("time limit is not an error");

        assert_eq!(result.termination, Termination::TimeLimit);
        assert_eq!(search.state(), SearchState::Done);
        assert_eq!(result.solution.routes(), initial.routes());
        assert_eq!(result.cost_history, vec![initial.total_cost()]);
    }

    #[test]
    fn test_empty_operator_list_stops_immediately() {
        let inst = instance(&[(0, 0.0, 0.0), (1, 1.0, 0.0)], 1, 5);
        let config = SearchConfig::default().with_operators(Vec::new());
        let result = solve(&inst, &config).expect("solvable");
        assert_eq!(result.termination, Termination::LocalOptimum);
        assert_eq!(result.rounds, 1);
        assert!(result.improvements.is_empty());
    }

    #[test]
    fn test_tour_mode_two_opt() {
        // Nearest neighbor zigzags to cost 8; 2-opt reaches the perimeter
        let points = [
            (0.0, 0.0),
            (1.0, 0.0),
            (0.0, 1.0),
            (1.0, 1.0),
            (2.0, 0.0),
            (2.0, 1.0),
        ];
        let inst = Instance::tour(&points).expect("valid");
        let result = solve(&inst, &SearchConfig::tour()).expect("solvable");
        assert_eq!(result.solution.num_routes(), 1);
        assert_eq!(result.solution.route(0).customers().len(), 5);
        assert!((result.cost() - 6.0).abs() < 1e-9);
        assert_eq!(
            result.improvements,
            vec![(Operator::Exchange, result.total_improvements())]
        );
    }

    #[test]
    fn test_improvements_counted_in_config_order() {
        let inst = instance(
            &[
                (0, 0.0, 0.0),
                (6, 10.0, 0.0),
                (6, -10.0, 0.0),
                (4, -11.0, 0.0),
                (4, 11.0, 0.0),
            ],
            2,
            10,
        );
        let order = vec![Operator::Ladder, Operator::Shift];
        let config = SearchConfig::default().with_operators(order.clone());
        let result = solve(&inst, &config).expect("solvable");
        let ops: Vec<Operator> = result.improvements.iter().map(|(op, _)| *op).collect();
        assert_eq!(ops, order);
        assert_eq!(result.improvements_of(Operator::Interchange), 0);
    }

    fn arb_instance() -> impl Strategy<Value = Instance> {
        (2usize..=8, 2usize..=4, 5u32..=12).prop_flat_map(|(n, vehicles, capacity)| {
            let record = (1u32..=4, -50.0f64..50.0, -50.0f64..50.0);
            (
                proptest::collection::vec(record, n),
                Just(vehicles),
                Just(capacity),
            )
                .prop_map(|(records, vehicles, capacity)| {
                    let mut customers = vec![Customer::depot(0.0, 0.0)];
                    customers.extend(
                        records
                            .into_iter()
                            .enumerate()
                            .map(|(i, (d, x, y))| Customer::new(i + 1, d, x, y)),
                    );
                    // Enough vehicles that packing always succeeds
                    let fleet = vehicles.max(customers.len() - 1);
                    Instance::new(customers, fleet, capacity).expect("valid")
                })
        })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(48))]

        #[test]
        fn prop_result_is_feasible_and_never_worse(inst in arb_instance()) {
            let initial = greedy_packing(&inst).expect("packs");
            let result = solve(&inst, &SearchConfig::default()).expect("solvable");
            let evaluator = Evaluator::new(&inst);

            prop_assert!(evaluator.check(&result.solution, DEFAULT_EPSILON).is_ok());
            prop_assert_eq!(result.solution.num_routes(), inst.vehicle_count());
            prop_assert_eq!(result.solution.num_served(), inst.num_customers());
            prop_assert!(result.cost() <= initial.total_cost() + 1e-9);
            prop_assert_eq!(result.termination, Termination::LocalOptimum);
        }

        #[test]
        fn prop_cost_history_strictly_decreasing(inst in arb_instance()) {
            let result = solve(&inst, &SearchConfig::default()).expect("solvable");
            for pair in result.cost_history.windows(2) {
                prop_assert!(pair[1] < pair[0] - DEFAULT_EPSILON + 1e-9);
            }
            let last = result.cost_history.last().copied().unwrap_or(f64::NAN);
            prop_assert!((last - result.cost()).abs() < 1e-9);
        }
    }
}
