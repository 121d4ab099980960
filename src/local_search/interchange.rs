//! Inter-route segment interchange.
//!
//! # Algorithm
//!
//! Swaps segment `[start1, end1]` of route A with segment `[start2, end2]`
//! of route B (A ≠ B). Each incoming segment may be reversed, giving four
//! reassemblies tried in order: neither reversed, A's segment reversed in B,
//! B's segment reversed in A, both reversed.
//!
//! Both routes must stay within capacity; pairs whose swapped loads
//! overflow are skipped before assembly.
//!
//! # Complexity
//!
//! O(R² × n⁴) candidates per pass, each priced in O(n).

use super::operator::{AcceptedMove, Operator};
use super::recombine::{
    prefix_demands, recombine, Cut, Template, FIRST_HEAD, FIRST_SEGMENT, FIRST_TAIL,
    SECOND_HEAD, SECOND_SEGMENT, SECOND_TAIL,
};
use crate::evaluation::Evaluator;
use crate::models::Solution;

const INTERCHANGE: [Template; 4] = [
    Template {
        first: &[FIRST_HEAD, SECOND_SEGMENT, FIRST_TAIL],
        second: &[SECOND_HEAD, FIRST_SEGMENT, SECOND_TAIL],
    },
    Template {
        first: &[FIRST_HEAD, SECOND_SEGMENT, FIRST_TAIL],
        second: &[SECOND_HEAD, FIRST_SEGMENT.rev(), SECOND_TAIL],
    },
    Template {
        first: &[FIRST_HEAD, SECOND_SEGMENT.rev(), FIRST_TAIL],
        second: &[SECOND_HEAD, FIRST_SEGMENT, SECOND_TAIL],
    },
    Template {
        first: &[FIRST_HEAD, SECOND_SEGMENT.rev(), FIRST_TAIL],
        second: &[SECOND_HEAD, FIRST_SEGMENT.rev(), SECOND_TAIL],
    },
];

pub(crate) fn interchange(
    evaluator: &Evaluator<'_>,
    solution: &mut Solution,
    epsilon: f64,
) -> Option<AcceptedMove> {
    let instance = evaluator.instance();
    let capacity = u64::from(instance.capacity());
    let prefixes: Vec<Vec<u64>> = solution
        .routes()
        .iter()
        .map(|r| prefix_demands(instance, r.stops()))
        .collect();
    let loads: Vec<u64> = prefixes.iter().map(|p| p[p.len() - 1]).collect();
    let num_routes = solution.num_routes();

    for first in 0..num_routes {
        let len1 = solution.route(first).len();
        for start1 in 1..len1.saturating_sub(1) {
            for end1 in start1..len1 - 1 {
                let segment1 = prefixes[first][end1 + 1] - prefixes[first][start1];
                for second in (0..num_routes).filter(|&r| r != first) {
                    let len2 = solution.route(second).len();
                    for start2 in 1..len2.saturating_sub(1) {
                        for end2 in start2..len2 - 1 {
                            let segment2 = prefixes[second][end2 + 1] - prefixes[second][start2];
                            if loads[first] - segment1 + segment2 > capacity
                                || loads[second] - segment2 + segment1 > capacity
                            {
                                continue;
                            }
                            let applied = recombine(
                                evaluator,
                                solution,
                                Cut::new(first, start1, end1 + 1),
                                Some(Cut::new(second, start2, end2 + 1)),
                                &INTERCHANGE,
                                epsilon,
                            );
                            if let Some(applied) = applied {
                                return Some(AcceptedMove::new(
                                    Operator::Interchange,
                                    first,
                                    Some(second),
                                    applied.delta,
                                ));
                            }
                        }
                    }
                }
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::local_search::shift::shift;
    use crate::models::{Customer, Instance, Route};

    /// Two clusters, east and west, each route crossing between them.
    fn crossed() -> (Instance, Solution) {
        let customers = vec![
            Customer::depot(0.0, 0.0),
            Customer::new(1, 1, 10.0, 0.0),
            Customer::new(2, 1, -10.0, 1.0),
            Customer::new(3, 1, -10.0, 0.0),
            Customer::new(4, 1, 10.0, 1.0),
        ];
        let inst = Instance::new(customers, 2, 2).expect("valid");
        let sol = Solution::from_routes(
            &inst,
            vec![Route::from_customers(&[1, 2]), Route::from_customers(&[3, 4])],
        )
        .expect("feasible");
        (inst, sol)
    }

    #[test]
    fn test_interchange_uncrosses_clusters() {
        let (inst, mut sol) = crossed();
        let eval = Evaluator::new(&inst);
        let before = sol.total_cost();

        let mv = interchange(&eval, &mut sol, 1e-6).expect("swap improves");
        assert_eq!(mv.operator, Operator::Interchange);
        assert_eq!((mv.first_route, mv.second_route), (0, Some(1)));
        assert_eq!(sol.route(0).customers(), &[3, 2]);
        assert_eq!(sol.route(1).customers(), &[1, 4]);
        assert!(mv.delta < -30.0);
        assert!((sol.total_cost() - (before + mv.delta)).abs() < 1e-9);
        assert!(eval.check(&sol, 1e-6).is_ok());
    }

    #[test]
    fn test_full_routes_block_shift_but_not_interchange() {
        let (inst, mut sol) = crossed();
        let eval = Evaluator::new(&inst);
        assert!(shift(&eval, &mut sol, 1e-6).is_none());
        assert!(interchange(&eval, &mut sol, 1e-6).is_some());
    }

    #[test]
    fn test_interchange_respects_capacity() {
        let customers = vec![
            Customer::depot(0.0, 0.0),
            Customer::new(1, 1, 10.0, 0.0),
            Customer::new(2, 2, -10.0, 1.0),
            Customer::new(3, 2, -10.0, 0.0),
            Customer::new(4, 1, 10.0, 1.0),
        ];
        // The west pair 2 and 3 together would load 4 over capacity 3
        let inst = Instance::new(customers, 2, 3).expect("valid");
        let mut sol = Solution::from_routes(
            &inst,
            vec![Route::from_customers(&[1, 2]), Route::from_customers(&[3, 4])],
        )
        .expect("feasible");
        let eval = Evaluator::new(&inst);
        while interchange(&eval, &mut sol, 1e-6).is_some() {
            assert!(eval.check(&sol, 1e-6).is_ok());
        }
        for route in sol.routes() {
            assert!(inst.route_demand(route.stops()) <= 3);
            let customers = route.customers();
            assert!(!(customers.contains(&2) && customers.contains(&3)));
        }
    }

    #[test]
    fn test_interchange_local_optimum_is_stable() {
        let (inst, mut sol) = crossed();
        let eval = Evaluator::new(&inst);
        while interchange(&eval, &mut sol, 1e-6).is_some() {}
        let snapshot = sol.clone();
        assert!(interchange(&eval, &mut sol, 1e-6).is_none());
        assert_eq!(sol.routes(), snapshot.routes());
    }
}
