//! Inter-route tail crossing (2-opt*).
//!
//! # Algorithm
//!
//! Cuts route A before position `i` and route B before position `j`
//! (A ≠ B), then rejoins the four pieces in one of two ways:
//!
//! ```text
//! straight:  A' = A[..i] + B[j..]          B' = B[..j] + A[i..]
//! reversed:  A' = A[..i] + rev(B[..j])     B' = rev(A[i..]) + B[j..]
//! ```
//!
//! Every piece keeps exactly one depot endpoint, so both variants yield
//! well-formed routes. An idle vehicle `[0, 0]` can take over the tail of
//! a busy route this way.
//!
//! # Complexity
//!
//! O(R² × n²) candidates per pass, each priced in O(n).
//!
//! # Reference
//!
//! Potvin, J.-Y. & Rousseau, J.-M. (1995). "An Exchange Heuristic for
//! Routeing Problems with Time Windows", *Journal of the Operational Research
//! Society* 46(12), 1433-1446.

use super::operator::{AcceptedMove, Operator};
use super::recombine::{
    prefix_demands, recombine, Cut, Template, FIRST_HEAD, FIRST_TAIL, SECOND_HEAD, SECOND_TAIL,
};
use crate::evaluation::Evaluator;
use crate::models::Solution;

pub(crate) const LADDER: [Template; 2] = [
    Template {
        first: &[FIRST_HEAD, SECOND_TAIL],
        second: &[SECOND_HEAD, FIRST_TAIL],
    },
    Template {
        first: &[FIRST_HEAD, SECOND_HEAD.rev()],
        second: &[FIRST_TAIL.rev(), SECOND_TAIL],
    },
];

pub(crate) fn ladder(
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
    let num_routes = solution.num_routes();

    for first in 0..num_routes {
        let len1 = solution.route(first).len();
        let load1 = prefixes[first][len1];
        for cut1 in 1..len1 {
            let head1 = prefixes[first][cut1];
            let tail1 = load1 - head1;
            for second in (0..num_routes).filter(|&r| r != first) {
                let len2 = solution.route(second).len();
                let load2 = prefixes[second][len2];
                for cut2 in 1..len2 {
                    let head2 = prefixes[second][cut2];
                    let tail2 = load2 - head2;
                    let straight = head1 + tail2 <= capacity && head2 + tail1 <= capacity;
                    let reversed = head1 + head2 <= capacity && tail1 + tail2 <= capacity;
                    if !straight && !reversed {
                        continue;
                    }
                    let applied = recombine(
                        evaluator,
                        solution,
                        Cut::at(first, cut1),
                        Some(Cut::at(second, cut2)),
                        &LADDER,
                        epsilon,
                    );
                    if let Some(applied) = applied {
                        return Some(AcceptedMove::new(
                            Operator::Ladder,
                            first,
                            Some(second),
                            applied.delta,
                        ));
                    }
                }
            }
        }
    }
    None
}
