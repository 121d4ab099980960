//! Intra-route segment reversal (2-opt).
//!
//! # Algorithm
//!
//! Reverses the segment `[start, end]` of a single route:
//!
//! ```text
//! R' = R[..start] + reverse(R[start..=end]) + R[end+1..]
//! ```
//!
//! Only segments of two or more customers are tried, since reversing a
//! single customer is a no-op. The route's load is unchanged, so every
//! candidate is capacity-feasible.
//!
//! # Complexity
//!
//! O(R × n²) candidates per pass, each priced in O(n).
//!
//! # Reference
//!
//! Croes, G. A. (1958). "A Method for Solving Traveling-Salesman Problems",
//! *Operations Research* 6(6), 791-812.

use super::operator::{AcceptedMove, Operator};
use super::recombine::{recombine, Cut, Template, FIRST_HEAD, FIRST_SEGMENT, FIRST_TAIL};
use crate::evaluation::Evaluator;
use crate::models::Solution;

const EXCHANGE: [Template; 1] = [Template {
    first: &[FIRST_HEAD, FIRST_SEGMENT.rev(), FIRST_TAIL],
    second: &[],
}];

pub(crate) fn exchange(
    evaluator: &Evaluator<'_>,
    solution: &mut Solution,
    epsilon: f64,
) -> Option<AcceptedMove> {
    for route in 0..solution.num_routes() {
        let len = solution.route(route).len();
        for start in 1..len.saturating_sub(1) {
            for end in start + 1..len - 1 {
                let applied = recombine(
                    evaluator,
                    solution,
                    Cut::new(route, start, end + 1),
                    None,
                    &EXCHANGE,
                    epsilon,
                );
                if let Some(applied) = applied {
                    return Some(AcceptedMove::new(
                        Operator::Exchange,
                        route,
                        None,
                        applied.delta,
                    ));
                }
            }
        }
    }
    None
}
