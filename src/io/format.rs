//! Plain-text solution writers.
//!
//! The first line is always `cost 0`: the cost to two decimals and an
//! optimality flag, which is 0 since local search never proves optimality.

use crate::models::Solution;

fn header(solution: &Solution) -> String {
    format!("{:.2} 0\n", solution.total_cost())
}

fn join(stops: &[usize]) -> String {
    stops
        .iter()
        .map(|s| s.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Writes the header followed by one line per vehicle listing its stops,
/// depot endpoints included. Idle vehicles print `0 0`.
///
/// # Examples
///
/// ```
/// use u_cvrp::io::{format_solution, parse_instance};
/// use u_cvrp::search::{solve, SearchConfig};
///
/// let instance = parse_instance("3 2 10\n0 0 0\n3 3 4\n4 -3 -4\n").unwrap();
/// let result = solve(&instance, &SearchConfig::default()).unwrap();
/// assert_eq!(format_solution(&result.solution), "20.00 0\n0 2 1 0\n0 0\n");
/// ```
pub fn format_solution(solution: &Solution) -> String {
    let mut out = header(solution);
    for route in solution.routes() {
        out.push_str(&join(route.stops()));
        out.push('\n');
    }
    out
}

/// Writes the header followed by the visiting order of the first route,
/// starting at the depot and without the closing return.
///
/// # Examples
///
/// ```
/// use u_cvrp::io::{format_tour, parse_tour};
/// use u_cvrp::search::{solve, SearchConfig};
///
/// let instance = parse_tour("4\n0 0\n0 1\n1 0\n1 1\n").unwrap();
/// let result = solve(&instance, &SearchConfig::tour()).unwrap();
/// assert_eq!(format_tour(&result.solution), "4.00 0\n0 1 3 2\n");
/// ```
pub fn format_tour(solution: &Solution) -> String {
    let mut out = header(solution);
    if let Some(route) = solution.routes().first() {
        let stops = route.stops();
        out.push_str(&join(&stops[..stops.len().saturating_sub(1)]));
        out.push('\n');
    }
    out
}
