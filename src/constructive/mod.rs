//! Constructive heuristics for building initial solutions.
//!
//! - [`greedy_packing`] — Demand-descending first-fit packing, O(n log n + V·n)
//! - [`nearest_neighbor`] — Capacity-aware nearest-neighbor routes, O(n²)

mod greedy;
mod nearest_neighbor;

pub use greedy::greedy_packing;
pub use nearest_neighbor::nearest_neighbor;
