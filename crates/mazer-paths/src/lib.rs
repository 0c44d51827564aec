//! Pathfinding algorithms on 2D maze grids.
//!
//! - **A\*** shortest-path search ([`PathRange::astar_path`], cancellable via
//!   [`PathRange::astar_path_until`])
//! - **BFS** unweighted distance maps ([`PathRange::bfs_map`])
//! - **Connected Components** labelling ([`PathRange::cc_map_all`], [`PathRange::cc_map`])
//!
//! All algorithms operate through [`PathRange`], which owns and reuses internal
//! caches so that repeated queries incur zero allocations after warm-up.
//!
//! # Trait hierarchy
//!
//! | Trait | Required for |
//! |---|---|
//! | [`Pather`] | BFS, connected components |
//! | [`WeightedPather`] : [`Pather`] | edge costs |
//! | [`AstarPather`] : [`WeightedPather`] | A* |

mod astar;
mod bfs;
mod cc;
mod distance;
mod pathrange;
mod traits;

pub use astar::Cancelled;
pub use distance::manhattan;
pub use pathrange::{PathNode, PathRange, UNREACHABLE};
pub use traits::{AstarPather, Pather, WeightedPather};
