//! Perfect maze generation and shortest-path solving.
//!
//! ```
//! let grid = mazer::generate(21, 15);
//! let path = mazer::solve(&grid).unwrap();
//! assert_eq!(path.first(), Some(&mazer::Point::new(1, 1)));
//! assert_eq!(path.last(), Some(&mazer::Point::new(19, 13)));
//! ```
//!
//! [`MazeGen`] carves a spanning tree over the odd-coordinate cells with a
//! randomized depth-first walk, so there is exactly one route between any
//! two open cells. [`Solver`] runs A* with a Manhattan heuristic over a
//! borrowed grid and returns the start-to-end route, or an empty route when
//! the end is unreachable.

pub mod analysis;
pub mod generator;
pub mod render;
pub mod solver;

pub use analysis::{MazeStats, is_connected, is_perfect, reachable_from_start};
pub use generator::{GenConfig, MazeGen};
pub use mazer_core::{Cell, Grid, GridError, Point, Range};
pub use render::render_with_path;
pub use solver::{Endpoint, SolveError, SolveOutcome, Solver};

/// Generate a maze with the thread-local random source and default options.
/// Dimensions below 5 are raised to 5.
pub fn generate(width: i32, height: i32) -> Grid {
    MazeGen::new(rand::rng()).generate(width, height)
}

/// Shortest route from the start marker to the end marker, both included.
///
/// An unreachable end yields `Ok` with an empty route; only a grid missing
/// a marker is an error.
pub fn solve(grid: &Grid) -> Result<Vec<Point>, SolveError> {
    Ok(Solver::new(grid)?.solve())
}
