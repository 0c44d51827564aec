//! Structural checks and statistics for generated mazes.

use std::collections::HashSet;

use mazer_core::{Cell, Grid, Point};
use mazer_paths::{PathRange, UNREACHABLE};

use crate::solver::MazePather;

/// All passable cells connected to the start marker, the start included.
/// Empty if the grid has no start.
pub fn reachable_from_start(grid: &Grid) -> Vec<Point> {
    let Some(start) = grid.find(Cell::Start) else {
        return Vec::new();
    };
    PathRange::new(grid.bounds()).cc_map(&MazePather::new(grid), start)
}

/// Whether every passable cell can be reached from the start.
pub fn is_connected(grid: &Grid) -> bool {
    reachable_from_start(grid).len() == grid.count_passable()
}

/// Number of adjacent pairs of passable cells.
pub fn corridor_edges(grid: &Grid) -> usize {
    grid.iter()
        .filter(|&(_, c)| c.is_passable())
        .map(|(p, _)| {
            [p.shift(1, 0), p.shift(0, 1)]
                .into_iter()
                .filter(|&n| grid.get(n).is_some_and(Cell::is_passable))
                .count()
        })
        .sum()
}

/// Connected and acyclic: exactly one path between any two passable cells.
pub fn is_perfect(grid: &Grid) -> bool {
    is_connected(grid) && corridor_edges(grid) + 1 == grid.count_passable()
}

/// Breadth-first step count from start to end, independent of the A*
/// solver. `None` when either marker is missing or the end is unreachable.
pub fn shortest_distance(grid: &Grid) -> Option<i32> {
    let start = grid.find(Cell::Start)?;
    let end = grid.find(Cell::End)?;
    let mut pr = PathRange::new(grid.bounds());
    pr.bfs_map(&MazePather::new(grid), &[start], i32::MAX);
    match pr.bfs_at(end) {
        UNREACHABLE => None,
        d => Some(d),
    }
}

/// Summary numbers for a maze.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MazeStats {
    pub width: i32,
    pub height: i32,
    /// Open, start and end cells.
    pub passable: usize,
    /// Open cells with a single passable neighbour.
    pub dead_ends: usize,
    /// Connected regions of passable cells.
    pub regions: usize,
    /// Steps on the shortest start-to-end route, if there is one.
    pub solution_steps: Option<i32>,
}

impl MazeStats {
    pub fn of(grid: &Grid) -> Self {
        let pather = MazePather::new(grid);
        let mut pr = PathRange::new(grid.bounds());
        pr.cc_map_all(&pather);
        let regions: HashSet<usize> = grid
            .iter()
            .filter(|&(_, c)| c.is_passable())
            .filter_map(|(p, _)| pr.cc_at(p))
            .collect();

        Self {
            width: grid.width(),
            height: grid.height(),
            passable: grid.count_passable(),
            dead_ends: grid
                .iter()
                .filter(|&(p, c)| c == Cell::Open && grid.passable_degree(p) == 1)
                .count(),
            regions: regions.len(),
            solution_steps: shortest_distance(grid),
        }
    }
}
