//! Shortest start-to-end routes through a maze.

use std::fmt;

use mazer_core::{Cell, Grid, Point};
use mazer_paths::{AstarPather, Cancelled, PathRange, Pather, WeightedPather, manhattan};

/// Adapts a borrowed [`Grid`] to the pathfinding traits: unit steps between
/// orthogonally adjacent passable cells, Manhattan distance as heuristic.
pub struct MazePather<'a> {
    grid: &'a Grid,
}

impl<'a> MazePather<'a> {
    pub fn new(grid: &'a Grid) -> Self {
        Self { grid }
    }
}

impl Pather for MazePather<'_> {
    fn neighbors(&self, p: Point, buf: &mut Vec<Point>) {
        // Walls are dead ends for every search, including flood fills that
        // start from one.
        if !self.grid.get(p).is_some_and(Cell::is_passable) {
            return;
        }
        buf.extend(self.grid.neighbors(p, Cell::is_passable));
    }
}

impl WeightedPather for MazePather<'_> {
    fn cost(&self, _from: Point, _to: Point) -> i32 {
        1
    }
}

impl AstarPather for MazePather<'_> {
    fn estimate(&self, from: Point, to: Point) -> i32 {
        manhattan(from, to)
    }
}

/// One of the two markers a solvable grid must carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Start,
    End,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Start => write!(f, "start (S)"),
            Endpoint::End => write!(f, "end (E)"),
        }
    }
}

/// Errors raised when a grid cannot be handed to the solver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolveError {
    /// The grid has no cell with the given marker.
    MissingEndpoint(Endpoint),
}

impl fmt::Display for SolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingEndpoint(which) => write!(f, "maze has no {which} marker"),
        }
    }
}

impl std::error::Error for SolveError {}

/// Result of a cancellable solve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolveOutcome {
    /// Start-to-end route, both markers included.
    Found(Vec<Point>),
    /// The search ran out of cells without reaching the end.
    NoPath,
    /// The caller's stop hook ended the search early.
    Cancelled,
}

impl SolveOutcome {
    /// The route, or an empty vector for both `NoPath` and `Cancelled`.
    pub fn into_path(self) -> Vec<Point> {
        match self {
            SolveOutcome::Found(path) => path,
            SolveOutcome::NoPath | SolveOutcome::Cancelled => Vec::new(),
        }
    }
}

/// A* solver over a borrowed maze.
///
/// The grid stays borrowed immutably for the solver's whole lifetime. Each
/// [`solve`](Solver::solve) call is an independent search with fresh caches.
#[derive(Debug, Clone, Copy)]
pub struct Solver<'a> {
    grid: &'a Grid,
    start: Point,
    end: Point,
}

impl<'a> Solver<'a> {
    /// Scan `grid` once for its start and end markers.
    pub fn new(grid: &'a Grid) -> Result<Self, SolveError> {
        let mut start = None;
        let mut end = None;
        let (mut starts, mut ends) = (0, 0);
        for (p, c) in grid.iter() {
            match c {
                Cell::Start => {
                    starts += 1;
                    start = start.or(Some(p));
                }
                Cell::End => {
                    ends += 1;
                    end = end.or(Some(p));
                }
                Cell::Wall | Cell::Open => {}
            }
        }
        if starts > 1 || ends > 1 {
            log::warn!("maze has {starts} start and {ends} end markers, using the first of each");
        }

        let start = start.ok_or(SolveError::MissingEndpoint(Endpoint::Start))?;
        let end = end.ok_or(SolveError::MissingEndpoint(Endpoint::End))?;
        Ok(Self { grid, start, end })
    }

    #[inline]
    pub fn start(&self) -> Point {
        self.start
    }

    #[inline]
    pub fn end(&self) -> Point {
        self.end
    }

    /// Shortest route from start to end, both included. An empty vector
    /// means the end cannot be reached.
    pub fn solve(&self) -> Vec<Point> {
        self.solve_with(|| false).into_path()
    }

    /// Like [`solve`](Solver::solve) but polls `should_stop` between
    /// expansions, reporting [`SolveOutcome::Cancelled`] when it fires.
    pub fn solve_with<F: FnMut() -> bool>(&self, should_stop: F) -> SolveOutcome {
        let pather = MazePather::new(self.grid);
        let mut pr = PathRange::new(self.grid.bounds());
        match pr.astar_path_until(&pather, self.start, self.end, should_stop) {
            Ok(Some(path)) => SolveOutcome::Found(path),
            Ok(None) => SolveOutcome::NoPath,
            Err(Cancelled) => SolveOutcome::Cancelled,
        }
    }
}
