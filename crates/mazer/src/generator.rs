//! Perfect maze generation.
//!
//! Mazes are carved by a randomized depth-first walk over the odd-coordinate
//! lattice: every step jumps two cells and opens the cell in between, so
//! walls stay standing between parallel corridors and the carved cells form
//! a spanning tree (exactly one path between any two open cells).

use mazer_core::{Cell, Grid, Point};
use rand::Rng;
use rand::seq::SliceRandom;

/// Carve origin and start marker.
pub const START: Point = Point::new(1, 1);

/// Carve moves, two cells in each cardinal direction.
const CARVE_STEPS: [Point; 4] = [
    Point::new(0, 2),
    Point::new(2, 0),
    Point::new(0, -2),
    Point::new(-2, 0),
];

/// Generation options.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GenConfig {
    /// Repeatedly wall off open cells with a single passable neighbour until
    /// none remain. Start and end are kept, so on a perfect maze only the
    /// start-to-end corridor survives.
    pub prune_dead_ends: bool,
    /// Connect the end marker to the carved lattice when it falls off it
    /// (even width or height). Without it such an end is walled in.
    pub link_end: bool,
}

impl Default for GenConfig {
    fn default() -> Self {
        Self {
            prune_dead_ends: false,
            link_end: true,
        }
    }
}

/// The end marker position for a grid of the given size.
#[inline]
pub fn end_position(size: Point) -> Point {
    Point::new(size.x - 2, size.y - 2)
}

/// One pending cell of the depth-first carve with its shuffled moves.
struct Frame {
    at: Point,
    steps: [Point; 4],
    next: usize,
}

/// Maze generator owning its random source.
pub struct MazeGen<R: Rng> {
    pub rng: R,
    pub config: GenConfig,
}

impl<R: Rng> MazeGen<R> {
    /// Create a generator with the default [`GenConfig`].
    pub fn new(rng: R) -> Self {
        Self::with_config(rng, GenConfig::default())
    }

    pub fn with_config(rng: R, config: GenConfig) -> Self {
        Self { rng, config }
    }

    /// Generate a maze. Dimensions below 5 are raised to 5.
    ///
    /// The start is always (1, 1) and the end (width-2, height-2).
    pub fn generate(&mut self, width: i32, height: i32) -> Grid {
        let mut grid = Grid::new(width, height);
        if grid.width() != width || grid.height() != height {
            log::debug!(
                "maze size {width}x{height} raised to {}x{}",
                grid.width(),
                grid.height()
            );
        }

        grid.set(START, Cell::Start);
        let depth = self.carve(&mut grid);

        let end = end_position(grid.size());
        grid.set(end, Cell::End);
        let linked = if self.config.link_end {
            link_end(&mut grid, end)
        } else {
            0
        };

        let pruned = if self.config.prune_dead_ends {
            prune_dead_ends(&mut grid)
        } else {
            0
        };

        log::debug!(
            "generated {}x{} maze: {} passable cells, carve depth {depth}, end link {linked}, pruned {pruned}",
            grid.width(),
            grid.height(),
            grid.count_passable(),
        );
        grid
    }

    fn shuffled_steps(&mut self) -> [Point; 4] {
        let mut steps = CARVE_STEPS;
        steps.shuffle(&mut self.rng);
        steps
    }

    /// Depth-first carve from [`START`] with an explicit stack. Each frame
    /// tries its moves in shuffled order and descends into the first one
    /// that reaches an uncarved interior cell, resuming with the remaining
    /// moves once that branch is exhausted. Returns the deepest stack size.
    fn carve(&mut self, grid: &mut Grid) -> usize {
        let interior = grid.interior();
        let mut stack = vec![Frame {
            at: START,
            steps: self.shuffled_steps(),
            next: 0,
        }];
        let mut max_depth = 1;

        while let Some(frame) = stack.last_mut() {
            let Some(&step) = frame.steps.get(frame.next) else {
                stack.pop();
                continue;
            };
            frame.next += 1;

            let from = frame.at;
            let target = from + step;
            if !interior.contains(target) || grid.get(target) != Some(Cell::Wall) {
                continue;
            }

            grid.set(target, Cell::Open);
            grid.set(from.midpoint(target), Cell::Open);
            let steps = self.shuffled_steps();
            stack.push(Frame {
                at: target,
                steps,
                next: 0,
            });
            max_depth = max_depth.max(stack.len());
        }

        max_depth
    }
}

/// Join an isolated end marker to the carved lattice.
///
/// Walks from `end` toward the nearest odd-coordinate cell, first along y
/// then along x, opening walls until the walk touches a passable cell other
/// than the one it came from. Returns the number of cells opened.
fn link_end(grid: &mut Grid, end: Point) -> usize {
    let corner = Point::new(end.x - (end.x + 1) % 2, end.y - (end.y + 1) % 2);
    let mut prev = end;
    let mut cur = end;
    let mut opened = 0;

    while !grid.neighbors(cur, Cell::is_passable).any(|n| n != prev) {
        let next = if cur.y > corner.y {
            cur.shift(0, -1)
        } else if cur.x > corner.x {
            cur.shift(-1, 0)
        } else {
            log::warn!("end marker at {end} could not be linked to the maze");
            break;
        };
        grid.set(next, Cell::Open);
        opened += 1;
        prev = cur;
        cur = next;
    }

    opened
}

/// Wall off dead-end stubs until none remain. Returns the number of cells
/// removed.
fn prune_dead_ends(grid: &mut Grid) -> usize {
    fn is_stub(grid: &Grid, p: Point) -> bool {
        grid.get(p) == Some(Cell::Open) && grid.passable_degree(p) == 1
    }

    let mut work: Vec<Point> = grid.interior().iter().filter(|&p| is_stub(grid, p)).collect();
    let mut removed = 0;

    while let Some(p) = work.pop() {
        if !is_stub(grid, p) {
            continue;
        }
        // Removing a stub may turn its only neighbour into one.
        let next = grid.neighbors(p, Cell::is_passable).next();
        grid.set(p, Cell::Wall);
        removed += 1;
        if let Some(n) = next {
            work.push(n);
        }
    }

    removed
}
