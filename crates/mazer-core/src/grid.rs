//! The maze grid.
//!
//! A [`Grid`] owns a row-major buffer of [`Cell`] states. Generation writes
//! through `&mut Grid`; everything downstream (solving, rendering, stats)
//! only ever sees `&Grid`, so a grid cannot change under a running search.

use std::fmt;
use std::str::FromStr;

use crate::{Cell, GridError, Point, Range};

/// Smallest width or height that still leaves an interior inside the
/// one-cell wall border for distinct start and end cells.
pub const MIN_SIZE: i32 = 5;

/// Number of cells in a `width` x `height` grid.
#[inline]
fn area(width: i32, height: i32) -> usize {
    width as usize * height as usize
}

/// Row-major offset of `p` in a grid `width` cells wide.
#[inline]
fn flat_index(width: i32, p: Point) -> usize {
    p.y as usize * width as usize + p.x as usize
}

/// A rectangular maze of [`Cell`] states with its origin at (0, 0).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cells: Vec<Cell>,
    bounds: Range,
}

impl Grid {
    /// Create an all-wall grid. Each dimension is raised to at least
    /// [`MIN_SIZE`].
    pub fn new(width: i32, height: i32) -> Self {
        let width = width.max(MIN_SIZE);
        let height = height.max(MIN_SIZE);
        Self {
            cells: vec![Cell::Wall; area(width, height)],
            bounds: Range::new(0, 0, width, height),
        }
    }

    /// Like [`Grid::new`] but rejects dimensions below [`MIN_SIZE`]
    /// instead of clamping them.
    pub fn try_new(width: i32, height: i32) -> Result<Self, GridError> {
        if width < MIN_SIZE || height < MIN_SIZE {
            return Err(GridError::InvalidDimensions { width, height });
        }
        Ok(Self::new(width, height))
    }

    /// Parse a grid from `# . S E` text, one row per line.
    pub fn parse(text: &str) -> Result<Self, GridError> {
        let mut rows: Vec<&str> = text.lines().map(|l| l.trim_end_matches('\r')).collect();
        while rows.last().is_some_and(|l| l.is_empty()) {
            rows.pop();
        }
        let height = rows.len();
        let width = rows.first().map_or(0, |r| r.chars().count());
        if (width as i32) < MIN_SIZE || (height as i32) < MIN_SIZE {
            return Err(GridError::InvalidDimensions {
                width: width as i32,
                height: height as i32,
            });
        }

        let mut cells = Vec::with_capacity(width * height);
        for (y, row) in rows.iter().enumerate() {
            let found = row.chars().count();
            if found != width {
                return Err(GridError::InconsistentSize {
                    line: y,
                    expected: width,
                    found,
                });
            }
            for (x, ch) in row.chars().enumerate() {
                let cell = Cell::from_rune(ch).ok_or(GridError::InvalidRune {
                    ch,
                    pos: Point::new(x as i32, y as i32),
                })?;
                cells.push(cell);
            }
        }

        Ok(Self {
            cells,
            bounds: Range::new(0, 0, width as i32, height as i32),
        })
    }

    /// Returns the bounding range of the grid.
    #[inline]
    pub fn bounds(&self) -> Range {
        self.bounds
    }

    /// Cells strictly inside the one-cell outer border.
    #[inline]
    pub fn interior(&self) -> Range {
        self.bounds.shift(1, 1, -1, -1)
    }

    /// Returns the size as a Point (width = x, height = y).
    #[inline]
    pub fn size(&self) -> Point {
        self.bounds.size()
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.bounds.width()
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.bounds.height()
    }

    /// Whether the grid contains the given point.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.bounds.contains(p)
    }

    #[inline]
    fn index(&self, p: Point) -> usize {
        flat_index(self.bounds.width(), p)
    }

    /// The state at `p`, or [`GridError::OutOfRange`].
    pub fn at(&self, p: Point) -> Result<Cell, GridError> {
        self.get(p).ok_or(GridError::OutOfRange {
            pos: p,
            size: self.size(),
        })
    }

    /// The state at `p`, or `None` if out of bounds.
    #[inline]
    pub fn get(&self, p: Point) -> Option<Cell> {
        if !self.bounds.contains(p) {
            return None;
        }
        Some(self.cells[self.index(p)])
    }

    /// Overwrite the state at `p`. Does nothing if out of bounds.
    pub fn set(&mut self, p: Point, cell: Cell) {
        if !self.bounds.contains(p) {
            return;
        }
        let idx = self.index(p);
        self.cells[idx] = cell;
    }

    /// In-bounds orthogonal neighbours of `p` whose state satisfies `keep`,
    /// in south, east, north, west order.
    pub fn neighbors<F>(&self, p: Point, keep: F) -> impl Iterator<Item = Point>
    where
        F: Fn(Cell) -> bool,
    {
        p.neighbors_4()
            .into_iter()
            .filter(move |&n| self.get(n).is_some_and(&keep))
    }

    /// Number of passable orthogonal neighbours of `p`.
    pub fn passable_degree(&self, p: Point) -> usize {
        self.neighbors(p, Cell::is_passable).count()
    }

    /// First position holding `cell` in row-major order.
    pub fn find(&self, cell: Cell) -> Option<Point> {
        self.iter().find(|&(_, c)| c == cell).map(|(p, _)| p)
    }

    /// Count how many cells equal the given state.
    pub fn count(&self, cell: Cell) -> usize {
        self.cells.iter().filter(|&&c| c == cell).count()
    }

    /// Count cells that are not walls.
    pub fn count_passable(&self) -> usize {
        self.cells.iter().filter(|c| c.is_passable()).count()
    }

    /// Iterate over `(Point, Cell)` pairs in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Point, Cell)> + '_ {
        self.bounds.iter().zip(self.cells.iter().copied())
    }
}

impl fmt::Display for Grid {
    /// Row-major `# . S E` text, one line per row.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.width() as usize) {
            for c in row {
                write!(f, "{}", c.rune())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl FromStr for Grid {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Grid {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Grid {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Grid::parse(&text).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SMALL: &str = "\
#####
#S..#
###.#
#E..#
#####
";

    #[test]
    fn new_is_all_walls() {
        let g = Grid::new(7, 9);
        assert_eq!(g.size(), Point::new(7, 9));
        assert_eq!(g.count(Cell::Wall), 63);
    }

    #[test]
    fn new_clamps_to_minimum() {
        let g = Grid::new(1, 3);
        assert_eq!(g.size(), Point::new(5, 5));
        let g = Grid::new(-4, 12);
        assert_eq!(g.size(), Point::new(5, 12));
    }

    #[test]
    fn try_new_rejects_small() {
        assert_eq!(
            Grid::try_new(4, 10),
            Err(GridError::InvalidDimensions {
                width: 4,
                height: 10
            })
        );
        assert!(Grid::try_new(5, 5).is_ok());
    }

    #[test]
    fn at_and_set() {
        let mut g = Grid::new(5, 5);
        g.set(Point::new(2, 3), Cell::Open);
        assert_eq!(g.at(Point::new(2, 3)), Ok(Cell::Open));
        assert_eq!(g.at(Point::new(0, 0)), Ok(Cell::Wall));
        assert_eq!(
            g.at(Point::new(5, 0)),
            Err(GridError::OutOfRange {
                pos: Point::new(5, 0),
                size: Point::new(5, 5)
            })
        );
        assert!(g.at(Point::new(0, -1)).is_err());
        let before = g.clone();
        g.set(Point::new(-1, 2), Cell::Open);
        assert_eq!(g, before);
    }

    #[test]
    fn neighbors_order_and_filter() {
        let g = Grid::parse(SMALL).unwrap();
        // (3,1): south (3,2) open, east (4,1) wall, north (3,0) wall, west (2,1) open.
        let n: Vec<_> = g.neighbors(Point::new(3, 1), Cell::is_passable).collect();
        assert_eq!(n, vec![Point::new(3, 2), Point::new(2, 1)]);

        let all: Vec<_> = g.neighbors(Point::new(2, 2), |_| true).collect();
        assert_eq!(
            all,
            vec![
                Point::new(2, 3),
                Point::new(3, 2),
                Point::new(2, 1),
                Point::new(1, 2),
            ]
        );
    }

    #[test]
    fn neighbors_skip_out_of_bounds() {
        let g = Grid::new(5, 5);
        let n: Vec<_> = g.neighbors(Point::new(0, 0), |_| true).collect();
        assert_eq!(n, vec![Point::new(0, 1), Point::new(1, 0)]);
    }

    #[test]
    fn parse_and_display_agree() {
        let g: Grid = SMALL.parse().unwrap();
        assert_eq!(g.find(Cell::Start), Some(Point::new(1, 1)));
        assert_eq!(g.find(Cell::End), Some(Point::new(1, 3)));
        assert_eq!(g.count_passable(), 7);
        assert_eq!(g.to_string(), SMALL);
    }

    #[test]
    fn parse_errors() {
        assert!(matches!(
            Grid::parse("#####\n#S.#\n#####\n#...#\n#####"),
            Err(GridError::InconsistentSize { line: 1, .. })
        ));
        assert_eq!(
            Grid::parse("#####\n#S..#\n#.x.#\n#..E#\n#####"),
            Err(GridError::InvalidRune {
                ch: 'x',
                pos: Point::new(2, 2)
            })
        );
        assert!(matches!(
            Grid::parse("###\n#S#\n###"),
            Err(GridError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn blank_line_inside_maze_is_rejected() {
        assert_eq!(
            Grid::parse("#####\n#S..#\n\n#..E#\n#####\n"),
            Err(GridError::InconsistentSize {
                line: 2,
                expected: 5,
                found: 0
            })
        );
        let padded = format!("{SMALL}\n\r\n");
        assert_eq!(Grid::parse(&padded), Grid::parse(SMALL));
    }

    #[test]
    fn sizes_beyond_i32_cell_count() {
        assert_eq!(area(65536, 65537), 4_295_032_832);
        assert_eq!(flat_index(65536, Point::new(65535, 65536)), 4_295_032_831);
        assert_eq!(flat_index(7, Point::new(3, 2)), 17);
    }

    #[test]
    fn interior_and_degree() {
        let g = Grid::parse(SMALL).unwrap();
        assert_eq!(g.interior(), Range::new(1, 1, 4, 4));
        assert_eq!(g.passable_degree(Point::new(3, 1)), 2);
        assert_eq!(g.passable_degree(Point::new(1, 1)), 1);
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn grid_round_trip() {
        let mut g = Grid::new(6, 5);
        g.set(Point::new(1, 1), Cell::Start);
        g.set(Point::new(4, 3), Cell::End);
        let json = serde_json::to_string(&g).unwrap();
        let back: Grid = serde_json::from_str(&json).unwrap();
        assert_eq!(back, g);
    }

    #[test]
    fn malformed_grid_rejected() {
        let res: Result<Grid, _> = serde_json::from_str("\"###\"");
        assert!(res.is_err());
    }
}
