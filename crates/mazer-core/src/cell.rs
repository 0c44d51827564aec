//! Maze cell states.

use std::fmt;

/// The state of a single maze cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Cell {
    #[default]
    Wall,
    Open,
    Start,
    End,
}

impl Cell {
    /// Whether a walker may step onto this cell (anything but a wall).
    #[inline]
    pub const fn is_passable(self) -> bool {
        !matches!(self, Cell::Wall)
    }

    /// Text rune used by the `# . S E` maze notation.
    pub const fn rune(self) -> char {
        match self {
            Cell::Wall => '#',
            Cell::Open => '.',
            Cell::Start => 'S',
            Cell::End => 'E',
        }
    }

    /// Parse a rune of the `# . S E` notation.
    pub const fn from_rune(ch: char) -> Option<Cell> {
        match ch {
            '#' => Some(Cell::Wall),
            '.' => Some(Cell::Open),
            'S' => Some(Cell::Start),
            'E' => Some(Cell::End),
            _ => None,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.rune())
    }
}
