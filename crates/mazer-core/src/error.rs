use std::fmt;

use crate::Point;

/// Errors raised by [`Grid`](crate::Grid) construction, access and parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// A coordinate lies outside `[0, width) × [0, height)`.
    OutOfRange { pos: Point, size: Point },
    /// The requested dimensions cannot hold a one-cell border plus an
    /// interior for the start and end markers.
    InvalidDimensions { width: i32, height: i32 },
    /// Lines of a text maze have different widths.
    InconsistentSize { line: usize, expected: usize, found: usize },
    /// A character outside the `# . S E` notation was found.
    InvalidRune { ch: char, pos: Point },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange { pos, size } => {
                write!(f, "position {pos} is outside a {}x{} grid", size.x, size.y)
            }
            Self::InvalidDimensions { width, height } => write!(
                f,
                "invalid maze dimensions {width}x{height} (minimum is {m}x{m})",
                m = crate::grid::MIN_SIZE
            ),
            Self::InconsistentSize {
                line,
                expected,
                found,
            } => write!(
                f,
                "maze: inconsistent size at line {line}: expected {expected} cells, found {found}"
            ),
            Self::InvalidRune { ch, pos } => {
                write!(f, "maze contains invalid rune \u{201c}{ch}\u{201d} at {pos}")
            }
        }
    }
}

impl std::error::Error for GridError {}
