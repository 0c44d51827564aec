//! **mazer-core**: core maze types.
//!
//! This crate provides the foundational types shared by the generator and the
//! solver: geometry primitives, the four cell states and the rectangular maze
//! grid with its text notation (`#` wall, `.` open, `S` start, `E` end).

pub mod cell;
pub mod error;
pub mod geom;
pub mod grid;

pub use cell::Cell;
pub use error::GridError;
pub use geom::{Point, Range};
pub use grid::{Grid, MIN_SIZE};
