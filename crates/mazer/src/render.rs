//! Plain-text rendering of a maze with a route drawn over it.

use std::collections::HashSet;
use std::fmt::Write;

use mazer_core::{Cell, Grid, Point};

/// Rune drawn on open cells that lie on the route.
pub const PATH_RUNE: char = '*';

/// The grid in `# . S E` notation with every open cell of `path` shown as
/// [`PATH_RUNE`]. Start and end keep their own runes.
pub fn render_with_path(grid: &Grid, path: &[Point]) -> String {
    let on_path: HashSet<Point> = path.iter().copied().collect();
    let mut out = String::with_capacity(grid.bounds().len() + grid.height() as usize);
    for (p, c) in grid.iter() {
        let rune = if c == Cell::Open && on_path.contains(&p) {
            PATH_RUNE
        } else {
            c.rune()
        };
        out.push(rune);
        if p.x == grid.width() - 1 {
            out.push('\n');
        }
    }
    out
}

/// Compact one-line form of a route, e.g. `(1, 1) -> (2, 1) -> (3, 1)`.
pub fn format_path(path: &[Point]) -> String {
    let mut out = String::new();
    for (i, p) in path.iter().enumerate() {
        if i > 0 {
            out.push_str(" -> ");
        }
        let _ = write!(out, "{p}");
    }
    out
}
