use std::collections::BinaryHeap;
use std::fmt;

use mazer_core::Point;

use crate::PathRange;
use crate::pathrange::{NodeRef, UNREACHABLE};
use crate::traits::AstarPather;

/// Returned by [`PathRange::astar_path_until`] when the caller's stop hook
/// fired before the search finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cancelled;

impl fmt::Display for Cancelled {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "search cancelled")
    }
}

impl std::error::Error for Cancelled {}

enum Exit {
    Found,
    Exhausted,
    Cancelled,
}

impl PathRange {
    /// Compute the shortest path from `from` to `to` using A*.
    ///
    /// Returns the full path (including both endpoints) or `None` if no path
    /// exists within the current range.
    pub fn astar_path<P: AstarPather>(
        &mut self,
        pather: &P,
        from: Point,
        to: Point,
    ) -> Option<Vec<Point>> {
        self.astar_path_until(pather, from, to, || false)
            .unwrap_or_default()
    }

    /// A* search that polls `should_stop` before every pop of the open set.
    ///
    /// Returns `Err(Cancelled)` as soon as the hook answers `true`,
    /// `Ok(None)` if the open set ran dry, and `Ok(Some(path))` otherwise.
    /// Nodes are never re-expanded once closed; improved scores re-push a
    /// node and the outdated heap entry is skipped when popped.
    pub fn astar_path_until<P, F>(
        &mut self,
        pather: &P,
        from: Point,
        to: Point,
        mut should_stop: F,
    ) -> Result<Option<Vec<Point>>, Cancelled>
    where
        P: AstarPather,
        F: FnMut() -> bool,
    {
        let (Some(start_idx), Some(goal_idx)) = (self.idx(from), self.idx(to)) else {
            return Ok(None);
        };

        if start_idx == goal_idx {
            return Ok(Some(vec![from]));
        }

        // Bump generation to lazily invalidate all nodes.
        self.astar_generation = self.astar_generation.wrapping_add(1);
        let cur_gen = self.astar_generation;

        let start_f = pather.estimate(from, to);
        {
            let node = &mut self.astar_nodes[start_idx];
            node.g = 0;
            node.f = start_f;
            node.parent = usize::MAX;
            node.generation = cur_gen;
            node.closed = false;
        }

        let mut open: BinaryHeap<NodeRef> = BinaryHeap::new();
        open.push(NodeRef {
            idx: start_idx,
            f: start_f,
            g: 0,
        });

        let mut nbuf = std::mem::take(&mut self.nbuf);
        let mut expanded = 0usize;

        let exit = 'search: loop {
            if should_stop() {
                break 'search Exit::Cancelled;
            }
            let Some(current) = open.pop() else {
                break 'search Exit::Exhausted;
            };

            let ci = current.idx;

            // Skip stale entries.
            let node = &self.astar_nodes[ci];
            if node.generation != cur_gen || node.closed || node.g != current.g {
                continue;
            }

            if ci == goal_idx {
                break 'search Exit::Found;
            }

            self.astar_nodes[ci].closed = true;
            expanded += 1;
            let current_point = self.point(ci);
            log::trace!("expand {current_point} g={} f={}", current.g, current.f);

            nbuf.clear();
            pather.neighbors(current_point, &mut nbuf);

            for &np in nbuf.iter() {
                let Some(ni) = self.idx(np) else {
                    continue;
                };
                let tentative_g = current.g + pather.cost(current_point, np);

                let n = &mut self.astar_nodes[ni];
                if n.generation == cur_gen {
                    if n.closed || tentative_g >= n.g {
                        continue;
                    }
                } else {
                    n.generation = cur_gen;
                    n.g = UNREACHABLE;
                    n.closed = false;
                }

                n.g = tentative_g;
                n.f = tentative_g + pather.estimate(np, to);
                n.parent = ci;

                open.push(NodeRef {
                    idx: ni,
                    f: n.f,
                    g: n.g,
                });
            }
        };

        self.nbuf = nbuf;

        match exit {
            Exit::Cancelled => {
                log::debug!("A* from {from} to {to} cancelled after {expanded} expansions");
                Err(Cancelled)
            }
            Exit::Exhausted => {
                log::debug!("A* from {from} to {to}: no path after {expanded} expansions");
                Ok(None)
            }
            Exit::Found => {
                let mut path = Vec::new();
                let mut ci = goal_idx;
                while ci != usize::MAX {
                    path.push(self.point(ci));
                    ci = self.astar_nodes[ci].parent;
                }
                path.reverse();
                log::debug!(
                    "A* from {from} to {to}: {} steps, {expanded} expansions",
                    path.len() - 1
                );
                Ok(Some(path))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Pather, WeightedPather, manhattan};
    use mazer_core::Range;

    /// Open field with a set of blocked points.
    struct Field {
        rng: Range,
        blocked: Vec<Point>,
    }

    impl Pather for Field {
        fn neighbors(&self, p: Point, buf: &mut Vec<Point>) {
            for n in p.neighbors_4() {
                if self.rng.contains(n) && !self.blocked.contains(&n) {
                    buf.push(n);
                }
            }
        }
    }

    impl WeightedPather for Field {
        fn cost(&self, _from: Point, _to: Point) -> i32 {
            1
        }
    }

    impl AstarPather for Field {
        fn estimate(&self, from: Point, to: Point) -> i32 {
            manhattan(from, to)
        }
    }

    fn field(w: i32, h: i32, blocked: Vec<Point>) -> Field {
        Field {
            rng: Range::new(0, 0, w, h),
            blocked,
        }
    }

    #[test]
    fn straight_line() {
        let f = field(6, 1, vec![]);
        let mut pr = PathRange::new(f.rng);
        let path = pr
            .astar_path(&f, Point::new(0, 0), Point::new(5, 0))
            .unwrap();
        assert_eq!(path.len(), 6);
        assert_eq!(path[0], Point::new(0, 0));
        assert_eq!(path[5], Point::new(5, 0));
    }

    #[test]
    fn detour_around_wall() {
        // Column x=2 blocked except at y=4.
        let blocked = (0..4).map(|y| Point::new(2, y)).collect();
        let f = field(5, 5, blocked);
        let mut pr = PathRange::new(f.rng);
        let path = pr
            .astar_path(&f, Point::new(0, 0), Point::new(4, 0))
            .unwrap();
        // 4 down, 4 across, 4 up.
        assert_eq!(path.len() - 1, 12);
        for w in path.windows(2) {
            assert_eq!(manhattan(w[0], w[1]), 1);
        }
    }

    #[test]
    fn no_path_when_walled_off() {
        let blocked = (0..5).map(|y| Point::new(2, y)).collect();
        let f = field(5, 5, blocked);
        let mut pr = PathRange::new(f.rng);
        assert_eq!(pr.astar_path(&f, Point::new(0, 0), Point::new(4, 4)), None);
    }

    #[test]
    fn same_start_and_goal() {
        let f = field(3, 3, vec![]);
        let mut pr = PathRange::new(f.rng);
        let p = Point::new(1, 1);
        assert_eq!(pr.astar_path(&f, p, p), Some(vec![p]));
    }

    #[test]
    fn out_of_range_endpoints() {
        let f = field(3, 3, vec![]);
        let mut pr = PathRange::new(f.rng);
        assert_eq!(pr.astar_path(&f, Point::new(-1, 0), Point::new(1, 1)), None);
        assert_eq!(pr.astar_path(&f, Point::new(0, 0), Point::new(3, 1)), None);
    }

    #[test]
    fn repeated_queries_reuse_caches() {
        let f = field(8, 8, vec![Point::new(3, 3), Point::new(4, 3)]);
        let mut pr = PathRange::new(f.rng);
        let a = pr.astar_path(&f, Point::new(0, 0), Point::new(7, 7)).unwrap();
        let b = pr.astar_path(&f, Point::new(7, 7), Point::new(0, 0)).unwrap();
        let c = pr.astar_path(&f, Point::new(0, 0), Point::new(7, 7)).unwrap();
        assert_eq!(a.len(), 15);
        assert_eq!(b.len(), 15);
        assert_eq!(a, c);
        assert_eq!(pr.astar_generation, 3);
    }

    #[test]
    fn stop_hook_cancels() {
        let f = field(10, 10, vec![]);
        let mut pr = PathRange::new(f.rng);
        let mut polls = 0;
        let res = pr.astar_path_until(&f, Point::new(0, 0), Point::new(9, 9), || {
            polls += 1;
            polls > 3
        });
        assert_eq!(res, Err(Cancelled));
        // A later uncancelled query still works.
        assert!(pr.astar_path(&f, Point::new(0, 0), Point::new(9, 9)).is_some());
    }
}
