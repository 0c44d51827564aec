use std::collections::VecDeque;

use mazer_core::Point;

use crate::PathRange;
use crate::pathrange::{PathNode, UNREACHABLE};
use crate::traits::Pather;

impl PathRange {
    /// Compute a multi-source breadth-first search distance map.
    ///
    /// Each step has cost 1. Expansion stops when the distance exceeds
    /// `max_dist`. Returns a slice of all reached nodes in visiting order.
    pub fn bfs_map<P: Pather>(
        &mut self,
        pather: &P,
        sources: &[Point],
        max_dist: i32,
    ) -> &[PathNode] {
        // Reset.
        self.bfs_map.fill(UNREACHABLE);
        self.bfs_results.clear();

        let mut queue: VecDeque<usize> = VecDeque::new();

        for &src in sources {
            if let Some(si) = self.idx(src) {
                if self.bfs_map[si] != UNREACHABLE {
                    continue;
                }
                self.bfs_map[si] = 0;
                queue.push_back(si);
                self.bfs_results.push(PathNode { pos: src, cost: 0 });
            }
        }

        let mut nbuf = std::mem::take(&mut self.nbuf);

        while let Some(ci) = queue.pop_front() {
            let current_dist = self.bfs_map[ci];
            let cp = self.point(ci);

            nbuf.clear();
            pather.neighbors(cp, &mut nbuf);

            for &np in nbuf.iter() {
                let Some(ni) = self.idx(np) else {
                    continue;
                };
                if self.bfs_map[ni] != UNREACHABLE {
                    continue;
                }
                let nd = current_dist + 1;
                if nd > max_dist {
                    continue;
                }
                self.bfs_map[ni] = nd;
                queue.push_back(ni);
                self.bfs_results.push(PathNode { pos: np, cost: nd });
            }
        }

        self.nbuf = nbuf;
        &self.bfs_results
    }

    /// Query the BFS distance at a specific point.
    ///
    /// Returns [`UNREACHABLE`] if the point is outside the range or was not
    /// reached by the last `bfs_map` call.
    pub fn bfs_at(&self, p: Point) -> i32 {
        match self.idx(p) {
            Some(i) => self.bfs_map[i],
            None => UNREACHABLE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mazer_core::Range;

    /// 4-connected open field.
    struct Open(Range);

    impl Pather for Open {
        fn neighbors(&self, p: Point, buf: &mut Vec<Point>) {
            buf.extend(p.neighbors_4().into_iter().filter(|&n| self.0.contains(n)));
        }
    }

    #[test]
    fn distances_are_manhattan_on_open_field() {
        let rng = Range::new(0, 0, 6, 4);
        let mut pr = PathRange::new(rng);
        let reached = pr.bfs_map(&Open(rng), &[Point::new(0, 0)], i32::MAX).len();
        assert_eq!(reached, 24);
        assert_eq!(pr.bfs_at(Point::new(5, 3)), 8);
        assert_eq!(pr.bfs_at(Point::new(0, 0)), 0);
        assert_eq!(pr.bfs_at(Point::new(9, 9)), UNREACHABLE);
    }

    #[test]
    fn max_dist_limits_expansion() {
        let rng = Range::new(0, 0, 6, 6);
        let mut pr = PathRange::new(rng);
        let nodes = pr.bfs_map(&Open(rng), &[Point::new(0, 0)], 2).to_vec();
        assert_eq!(nodes.len(), 6);
        assert!(nodes.iter().all(|n| n.cost <= 2));
        assert_eq!(pr.bfs_at(Point::new(3, 0)), UNREACHABLE);
    }

    #[test]
    fn multi_source_takes_nearest() {
        let rng = Range::new(0, 0, 9, 1);
        let mut pr = PathRange::new(rng);
        pr.bfs_map(&Open(rng), &[Point::new(0, 0), Point::new(8, 0)], i32::MAX);
        assert_eq!(pr.bfs_at(Point::new(4, 0)), 4);
        assert_eq!(pr.bfs_at(Point::new(6, 0)), 2);
    }
}
