use std::collections::VecDeque;

use pathgrid_core::{Grid, Pos};

use crate::UNREACHABLE;

/// Unweighted shortest distance from `from` to `to` by breadth-first
/// search over the grid's current adjacency.
///
/// Returns `None` when either position is out of range or `to` cannot be
/// reached. Useful as a reference to check [`PathSearch`](crate::PathSearch)
/// results against.
pub fn bfs_distance(grid: &Grid, from: Pos, to: Pos) -> Option<i32> {
    let si = grid.index(from)?;
    let ti = grid.index(to)?;
    if si == ti {
        return Some(0);
    }

    let mut dist = vec![UNREACHABLE; grid.len()];
    let mut queue: VecDeque<usize> = VecDeque::new();
    dist[si] = 0;
    queue.push_back(si);

    while let Some(ci) = queue.pop_front() {
        let d = dist[ci] + 1;
        for np in grid.neighbors_of(grid.pos_of(ci)) {
            let Some(ni) = grid.index(np) else {
                continue;
            };
            if dist[ni] != UNREACHABLE {
                continue;
            }
            if ni == ti {
                return Some(d);
            }
            dist[ni] = d;
            queue.push_back(ni);
        }
    }
    None
}
