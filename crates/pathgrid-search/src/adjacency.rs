use pathgrid_core::Grid;

/// Neighbour lists for every cell, captured once from a grid.
///
/// A search builds its snapshot at run start, so barrier edits made while a
/// run is in flight never change which edges it sees.
#[derive(Debug, Clone)]
pub struct Adjacency {
    lists: Vec<Vec<usize>>,
}

impl Adjacency {
    /// Snapshot the current 4-connected adjacency of `grid`, as flat cell
    /// indices in the grid's neighbour order (down, up, left, right).
    pub fn snapshot(grid: &Grid) -> Self {
        let lists = (0..grid.len())
            .map(|i| {
                grid.neighbors_of(grid.pos_of(i))
                    .into_iter()
                    .filter_map(|p| grid.index(p))
                    .collect()
            })
            .collect();
        Self { lists }
    }

    /// Neighbours of the cell at flat index `idx`.
    #[inline]
    pub fn neighbors(&self, idx: usize) -> &[usize] {
        self.lists.get(idx).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Total number of directed edges.
    pub fn edge_count(&self) -> usize {
        self.lists.iter().map(Vec::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pathgrid_core::Pos;

    #[test]
    fn snapshot_matches_grid_and_ignores_later_edits() {
        let mut grid = Grid::parse("...\n.#.\n...").unwrap();
        let adj = Adjacency::snapshot(&grid);
        let centre_left = grid.index(Pos::new(1, 0)).unwrap();
        // down, up (the barrier at (1,1) is skipped)
        assert_eq!(
            adj.neighbors(centre_left),
            &[
                grid.index(Pos::new(2, 0)).unwrap(),
                grid.index(Pos::new(0, 0)).unwrap()
            ]
        );
        // Eight undirected edges around the ring.
        assert_eq!(adj.edge_count(), 16);

        grid.cell_at_mut(2, 0).unwrap().mark_barrier();
        assert_eq!(adj.neighbors(centre_left).len(), 2);
        assert!(adj.neighbors(999).is_empty());
    }
}
