use pathgrid_core::Pos;

/// Predecessor links recorded by a search, one slot per grid cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Origins {
    size: i32,
    links: Vec<Option<Pos>>,
}

impl Origins {
    /// Empty links for a `size × size` grid.
    pub fn new(size: i32) -> Self {
        let size = size.max(0);
        Self {
            size,
            links: vec![None; (size as usize) * (size as usize)],
        }
    }

    #[inline]
    fn slot(&self, pos: Pos) -> Option<usize> {
        if pos.row < 0 || pos.col < 0 || pos.row >= self.size || pos.col >= self.size {
            return None;
        }
        Some((pos.row as usize) * (self.size as usize) + (pos.col as usize))
    }

    /// Record that `to` was reached from `from`, replacing any earlier link.
    pub fn link(&mut self, to: Pos, from: Pos) {
        if let Some(i) = self.slot(to) {
            self.links[i] = Some(from);
        }
    }

    /// The recorded predecessor of `pos`.
    #[inline]
    pub fn predecessor(&self, pos: Pos) -> Option<Pos> {
        self.slot(pos).and_then(|i| self.links[i])
    }

    /// Follow links backward from `end` until a cell without a predecessor
    /// (the start). The result runs end to start and includes both.
    pub fn reconstruct(&self, end: Pos) -> Vec<Pos> {
        let mut path = vec![end];
        let mut cur = end;
        // A chain can never be longer than the grid.
        while let Some(prev) = self.predecessor(cur) {
            if path.len() > self.links.len() {
                break;
            }
            path.push(prev);
            cur = prev;
        }
        path
    }
}
