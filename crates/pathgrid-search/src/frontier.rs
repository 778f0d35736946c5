use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Frontier entry. Ordered by `(f, seq)` only; the cell index never takes
/// part in comparisons.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Entry {
    pub(crate) f: i32,
    pub(crate) seq: u64,
    pub(crate) idx: usize,
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Entry {}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse so BinaryHeap (max-heap) pops smallest (f, seq) first.
        (other.f, other.seq).cmp(&(self.f, self.seq))
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Priority queue of open cells with O(1) membership.
pub(crate) struct Frontier {
    heap: BinaryHeap<Entry>,
    members: Vec<bool>,
    next_seq: u64,
}

impl Frontier {
    pub(crate) fn new(cells: usize) -> Self {
        Self {
            heap: BinaryHeap::new(),
            members: vec![false; cells],
            next_seq: 0,
        }
    }

    /// Queue `idx` with priority `f`, stamping a fresh insertion sequence.
    pub(crate) fn push(&mut self, idx: usize, f: i32) {
        self.heap.push(Entry {
            f,
            seq: self.next_seq,
            idx,
        });
        self.next_seq += 1;
        self.members[idx] = true;
    }

    /// Remove the lowest `(f, seq)` entry.
    pub(crate) fn pop(&mut self) -> Option<Entry> {
        let e = self.heap.pop()?;
        self.members[e.idx] = false;
        Some(e)
    }

    #[inline]
    pub(crate) fn contains(&self, idx: usize) -> bool {
        self.members.get(idx).copied().unwrap_or(false)
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.heap.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pops_lowest_f_then_fifo() {
        let mut fr = Frontier::new(8);
        fr.push(5, 4);
        fr.push(1, 2);
        fr.push(7, 4);
        fr.push(3, 2);
        assert_eq!(fr.len(), 4);
        let order: Vec<usize> = std::iter::from_fn(|| fr.pop().map(|e| e.idx)).collect();
        assert_eq!(order, vec![1, 3, 5, 7]);
    }

    #[test]
    fn membership_tracks_push_and_pop() {
        let mut fr = Frontier::new(4);
        assert!(!fr.contains(2));
        fr.push(2, 0);
        assert!(fr.contains(2));
        let e = fr.pop().unwrap();
        assert_eq!((e.idx, e.seq), (2, 0));
        assert!(!fr.contains(2));
        assert!(!fr.contains(99));
        assert!(fr.pop().is_none());
    }
}
