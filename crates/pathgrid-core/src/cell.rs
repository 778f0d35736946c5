//! The [`Cell`] type: a grid position with a classification state.

use std::hash::{Hash, Hasher};

use crate::geom::{Point, Pos};

/// Classification of a grid cell.
///
/// `Start`, `End`, `Barrier` and `Empty` are set by the editor; `Frontier`,
/// `Visited` and `Path` are written by a search run.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellState {
    #[default]
    Empty,
    Barrier,
    Start,
    End,
    /// Queued in the search frontier (open).
    Frontier,
    /// Expanded by the search (closed).
    Visited,
    /// Part of the reconstructed shortest path.
    Path,
}

impl CellState {
    /// Whether this state was produced by a search run rather than by the
    /// editor.
    #[inline]
    pub const fn is_search_mark(self) -> bool {
        matches!(self, Self::Frontier | Self::Visited | Self::Path)
    }
}

/// A single grid cell.
///
/// Equality and hashing use the position only; two cells are never ordered
/// relative to each other.
#[derive(Copy, Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pos: Pos,
    origin: Point,
    state: CellState,
}

impl Cell {
    /// Create an empty cell at `pos`, whose top-left screen corner is derived
    /// from `span` (screen units per cell on each axis).
    pub fn new(pos: Pos, span: Point) -> Self {
        Self {
            pos,
            origin: Point::new(pos.col * span.x, pos.row * span.y),
            state: CellState::Empty,
        }
    }

    #[inline]
    pub fn pos(&self) -> Pos {
        self.pos
    }

    #[inline]
    pub fn row(&self) -> i32 {
        self.pos.row
    }

    #[inline]
    pub fn col(&self) -> i32 {
        self.pos.col
    }

    /// Top-left screen corner, for rendering only.
    #[inline]
    pub fn origin(&self) -> Point {
        self.origin
    }

    #[inline]
    pub fn state(&self) -> CellState {
        self.state
    }

    // --- queries ---

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.state == CellState::Empty
    }

    #[inline]
    pub fn is_barrier(&self) -> bool {
        self.state == CellState::Barrier
    }

    #[inline]
    pub fn is_start(&self) -> bool {
        self.state == CellState::Start
    }

    #[inline]
    pub fn is_end(&self) -> bool {
        self.state == CellState::End
    }

    #[inline]
    pub fn is_frontier(&self) -> bool {
        self.state == CellState::Frontier
    }

    #[inline]
    pub fn is_visited(&self) -> bool {
        self.state == CellState::Visited
    }

    #[inline]
    pub fn is_path(&self) -> bool {
        self.state == CellState::Path
    }

    /// Whether a search may step onto this cell.
    #[inline]
    pub fn is_traversable(&self) -> bool {
        !self.is_barrier()
    }

    // --- mutators ---

    #[inline]
    pub fn mark_start(&mut self) {
        self.state = CellState::Start;
    }

    #[inline]
    pub fn mark_end(&mut self) {
        self.state = CellState::End;
    }

    #[inline]
    pub fn mark_barrier(&mut self) {
        self.state = CellState::Barrier;
    }

    #[inline]
    pub fn mark_frontier(&mut self) {
        self.state = CellState::Frontier;
    }

    #[inline]
    pub fn mark_visited(&mut self) {
        self.state = CellState::Visited;
    }

    #[inline]
    pub fn mark_path(&mut self) {
        self.state = CellState::Path;
    }

    /// Return the cell to `Empty`.
    #[inline]
    pub fn reset(&mut self) {
        self.state = CellState::Empty;
    }
}

impl PartialEq for Cell {
    fn eq(&self, other: &Self) -> bool {
        self.pos == other.pos
    }
}

impl Eq for Cell {}

impl Hash for Cell {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.pos.hash(state);
    }
}
