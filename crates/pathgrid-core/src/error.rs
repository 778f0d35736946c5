//! Error types for grid access, layout parsing and editing.

use thiserror::Error;

use crate::cell::CellState;
use crate::geom::Pos;

/// Errors from indexing a [`Grid`](crate::Grid).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    /// The position lies outside `[0, size)` on some axis.
    #[error("position ({row}, {col}) is outside the {size}x{size} grid")]
    OutOfRange { row: i32, col: i32, size: i32 },
    /// A screen point does not map onto any cell.
    #[error("screen point ({x}, {y}) is outside the grid")]
    OffScreen { x: i32, y: i32 },
}

/// Errors from parsing a textual grid layout.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    /// The layout has no rows.
    #[error("layout is empty")]
    Empty,
    /// A row's width differs from the number of rows.
    #[error("layout is not square: line {line} has {width} cells, expected {expected}")]
    NotSquare {
        line: usize,
        width: usize,
        expected: usize,
    },
    /// A character outside `.#SE` was found.
    #[error("layout contains invalid character \u{201c}{ch}\u{201d} at {pos}")]
    InvalidChar { ch: char, pos: Pos },
    /// More than one start or end marker.
    #[error("layout has more than one {state:?} cell (second at {pos})")]
    Duplicate { state: CellState, pos: Pos },
    /// A stored grid whose cell list does not match its size.
    #[error("grid has {found} cells, expected {expected}")]
    CellCount { expected: usize, found: usize },
    /// A stored cell is not at its row-major slot.
    #[error("cell {index} holds position {pos}")]
    Misplaced { index: usize, pos: Pos },
}

/// Errors from [`GridEditor`](crate::GridEditor) operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    #[error(transparent)]
    Grid(#[from] GridError),
    /// A different cell already holds the start.
    #[error("start is already placed at {0}")]
    StartAlreadySet(Pos),
    /// A different cell already holds the end.
    #[error("end is already placed at {0}")]
    EndAlreadySet(Pos),
    /// The target cell holds a start or end that the edit would overwrite.
    #[error("cell {pos} is occupied by {state:?}")]
    Occupied { pos: Pos, state: CellState },
    #[error("no start cell has been placed")]
    MissingStart,
    #[error("no end cell has been placed")]
    MissingEnd,
}
