use pathgrid_core::{GridError, Pos};
use thiserror::Error;

/// Which precondition of [`PathSearch::run`](crate::PathSearch::run) was
/// violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Precondition {
    #[error("start and end are the same cell {0}")]
    SameStartEnd(Pos),
    #[error("start cell {0} is a barrier")]
    BarrierAtStart(Pos),
    #[error("end cell {0} is a barrier")]
    BarrierAtEnd(Pos),
}

/// Errors rejecting a search before any cell is touched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error("invalid search request: {0}")]
    InvalidPrecondition(#[from] Precondition),
    #[error(transparent)]
    OutOfRange(#[from] GridError),
}
