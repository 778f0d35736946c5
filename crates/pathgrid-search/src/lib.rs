//! Step-wise A* search over [`pathgrid_core::Grid`]s.
//!
//! The engine expands one node per step, writes its progress into the grid
//! as `Frontier` / `Visited` / `Path` cell states, and calls a
//! [`Visualizer`] after every step so a front-end can animate the run.
//!
//! - **A\*** with a swappable [`Heuristic`] ([`PathSearch::run`])
//! - **Path reconstruction** from predecessor links ([`Origins::reconstruct`])
//! - **BFS** reference distances for cross-checking ([`bfs_distance`])
//!
//! Ties between frontier entries of equal priority are broken by insertion
//! order, so runs on identical grids are fully reproducible.

mod adjacency;
mod astar;
mod bfs;
mod distance;
mod error;
mod frontier;
mod origins;
mod traits;

pub use adjacency::Adjacency;
pub use astar::{Outcome, PathSearch, Route, SearchPhase, SearchStats};
pub use bfs::bfs_distance;
pub use distance::{Manhattan, manhattan};
pub use error::{Precondition, SearchError};
pub use origins::Origins;
pub use traits::{Heuristic, NoRedraw, Visualizer};

/// Sentinel cost meaning "not reached yet".
pub const UNREACHABLE: i32 = i32::MAX;
