//! **pathgrid-core**: grid, cell and editing types for the pathgrid
//! shortest-path visualizer.
//!
//! This crate provides the foundational types shared by the search engine
//! and the front-ends: geometry primitives, the classified [`Cell`], the
//! square [`Grid`] with its 4-connected adjacency, the validated
//! [`GridEditor`], a screen [`Canvas`] with frame diffing, input messages,
//! and the [`Driver`] back-end trait.

pub mod app;
pub mod canvas;
pub mod cell;
pub mod editor;
pub mod error;
pub mod geom;
pub mod grid;
pub mod messages;
pub mod style;

pub use app::{Context, Driver};
pub use canvas::{Canvas, Frame, FrameCell, Glyph, compute_frame};
pub use cell::{Cell, CellState};
pub use editor::GridEditor;
pub use error::{EditError, GridError, LayoutError};
pub use geom::{Point, Pos, Range};
pub use grid::Grid;
pub use messages::*;
pub use style::{AttrMask, Color, Style};
