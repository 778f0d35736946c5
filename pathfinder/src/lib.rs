//! Interactive terminal A* path finder.
//!
//! Draw a start, an end and walls with the mouse, then press space to watch
//! the search expand cell by cell until it reaches the end.

pub mod app;
pub mod config;
pub mod model;
pub mod view;
pub mod visualizer;

pub use app::App;
pub use config::{Args, Config, ConfigError};
pub use model::{Effect, PathfinderModel, Status};
pub use visualizer::TerminalVisualizer;
