use pathgrid_core::{Grid, Pos};

/// Estimate of the remaining cost between two positions.
pub trait Heuristic {
    /// Must never overestimate the true cost (admissible).
    fn estimate(&self, from: Pos, to: Pos) -> i32;
}

impl<F: Fn(Pos, Pos) -> i32> Heuristic for F {
    #[inline]
    fn estimate(&self, from: Pos, to: Pos) -> i32 {
        self(from, to)
    }
}

/// Receives a redraw signal after every search step.
///
/// The grid is fully updated and consistent at each call.
pub trait Visualizer {
    fn on_step(&mut self, grid: &Grid);
}

impl<F: FnMut(&Grid)> Visualizer for F {
    #[inline]
    fn on_step(&mut self, grid: &Grid) {
        self(grid)
    }
}

/// A visualizer that ignores every step.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoRedraw;

impl Visualizer for NoRedraw {
    #[inline]
    fn on_step(&mut self, _grid: &Grid) {}
}
