//! Rendering of the grid and the status lines onto a [`Canvas`].

use pathgrid_core::{AttrMask, Canvas, CellState, Color, Glyph, Grid, Point, Range, Style};

use crate::model::{PathfinderModel, Status};

/// Screen rows below the grid: one for status, one for key help.
pub const STATUS_LINES: i32 = 2;

const HELP: &str = "lmb: start/end/wall  rmb: erase  space: run  c: clear  r: random  q: quit";

const WHITE: Color = Color::Rgb(255, 255, 255);
const BLACK: Color = Color::Rgb(0, 0, 0);
const ORANGE: Color = Color::Rgb(255, 165, 0);
const TURQUOISE: Color = Color::Rgb(64, 224, 208);
const GREEN: Color = Color::Rgb(0, 200, 0);
const RED: Color = Color::Rgb(220, 0, 0);
const PURPLE: Color = Color::Rgb(128, 0, 128);
const GREY: Color = Color::Rgb(128, 128, 128);

/// Background colour used for cells in `state`.
pub fn state_color(state: CellState) -> Color {
    match state {
        CellState::Empty => WHITE,
        CellState::Barrier => BLACK,
        CellState::Start => ORANGE,
        CellState::End => TURQUOISE,
        CellState::Frontier => GREEN,
        CellState::Visited => RED,
        CellState::Path => PURPLE,
    }
}

/// Glyph filling every screen unit of a cell in `state`. Empty cells show a
/// faint dot so the grid lines stay visible.
pub fn state_glyph(state: CellState) -> Glyph {
    let style = Style::default().with_bg(state_color(state));
    match state {
        CellState::Empty => Glyph::new('·', style.with_fg(GREY)),
        _ => Glyph::new(' ', style),
    }
}

/// Paint every cell of `grid` at its screen origin.
pub fn draw_grid(grid: &Grid, canvas: &mut Canvas) {
    let span = grid.span();
    for cell in grid {
        let o = cell.origin();
        canvas.fill_range(
            Range::new(o.x, o.y, o.x + span.x, o.y + span.y),
            state_glyph(cell.state()),
        );
    }
}

/// Write the status and help lines just below the grid.
pub fn draw_status(grid: &Grid, status: &Status, canvas: &mut Canvas) {
    let y = grid.size() * grid.span().y;
    let blank = Glyph::default();
    canvas.fill_range(Range::new(0, y, canvas.width(), y + STATUS_LINES), blank);

    let emphasis = match status {
        Status::Rejected(_) | Status::NoPath { .. } => AttrMask::BOLD,
        _ => AttrMask::NONE,
    };
    canvas.print(
        Point::new(0, y),
        &status.to_string(),
        Style::default().with_attrs(emphasis),
    );
    canvas.print(
        Point::new(0, y + 1),
        HELP,
        Style::default().with_attrs(AttrMask::DIM),
    );
}

/// Full redraw of the model.
pub fn draw(model: &PathfinderModel, canvas: &mut Canvas) {
    let grid = model.editor().grid();
    draw_grid(grid, canvas);
    draw_status(grid, model.status(), canvas);
}
