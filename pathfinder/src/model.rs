//! The application model: grid editing from input messages, and search
//! runs with their reported status.

use std::fmt;

use pathgrid_core::{CellState, Context, GridEditor, Key, MouseAction, Msg, Point, Pos};
use pathgrid_search::{Outcome, PathSearch, Visualizer};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config::Config;

/// Side-effects requested by [`PathfinderModel::update`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Run a search on the current grid.
    Search,
    /// Stop the application.
    End,
}

/// Last notable event, shown on the status line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Ready,
    Searching,
    Found { cost: i32, expanded: usize },
    NoPath { expanded: usize },
    Cancelled,
    Rejected(String),
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ready => f.write_str("place a start, an end, then walls"),
            Self::Searching => f.write_str("searching... (esc cancels)"),
            Self::Found { cost, expanded } => {
                write!(f, "path found: {cost} steps, {expanded} cells expanded")
            }
            Self::NoPath { expanded } => write!(f, "no path ({expanded} cells expanded)"),
            Self::Cancelled => f.write_str("search cancelled"),
            Self::Rejected(why) => write!(f, "cannot search: {why}"),
        }
    }
}

/// What a held mouse button does as the pointer moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Drag {
    Paint,
    Erase,
}

/// Editor state plus the bits of UI state around it.
pub struct PathfinderModel {
    editor: GridEditor,
    status: Status,
    drag: Option<Drag>,
    rng: StdRng,
    density: f64,
}

impl PathfinderModel {
    pub fn new(config: &Config) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            editor: GridEditor::new(config.size, config.span),
            status: Status::Ready,
            drag: None,
            rng,
            density: config.density,
        }
    }

    #[inline]
    pub fn editor(&self) -> &GridEditor {
        &self.editor
    }

    #[inline]
    pub fn status(&self) -> &Status {
        &self.status
    }

    /// Process one input message.
    pub fn update(&mut self, msg: Msg) -> Option<Effect> {
        match msg {
            Msg::Quit => return Some(Effect::End),
            Msg::KeyDown { key } => return self.on_key(key),
            Msg::Mouse { action, pos } => self.on_mouse(action, pos),
            Msg::Init | Msg::Screen { .. } => {}
        }
        None
    }

    fn on_key(&mut self, key: Key) -> Option<Effect> {
        match key {
            Key::Char('q') => Some(Effect::End),
            Key::Space | Key::Enter => {
                if self.editor.start().is_none() {
                    self.status = Status::Rejected("no start placed".into());
                    None
                } else if self.editor.end().is_none() {
                    self.status = Status::Rejected("no end placed".into());
                    None
                } else {
                    Some(Effect::Search)
                }
            }
            Key::Char('c') => {
                self.editor.clear_all();
                self.status = Status::Ready;
                None
            }
            Key::Char('r') => {
                let n = self.editor.scatter_barriers(&mut self.rng, self.density);
                log::info!("added {n} random barriers");
                None
            }
            _ => None,
        }
    }

    fn on_mouse(&mut self, action: MouseAction, p: Point) {
        match action {
            MouseAction::Main => {
                self.drag = Some(Drag::Paint);
                self.edit_at(p, Drag::Paint);
            }
            MouseAction::Secondary => {
                self.drag = Some(Drag::Erase);
                self.edit_at(p, Drag::Erase);
            }
            MouseAction::Move => {
                if let Some(d) = self.drag {
                    self.edit_at(p, d);
                }
            }
            MouseAction::Release => self.drag = None,
            MouseAction::Auxiliary => {}
        }
    }

    /// Apply a paint or erase at screen point `p`. Points off the grid are
    /// ignored.
    fn edit_at(&mut self, p: Point, mode: Drag) {
        let pos = match self.editor.grid().screen_to_pos(p) {
            Ok(pos) => pos,
            Err(e) => {
                log::trace!("ignoring click: {e}");
                return;
            }
        };
        let result = match mode {
            Drag::Paint => self.editor.place(pos).map(|_| ()),
            Drag::Erase => self.editor.clear(pos),
        };
        if let Err(e) = result {
            log::debug!("edit at {pos} rejected: {e}");
        }
    }

    /// Direct access for scripted setups and tests.
    pub fn place(&mut self, pos: Pos) -> Option<CellState> {
        self.editor.place(pos).ok()
    }

    /// Clear marks from the previous run and search from start to end,
    /// animating through `vis`. `ctx` cancels the run.
    pub fn run_search<V: Visualizer + ?Sized>(
        &mut self,
        ctx: Context,
        vis: &mut V,
    ) -> Option<Outcome> {
        let (grid, start, end) = match self.editor.prepare_run() {
            Ok(req) => req,
            Err(e) => {
                self.status = Status::Rejected(e.to_string());
                return None;
            }
        };

        self.status = Status::Searching;
        let mut search = PathSearch::new().with_cancel(ctx);
        match search.run(grid, start, end, vis) {
            Ok(outcome) => {
                let expanded = search.stats().expanded.len();
                self.status = match &outcome {
                    Outcome::Found(route) => Status::Found {
                        cost: route.cost,
                        expanded,
                    },
                    Outcome::Exhausted => Status::NoPath { expanded },
                    Outcome::Cancelled => Status::Cancelled,
                };
                log::info!("{}", self.status);
                Some(outcome)
            }
            Err(e) => {
                log::warn!("search rejected: {e}");
                self.status = Status::Rejected(e.to_string());
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pathgrid_core::Grid;
    use pathgrid_search::NoRedraw;

    fn model(size: i32) -> PathfinderModel {
        PathfinderModel::new(&Config {
            size,
            span: Point::new(2, 1),
            seed: Some(9),
            ..Config::default()
        })
    }

    fn click(m: &mut PathfinderModel, action: MouseAction, x: i32, y: i32) {
        m.update(Msg::mouse(action, Point::new(x, y)));
    }

    #[test]
    fn clicks_place_start_end_then_walls() {
        let mut m = model(4);
        click(&mut m, MouseAction::Main, 0, 0);
        click(&mut m, MouseAction::Release, 0, 0);
        click(&mut m, MouseAction::Main, 7, 3); // span 2: column 3
        click(&mut m, MouseAction::Release, 7, 3);
        click(&mut m, MouseAction::Main, 2, 1);
        click(&mut m, MouseAction::Release, 2, 1);
        let g = m.editor().grid();
        assert_eq!(g.state(Pos::new(0, 0)), Some(CellState::Start));
        assert_eq!(g.state(Pos::new(3, 3)), Some(CellState::End));
        assert_eq!(g.state(Pos::new(1, 1)), Some(CellState::Barrier));
    }

    #[test]
    fn drag_paints_and_right_drag_erases() {
        let mut m = model(4);
        m.place(Pos::new(0, 0));
        m.place(Pos::new(3, 3));
        click(&mut m, MouseAction::Main, 0, 2);
        click(&mut m, MouseAction::Move, 2, 2);
        click(&mut m, MouseAction::Move, 4, 2);
        click(&mut m, MouseAction::Release, 4, 2);
        click(&mut m, MouseAction::Move, 6, 2); // no button held
        assert_eq!(m.editor().grid().count(CellState::Barrier), 3);

        click(&mut m, MouseAction::Secondary, 2, 2);
        click(&mut m, MouseAction::Move, 0, 0); // erases the start too
        click(&mut m, MouseAction::Release, 0, 0);
        assert_eq!(m.editor().grid().count(CellState::Barrier), 2);
        assert_eq!(m.editor().start(), None);
    }

    #[test]
    fn off_grid_clicks_are_ignored() {
        let mut m = model(3);
        click(&mut m, MouseAction::Main, 6, 0);
        click(&mut m, MouseAction::Main, 0, 3); // status line
        assert_eq!(m.editor().start(), None);
    }

    #[test]
    fn search_needs_both_endpoints() {
        let mut m = model(3);
        assert_eq!(m.update(Msg::key(Key::Space)), None);
        assert_eq!(m.status(), &Status::Rejected("no start placed".into()));
        m.place(Pos::new(0, 0));
        assert_eq!(m.update(Msg::key(Key::Space)), None);
        m.place(Pos::new(2, 2));
        assert_eq!(m.update(Msg::key(Key::Space)), Some(Effect::Search));
        assert_eq!(m.update(Msg::key(Key::Char('q'))), Some(Effect::End));
        assert_eq!(m.update(Msg::Quit), Some(Effect::End));
    }

    #[test]
    fn run_search_reports_status_and_clears_old_marks() {
        let mut m = model(5);
        m.place(Pos::new(0, 0));
        m.place(Pos::new(4, 4));
        let out = m.run_search(Context::new(), &mut NoRedraw).unwrap();
        assert_eq!(out.route().unwrap().cost, 8);
        assert!(matches!(m.status(), Status::Found { cost: 8, .. }));
        let first = m.editor().grid().to_string();

        let again = m.run_search(Context::new(), &mut NoRedraw).unwrap();
        assert_eq!(again, out);
        assert_eq!(m.editor().grid().to_string(), first);
    }

    #[test]
    fn walled_in_end_reports_no_path() {
        let mut m = model(3);
        m.place(Pos::new(0, 0));
        m.place(Pos::new(2, 2));
        m.place(Pos::new(1, 2));
        m.place(Pos::new(2, 1));
        let out = m.run_search(Context::new(), &mut NoRedraw).unwrap();
        assert_eq!(out, Outcome::Exhausted);
        assert!(matches!(m.status(), Status::NoPath { .. }));
    }

    #[test]
    fn cancelled_run_reports_cancelled() {
        let mut m = model(6);
        m.place(Pos::new(0, 0));
        m.place(Pos::new(5, 5));
        let ctx = Context::new();
        let stop = ctx.clone();
        let out = m
            .run_search(ctx, &mut |_: &Grid| stop.cancel())
            .unwrap();
        assert_eq!(out, Outcome::Cancelled);
        assert_eq!(m.status(), &Status::Cancelled);
    }

    #[test]
    fn clear_and_scatter_keys() {
        let mut m = model(6);
        m.place(Pos::new(0, 0));
        m.update(Msg::key(Key::Char('r')));
        assert!(m.editor().grid().count(CellState::Barrier) > 0);
        assert_eq!(m.editor().start(), Some(Pos::new(0, 0)));
        m.update(Msg::key(Key::Char('c')));
        assert_eq!(m.editor().grid().count(CellState::Empty), 36);
        assert_eq!(m.status(), &Status::Ready);
    }
}
