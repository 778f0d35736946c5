//! The application loop: poll the driver, update the model, redraw.

use std::error::Error;
use std::sync::mpsc::{self, Receiver, Sender};
use std::time::Duration;

use pathgrid_core::{Canvas, Context, Driver, Glyph, Msg, Style, compute_frame};

use crate::config::Config;
use crate::model::{Effect, PathfinderModel};
use crate::view;
use crate::visualizer::TerminalVisualizer;

/// Ties a [`PathfinderModel`] to a [`Driver`].
pub struct App<D: Driver> {
    model: PathfinderModel,
    driver: D,
    /// What is currently on screen.
    screen: Canvas,
    delay: Duration,
}

impl<D: Driver> App<D> {
    pub fn new(config: &Config, driver: D) -> Self {
        let size = config.screen_size();
        Self {
            model: PathfinderModel::new(config),
            driver,
            screen: Canvas::new(size.x, size.y),
            delay: config.step_delay,
        }
    }

    #[inline]
    pub fn model(&self) -> &PathfinderModel {
        &self.model
    }

    #[inline]
    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Run until the user quits.
    ///
    /// 1. Initialises the driver.
    /// 2. Processes `Msg::Init`, which draws the empty grid.
    /// 3. Loops: poll, update, draw, diff, flush. A search effect runs to
    ///    completion inside the loop, animating every step.
    /// 4. Restores the terminal, even on error.
    pub fn run(&mut self) -> Result<(), Box<dyn Error>> {
        self.driver.init()?;

        let ctx = Context::new();
        let (tx, rx): (Sender<Msg>, Receiver<Msg>) = mpsc::channel();
        tx.send(Msg::Init).ok();

        let result = self.event_loop(&ctx, &tx, &rx);
        self.driver.close();
        result
    }

    fn event_loop(
        &mut self,
        ctx: &Context,
        tx: &Sender<Msg>,
        rx: &Receiver<Msg>,
    ) -> Result<(), Box<dyn Error>> {
        self.process_pending(rx, ctx)?;
        while !ctx.is_done() {
            self.driver.poll_msgs(ctx, tx)?;
            if ctx.is_done() {
                break;
            }
            self.process_pending(rx, ctx)?;
        }
        Ok(())
    }

    /// Drain queued messages through the model, then redraw once.
    fn process_pending(&mut self, rx: &Receiver<Msg>, ctx: &Context) -> Result<(), Box<dyn Error>> {
        let mut needs_draw = false;

        while let Ok(msg) = rx.try_recv() {
            if let Msg::Screen { width, height } = msg {
                log::debug!("screen resized to {width}x{height}");
                self.invalidate();
            }
            needs_draw = true;
            match self.model.update(msg) {
                Some(Effect::End) => {
                    ctx.cancel();
                    return Ok(());
                }
                Some(Effect::Search) => {
                    self.draw()?;
                    self.search(ctx)?;
                    if ctx.is_done() {
                        return Ok(());
                    }
                }
                None => {}
            }
        }

        if needs_draw {
            self.draw()?;
        }
        Ok(())
    }

    fn search(&mut self, ctx: &Context) -> Result<(), Box<dyn Error>> {
        let run_ctx = Context::new();
        let mut vis =
            TerminalVisualizer::new(&mut self.driver, &mut self.screen, run_ctx.clone(), self.delay);
        self.model.run_search(run_ctx, &mut vis);
        let (quit, err) = vis.finish();
        if let Some(e) = err {
            return Err(e);
        }
        if quit {
            ctx.cancel();
        }
        Ok(())
    }

    fn draw(&mut self) -> Result<(), Box<dyn Error>> {
        let mut next = self.screen.clone();
        view::draw(&self.model, &mut next);
        let frame = compute_frame(&self.screen, &next);
        if !frame.is_empty() {
            self.driver.flush(frame)?;
        }
        self.screen = next;
        Ok(())
    }

    /// Forget what is on screen so the next draw repaints everything.
    fn invalidate(&mut self) {
        self.screen.fill(Glyph::new('\0', Style::default()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Status;
    use crate::visualizer::tests::ScriptedDriver;
    use pathgrid_core::{CellState, Key, MouseAction, Point, Pos};

    fn config() -> Config {
        Config {
            size: 5,
            span: Point::new(2, 1),
            step_delay: Duration::ZERO,
            seed: Some(1),
            ..Config::default()
        }
    }

    fn press(x: i32, y: i32) -> Vec<Msg> {
        vec![
            Msg::mouse(MouseAction::Main, Point::new(x, y)),
            Msg::mouse(MouseAction::Release, Point::new(x, y)),
        ]
    }

    #[test]
    fn init_draws_the_whole_screen() {
        let mut app = App::new(&config(), ScriptedDriver::default());
        app.run().unwrap();
        let first = &app.driver().frames[0];
        // Every grid unit differs from a blank terminal.
        assert!(first.cells.len() >= 5 * 2 * 5);
        assert!(first.cells.iter().any(|c| c.glyph.ch == '·'));
        assert!(app.driver().closed);
    }

    #[test]
    fn scripted_session_finds_a_path() {
        // Each search step polls once; idle batches keep the run going
        // until the path is drawn, then the script ends with a quit.
        let script = [press(0, 0), press(8, 4), press(2, 2), vec![Msg::key(Key::Space)]];
        let driver = ScriptedDriver::with_batches(
            script.into_iter().chain(std::iter::repeat_n(vec![], 100)),
        );
        let mut app = App::new(&config(), driver);
        app.run().unwrap();
        assert!(app.driver().batches.is_empty());

        let grid = app.model().editor().grid();
        assert_eq!(grid.state(Pos::new(0, 0)), Some(CellState::Start));
        assert_eq!(grid.state(Pos::new(4, 4)), Some(CellState::End));
        assert_eq!(grid.state(Pos::new(2, 1)), Some(CellState::Barrier));
        assert_eq!(grid.count(CellState::Path), 7);
        assert!(matches!(app.model().status(), Status::Found { cost: 8, .. }));
    }

    #[test]
    fn quitting_mid_search_stops_the_app() {
        let driver = ScriptedDriver::with_batches([
            press(0, 0),
            press(8, 4),
            vec![Msg::key(Key::Space)],
            vec![Msg::key(Key::Char('q'))],
            // Never reached.
            vec![Msg::key(Key::Char('c'))],
        ]);
        let mut app = App::new(&config(), driver);
        app.run().unwrap();
        assert_eq!(app.model().status(), &Status::Cancelled);
        assert_eq!(app.model().editor().start(), Some(Pos::new(0, 0)));
        assert_eq!(app.driver().batches.len(), 1);
    }

    #[test]
    fn flush_errors_propagate_after_closing() {
        let driver = ScriptedDriver {
            fail_flush: true,
            ..ScriptedDriver::default()
        };
        let mut app = App::new(&config(), driver);
        assert!(app.run().is_err());
        assert!(app.driver().closed);
    }
}
