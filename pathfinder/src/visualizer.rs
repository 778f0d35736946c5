//! Animates a running search on a [`Driver`] and listens for cancellation
//! between steps.

use std::error::Error;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;

use pathgrid_core::{Canvas, Context, Driver, Grid, Key, Msg, compute_frame};
use pathgrid_search::Visualizer;

use crate::model::Status;
use crate::view;

/// Redraws the grid after every search step, waits `delay`, then drains
/// pending input. `Esc` cancels the run; `q` cancels it and asks the
/// application to quit.
pub struct TerminalVisualizer<'a, D: Driver> {
    driver: &'a mut D,
    screen: &'a mut Canvas,
    scratch: Canvas,
    ctx: Context,
    poll_ctx: Context,
    delay: Duration,
    tx: Sender<Msg>,
    rx: Receiver<Msg>,
    quit: bool,
    error: Option<Box<dyn Error>>,
}

impl<'a, D: Driver> TerminalVisualizer<'a, D> {
    /// `screen` holds what is currently displayed and is kept in sync.
    /// `ctx` is the token the search checks after each step.
    pub fn new(driver: &'a mut D, screen: &'a mut Canvas, ctx: Context, delay: Duration) -> Self {
        let (tx, rx) = mpsc::channel();
        let scratch = screen.clone();
        Self {
            driver,
            screen,
            scratch,
            ctx,
            poll_ctx: Context::new(),
            delay,
            tx,
            rx,
            quit: false,
            error: None,
        }
    }

    /// Whether the user asked to quit, and the first driver error seen.
    pub fn finish(self) -> (bool, Option<Box<dyn Error>>) {
        (self.quit, self.error)
    }

    fn redraw(&mut self, grid: &Grid) -> Result<(), Box<dyn Error>> {
        view::draw_grid(grid, &mut self.scratch);
        view::draw_status(grid, &Status::Searching, &mut self.scratch);
        let frame = compute_frame(self.screen, &self.scratch);
        if !frame.is_empty() {
            self.driver.flush(frame)?;
        }
        self.screen.copy_from(&self.scratch);
        Ok(())
    }

    fn poll(&mut self) -> Result<(), Box<dyn Error>> {
        self.driver.poll_msgs(&self.poll_ctx, &self.tx)?;
        while let Ok(msg) = self.rx.try_recv() {
            match msg {
                Msg::KeyDown { key: Key::Escape } => {
                    log::debug!("search cancelled by user");
                    self.ctx.cancel();
                }
                Msg::KeyDown {
                    key: Key::Char('q'),
                }
                | Msg::Quit => {
                    self.quit = true;
                    self.ctx.cancel();
                }
                // Edits are ignored while a run is in progress.
                _ => {}
            }
        }
        Ok(())
    }
}

impl<D: Driver> Visualizer for TerminalVisualizer<'_, D> {
    fn on_step(&mut self, grid: &Grid) {
        if self.error.is_some() {
            return;
        }
        let result = self.redraw(grid).and_then(|()| {
            if !self.delay.is_zero() {
                thread::sleep(self.delay);
            }
            self.poll()
        });
        if let Err(e) = result {
            log::error!("driver failed during search: {e}");
            self.error = Some(e);
            self.ctx.cancel();
        }
    }
}
