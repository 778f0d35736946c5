//! Step-wise A* over a [`Grid`] with unit edge costs.

use pathgrid_core::{Context, Grid, GridError, Pos};

use crate::UNREACHABLE;
use crate::adjacency::Adjacency;
use crate::distance::Manhattan;
use crate::error::{Precondition, SearchError};
use crate::frontier::Frontier;
use crate::origins::Origins;
use crate::traits::{Heuristic, Visualizer};

/// Lifecycle of a [`PathSearch`]. Terminal phases end a run; there is no
/// resume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SearchPhase {
    #[default]
    Idle,
    Running,
    Succeeded,
    Exhausted,
    Cancelled,
}

/// A shortest path found by a run.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Route {
    /// Every cell from start to end, both included.
    pub cells: Vec<Pos>,
    /// Number of edges, equal to the end's g-score.
    pub cost: i32,
}

impl Route {
    /// Cells strictly between start and end.
    pub fn intermediates(&self) -> &[Pos] {
        match self.cells.len() {
            0..=2 => &[],
            n => &self.cells[1..n - 1],
        }
    }
}

/// How a run ended. `Exhausted` and `Cancelled` are outcomes, not errors.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Outcome {
    Found(Route),
    /// The frontier emptied without reaching the end.
    Exhausted,
    /// The cancellation token was set between steps.
    Cancelled,
}

impl Outcome {
    /// `true` when a path was found.
    #[inline]
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    #[inline]
    pub fn route(&self) -> Option<&Route> {
        match self {
            Self::Found(r) => Some(r),
            _ => None,
        }
    }
}

/// Counters from the most recent run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchStats {
    /// Cells in the order they were dequeued.
    pub expanded: Vec<Pos>,
    /// Number of frontier insertions, the seed included.
    pub enqueued: usize,
    /// Number of visualizer callbacks.
    pub steps: usize,
}

/// Per-run bookkeeping. Built at run start, dropped at run end.
struct SearchState {
    g: Vec<i32>,
    f: Vec<i32>,
    origins: Origins,
    frontier: Frontier,
    adjacency: Adjacency,
}

impl SearchState {
    fn new(grid: &Grid) -> Self {
        let n = grid.len();
        Self {
            g: vec![UNREACHABLE; n],
            f: vec![UNREACHABLE; n],
            origins: Origins::new(grid.size()),
            frontier: Frontier::new(n),
            adjacency: Adjacency::snapshot(grid),
        }
    }
}

/// The A* engine.
///
/// Each run expands one cell per step: it relaxes the cell's neighbours,
/// marks newly queued ones `Frontier`, calls the [`Visualizer`], then marks
/// the cell `Visited`. Frontier ties on `f` go to the earliest insertion.
/// A relaxation only wins when strictly cheaper, so the first of several
/// equal-cost predecessors is kept.
///
/// ```
/// use pathgrid_core::{Grid, Pos};
/// use pathgrid_search::{NoRedraw, PathSearch};
///
/// let mut grid = Grid::parse("S.#\n..#\n..E").unwrap();
/// let outcome = PathSearch::new()
///     .run(&mut grid, Pos::new(0, 0), Pos::new(2, 2), &mut NoRedraw)
///     .unwrap();
/// assert_eq!(outcome.route().map(|r| r.cost), Some(4));
/// ```
pub struct PathSearch<H = Manhattan> {
    heuristic: H,
    cancel: Context,
    phase: SearchPhase,
    stats: SearchStats,
}

impl PathSearch<Manhattan> {
    /// An engine using the Manhattan heuristic.
    pub fn new() -> Self {
        Self::with_heuristic(Manhattan)
    }
}

impl Default for PathSearch<Manhattan> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: Heuristic> PathSearch<H> {
    /// An engine using a custom heuristic. It must be admissible for the
    /// result to be a shortest path.
    pub fn with_heuristic(heuristic: H) -> Self {
        Self {
            heuristic,
            cancel: Context::new(),
            phase: SearchPhase::Idle,
            stats: SearchStats::default(),
        }
    }

    /// Use `ctx` as the cancellation token, checked after every step.
    pub fn with_cancel(mut self, ctx: Context) -> Self {
        self.cancel = ctx;
        self
    }

    /// The cancellation token; cancel a clone of it to stop a run.
    #[inline]
    pub fn cancel_token(&self) -> &Context {
        &self.cancel
    }

    #[inline]
    pub fn phase(&self) -> SearchPhase {
        self.phase
    }

    /// Counters from the last run.
    #[inline]
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Validate the request and return the flat indices of start and end.
    fn check(&self, grid: &Grid, start: Pos, end: Pos) -> Result<(usize, usize), SearchError> {
        let s = grid.at(start)?;
        let e = grid.at(end)?;
        if start == end {
            return Err(Precondition::SameStartEnd(start).into());
        }
        if s.is_barrier() {
            return Err(Precondition::BarrierAtStart(start).into());
        }
        if e.is_barrier() {
            return Err(Precondition::BarrierAtEnd(end).into());
        }
        match (grid.index(start), grid.index(end)) {
            (Some(si), Some(ei)) => Ok((si, ei)),
            _ => Err(SearchError::OutOfRange(GridError::OutOfRange {
                row: start.row,
                col: start.col,
                size: grid.size(),
            })),
        }
    }

    /// Search for a shortest path from `start` to `end`, animating through
    /// `vis`.
    ///
    /// Invalid requests are rejected before any cell changes and leave the
    /// engine `Idle` with empty stats. Previous run marks are not cleared
    /// here; callers reset them first (see [`Grid::clear_search_marks`]).
    pub fn run<V: Visualizer + ?Sized>(
        &mut self,
        grid: &mut Grid,
        start: Pos,
        end: Pos,
        vis: &mut V,
    ) -> Result<Outcome, SearchError> {
        self.phase = SearchPhase::Idle;
        self.stats = SearchStats::default();
        let (si, ei) = self.check(grid, start, end)?;

        if self.cancel.is_done() {
            self.phase = SearchPhase::Cancelled;
            log::debug!("search {start} -> {end} cancelled before start");
            return Ok(Outcome::Cancelled);
        }

        self.phase = SearchPhase::Running;
        log::debug!(
            "search {start} -> {end} on {0}x{0} grid",
            grid.size()
        );

        let outcome = self.search(grid, (si, start), (ei, end), vis);

        self.phase = match outcome {
            Outcome::Found(_) => SearchPhase::Succeeded,
            Outcome::Exhausted => SearchPhase::Exhausted,
            Outcome::Cancelled => SearchPhase::Cancelled,
        };
        log::debug!(
            "search finished: {:?} after {} expansions",
            self.phase,
            self.stats.expanded.len()
        );
        Ok(outcome)
    }

    fn search<V: Visualizer + ?Sized>(
        &mut self,
        grid: &mut Grid,
        (si, start): (usize, Pos),
        (ei, end): (usize, Pos),
        vis: &mut V,
    ) -> Outcome {
        let mut st = SearchState::new(grid);

        st.g[si] = 0;
        st.f[si] = self.heuristic.estimate(start, end);
        st.frontier.push(si, st.f[si]);
        self.stats.enqueued = 1;

        while let Some(entry) = st.frontier.pop() {
            let ci = entry.idx;
            let current = grid.pos_of(ci);
            self.stats.expanded.push(current);
            log::trace!("expand {current} f={} g={}", entry.f, st.g[ci]);

            if ci == ei {
                let route = self.mark_route(grid, &st, start, end);
                vis.on_step(grid);
                self.stats.steps += 1;
                return Outcome::Found(route);
            }

            let tentative = st.g[ci] + 1;
            for &ni in st.adjacency.neighbors(ci) {
                if tentative >= st.g[ni] {
                    continue;
                }
                let np = grid.pos_of(ni);
                st.origins.link(np, current);
                st.g[ni] = tentative;
                st.f[ni] = tentative + self.heuristic.estimate(np, end);
                if !st.frontier.contains(ni) {
                    st.frontier.push(ni, st.f[ni]);
                    self.stats.enqueued += 1;
                    if ni != si && ni != ei {
                        if let Ok(c) = grid.at_mut(np) {
                            c.mark_frontier();
                        }
                    }
                }
            }

            vis.on_step(grid);
            self.stats.steps += 1;

            if self.cancel.is_done() {
                return Outcome::Cancelled;
            }

            if ci != si {
                if let Ok(c) = grid.at_mut(current) {
                    c.mark_visited();
                }
            }
        }

        Outcome::Exhausted
    }

    /// Reconstruct the path to `end`, mark the cells strictly between the
    /// endpoints as `Path` and restore the endpoint marks.
    fn mark_route(&self, grid: &mut Grid, st: &SearchState, start: Pos, end: Pos) -> Route {
        let mut cells = st.origins.reconstruct(end);
        cells.reverse();
        let route = Route {
            cost: grid.index(end).map_or(UNREACHABLE, |i| st.g[i]),
            cells,
        };
        for &p in route.intermediates() {
            if let Ok(c) = grid.at_mut(p) {
                c.mark_path();
            }
        }
        if let Ok(c) = grid.at_mut(start) {
            c.mark_start();
        }
        if let Ok(c) = grid.at_mut(end) {
            c.mark_end();
        }
        route
    }
}
