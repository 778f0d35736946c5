//! [`GridEditor`]: validated mutation of start, end and barrier cells.
//!
//! The editor owns the [`Grid`] between search runs and tracks where the
//! start and end live, so that at most one of each exists at any time.

use rand::Rng;

use crate::cell::CellState;
use crate::error::EditError;
use crate::geom::{Point, Pos};
use crate::grid::Grid;

/// Editing front for a [`Grid`].
#[derive(Debug, Clone)]
pub struct GridEditor {
    grid: Grid,
    start: Option<Pos>,
    end: Option<Pos>,
}

impl GridEditor {
    /// Create an editor over a fresh `size × size` grid.
    pub fn new(size: i32, span: Point) -> Self {
        Self::from_grid(Grid::new(size, span))
    }

    /// Wrap an existing grid, picking up any start and end it contains.
    pub fn from_grid(grid: Grid) -> Self {
        let start = grid.find(CellState::Start);
        let end = grid.find(CellState::End);
        Self { grid, start, end }
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[inline]
    pub fn start(&self) -> Option<Pos> {
        self.start
    }

    #[inline]
    pub fn end(&self) -> Option<Pos> {
        self.end
    }

    /// Place the start at `pos`. Fails if another cell already holds the
    /// start or if `pos` holds the end.
    pub fn set_start(&mut self, pos: Pos) -> Result<(), EditError> {
        let state = self.grid.at(pos)?.state();
        match self.start {
            Some(s) if s == pos => return Ok(()),
            Some(s) => return Err(EditError::StartAlreadySet(s)),
            None => {}
        }
        if state == CellState::End {
            return Err(EditError::Occupied { pos, state });
        }
        self.grid.at_mut(pos)?.mark_start();
        self.start = Some(pos);
        log::debug!("start placed at {pos}");
        Ok(())
    }

    /// Place the end at `pos`. Fails if another cell already holds the end
    /// or if `pos` holds the start.
    pub fn set_end(&mut self, pos: Pos) -> Result<(), EditError> {
        let state = self.grid.at(pos)?.state();
        match self.end {
            Some(e) if e == pos => return Ok(()),
            Some(e) => return Err(EditError::EndAlreadySet(e)),
            None => {}
        }
        if state == CellState::Start {
            return Err(EditError::Occupied { pos, state });
        }
        self.grid.at_mut(pos)?.mark_end();
        self.end = Some(pos);
        log::debug!("end placed at {pos}");
        Ok(())
    }

    /// Turn `pos` into a barrier. The start and end cannot be walled over.
    pub fn set_barrier(&mut self, pos: Pos) -> Result<(), EditError> {
        let cell = self.grid.at_mut(pos)?;
        let state = cell.state();
        if matches!(state, CellState::Start | CellState::End) {
            return Err(EditError::Occupied { pos, state });
        }
        cell.mark_barrier();
        Ok(())
    }

    /// Return `pos` to `Empty`, forgetting it as start or end.
    pub fn clear(&mut self, pos: Pos) -> Result<(), EditError> {
        self.grid.at_mut(pos)?.reset();
        if self.start == Some(pos) {
            self.start = None;
        }
        if self.end == Some(pos) {
            self.end = None;
        }
        Ok(())
    }

    /// Primary-click semantics: the first click places the start, the
    /// second the end, and every later click a barrier. Clicking the start
    /// or end once both exist does nothing.
    pub fn place(&mut self, pos: Pos) -> Result<CellState, EditError> {
        self.grid.at(pos)?;
        if self.start.is_none() && self.end != Some(pos) {
            self.set_start(pos)?;
            Ok(CellState::Start)
        } else if self.end.is_none() && self.start != Some(pos) {
            self.set_end(pos)?;
            Ok(CellState::End)
        } else if self.start != Some(pos) && self.end != Some(pos) {
            self.set_barrier(pos)?;
            Ok(CellState::Barrier)
        } else {
            Ok(self.grid.at(pos)?.state())
        }
    }

    /// Rebuild the grid from scratch and forget start and end.
    pub fn clear_all(&mut self) {
        self.grid.reset();
        self.start = None;
        self.end = None;
        log::debug!("grid cleared");
    }

    /// Turn each empty cell into a barrier with probability `density`
    /// (clamped to `[0, 1]`). Returns the number of barriers added.
    pub fn scatter_barriers(&mut self, rng: &mut impl Rng, density: f64) -> usize {
        let density = density.clamp(0.0, 1.0);
        let mut added = 0;
        for idx in 0..self.grid.len() {
            let pos = self.grid.pos_of(idx);
            if self.grid.state(pos) != Some(CellState::Empty) {
                continue;
            }
            if rng.random_bool(density) && self.set_barrier(pos).is_ok() {
                added += 1;
            }
        }
        log::debug!("scattered {added} barriers at density {density}");
        added
    }

    /// Clear marks left by a previous run and hand out the grid together
    /// with the endpoints, ready for a search.
    pub fn prepare_run(&mut self) -> Result<(&mut Grid, Pos, Pos), EditError> {
        let start = self.start.ok_or(EditError::MissingStart)?;
        let end = self.end.ok_or(EditError::MissingEnd)?;
        self.grid.clear_search_marks();
        Ok((&mut self.grid, start, end))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn editor(size: i32) -> GridEditor {
        GridEditor::new(size, Point::new(1, 1))
    }

    #[test]
    fn only_one_start_and_end() {
        let mut ed = editor(3);
        ed.set_start(Pos::new(0, 0)).unwrap();
        assert_eq!(
            ed.set_start(Pos::new(1, 1)),
            Err(EditError::StartAlreadySet(Pos::new(0, 0)))
        );
        // Re-placing on the same cell is harmless.
        assert_eq!(ed.set_start(Pos::new(0, 0)), Ok(()));

        ed.set_end(Pos::new(2, 2)).unwrap();
        assert_eq!(
            ed.set_end(Pos::new(1, 1)),
            Err(EditError::EndAlreadySet(Pos::new(2, 2)))
        );
        assert_eq!(ed.grid().count(CellState::Start), 1);
        assert_eq!(ed.grid().count(CellState::End), 1);
    }

    #[test]
    fn endpoints_cannot_share_or_be_walled() {
        let mut ed = editor(3);
        ed.set_start(Pos::new(1, 1)).unwrap();
        assert!(matches!(
            ed.set_end(Pos::new(1, 1)),
            Err(EditError::Occupied {
                state: CellState::Start,
                ..
            })
        ));
        assert!(matches!(
            ed.set_barrier(Pos::new(1, 1)),
            Err(EditError::Occupied { .. })
        ));
        assert!(matches!(
            ed.set_barrier(Pos::new(5, 5)),
            Err(EditError::Grid(_))
        ));
    }

    #[test]
    fn clear_forgets_endpoints() {
        let mut ed = editor(3);
        ed.set_start(Pos::new(0, 0)).unwrap();
        ed.set_end(Pos::new(0, 1)).unwrap();
        ed.clear(Pos::new(0, 0)).unwrap();
        assert_eq!(ed.start(), None);
        assert_eq!(ed.end(), Some(Pos::new(0, 1)));
        ed.set_start(Pos::new(2, 2)).unwrap();
        assert_eq!(ed.start(), Some(Pos::new(2, 2)));
    }

    #[test]
    fn place_follows_click_order() {
        let mut ed = editor(3);
        assert_eq!(ed.place(Pos::new(0, 0)), Ok(CellState::Start));
        // Clicking the start again does not make it the end.
        assert_eq!(ed.place(Pos::new(0, 0)), Ok(CellState::Start));
        assert_eq!(ed.place(Pos::new(2, 2)), Ok(CellState::End));
        assert_eq!(ed.place(Pos::new(1, 1)), Ok(CellState::Barrier));
        assert_eq!(ed.place(Pos::new(2, 2)), Ok(CellState::End));
        assert!(ed.place(Pos::new(3, 0)).is_err());
    }

    #[test]
    fn clear_all_resets_everything() {
        let mut ed = editor(3);
        ed.place(Pos::new(0, 0)).unwrap();
        ed.place(Pos::new(1, 0)).unwrap();
        ed.place(Pos::new(2, 0)).unwrap();
        ed.clear_all();
        assert_eq!(ed.start(), None);
        assert_eq!(ed.end(), None);
        assert_eq!(ed.grid().count(CellState::Empty), 9);
    }

    #[test]
    fn prepare_run_requires_endpoints_and_clears_marks() {
        let mut ed = editor(3);
        assert_eq!(ed.prepare_run().err(), Some(EditError::MissingStart));
        ed.set_start(Pos::new(0, 0)).unwrap();
        assert_eq!(ed.prepare_run().err(), Some(EditError::MissingEnd));
        ed.set_end(Pos::new(2, 2)).unwrap();
        {
            let (grid, _, _) = ed.prepare_run().unwrap();
            grid.cell_at_mut(1, 1).unwrap().mark_visited();
        }
        let (grid, start, end) = ed.prepare_run().unwrap();
        assert_eq!((start, end), (Pos::new(0, 0), Pos::new(2, 2)));
        assert_eq!(grid.count(CellState::Visited), 0);
    }

    #[test]
    fn scatter_spares_endpoints_and_is_seeded() {
        let mut a = editor(10);
        a.set_start(Pos::new(0, 0)).unwrap();
        a.set_end(Pos::new(9, 9)).unwrap();
        let mut b = a.clone();

        let na = a.scatter_barriers(&mut StdRng::seed_from_u64(7), 0.3);
        let nb = b.scatter_barriers(&mut StdRng::seed_from_u64(7), 0.3);
        assert_eq!(na, nb);
        assert_eq!(a.grid().to_string(), b.grid().to_string());
        assert_eq!(a.grid().count(CellState::Barrier), na);
        assert_eq!(a.grid().state(Pos::new(0, 0)), Some(CellState::Start));
        assert_eq!(a.grid().state(Pos::new(9, 9)), Some(CellState::End));

        let mut full = editor(4);
        assert_eq!(full.scatter_barriers(&mut StdRng::seed_from_u64(1), 1.0), 16);
        let mut none = editor(4);
        assert_eq!(none.scatter_barriers(&mut StdRng::seed_from_u64(1), 0.0), 0);
    }

    #[test]
    fn from_grid_picks_up_endpoints() {
        let ed = GridEditor::from_grid(Grid::parse("S.\n.E").unwrap());
        assert_eq!(ed.start(), Some(Pos::new(0, 0)));
        assert_eq!(ed.end(), Some(Pos::new(1, 1)));
    }
}
