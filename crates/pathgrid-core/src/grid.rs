//! The [`Grid`] type: a square, row-major collection of [`Cell`]s.
//!
//! The grid owns every cell exclusively. Adjacency is derived on demand
//! from the current barrier layout and is always 4-connected.

use std::fmt;

use crate::cell::{Cell, CellState};
use crate::error::{GridError, LayoutError};
use crate::geom::{Point, Pos, Range};

/// A `size × size` grid of cells.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawGrid"))]
pub struct Grid {
    size: i32,
    span: Point,
    cells: Vec<Cell>,
}

/// Deserialized grid before its cell list is checked against `size`.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawGrid {
    size: i32,
    span: Point,
    cells: Vec<Cell>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawGrid> for Grid {
    type Error = LayoutError;

    fn try_from(raw: RawGrid) -> Result<Self, Self::Error> {
        let size = raw.size.max(0) as usize;
        if raw.cells.len() != size * size {
            return Err(LayoutError::CellCount {
                expected: size * size,
                found: raw.cells.len(),
            });
        }
        for (i, cell) in raw.cells.iter().enumerate() {
            let expected = Pos::new((i / size) as i32, (i % size) as i32);
            if cell.pos() != expected {
                return Err(LayoutError::Misplaced {
                    index: i,
                    pos: cell.pos(),
                });
            }
        }
        Ok(Self {
            size: raw.size,
            span: Point::new(raw.span.x.max(1), raw.span.y.max(1)),
            cells: raw.cells,
        })
    }
}

impl Grid {
    /// Create a `size × size` grid of empty cells. `span` is the number of
    /// screen units a cell covers on each axis; it only affects rendering
    /// geometry.
    pub fn new(size: i32, span: Point) -> Self {
        let size = size.max(0);
        let span = Point::new(span.x.max(1), span.y.max(1));
        Self {
            size,
            span,
            cells: Self::fresh_cells(size, span),
        }
    }

    fn fresh_cells(size: i32, span: Point) -> Vec<Cell> {
        let mut cells = Vec::with_capacity((size as usize) * (size as usize));
        for row in 0..size {
            for col in 0..size {
                cells.push(Cell::new(Pos::new(row, col), span));
            }
        }
        cells
    }

    /// Parse a textual layout with one character per cell: `.` empty,
    /// `#` barrier, `S` start, `E` end. Blank lines and surrounding
    /// whitespace are ignored. The resulting grid uses a unit span.
    pub fn parse(layout: &str) -> Result<Self, LayoutError> {
        let lines: Vec<&str> = layout
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();
        if lines.is_empty() {
            return Err(LayoutError::Empty);
        }
        let expected = lines.len();
        let mut grid = Grid::new(expected as i32, Point::new(1, 1));
        let mut seen_start = false;
        let mut seen_end = false;
        for (row, line) in lines.iter().enumerate() {
            let width = line.chars().count();
            if width != expected {
                return Err(LayoutError::NotSquare {
                    line: row,
                    width,
                    expected,
                });
            }
            for (col, ch) in line.chars().enumerate() {
                let pos = Pos::new(row as i32, col as i32);
                let state = match ch {
                    '.' => CellState::Empty,
                    '#' => CellState::Barrier,
                    'S' if seen_start => {
                        return Err(LayoutError::Duplicate {
                            state: CellState::Start,
                            pos,
                        });
                    }
                    'S' => {
                        seen_start = true;
                        CellState::Start
                    }
                    'E' if seen_end => {
                        return Err(LayoutError::Duplicate {
                            state: CellState::End,
                            pos,
                        });
                    }
                    'E' => {
                        seen_end = true;
                        CellState::End
                    }
                    _ => return Err(LayoutError::InvalidChar { ch, pos }),
                };
                let i = row * expected + col;
                match state {
                    CellState::Barrier => grid.cells[i].mark_barrier(),
                    CellState::Start => grid.cells[i].mark_start(),
                    CellState::End => grid.cells[i].mark_end(),
                    _ => {}
                }
            }
        }
        Ok(grid)
    }

    /// Number of rows (and columns).
    #[inline]
    pub fn size(&self) -> i32 {
        self.size
    }

    /// Screen units per cell on each axis.
    #[inline]
    pub fn span(&self) -> Point {
        self.span
    }

    /// Total number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Screen rectangle covered by the grid, anchored at the origin.
    pub fn screen_bounds(&self) -> Range {
        Range::new(0, 0, self.size * self.span.x, self.size * self.span.y)
    }

    /// Whether `pos` lies inside the grid.
    #[inline]
    pub fn contains(&self, pos: Pos) -> bool {
        pos.row >= 0 && pos.col >= 0 && pos.row < self.size && pos.col < self.size
    }

    /// Flat row-major index of `pos`, or `None` if out of range.
    #[inline]
    pub fn index(&self, pos: Pos) -> Option<usize> {
        if !self.contains(pos) {
            return None;
        }
        Some((pos.row as usize) * (self.size as usize) + (pos.col as usize))
    }

    /// Convert a flat index back to a position.
    #[inline]
    pub fn pos_of(&self, idx: usize) -> Pos {
        let size = self.size as usize;
        Pos::new((idx / size) as i32, (idx % size) as i32)
    }

    fn out_of_range(&self, pos: Pos) -> GridError {
        GridError::OutOfRange {
            row: pos.row,
            col: pos.col,
            size: self.size,
        }
    }

    /// Bounds-checked lookup by row and column.
    pub fn cell_at(&self, row: i32, col: i32) -> Result<&Cell, GridError> {
        self.at(Pos::new(row, col))
    }

    /// Mutable bounds-checked lookup by row and column.
    pub fn cell_at_mut(&mut self, row: i32, col: i32) -> Result<&mut Cell, GridError> {
        self.at_mut(Pos::new(row, col))
    }

    /// Bounds-checked lookup by position.
    pub fn at(&self, pos: Pos) -> Result<&Cell, GridError> {
        match self.index(pos) {
            Some(i) => Ok(&self.cells[i]),
            None => Err(self.out_of_range(pos)),
        }
    }

    /// Mutable bounds-checked lookup by position.
    pub fn at_mut(&mut self, pos: Pos) -> Result<&mut Cell, GridError> {
        match self.index(pos) {
            Some(i) => Ok(&mut self.cells[i]),
            None => Err(self.out_of_range(pos)),
        }
    }

    /// State of the cell at `pos`, or `None` when out of range.
    #[inline]
    pub fn state(&self, pos: Pos) -> Option<CellState> {
        self.index(pos).map(|i| self.cells[i].state())
    }

    /// In-bounds, non-barrier orthogonal neighbours of `pos`, in the fixed
    /// order down, up, left, right. Reflects the barrier layout at the
    /// moment of the call.
    pub fn neighbors_of(&self, pos: Pos) -> Vec<Pos> {
        let mut out = Vec::with_capacity(4);
        if !self.contains(pos) {
            return out;
        }
        for n in pos.neighbors_4() {
            if let Some(i) = self.index(n) {
                if self.cells[i].is_traversable() {
                    out.push(n);
                }
            }
        }
        out
    }

    /// Replace every cell with a fresh empty cell.
    pub fn reset(&mut self) {
        self.cells = Self::fresh_cells(self.size, self.span);
    }

    /// Return every `Frontier`, `Visited` and `Path` cell to `Empty`,
    /// leaving barriers and endpoints in place.
    pub fn clear_search_marks(&mut self) {
        for c in self.cells.iter_mut() {
            if c.state().is_search_mark() {
                c.reset();
            }
        }
    }

    /// First cell (row-major) in the given state.
    pub fn find(&self, state: CellState) -> Option<Pos> {
        self.cells
            .iter()
            .find(|c| c.state() == state)
            .map(Cell::pos)
    }

    /// Number of cells in the given state.
    pub fn count(&self, state: CellState) -> usize {
        self.cells.iter().filter(|c| c.state() == state).count()
    }

    /// Map a screen point to the cell under it by integer division by the
    /// cell span. Points outside the grid are rejected.
    pub fn screen_to_pos(&self, p: Point) -> Result<Pos, GridError> {
        if !self.screen_bounds().contains(p) {
            return Err(GridError::OffScreen { x: p.x, y: p.y });
        }
        Ok(Pos::new(p.y / self.span.y, p.x / self.span.x))
    }

    /// Row-major iterator over all cells.
    pub fn iter(&self) -> std::slice::Iter<'_, Cell> {
        self.cells.iter()
    }
}

impl<'a> IntoIterator for &'a Grid {
    type Item = &'a Cell;
    type IntoIter = std::slice::Iter<'a, Cell>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// One character per cell: `.` empty, `#` barrier, `S` start, `E` end,
/// `o` frontier, `x` visited, `*` path.
impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.size.max(1) as usize) {
            for c in row {
                let ch = match c.state() {
                    CellState::Empty => '.',
                    CellState::Barrier => '#',
                    CellState::Start => 'S',
                    CellState::End => 'E',
                    CellState::Frontier => 'o',
                    CellState::Visited => 'x',
                    CellState::Path => '*',
                };
                write!(f, "{ch}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit(size: i32) -> Grid {
        Grid::new(size, Point::new(1, 1))
    }

    #[test]
    fn new_grid_is_all_empty() {
        let g = unit(4);
        assert_eq!(g.len(), 16);
        assert!(g.iter().all(Cell::is_empty));
        assert_eq!(g.cell_at(3, 3).unwrap().pos(), Pos::new(3, 3));
    }

    #[test]
    fn cell_at_rejects_out_of_range() {
        let g = unit(3);
        assert_eq!(
            g.cell_at(3, 0),
            Err(GridError::OutOfRange {
                row: 3,
                col: 0,
                size: 3
            })
        );
        assert!(g.cell_at(0, -1).is_err());
        assert!(g.cell_at(2, 2).is_ok());
    }

    #[test]
    fn neighbors_order_and_barriers() {
        let mut g = unit(3);
        let all = g.neighbors_of(Pos::new(1, 1));
        assert_eq!(
            all,
            vec![
                Pos::new(2, 1),
                Pos::new(0, 1),
                Pos::new(1, 0),
                Pos::new(1, 2)
            ]
        );

        g.cell_at_mut(0, 1).unwrap().mark_barrier();
        let n = g.neighbors_of(Pos::new(1, 1));
        assert_eq!(n, vec![Pos::new(2, 1), Pos::new(1, 0), Pos::new(1, 2)]);

        // Corners only see in-bounds cells.
        assert_eq!(
            g.neighbors_of(Pos::new(0, 0)),
            vec![Pos::new(1, 0)]
        );
    }

    #[test]
    fn adjacency_is_symmetric() {
        let g = Grid::parse(
            "
            ..#.
            .#..
            ....
            #..#
            ",
        )
        .unwrap();
        for c in g.iter().filter(|c| c.is_traversable()) {
            for n in g.neighbors_of(c.pos()) {
                assert!(g.neighbors_of(n).contains(&c.pos()));
            }
        }
    }

    #[test]
    fn reset_replaces_all_cells() {
        let mut g = unit(3);
        g.cell_at_mut(1, 1).unwrap().mark_barrier();
        g.cell_at_mut(0, 0).unwrap().mark_start();
        g.reset();
        assert!(g.iter().all(Cell::is_empty));
        assert_eq!(g.len(), 9);
    }

    #[test]
    fn clear_search_marks_keeps_editor_states() {
        let mut g = Grid::parse("S#\n.E").unwrap();
        g.cell_at_mut(1, 0).unwrap().mark_path();
        g.clear_search_marks();
        assert_eq!(g.to_string(), "S#\n.E\n");
    }

    #[test]
    fn screen_mapping_divides_by_span() {
        let g = Grid::new(4, Point::new(2, 1));
        assert_eq!(g.screen_to_pos(Point::new(0, 0)), Ok(Pos::new(0, 0)));
        assert_eq!(g.screen_to_pos(Point::new(5, 2)), Ok(Pos::new(2, 2)));
        assert_eq!(g.screen_to_pos(Point::new(7, 3)), Ok(Pos::new(3, 3)));
        assert!(g.screen_to_pos(Point::new(8, 0)).is_err());
        assert!(g.screen_to_pos(Point::new(0, 4)).is_err());
        assert!(g.screen_to_pos(Point::new(-1, 0)).is_err());
    }

    #[test]
    fn parse_round_trips_through_display() {
        let text = "S..\n.#.\n..E\n";
        let g = Grid::parse(text).unwrap();
        assert_eq!(g.find(CellState::Start), Some(Pos::new(0, 0)));
        assert_eq!(g.find(CellState::End), Some(Pos::new(2, 2)));
        assert_eq!(g.count(CellState::Barrier), 1);
        assert_eq!(g.to_string(), text);
    }

    #[test]
    fn parse_errors() {
        assert!(matches!(Grid::parse("  \n"), Err(LayoutError::Empty)));
        assert!(matches!(
            Grid::parse("..\n..."),
            Err(LayoutError::NotSquare { line: 1, .. })
        ));
        assert!(matches!(
            Grid::parse(".?\n.."),
            Err(LayoutError::InvalidChar { ch: '?', .. })
        ));
        assert!(matches!(
            Grid::parse("SS\n.."),
            Err(LayoutError::Duplicate {
                state: CellState::Start,
                ..
            })
        ));
    }
}
