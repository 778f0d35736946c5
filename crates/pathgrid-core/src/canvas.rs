//! Screen-side buffers: [`Glyph`], [`Canvas`] and the diff [`Frame`] handed
//! to a [`Driver`](crate::Driver).

use crate::geom::{Point, Range};
use crate::style::Style;

/// A styled character on screen.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Glyph {
    pub ch: char,
    pub style: Style,
}

impl Glyph {
    #[inline]
    pub const fn new(ch: char, style: Style) -> Self {
        Self { ch, style }
    }
}

impl Default for Glyph {
    #[inline]
    fn default() -> Self {
        Self {
            ch: ' ',
            style: Style::default(),
        }
    }
}

/// A fixed-size, row-major buffer of glyphs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    glyphs: Vec<Glyph>,
    width: i32,
    height: i32,
}

impl Canvas {
    /// Create a blank canvas.
    pub fn new(width: i32, height: i32) -> Self {
        let w = width.max(0);
        let h = height.max(0);
        Self {
            glyphs: vec![Glyph::default(); (w as usize) * (h as usize)],
            width: w,
            height: h,
        }
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    #[inline]
    pub fn bounds(&self) -> Range {
        Range::new(0, 0, self.width, self.height)
    }

    #[inline]
    fn index(&self, p: Point) -> Option<usize> {
        if self.bounds().contains(p) {
            Some((p.y as usize) * (self.width as usize) + (p.x as usize))
        } else {
            None
        }
    }

    /// Glyph at `p`; a blank glyph outside bounds.
    pub fn at(&self, p: Point) -> Glyph {
        self.index(p)
            .map(|i| self.glyphs[i])
            .unwrap_or_default()
    }

    /// Set the glyph at `p`. No-op outside bounds.
    pub fn set(&mut self, p: Point, g: Glyph) {
        if let Some(i) = self.index(p) {
            self.glyphs[i] = g;
        }
    }

    /// Fill every point of `r` (clipped to the canvas) with `g`.
    pub fn fill_range(&mut self, r: Range, g: Glyph) {
        for p in r {
            self.set(p, g);
        }
    }

    /// Fill the whole canvas with `g`.
    pub fn fill(&mut self, g: Glyph) {
        self.glyphs.iter_mut().for_each(|x| *x = g);
    }

    /// Write `text` left to right starting at `p`, clipped at the right
    /// edge. Returns the number of glyphs written.
    pub fn print(&mut self, p: Point, text: &str, style: Style) -> usize {
        let mut n = 0;
        for (i, ch) in text.chars().enumerate() {
            let q = p.shift(i as i32, 0);
            if !self.bounds().contains(q) {
                break;
            }
            self.set(q, Glyph::new(ch, style));
            n += 1;
        }
        n
    }

    /// Copy `src` into `self` where the two overlap.
    pub fn copy_from(&mut self, src: &Canvas) {
        if self.width == src.width && self.height == src.height {
            self.glyphs.copy_from_slice(&src.glyphs);
            return;
        }
        for p in self.bounds() {
            if src.bounds().contains(p) {
                self.set(p, src.at(p));
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Frame / FrameCell / compute_frame
// ---------------------------------------------------------------------------

/// A single glyph that changed between frames.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FrameCell {
    pub glyph: Glyph,
    pub pos: Point,
}

/// A set of glyph changes (a diff frame).
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Frame {
    pub cells: Vec<FrameCell>,
    pub width: i32,
    pub height: i32,
}

impl Frame {
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Compute the difference between two canvases, reporting every glyph of
/// `curr` that differs from `prev`.
pub fn compute_frame(prev: &Canvas, curr: &Canvas) -> Frame {
    let cells = curr
        .bounds()
        .iter()
        .filter_map(|p| {
            let g = curr.at(p);
            (prev.at(p) != g).then_some(FrameCell { glyph: g, pos: p })
        })
        .collect();
    Frame {
        cells,
        width: curr.width(),
        height: curr.height(),
    }
}
