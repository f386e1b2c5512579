#![forbid(unsafe_code)]

//! Cell grid storage.
//!
//! A [`Surface`] is the backing grid of a console: a fixed-size, row-major
//! array of [`Cell`]s (`index = y * width + x`). Writes outside the grid
//! are ignored.
//!
//! # Invariants
//!
//! 1. `cells.len() == width * height`
//! 2. Width and height never change after creation
//! 3. Every surface carries a process-unique [`SurfaceId`]

use std::sync::atomic::{AtomicU64, Ordering};

use crate::cell::{Cell, PackedRgba};
use cellui_core::geometry::{Rect, Size};
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Process-unique identity of a surface (and of the console owning it).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SurfaceId(u64);

impl SurfaceId {
    /// Allocate the next id.
    pub fn next() -> Self {
        static NEXT_ID: AtomicU64 = AtomicU64::new(1);
        Self(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Raw numeric value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// A 2D grid of cells.
///
/// # Example
///
/// ```
/// use cellui_render::surface::Surface;
/// use cellui_render::cell::Cell;
///
/// let mut surface = Surface::new(10, 2);
/// surface.set(0, 0, Cell::from_char('H'));
/// assert_eq!(surface.row_text(0), "H         ");
/// ```
#[derive(Debug)]
pub struct Surface {
    id: SurfaceId,
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl Surface {
    /// Create a surface filled with default cells.
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            id: SurfaceId::next(),
            width,
            height,
            cells: vec![Cell::default(); width as usize * height as usize],
        }
    }

    #[inline]
    pub const fn id(&self) -> SurfaceId {
        self.id
    }

    #[inline]
    pub const fn width(&self) -> u16 {
        self.width
    }

    #[inline]
    pub const fn height(&self) -> u16 {
        self.height
    }

    #[inline]
    pub const fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Bounding rect of the entire surface.
    #[inline]
    pub const fn bounds(&self) -> Rect {
        Rect::from_size(self.width, self.height)
    }

    #[inline]
    fn index(&self, x: u16, y: u16) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    /// Cell at (x, y), or `None` when out of bounds.
    #[inline]
    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        self.index(x, y).map(|i| &self.cells[i])
    }

    /// Mutable cell at (x, y), or `None` when out of bounds.
    #[inline]
    pub fn get_mut(&mut self, x: u16, y: u16) -> Option<&mut Cell> {
        self.index(x, y).map(|i| &mut self.cells[i])
    }

    /// Overwrite the cell at (x, y). Out-of-bounds writes are ignored.
    #[inline]
    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        if let Some(i) = self.index(x, y) {
            self.cells[i] = cell;
        }
    }

    /// Fill a rectangular region, clipped to the surface.
    pub fn fill(&mut self, rect: Rect, cell: Cell) {
        let clipped = self.bounds().intersection(&rect);
        for y in clipped.y..clipped.bottom() {
            for x in clipped.x..clipped.right() {
                self.set(x, y, cell);
            }
        }
    }

    /// Reset every cell to `cell`.
    pub fn clear_with(&mut self, cell: Cell) {
        self.cells.fill(cell);
    }

    /// Print `text` starting at (x, y), stopping before `max_x` (exclusive).
    ///
    /// Zero-width graphemes are skipped; a grapheme that would straddle
    /// `max_x` is not drawn. Returns the x position after the last drawn
    /// glyph.
    pub fn print(
        &mut self,
        mut x: u16,
        y: u16,
        text: &str,
        fg: PackedRgba,
        bg: PackedRgba,
        max_x: u16,
    ) -> u16 {
        let max_x = max_x.min(self.width);
        for grapheme in text.graphemes(true) {
            if x >= max_x {
                break;
            }
            let w = UnicodeWidthStr::width(grapheme);
            if w == 0 {
                continue;
            }
            if x as usize + w > max_x as usize {
                break;
            }
            if let Some(c) = grapheme.chars().next() {
                self.set(x, y, Cell::from_char(c).with_fg(fg).with_bg(bg));
                for i in 1..w as u16 {
                    self.set(x + i, y, Cell::CONTINUATION.with_fg(fg).with_bg(bg));
                }
            }
            x = x.saturating_add(w as u16);
        }
        x
    }

    /// Glyphs of row `y` as a string (empty when out of bounds). Trailing
    /// cells of wide graphemes are skipped.
    pub fn row_text(&self, y: u16) -> String {
        if y >= self.height {
            return String::new();
        }
        let start = y as usize * self.width as usize;
        self.cells[start..start + self.width as usize]
            .iter()
            .filter(|cell| !cell.is_continuation())
            .map(|cell| cell.ch)
            .collect()
    }

    /// Raw access to the cell slice.
    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }
}
