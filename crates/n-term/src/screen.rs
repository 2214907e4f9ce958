// SPDX-License-Identifier: MIT
//
// ScreenBuffer — the shared grid every drawing call paints into.
//
// Each cell holds the fully styled string for one screen position (the
// glyph wrapped in its color escape), so composing a frame is plain string
// concatenation. A parallel dirty grid records which cells changed since
// the draw loop last rendered.
//
// Design:
//
//   - Flat `Vec`s with row-major indexing: `index = y * stride + x`. A row's
//     cells are contiguous, so left-to-right frame composition is a linear
//     scan over a slice.
//
//   - Sized `(height + 1) × (width + 1)`: one spare row and column beyond
//     the terminal, matching the drawing math's inclusive upper bounds.
//
//   - One `RwLock` guards cells and dirty flags together. Drawing threads
//     take the write lock per cell; the draw loop takes the read lock for a
//     whole frame, so it always sees a consistent grid, never a torn row.
//
//   - Out-of-range writes are silently ignored. Drawing math wraps and
//     overshoots (easing curves can exceed 1.0); clipping here keeps every
//     caller simple.
//
//   - Writing the value a cell already holds does not mark it dirty, so
//     animations that redraw unchanged glyphs never trigger a frame.

use parking_lot::{RwLock, RwLockReadGuard};

use crate::terminal::Size;

/// The content of an untouched cell.
pub const BLANK_CELL: &str = " ";

// ─── Grid ────────────────────────────────────────────────────────────────────

struct Grid {
    /// Terminal width the grid was built for.
    width: usize,
    /// Terminal height the grid was built for.
    height: usize,
    cells: Vec<String>,
    dirty: Vec<bool>,
}

impl Grid {
    fn new(width: usize, height: usize) -> Self {
        let len = (width + 1) * (height + 1);
        Self {
            width,
            height,
            cells: vec![BLANK_CELL.to_owned(); len],
            dirty: vec![true; len],
        }
    }

    /// Cells per row, including the spare column.
    #[inline]
    const fn stride(&self) -> usize {
        self.width + 1
    }

    /// Number of rows, including the spare row.
    #[inline]
    const fn rows(&self) -> usize {
        self.height + 1
    }

    fn dirty_within(&self, cols: usize, rows: usize) -> bool {
        let stride = self.stride();
        let cols = cols.min(stride);
        self.dirty
            .chunks(stride)
            .take(rows)
            .any(|row| row[..cols].iter().any(|&d| d))
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        let x = usize::try_from(x).ok()?;
        let y = usize::try_from(y).ok()?;
        (x < self.stride() && y < self.rows()).then(|| y * self.stride() + x)
    }
}

// ─── ScreenBuffer ────────────────────────────────────────────────────────────

/// Thread-safe grid of styled cells with dirty tracking.
///
/// # Examples
///
/// ```
/// use n_term::screen::ScreenBuffer;
///
/// let screen = ScreenBuffer::new(80, 24);
/// screen.clear_dirty();
///
/// assert!(screen.set_pixel(3, 2, "X"));
/// assert!(!screen.set_pixel(3, 2, "X")); // same value: no change
/// assert!(!screen.set_pixel(-1, 2, "X")); // out of range: ignored
///
/// assert_eq!(screen.dirty_count(), 1);
/// assert_eq!(screen.read().get(3, 2), Some("X"));
/// ```
pub struct ScreenBuffer {
    grid: RwLock<Grid>,
}

impl ScreenBuffer {
    /// Create a blank buffer for a `width × height` terminal, all dirty.
    #[must_use]
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            grid: RwLock::new(Grid::new(usize::from(width), usize::from(height))),
        }
    }

    /// Create a blank buffer for a terminal of `size`.
    #[must_use]
    pub fn with_size(size: Size) -> Self {
        Self::new(size.cols, size.rows)
    }

    /// The terminal size the grid was built for.
    #[must_use]
    pub fn size(&self) -> Size {
        let grid = self.grid.read();
        // Built from u16 dimensions, so the conversion cannot fail.
        Size {
            cols: u16::try_from(grid.width).unwrap_or(u16::MAX),
            rows: u16::try_from(grid.height).unwrap_or(u16::MAX),
        }
    }

    /// Set a cell, marking it dirty if the value changed.
    ///
    /// Out-of-range coordinates (including negatives) are ignored. Returns
    /// `true` if the cell was updated.
    pub fn set_pixel(&self, x: i32, y: i32, value: &str) -> bool {
        let mut grid = self.grid.write();
        let Some(i) = grid.index(x, y) else {
            return false;
        };
        if grid.cells[i] == value {
            return false;
        }
        value.clone_into(&mut grid.cells[i]);
        grid.dirty[i] = true;
        true
    }

    /// Take the read lock for bulk access (frame composition, inspection).
    ///
    /// Writers block until the returned view is dropped. Keep it short.
    #[must_use]
    pub fn read(&self) -> ScreenView<'_> {
        ScreenView {
            grid: self.grid.read(),
        }
    }

    /// Whether any cell is dirty.
    #[must_use]
    pub fn has_dirty(&self) -> bool {
        self.grid.read().dirty.iter().any(|&d| d)
    }

    /// If any cell in the `cols × rows` region is dirty, clear every dirty
    /// flag and return `true`.
    ///
    /// Check and clear happen under one write lock: a cell written after
    /// this call stays dirty for the next one, so no change is ever lost
    /// between composing a frame and acknowledging it. Changes outside the
    /// region alone do not count, so they cannot keep the draw loop awake.
    pub fn take_dirty_within(&self, cols: usize, rows: usize) -> bool {
        let mut grid = self.grid.write();
        if !grid.dirty_within(cols, rows) {
            return false;
        }
        grid.dirty.fill(false);
        true
    }

    /// Number of dirty cells.
    #[must_use]
    pub fn dirty_count(&self) -> usize {
        self.grid.read().dirty.iter().filter(|&&d| d).count()
    }

    /// Reset every dirty flag, after a successful render.
    pub fn clear_dirty(&self) {
        self.grid.write().dirty.fill(false);
    }

    /// Replace the grid with blank cells sized for `width × height`, all dirty.
    pub fn reinit(&self, width: u16, height: u16) {
        *self.grid.write() = Grid::new(usize::from(width), usize::from(height));
    }
}

impl std::fmt::Debug for ScreenBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let size = self.size();
        f.debug_struct("ScreenBuffer")
            .field("cols", &size.cols)
            .field("rows", &size.rows)
            .field("dirty", &self.dirty_count())
            .finish()
    }
}

// ─── ScreenView ──────────────────────────────────────────────────────────────

/// A read-locked view of the grid.
pub struct ScreenView<'a> {
    grid: RwLockReadGuard<'a, Grid>,
}

impl ScreenView<'_> {
    /// Terminal width the grid was built for.
    #[inline]
    #[must_use]
    pub fn width(&self) -> usize {
        self.grid.width
    }

    /// Terminal height the grid was built for.
    #[inline]
    #[must_use]
    pub fn height(&self) -> usize {
        self.grid.height
    }

    /// One full row (including the spare column), or `None` past the grid.
    #[must_use]
    pub fn row(&self, y: usize) -> Option<&[String]> {
        let stride = self.grid.stride();
        (y < self.grid.rows()).then(|| &self.grid.cells[y * stride..(y + 1) * stride])
    }

    /// The value of one cell.
    #[must_use]
    pub fn get(&self, x: i32, y: i32) -> Option<&str> {
        self.grid.index(x, y).map(|i| self.grid.cells[i].as_str())
    }

    /// Whether one cell is dirty. Out of range reads as clean.
    #[must_use]
    pub fn is_dirty(&self, x: i32, y: i32) -> bool {
        self.grid.index(x, y).is_some_and(|i| self.grid.dirty[i])
    }

    /// Whether every cell holds [`BLANK_CELL`].
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.grid.cells.iter().all(|c| c == BLANK_CELL)
    }

    /// Whether every cell is dirty.
    #[must_use]
    pub fn is_all_dirty(&self) -> bool {
        self.grid.dirty.iter().all(|&d| d)
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
