// SPDX-License-Identifier: MIT
//
// Frame composition — turning the screen grid into one string of output.
//
// The draw loop renders a fixed region of the grid (the top `rows` rows,
// `cols` columns wide). Composition walks that region top to bottom:
//
//   - A row where every cell is blank becomes a bare cursor-down (`ESC[1B`).
//     Nothing is written over it, so whatever the terminal shows there is
//     left alone and the frame stays small.
//
//   - Any other row becomes `\r`, the concatenated cells, then `ESC[1B`.
//     Cells carry their own color escapes, so concatenation is the whole job.
//
// The composed text doubles as the frame's identity: the loop compares it
// with the previous frame's text and skips the write when they match.

use crate::ansi;
use crate::screen::{BLANK_CELL, ScreenView};

// ─── Frame ───────────────────────────────────────────────────────────────────

/// One composed frame, ready to be written after a cursor-home.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Frame {
    /// Row-by-row output for the render region.
    pub text: String,
    /// 0-indexed row to park the cursor on afterwards: the row below the
    /// last row with content, or the region's last row if none had any.
    pub cursor_row: u16,
    /// Number of rows that carried content.
    pub content_rows: usize,
}

impl Frame {
    /// Compose the top-left `cols × rows` region of `view`.
    ///
    /// The region is clipped to the grid, so oversize requests are safe.
    #[must_use]
    pub fn compose(view: &ScreenView<'_>, cols: usize, rows: usize) -> Self {
        // Escapes go through `ansi` into bytes; writing to a Vec cannot fail.
        let mut buf: Vec<u8> = Vec::with_capacity(rows * (cols + 5));
        let mut last_content: Option<usize> = None;
        let mut content_rows = 0;

        for y in 0..rows {
            let Some(row) = view.row(y) else {
                break;
            };
            let cells = &row[..cols.min(row.len())];

            if cells.iter().all(|c| c == BLANK_CELL) {
                let _ = ansi::cursor_down(&mut buf, 1);
                continue;
            }

            buf.push(b'\r');
            for cell in cells {
                buf.extend_from_slice(cell.as_bytes());
            }
            let _ = ansi::cursor_down(&mut buf, 1);
            last_content = Some(y);
            content_rows += 1;
        }

        let cursor_row = last_content.map_or(rows.saturating_sub(1), |y| y + 1);
        Self {
            text: String::from_utf8(buf).unwrap_or_default(),
            cursor_row: u16::try_from(cursor_row).unwrap_or(u16::MAX),
            content_rows,
        }
    }

    /// Whether no row carried content.
    #[inline]
    #[must_use]
    pub const fn is_blank(&self) -> bool {
        self.content_rows == 0
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screen::ScreenBuffer;
    use pretty_assertions::assert_eq;

    // ── compose ─────────────────────────────────────────────────────────

    #[test]
    fn blank_grid_is_all_cursor_downs() {
        let screen = ScreenBuffer::new(5, 3);
        let frame = Frame::compose(&screen.read(), 5, 3);
        assert_eq!(frame.text, "\x1b[1B\x1b[1B\x1b[1B");
        assert!(frame.is_blank());
        assert_eq!(frame.cursor_row, 2);
    }

    #[test]
    fn content_row_is_framed_by_cr_and_advance() {
        let screen = ScreenBuffer::new(3, 2);
        screen.set_pixel(1, 0, "X");
        let frame = Frame::compose(&screen.read(), 3, 2);
        assert_eq!(frame.text, "\r X \x1b[1B\x1b[1B");
        assert_eq!(frame.content_rows, 1);
    }

    #[test]
    fn cursor_row_follows_last_content_row() {
        let screen = ScreenBuffer::new(4, 6);
        screen.set_pixel(0, 1, "a");
        screen.set_pixel(0, 3, "b");
        let frame = Frame::compose(&screen.read(), 4, 6);
        assert_eq!(frame.cursor_row, 4);
        assert_eq!(frame.content_rows, 2);
    }

    #[test]
    fn styled_cells_are_concatenated_verbatim() {
        let screen = ScreenBuffer::new(2, 1);
        let red = "\x1b[38;5;001mA\x1b[0m";
        screen.set_pixel(0, 0, red);
        let frame = Frame::compose(&screen.read(), 2, 1);
        assert_eq!(frame.text, format!("\r{red} \x1b[1B"));
    }

    #[test]
    fn content_outside_region_is_ignored() {
        let screen = ScreenBuffer::new(10, 10);
        screen.set_pixel(8, 0, "X");
        screen.set_pixel(0, 7, "Y");
        let frame = Frame::compose(&screen.read(), 5, 5);
        assert!(frame.is_blank());
        assert_eq!(frame.text, "\x1b[1B".repeat(5));
    }

    #[test]
    fn oversize_region_is_clipped() {
        let screen = ScreenBuffer::new(2, 1);
        screen.set_pixel(2, 1, "Z");
        // Grid is 3 × 2 with the spare row and column.
        let frame = Frame::compose(&screen.read(), 50, 50);
        assert_eq!(frame.text, "\x1b[1B\r  Z\x1b[1B");
        assert_eq!(frame.cursor_row, 2);
    }

    #[test]
    fn empty_region_composes_nothing() {
        let screen = ScreenBuffer::new(4, 4);
        let frame = Frame::compose(&screen.read(), 4, 0);
        assert_eq!(frame.text, "");
        assert_eq!(frame.cursor_row, 0);
    }

    #[test]
    fn identical_grids_compose_identical_frames() {
        let a = ScreenBuffer::new(6, 3);
        let b = ScreenBuffer::new(6, 3);
        a.set_pixel(2, 1, "q");
        b.set_pixel(2, 1, "q");
        assert_eq!(
            Frame::compose(&a.read(), 6, 3),
            Frame::compose(&b.read(), 6, 3)
        );
    }
}
