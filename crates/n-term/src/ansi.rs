// SPDX-License-Identifier: MIT
//
// ANSI escape sequence generation.
//
// Pure functions that write escape sequences to any `impl Write`. No state,
// no decisions about when to emit — that's the draw loop's job. This module
// just knows the byte-level encoding of every terminal command the canvas
// needs: cursor placement and visibility, screen/line clearing, and the
// 256-color foreground palette.
//
// All cursor positions are 0-indexed in our API and converted to 1-indexed
// for the terminal (ANSI standard uses 1-based coordinates).
//
// All functions return `io::Result` propagated from the underlying writer.
// In practice they never fail when writing to `OutputBuffer` (backed by a Vec).

use std::io::{self, Write};

// ─── Cursor ──────────────────────────────────────────────────────────────────

/// Move the cursor to `(x, y)` using the CUP (Cursor Position) sequence.
///
/// Our coordinates are 0-indexed; ANSI CUP is 1-indexed.
#[inline]
pub fn cursor_to(w: &mut impl Write, x: u16, y: u16) -> io::Result<()> {
    write!(w, "\x1b[{};{}H", u32::from(y) + 1, u32::from(x) + 1)
}

/// Move the cursor down `n` rows without changing the column (CUD).
///
/// Unlike a newline, CUD never scrolls: at the bottom row it is a no-op.
/// The frame composer uses it to skip over rows that hold nothing.
#[inline]
pub fn cursor_down(w: &mut impl Write, n: u16) -> io::Result<()> {
    write!(w, "\x1b[{n}B")
}

/// Hide the cursor (DECTCEM reset).
#[inline]
pub fn cursor_hide(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[?25l")
}

/// Show the cursor (DECTCEM set).
#[inline]
pub fn cursor_show(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[?25h")
}

// ─── Screen ──────────────────────────────────────────────────────────────────

/// Clear the entire screen (ED 2) and home the cursor.
#[inline]
pub fn clear_screen(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[2J")?;
    cursor_to(w, 0, 0)
}

/// Return the cursor to column 0 and erase the current line (EL 0).
#[inline]
pub fn clear_line(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\r\x1b[K")
}

/// Reset all SGR attributes to terminal defaults (SGR 0).
#[inline]
pub fn reset(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[0m")
}

// ─── Foreground Color ────────────────────────────────────────────────────────

/// Set the foreground color to a 256-color palette index.
///
/// The index is always written as three zero-padded digits (`\x1b[38;5;001m`),
/// so every palette sequence has the same byte length. Terminals accept the
/// padded form; fixed-width output keeps composed frames comparable.
#[inline]
pub fn fg256(w: &mut impl Write, idx: u8) -> io::Result<()> {
    write!(w, "\x1b[38;5;{idx:03}m")
}

/// Set the foreground to the standard white (SGR 37).
///
/// Used as the fallback for color codes outside the palette and sentinels.
#[inline]
pub fn fg_default(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[37m")
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    /// Helper: run an ANSI function and return its output as a string.
    fn emit<F>(f: F) -> String
    where
        F: FnOnce(&mut Vec<u8>) -> io::Result<()>,
    {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    // ── Cursor ──────────────────────────────────────────────────────────

    #[test]
    fn cursor_to_origin() {
        assert_eq!(emit(|w| cursor_to(w, 0, 0)), "\x1b[1;1H");
    }

    #[test]
    fn cursor_to_position() {
        assert_eq!(emit(|w| cursor_to(w, 10, 20)), "\x1b[21;11H");
    }

    #[test]
    fn cursor_to_max_does_not_overflow() {
        let s = emit(|w| cursor_to(w, u16::MAX, u16::MAX));
        assert_eq!(s, "\x1b[65536;65536H");
    }

    #[test]
    fn cursor_down_one_row() {
        assert_eq!(emit(|w| cursor_down(w, 1)), "\x1b[1B");
    }

    #[test]
    fn cursor_down_many_rows() {
        assert_eq!(emit(|w| cursor_down(w, 12)), "\x1b[12B");
    }

    #[test]
    fn cursor_hide_sequence() {
        assert_eq!(emit(|w| cursor_hide(w)), "\x1b[?25l");
    }

    #[test]
    fn cursor_show_sequence() {
        assert_eq!(emit(|w| cursor_show(w)), "\x1b[?25h");
    }

    // ── Screen ──────────────────────────────────────────────────────────

    #[test]
    fn clear_screen_homes_cursor() {
        assert_eq!(emit(|w| clear_screen(w)), "\x1b[2J\x1b[1;1H");
    }

    #[test]
    fn clear_line_sequence() {
        assert_eq!(emit(|w| clear_line(w)), "\r\x1b[K");
    }

    #[test]
    fn reset_sequence() {
        assert_eq!(emit(|w| reset(w)), "\x1b[0m");
    }

    // ── Foreground Color ────────────────────────────────────────────────

    #[test]
    fn fg256_pads_single_digit() {
        assert_eq!(emit(|w| fg256(w, 1)), "\x1b[38;5;001m");
    }

    #[test]
    fn fg256_pads_two_digits() {
        assert_eq!(emit(|w| fg256(w, 42)), "\x1b[38;5;042m");
    }

    #[test]
    fn fg256_three_digits() {
        assert_eq!(emit(|w| fg256(w, 255)), "\x1b[38;5;255m");
    }

    #[test]
    fn fg256_sequences_have_fixed_length() {
        for idx in [0u8, 9, 99, 200] {
            assert_eq!(emit(|w| fg256(w, idx)).len(), 11);
        }
    }

    #[test]
    fn fg_default_is_white() {
        assert_eq!(emit(|w| fg_default(w)), "\x1b[37m");
    }
}
