// SPDX-License-Identifier: MIT
//
// Terminal queries — size probing and panic-safe cursor restore.
//
// Safety: This module necessarily uses `unsafe` for ioctl (TIOCGWINSZ) and
// a raw fd write in the panic hook. These are the standard POSIX interfaces;
// there is no safe alternative. Each unsafe block is minimal.
#![allow(unsafe_code)]
//
// The canvas only needs two things from the OS: how big the terminal is,
// and a guarantee that a hidden cursor comes back if something panics while
// the draw loop runs. Size detection sits behind the `SizeProvider` trait so
// the engine can run headless (tests, recordings) with a fixed size.

use std::sync::Once;

// ─── Size ───────────────────────────────────────────────────────────────────

/// Terminal dimensions in character cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Size {
    /// Number of columns (width in character cells).
    pub cols: u16,
    /// Number of rows (height in character cells).
    pub rows: u16,
}

impl Size {
    /// Used when the terminal cannot be queried (pipes, CI, tests).
    pub const FALLBACK: Self = Self { cols: 80, rows: 24 };

    /// Create a size from columns and rows.
    #[inline]
    #[must_use]
    pub const fn new(cols: u16, rows: u16) -> Self {
        Self { cols, rows }
    }

    /// Whether either dimension is smaller than `min`'s.
    #[inline]
    #[must_use]
    pub const fn is_below(self, min: Self) -> bool {
        self.cols < min.cols || self.rows < min.rows
    }
}

// ─── Terminal Queries ───────────────────────────────────────────────────────

/// Query the current terminal size via `ioctl(TIOCGWINSZ)`.
///
/// Returns `None` if stdout is not a terminal or the query fails.
#[cfg(unix)]
#[must_use]
pub fn get_size() -> Option<Size> {
    let mut ws: libc::winsize = unsafe { std::mem::zeroed() };
    let result = unsafe { libc::ioctl(libc::STDOUT_FILENO, libc::TIOCGWINSZ, &mut ws) };

    if result == 0 && ws.ws_col > 0 && ws.ws_row > 0 {
        Some(Size {
            cols: ws.ws_col,
            rows: ws.ws_row,
        })
    } else {
        None
    }
}

#[cfg(not(unix))]
#[must_use]
pub fn get_size() -> Option<Size> {
    None
}

// ─── SizeProvider ───────────────────────────────────────────────────────────

/// Source of terminal dimensions.
///
/// The engine reads the size when the screen buffer is created and again
/// when it is cleared; it never tracks live resizes.
pub trait SizeProvider: Send + Sync {
    /// Current terminal size. Must not fail: fall back to a default instead.
    fn size(&self) -> Size;
}

/// The real terminal, queried through `ioctl`.
///
/// Falls back to [`Size::FALLBACK`] (80×24) when detection fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalSize;

impl SizeProvider for TerminalSize {
    fn size(&self) -> Size {
        get_size().unwrap_or(Size::FALLBACK)
    }
}

/// A constant size, for headless rendering and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedSize(pub Size);

impl SizeProvider for FixedSize {
    fn size(&self) -> Size {
        self.0
    }
}

// ─── Panic-Safe Cursor Restore ──────────────────────────────────────────────

/// Restore sequence for emergency use: reset SGR attributes, show cursor.
const EMERGENCY_RESTORE: &[u8] = b"\x1b[0m\x1b[?25h";

/// Panic hook guard — ensures the hook is installed at most once per process.
static PANIC_HOOK_INSTALLED: Once = Once::new();

/// Install a panic hook that restores the cursor before printing the error.
///
/// The draw loop hides the cursor for its whole lifetime. A panic on any
/// thread would otherwise leave the user's shell without a visible cursor.
/// The hook writes [`EMERGENCY_RESTORE`] directly to fd 1 (bypassing Rust's
/// stdout lock, which a panicking frame flush may hold), then delegates to
/// the original hook.
pub fn install_panic_hook() {
    PANIC_HOOK_INSTALLED.call_once(|| {
        let original = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            emergency_restore();
            original(info);
        }));
    });
}

/// Write the restore sequence directly to stdout's file descriptor.
fn emergency_restore() {
    #[cfg(unix)]
    unsafe {
        let _ = libc::write(
            libc::STDOUT_FILENO,
            EMERGENCY_RESTORE.as_ptr().cast::<libc::c_void>(),
            EMERGENCY_RESTORE.len(),
        );
    }

    #[cfg(not(unix))]
    {
        use std::io::Write;
        let _ = std::io::stdout().write_all(EMERGENCY_RESTORE);
        let _ = std::io::stdout().flush();
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    // ── Size ──────────────────────────────────────────────────────────

    #[test]
    fn size_is_below_either_axis() {
        let min = Size::new(130, 33);
        assert!(Size::new(80, 24).is_below(min));
        assert!(Size::new(200, 20).is_below(min));
        assert!(Size::new(100, 50).is_below(min));
        assert!(!Size::new(130, 33).is_below(min));
        assert!(!Size::new(200, 60).is_below(min));
    }

    #[test]
    fn fallback_is_80x24() {
        assert_eq!(Size::FALLBACK, Size::new(80, 24));
    }

    // ── Providers ─────────────────────────────────────────────────────

    #[test]
    fn get_size_does_not_panic() {
        let _ = get_size();
    }

    #[test]
    fn terminal_size_is_never_zero() {
        let s = TerminalSize.size();
        assert!(s.cols > 0);
        assert!(s.rows > 0);
    }

    #[test]
    fn fixed_size_returns_its_value() {
        let provider = FixedSize(Size::new(120, 40));
        assert_eq!(provider.size(), Size::new(120, 40));
    }

    #[test]
    fn providers_are_object_safe() {
        let providers: Vec<Box<dyn SizeProvider>> =
            vec![Box::new(TerminalSize), Box::new(FixedSize(Size::FALLBACK))];
        for p in &providers {
            let s = p.size();
            assert!(s.cols > 0 && s.rows > 0);
        }
    }

    // ── Emergency restore ─────────────────────────────────────────────

    #[test]
    fn emergency_restore_shows_cursor_last() {
        let s = std::str::from_utf8(EMERGENCY_RESTORE).unwrap();
        assert!(s.starts_with("\x1b[0m"));
        assert!(s.ends_with("\x1b[?25h"));
    }

    #[test]
    fn install_panic_hook_is_idempotent() {
        install_panic_hook();
        install_panic_hook();
    }
}
