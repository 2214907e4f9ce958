// SPDX-License-Identifier: MIT
//
// Color codes — the canvas's single integer color vocabulary.
//
// Every drawing call carries one `ColorCode`. Values 0–255 are indices into
// the terminal's 256-color palette. A handful of values above the palette
// are sentinels with special meaning: reset styling, clear the line, pick a
// random grey or a random color, render blank, or leave already-colored
// text untouched. Anything else falls back to plain white.
//
// Keeping colors as integers (rather than an enum) is deliberate for the
// animation math: gradients are expressed as palette arithmetic, e.g.
// `color + 36 * step` walks the 6×6×6 color cube along one axis. Arithmetic
// that leaves the palette lands on the white fallback instead of failing.

use std::fmt;
use std::io;

use rand::Rng;

use crate::ansi;

// ─── ColorCode ───────────────────────────────────────────────────────────────

/// A palette index (0–255) or one of the sentinel codes (500–505).
///
/// # Examples
///
/// ```
/// use n_term::color::{paint, ColorCode};
///
/// assert_eq!(paint("Hello", ColorCode::RED), "\x1b[38;5;001mHello\x1b[0m");
/// assert_eq!(paint("Hello", ColorCode::BLANK), "Hello");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct ColorCode(pub i32);

impl ColorCode {
    // ─── Palette ─────────────────────────────────────────────────────────

    pub const BLACK: Self = Self(0);
    pub const RED: Self = Self(1);
    pub const GREEN: Self = Self(2);
    pub const YELLOW: Self = Self(3);
    pub const BLUE: Self = Self(4);
    pub const VIOLET: Self = Self(5);
    pub const WHITE: Self = Self(7);
    pub const DARK_BLUE: Self = Self(17);
    pub const TERMINAL_GREEN: Self = Self(112);
    pub const RED2: Self = Self(160);
    pub const PINK: Self = Self(177);
    pub const ORANGE: Self = Self(202);
    pub const GREY: Self = Self(231);
    pub const LIGHT_GREY: Self = Self(234);

    // Gradient starting points. Adding multiples of 36 to these walks the
    // color cube, which is how vertical/horizontal gradients are produced.

    pub const PATTERN_PASTEL: Self = Self(34);
    pub const PATTERN_SKYLIGHT: Self = Self(39);
    pub const PATTERN_MEADOWS1: Self = Self(40);
    pub const PATTERN_SPLIT_MEADOWS: Self = Self(42);
    pub const PATTERN_MEADOWS2: Self = Self(46);
    pub const PATTERN_NEON1: Self = Self(64);
    pub const PATTERN_NEON2: Self = Self(70);
    pub const PATTERN_BABY_STEPS1: Self = Self(74);
    pub const PATTERN_NEON3: Self = Self(76);
    pub const PATTERN_GREEN_FOUNDATION: Self = Self(77);
    pub const PATTERN_BABY_STEPS2: Self = Self(81);
    pub const PATTERN_LIME: Self = Self(82);
    pub const PATTERN_GOING_GREY1: Self = Self(100);
    pub const PATTERN_GOING_GREY2: Self = Self(101);
    pub const PATTERN_GOING_GREY3: Self = Self(102);
    pub const PATTERN_GOING_GREY4: Self = Self(103);
    pub const PATTERN_GOING_GREY5: Self = Self(104);
    pub const PATTERN_GOING_GREY6: Self = Self(105);
    pub const PATTERN_GREY: Self = Self(106);

    // ─── Sentinels ───────────────────────────────────────────────────────

    /// Reset all styling (SGR 0).
    pub const RESET: Self = Self(500);
    /// Return to column 0 and erase the line.
    pub const RESET_LINE: Self = Self(501);
    /// A random greyscale palette entry, chosen per call.
    pub const RANDOM_GREY: Self = Self(502);
    /// A random palette entry, chosen per call.
    pub const RANDOM: Self = Self(503);
    /// Render as invisible: text passes through unwrapped (drawers replace
    /// glyphs with spaces).
    pub const BLANK: Self = Self(504);
    /// Text already carries its own escapes: pass through unwrapped.
    pub const ALREADY_COLORED: Self = Self(505);

    /// First greyscale entry used by [`RANDOM_GREY`](Self::RANDOM_GREY).
    const GREY_RAMP_START: u8 = 231;
    /// Number of greyscale entries [`RANDOM_GREY`](Self::RANDOM_GREY) picks from.
    const GREY_RAMP_LEN: u8 = 22;

    // ─── Queries ─────────────────────────────────────────────────────────

    /// The raw integer value.
    #[inline]
    #[must_use]
    pub const fn value(self) -> i32 {
        self.0
    }

    /// Whether this is a 256-color palette index.
    #[inline]
    #[must_use]
    pub const fn is_palette(self) -> bool {
        self.0 >= 0 && self.0 < 256
    }

    /// Whether [`paint`] returns text unchanged for this code.
    #[inline]
    #[must_use]
    pub const fn is_pass_through(self) -> bool {
        self.0 == Self::BLANK.0 || self.0 == Self::ALREADY_COLORED.0
    }

    /// Whether this is the blank sentinel.
    #[inline]
    #[must_use]
    pub const fn is_blank(self) -> bool {
        self.0 == Self::BLANK.0
    }

    // ─── Arithmetic ──────────────────────────────────────────────────────

    /// Shift a palette index by `by` steps.
    ///
    /// Sentinels are fixed points: shifting `BLANK` stays `BLANK`, so a
    /// multi-line erase never turns into visible colored spaces. A palette
    /// index shifted past 255 is kept as-is and renders with the white
    /// fallback.
    #[inline]
    #[must_use]
    pub const fn shifted(self, by: i32) -> Self {
        if self.is_palette() {
            Self(self.0.saturating_add(by))
        } else {
            self
        }
    }

    // ─── Output ──────────────────────────────────────────────────────────

    /// Write this code's control sequence to `w`.
    ///
    /// Pass-through sentinels and unknown values both produce the white
    /// fallback here; [`paint`] is where pass-through is honored.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to `w` fails.
    pub fn write_sequence(self, w: &mut impl io::Write) -> io::Result<()> {
        match self.0 {
            #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
            code @ 0..=255 => ansi::fg256(w, code as u8),
            500 => ansi::reset(w),
            501 => ansi::clear_line(w),
            502 => {
                let offset = rand::thread_rng().gen_range(0..Self::GREY_RAMP_LEN);
                ansi::fg256(w, Self::GREY_RAMP_START + offset)
            }
            503 => ansi::fg256(w, rand::thread_rng().gen_range(0..255)),
            _ => ansi::fg_default(w),
        }
    }

    /// This code's control sequence as a string.
    #[must_use]
    pub fn control_sequence(self) -> String {
        let mut buf = Vec::with_capacity(16);
        // Writing into a Vec cannot fail.
        let _ = self.write_sequence(&mut buf);
        String::from_utf8(buf).unwrap_or_default()
    }
}

impl From<i32> for ColorCode {
    #[inline]
    fn from(value: i32) -> Self {
        Self(value)
    }
}

impl From<u8> for ColorCode {
    #[inline]
    fn from(value: u8) -> Self {
        Self(i32::from(value))
    }
}

impl fmt::Debug for ColorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::RESET => f.write_str("ColorCode::RESET"),
            Self::RESET_LINE => f.write_str("ColorCode::RESET_LINE"),
            Self::RANDOM_GREY => f.write_str("ColorCode::RANDOM_GREY"),
            Self::RANDOM => f.write_str("ColorCode::RANDOM"),
            Self::BLANK => f.write_str("ColorCode::BLANK"),
            Self::ALREADY_COLORED => f.write_str("ColorCode::ALREADY_COLORED"),
            Self(code) => write!(f, "ColorCode({code})"),
        }
    }
}

// ─── paint ───────────────────────────────────────────────────────────────────

/// Wrap `text` between `code`'s control sequence and a reset.
///
/// `BLANK` and `ALREADY_COLORED` return `text` unchanged.
#[must_use]
pub fn paint(text: &str, code: ColorCode) -> String {
    if code.is_pass_through() {
        return text.to_owned();
    }
    let mut buf = Vec::with_capacity(text.len() + 16);
    let _ = code.write_sequence(&mut buf);
    buf.extend_from_slice(text.as_bytes());
    let _ = ansi::reset(&mut buf);
    String::from_utf8(buf).unwrap_or_default()
}

// ─── Tests ───────────────────────────────────────────────────────────────────
