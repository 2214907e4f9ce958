// SPDX-License-Identifier: MIT

//! The drawing API: percentage layout on top of the screen buffer.
//!
//! A [`UserInterface`] owns the screen buffer, the shared frame clock, and
//! the terminal sink. Drawing calls convert percentage positions into cells
//! of the *frame* (the terminal minus its border margins), paint glyphs into
//! the buffer, and return immediately. Timed calls ([`move_element`],
//! animated [`draw_pattern`]) block their caller, pacing themselves with the
//! draw loop's current tick interval.
//!
//! The canvas wraps: a cell computed past the right edge reappears on the
//! left, past the bottom on the top. Each axis wraps on its own dimension.
//!
//! All drawing takes `&self`. Share one interface across threads with an
//! `Arc`; concurrent draws to the same cell race with last-write-wins.
//!
//! [`move_element`]: UserInterface::move_element
//! [`draw_pattern`]: UserInterface::draw_pattern

use std::borrow::Cow;
use std::sync::Arc;
use std::time::Duration;

use n_term::ansi;
use n_term::output::OutputBuffer;
use n_term::{
    ColorCode, DrawLoop, FrameClock, LoopConfig, ScreenBuffer, Size, SizeProvider,
    TerminalOutput, TerminalSize, paint,
};
use tracing::{debug, warn};

use crate::animation::{Animation, Gradient};
use crate::error::{DrawError, Side};
use crate::position::{Position, round_to_i32};

/// Smallest terminal the canvas is designed for.
pub const MIN_SIZE: Size = Size::new(130, 33);

/// Largest border margin, in percent of the terminal.
pub const MAX_BORDER_PERCENT: i32 = 50;

/// Largest pattern expansion, in percent of the frame.
pub const MAX_EXPANSION_PERCENT: i32 = 200;

/// Palette steps per gradient level: one axis of the 6×6×6 color cube.
const CUBE_STRIDE: i32 = 36;

/// Gradient levels a move or pattern walks through.
const GRADIENT_LEVELS: f32 = 5.0;

// ─── Config ──────────────────────────────────────────────────────────────────

/// Settings for a [`UserInterface`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiConfig {
    /// Draw loop tick intervals. The slow interval is also the clock's
    /// starting value.
    pub loop_config: LoopConfig,
    /// Below this size an advisory is printed at startup.
    pub min_size: Size,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            loop_config: LoopConfig::default(),
            min_size: MIN_SIZE,
        }
    }
}

/// Absolute border margins, in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Borders {
    pub left: i32,
    pub right: i32,
    pub top: i32,
    pub bottom: i32,
}

// ─── UserInterface ───────────────────────────────────────────────────────────

/// A percentage-addressed canvas over one terminal.
///
/// ```
/// use std::sync::Arc;
/// use n_anim::{Position, UiConfig, UserInterface};
/// use n_term::{ColorCode, FixedSize, Size, TerminalOutput};
///
/// let (output, _capture) = TerminalOutput::capture();
/// let ui = UserInterface::with_backend(
///     UiConfig::default(),
///     Arc::new(FixedSize(Size::new(200, 50))),
///     output,
/// );
///
/// let mut pos = Position::new(50, 50);
/// let row = ui.draw_element(&mut pos, "hello\nworld", ColorCode::GREEN);
/// assert_eq!(row, 26);
/// assert_eq!(pos.offset(), 2);
/// ```
pub struct UserInterface {
    screen: Arc<ScreenBuffer>,
    clock: FrameClock,
    output: TerminalOutput,
    size_provider: Arc<dyn SizeProvider>,
    borders: Borders,
    config: UiConfig,
}

impl UserInterface {
    /// A canvas over the real terminal, writing to stdout.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(UiConfig::default())
    }

    /// Like [`new`](Self::new) with custom settings.
    #[must_use]
    pub fn with_config(config: UiConfig) -> Self {
        Self::with_backend(config, Arc::new(TerminalSize), TerminalOutput::stdout())
    }

    /// A canvas with an explicit size source and output sink.
    ///
    /// Probes the size once to build the screen buffer. If it is below
    /// `config.min_size`, clears the screen and writes an advisory to
    /// `output`, then carries on.
    #[must_use]
    pub fn with_backend(
        config: UiConfig,
        size_provider: Arc<dyn SizeProvider>,
        output: TerminalOutput,
    ) -> Self {
        let size = size_provider.size();
        if size.is_below(config.min_size) {
            warn!(
                cols = size.cols,
                rows = size.rows,
                min_cols = config.min_size.cols,
                min_rows = config.min_size.rows,
                "terminal smaller than recommended"
            );
            let mut buf = OutputBuffer::new();
            let _ = ansi::clear_screen(&mut buf);
            buf.push_str(&advisory(size, config.min_size));
            let _ = output.write_buffer(&mut buf);
        }

        Self {
            screen: Arc::new(ScreenBuffer::with_size(size)),
            clock: FrameClock::new(config.loop_config.slow_interval),
            output,
            size_provider,
            borders: Borders::default(),
            config,
        }
    }

    // ── Accessors ───────────────────────────────────────────────────────

    /// The shared screen buffer.
    #[must_use]
    pub const fn screen(&self) -> &Arc<ScreenBuffer> {
        &self.screen
    }

    /// The clock timed calls pace themselves with. The draw loop sets it.
    #[must_use]
    pub const fn clock(&self) -> &FrameClock {
        &self.clock
    }

    /// The current tick interval, as set by the draw loop.
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        self.clock.get()
    }

    /// Terminal size the screen buffer was built for.
    #[must_use]
    pub fn terminal_size(&self) -> Size {
        self.screen.size()
    }

    #[must_use]
    pub const fn borders(&self) -> Borders {
        self.borders
    }

    #[must_use]
    pub const fn config(&self) -> &UiConfig {
        &self.config
    }

    fn width(&self) -> i32 {
        i32::from(self.terminal_size().cols)
    }

    fn height(&self) -> i32 {
        i32::from(self.terminal_size().rows)
    }

    // ── Borders ─────────────────────────────────────────────────────────

    /// Reserve `percent` of the terminal width on the left.
    ///
    /// # Errors
    ///
    /// [`DrawError::BorderOutOfRange`] unless `0 <= percent <= 50`.
    pub fn set_border_left(&mut self, percent: i32) -> Result<(), DrawError> {
        check_border(Side::Left, percent)?;
        self.borders.left = self.percent_to_absolute_width(percent);
        Ok(())
    }

    /// Reserve `percent` of the terminal width on the right.
    ///
    /// # Errors
    ///
    /// [`DrawError::BorderOutOfRange`] unless `0 <= percent <= 50`.
    pub fn set_border_right(&mut self, percent: i32) -> Result<(), DrawError> {
        check_border(Side::Right, percent)?;
        self.borders.right = self.percent_to_absolute_width(percent);
        Ok(())
    }

    /// Reserve `percent` of the terminal height at the top.
    ///
    /// # Errors
    ///
    /// [`DrawError::BorderOutOfRange`] unless `0 <= percent <= 50`.
    pub fn set_border_top(&mut self, percent: i32) -> Result<(), DrawError> {
        check_border(Side::Top, percent)?;
        self.borders.top = self.percent_to_absolute_height(percent);
        Ok(())
    }

    /// Reserve `percent` of the terminal height at the bottom.
    ///
    /// # Errors
    ///
    /// [`DrawError::BorderOutOfRange`] unless `0 <= percent <= 50`.
    pub fn set_border_bottom(&mut self, percent: i32) -> Result<(), DrawError> {
        check_border(Side::Bottom, percent)?;
        self.borders.bottom = self.percent_to_absolute_height(percent);
        Ok(())
    }

    /// Left and right borders at once. Nothing changes on error.
    ///
    /// # Errors
    ///
    /// [`DrawError::BorderOutOfRange`] unless `0 <= percent <= 50`.
    pub fn set_border_sides(&mut self, percent: i32) -> Result<(), DrawError> {
        self.set_border_left(percent)?;
        self.set_border_right(percent)
    }

    /// Top and bottom borders at once. Nothing changes on error.
    ///
    /// # Errors
    ///
    /// [`DrawError::BorderOutOfRange`] unless `0 <= percent <= 50`.
    pub fn set_border_top_bottom(&mut self, percent: i32) -> Result<(), DrawError> {
        self.set_border_top(percent)?;
        self.set_border_bottom(percent)
    }

    /// All four borders at once. Nothing changes on error.
    ///
    /// # Errors
    ///
    /// [`DrawError::BorderOutOfRange`] unless `0 <= percent <= 50`.
    pub fn set_border(&mut self, percent: i32) -> Result<(), DrawError> {
        self.set_border_sides(percent)?;
        self.set_border_top_bottom(percent)
    }

    // ── Conversions ─────────────────────────────────────────────────────

    /// `percent` of the full terminal width, in cells.
    #[must_use]
    pub fn percent_to_absolute_width(&self, percent: i32) -> i32 {
        self.width() * percent / 100
    }

    /// `percent` of the full terminal height, in cells.
    #[must_use]
    pub fn percent_to_absolute_height(&self, percent: i32) -> i32 {
        self.height() * percent / 100
    }

    /// Width of the frame inside the borders.
    #[must_use]
    pub fn frame_width(&self) -> i32 {
        self.width() - self.borders.left - self.borders.right
    }

    /// Height of the frame inside the borders.
    #[must_use]
    pub fn frame_height(&self) -> i32 {
        self.height() - self.borders.top - self.borders.bottom
    }

    /// `percent` of the frame width, in cells.
    #[must_use]
    pub fn percent_to_absolute_width_in_frame(&self, percent: i32) -> i32 {
        self.frame_width() * percent / 100
    }

    /// `percent` of the frame height, in cells.
    #[must_use]
    pub fn percent_to_absolute_height_in_frame(&self, percent: i32) -> i32 {
        self.frame_height() * percent / 100
    }

    /// Terminal column of the frame's `percent` x coordinate.
    #[must_use]
    pub fn percent_to_absolute_x_position(&self, percent: i32) -> i32 {
        self.percent_to_absolute_width_in_frame(percent) + self.borders.left
    }

    /// Terminal row of the frame's `percent` y coordinate.
    #[must_use]
    pub fn percent_to_absolute_y_position(&self, percent: i32) -> i32 {
        self.percent_to_absolute_height_in_frame(percent) + self.borders.top
    }

    // ── Drawing ─────────────────────────────────────────────────────────

    /// Paint one cell, wrapping both coordinates onto the terminal.
    fn put(&self, x: i32, y: i32, glyph: char, color: ColorCode) -> Option<i32> {
        let x = wrap(x, self.width())?;
        let y = wrap(y, self.height())?;
        let mut utf8 = [0u8; 4];
        self.screen.set_pixel(x, y, &paint(glyph.encode_utf8(&mut utf8), color));
        Some(y)
    }

    /// Draw `text` with its top-left corner at `pos`.
    ///
    /// One trailing newline is ignored; each remaining line goes on its own
    /// row, and `pos`'s offset advances once per line. Line `k` is painted
    /// with `color` shifted by `k` palette steps. Drawing with
    /// [`ColorCode::BLANK`] writes spaces over the same footprint, which is
    /// how animations erase their previous frame.
    ///
    /// Returns the last terminal row written, or `-1` if nothing was.
    pub fn draw_element(&self, pos: &mut Position, text: &str, color: ColorCode) -> i32 {
        let x = self.percent_to_absolute_x_position(pos.x());
        let mut last_row = -1;

        for (k, line) in lines(text, color.is_blank()).enumerate() {
            let y = self
                .percent_to_absolute_y_position(pos.y())
                .saturating_add(pos.offset());
            let line_color = color.shifted(to_i32(k));
            for (l, glyph) in line.chars().enumerate() {
                if let Some(row) = self.put(x.saturating_add(to_i32(l)), y, glyph, line_color) {
                    last_row = row;
                }
            }
            pos.increment_offset();
        }
        last_row
    }

    /// Draw `texts` side by side, starting new rows as columns run out.
    ///
    /// Element `k` goes to column `positions[k % n]` (a percentage added to
    /// `pos.x`) on row `pos.offset + k / n`, where `n = positions.len()`.
    /// Colors cycle through `colors`; an empty slice uses the default color.
    /// `pos` itself is not modified.
    ///
    /// Returns the largest row written, or `-1` if nothing was (including
    /// when `positions` is empty).
    pub fn draw_elements_horizontal<S: AsRef<str>>(
        &self,
        pos: &Position,
        texts: &[S],
        positions: &[i32],
        colors: &[ColorCode],
    ) -> i32 {
        let n = positions.len();
        if n == 0 {
            return -1;
        }

        texts
            .iter()
            .enumerate()
            .map(|(k, text)| {
                let color = if colors.is_empty() {
                    ColorCode::default()
                } else {
                    colors[k % colors.len()]
                };
                let mut at = pos
                    .with_offset(pos.offset().saturating_add(to_i32(k / n)))
                    .add_distance(&Position::new(positions[k % n], 0));
                self.draw_element(&mut at, text.as_ref(), color)
            })
            .fold(-1, i32::max)
    }

    /// Draw `rows` as a table: each row via
    /// [`draw_elements_horizontal`](Self::draw_elements_horizontal), then
    /// `pos`'s offset advances by one.
    ///
    /// Returns the largest row written, or `-1` if nothing was.
    pub fn draw_table<R, S>(
        &self,
        pos: &mut Position,
        rows: &[R],
        positions: &[i32],
        colors: &[ColorCode],
    ) -> i32
    where
        R: AsRef<[S]>,
        S: AsRef<str>,
    {
        let mut last_row = -1;
        for row in rows {
            last_row = last_row.max(self.draw_elements_horizontal(
                pos,
                row.as_ref(),
                positions,
                colors,
            ));
            pos.increment_offset();
        }
        last_row
    }

    /// Slide `text` from `start` to `end`, blocking until it arrives.
    ///
    /// Runs `duration / tick` frames (read once, up front). Each frame
    /// erases the text at its previous spot, draws it at the eased
    /// position, then sleeps one *current* tick. With any gradient flag the
    /// color brightens along the way: `color + 36 × round(5 × progress)`.
    ///
    /// # Errors
    ///
    /// Fails without drawing anything if either position is missing, `text`
    /// is empty, or the duration is negative.
    pub fn move_element(
        &self,
        start: impl Into<Option<Position>>,
        end: impl Into<Option<Position>>,
        text: &str,
        color: ColorCode,
        animation: &Animation,
    ) -> Result<(), DrawError> {
        let start = start.into().ok_or(DrawError::MissingStart)?;
        let end = end.into().ok_or(DrawError::MissingEnd)?;
        if text.is_empty() {
            return Err(DrawError::EmptyText);
        }
        if animation.duration_ms < 0 {
            return Err(DrawError::NegativeDuration(animation.duration_ms));
        }

        let frames = animation.frames(self.clock.get());
        let delta = start.delta_to(&end);
        debug!(%start, %end, frames, "move element");

        let mut progress = 0.0;
        for i in 0..=frames {
            self.draw_element(
                &mut start.translate(delta.scale(progress)),
                text,
                ColorCode::BLANK,
            );

            progress = animation.kind.progress(0, frames, i);
            let frame_color = if animation.has_gradient() {
                color.shifted(CUBE_STRIDE * round_to_i32(GRADIENT_LEVELS * progress))
            } else {
                color
            };
            self.draw_element(&mut start.translate(delta.scale(progress)), text, frame_color);

            self.clock.sleep();
        }
        Ok(())
    }

    /// Grow a pattern from `start` by `expansion` percent of the frame.
    ///
    /// The first character of each line of `text` is stamped along the
    /// direction of `animation`, one cell per step; the lines sit side by
    /// side, perpendicular to the growth. With a vertical gradient the color
    /// brightens toward the far end; with a horizontal one each line walks
    /// the color cube (`color + 36k`, mod 255). A positive duration animates
    /// the growth itself. Blocks for at least one tick.
    ///
    /// Returns the largest row touched before wrapping, or `None` (with
    /// nothing drawn) if `start` is missing, `expansion` is outside
    /// `0..=200`, or `text` is empty.
    pub fn draw_pattern(
        &self,
        start: impl Into<Option<Position>>,
        expansion: i32,
        text: &str,
        color: ColorCode,
        animation: &Animation,
    ) -> Option<i32> {
        let Some(start) = start.into() else {
            debug!("pattern rejected: missing start");
            return None;
        };
        if !(0..=MAX_EXPANSION_PERCENT).contains(&expansion) {
            debug!(expansion, "pattern rejected: expansion out of range");
            return None;
        }
        if text.is_empty() {
            debug!("pattern rejected: empty text");
            return None;
        }

        let glyphs: Vec<Option<char>> = lines(text, false).map(|l| l.chars().next()).collect();
        let origin = (
            self.percent_to_absolute_x_position(start.x()),
            self.percent_to_absolute_y_position(start.y())
                .saturating_add(start.offset()),
        );

        if animation.duration_ms <= 0 {
            let last_row = self.pattern_pass(origin, &glyphs, expansion, color, animation);
            self.clock.sleep();
            return last_row;
        }

        let frames = animation.frames(self.clock.get());
        let mut last_row = None;
        for i in 0..=frames {
            let progress = animation.kind.progress(0, frames, i);
            #[allow(clippy::cast_precision_loss)] // expansion <= 200
            let reach = round_to_i32(expansion as f32 * progress);
            last_row = last_row.max(self.pattern_pass(origin, &glyphs, reach, color, animation));
            self.clock.sleep();
        }
        last_row
    }

    /// Stamp the pattern out to `percent` of the frame once.
    fn pattern_pass(
        &self,
        (x0, y0): (i32, i32),
        glyphs: &[Option<char>],
        percent: i32,
        color: ColorCode,
        animation: &Animation,
    ) -> Option<i32> {
        let direction = animation.direction;
        let reach = if direction.is_horizontal() {
            self.percent_to_absolute_width_in_frame(percent)
        } else {
            self.percent_to_absolute_height_in_frame(percent)
        };
        let (sx, sy) = direction.step();
        let (lx, ly) = direction.line_step();

        let mut last_row = None;
        for step in 0..=reach {
            let eased = animation
                .kind
                .progress(0, i64::from(reach), i64::from(step));
            let base = if animation.gradient.contains(Gradient::VERTICAL) {
                color.shifted(gradient_level(eased))
            } else {
                color
            };

            for (k, glyph) in glyphs.iter().enumerate() {
                let Some(glyph) = *glyph else {
                    continue;
                };
                let k = to_i32(k);
                let x = x0 + sx * step + lx * k;
                let y = y0 + sy * step + ly * k;
                let line_color =
                    if animation.gradient.contains(Gradient::HORIZONTAL) && base.is_palette() {
                        ColorCode((base.value() + CUBE_STRIDE * k).rem_euclid(255))
                    } else {
                        base
                    };
                self.put(x, y, glyph, line_color);
                last_row = last_row.max(Some(y));
            }
        }
        last_row
    }

    // ── Screen ──────────────────────────────────────────────────────────

    /// Blank the canvas and the terminal.
    ///
    /// The buffer is rebuilt from a fresh size probe (all blank, all dirty)
    /// no matter what; clearing the terminal itself is best effort.
    pub fn clear_screen(&self) {
        let size = self.size_provider.size();
        self.screen.reinit(size.cols, size.rows);

        let mut buf = OutputBuffer::new();
        let _ = ansi::clear_screen(&mut buf);
        if let Err(err) = self.output.write_buffer(&mut buf) {
            debug!(%err, "terminal clear failed");
        }
    }

    /// Start rendering the top `percent_height` percent of the terminal.
    ///
    /// `percent_height` is clamped to `0..=100`. Stop the loop with
    /// [`DrawLoop::shutdown`] (or by dropping it) to restore the cursor.
    #[must_use]
    pub fn start_draw_loop(&self, percent_height: i32) -> DrawLoop {
        let size = self.terminal_size();
        let percent = percent_height.clamp(0, 100);
        let rows = i32::from(size.rows) * percent / 100;
        let area = Size::new(size.cols, u16::try_from(rows).unwrap_or(size.rows));

        DrawLoop::spawn(
            Arc::clone(&self.screen),
            self.clock.clone(),
            self.output.clone(),
            area,
            self.config.loop_config,
        )
    }
}

impl Default for UserInterface {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for UserInterface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserInterface")
            .field("size", &self.terminal_size())
            .field("borders", &self.borders)
            .field("tick", &self.clock.get())
            .finish_non_exhaustive()
    }
}

// ─── Helpers ─────────────────────────────────────────────────────────────────

const fn check_border(side: Side, percent: i32) -> Result<(), DrawError> {
    if percent < 0 || percent > MAX_BORDER_PERCENT {
        return Err(DrawError::BorderOutOfRange { side, percent });
    }
    Ok(())
}

/// Gradient level reached at `progress`, truncated: a pattern only hits the
/// brightest level on its final cell.
#[inline]
#[allow(clippy::cast_possible_truncation)] // `as` saturates; progress is near [0, 1].
fn gradient_level(progress: f32) -> i32 {
    (GRADIENT_LEVELS * progress) as i32
}

/// `v` wrapped into `0..len`, or `None` for an empty axis.
#[inline]
fn wrap(v: i32, len: i32) -> Option<i32> {
    (len > 0).then(|| v.rem_euclid(len))
}

#[inline]
fn to_i32(v: usize) -> i32 {
    i32::try_from(v).unwrap_or(i32::MAX)
}

/// The lines of `text` without one trailing newline. With `blank`, each
/// line becomes as many spaces as it has characters.
fn lines(text: &str, blank: bool) -> impl Iterator<Item = Cow<'_, str>> {
    text.strip_suffix('\n')
        .unwrap_or(text)
        .split('\n')
        .map(move |line| {
            if blank {
                Cow::Owned(" ".repeat(line.chars().count()))
            } else {
                Cow::Borrowed(line)
            }
        })
}

fn advisory(current: Size, min: Size) -> String {
    format!(
        "You should use the UI in a terminal with a resolution bigger than:\n\
         {} columns X {} rows\n\
         Your current resolution is {} columns X {} rows\n\
         In- or decrease your terminal's zoom to fit the canvas onto your screen.\n\
         For optimal content presentation set your terminal into fullscreen mode.\n",
        min.cols,
        min.rows,
        paint(&current.cols.to_string(), ColorCode::PATTERN_LIME),
        paint(&current.rows.to_string(), ColorCode::PATTERN_LIME),
    )
}

// ─── Tests ───────────────────────────────────────────────────────────────────
