// SPDX-License-Identifier: MIT

//! Percentage-based canvas coordinates.
//!
//! A [`Position`] names a point on the bordered frame as percentages of its
//! width and height, so a layout written once renders on any terminal size.
//! Both axes are clamped to `[-100, 100]` on every mutation: animation math
//! that overshoots (easing curves can exceed 1.0) lands on the edge instead
//! of failing.
//!
//! The `offset` is a row count added after the percentage conversion. Drawing
//! multi-line text bumps it once per line, which is how consecutive lines and
//! table rows stack under one anchor.
//!
//! [`Delta`] is the unclamped difference between two positions. Movement
//! interpolates over a `Delta` so a trip from −80% to +80% covers its full
//! 160 points; [`Position::distance_to`] clamps the difference like any
//! other position.

use std::fmt;

/// Lower bound of both axes.
pub const MIN_PERCENT: i32 = -100;
/// Upper bound of both axes.
pub const MAX_PERCENT: i32 = 100;

#[inline]
const fn clamp_percent(v: i32) -> i32 {
    if v < MIN_PERCENT {
        MIN_PERCENT
    } else if v > MAX_PERCENT {
        MAX_PERCENT
    } else {
        v
    }
}

#[inline]
#[allow(clippy::cast_possible_truncation)] // `as` saturates; inputs are percentages.
pub(crate) fn round_to_i32(v: f32) -> i32 {
    v.round() as i32
}

// ---------------------------------------------------------------------------
// Position
// ---------------------------------------------------------------------------

/// A point in percentage space plus a row offset.
///
/// ```
/// use n_anim::Position;
///
/// let p = Position::new(150, -200);
/// assert_eq!(p.xy(), (100, -100));
///
/// let q = Position::new(10, 20).add_distance(&Position::new(5, 15));
/// assert_eq!(q.xy(), (15, 35));
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    x: i32,
    y: i32,
    offset: i32,
}

impl Position {
    /// The top-left corner of the frame.
    pub const ORIGIN: Self = Self::new(0, 0);

    /// A position at `(x%, y%)`, clamped, with offset 0.
    #[inline]
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self {
            x: clamp_percent(x),
            y: clamp_percent(y),
            offset: 0,
        }
    }

    /// This position with its offset replaced.
    #[inline]
    #[must_use]
    pub const fn with_offset(mut self, offset: i32) -> Self {
        self.offset = offset;
        self
    }

    #[inline]
    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    #[inline]
    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }

    #[inline]
    #[must_use]
    pub const fn xy(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    #[inline]
    #[must_use]
    pub const fn offset(&self) -> i32 {
        self.offset
    }

    /// Set the horizontal percentage, clamped.
    pub const fn set_x(&mut self, x: i32) {
        self.x = clamp_percent(x);
    }

    /// Set the vertical percentage, clamped.
    pub const fn set_y(&mut self, y: i32) {
        self.y = clamp_percent(y);
    }

    /// Set both percentages, clamped.
    pub const fn set_xy(&mut self, x: i32, y: i32) {
        self.set_x(x);
        self.set_y(y);
    }

    // ── Offset ──────────────────────────────────────────────────────────

    /// Move one row down. Returns `self` for chaining.
    pub const fn increment_offset(&mut self) -> &mut Self {
        self.offset += 1;
        self
    }

    pub const fn reset_offset(&mut self) -> &mut Self {
        self.offset = 0;
        self
    }

    pub const fn set_offset(&mut self, offset: i32) -> &mut Self {
        self.offset = offset;
        self
    }

    // ── Arithmetic ──────────────────────────────────────────────────────

    /// `other − self` as a (clamped) position with offset 0.
    #[must_use]
    pub const fn distance_to(&self, other: &Self) -> Self {
        Self::new(other.x - self.x, other.y - self.y)
    }

    /// `self + other`, clamped, keeping `self`'s offset.
    #[must_use]
    pub const fn add_distance(&self, other: &Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y).with_offset(self.offset)
    }

    /// Both axes scaled by `factor` and rounded, keeping the offset.
    #[must_use]
    pub fn multiply_with(&self, factor: f32) -> Self {
        #[allow(clippy::cast_precision_loss)] // |x|, |y| <= 100
        let (x, y) = (self.x as f32 * factor, self.y as f32 * factor);
        Self::new(round_to_i32(x), round_to_i32(y)).with_offset(self.offset)
    }

    /// The exact difference `other − self`.
    #[must_use]
    pub const fn delta_to(&self, other: &Self) -> Delta {
        Delta {
            dx: other.x - self.x,
            dy: other.y - self.y,
        }
    }

    /// `self + delta`, clamped, keeping the offset.
    #[must_use]
    pub const fn translate(&self, delta: Delta) -> Self {
        Self::new(self.x.saturating_add(delta.dx), self.y.saturating_add(delta.dy))
            .with_offset(self.offset)
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Pos({}%, {}%)+{}", self.x, self.y, self.offset)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}%, {}%)+{}", self.x, self.y, self.offset)
    }
}

// ---------------------------------------------------------------------------
// Delta
// ---------------------------------------------------------------------------

/// An unclamped difference between two positions, in percentage points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Delta {
    pub dx: i32,
    pub dy: i32,
}

impl Delta {
    #[inline]
    #[must_use]
    pub const fn new(dx: i32, dy: i32) -> Self {
        Self { dx, dy }
    }

    /// Both components scaled by `factor` and rounded.
    #[must_use]
    pub fn scale(self, factor: f32) -> Self {
        #[allow(clippy::cast_precision_loss)] // |dx|, |dy| <= 200
        let (dx, dy) = (self.dx as f32 * factor, self.dy as f32 * factor);
        Self {
            dx: round_to_i32(dx),
            dy: round_to_i32(dy),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    #[test]
    fn new_clamps_both_axes() {
        let p = Position::new(150, -200);
        assert_eq!(p.xy(), (100, -100));
        assert_eq!(p.offset(), 0);
    }

    #[test]
    fn setters_clamp() {
        let mut p = Position::ORIGIN;
        p.set_x(101);
        assert_eq!(p.x(), 100);
        p.set_y(-101);
        assert_eq!(p.y(), -100);
        p.set_xy(42, -7);
        assert_eq!(p.xy(), (42, -7));
    }

    #[test]
    fn distance_to_example() {
        let d = Position::new(10, 20).distance_to(&Position::new(30, 50));
        assert_eq!(d.xy(), (20, 30));
    }

    #[test]
    fn distance_to_clamps_large_deltas() {
        let d = Position::new(-80, 0).distance_to(&Position::new(80, 0));
        assert_eq!(d.x(), 100);
    }

    #[test]
    fn add_distance_keeps_left_offset() {
        let mut a = Position::new(10, 20);
        a.set_offset(3);
        let b = Position::new(5, 15).with_offset(9);
        let c = a.add_distance(&b);
        assert_eq!(c.xy(), (15, 35));
        assert_eq!(c.offset(), 3);
    }

    #[test]
    fn multiply_with_rounds() {
        assert_eq!(Position::new(10, 20).multiply_with(2.5).xy(), (25, 50));
        assert_eq!(Position::new(3, -3).multiply_with(0.5).xy(), (2, -2));
    }

    #[test]
    fn multiply_with_keeps_offset_and_clamps() {
        let p = Position::new(60, 10).with_offset(4).multiply_with(2.0);
        assert_eq!(p.xy(), (100, 20));
        assert_eq!(p.offset(), 4);
    }

    #[test]
    fn offset_operations() {
        let mut p = Position::new(1, 1);
        assert_eq!(p.offset(), 0);
        p.increment_offset();
        assert_eq!(p.offset(), 1);
        p.set_offset(5);
        assert_eq!(p.offset(), 5);
        p.reset_offset();
        assert_eq!(p.offset(), 0);
    }

    #[test]
    fn offset_operations_chain() {
        let mut p = Position::ORIGIN;
        p.increment_offset().increment_offset().increment_offset();
        assert_eq!(p.offset(), 3);
    }

    #[test]
    fn delta_is_unclamped() {
        let d = Position::new(-80, 90).delta_to(&Position::new(80, -90));
        assert_eq!(d, Delta::new(160, -180));
    }

    #[test]
    fn translate_by_scaled_delta() {
        let start = Position::new(-80, 0).with_offset(2);
        let d = start.delta_to(&Position::new(80, 0));
        let mid = start.translate(d.scale(0.5));
        assert_eq!(mid.xy(), (0, 0));
        assert_eq!(mid.offset(), 2);
        assert_eq!(start.translate(d).x(), 80);
    }

    #[test]
    fn translate_clamps_overshoot() {
        let p = Position::new(90, 0).translate(Delta::new(50, -500));
        assert_eq!(p.xy(), (100, -100));
    }

    #[test]
    fn display_and_debug() {
        let p = Position::new(5, -3).with_offset(2);
        assert_eq!(p.to_string(), "(5%, -3%)+2");
        assert_eq!(format!("{p:?}"), "Pos(5%, -3%)+2");
    }

    proptest! {
        #[test]
        fn new_always_in_range(x in any::<i32>(), y in any::<i32>()) {
            let p = Position::new(x, y);
            prop_assert_eq!(p.x(), x.clamp(MIN_PERCENT, MAX_PERCENT));
            prop_assert_eq!(p.y(), y.clamp(MIN_PERCENT, MAX_PERCENT));
        }

        #[test]
        fn setters_always_in_range(x in any::<i32>(), y in any::<i32>()) {
            let mut p = Position::ORIGIN;
            p.set_xy(x, y);
            prop_assert!((MIN_PERCENT..=MAX_PERCENT).contains(&p.x()));
            prop_assert!((MIN_PERCENT..=MAX_PERCENT).contains(&p.y()));
        }

        #[test]
        fn distance_is_antisymmetric(
            ax in -50i32..=50, ay in -50i32..=50,
            bx in -50i32..=50, by in -50i32..=50,
        ) {
            let a = Position::new(ax, ay);
            let b = Position::new(bx, by);
            let ab = a.distance_to(&b);
            let ba = b.distance_to(&a);
            prop_assert_eq!(ab.x(), -ba.x());
            prop_assert_eq!(ab.y(), -ba.y());
        }

        #[test]
        fn translate_by_full_delta_reaches_target(
            ax in -100i32..=100, ay in -100i32..=100,
            bx in -100i32..=100, by in -100i32..=100,
        ) {
            let a = Position::new(ax, ay);
            let b = Position::new(bx, by);
            prop_assert_eq!(a.translate(a.delta_to(&b)).xy(), b.xy());
        }
    }
}
