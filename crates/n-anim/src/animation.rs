// SPDX-License-Identifier: MIT

//! Animation descriptors.
//!
//! An [`Animation`] says how a timed draw call should unfold: which easing
//! curve, how long, which way a pattern expands, and whether colors shift
//! along the way. It carries no state; the same descriptor can drive any
//! number of concurrent calls.

use std::time::Duration;

use bitflags::bitflags;

use crate::easing::AnimationKind;

bitflags! {
    /// Color gradients applied while drawing.
    ///
    /// ```
    /// use n_anim::Gradient;
    ///
    /// let both = Gradient::VERTICAL | Gradient::HORIZONTAL;
    /// assert!(both.contains(Gradient::VERTICAL));
    /// assert!(Gradient::empty().is_empty());
    /// ```
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
    pub struct Gradient: u8 {
        /// Brighten with progress (patterns: along the expansion axis).
        const VERTICAL   = 0b0000_0001;
        /// Walk the color cube per text line.
        const HORIZONTAL = 0b0000_0010;
    }
}

/// Which way a pattern grows from its start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    #[default]
    Right,
    Left,
    Down,
    Up,
}

impl Direction {
    /// Unit step along the expansion axis, as `(dx, dy)`.
    #[must_use]
    pub const fn step(self) -> (i32, i32) {
        match self {
            Self::Right => (1, 0),
            Self::Left => (-1, 0),
            Self::Down => (0, 1),
            Self::Up => (0, -1),
        }
    }

    /// Unit step between consecutive text lines, as `(dx, dy)`.
    ///
    /// Lines stack perpendicular to the expansion: below each other for
    /// horizontal patterns, side by side for vertical ones.
    #[must_use]
    pub const fn line_step(self) -> (i32, i32) {
        match self {
            Self::Right | Self::Left => (0, 1),
            Self::Down | Self::Up => (1, 0),
        }
    }

    /// Whether the expansion runs along the width.
    #[must_use]
    pub const fn is_horizontal(self) -> bool {
        matches!(self, Self::Right | Self::Left)
    }
}

/// How a timed draw call unfolds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Animation {
    pub kind: AnimationKind,
    /// Total length in milliseconds. `0` draws once; negative is rejected
    /// by the calls that validate it.
    pub duration_ms: i64,
    pub direction: Direction,
    pub gradient: Gradient,
}

impl Animation {
    /// An animation of `kind` lasting `duration_ms`.
    #[must_use]
    pub const fn new(kind: AnimationKind, duration_ms: i64) -> Self {
        Self {
            kind,
            duration_ms,
            direction: Direction::Right,
            gradient: Gradient::empty(),
        }
    }

    /// Draw in a single pass, with the default curve.
    #[must_use]
    pub const fn instant() -> Self {
        Self::new(AnimationKind::Bouncy, 0)
    }

    #[must_use]
    pub const fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    #[must_use]
    pub const fn with_gradient(mut self, gradient: Gradient) -> Self {
        self.gradient = gradient;
        self
    }

    /// Whether any gradient flag is set.
    #[inline]
    #[must_use]
    pub const fn has_gradient(&self) -> bool {
        !self.gradient.is_empty()
    }

    /// Number of frames at a tick of `interval`: `duration / interval`.
    ///
    /// Intervals below one millisecond count as one. Negative durations
    /// yield zero frames.
    #[must_use]
    pub fn frames(&self, interval: Duration) -> i64 {
        let ms = i64::try_from(interval.as_millis()).unwrap_or(i64::MAX).max(1);
        self.duration_ms.max(0) / ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_is_instant_bouncy_rightward() {
        let a = Animation::default();
        assert_eq!(a, Animation::instant());
        assert_eq!(a.kind, AnimationKind::Bouncy);
        assert_eq!(a.direction, Direction::Right);
        assert!(!a.has_gradient());
    }

    #[test]
    fn builders_set_fields() {
        let a = Animation::new(AnimationKind::EaseIn, 900)
            .with_direction(Direction::Up)
            .with_gradient(Gradient::HORIZONTAL);
        assert_eq!(a.duration_ms, 900);
        assert_eq!(a.direction, Direction::Up);
        assert!(a.has_gradient());
        assert!(!a.gradient.contains(Gradient::VERTICAL));
    }

    #[test]
    fn frames_divides_by_interval() {
        let a = Animation::new(AnimationKind::EaseOut, 1000);
        assert_eq!(a.frames(Duration::from_millis(320)), 3);
        assert_eq!(a.frames(Duration::from_millis(30)), 33);
    }

    #[test]
    fn frames_guards_zero_interval_and_negative_duration() {
        assert_eq!(Animation::new(AnimationKind::EaseIn, 50).frames(Duration::ZERO), 50);
        assert_eq!(Animation::new(AnimationKind::EaseIn, -50).frames(Duration::from_millis(10)), 0);
    }

    #[test]
    fn direction_axes_are_perpendicular() {
        for d in [Direction::Right, Direction::Left, Direction::Down, Direction::Up] {
            let (sx, sy) = d.step();
            let (lx, ly) = d.line_step();
            assert_eq!(sx * lx + sy * ly, 0, "{d:?}");
            assert_eq!(d.is_horizontal(), sy == 0);
        }
    }
}
