// SPDX-License-Identifier: MIT

//! Easing curves.
//!
//! Every animation step asks a curve how far along it should be. Curves are
//! cubic Béziers through `(0, 0)` and `(1, 1)` with two free control points,
//! the same family CSS `cubic-bezier()` uses. Time is measured in frames:
//! `progress(0, frames, i)` maps frame `i` to a progress fraction.

/// A cubic Bézier timing curve from `(0, 0)` to `(1, 1)`.
///
/// `(x0, y0)` and `(x1, y1)` are the two inner control points. The x
/// coordinates should lie in `[0, 1]`; the y coordinates may leave it, which
/// makes the curve overshoot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezier {
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
}

/// Newton iterations used to invert x(t).
const NEWTON_ITERATIONS: usize = 5;

impl CubicBezier {
    #[must_use]
    pub const fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// The fraction of `[t0, t1]` that `t` has covered, clamped to `[0, 1]`.
    ///
    /// `t >= t1` is always 1, even for an empty span, so a zero-frame
    /// animation jumps straight to its end.
    #[must_use]
    #[allow(clippy::cast_precision_loss)] // Frame counts are small.
    pub fn linear(t0: i64, t1: i64, t: i64) -> f32 {
        if t >= t1 {
            return 1.0;
        }
        if t <= t0 {
            return 0.0;
        }
        (t - t0) as f32 / (t1 - t0) as f32
    }

    /// Eased progress at frame `t` of `[t0, t1]`.
    ///
    /// Solves the curve's x for the Bézier parameter with a few Newton steps,
    /// then evaluates y there. The result may fall outside `[0, 1]` for
    /// overshooting curves.
    #[must_use]
    pub fn progress(&self, t0: i64, t1: i64, t: i64) -> f32 {
        let x = Self::linear(t0, t1, t);

        let mut s = x;
        for _ in 0..NEWTON_ITERATIONS {
            let d = 1.0 - s;
            let nx = 3.0 * d * d * s * self.x0 + 3.0 * d * s * s * self.x1 + s * s * s;
            let dxds = 3.0 * d * d * self.x0
                + 6.0 * d * s * (self.x1 - self.x0)
                + 3.0 * s * s * (1.0 - self.x1);
            if dxds == 0.0 {
                break;
            }
            s -= (nx - x) / dxds;
            if s <= 0.0 || s >= 1.0 {
                break;
            }
        }
        let s = s.clamp(0.0, 1.0);

        let d = 1.0 - s;
        3.0 * d * d * s * self.y0 + 3.0 * d * s * s * self.y1 + s * s * s
    }
}

// ─── AnimationKind ───────────────────────────────────────────────────────────

/// The named curves animations can use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AnimationKind {
    /// Slow start.
    EaseIn,
    /// Slow end.
    EaseOut,
    /// Slow start and end.
    EaseInOut,
    /// Jumps ahead, stalls, then finishes.
    Custom,
    /// Rushes ahead early, then coasts in.
    #[default]
    Bouncy,
}

impl AnimationKind {
    pub const ALL: [Self; 5] = [
        Self::EaseIn,
        Self::EaseOut,
        Self::EaseInOut,
        Self::Custom,
        Self::Bouncy,
    ];

    /// Map `0..=4` to the kinds in declaration order. Anything else is the
    /// default curve.
    #[must_use]
    pub fn from_index(index: i32) -> Self {
        usize::try_from(index)
            .ok()
            .and_then(|i| Self::ALL.get(i).copied())
            .unwrap_or_default()
    }

    /// The control points for this kind.
    #[must_use]
    pub const fn curve(self) -> CubicBezier {
        match self {
            Self::EaseIn => CubicBezier::new(0.42, 0.0, 1.0, 1.0),
            Self::EaseOut => CubicBezier::new(0.0, 0.0, 0.58, 1.0),
            Self::EaseInOut => CubicBezier::new(0.42, 0.0, 0.58, 1.0),
            Self::Custom => CubicBezier::new(0.0, 1.0, 1.0, 0.0),
            Self::Bouncy => CubicBezier::new(0.6, 1.2, 0.3, 0.9),
        }
    }

    /// Shorthand for `self.curve().progress(t0, t1, t)`.
    #[inline]
    #[must_use]
    pub fn progress(self, t0: i64, t1: i64, t: i64) -> f32 {
        self.curve().progress(t0, t1, t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn linear_bounds() {
        assert_eq!(CubicBezier::linear(0, 10, 0), 0.0);
        assert_eq!(CubicBezier::linear(0, 10, 10), 1.0);
        assert_eq!(CubicBezier::linear(0, 10, 15), 1.0);
        assert_eq!(CubicBezier::linear(0, 10, -3), 0.0);
        assert!(close(CubicBezier::linear(0, 10, 4), 0.4));
    }

    #[test]
    fn every_curve_starts_at_zero_and_ends_at_one() {
        for kind in AnimationKind::ALL {
            assert!(close(kind.progress(0, 20, 0), 0.0), "{kind:?} start");
            assert!(close(kind.progress(0, 20, 20), 1.0), "{kind:?} end");
        }
    }

    #[test]
    fn empty_span_is_complete() {
        for kind in AnimationKind::ALL {
            assert!(close(kind.progress(0, 0, 0), 1.0), "{kind:?}");
        }
    }

    #[test]
    fn ease_in_lags_and_ease_out_leads() {
        let t = (0, 100, 25);
        let ease_in = AnimationKind::EaseIn.progress(t.0, t.1, t.2);
        let ease_out = AnimationKind::EaseOut.progress(t.0, t.1, t.2);
        assert!(ease_in < 0.25, "{ease_in}");
        assert!(ease_out > 0.25, "{ease_out}");
    }

    #[test]
    fn ease_in_out_is_symmetric_at_midpoint() {
        assert!(close(AnimationKind::EaseInOut.progress(0, 100, 50), 0.5));
    }

    #[test]
    fn bouncy_runs_ahead_early() {
        let quarter = AnimationKind::Bouncy.progress(0, 100, 25);
        assert!(quarter > 0.4, "{quarter}");
    }

    #[test]
    fn overshooting_control_points_leave_unit_range() {
        let curve = CubicBezier::new(0.3, 0.0, 0.5, 1.8);
        let peak = (0..=100)
            .map(|i| curve.progress(0, 100, i))
            .fold(f32::MIN, f32::max);
        assert!(peak > 1.0, "{peak}");
    }

    #[test]
    fn ease_in_is_monotonic() {
        let values: Vec<f32> = (0..=50)
            .map(|i| AnimationKind::EaseIn.progress(0, 50, i))
            .collect();
        assert!(values.windows(2).all(|w| w[1] >= w[0] - 1e-4));
    }

    #[test]
    fn from_index_maps_and_falls_back() {
        assert_eq!(AnimationKind::from_index(0), AnimationKind::EaseIn);
        assert_eq!(AnimationKind::from_index(3), AnimationKind::Custom);
        assert_eq!(AnimationKind::from_index(4), AnimationKind::Bouncy);
        assert_eq!(AnimationKind::from_index(17), AnimationKind::Bouncy);
        assert_eq!(AnimationKind::from_index(-1), AnimationKind::Bouncy);
    }
}
