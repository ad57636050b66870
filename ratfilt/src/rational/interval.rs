//! Target/global interval validation.

use crate::error::Error;
use tracing::warn;

/// Closed real interval `[lo, hi]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    /// Left endpoint.
    pub lo: f64,
    /// Right endpoint.
    pub hi: f64,
}

impl Interval {
    /// Reference interval on which pole weights are solved before rescaling.
    pub const CANONICAL: Interval = Interval { lo: -1.0, hi: 1.0 };

    /// Interval `[lo, hi]`. No validation happens here, see [`check_interval`].
    pub const fn new(lo: f64, hi: f64) -> Self {
        Self { lo, hi }
    }

    /// Midpoint `(lo + hi) / 2`.
    pub fn center(&self) -> f64 {
        0.5 * (self.lo + self.hi)
    }

    /// Half-width `(hi - lo) / 2`.
    pub fn half_width(&self) -> f64 {
        0.5 * (self.hi - self.lo)
    }

    /// Whether `x` lies in `[lo, hi]`.
    pub fn contains(&self, x: f64) -> bool {
        self.lo <= x && x <= self.hi
    }

    fn is_finite(&self) -> bool {
        self.lo.is_finite() && self.hi.is_finite()
    }
}

impl Default for Interval {
    fn default() -> Self {
        Self::CANONICAL
    }
}

/// Outcome of a successful [`check_interval`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntervalCheck {
    /// Target interval intersected with the global bounds.
    pub interval: Interval,
    /// Whether the target had to be shrunk to fit.
    pub clipped: bool,
}

/// Validate `target` against the global spectrum bounds and clip it to them.
///
/// Rejects non-finite bounds, an empty or inverted target, inverted global
/// bounds, and a target that does not overlap the global interval. A target
/// that sticks out of the global interval is clipped and a warning is logged.
pub fn check_interval(target: Interval, global: Interval) -> Result<IntervalCheck, Error> {
    let reject = |reason| Error::InvalidInterval {
        target,
        global,
        reason,
    };
    if !target.is_finite() || !global.is_finite() {
        return Err(reject("interval bounds must be finite"));
    }
    if target.lo >= target.hi {
        return Err(reject("target interval is empty or inverted"));
    }
    if global.lo >= global.hi {
        return Err(reject("global interval is empty or inverted"));
    }
    if target.lo >= global.hi || target.hi <= global.lo {
        return Err(reject("target interval lies outside the global interval"));
    }

    let interval = Interval::new(target.lo.max(global.lo), target.hi.min(global.hi));
    let clipped = target.lo < global.lo || target.hi > global.hi;
    if clipped {
        warn!(
            target_lo = target.lo,
            target_hi = target.hi,
            adjusted_lo = interval.lo,
            adjusted_hi = interval.hi,
            "interval ({:e}, {:e}) is adjusted to ({:e}, {:e})",
            target.lo,
            target.hi,
            interval.lo,
            interval.hi
        );
    }
    Ok(IntervalCheck { interval, clipped })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contained_interval_passes_through() {
        let check = check_interval(Interval::new(-0.3, 0.4), Interval::new(-1.0, 1.0))
            .expect("valid interval");
        assert_eq!(check.interval, Interval::new(-0.3, 0.4));
        assert!(!check.clipped);
    }

    #[test]
    fn overhanging_interval_is_clipped() {
        let check = check_interval(Interval::new(-0.5, 1.5), Interval::new(-1.0, 1.0))
            .expect("clipped interval");
        assert_eq!(check.interval, Interval::new(-0.5, 1.0));
        assert!(check.clipped);

        let check = check_interval(Interval::new(-3.0, 3.0), Interval::new(-1.0, 2.0))
            .expect("clipped interval");
        assert_eq!(check.interval, Interval::new(-1.0, 2.0));
    }

    #[test]
    fn invalid_intervals_are_rejected() {
        let global = Interval::new(-1.0, 1.0);
        let cases = [
            (Interval::new(0.5, 0.5), "target interval is empty or inverted"),
            (Interval::new(0.8, 0.2), "target interval is empty or inverted"),
            (Interval::new(1.0, 2.0), "target interval lies outside the global interval"),
            (Interval::new(-4.0, -1.0), "target interval lies outside the global interval"),
            (Interval::new(f64::NAN, 0.5), "interval bounds must be finite"),
        ];
        for (target, expected) in cases {
            match check_interval(target, global) {
                Err(Error::InvalidInterval { reason, .. }) => assert_eq!(reason, expected),
                other => panic!("expected InvalidInterval for {target:?}, got {other:?}"),
            }
        }

        match check_interval(Interval::new(0.0, 0.5), Interval::new(1.0, -1.0)) {
            Err(Error::InvalidInterval { reason, .. }) => {
                assert_eq!(reason, "global interval is empty or inverted")
            }
            other => panic!("expected InvalidInterval, got {other:?}"),
        }
    }

    #[test]
    fn center_and_half_width() {
        let intv = Interval::new(0.6, 0.9);
        assert!((intv.center() - 0.75).abs() < 1e-15);
        assert!((intv.half_width() - 0.15).abs() < 1e-15);
        assert!(intv.contains(0.75));
        assert!(!intv.contains(0.0));
    }
}
