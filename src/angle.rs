//! Circular angle utilities shared by the retina and homing stages.
//!
//! All angles are radians on the full circle. Anything that stores an angle
//! keeps it in [0, 2π); wraparound-aware comparisons live here so that the
//! feature code never has to inline modulo arithmetic.

use std::f64::consts::{PI, TAU};

/// Normalizes an angle into the range [0, 2π).
#[inline]
pub fn normalize_full(angle: f64) -> f64 {
    let norm = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly 2π for tiny negative inputs.
    if norm >= TAU {
        0.0
    } else {
        norm
    }
}

/// Angular extent swept when travelling counter-clockwise from `start` to
/// `end`. Both inputs are expected in [0, 2π); the result lies in [0, 2π).
#[inline]
pub fn forward_span(start: f64, end: f64) -> f64 {
    let span = end - start;
    if start > end {
        span + TAU
    } else {
        span
    }
}

/// Smallest unsigned angular difference between two angles, in [0, π].
#[inline]
pub fn circular_difference(a: f64, b: f64) -> f64 {
    let diff = normalize_full(a - b);
    if diff > PI {
        TAU - diff
    } else {
        diff
    }
}

/// Half-chord distance proxy `sin(|a - b| / 2)`.
///
/// For inputs in [0, 2π) this is monotonic in the true circular distance and
/// symmetric around the wrap point, so no separate modulo branch is needed.
#[inline]
pub fn chord_proxy(a: f64, b: f64) -> f64 {
    ((a - b).abs() / 2.0).sin()
}

/// Whether `target` lies clockwise of `reference` along the shorter arc.
///
/// Ties (equal angles) report `false`; callers handle coincidence first.
#[inline]
pub fn lies_clockwise(reference: f64, target: f64) -> bool {
    let mut clockwise = target < reference;
    if (target - reference).abs() > PI {
        clockwise = !clockwise;
    }
    clockwise
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn normalize_full_basic() {
        assert_abs_diff_eq!(normalize_full(0.5), 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(normalize_full(-PI / 2.0), 1.5 * PI, epsilon = 1e-12);
        assert_abs_diff_eq!(normalize_full(TAU), 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(normalize_full(5.0 * PI), PI, epsilon = 1e-12);
        assert!(normalize_full(-1e-18) < TAU);
    }

    #[test]
    fn forward_span_handles_wrap() {
        assert_abs_diff_eq!(forward_span(0.5, 1.5), 1.0, epsilon = 1e-12);
        let span = forward_span(350f64.to_radians(), 10f64.to_radians());
        assert_abs_diff_eq!(span, 20f64.to_radians(), epsilon = 1e-12);
    }

    #[test]
    fn circular_difference_is_symmetric_and_wraps() {
        let a = 0.25;
        let b = 5.9;
        assert_abs_diff_eq!(circular_difference(a, b), circular_difference(b, a), epsilon = 1e-12);
        assert_abs_diff_eq!(
            circular_difference(10f64.to_radians(), 350f64.to_radians()),
            20f64.to_radians(),
            epsilon = 1e-12
        );
        assert_abs_diff_eq!(circular_difference(0.0, PI), PI, epsilon = 1e-12);
    }

    #[test]
    fn chord_proxy_orders_by_circular_distance() {
        let zero = 0.0;
        let near = chord_proxy(zero, 10f64.to_radians());
        let wrapped = chord_proxy(zero, 350f64.to_radians());
        let far = chord_proxy(zero, 170f64.to_radians());
        assert_abs_diff_eq!(near, wrapped, epsilon = 1e-12);
        assert!(near < far);
    }

    #[test]
    fn lies_clockwise_uses_shorter_arc() {
        assert!(lies_clockwise(1.0, 0.5));
        assert!(!lies_clockwise(0.5, 1.0));
        // 10° is counter-clockwise of 350° once the wrap is taken into account.
        assert!(!lies_clockwise(350f64.to_radians(), 10f64.to_radians()));
        assert!(lies_clockwise(10f64.to_radians(), 350f64.to_radians()));
    }
}
