//! Tolerant comparisons for signal scores.
//!
//! Scores are smoothed densities stored as `f32`. Two scores closer than
//! [`SCORE_TOLERANCE`] are treated as equal everywhere: in the run-tracking
//! state machine, in the half-maximum search, and when ordering candidates
//! by height. All of those call sites go through the functions below.

/// Absolute tolerance under which two scores are considered equal.
pub const SCORE_TOLERANCE: f32 = 1e-4;

/// `a == b` within tolerance.
#[inline]
pub fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < SCORE_TOLERANCE
}

/// `a > b` by more than the tolerance.
#[inline]
pub fn strictly_gt(a: f32, b: f32) -> bool {
    a - b > SCORE_TOLERANCE
}

/// `a >= b`, counting near-equal values as equal.
#[inline]
pub fn approx_ge(a: f32, b: f32) -> bool {
    a - b > -SCORE_TOLERANCE
}

/// `a <= b`, counting near-equal values as equal.
#[inline]
pub fn approx_le(a: f32, b: f32) -> bool {
    a < b || a - b < SCORE_TOLERANCE
}
