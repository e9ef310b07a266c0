//! Sanitation for untrusted power readings.
//!
//! Readings arrive from a feed that may contain `NaN`, infinities or stray
//! sign conventions. Every arithmetic path in the engines goes through these
//! helpers first so that nothing downstream has to reason about non-finite input.

/// `v` if finite, otherwise `0.0`.
#[inline]
pub fn finite_or_zero(v: f64) -> f64 {
    if v.is_finite() {
        v
    } else {
        0.0
    }
}

/// `max(0, v)` with non-finite input mapped to `0.0`.
#[inline]
pub fn non_negative(v: f64) -> f64 {
    finite_or_zero(v).max(0.0)
}

/// `|v|` with non-finite input mapped to `0.0`.
#[inline]
pub fn abs_finite(v: f64) -> f64 {
    finite_or_zero(v).abs()
}
