//! Output rounding
//!
//! Scores, yields and confidences leave the engines rounded to 2 decimals.
//! `f64::round` rounds half away from zero.

/// Round to 2 decimal places
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
