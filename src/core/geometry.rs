//! Angle helpers shared by motion and ray casting.
use std::f32::consts::TAU;

/// Wraps an angle into `[0, 2π)`. Non-finite input maps to 0.
#[inline]
pub fn normalize_angle(a: f32) -> f32 {
    if !a.is_finite() {
        return 0.0;
    }
    let r = a.rem_euclid(TAU);
    // rem_euclid rounds tiny negatives up to exactly TAU
    if r >= TAU { 0.0 } else { r }
}
