//! 2D vector helpers on top of `glam::Vec2`.
//!
//! glam already covers most arithmetic. These wrappers pin down the
//! degenerate cases the simulation relies on: a zero or non-finite vector
//! never produces NaN, and a non-positive length cap yields zero.

use glam::Vec2;

/// Lengths below this are treated as zero.
pub const EPSILON: f32 = 1e-6;

/// Unit vector in the direction of `v`, or `Vec2::ZERO` for a zero-length
/// or non-finite input.
#[inline]
pub fn normalize_or_zero(v: Vec2) -> Vec2 {
    if !v.is_finite() {
        return Vec2::ZERO;
    }
    let len = v.length();
    if len < EPSILON {
        Vec2::ZERO
    } else {
        v / len
    }
}

/// Scale `v` down so its length does not exceed `max_len`.
/// Vectors already shorter are returned unchanged.
#[inline]
pub fn clamp_length(v: Vec2, max_len: f32) -> Vec2 {
    if !v.is_finite() || !(max_len > 0.0) {
        return Vec2::ZERO;
    }
    let len_sq = v.length_squared();
    if len_sq > max_len * max_len {
        v * (max_len / len_sq.sqrt())
    } else {
        v
    }
}

#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    (b - a).length()
}

/// Rotate `v` counter-clockwise (in a Y-up frame) by `angle` radians.
#[inline]
pub fn rotate(v: Vec2, angle: f32) -> Vec2 {
    let (sin, cos) = angle.sin_cos();
    Vec2::new(v.x * cos - v.y * sin, v.x * sin + v.y * cos)
}

/// Heading of a velocity as `-atan2(x, y)`: zero when moving along +Y.
/// Returns `None` for a (near) stationary velocity so callers can keep
/// the previous heading.
#[inline]
pub fn heading_of(velocity: Vec2) -> Option<f32> {
    if !velocity.is_finite() || velocity.length_squared() < EPSILON * EPSILON {
        None
    } else {
        Some(-velocity.x.atan2(velocity.y))
    }
}
