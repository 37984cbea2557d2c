// core/math.rs
//
// Scalar and vector helpers shared by the force field and renderers.
// No dependencies on particles or the store.

use glam::Vec2;
use std::f32::consts::{PI, TAU};

/// Linearly interpolate between two values.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Interpolate between two angles (radians) along the shortest arc.
pub fn lerp_angle(from: f32, to: f32, t: f32) -> f32 {
    let mut diff = to - from;
    while diff < -PI {
        diff += TAU;
    }
    while diff > PI {
        diff -= TAU;
    }
    from + diff * t
}

/// Unit vector for a heading in radians.
#[inline]
pub fn heading(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}

/// Rescale `v` down to `max` if it is longer.
pub fn clamp_speed(v: Vec2, max: f32) -> Vec2 {
    let len_sq = v.length_squared();
    if len_sq > max * max {
        v * (max / len_sq.sqrt())
    } else {
        v
    }
}

/// Rescale a nonzero `v` up to `min` if it is shorter. Zero stays zero.
pub fn enforce_min_speed(v: Vec2, min: f32) -> Vec2 {
    let len = v.length();
    if len > f32::EPSILON && len < min {
        v * (min / len)
    } else {
        v
    }
}
