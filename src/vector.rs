//! 2-D vector helpers.
//!
//! Addition, subtraction, scaling and magnitude come straight from
//! `nalgebra`; this module adds the few operations the flocking rules need
//! that nalgebra either lacks or defines differently (it yields NaN when
//! normalizing a zero vector).

use nalgebra::{Rotation2, Vector2};

pub type Vec2 = Vector2<f32>;

pub fn vec2(x: f32, y: f32) -> Vec2 {
    Vec2::new(x, y)
}

/// Unit vector pointing along `v`, or `v` itself when it has zero length.
pub fn normalize_or_keep(v: Vec2) -> Vec2 {
    v.try_normalize(0.0).unwrap_or(v)
}

/// Clamps the magnitude of `v` to at most `max_len`, keeping its direction.
pub fn limit(v: Vec2, max_len: f32) -> Vec2 {
    let magnitude = v.magnitude();
    if magnitude > max_len {
        v * (max_len / magnitude)
    } else {
        v
    }
}

/// Rotates `v` counter-clockwise by `angle` radians.
pub fn rotate(v: Vec2, angle: f32) -> Vec2 {
    Rotation2::new(angle) * v
}
