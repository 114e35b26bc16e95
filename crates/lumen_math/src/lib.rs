//! Lumen math - vectors, rays and bounding volumes.
//!
//! `glam` provides the vector and matrix types; this crate adds the
//! ray-tracing specific pieces on top of it.

// Re-export glam for convenience
pub use glam::*;

mod aabb;
mod interval;
mod ray;
mod transform;

pub use aabb::Aabb;
pub use interval::Interval;
pub use ray::{Ray, RAY_EPSILON};
pub use transform::{reflect, Mat4Ext, Transform};

/// Tolerance used for "is this float zero" checks in intersection code.
pub const EPSILON: f32 = 1e-6;

/// Returns true if `a` and `b` differ by less than [`EPSILON`].
#[inline]
pub fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}
