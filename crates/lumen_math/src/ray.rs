use crate::{Interval, Vec3};

/// Default lower bound of a ray's parametric range.
///
/// Keeps a ray from re-hitting the surface it starts on.
pub const RAY_EPSILON: f32 = 1e-4;

/// A ray in 3D space with a valid parametric range `[min, max]`.
///
/// `direction` is expected to be unit length; intersection routines report
/// `t` in units of that direction.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
    pub min: f32,
    pub max: f32,
}

impl Ray {
    /// Create a ray with the default range `[RAY_EPSILON, f32::MAX]`.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction,
            min: RAY_EPSILON,
            max: f32::MAX,
        }
    }

    /// Replace the parametric range.
    pub fn with_range(mut self, min: f32, max: f32) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    /// The valid range as an [`Interval`].
    #[inline]
    pub fn interval(&self) -> Interval {
        Interval::new(self.min, self.max)
    }

    /// Get the point along the ray at parameter t.
    ///
    /// Returns: origin + t * direction
    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}
