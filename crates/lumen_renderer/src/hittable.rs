//! Hittable trait and HitRecord for ray-object intersection.

use lumen_math::{Aabb, Ray, Vec3};

/// Record of a ray-object intersection.
///
/// Queries build one of these locally and return it by value. A record that
/// has not hit anything has `did_hit == false` and `t == f32::INFINITY`, so
/// it loses every "closer than" comparison.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HitRecord {
    pub did_hit: bool,
    /// Parameter t where the intersection occurs
    pub t: f32,
    /// Point of intersection
    pub point: Vec3,
    /// Surface normal at the intersection (unit length, not flipped towards the ray)
    pub normal: Vec3,
    /// Index into the scene's material list
    pub material: usize,
}

impl Default for HitRecord {
    fn default() -> Self {
        Self {
            did_hit: false,
            t: f32::INFINITY,
            point: Vec3::ZERO,
            normal: Vec3::ZERO,
            material: 0,
        }
    }
}

impl HitRecord {
    pub fn new(t: f32, point: Vec3, normal: Vec3, material: usize) -> Self {
        Self {
            did_hit: true,
            t,
            point,
            normal,
            material,
        }
    }

    /// Keep whichever of `self` and `other` is closer.
    #[inline]
    pub fn closest(self, other: Option<HitRecord>) -> Self {
        match other {
            Some(hit) if hit.t < self.t => hit,
            _ => self,
        }
    }
}

/// Trait for objects that can be hit by rays.
///
/// The valid parametric range is carried by the ray itself (`ray.min..=ray.max`).
pub trait Hittable: Send + Sync {
    /// Nearest intersection within the ray's range, if any.
    fn hit(&self, ray: &Ray) -> Option<HitRecord>;

    /// Whether anything is hit within the ray's range. Used for shadow rays.
    fn any_hit(&self, ray: &Ray) -> bool {
        self.hit(ray).is_some()
    }

    /// Get the axis-aligned bounding box of this object.
    fn bounding_box(&self) -> Aabb;
}
