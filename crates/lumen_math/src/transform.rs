// Transform utilities for Mat4
//
// Extends glam::Mat4 with the bounding-box transform the mesh code needs.
// glam::Mat4 already provides transform_point3() and transform_vector3()
// (w = 0, translation ignored, result not renormalized).

use glam::{Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::Aabb;

/// Extension trait for Mat4 to provide additional transform utilities
pub trait Mat4Ext {
    /// Transform an axis-aligned bounding box.
    /// Computes the bounding box of all 8 transformed corners.
    fn transform_aabb(&self, aabb: &Aabb) -> Aabb;
}

impl Mat4Ext for Mat4 {
    fn transform_aabb(&self, aabb: &Aabb) -> Aabb {
        if aabb.is_empty() {
            return Aabb::EMPTY;
        }

        // Under rotation the extreme corners are not the extremes of the
        // result, so every corner has to be visited.
        let corners = aabb.corners().map(|corner| self.transform_point3(corner));
        Aabb::from_point_cloud(&corners)
    }
}

/// Transform components that can be composed into a matrix.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    /// Convert to a 4x4 transformation matrix.
    ///
    /// Points are scaled first, then rotated, then translated.
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.translation)
    }
}

/// Reflect `v` about the plane with normal `n`: `v - 2 dot(v, n) n`.
#[inline]
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}
