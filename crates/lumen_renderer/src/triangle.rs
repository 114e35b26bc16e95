//! Triangle intersection.
//!
//! Uses the Möller-Trumbore algorithm. The same routine serves standalone
//! triangles and every face of a [`TriangleMesh`](lumen_core::TriangleMesh).

use crate::hittable::{HitRecord, Hittable};
use lumen_core::{CullMode, Triangle};
use lumen_math::{approx_eq, Aabb, Ray, Vec3};

/// Möller-Trumbore ray-triangle test.
///
/// Returns the ray parameter `t` of the hit. With the face normal taken as
/// `cross(v1 - v0, v2 - v0)`, a ray hitting the front face has a positive
/// determinant, so back-face culling drops negative determinants and
/// front-face culling drops positive ones.
#[inline]
pub fn intersect_triangle(ray: &Ray, v0: Vec3, v1: Vec3, v2: Vec3, cull_mode: CullMode) -> Option<f32> {
    let e1 = v1 - v0;
    let e2 = v2 - v0;

    let p = ray.direction.cross(e2);
    let det = e1.dot(p);

    match cull_mode {
        CullMode::BackFaceCulling if det < 0.0 => return None,
        CullMode::FrontFaceCulling if det > 0.0 => return None,
        _ => {}
    }

    // Ray is parallel to the triangle, or the triangle is degenerate
    if approx_eq(det, 0.0) {
        return None;
    }

    let inv_det = 1.0 / det;
    let s = ray.origin - v0;
    let u = s.dot(p) * inv_det;
    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let q = s.cross(e1);
    let v = ray.direction.dot(q) * inv_det;
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = e2.dot(q) * inv_det;
    if !ray.interval().contains(t) {
        return None;
    }

    Some(t)
}

/// Bounding box of three points.
pub(crate) fn triangle_bounds(v0: Vec3, v1: Vec3, v2: Vec3) -> Aabb {
    Aabb::from_points(v0.min(v1).min(v2), v0.max(v1).max(v2))
}

impl Hittable for Triangle {
    fn hit(&self, ray: &Ray) -> Option<HitRecord> {
        let t = intersect_triangle(ray, self.v0, self.v1, self.v2, self.cull_mode)?;
        Some(HitRecord::new(t, ray.at(t), self.normal, self.material))
    }

    fn any_hit(&self, ray: &Ray) -> bool {
        intersect_triangle(ray, self.v0, self.v1, self.v2, self.cull_mode).is_some()
    }

    fn bounding_box(&self) -> Aabb {
        triangle_bounds(self.v0, self.v1, self.v2)
    }
}
