//! Sphere and plane intersection.

use crate::hittable::{HitRecord, Hittable};
use lumen_core::{Plane, Sphere};
use lumen_math::{Aabb, Ray, Vec3};

impl Hittable for Sphere {
    fn hit(&self, ray: &Ray) -> Option<HitRecord> {
        let l = ray.origin - self.origin;
        let b = ray.direction.dot(l);
        let c = l.length_squared() - self.radius * self.radius;

        // Origin outside and pointing away
        if c > 0.0 && b > 0.0 {
            return None;
        }

        let discriminant = b * b - c;
        if discriminant < 0.0 {
            return None;
        }

        let t = -b - discriminant.sqrt();
        if !ray.interval().contains(t) {
            return None;
        }

        let point = ray.at(t);
        let normal = (point - self.origin) / self.radius;
        Some(HitRecord::new(t, point, normal, self.material))
    }

    fn bounding_box(&self) -> Aabb {
        let r = Vec3::splat(self.radius.abs());
        Aabb::from_points(self.origin - r, self.origin + r)
    }
}

impl Hittable for Plane {
    /// One-sided: rays travelling along the normal, or parallel to the
    /// plane, never hit.
    fn hit(&self, ray: &Ray) -> Option<HitRecord> {
        let denom = self.normal.dot(ray.direction);
        if denom >= 0.0 {
            return None;
        }

        let t = (self.origin - ray.origin).dot(self.normal) / denom;
        if !ray.interval().contains(t) {
            return None;
        }

        Some(HitRecord::new(t, ray.at(t), self.normal, self.material))
    }

    fn bounding_box(&self) -> Aabb {
        Aabb::UNIVERSE
    }
}
