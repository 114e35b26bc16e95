use crate::{Interval, Ray, Vec3};

/// Axis-aligned bounding box used to reject rays before per-triangle tests.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// Minimum extent along any axis. Flat meshes would otherwise produce
    /// zero-width slabs.
    const MIN_EXTENT: f32 = 0.0001;

    /// Create an AABB from two corner points (in any order).
    pub fn from_points(a: Vec3, b: Vec3) -> Self {
        let mut aabb = Self {
            min: a.min(b),
            max: a.max(b),
        };
        aabb.pad_to_minimums();
        aabb
    }

    /// Smallest box containing every point. Empty input gives [`Aabb::EMPTY`].
    pub fn from_point_cloud<'a>(points: impl IntoIterator<Item = &'a Vec3>) -> Self {
        let mut min = Vec3::splat(f32::INFINITY);
        let mut max = Vec3::splat(f32::NEG_INFINITY);
        let mut any = false;

        for p in points {
            min = min.min(*p);
            max = max.max(*p);
            any = true;
        }

        if !any {
            return Self::EMPTY;
        }
        Self::from_points(min, max)
    }

    /// Create an AABB that surrounds two other AABBs.
    pub fn surrounding(box0: &Aabb, box1: &Aabb) -> Self {
        Self {
            min: box0.min.min(box1.min),
            max: box0.max.max(box1.max),
        }
    }

    /// True if the box contains nothing.
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    /// The 8 corners of the box.
    pub fn corners(&self) -> [Vec3; 8] {
        let (lo, hi) = (self.min, self.max);
        [
            Vec3::new(lo.x, lo.y, lo.z),
            Vec3::new(hi.x, lo.y, lo.z),
            Vec3::new(lo.x, hi.y, lo.z),
            Vec3::new(hi.x, hi.y, lo.z),
            Vec3::new(lo.x, lo.y, hi.z),
            Vec3::new(hi.x, lo.y, hi.z),
            Vec3::new(lo.x, hi.y, hi.z),
            Vec3::new(hi.x, hi.y, hi.z),
        ]
    }

    /// Parametric interval `[tmin, tmax]` over which the ray line lies inside
    /// all three slabs. Empty (`tmin > tmax`) when the line misses the box.
    pub fn slab_interval(&self, r: &Ray) -> Interval {
        let mut slab = Interval::UNIVERSE;

        for axis in 0..3 {
            let inv = 1.0 / r.direction[axis];
            let t0 = (self.min[axis] - r.origin[axis]) * inv;
            let t1 = (self.max[axis] - r.origin[axis]) * inv;

            // f32::min/max drop NaN, which shows up when the origin sits on a
            // slab boundary with a zero direction component.
            slab.min = slab.min.max(t0.min(t1));
            slab.max = slab.max.min(t0.max(t1));
        }

        slab
    }

    /// Test if a ray intersects this AABB within the given interval.
    ///
    /// Uses the slab method. Rejects empty boxes and boxes entirely behind
    /// the ray origin.
    pub fn hit(&self, r: &Ray, ray_t: Interval) -> bool {
        if self.is_empty() {
            return false;
        }
        let slab = self.slab_interval(r);
        if slab.is_empty() || slab.max <= 0.0 {
            return false;
        }
        !slab.intersect(&ray_t).is_empty()
    }

    /// Pad near-zero extents so the slab test never works with a zero-width box.
    fn pad_to_minimums(&mut self) {
        for axis in 0..3 {
            if self.max[axis] - self.min[axis] < Self::MIN_EXTENT {
                self.min[axis] -= Self::MIN_EXTENT / 2.0;
                self.max[axis] += Self::MIN_EXTENT / 2.0;
            }
        }
    }

    /// Returns the index (0=X, 1=Y, 2=Z) of the axis with the longest extent.
    pub fn longest_axis(&self) -> usize {
        let extent = self.max - self.min;

        if extent.x > extent.y && extent.x > extent.z {
            0
        } else if extent.y > extent.z {
            1
        } else {
            2
        }
    }

    /// Returns the center point of the bounding box.
    pub fn centroid(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub const EMPTY: Aabb = Aabb {
        min: Vec3::splat(f32::INFINITY),
        max: Vec3::splat(f32::NEG_INFINITY),
    };

    pub const UNIVERSE: Aabb = Aabb {
        min: Vec3::splat(f32::NEG_INFINITY),
        max: Vec3::splat(f32::INFINITY),
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_box() -> Aabb {
        Aabb::from_points(Vec3::splat(-1.0), Vec3::splat(1.0))
    }

    #[test]
    fn test_aabb_from_point_cloud() {
        let points = [
            Vec3::new(-1.0, -2.0, -3.0),
            Vec3::new(4.0, 5.0, 6.0),
            Vec3::ZERO,
        ];
        let aabb = Aabb::from_point_cloud(&points);

        assert_eq!(aabb.min, Vec3::new(-1.0, -2.0, -3.0));
        assert_eq!(aabb.max, Vec3::new(4.0, 5.0, 6.0));
        let none: &[Vec3] = &[];
        assert!(Aabb::from_point_cloud(none).is_empty());
    }

    #[test]
    fn test_aabb_pads_flat_axis() {
        let aabb = Aabb::from_points(Vec3::ZERO, Vec3::new(1.0, 1.0, 0.0));
        assert!(aabb.max.z - aabb.min.z > 0.0);
    }

    #[test]
    fn test_aabb_hit() {
        let aabb = unit_box();
        let range = Interval::new(0.0, 100.0);

        // Ray pointing at center
        let ray = Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::Z);
        assert!(aabb.hit(&ray, range));

        // Ray pointing away
        let ray = Ray::new(Vec3::new(0.0, 0.0, -5.0), -Vec3::Z);
        assert!(!aabb.hit(&ray, range));

        // Ray missing the box
        let ray = Ray::new(Vec3::new(10.0, 0.0, 0.0), Vec3::Z);
        assert!(!aabb.hit(&ray, range));
    }

    #[test]
    fn test_aabb_hit_from_inside() {
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.3, 0.4, 0.5).normalize());
        assert!(unit_box().hit(&ray, ray.interval()));
    }

    #[test]
    fn test_aabb_hit_respects_ray_range() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::Z).with_range(1e-4, 2.0);
        assert!(!unit_box().hit(&ray, ray.interval()));
    }

    #[test]
    fn test_empty_aabb_is_never_hit() {
        let ray = Ray::new(Vec3::ZERO, Vec3::Z);

        assert!(!Aabb::EMPTY.hit(&ray, Interval::UNIVERSE));
        assert!(!Aabb::EMPTY.hit(&Ray::new(Vec3::splat(3.0), -Vec3::ONE.normalize()), ray.interval()));
    }

    #[test]
    fn test_slab_interval() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::Z);
        let slab = unit_box().slab_interval(&ray);

        assert!((slab.min - 4.0).abs() < 1e-5);
        assert!((slab.max - 6.0).abs() < 1e-5);
    }

    #[test]
    fn test_aabb_centroid_and_axis() {
        let aabb = Aabb::from_points(Vec3::ZERO, Vec3::new(10.0, 2.0, 4.0));

        assert_eq!(aabb.centroid(), Vec3::new(5.0, 1.0, 2.0));
        assert_eq!(aabb.longest_axis(), 0);
    }

    #[test]
    fn test_aabb_corners_are_distinct() {
        let corners = unit_box().corners();
        for (i, a) in corners.iter().enumerate() {
            for b in &corners[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
