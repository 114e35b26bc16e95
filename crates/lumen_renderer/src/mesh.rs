//! Triangle mesh intersection.
//!
//! Faces are tested in world space against the mesh's transformed buffers.
//! An optional slab test against the world bounds rejects rays before the
//! per-face loop; an optional [`BvhNode`] replaces the linear scan.

use lumen_core::TriangleMesh;
use lumen_math::{Aabb, Ray};

use crate::bvh::BvhNode;
use crate::hittable::{HitRecord, Hittable};
use crate::triangle::intersect_triangle;

/// Slab pre-test: `false` means the ray cannot hit any face.
#[inline]
fn passes_slab_test(mesh: &TriangleMesh, ray: &Ray) -> bool {
    !mesh.slab_test || mesh.world_bounds().hit(ray, ray.interval())
}

/// Nearest face hit by a linear scan: `(t, face index)`.
fn scan_closest(mesh: &TriangleMesh, ray: &Ray) -> Option<(f32, usize)> {
    let mut closest: Option<(f32, usize)> = None;

    for face in 0..mesh.triangle_count() {
        let [v0, v1, v2] = mesh.world_triangle(face);
        if let Some(t) = intersect_triangle(ray, v0, v1, v2, mesh.cull_mode) {
            if closest.map_or(true, |(best, _)| t < best) {
                closest = Some((t, face));
            }
        }
    }

    closest
}

/// Closest hit against `mesh`, through `bvh` when one is given.
pub fn hit_mesh(mesh: &TriangleMesh, bvh: Option<&BvhNode>, ray: &Ray) -> Option<HitRecord> {
    if !passes_slab_test(mesh, ray) {
        return None;
    }

    let (t, face) = match bvh {
        Some(bvh) => bvh.hit(mesh, ray)?,
        None => scan_closest(mesh, ray)?,
    };

    Some(HitRecord::new(
        t,
        ray.at(t),
        mesh.transformed_normals()[face],
        mesh.material,
    ))
}

/// Any-hit against `mesh`, through `bvh` when one is given.
pub fn any_hit_mesh(mesh: &TriangleMesh, bvh: Option<&BvhNode>, ray: &Ray) -> bool {
    if !passes_slab_test(mesh, ray) {
        return false;
    }

    match bvh {
        Some(bvh) => bvh.any_hit(mesh, ray),
        None => (0..mesh.triangle_count()).any(|face| {
            let [v0, v1, v2] = mesh.world_triangle(face);
            intersect_triangle(ray, v0, v1, v2, mesh.cull_mode).is_some()
        }),
    }
}

impl Hittable for TriangleMesh {
    fn hit(&self, ray: &Ray) -> Option<HitRecord> {
        hit_mesh(self, None, ray)
    }

    fn any_hit(&self, ray: &Ray) -> bool {
        any_hit_mesh(self, None, ray)
    }

    fn bounding_box(&self) -> Aabb {
        self.world_bounds()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_core::{CullMode, Triangle};
    use lumen_math::Vec3;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    /// Two stacked quads facing -Z at z = 3 and z = 6.
    fn two_layers() -> TriangleMesh {
        let mut positions = Vec::new();
        let mut indices = Vec::new();
        for (layer, z) in [3.0f32, 6.0].into_iter().enumerate() {
            positions.extend([
                Vec3::new(-1.0, -1.0, z),
                Vec3::new(-1.0, 1.0, z),
                Vec3::new(1.0, 1.0, z),
                Vec3::new(1.0, -1.0, z),
            ]);
            let b = layer as u32 * 4;
            indices.extend([b, b + 1, b + 2, b, b + 2, b + 3]);
        }
        TriangleMesh::new(positions, indices, CullMode::BackFaceCulling).unwrap()
    }

    #[test]
    fn test_mesh_keeps_nearest_face() {
        let mesh = two_layers();
        let rec = mesh.hit(&Ray::new(Vec3::new(0.2, 0.1, 0.0), Vec3::Z)).unwrap();

        assert!((rec.t - 3.0).abs() < 1e-5);
        assert!((rec.normal - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-5);
    }

    #[test]
    fn test_mesh_uses_transformed_buffers() {
        let mut mesh = two_layers();
        mesh.translate(Vec3::new(0.0, 0.0, 10.0));

        let rec = mesh.hit(&Ray::new(Vec3::ZERO, Vec3::Z)).unwrap();
        assert!((rec.t - 13.0).abs() < 1e-4);
    }

    #[test]
    fn test_slab_test_rejects_rays_behind() {
        let mesh = two_layers();
        let away = Ray::new(Vec3::ZERO, -Vec3::Z);

        assert!(mesh.hit(&away).is_none());
        assert!(!mesh.any_hit(&away));
    }

    #[test]
    fn test_slab_test_does_not_change_results() {
        let mut with_slab = two_layers();
        with_slab.rotate_y(0.3);
        let mut without_slab = with_slab.clone();
        without_slab.slab_test = false;

        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let origin = Vec3::new(rng.gen_range(-3.0..3.0), rng.gen_range(-3.0..3.0), -2.0);
            let target = Vec3::new(rng.gen_range(-2.0..2.0), rng.gen_range(-2.0..2.0), 4.5);
            let ray = Ray::new(origin, (target - origin).normalize());

            let a = with_slab.hit(&ray).map(|r| r.t);
            let b = without_slab.hit(&ray).map(|r| r.t);
            assert_eq!(a, b);
            assert_eq!(with_slab.any_hit(&ray), without_slab.any_hit(&ray));
        }
    }

    #[test]
    fn test_slab_test_covers_deferred_appends() {
        let mut mesh = TriangleMesh::empty(CullMode::NoCulling);
        mesh.translate(Vec3::new(0.0, 0.0, 5.0));
        mesh.append_triangle(&Triangle::new(Vec3::ZERO, Vec3::X, Vec3::Y), false);
        mesh.append_triangle(
            &Triangle::new(Vec3::new(10.0, 0.0, 0.0), Vec3::new(11.0, 0.0, 0.0), Vec3::new(10.0, 1.0, 0.0)),
            true,
        );
        let mut without_slab = mesh.clone();
        without_slab.slab_test = false;

        let ray = Ray::new(Vec3::new(10.2, 0.2, 0.0), Vec3::Z);
        let t = mesh.hit(&ray).map(|r| r.t);
        assert_eq!(t, without_slab.hit(&ray).map(|r| r.t));
        assert!((t.unwrap() - 5.0).abs() < 1e-5);
        assert!(mesh.any_hit(&ray));
    }

    #[test]
    fn test_bvh_matches_linear_scan() {
        let mut mesh = TriangleMesh::empty(CullMode::NoCulling);
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..64 {
            let c = Vec3::new(rng.gen_range(-4.0..4.0), rng.gen_range(-4.0..4.0), rng.gen_range(2.0..8.0));
            let tri = Triangle::new(
                c,
                c + Vec3::new(rng.gen_range(0.2..1.0), 0.0, rng.gen_range(-0.5..0.5)),
                c + Vec3::new(0.0, rng.gen_range(0.2..1.0), rng.gen_range(-0.5..0.5)),
            );
            mesh.append_triangle(&tri, true);
        }
        mesh.update_transforms();
        let bvh = BvhNode::build(&mesh);

        for _ in 0..500 {
            let target = Vec3::new(rng.gen_range(-5.0..5.0), rng.gen_range(-5.0..5.0), 5.0);
            let ray = Ray::new(Vec3::ZERO, target.normalize());

            let linear = hit_mesh(&mesh, None, &ray).map(|r| r.t);
            let accelerated = hit_mesh(&mesh, Some(&bvh), &ray).map(|r| r.t);
            assert_eq!(linear, accelerated);
            assert_eq!(any_hit_mesh(&mesh, None, &ray), any_hit_mesh(&mesh, Some(&bvh), &ray));
        }
    }
}
