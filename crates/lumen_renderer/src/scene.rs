//! Renderer-side scene: geometry queries and resolved materials.

use lumen_core::{Camera, Light, Scene, SceneResult, TriangleMesh};
use lumen_math::{Aabb, Ray};

use crate::bvh::BvhNode;
use crate::hittable::{HitRecord, Hittable};
use crate::material::Material;
use crate::mesh::{any_hit_mesh, hit_mesh};

/// A [`Scene`] prepared for rendering.
///
/// Holds the shading [`Material`]s resolved from the scene's descriptions and
/// a BVH for every mesh that asked for one. Read-only while a frame renders;
/// camera and mesh edits go through `&mut self` between frames.
pub struct RenderScene {
    scene: Scene,
    materials: Vec<Material>,
    mesh_bvhs: Vec<Option<BvhNode>>,
}

impl RenderScene {
    /// Validate `scene` and resolve its materials.
    pub fn new(scene: Scene) -> SceneResult<Self> {
        scene.validate()?;

        let materials = scene.materials.iter().map(Material::from).collect();
        let mesh_bvhs = scene.meshes.iter().map(build_bvh).collect();

        let render_scene = Self {
            scene,
            materials,
            mesh_bvhs,
        };

        let scene = &render_scene.scene;
        log::info!(
            "Prepared scene '{}': {} primitives, {} triangles, {} lights, {} materials, bounds {:?}",
            scene.name,
            scene.primitive_count(),
            scene.triangle_count(),
            scene.lights.len(),
            scene.materials.len(),
            render_scene.world_bounds()
        );

        Ok(render_scene)
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn camera(&self) -> &Camera {
        &self.scene.camera
    }

    /// Camera access for pose changes between frames.
    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.scene.camera
    }

    pub fn lights(&self) -> &[Light] {
        &self.scene.lights
    }

    pub fn materials(&self) -> &[Material] {
        &self.materials
    }

    #[inline]
    pub fn material(&self, index: usize) -> &Material {
        debug_assert!(index < self.materials.len(), "material index {index} out of range");
        &self.materials[index]
    }

    /// Edit mesh `index` (transform, triangles) and rebuild its BVH.
    ///
    /// Returns `None` when there is no such mesh.
    pub fn update_mesh<R>(&mut self, index: usize, edit: impl FnOnce(&mut TriangleMesh) -> R) -> Option<R> {
        let mesh = self.scene.meshes.get_mut(index)?;
        let result = edit(mesh);
        debug_assert!(mesh.material < self.materials.len(), "mesh material out of range");
        self.mesh_bvhs[index] = build_bvh(mesh);
        Some(result)
    }

    /// Nearest intersection along `ray` across every primitive.
    pub fn closest_hit(&self, ray: &Ray) -> HitRecord {
        let scene = &self.scene;
        let mut closest = HitRecord::default();

        for sphere in &scene.spheres {
            closest = closest.closest(sphere.hit(ray));
        }
        for plane in &scene.planes {
            closest = closest.closest(plane.hit(ray));
        }
        for triangle in &scene.triangles {
            closest = closest.closest(triangle.hit(ray));
        }
        for (mesh, bvh) in scene.meshes.iter().zip(&self.mesh_bvhs) {
            closest = closest.closest(hit_mesh(mesh, bvh.as_ref(), ray));
        }

        closest
    }

    /// Whether anything intersects `ray` within its range. Used for shadows.
    pub fn does_hit(&self, ray: &Ray) -> bool {
        let scene = &self.scene;

        scene.spheres.iter().any(|s| s.any_hit(ray))
            || scene.planes.iter().any(|p| p.any_hit(ray))
            || scene.triangles.iter().any(|t| t.any_hit(ray))
            || scene
                .meshes
                .iter()
                .zip(&self.mesh_bvhs)
                .any(|(mesh, bvh)| any_hit_mesh(mesh, bvh.as_ref(), ray))
    }

    /// Bounds of every finite primitive. Planes are unbounded and skipped.
    pub fn world_bounds(&self) -> Aabb {
        let scene = &self.scene;

        let spheres = scene.spheres.iter().map(Hittable::bounding_box);
        let triangles = scene.triangles.iter().map(Hittable::bounding_box);
        let meshes = scene
            .meshes
            .iter()
            .zip(&self.mesh_bvhs)
            .map(|(mesh, bvh)| bvh.as_ref().map_or_else(|| mesh.bounding_box(), BvhNode::bounding_box));

        spheres
            .chain(triangles)
            .chain(meshes)
            .fold(Aabb::EMPTY, |acc, b| Aabb::surrounding(&acc, &b))
    }
}

fn build_bvh(mesh: &TriangleMesh) -> Option<BvhNode> {
    mesh.use_bvh.then(|| BvhNode::build(mesh))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::SHADOW_BIAS;
    use lumen_core::{Color, CullMode, MaterialDesc, Plane, Sphere, Triangle};
    use lumen_math::Vec3;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn random_vec(rng: &mut StdRng, extent: f32) -> Vec3 {
        Vec3::new(
            rng.gen_range(-extent..extent),
            rng.gen_range(-extent..extent),
            rng.gen_range(-extent..extent),
        )
    }

    fn one_material_scene() -> (Scene, usize) {
        let mut scene = Scene::new("test");
        let m = scene.add_material(MaterialDesc::lambert(Color::ONE, 1.0));
        (scene, m)
    }

    #[test]
    fn test_closest_hit_across_types() {
        let (mut scene, m) = one_material_scene();
        scene.add_sphere(Sphere::new(Vec3::new(0.0, 0.0, 10.0), 1.0, m)).unwrap();
        scene.add_plane(Plane::new(Vec3::new(0.0, 0.0, 20.0), -Vec3::Z, m)).unwrap();
        scene
            .add_triangle(
                Triangle::new(Vec3::new(-1.0, -1.0, 5.0), Vec3::new(0.0, 1.0, 5.0), Vec3::new(1.0, -1.0, 5.0))
                    .with_cull_mode(CullMode::NoCulling),
            )
            .unwrap();
        let scene = RenderScene::new(scene).unwrap();

        let rec = scene.closest_hit(&Ray::new(Vec3::ZERO, Vec3::Z));
        assert!(rec.did_hit);
        assert!((rec.t - 5.0).abs() < 1e-5);

        let miss = scene.closest_hit(&Ray::new(Vec3::ZERO, -Vec3::Z));
        assert!(!miss.did_hit);
        assert_eq!(miss.t, f32::INFINITY);
    }

    #[test]
    fn test_does_hit_respects_range() {
        let (mut scene, m) = one_material_scene();
        scene.add_sphere(Sphere::new(Vec3::new(0.0, 0.0, 10.0), 1.0, m)).unwrap();
        let scene = RenderScene::new(scene).unwrap();

        let ray = Ray::new(Vec3::ZERO, Vec3::Z);
        assert!(scene.does_hit(&ray));
        assert!(!scene.does_hit(&ray.with_range(1e-4, 5.0)));
    }

    #[test]
    fn test_invalid_scene_is_rejected() {
        let (mut scene, _) = one_material_scene();
        scene.spheres.push(Sphere::new(Vec3::ZERO, 1.0, 4));

        assert!(RenderScene::new(scene).is_err());
    }

    #[test]
    fn test_update_mesh_rebuilds_bvh() {
        let (mut scene, m) = one_material_scene();
        let mesh = TriangleMesh::new(
            vec![Vec3::new(-1.0, -1.0, 0.0), Vec3::new(0.0, 1.0, 0.0), Vec3::new(1.0, -1.0, 0.0)],
            vec![0, 1, 2],
            CullMode::NoCulling,
        )
        .unwrap()
        .with_material(m)
        .enable_bvh();
        scene.add_mesh(mesh).unwrap();
        let mut scene = RenderScene::new(scene).unwrap();

        let ray = Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::Z);
        assert!((scene.closest_hit(&ray).t - 5.0).abs() < 1e-5);

        scene.update_mesh(0, |mesh| mesh.translate(Vec3::new(0.0, 0.0, 3.0))).unwrap();
        assert!((scene.closest_hit(&ray).t - 8.0).abs() < 1e-5);

        assert!(scene.update_mesh(5, |_| ()).is_none());
        assert_eq!(scene.materials().len(), 1);
    }

    #[test]
    fn test_world_bounds_skip_planes() {
        let (mut scene, m) = one_material_scene();
        scene.add_plane(Plane::new(Vec3::ZERO, Vec3::Y, m)).unwrap();
        assert!(RenderScene::new(scene.clone()).unwrap().world_bounds().is_empty());

        scene.add_sphere(Sphere::new(Vec3::new(0.0, 2.0, 0.0), 1.0, m)).unwrap();
        let mesh = TriangleMesh::new(vec![Vec3::ZERO, Vec3::X, Vec3::Y], vec![0, 1, 2], CullMode::NoCulling)
            .unwrap()
            .with_material(m)
            .enable_bvh();
        scene.add_mesh(mesh).unwrap();
        scene.meshes[0].translate(Vec3::new(4.0, 0.0, 0.0));

        let bounds = RenderScene::new(scene).unwrap().world_bounds();
        assert_eq!(bounds.min.x, -1.0);
        assert_eq!(bounds.max.y, 3.0);
        assert!((bounds.max.x - 5.0).abs() < 1e-3);
    }

    #[test]
    fn test_closest_hit_is_minimum_of_single_queries() {
        let mut rng = StdRng::seed_from_u64(21);
        let (mut scene, m) = one_material_scene();

        for _ in 0..12 {
            scene.add_sphere(Sphere::new(random_vec(&mut rng, 8.0), rng.gen_range(0.3..2.0), m)).unwrap();
        }
        for _ in 0..12 {
            let v0 = random_vec(&mut rng, 8.0);
            let tri = Triangle::new(v0, v0 + random_vec(&mut rng, 2.0), v0 + random_vec(&mut rng, 2.0))
                .with_cull_mode(CullMode::NoCulling);
            scene.add_triangle(tri).unwrap();
        }
        for _ in 0..3 {
            let normal = random_vec(&mut rng, 1.0).try_normalize().unwrap_or(Vec3::Y);
            scene.add_plane(Plane::new(normal * -12.0, normal, m)).unwrap();
        }
        for (i, cull_mode) in [CullMode::BackFaceCulling, CullMode::NoCulling].into_iter().enumerate() {
            let mut mesh = TriangleMesh::empty(cull_mode).with_material(m);
            for _ in 0..24 {
                let v0 = random_vec(&mut rng, 3.0);
                let tri = Triangle::new(v0, v0 + random_vec(&mut rng, 1.5), v0 + random_vec(&mut rng, 1.5));
                mesh.append_triangle(&tri, true);
            }
            mesh.update_transforms();
            mesh.translate(random_vec(&mut rng, 4.0));
            if i == 1 {
                mesh = mesh.enable_bvh();
            }
            scene.add_mesh(mesh).unwrap();
        }
        let scene = RenderScene::new(scene).unwrap();
        let source = scene.scene();

        for _ in 0..500 {
            let origin = random_vec(&mut rng, 4.0);
            let ray = Ray::new(origin, random_vec(&mut rng, 1.0).try_normalize().unwrap_or(Vec3::Z));

            let singles = source
                .spheres
                .iter()
                .filter_map(|s| s.hit(&ray))
                .chain(source.planes.iter().filter_map(|p| p.hit(&ray)))
                .chain(source.triangles.iter().filter_map(|t| t.hit(&ray)))
                .chain(source.meshes.iter().filter_map(|mesh| hit_mesh(mesh, None, &ray)))
                .map(|rec| rec.t)
                .fold(f32::INFINITY, f32::min);

            let closest = scene.closest_hit(&ray);
            assert_eq!(closest.t, singles);
            assert_eq!(closest.did_hit, singles.is_finite());
            assert_eq!(scene.does_hit(&ray), singles.is_finite());
        }
    }

    #[test]
    fn test_shadow_bias_prevents_self_occlusion() {
        let mut rng = StdRng::seed_from_u64(5);

        for _ in 0..500 {
            let (mut scene, m) = one_material_scene();
            let center = random_vec(&mut rng, 10.0);
            let radius = rng.gen_range(0.5..5.0);
            scene.add_sphere(Sphere::new(center, radius, m)).unwrap();
            let scene = RenderScene::new(scene).unwrap();

            let normal = random_vec(&mut rng, 1.0).try_normalize().unwrap_or(Vec3::Y);
            let point = center + normal * radius;
            let to_light = (normal + random_vec(&mut rng, 0.9)).try_normalize().unwrap_or(normal);
            if to_light.dot(normal) < 0.1 {
                continue;
            }

            let shadow_ray = Ray::new(point + normal * SHADOW_BIAS, to_light).with_range(1e-4, 100.0);
            assert!(!scene.does_hit(&shadow_ray));
        }

        // Same for the front face of a plane
        let (mut scene, m) = one_material_scene();
        scene.add_plane(Plane::new(Vec3::ZERO, Vec3::Y, m)).unwrap();
        let scene = RenderScene::new(scene).unwrap();
        for _ in 0..100 {
            let point = Vec3::new(rng.gen_range(-50.0..50.0), 0.0, rng.gen_range(-50.0..50.0));
            let to_light = Vec3::new(rng.gen_range(-1.0..1.0), rng.gen_range(0.1..1.0), rng.gen_range(-1.0..1.0)).normalize();
            let shadow_ray = Ray::new(point + Vec3::Y * SHADOW_BIAS, to_light).with_range(1e-4, 100.0);
            assert!(!scene.does_hit(&shadow_ray));
        }
    }
}
