//! Built-in demo scenes.

use lumen_math::Vec3;

use crate::camera::Camera;
use crate::error::{MeshLoadError, SceneResult};
use crate::light::Light;
use crate::material::MaterialDesc;
use crate::mesh::TriangleMesh;
use crate::obj::ObjMesh;
use crate::primitives::{CullMode, Plane, Sphere, Triangle};
use crate::scene::Scene;
use crate::Color;

const SPHERE_RADIUS: f32 = 0.75;
const COLUMNS: [f32; 3] = [-1.75, 0.0, 1.75];

impl Scene {
    /// Six Cook-Torrance spheres and three culling test triangles inside a
    /// five-sided Lambert box, lit by three coloured point lights.
    ///
    /// The bottom sphere row is metal, the top row plastic; roughness falls
    /// from 1.0 to 0.1 left to right. The triangles above them use back-face,
    /// front-face and no culling respectively.
    pub fn reference() -> SceneResult<Self> {
        let mut scene = Scene::new("reference").with_camera(Camera::new(Vec3::new(0.0, 3.0, -9.0), 45.0));

        let silver = Color::new(0.972, 0.960, 0.915);
        let grey = Color::splat(0.75);
        let roughness = [1.0, 0.6, 0.1];

        let metals = roughness.map(|r| scene.add_material(MaterialDesc::cook_torrance(silver, 1.0, r)));
        let plastics = roughness.map(|r| scene.add_material(MaterialDesc::cook_torrance(grey, 0.0, r)));
        let walls = scene.add_material(MaterialDesc::lambert(Color::new(0.49, 0.57, 0.57), 1.0));
        let white = scene.add_material(MaterialDesc::lambert(Color::ONE, 1.0));

        add_room(&mut scene, walls)?;

        for (i, &x) in COLUMNS.iter().enumerate() {
            scene.add_sphere(Sphere::new(Vec3::new(x, 1.0, 0.0), SPHERE_RADIUS, metals[i]))?;
            scene.add_sphere(Sphere::new(Vec3::new(x, 3.0, 0.0), SPHERE_RADIUS, plastics[i]))?;
        }

        let base = Triangle::new(
            Vec3::new(-0.75, 1.5, 0.0),
            Vec3::new(0.75, 0.0, 0.0),
            Vec3::new(-0.75, 0.0, 0.0),
        );
        let cull_modes = [CullMode::BackFaceCulling, CullMode::FrontFaceCulling, CullMode::NoCulling];
        for (&x, cull_mode) in COLUMNS.iter().zip(cull_modes) {
            let mut mesh = TriangleMesh::empty(cull_mode).with_material(white);
            mesh.append_triangle(&base, true);
            mesh.translate(Vec3::new(x, 4.5, 0.0));
            scene.add_mesh(mesh)?;
        }

        add_lights(&mut scene);
        log::info!(
            "Built scene '{}': {} primitives, {} lights",
            scene.name,
            scene.primitive_count(),
            scene.lights.len()
        );
        Ok(scene)
    }

    /// A loaded mesh standing on the floor of the reference room.
    ///
    /// The mesh is scaled by 2, uses back-face culling and the slab pre-test.
    pub fn bunny(obj: ObjMesh) -> Result<Self, MeshLoadError> {
        let mut scene = Scene::new("bunny").with_camera(Camera::new(Vec3::new(0.0, 3.0, -9.0), 45.0));

        let walls = scene.add_material(MaterialDesc::lambert(Color::new(0.49, 0.57, 0.57), 1.0));
        let white = scene.add_material(MaterialDesc::lambert(Color::ONE, 1.0));
        add_room(&mut scene, walls)?;

        let mut mesh = obj.into_mesh(CullMode::BackFaceCulling)?.with_material(white);
        mesh.scale(Vec3::splat(2.0));
        scene.add_mesh(mesh)?;

        add_lights(&mut scene);
        log::info!(
            "Built scene '{}': {} triangles",
            scene.name,
            scene.triangle_count()
        );
        Ok(scene)
    }
}

/// Back wall, floor, ceiling and side walls, all facing inwards.
fn add_room(scene: &mut Scene, material: usize) -> SceneResult<()> {
    let walls = [
        (Vec3::new(0.0, 0.0, 10.0), -Vec3::Z),
        (Vec3::new(0.0, 0.0, 0.0), Vec3::Y),
        (Vec3::new(0.0, 10.0, 0.0), -Vec3::Y),
        (Vec3::new(5.0, 0.0, 0.0), -Vec3::X),
        (Vec3::new(-5.0, 0.0, 0.0), Vec3::X),
    ];
    for (origin, normal) in walls {
        scene.add_plane(Plane::new(origin, normal, material))?;
    }
    Ok(())
}

fn add_lights(scene: &mut Scene) {
    scene.add_light(Light::point(Vec3::new(0.0, 5.0, 5.0), 50.0, Color::new(1.0, 0.61, 0.45)));
    scene.add_light(Light::point(Vec3::new(-2.5, 5.0, -5.0), 70.0, Color::new(1.0, 0.8, 0.45)));
    scene.add_light(Light::point(Vec3::new(2.5, 2.5, -5.0), 50.0, Color::new(0.34, 0.47, 0.68)));
}
