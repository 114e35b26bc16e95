//! Scene container for the Lumen ray tracer.
//!
//! A [`Scene`] owns every primitive, light and material description plus the
//! camera. Primitives refer to materials by index; the `add_*` methods check
//! those indices so the render loop never has to.

use crate::camera::Camera;
use crate::error::{SceneError, SceneResult};
use crate::light::Light;
use crate::material::MaterialDesc;
use crate::mesh::TriangleMesh;
use crate::primitives::{Plane, Sphere, Triangle};

/// A complete scene description.
#[derive(Clone, Debug, Default)]
pub struct Scene {
    /// Scene name (shown in logs)
    pub name: String,

    pub camera: Camera,

    pub spheres: Vec<Sphere>,
    pub planes: Vec<Plane>,
    pub triangles: Vec<Triangle>,
    pub meshes: Vec<TriangleMesh>,
    pub lights: Vec<Light>,

    /// Materials referenced by index from the primitives
    pub materials: Vec<MaterialDesc>,
}

impl Scene {
    /// Create an empty scene.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_camera(mut self, camera: Camera) -> Self {
        self.camera = camera;
        self
    }

    /// Add a material to the scene and return its index.
    pub fn add_material(&mut self, material: MaterialDesc) -> usize {
        let id = self.materials.len();
        self.materials.push(material);
        id
    }

    /// Add a sphere and return its index.
    pub fn add_sphere(&mut self, sphere: Sphere) -> SceneResult<usize> {
        self.check_material(sphere.material)?;
        self.spheres.push(sphere);
        Ok(self.spheres.len() - 1)
    }

    /// Add a plane and return its index.
    pub fn add_plane(&mut self, plane: Plane) -> SceneResult<usize> {
        self.check_material(plane.material)?;
        self.planes.push(plane);
        Ok(self.planes.len() - 1)
    }

    /// Add a standalone triangle and return its index.
    pub fn add_triangle(&mut self, triangle: Triangle) -> SceneResult<usize> {
        self.check_material(triangle.material)?;
        if triangle.double_area() == 0.0 {
            log::warn!("Adding zero-area triangle {:?} to scene '{}'", triangle.v0, self.name);
        }
        self.triangles.push(triangle);
        Ok(self.triangles.len() - 1)
    }

    /// Add a triangle mesh and return its index.
    pub fn add_mesh(&mut self, mesh: TriangleMesh) -> SceneResult<usize> {
        self.check_material(mesh.material)?;
        self.meshes.push(mesh);
        Ok(self.meshes.len() - 1)
    }

    /// Add a light and return its index.
    pub fn add_light(&mut self, light: Light) -> usize {
        self.lights.push(light);
        self.lights.len() - 1
    }

    /// Get a material by index.
    pub fn get_material(&self, id: usize) -> Option<&MaterialDesc> {
        self.materials.get(id)
    }

    pub fn material_count(&self) -> usize {
        self.materials.len()
    }

    /// Standalone triangles plus every mesh triangle.
    pub fn triangle_count(&self) -> usize {
        self.triangles.len() + self.meshes.iter().map(TriangleMesh::triangle_count).sum::<usize>()
    }

    /// Number of intersectable objects (meshes count once).
    pub fn primitive_count(&self) -> usize {
        self.spheres.len() + self.planes.len() + self.triangles.len() + self.meshes.len()
    }

    /// Re-check every material reference.
    ///
    /// Needed only when the public fields were edited directly; the `add_*`
    /// methods already check on insertion.
    pub fn validate(&self) -> SceneResult<()> {
        let references = self
            .spheres
            .iter()
            .map(|s| s.material)
            .chain(self.planes.iter().map(|p| p.material))
            .chain(self.triangles.iter().map(|t| t.material))
            .chain(self.meshes.iter().map(|m| m.material));

        for index in references {
            self.check_material(index)?;
        }
        Ok(())
    }

    fn check_material(&self, index: usize) -> SceneResult<()> {
        if index < self.materials.len() {
            Ok(())
        } else {
            Err(SceneError::InvalidMaterialIndex {
                index,
                count: self.materials.len(),
            })
        }
    }
}
