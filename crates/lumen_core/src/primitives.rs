//! Analytic primitives: spheres, planes and single triangles.
//!
//! These are plain data; `lumen_renderer` implements ray intersection for them.

use lumen_math::Vec3;
use serde::{Deserialize, Serialize};

/// A sphere primitive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sphere {
    pub origin: Vec3,
    pub radius: f32,
    /// Index into the scene's material list
    pub material: usize,
}

impl Sphere {
    pub fn new(origin: Vec3, radius: f32, material: usize) -> Self {
        Self {
            origin,
            radius,
            material,
        }
    }
}

/// An infinite plane, visible only from the side its normal points to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Plane {
    pub origin: Vec3,
    /// Unit normal
    pub normal: Vec3,
    pub material: usize,
}

impl Plane {
    /// Create a plane. The normal is normalized.
    pub fn new(origin: Vec3, normal: Vec3, material: usize) -> Self {
        Self {
            origin,
            normal: normal.normalize(),
            material,
        }
    }
}

/// Which triangle faces are skipped by intersection tests.
///
/// The front face is the one whose normal points against the ray.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CullMode {
    /// Rays hitting the front face are ignored
    FrontFaceCulling,
    /// Rays hitting the back face are ignored
    #[default]
    BackFaceCulling,
    /// Both faces are hit
    NoCulling,
}

impl CullMode {
    /// The mode that culls the opposite face. `NoCulling` maps to itself.
    pub fn flipped(self) -> Self {
        match self {
            CullMode::FrontFaceCulling => CullMode::BackFaceCulling,
            CullMode::BackFaceCulling => CullMode::FrontFaceCulling,
            CullMode::NoCulling => CullMode::NoCulling,
        }
    }
}

/// A single triangle with a flat face normal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Triangle {
    pub v0: Vec3,
    pub v1: Vec3,
    pub v2: Vec3,
    /// Pre-computed face normal (unit length)
    pub normal: Vec3,
    pub cull_mode: CullMode,
    pub material: usize,
}

impl Triangle {
    /// Create a triangle, deriving the normal from the winding
    /// `cross(v1 - v0, v2 - v0)`.
    pub fn new(v0: Vec3, v1: Vec3, v2: Vec3) -> Self {
        let normal = (v1 - v0).cross(v2 - v0).normalize_or_zero();
        Self::with_normal(v0, v1, v2, normal)
    }

    /// Create a triangle with a supplied normal (normalized here).
    pub fn with_normal(v0: Vec3, v1: Vec3, v2: Vec3, normal: Vec3) -> Self {
        Self {
            v0,
            v1,
            v2,
            normal: normal.normalize_or_zero(),
            cull_mode: CullMode::default(),
            material: 0,
        }
    }

    pub fn with_cull_mode(mut self, cull_mode: CullMode) -> Self {
        self.cull_mode = cull_mode;
        self
    }

    pub fn with_material(mut self, material: usize) -> Self {
        self.material = material;
        self
    }

    /// Twice the triangle's area. Zero for degenerate triangles.
    pub fn double_area(&self) -> f32 {
        (self.v1 - self.v0).cross(self.v2 - self.v0).length()
    }
}
