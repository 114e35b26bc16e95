//! Lumen Core - scene description for the Lumen ray tracer.
//!
//! This crate provides:
//!
//! - **Primitives**: `Sphere`, `Plane`, `Triangle`, `TriangleMesh`
//! - **Lighting**: point and directional `Light`s
//! - **Camera**: pose, orientation and field of view
//! - **Materials**: serializable `MaterialDesc` shading parameters
//! - **Scene**: the container that ties them together, plus OBJ loading
//!
//! Intersection and shading live in `lumen_renderer`.
//!
//! # Example
//!
//! ```ignore
//! use lumen_core::{load_obj, Scene};
//!
//! let bunny = load_obj("path/to/mesh.obj")?;
//! let scene = Scene::bunny(bunny)?;
//! println!("{} triangles", scene.triangle_count());
//! ```

pub mod camera;
pub mod error;
pub mod light;
pub mod material;
pub mod mesh;
pub mod obj;
pub mod primitives;
pub mod scene;
mod scenes;

// Re-export commonly used types
pub use camera::Camera;
pub use error::{MeshLoadError, SceneError, SceneResult};
pub use light::{Light, LightType};
pub use material::MaterialDesc;
pub use mesh::TriangleMesh;
pub use obj::{load_obj, ObjMesh};
pub use primitives::{CullMode, Plane, Sphere, Triangle};
pub use scene::Scene;

/// Colors are linear RGB triples.
pub type Color = lumen_math::Vec3;
