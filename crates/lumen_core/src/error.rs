//! Error types for scene construction and mesh loading.

use thiserror::Error;

/// Errors raised while assembling a [`Scene`](crate::Scene).
///
/// These are caught when a primitive is added, so the render loop can index
/// materials and vertices without checking.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SceneError {
    #[error("Material index {index} out of range ({count} materials registered)")]
    InvalidMaterialIndex { index: usize, count: usize },

    #[error("Mesh index {index} references a missing vertex ({vertex_count} vertices)")]
    InvalidVertexIndex { index: u32, vertex_count: usize },

    #[error("Mesh index buffer length {0} is not a multiple of 3")]
    MalformedIndexBuffer(usize),

    #[error("Mesh has {normals} face normals for {triangles} triangles")]
    NormalCountMismatch { normals: usize, triangles: usize },
}

/// Result type for scene construction.
pub type SceneResult<T> = Result<T, SceneError>;

/// Errors that can occur while loading a mesh from disk.
#[derive(Error, Debug)]
pub enum MeshLoadError {
    #[error("OBJ load error: {0}")]
    Obj(#[from] tobj::LoadError),

    #[error("No geometry found in {0}")]
    Empty(String),

    #[error("Invalid mesh: {0}")]
    Invalid(#[from] SceneError),
}
