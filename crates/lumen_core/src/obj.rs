//! Wavefront OBJ loading.
//!
//! Only positions and triangle faces are used. Polygons are triangulated on
//! load and every model in the file is merged into one index buffer. Normals
//! are always recomputed per face from the winding order.

use std::path::Path;

use lumen_math::Vec3;

use crate::error::MeshLoadError;
use crate::mesh::TriangleMesh;
use crate::primitives::CullMode;

/// Raw geometry read from an OBJ file.
#[derive(Clone, Debug, Default)]
pub struct ObjMesh {
    pub positions: Vec<Vec3>,
    pub indices: Vec<u32>,
}

impl ObjMesh {
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Build a [`TriangleMesh`] with per-face normals.
    pub fn into_mesh(self, cull_mode: CullMode) -> Result<TriangleMesh, MeshLoadError> {
        Ok(TriangleMesh::new(self.positions, self.indices, cull_mode)?)
    }
}

/// Load an OBJ file.
pub fn load_obj<P: AsRef<Path>>(path: P) -> Result<ObjMesh, MeshLoadError> {
    let path = path.as_ref();
    let (models, _materials) = tobj::load_obj(
        path,
        &tobj::LoadOptions {
            single_index: true,
            triangulate: true,
            ..Default::default()
        },
    )?;

    let mut obj = ObjMesh::default();
    for model in &models {
        let mesh = &model.mesh;
        let base = obj.positions.len() as u32;

        obj.positions.extend(
            mesh.positions
                .chunks_exact(3)
                .map(|p| Vec3::new(p[0], p[1], p[2])),
        );
        obj.indices.extend(mesh.indices.iter().map(|&i| base + i));
    }

    if obj.indices.is_empty() {
        return Err(MeshLoadError::Empty(path.display().to_string()));
    }

    log::info!(
        "Loaded {}: {} models, {} vertices, {} triangles",
        path.display(),
        models.len(),
        obj.positions.len(),
        obj.triangle_count()
    );

    Ok(obj)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_temp(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("lumen_core_{}_{name}", std::process::id()));
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_load_quad_is_triangulated() {
        let path = write_temp(
            "quad.obj",
            "# unit quad\nv 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf 1 2 3 4\n",
        );

        let obj = load_obj(&path).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(obj.positions.len(), 4);
        assert_eq!(obj.triangle_count(), 2);

        let mesh = obj.into_mesh(CullMode::BackFaceCulling).unwrap();
        for normal in mesh.normals() {
            assert!((*normal - Vec3::Z).length() < 1e-5);
        }
    }

    #[test]
    fn test_models_are_merged() {
        let path = write_temp(
            "two.obj",
            "o a\nv 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\no b\nv 0 0 1\nv 1 0 1\nv 0 1 1\nf 4 5 6\n",
        );

        let obj = load_obj(&path).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(obj.triangle_count(), 2);
        assert!(obj.indices.iter().all(|&i| (i as usize) < obj.positions.len()));
        assert_eq!(obj.positions[obj.indices[3] as usize], Vec3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn test_no_faces_is_an_error() {
        let path = write_temp("points.obj", "v 0 0 0\nv 1 0 0\n");

        let result = load_obj(&path);
        fs::remove_file(&path).ok();

        assert!(matches!(result, Err(MeshLoadError::Empty(_))));
    }

    #[test]
    fn test_missing_file() {
        let result = load_obj("/definitely/not/here.obj");
        assert!(matches!(result, Err(MeshLoadError::Obj(_))));
    }
}
