//! Indexed triangle meshes with a cached world-space copy.
//!
//! A mesh keeps its source vertex/normal buffers untouched and derives
//! transformed copies whenever its transform changes. The derived buffers are
//! index-parallel with the source: `transformed_positions()[i]` is
//! `positions[i]` moved into world space, and `transformed_normals()[f]` is the
//! world-space normal of face `f`.

use lumen_math::{Aabb, Mat4, Mat4Ext, Quat, Transform, Vec3};

use crate::error::{SceneError, SceneResult};
use crate::primitives::{CullMode, Triangle};

/// A triangle mesh sharing one cull mode and one material.
#[derive(Clone, Debug)]
pub struct TriangleMesh {
    /// Local-space vertex positions
    positions: Vec<Vec3>,

    /// Local-space face normals (one per triangle)
    normals: Vec<Vec3>,

    /// Triangle indices (every 3 indices form a triangle)
    indices: Vec<u32>,

    pub cull_mode: CullMode,

    /// Index into the scene's material list
    pub material: usize,

    /// Reject rays against the world bounds before the per-triangle loop
    pub slab_test: bool,

    /// Ask the renderer to build a bounding-volume hierarchy for this mesh
    pub use_bvh: bool,

    transform: Transform,
    transformed_positions: Vec<Vec3>,
    transformed_normals: Vec<Vec3>,
    local_bounds: Aabb,
    world_bounds: Aabb,
}

impl TriangleMesh {
    /// Create a mesh from positions and indices. Face normals are computed
    /// from the winding order.
    pub fn new(positions: Vec<Vec3>, indices: Vec<u32>, cull_mode: CullMode) -> SceneResult<Self> {
        validate_indices(&indices, positions.len())?;

        let mut mesh = Self::from_parts(positions, Vec::new(), indices, cull_mode);
        mesh.calculate_normals();
        Ok(mesh)
    }

    /// Create a mesh with supplied per-face normals (normalized here).
    pub fn with_normals(
        positions: Vec<Vec3>,
        indices: Vec<u32>,
        normals: Vec<Vec3>,
        cull_mode: CullMode,
    ) -> SceneResult<Self> {
        validate_indices(&indices, positions.len())?;
        if normals.len() != indices.len() / 3 {
            return Err(SceneError::NormalCountMismatch {
                normals: normals.len(),
                triangles: indices.len() / 3,
            });
        }

        let normals = normals.into_iter().map(Vec3::normalize_or_zero).collect();
        let mut mesh = Self::from_parts(positions, normals, indices, cull_mode);
        mesh.update_transforms();
        Ok(mesh)
    }

    /// An empty mesh, to be filled with [`TriangleMesh::append_triangle`].
    pub fn empty(cull_mode: CullMode) -> Self {
        Self::from_parts(Vec::new(), Vec::new(), Vec::new(), cull_mode)
    }

    fn from_parts(positions: Vec<Vec3>, normals: Vec<Vec3>, indices: Vec<u32>, cull_mode: CullMode) -> Self {
        let local_bounds = Aabb::from_point_cloud(&positions);
        Self {
            transformed_positions: positions.clone(),
            transformed_normals: normals.clone(),
            positions,
            normals,
            indices,
            cull_mode,
            material: 0,
            slab_test: true,
            use_bvh: false,
            transform: Transform::default(),
            local_bounds,
            world_bounds: local_bounds,
        }
    }

    pub fn with_material(mut self, material: usize) -> Self {
        self.material = material;
        self
    }

    /// Request a BVH instead of the linear triangle scan.
    pub fn enable_bvh(mut self) -> Self {
        self.use_bvh = true;
        self
    }

    /// Recompute face normals from the local positions, replacing any
    /// existing ones, and refresh the world-space buffers.
    pub fn calculate_normals(&mut self) {
        self.normals = self
            .indices
            .chunks_exact(3)
            .map(|face| {
                let p0 = self.positions[face[0] as usize];
                let p1 = self.positions[face[1] as usize];
                let p2 = self.positions[face[2] as usize];
                let normal = (p1 - p0).cross(p2 - p0).normalize_or_zero();
                if normal == Vec3::ZERO {
                    log::warn!("Degenerate triangle [{}, {}, {}]", face[0], face[1], face[2]);
                }
                normal
            })
            .collect();
        self.update_transforms();
    }

    /// Add a standalone triangle as three new vertices.
    ///
    /// Pass `skip_update = true` when appending many triangles and call
    /// [`TriangleMesh::update_transforms`] once at the end.
    pub fn append_triangle(&mut self, triangle: &Triangle, skip_update: bool) {
        let start = self.positions.len() as u32;

        self.positions.extend([triangle.v0, triangle.v1, triangle.v2]);
        self.indices.extend([start, start + 1, start + 2]);
        self.normals.push(triangle.normal);

        // Keep the derived buffers index-parallel even when the update is deferred.
        let matrix = self.transform.to_matrix();
        self.transformed_positions
            .extend([triangle.v0, triangle.v1, triangle.v2].map(|p| matrix.transform_point3(p)));
        self.transformed_normals
            .push(matrix.transform_vector3(triangle.normal).normalize_or_zero());

        self.update_aabb();
        self.world_bounds = matrix.transform_aabb(&self.local_bounds);
        if !skip_update {
            self.update_transforms();
        }
    }

    /// Set the translation and refresh the world-space buffers.
    pub fn translate(&mut self, translation: Vec3) {
        self.transform.translation = translation;
        self.update_transforms();
    }

    /// Set the rotation to `yaw` radians around +Y and refresh.
    pub fn rotate_y(&mut self, yaw: f32) {
        self.set_rotation(Quat::from_rotation_y(yaw));
    }

    /// Set an arbitrary rotation and refresh.
    pub fn set_rotation(&mut self, rotation: Quat) {
        self.transform.rotation = rotation;
        self.update_transforms();
    }

    /// Set the scale and refresh.
    pub fn scale(&mut self, scale: Vec3) {
        self.transform.scale = scale;
        self.update_transforms();
    }

    /// Replace the whole transform and refresh.
    pub fn set_transform(&mut self, transform: Transform) {
        self.transform = transform;
        self.update_transforms();
    }

    /// Re-derive world-space positions, normals and bounds from the transform.
    ///
    /// Normals go through the vector transform and are renormalized since
    /// non-uniform scale changes their length.
    pub fn update_transforms(&mut self) {
        let matrix: Mat4 = self.transform.to_matrix();

        self.transformed_positions.clear();
        self.transformed_positions
            .extend(self.positions.iter().map(|&p| matrix.transform_point3(p)));

        self.transformed_normals.clear();
        self.transformed_normals.extend(
            self.normals
                .iter()
                .map(|&n| matrix.transform_vector3(n).normalize_or_zero()),
        );

        self.world_bounds = matrix.transform_aabb(&self.local_bounds);

        log::debug!(
            "Mesh transform updated: {} vertices, world bounds {:?}",
            self.positions.len(),
            self.world_bounds
        );
    }

    /// Recompute the local bounding box from the source positions.
    pub fn update_aabb(&mut self) {
        self.local_bounds = Aabb::from_point_cloud(&self.positions);
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn normals(&self) -> &[Vec3] {
        &self.normals
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn transformed_positions(&self) -> &[Vec3] {
        &self.transformed_positions
    }

    pub fn transformed_normals(&self) -> &[Vec3] {
        &self.transformed_normals
    }

    pub fn local_bounds(&self) -> Aabb {
        self.local_bounds
    }

    pub fn world_bounds(&self) -> Aabb {
        self.world_bounds
    }

    /// Get the number of triangles in the mesh.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Get the number of vertices in the mesh.
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// World-space vertices of triangle `face`.
    #[inline]
    pub fn world_triangle(&self, face: usize) -> [Vec3; 3] {
        let i = face * 3;
        [
            self.transformed_positions[self.indices[i] as usize],
            self.transformed_positions[self.indices[i + 1] as usize],
            self.transformed_positions[self.indices[i + 2] as usize],
        ]
    }
}

fn validate_indices(indices: &[u32], vertex_count: usize) -> SceneResult<()> {
    if indices.len() % 3 != 0 {
        return Err(SceneError::MalformedIndexBuffer(indices.len()));
    }
    match indices.iter().find(|&&i| i as usize >= vertex_count) {
        Some(&index) => Err(SceneError::InvalidVertexIndex {
            index,
            vertex_count,
        }),
        None => Ok(()),
    }
}
