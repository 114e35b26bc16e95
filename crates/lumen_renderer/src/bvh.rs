//! Bounding Volume Hierarchy (BVH) over the faces of one triangle mesh.
//!
//! The tree stores face indices only; vertex data stays in the mesh's
//! world-space buffers. It has to be rebuilt whenever the mesh transform
//! changes.

use lumen_core::TriangleMesh;
use lumen_math::{Aabb, Ray};

use crate::triangle::{intersect_triangle, triangle_bounds};

/// Maximum faces per leaf node before splitting.
const LEAF_MAX_SIZE: usize = 4;

/// BVH node - either a branch with two children or a leaf with faces.
#[derive(Debug)]
pub enum BvhNode {
    /// Internal node with two children.
    Branch {
        left: Box<BvhNode>,
        right: Box<BvhNode>,
        bbox: Aabb,
    },
    /// Leaf node with a small number of faces.
    Leaf { faces: Vec<usize>, bbox: Aabb },
    /// Empty node (mesh without triangles).
    Empty,
}

/// Face entry used during construction.
#[derive(Clone, Copy)]
struct BuildFace {
    index: usize,
    bbox: Aabb,
}

impl BvhNode {
    /// Build a BVH for the mesh's current world-space triangles.
    pub fn build(mesh: &TriangleMesh) -> Self {
        let faces: Vec<BuildFace> = (0..mesh.triangle_count())
            .map(|index| {
                let [v0, v1, v2] = mesh.world_triangle(index);
                BuildFace {
                    index,
                    bbox: triangle_bounds(v0, v1, v2),
                }
            })
            .collect();

        if faces.is_empty() {
            return BvhNode::Empty;
        }

        let node = Self::build_recursive(faces);
        log::debug!(
            "Built mesh BVH: {} faces, depth {}",
            mesh.triangle_count(),
            node.depth()
        );
        node
    }

    /// Simple median-split approach: sort faces by centroid on the longest
    /// centroid axis, split in half, recurse.
    fn build_recursive(mut faces: Vec<BuildFace>) -> Self {
        let bounds = faces
            .iter()
            .fold(Aabb::EMPTY, |acc, f| Aabb::surrounding(&acc, &f.bbox));

        if faces.len() <= LEAF_MAX_SIZE {
            return BvhNode::Leaf {
                faces: faces.iter().map(|f| f.index).collect(),
                bbox: bounds,
            };
        }

        let centroid_bounds = faces.iter().fold(Aabb::EMPTY, |acc, f| {
            let c = f.bbox.centroid();
            Aabb::surrounding(&acc, &Aabb::from_points(c, c))
        });
        let axis = centroid_bounds.longest_axis();

        faces.sort_unstable_by(|a, b| {
            let a_val = a.bbox.centroid()[axis];
            let b_val = b.bbox.centroid()[axis];
            a_val.total_cmp(&b_val)
        });

        let right_faces = faces.split_off(faces.len() / 2);

        BvhNode::Branch {
            left: Box::new(Self::build_recursive(faces)),
            right: Box::new(Self::build_recursive(right_faces)),
            bbox: bounds,
        }
    }

    /// Nearest face hit: `(t, face index)`.
    pub fn hit(&self, mesh: &TriangleMesh, ray: &Ray) -> Option<(f32, usize)> {
        match self {
            BvhNode::Empty => None,

            BvhNode::Leaf { faces, bbox } => {
                if !bbox.hit(ray, ray.interval()) {
                    return None;
                }

                let mut closest: Option<(f32, usize)> = None;
                for &face in faces {
                    let [v0, v1, v2] = mesh.world_triangle(face);
                    let Some(t) = intersect_triangle(ray, v0, v1, v2, mesh.cull_mode) else {
                        continue;
                    };
                    if closest.map_or(true, |(best, _)| t < best) {
                        closest = Some((t, face));
                    }
                }
                closest
            }

            BvhNode::Branch { left, right, bbox } => {
                if !bbox.hit(ray, ray.interval()) {
                    return None;
                }

                let hit_left = left.hit(mesh, ray);

                // Only check right up to closest hit
                let right_ray = match hit_left {
                    Some((t, _)) => ray.with_range(ray.min, t),
                    None => *ray,
                };
                match right.hit(mesh, &right_ray) {
                    Some(hit_right) => Some(hit_right),
                    None => hit_left,
                }
            }
        }
    }

    /// Whether any face is hit within the ray's range.
    pub fn any_hit(&self, mesh: &TriangleMesh, ray: &Ray) -> bool {
        match self {
            BvhNode::Empty => false,

            BvhNode::Leaf { faces, bbox } => {
                bbox.hit(ray, ray.interval())
                    && faces.iter().any(|&face| {
                        let [v0, v1, v2] = mesh.world_triangle(face);
                        intersect_triangle(ray, v0, v1, v2, mesh.cull_mode).is_some()
                    })
            }

            BvhNode::Branch { left, right, bbox } => {
                bbox.hit(ray, ray.interval()) && (left.any_hit(mesh, ray) || right.any_hit(mesh, ray))
            }
        }
    }

    pub fn bounding_box(&self) -> Aabb {
        match self {
            BvhNode::Empty => Aabb::EMPTY,
            BvhNode::Leaf { bbox, .. } => *bbox,
            BvhNode::Branch { bbox, .. } => *bbox,
        }
    }

    pub fn depth(&self) -> usize {
        match self {
            BvhNode::Empty | BvhNode::Leaf { .. } => 1,
            BvhNode::Branch { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }
}
