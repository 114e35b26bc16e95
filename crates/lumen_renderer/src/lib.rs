//! Lumen Renderer - CPU direct-lighting ray tracer
//!
//! Casts one primary ray per pixel against the primitives of a
//! [`lumen_core::Scene`] and shades the closest hit with every light,
//! optionally testing shadow rays. Rows are rendered in parallel with rayon.
//!
//! ```ignore
//! use lumen_core::Scene;
//! use lumen_renderer::{render, RenderScene, RenderSettings};
//!
//! let scene = RenderScene::new(Scene::reference()?)?;
//! let image = render(&scene, &RenderSettings::default());
//! image.save_bmp("out.bmp")?;
//! ```

mod brdf;
mod bvh;
mod camera;
mod hittable;
mod image_buffer;
mod material;
mod mesh;
mod renderer;
mod scene;
mod sphere;
mod triangle;

pub use brdf::{
    cook_torrance, fresnel_schlick, geometry_schlick_ggx, geometry_smith, lambert, lambert_rgb,
    normal_distribution_ggx, phong, DIELECTRIC_F0,
};
pub use bvh::BvhNode;
pub use camera::CameraRays;
pub use hittable::{HitRecord, Hittable};
pub use image_buffer::{ImageBuffer, ImageError, Rgb8};
pub use material::Material;
pub use mesh::{any_hit_mesh, hit_mesh};
pub use renderer::{
    max_to_one, render, render_into, render_pixel, shade_hit, LightingMode, RenderSettings, SHADOW_BIAS,
};
pub use scene::RenderScene;
pub use triangle::intersect_triangle;

pub use lumen_core::Color;
/// Re-export Vec3 and common math types from lumen_math
pub use lumen_math::{Aabb, Interval, Ray, Vec3};
