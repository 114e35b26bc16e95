//! Direct-lighting render loop.
//!
//! Every pixel casts one primary ray, finds the closest hit, then sums the
//! contribution of each light under the selected [`LightingMode`]. Rows are
//! rendered in parallel; each worker writes only its own row.

use std::time::Instant;

use lumen_core::{Color, Light};
use lumen_math::{Ray, Vec3, RAY_EPSILON};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::camera::CameraRays;
use crate::hittable::HitRecord;
use crate::image_buffer::ImageBuffer;
use crate::material::Material;
use crate::scene::RenderScene;

/// Offset applied along the hit normal before casting a shadow ray.
pub const SHADOW_BIAS: f32 = 1e-3;

/// What each light contributes to a pixel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LightingMode {
    /// Lambert cosine term only, as grey
    ObservedArea,
    /// Incident radiance only
    Radiance,
    /// Material response only
    Brdf,
    /// Radiance * BRDF * cosine
    #[default]
    Combined,
}

impl LightingMode {
    /// Cycle ObservedArea -> Radiance -> Brdf -> Combined -> ObservedArea.
    pub fn next(self) -> Self {
        match self {
            LightingMode::ObservedArea => LightingMode::Radiance,
            LightingMode::Radiance => LightingMode::Brdf,
            LightingMode::Brdf => LightingMode::Combined,
            LightingMode::Combined => LightingMode::ObservedArea,
        }
    }
}

/// Per-frame render configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    pub width: u32,
    pub height: u32,
    pub shadows_enabled: bool,
    pub lighting_mode: LightingMode,
    /// Color for rays that hit nothing
    pub background: Color,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            shadows_enabled: true,
            lighting_mode: LightingMode::Combined,
            background: Color::ZERO,
        }
    }
}

impl RenderSettings {
    pub fn toggle_shadows(&mut self) {
        self.shadows_enabled = !self.shadows_enabled;
    }

    pub fn cycle_lighting_mode(&mut self) {
        self.lighting_mode = self.lighting_mode.next();
    }
}

/// Scale a color down so its largest channel is at most 1, preserving hue.
#[inline]
pub fn max_to_one(color: Color) -> Color {
    let max = color.max_element();
    if max > 1.0 {
        color / max
    } else {
        color
    }
}

/// Whether `light` is blocked as seen from `hit`.
fn is_shadowed(scene: &RenderScene, hit: &HitRecord, to_light: Vec3, distance: f32) -> bool {
    let origin = hit.point + hit.normal * SHADOW_BIAS;
    let shadow_ray = Ray::new(origin, to_light).with_range(RAY_EPSILON, distance);
    scene.does_hit(&shadow_ray)
}

/// Accumulated light at `hit`, seen along `view_dir` (the primary ray direction).
pub fn shade_hit(scene: &RenderScene, hit: &HitRecord, view_dir: Vec3, settings: &RenderSettings) -> Color {
    let material = scene.material(hit.material);
    let v = -view_dir;
    let mut color = Color::ZERO;

    for light in scene.lights() {
        let (l, distance) = light.direction_to(hit.point);
        let cosine = hit.normal.dot(l);

        let shadowed = || settings.shadows_enabled && is_shadowed(scene, hit, l, distance);

        match settings.lighting_mode {
            LightingMode::ObservedArea => {
                if cosine < 0.0 || shadowed() {
                    continue;
                }
                color += Color::splat(cosine);
            }
            LightingMode::Radiance => {
                if shadowed() {
                    continue;
                }
                color += light.radiance(hit.point);
            }
            LightingMode::Brdf => {
                if shadowed() {
                    continue;
                }
                color += material.shade(hit, l, v);
            }
            LightingMode::Combined => {
                if cosine < 0.0 || shadowed() {
                    continue;
                }
                color += combined(light, material, hit, l, v, cosine);
            }
        }
    }

    color
}

#[inline]
fn combined(light: &Light, material: &Material, hit: &HitRecord, l: Vec3, v: Vec3, cosine: f32) -> Color {
    light.radiance(hit.point) * material.shade(hit, l, v) * cosine
}

/// Tone-mapped color of one pixel.
pub fn render_pixel(scene: &RenderScene, rays: &CameraRays, px: u32, py: u32, settings: &RenderSettings) -> Color {
    let ray = rays.ray(px, py);
    let hit = scene.closest_hit(&ray);
    if !hit.did_hit {
        return settings.background;
    }

    max_to_one(shade_hit(scene, &hit, ray.direction, settings))
}

/// Render the scene into a new image buffer.
pub fn render(scene: &RenderScene, settings: &RenderSettings) -> ImageBuffer {
    let mut image = ImageBuffer::new(settings.width, settings.height);
    render_into(&mut image, scene, settings);
    image
}

/// Render into an existing buffer, resizing it to the settings if needed.
pub fn render_into(image: &mut ImageBuffer, scene: &RenderScene, settings: &RenderSettings) {
    if image.width != settings.width || image.height != settings.height {
        image.resize(settings.width, settings.height);
    }
    if settings.width == 0 || settings.height == 0 {
        return;
    }

    let start = Instant::now();
    let rays = CameraRays::new(scene.camera(), settings.width, settings.height);

    image
        .pixels
        .par_chunks_mut(settings.width as usize)
        .enumerate()
        .for_each(|(py, row)| {
            for (px, pixel) in row.iter_mut().enumerate() {
                *pixel = render_pixel(scene, &rays, px as u32, py as u32, settings);
            }
        });

    log::info!(
        "Rendered {}x{} ({:?}, shadows {}) in {:.2?}",
        settings.width,
        settings.height,
        settings.lighting_mode,
        if settings.shadows_enabled { "on" } else { "off" },
        start.elapsed()
    );
}
