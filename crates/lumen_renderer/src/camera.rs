//! Per-frame camera ray generation.

use lumen_core::Camera;
use lumen_math::{Mat4, Ray, Vec3};

/// Camera state frozen for one frame.
///
/// The camera pose is read once when the frame starts; every pixel then
/// shares the same basis, aspect ratio and FOV scale.
#[derive(Clone, Copy, Debug)]
pub struct CameraRays {
    origin: Vec3,
    camera_to_world: Mat4,
    width: f32,
    height: f32,
    aspect: f32,
    fov_scale: f32,
}

impl CameraRays {
    pub fn new(camera: &Camera, width: u32, height: u32) -> Self {
        Self {
            origin: camera.origin,
            camera_to_world: camera.camera_to_world(),
            width: width as f32,
            height: height as f32,
            aspect: width as f32 / height as f32,
            fov_scale: camera.fov_scale(),
        }
    }

    /// Primary ray through the centre of pixel (`px`, `py`).
    ///
    /// Pixel (0, 0) is the top-left corner of the image.
    #[inline]
    pub fn ray(&self, px: u32, py: u32) -> Ray {
        let ndc_x = 2.0 * (px as f32 + 0.5) / self.width - 1.0;
        let ndc_y = 1.0 - 2.0 * (py as f32 + 0.5) / self.height;

        let local = Vec3::new(ndc_x * self.aspect * self.fov_scale, ndc_y * self.fov_scale, 1.0);
        let direction = self.camera_to_world.transform_vector3(local).normalize();

        Ray::new(self.origin, direction)
    }
}
