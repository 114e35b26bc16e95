//! Camera pose and field of view.
//!
//! Input handling lives outside the core; it mutates the pose through the
//! methods here between frames. The renderer reads `origin`, the basis from
//! [`Camera::camera_to_world`], and [`Camera::fov_scale`] once per frame.

use lumen_math::{EulerRot, Mat4, Quat, Vec3, Vec4};
use serde::{Deserialize, Serialize};

/// Pitch is kept short of straight up/down so the basis stays defined.
const MAX_PITCH_DEGREES: f32 = 89.0;
const MIN_FOV_DEGREES: f32 = 1.0;
const MAX_FOV_DEGREES: f32 = 179.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub origin: Vec3,
    /// Full field-of-view angle in degrees
    pub fov_angle: f32,
    pub forward: Vec3,
    pub up: Vec3,
    pub right: Vec3,
    /// Degrees, positive tilts the view down
    total_pitch: f32,
    /// Degrees, positive turns from +Z towards +X
    total_yaw: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec3::ZERO, 90.0)
    }
}

impl Camera {
    /// A camera at `origin` looking down +Z.
    pub fn new(origin: Vec3, fov_angle: f32) -> Self {
        Self {
            origin,
            fov_angle,
            forward: Vec3::Z,
            up: Vec3::Y,
            right: Vec3::X,
            total_pitch: 0.0,
            total_yaw: 0.0,
        }
    }

    pub fn with_rotation(mut self, pitch_degrees: f32, yaw_degrees: f32) -> Self {
        self.set_rotation(pitch_degrees, yaw_degrees);
        self
    }

    /// The camera-to-world matrix derived from `forward` and `origin`.
    ///
    /// Columns are (right, up, forward, origin). The basis is horizon-locked:
    /// `right` always lies in the XZ plane.
    pub fn camera_to_world(&self) -> Mat4 {
        let (right, up) = self.derive_right_up();
        Mat4::from_cols(
            Vec4::from((right, 0.0)),
            Vec4::from((up, 0.0)),
            Vec4::from((self.forward, 0.0)),
            Vec4::from((self.origin, 1.0)),
        )
    }

    fn derive_right_up(&self) -> (Vec3, Vec3) {
        let right = Vec3::new(self.forward.z, 0.0, -self.forward.x).normalize();
        (right, self.forward.cross(right))
    }

    /// `tan(fov / 2)`, the half-height of the image plane at distance 1.
    pub fn fov_scale(&self) -> f32 {
        (self.fov_angle.to_radians() / 2.0).tan()
    }

    /// World-space unit direction through the centre of pixel (`px`, `py`).
    ///
    /// Pixel (0, 0) is the top-left corner of the image.
    pub fn ray_direction(&self, px: u32, py: u32, width: u32, height: u32) -> Vec3 {
        let aspect = width as f32 / height as f32;
        let fov = self.fov_scale();

        let ndc_x = 2.0 * (px as f32 + 0.5) / width as f32 - 1.0;
        let ndc_y = 1.0 - 2.0 * (py as f32 + 0.5) / height as f32;
        let local = Vec3::new(ndc_x * aspect * fov, ndc_y * fov, 1.0);

        self.camera_to_world().transform_vector3(local).normalize()
    }

    pub fn pitch(&self) -> f32 {
        self.total_pitch
    }

    pub fn yaw(&self) -> f32 {
        self.total_yaw
    }

    /// Set absolute pitch and yaw (degrees) and recompute `forward`.
    pub fn set_rotation(&mut self, pitch_degrees: f32, yaw_degrees: f32) {
        self.total_pitch = pitch_degrees.clamp(-MAX_PITCH_DEGREES, MAX_PITCH_DEGREES);
        self.total_yaw = yaw_degrees;

        let rotation = Quat::from_euler(
            EulerRot::YXZ,
            self.total_yaw.to_radians(),
            self.total_pitch.to_radians(),
            0.0,
        );
        self.forward = (rotation * Vec3::Z).normalize();
        (self.right, self.up) = self.derive_right_up();
    }

    /// Add to pitch and yaw (degrees).
    pub fn rotate(&mut self, delta_pitch: f32, delta_yaw: f32) {
        self.set_rotation(self.total_pitch + delta_pitch, self.total_yaw + delta_yaw);
    }

    /// Move along the camera's own axes.
    pub fn move_local(&mut self, right: f32, up: f32, forward: f32) {
        self.origin += self.right * right + self.up * up + self.forward * forward;
    }

    /// Move along the view direction (scroll-wheel zoom).
    pub fn dolly(&mut self, amount: f32) {
        self.origin += self.forward * amount;
    }

    pub fn increase_fov(&mut self) {
        self.set_fov(self.fov_angle + 1.0);
    }

    pub fn decrease_fov(&mut self) {
        self.set_fov(self.fov_angle - 1.0);
    }

    pub fn set_fov(&mut self, degrees: f32) {
        self.fov_angle = degrees.clamp(MIN_FOV_DEGREES, MAX_FOV_DEGREES);
    }
}
