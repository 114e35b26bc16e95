//! Analytic light sources.

use lumen_math::Vec3;
use serde::{Deserialize, Serialize};

use crate::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LightType {
    /// Emits from `origin`, attenuated by inverse squared distance
    Point,
    /// Emits along `direction` with no attenuation
    Directional,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Light {
    pub origin: Vec3,
    /// Direction the light travels (directional lights only)
    pub direction: Vec3,
    pub color: Color,
    pub intensity: f32,
    pub kind: LightType,
}

impl Light {
    pub fn point(origin: Vec3, intensity: f32, color: Color) -> Self {
        Self {
            origin,
            direction: Vec3::ZERO,
            color,
            intensity,
            kind: LightType::Point,
        }
    }

    /// A directional light travelling along `direction` (normalized here).
    pub fn directional(direction: Vec3, intensity: f32, color: Color) -> Self {
        Self {
            origin: Vec3::ZERO,
            direction: direction.normalize(),
            color,
            intensity,
            kind: LightType::Directional,
        }
    }

    /// Unit direction from `target` towards the light, and the distance to it.
    ///
    /// Directional lights are infinitely far away; their distance is `f32::MAX`.
    pub fn direction_to(&self, target: Vec3) -> (Vec3, f32) {
        match self.kind {
            LightType::Point => {
                let to_light = self.origin - target;
                let distance = to_light.length();
                (to_light / distance, distance)
            }
            LightType::Directional => (-self.direction, f32::MAX),
        }
    }

    /// Radiance arriving at `target`.
    pub fn radiance(&self, target: Vec3) -> Color {
        match self.kind {
            LightType::Point => {
                self.color * (self.intensity / (self.origin - target).length_squared())
            }
            LightType::Directional => self.color * self.intensity,
        }
    }
}
