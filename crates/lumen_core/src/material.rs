//! Serializable material descriptions.
//!
//! The renderer turns these into its shading `Material`, precomputing the
//! constant parts of each BRDF.

use serde::{Deserialize, Serialize};

use crate::Color;

/// Shading parameters for one of the four supported material models.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum MaterialDesc {
    /// Constant color, ignores lighting
    SolidColor { color: Color },

    /// Energy-conserving diffuse
    Lambert {
        diffuse_color: Color,
        /// Diffuse reflectance (kd)
        kd: f32,
    },

    /// Lambert diffuse plus a Phong specular lobe
    LambertPhong {
        diffuse_color: Color,
        kd: f32,
        /// Specular reflectance (ks)
        ks: f32,
        phong_exponent: f32,
    },

    /// Microfacet specular (GGX / Smith / Schlick) with Lambert diffuse
    CookTorrance {
        albedo: Color,
        /// 0 = dielectric, anything else = metal
        metalness: f32,
        /// 0 = smooth, 1 = rough
        roughness: f32,
    },
}

impl MaterialDesc {
    pub fn solid_color(color: Color) -> Self {
        Self::SolidColor { color }
    }

    pub fn lambert(diffuse_color: Color, kd: f32) -> Self {
        Self::Lambert { diffuse_color, kd }
    }

    pub fn lambert_phong(diffuse_color: Color, kd: f32, ks: f32, phong_exponent: f32) -> Self {
        Self::LambertPhong {
            diffuse_color,
            kd,
            ks,
            phong_exponent,
        }
    }

    pub fn cook_torrance(albedo: Color, metalness: f32, roughness: f32) -> Self {
        Self::CookTorrance {
            albedo,
            metalness,
            roughness,
        }
    }
}

impl Default for MaterialDesc {
    fn default() -> Self {
        Self::SolidColor { color: Color::ONE }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_material_json_is_tagged() {
        let desc = MaterialDesc::lambert(Color::new(1.0, 0.5, 0.25), 0.8);
        let json = serde_json::to_string(&desc).unwrap();
        assert!(json.contains("\"type\":\"Lambert\""));

        let back: MaterialDesc = serde_json::from_str(&json).unwrap();
        assert_eq!(back, desc);
    }
}
