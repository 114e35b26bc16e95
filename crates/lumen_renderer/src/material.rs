//! Shading materials.
//!
//! A closed set of BRDF models, each with one operation: the color reflected
//! towards the viewer for a single light direction. Constant parts are
//! precomputed when converting from a [`MaterialDesc`].

use lumen_core::{Color, MaterialDesc};
use lumen_math::Vec3;

use crate::brdf;
use crate::hittable::HitRecord;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Material {
    /// Constant color, ignores lighting
    SolidColor { color: Color },

    /// Energy-conserving diffuse
    Lambert {
        /// Precomputed `cd * kd / pi`
        diffuse: Color,
    },

    /// Lambert diffuse plus a Phong specular lobe
    LambertPhong { diffuse: Color, ks: f32, exponent: f32 },

    /// Microfacet specular with energy-compensated Lambert diffuse
    CookTorrance {
        albedo: Color,
        /// Reflectance at normal incidence
        f0: Color,
        metalness: f32,
        roughness: f32,
    },
}

impl Material {
    pub fn solid_color(color: Color) -> Self {
        Self::SolidColor { color }
    }

    pub fn lambert(diffuse_color: Color, kd: f32) -> Self {
        Self::Lambert {
            diffuse: brdf::lambert(kd, diffuse_color),
        }
    }

    pub fn lambert_phong(diffuse_color: Color, kd: f32, ks: f32, exponent: f32) -> Self {
        Self::LambertPhong {
            diffuse: brdf::lambert(kd, diffuse_color),
            ks,
            exponent,
        }
    }

    /// Dielectrics (`metalness == 0`) use a fixed F0 of 0.04; anything else
    /// reflects with its albedo.
    pub fn cook_torrance(albedo: Color, metalness: f32, roughness: f32) -> Self {
        let f0 = if metalness == 0.0 {
            brdf::DIELECTRIC_F0
        } else {
            albedo
        };
        Self::CookTorrance {
            albedo,
            f0,
            metalness,
            roughness,
        }
    }

    /// Reflected color for light arriving from `l` and leaving towards `v`.
    ///
    /// `l` points towards the light and `v` towards the viewer; both unit length.
    pub fn shade(&self, hit: &HitRecord, l: Vec3, v: Vec3) -> Color {
        match *self {
            Material::SolidColor { color } => color,
            Material::Lambert { diffuse } => diffuse,
            Material::LambertPhong {
                diffuse,
                ks,
                exponent,
            } => diffuse + brdf::phong(ks, exponent, l, v, hit.normal),
            Material::CookTorrance {
                albedo,
                f0,
                metalness,
                roughness,
            } => brdf::cook_torrance(albedo, f0, metalness, roughness, hit.normal, l, v),
        }
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::SolidColor { color: Color::ONE }
    }
}

impl From<&MaterialDesc> for Material {
    fn from(desc: &MaterialDesc) -> Self {
        match *desc {
            MaterialDesc::SolidColor { color } => Material::solid_color(color),
            MaterialDesc::Lambert { diffuse_color, kd } => Material::lambert(diffuse_color, kd),
            MaterialDesc::LambertPhong {
                diffuse_color,
                kd,
                ks,
                phong_exponent,
            } => Material::lambert_phong(diffuse_color, kd, ks, phong_exponent),
            MaterialDesc::CookTorrance {
                albedo,
                metalness,
                roughness,
            } => Material::cook_torrance(albedo, metalness, roughness),
        }
    }
}
