//! BRDF building blocks.
//!
//! Direction conventions: `l` points from the surface towards the light,
//! `v` points from the surface towards the viewer, `n` is the unit surface
//! normal. All three are expected to be unit length.

use lumen_core::Color;
use lumen_math::{reflect, Vec3};
use std::f32::consts::PI;

/// Base reflectivity of dielectrics at normal incidence.
pub const DIELECTRIC_F0: Color = Color::splat(0.04);

/// Lambert diffuse: `cd * kd / pi`.
#[inline]
pub fn lambert(kd: f32, cd: Color) -> Color {
    cd * kd / PI
}

/// Lambert diffuse with a per-channel reflectance.
#[inline]
pub fn lambert_rgb(kd: Color, cd: Color) -> Color {
    kd * cd / PI
}

/// Phong specular lobe: `ks * max(0, dot(reflect(l, n), -v))^exp`, white.
#[inline]
pub fn phong(ks: f32, exp: f32, l: Vec3, v: Vec3, n: Vec3) -> Color {
    let r = reflect(l, n);
    let cos_alpha = r.dot(-v).max(0.0);
    Color::splat(ks * cos_alpha.powf(exp))
}

/// Schlick's Fresnel approximation.
#[inline]
pub fn fresnel_schlick(h: Vec3, v: Vec3, f0: Color) -> Color {
    f0 + (Color::ONE - f0) * (1.0 - h.dot(v)).powi(5)
}

/// Trowbridge-Reitz GGX normal distribution with `alpha^2 = roughness^4`.
#[inline]
pub fn normal_distribution_ggx(n: Vec3, h: Vec3, roughness: f32) -> f32 {
    let a2 = roughness * roughness * roughness * roughness;
    let n_dot_h = n.dot(h);
    let denom = n_dot_h * n_dot_h * (a2 - 1.0) + 1.0;
    // A perfectly smooth surface makes the lobe a delta at n == h.
    a2 / (PI * (denom * denom).max(f32::MIN_POSITIVE))
}

/// Schlick-GGX geometry term for one direction with remapped `k`.
#[inline]
pub fn geometry_schlick_ggx(n: Vec3, x: Vec3, k: f32) -> f32 {
    let n_dot_x = n.dot(x).max(0.0);
    let denom = n_dot_x * (1.0 - k) + k;
    if denom <= 0.0 {
        return 0.0;
    }
    n_dot_x / denom
}

/// Smith geometry term for direct lighting, `k = (roughness + 1)^2 / 8`.
#[inline]
pub fn geometry_smith(n: Vec3, v: Vec3, l: Vec3, roughness: f32) -> f32 {
    let k = (roughness + 1.0) * (roughness + 1.0) / 8.0;
    geometry_schlick_ggx(n, v, k) * geometry_schlick_ggx(n, l, k)
}

/// Full Cook-Torrance evaluation (diffuse + specular).
///
/// When either `n.v` or `n.l` is not positive the specular term is dropped
/// and only the diffuse part is returned.
pub fn cook_torrance(albedo: Color, f0: Color, metalness: f32, roughness: f32, n: Vec3, l: Vec3, v: Vec3) -> Color {
    let metal = metalness != 0.0;
    let n_dot_v = n.dot(v);
    let n_dot_l = n.dot(l);

    if n_dot_v <= 0.0 || n_dot_l <= 0.0 {
        let kd = if metal { Color::ZERO } else { Color::ONE };
        return lambert_rgb(kd, albedo);
    }

    let h = (v + l).normalize_or_zero();
    let f = fresnel_schlick(h, v, f0);
    let d = normal_distribution_ggx(n, h, roughness);
    let g = geometry_smith(n, v, l, roughness);

    let specular = f * d * g / (4.0 * n_dot_v * n_dot_l);
    let kd = if metal { Color::ZERO } else { Color::ONE - specular };

    lambert_rgb(kd, albedo) + specular
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn random_hemisphere(rng: &mut StdRng, n: Vec3) -> Vec3 {
        loop {
            let v = Vec3::new(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0));
            let len = v.length();
            if len > 1e-3 && len <= 1.0 {
                let v = v / len;
                return if v.dot(n) < 0.0 { -v } else { v };
            }
        }
    }

    #[test]
    fn test_lambert_value() {
        let c = lambert(0.5, Color::new(1.0, 0.5, 0.0));
        assert!((c - Color::new(0.5, 0.25, 0.0) / PI).length() < 1e-6);
    }

    #[test]
    fn test_lambert_bounded() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..200 {
            let kd = rng.gen_range(0.0..1.0);
            let cd = Color::new(rng.gen_range(0.0..1.0), rng.gen_range(0.0..1.0), rng.gen_range(0.0..1.0));
            let c = lambert(kd, cd);

            assert!(c.cmpge(Color::ZERO).all());
            assert!(c.cmple(cd / PI * kd + Color::splat(1e-6)).all());
        }
    }

    #[test]
    fn test_phong_peak_at_mirror_direction() {
        let n = Vec3::Y;
        let l = Vec3::new(1.0, 1.0, 0.0).normalize();
        // Viewer on the mirror side of the light
        let v = Vec3::new(-1.0, 1.0, 0.0).normalize();

        let peak = phong(0.5, 10.0, l, v, n);
        assert!((peak - Color::splat(0.5)).length() < 1e-5);

        let off = phong(0.5, 10.0, l, Vec3::new(0.0, 1.0, 1.0).normalize(), n);
        assert!(off.x < peak.x);

        // Viewer on the light's side gets nothing
        assert_eq!(phong(0.5, 10.0, l, l, n), Color::ZERO);
    }

    #[test]
    fn test_fresnel_at_normal_incidence_is_f0() {
        let f = fresnel_schlick(Vec3::Y, Vec3::Y, DIELECTRIC_F0);
        assert!((f - DIELECTRIC_F0).length() < 1e-6);

        let grazing = fresnel_schlick(Vec3::Y, Vec3::X, DIELECTRIC_F0);
        assert!((grazing - Color::ONE).length() < 1e-6);
    }

    #[test]
    fn test_geometry_in_unit_range() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..200 {
            let v = random_hemisphere(&mut rng, Vec3::Y);
            let l = random_hemisphere(&mut rng, Vec3::Y);
            let g = geometry_smith(Vec3::Y, v, l, rng.gen_range(0.0..1.0));
            assert!((0.0..=1.0).contains(&g));
        }
    }

    #[test]
    fn test_cook_torrance_zero_cosine_is_diffuse_only() {
        let albedo = Color::splat(0.75);
        let grazing_light = Vec3::X;
        let v = Vec3::Y;

        let c = cook_torrance(albedo, DIELECTRIC_F0, 0.0, 0.5, Vec3::Y, grazing_light, v);
        assert!(c.is_finite());
        assert!((c - albedo / PI).length() < 1e-6);

        let metal = cook_torrance(albedo, albedo, 1.0, 0.5, Vec3::Y, v, grazing_light);
        assert_eq!(metal, Color::ZERO);
    }

    #[test]
    fn test_cook_torrance_finite_and_non_negative() {
        let mut rng = StdRng::seed_from_u64(99);
        let albedo = Color::new(0.972, 0.960, 0.915);
        for _ in 0..500 {
            let v = random_hemisphere(&mut rng, Vec3::Y);
            let l = random_hemisphere(&mut rng, Vec3::Y);
            let roughness = rng.gen_range(0.0..=1.0);

            let metal = cook_torrance(albedo, albedo, 1.0, roughness, Vec3::Y, l, v);
            assert!(metal.is_finite(), "{metal:?}");
            assert!(metal.cmpge(Color::ZERO).all());

            let plastic = cook_torrance(albedo, DIELECTRIC_F0, 0.0, roughness, Vec3::Y, l, v);
            assert!(plastic.is_finite(), "{plastic:?}");
        }
    }

    #[test]
    fn test_metal_has_no_diffuse() {
        // Light and view far from the mirror configuration with a smooth
        // surface: almost no specular, and metals have no diffuse.
        let n = Vec3::Y;
        let l = Vec3::new(1.0, 1.0, 0.0).normalize();
        let v = Vec3::new(1.0, 0.2, 0.0).normalize();
        let albedo = Color::ONE;

        let metal = cook_torrance(albedo, albedo, 1.0, 0.1, n, l, v);
        let plastic = cook_torrance(albedo, DIELECTRIC_F0, 0.0, 0.1, n, l, v);
        assert!(metal.x < 1e-3);
        assert!(plastic.x > 0.3);
    }
}
