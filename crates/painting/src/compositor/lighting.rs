//! Relief lighting for the paint surface.
//!
//! Paint thickness is treated as a height field. Its normal drives a
//! wrap-free Lambert term relative to a flat canvas and a Beckmann specular
//! highlight with Schlick Fresnel, so thick ridges catch the light.

use fluidpaint_config::{ColorModel, PaintConfig};
use glam::Vec3;

use crate::color::{mix, pigment_to_rgb};
use crate::field::PaintLayer;

/// Lighting parameters resolved from the session config
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightingParams {
    pub light_direction: Vec3,
    pub roughness: f32,
    /// Reflectance at normal incidence
    pub f0: f32,
    pub normal_scale: f32,
    pub specular_scale: f32,
    pub diffuse_scale: f32,
}

impl LightingParams {
    pub fn from_config(config: &PaintConfig) -> Self {
        Self {
            light_direction: Vec3::from_array(config.light_direction)
                .try_normalize()
                .unwrap_or(Vec3::Z),
            roughness: config.roughness.max(1e-3),
            f0: reflectance_from_f0(config.f0),
            normal_scale: config.normal_scale,
            specular_scale: config.specular_scale,
            diffuse_scale: config.diffuse_scale,
        }
    }
}

/// Values above one are read as an index of refraction
pub fn reflectance_from_f0(f0: f32) -> f32 {
    if f0 > 1.0 {
        let r = (f0 - 1.0) / (f0 + 1.0);
        r * r
    } else {
        f0.max(0.0)
    }
}

/// Surface normal of the thickness field at a cell position
pub fn surface_normal(layer: &PaintLayer, cell: glam::Vec2, height_scale: f32) -> Vec3 {
    let (_, left) = layer.sample(cell - glam::Vec2::X);
    let (_, right) = layer.sample(cell + glam::Vec2::X);
    let (_, below) = layer.sample(cell - glam::Vec2::Y);
    let (_, above) = layer.sample(cell + glam::Vec2::Y);

    let dx = (right - left) * 0.5 * height_scale;
    let dy = (above - below) * 0.5 * height_scale;
    Vec3::new(-dx, -dy, 1.0).normalize()
}

fn beckmann(n_dot_h: f32, roughness: f32) -> f32 {
    let cos2 = n_dot_h * n_dot_h;
    let m2 = roughness * roughness;
    ((cos2 - 1.0) / (m2 * cos2)).exp() / (std::f32::consts::PI * m2 * cos2 * cos2)
}

fn fresnel_schlick(cos_theta: f32, f0: f32) -> f32 {
    f0 + (1.0 - f0) * (1.0 - cos_theta).clamp(0.0, 1.0).powi(5)
}

/// Lit display color for one paint sample
pub fn shade(pigment: [f32; 4], normal: Vec3, model: ColorModel, params: &LightingParams) -> [f32; 3] {
    let coverage = pigment[3].clamp(0.0, 1.0);
    let paint = pigment_to_rgb([pigment[0], pigment[1], pigment[2]], model);

    let light = params.light_direction;
    let view = Vec3::Z;
    let diffuse = 1.0 + params.diffuse_scale * (normal.dot(light) - Vec3::Z.dot(light));

    let half = (light + view).normalize();
    let n_dot_h = normal.dot(half).max(1e-4);
    let n_dot_l = normal.dot(light).max(0.0);
    let specular = beckmann(n_dot_h, params.roughness)
        * fresnel_schlick(view.dot(half), params.f0)
        * n_dot_l
        * params.specular_scale
        * coverage;

    std::array::from_fn(|c| {
        let surface = mix(1.0, paint[c].clamp(0.0, 1.0), coverage);
        (surface * diffuse + specular).clamp(0.0, 1.0)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> LightingParams {
        LightingParams::from_config(&PaintConfig::default())
    }

    #[test]
    fn test_ior_to_reflectance() {
        assert!((reflectance_from_f0(1.5) - 0.04).abs() < 1e-6);
        assert_eq!(reflectance_from_f0(0.5), 0.5);
    }

    #[test]
    fn test_empty_flat_canvas_is_white() {
        let rgb = shade([0.0; 4], Vec3::Z, ColorModel::Additive, &params());
        assert!(rgb.iter().all(|c| (c - 1.0).abs() < 1e-4));
    }

    #[test]
    fn test_flat_paint_shows_its_color() {
        let rgb = shade([0.2, 0.4, 0.6, 1.0], Vec3::Z, ColorModel::Additive, &params());
        assert!((rgb[0] - 0.2).abs() < 1e-3);
        assert!((rgb[1] - 0.4).abs() < 1e-3);
        assert!((rgb[2] - 0.6).abs() < 1e-3);
    }

    #[test]
    fn test_slope_facing_light_is_brighter() {
        let p = params();
        let pigment = [0.5, 0.5, 0.5, 1.0];
        let towards = shade(pigment, Vec3::new(0.0, 0.3, 1.0).normalize(), ColorModel::Additive, &p);
        let away = shade(pigment, Vec3::new(0.0, -0.3, 1.0).normalize(), ColorModel::Additive, &p);
        assert!(towards[0] > away[0]);
    }

    #[test]
    fn test_flat_layer_normal_points_up() {
        let layer = PaintLayer::new(4, 4);
        let n = surface_normal(&layer, glam::Vec2::new(1.5, 1.5), 7.0);
        assert!((n - Vec3::Z).length() < 1e-6);
    }
}
