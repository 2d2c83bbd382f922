//! Shared configuration for the fluid paint engine
//!
//! This crate is the single source of truth for the parameter set a painting
//! session is created with. The host loads it once (usually from JSON) and
//! hands it to the engine, which treats it as immutable for the session.
//!
//! - [`PaintConfig`] - brush, splat, lighting and history parameters
//! - [`QualityTier`] - resolution scale and pressure iteration presets
//! - [`ColorModel`] - subtractive (RYB-like) or additive (RGB) pigment space
//! - [`CanvasConfig`] - initial canvas size and painting size limits

mod canvas;
mod quality;

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

pub use canvas::*;
pub use quality::*;

/// Errors that can occur while loading a configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Pigment color space used by the splat injector and compositor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorModel {
    /// RYB-like model where mixing darkens, like real paint
    #[default]
    #[serde(alias = "RYB", alias = "ryb")]
    Subtractive,
    /// Plain RGB
    #[serde(alias = "RGB", alias = "rgb")]
    Additive,
}

/// Alpha bounds for thin (fewest bristles) and thick (most bristles) brushes
///
/// The injected alpha is first interpolated between the thin and thick
/// ranges by bristle count, then within that range by the artist's alpha.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlphaCalibration {
    pub thin_min: f32,
    pub thin_max: f32,
    pub thick_min: f32,
    pub thick_max: f32,
}

impl Default for AlphaCalibration {
    fn default() -> Self {
        Self {
            thin_min: 0.002,
            thin_max: 0.08,
            thick_min: 0.002,
            thick_max: 0.025,
        }
    }
}

/// Complete parameter set for a painting session
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PaintConfig {
    /// Brush color as hue, saturation, value, alpha (all 0.0-1.0)
    pub color: [f32; 4],
    /// Velocity retention per simulation step (0.0 = no flow, 1.0 = no damping)
    pub fluidity: f32,
    /// Bristle count as a fraction between min and max bristle count
    pub bristle_count: f32,
    /// Brush scale as a fraction of 100 pixels
    pub brush_scale: f32,
    /// Brush anchor height in units of brush scale
    pub brush_height: f32,
    pub roughness: f32,
    pub normal_scale: f32,
    /// Fresnel reflectance at normal incidence
    pub f0: f32,
    pub splat_velocity_scale: f32,
    /// Splat radius in units of brush scale
    pub splat_radius: f32,
    pub max_bristle_count: u32,
    pub min_bristle_count: u32,
    /// Smallest brush scale in pixels
    pub min_brush_scale: f32,
    /// Largest brush scale in pixels
    pub max_brush_scale: f32,
    pub specular_scale: f32,
    pub diffuse_scale: f32,
    pub light_direction: [f32; 3],
    pub color_model: ColorModel,
    pub quality: QualityTier,
    /// Snapshot ring capacity
    pub history_size: usize,
    pub alpha: AlphaCalibration,
    pub canvas: CanvasConfig,
}

impl Default for PaintConfig {
    fn default() -> Self {
        Self {
            color: [0.0, 1.0, 1.0, 0.8],
            fluidity: 0.9,
            bristle_count: 0.6,
            brush_scale: 0.5,
            brush_height: 2.0,
            roughness: 0.075,
            normal_scale: 7.0,
            f0: 1.5,
            splat_velocity_scale: 0.14,
            splat_radius: 0.05,
            max_bristle_count: 100,
            min_bristle_count: 10,
            min_brush_scale: 5.0,
            max_brush_scale: 75.0,
            specular_scale: 0.5,
            diffuse_scale: 0.15,
            light_direction: [0.0, 1.0, 1.0],
            color_model: ColorModel::default(),
            quality: QualityTier::default(),
            history_size: 4,
            alpha: AlphaCalibration::default(),
            canvas: CanvasConfig::default(),
        }
    }
}

impl PaintConfig {
    /// Parse a config from JSON. Missing fields keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        debug!(
            "Loaded paint config: quality={:?}, history_size={}, color_model={:?}",
            config.quality, config.history_size, config.color_model
        );
        Ok(config)
    }

    /// Read and parse a JSON config file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Brush scale in pixels, clamped to the configured brush scale range
    pub fn brush_scale_pixels(&self) -> f32 {
        (self.brush_scale * 100.0).clamp(self.min_brush_scale, self.max_brush_scale)
    }

    /// Number of bristles for a brush of the given scale (in pixels)
    ///
    /// Larger brushes get more bristles; `bristle_count` sets how much of
    /// the min..max bristle range the largest brush reaches.
    pub fn bristle_count_for_scale(&self, scale: f32) -> u32 {
        let min = self.min_bristle_count as f32;
        let max = self.max_bristle_count as f32;
        let scale_range = (self.max_brush_scale - self.min_brush_scale).max(f32::EPSILON);
        let scale_t = ((scale - self.min_brush_scale) / scale_range).clamp(0.0, 1.0);
        let t = self.bristle_count.clamp(0.0, 1.0) * scale_t;
        ((min + (max - min) * t).round() as u32).clamp(self.min_bristle_count, self.max_bristle_count)
    }
}
