//! Canvas and painting size limits

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::QualityTier;

/// Default canvas width in pixels
pub const DEFAULT_CANVAS_WIDTH: u32 = 1280;

/// Default canvas height in pixels
pub const DEFAULT_CANVAS_HEIGHT: u32 = 800;

/// Smallest usable painting width or height in pixels
pub const MIN_PAINTING_WIDTH: f32 = 300.0;

/// Largest painting width or height in pixels, before hardware limits
pub const MAX_PAINTING_WIDTH: f32 = 4096.0;

/// Largest grid dimension the simulation substrate can address
pub const DEFAULT_MAX_GRID_DIMENSION: u32 = 8192;

/// Canvas (screen surface) configuration and painting size bounds
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    /// Canvas width in pixels
    pub width: u32,
    /// Canvas height in pixels
    pub height: u32,
    /// Padding between the canvas edge and the initial painting
    pub initial_padding: f32,
    pub min_painting_width: f32,
    pub max_painting_width: f32,
    /// Maximum addressable grid dimension of the simulation substrate
    pub max_grid_dimension: u32,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_CANVAS_WIDTH,
            height: DEFAULT_CANVAS_HEIGHT,
            initial_padding: 0.0,
            min_painting_width: MIN_PAINTING_WIDTH,
            max_painting_width: MAX_PAINTING_WIDTH,
            max_grid_dimension: DEFAULT_MAX_GRID_DIMENSION,
        }
    }
}

impl CanvasConfig {
    /// Create a canvas config with the given dimensions
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    /// Effective maximum painting width
    ///
    /// Bounded so that the highest quality tier never produces a grid larger
    /// than the substrate can address.
    pub fn effective_max_painting_width(&self) -> f32 {
        let hardware_max =
            self.max_grid_dimension as f32 / QualityTier::highest_resolution_scale();
        self.max_painting_width
            .min(hardware_max)
            .max(self.min_painting_width)
    }

    /// Clamp a painting dimension into `[min_painting_width, effective max]`
    pub fn clamp_painting_dimension(&self, value: f32) -> f32 {
        let clamped = value.clamp(self.min_painting_width, self.effective_max_painting_width());
        if clamped != value {
            debug!("Clamped painting dimension {:.1} -> {:.1}", value, clamped);
        }
        clamped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_max_width_bounded_by_hardware() {
        let mut config = CanvasConfig::default();
        config.max_grid_dimension = 4096;
        // 4096 / 2.0 (high tier) = 2048
        assert_eq!(config.effective_max_painting_width(), 2048.0);

        config.max_grid_dimension = 16384;
        assert_eq!(config.effective_max_painting_width(), MAX_PAINTING_WIDTH);
    }

    #[test]
    fn test_clamp_is_idempotent() {
        let config = CanvasConfig::default();
        for value in [0.0, 150.0, 300.0, 1000.0, 4096.0, 9000.0] {
            let once = config.clamp_painting_dimension(value);
            let twice = config.clamp_painting_dimension(once);
            assert_eq!(once, twice);
            assert!(once >= config.min_painting_width);
            assert!(once <= config.effective_max_painting_width());
        }
    }
}
