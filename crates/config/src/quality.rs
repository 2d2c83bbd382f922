//! Quality tiers: resolution scale and pressure solver effort

use serde::{Deserialize, Serialize};

/// Simulation quality preset
///
/// Each tier selects both the simulation resolution scale (grid cells per
/// painting pixel) and the number of Jacobi iterations used for pressure
/// projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QualityTier {
    Low,
    Medium,
    #[default]
    High,
}

impl QualityTier {
    /// All tiers from lowest to highest
    pub const ALL: [QualityTier; 3] = [QualityTier::Low, QualityTier::Medium, QualityTier::High];

    /// Grid cells per painting pixel
    pub fn resolution_scale(self) -> f32 {
        match self {
            QualityTier::Low => 0.1,
            QualityTier::Medium => 1.5,
            QualityTier::High => 2.0,
        }
    }

    /// Jacobi iterations per pressure projection
    pub fn jacobi_iterations(self) -> u32 {
        match self {
            QualityTier::Low => 8,
            QualityTier::Medium => 16,
            QualityTier::High => 24,
        }
    }

    /// The largest resolution scale of any tier
    pub fn highest_resolution_scale() -> f32 {
        Self::ALL
            .iter()
            .map(|tier| tier.resolution_scale())
            .fold(0.0, f32::max)
    }

    /// Tier whose resolution scale matches `scale`, if any
    pub fn from_resolution_scale(scale: f32) -> Option<QualityTier> {
        Self::ALL
            .into_iter()
            .find(|tier| (tier.resolution_scale() - scale).abs() < 1e-6)
    }

    pub fn name(self) -> &'static str {
        match self {
            QualityTier::Low => "Low",
            QualityTier::Medium => "Medium",
            QualityTier::High => "High",
        }
    }
}
