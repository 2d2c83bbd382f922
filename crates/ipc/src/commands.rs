//! Paint command types for the painting engine.

use fluidpaint_config::{ColorModel, QualityTier};
use serde::{Deserialize, Serialize};

/// Commands a host UI can issue to a painting session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PaintCommand {
    /// Wipe the painting
    Clear,
    /// Step back one stroke
    Undo,
    /// Step forward one stroke after an undo
    Redo,
    /// Render the painting at its own resolution for export
    Save,
    /// Resize the painting rectangle (clamped to the allowed range)
    ResizePainting { width: f32, height: f32 },
    /// Resize the canvas surface the painting is displayed on
    ResizeCanvas { width: u32, height: u32 },
    /// Switch the simulation quality tier
    SetQuality { quality: QualityTier },
    /// Set brush color as hue, saturation, value, alpha (0.0-1.0)
    SetBrushColor { hsva: [f32; 4] },
    /// Set brush scale as a fraction of 100 pixels
    SetBrushScale { scale: f32 },
    /// Switch the pigment color model
    SetColorModel { model: ColorModel },
    /// Hold or release the pan modifier (space bar in most hosts)
    SetPanModifier { held: bool },
}
