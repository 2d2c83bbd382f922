//! Painting-level operations: clear, resize, quality, brush settings, export

use fluidpaint_config::{ColorModel, QualityTier};
use image::RgbaImage;
use tracing::debug;

use crate::error::PaintError;
use crate::field::{ResampleMode, grid_resolution};

use super::{PaintSession, build_brush};

impl PaintSession {
    /// Wipe the painting. Not recorded in the history.
    pub fn clear(&mut self) {
        self.fields.clear();
        self.solver.reset();
        self.needs_redraw = true;
        debug!("Painting cleared");
    }

    /// Resize the painting, keeping its content anchored at the bottom-left.
    ///
    /// Sizes are clamped to the allowed range. The previous painting is saved
    /// to the history first. Returns false if the clamped size is unchanged
    /// or an interaction is in progress.
    pub fn resize_painting(&mut self, width: f32, height: f32) -> bool {
        if !self.interaction.is_idle() {
            debug!("Painting resize ignored during {:?}", self.interaction);
            return false;
        }
        let canvas = &self.config.canvas;
        let width = canvas.clamp_painting_dimension(width);
        let height = canvas.clamp_painting_dimension(height);
        if width == self.painting.width && height == self.painting.height {
            return false;
        }

        self.save_snapshot();
        self.painting.width = width;
        self.painting.height = height;
        let (grid_width, grid_height) = grid_resolution(width, height, self.resolution_scale);
        self.fields
            .change_resolution(grid_width, grid_height, ResampleMode::Anchored);
        self.clamp_painting_position();
        self.solver.reset();
        self.needs_redraw = true;

        debug!(
            "Painting resized to {}x{} (grid {}x{})",
            width, height, grid_width, grid_height
        );
        true
    }

    /// The host's canvas surface changed size
    pub fn resize_canvas(&mut self, width: u32, height: u32) {
        self.canvas_width = width.max(1);
        self.canvas_height = height.max(1);
        self.frame = RgbaImage::new(self.canvas_width, self.canvas_height);
        self.clamp_painting_position();
        self.needs_redraw = true;
        debug!("Canvas resized to {}x{}", self.canvas_width, self.canvas_height);
    }

    /// Switch quality tier, resampling the painting to the new resolution.
    ///
    /// The painting at the old resolution is saved to the history first.
    /// Refused mid-interaction, like undo.
    pub fn set_quality(&mut self, quality: QualityTier) -> bool {
        if !self.interaction.is_idle() {
            debug!("Quality change ignored during {:?}", self.interaction);
            return false;
        }
        if quality == self.quality {
            return false;
        }

        self.save_snapshot();
        self.quality = quality;
        self.resolution_scale = quality.resolution_scale();
        self.solver.set_iterations(quality.jacobi_iterations());
        let (grid_width, grid_height) =
            grid_resolution(self.painting.width, self.painting.height, self.resolution_scale);
        self.fields
            .change_resolution(grid_width, grid_height, ResampleMode::Stretch);
        self.solver.reset();
        self.needs_redraw = true;

        debug!(
            "Quality set to {} (grid {}x{})",
            quality.name(),
            grid_width,
            grid_height
        );
        true
    }

    pub fn set_brush_color(&mut self, hsva: [f32; 4]) {
        self.brush_color = hsva.map(|c| c.clamp(0.0, 1.0));
    }

    pub fn set_color_model(&mut self, model: ColorModel) {
        if model != self.compositor.color_model() {
            self.compositor.set_color_model(model);
            self.needs_redraw = true;
        }
    }

    /// Rebuild the brush at a new scale (fraction of 100 pixels).
    ///
    /// The bristle count is fixed per brush, so this is refused mid-interaction.
    pub fn set_brush_scale(&mut self, scale: f32) -> bool {
        if !self.interaction.is_idle() {
            debug!("Brush scale change ignored during {:?}", self.interaction);
            return false;
        }
        let pixels = (scale * 100.0).clamp(self.config.min_brush_scale, self.config.max_brush_scale);
        let was_placed = self.brush.is_initialized();

        self.brush_scale = pixels;
        self.brush = build_brush(&self.config, pixels);
        if was_placed {
            let p = self.brush_position;
            self.brush
                .initialize(p.x, p.y, self.config.brush_height * pixels);
        }
        true
    }

    pub fn set_pan_modifier(&mut self, held: bool) {
        self.pan_modifier = held;
    }

    /// Render the painting at its own size for saving
    pub fn export_image(&self) -> Result<RgbaImage, PaintError> {
        self.compositor.render_export(
            self.fields.layer(),
            self.painting.width,
            self.painting.height,
            self.resolution_scale,
        )
    }
}
