//! Painting session
//!
//! Owns every piece of simulation state and drives the per-frame pipeline:
//! - Pointer input moves the brush and switches the interaction mode
//! - `step` updates bristles, splats while painting, advances the fluid and
//!   composites the frame
//! - Snapshots are taken at interaction boundaries (stroke start, resize,
//!   quality change) and restored by undo/redo
//!
//! Everything runs on the caller's thread, one `step` per display refresh.

mod commands;
mod stroke;
mod surface_ops;
mod undo;

use fluidpaint_config::{ColorModel, PaintConfig, QualityTier};
use glam::Vec2;
use image::RgbaImage;
use tracing::info;

use crate::bristle::Brush;
use crate::compositor::Compositor;
use crate::field::{FieldGrid, grid_resolution};
use crate::fluid::FluidSolver;
use crate::history::SnapshotRing;
use crate::perf::FrameStats;
use crate::types::{Interaction, Rectangle};

/// A single interactive painting
pub struct PaintSession {
    pub(crate) config: PaintConfig,
    pub(crate) canvas_width: u32,
    pub(crate) canvas_height: u32,
    /// Painting placement on the canvas, bottom-left origin
    pub(crate) painting: Rectangle,
    pub(crate) quality: QualityTier,
    pub(crate) resolution_scale: f32,
    pub(crate) fields: FieldGrid,
    pub(crate) solver: FluidSolver,
    pub(crate) brush: Brush,
    /// Brush scale in pixels
    pub(crate) brush_scale: f32,
    pub(crate) brush_position: Vec2,
    /// Hue, saturation, value, alpha
    pub(crate) brush_color: [f32; 4],
    pub(crate) interaction: Interaction,
    pub(crate) pan_modifier: bool,
    pub(crate) history: SnapshotRing,
    pub(crate) compositor: Compositor,
    pub(crate) frame: RgbaImage,
    pub(crate) needs_redraw: bool,
    pub(crate) stats: FrameStats,
    pub(crate) last_export: Option<RgbaImage>,
}

impl PaintSession {
    /// Start a session with an empty painting filling the canvas
    pub fn new(config: PaintConfig) -> Self {
        let canvas = &config.canvas;
        let canvas_width = canvas.width.max(1);
        let canvas_height = canvas.height.max(1);
        let padding = canvas.initial_padding;
        let painting = Rectangle::new(
            padding,
            padding,
            canvas.clamp_painting_dimension(canvas_width as f32 - padding * 2.0),
            canvas.clamp_painting_dimension(canvas_height as f32 - padding * 2.0),
        );

        let quality = config.quality;
        let resolution_scale = quality.resolution_scale();
        let (grid_width, grid_height) =
            grid_resolution(painting.width, painting.height, resolution_scale);

        let brush_scale = config.brush_scale_pixels();
        let brush = build_brush(&config, brush_scale);

        info!(
            "Paint session: canvas {}x{}, painting {}x{}, grid {}x{} ({})",
            canvas_width,
            canvas_height,
            painting.width,
            painting.height,
            grid_width,
            grid_height,
            quality.name()
        );

        Self {
            canvas_width,
            canvas_height,
            painting,
            quality,
            resolution_scale,
            fields: FieldGrid::new(grid_width, grid_height),
            solver: FluidSolver::new(quality.jacobi_iterations(), config.fluidity),
            brush,
            brush_scale,
            brush_position: Vec2::ZERO,
            brush_color: config.color,
            interaction: Interaction::Idle,
            pan_modifier: false,
            history: SnapshotRing::new(config.history_size, grid_width, grid_height),
            compositor: Compositor::new(&config),
            frame: RgbaImage::new(canvas_width, canvas_height),
            needs_redraw: true,
            stats: FrameStats::default(),
            last_export: None,
            config,
        }
    }

    pub fn config(&self) -> &PaintConfig {
        &self.config
    }

    pub fn canvas_size(&self) -> (u32, u32) {
        (self.canvas_width, self.canvas_height)
    }

    pub fn painting(&self) -> Rectangle {
        self.painting
    }

    pub fn quality(&self) -> QualityTier {
        self.quality
    }

    pub fn resolution_scale(&self) -> f32 {
        self.resolution_scale
    }

    pub fn fields(&self) -> &FieldGrid {
        &self.fields
    }

    pub fn brush(&self) -> &Brush {
        &self.brush
    }

    /// Brush scale in pixels
    pub fn brush_scale(&self) -> f32 {
        self.brush_scale
    }

    pub fn brush_color(&self) -> [f32; 4] {
        self.brush_color
    }

    pub fn color_model(&self) -> ColorModel {
        self.compositor.color_model()
    }

    pub fn interaction(&self) -> Interaction {
        self.interaction
    }

    pub fn history(&self) -> &SnapshotRing {
        &self.history
    }

    /// The last composited frame, canvas-sized, top row first
    pub fn frame(&self) -> &RgbaImage {
        &self.frame
    }

    pub fn needs_redraw(&self) -> bool {
        self.needs_redraw
    }

    pub fn stats(&self) -> &FrameStats {
        &self.stats
    }

    /// Take the image produced by the last `Save` command
    pub fn take_export(&mut self) -> Option<RgbaImage> {
        self.last_export.take()
    }

    /// Keep the painting reachable: at least its far corner stays on canvas
    pub(crate) fn clamp_painting_position(&mut self) {
        let p = &mut self.painting;
        p.left = p.left.clamp(-p.width, self.canvas_width as f32);
        p.bottom = p.bottom.clamp(-p.height, self.canvas_height as f32);
    }
}

pub(crate) fn build_brush(config: &PaintConfig, scale: f32) -> Brush {
    Brush::new(
        config.bristle_count_for_scale(scale) as usize,
        config.max_bristle_count as usize,
        scale,
    )
}
