//! Pointer handling and the per-frame pipeline

use fluidpaint_ipc::PointerButton;
use glam::Vec2;
use tracing::{debug, trace};

use crate::color::hsv_to_pigment;
use crate::constants::RESIZING_RADIUS;
use crate::perf::timed;
use crate::splat::{SplatParams, splat, splat_alpha};
use crate::types::{Interaction, ResizeHandle};

use super::PaintSession;

impl PaintSession {
    /// Host coordinates (y down) to canvas coordinates (y up)
    fn to_canvas(&self, x: f32, y: f32) -> Vec2 {
        Vec2::new(x, self.canvas_height as f32 - y)
    }

    /// Anchor height above the canvas
    fn brush_height(&self) -> f32 {
        self.config.brush_height * self.brush_scale
    }

    fn place_brush(&mut self, point: Vec2) {
        self.brush_position = point;
        if !self.brush.is_initialized() {
            let z = self.brush_height();
            self.brush.initialize(point.x, point.y, z);
        }
    }

    /// The interaction a primary press at `point` would start
    pub fn desired_interaction(&self, point: Vec2) -> Interaction {
        if self.pan_modifier {
            return Interaction::Panning { last: point };
        }
        match ResizeHandle::at(&self.painting, point, RESIZING_RADIUS) {
            Some(handle) => Interaction::Resizing {
                preview: self.painting,
                handle,
            },
            None => Interaction::Painting,
        }
    }

    /// Pointer pressed at host coordinates.
    ///
    /// Only the primary button starts an interaction. Starting a stroke
    /// saves a snapshot so the stroke can be undone.
    pub fn pointer_down(&mut self, x: f32, y: f32, button: PointerButton) -> bool {
        if !button.is_primary() || !self.interaction.is_idle() {
            return false;
        }
        let point = self.to_canvas(x, y);
        self.place_brush(point);

        let interaction = self.desired_interaction(point);
        match interaction {
            Interaction::Painting => {
                self.save_snapshot();
                debug!("Stroke start at ({:.1}, {:.1})", point.x, point.y);
            }
            Interaction::Resizing { handle, .. } => {
                debug!("Resize start ({:?})", handle);
                self.needs_redraw = true;
            }
            Interaction::Panning { .. } => debug!("Pan start"),
            Interaction::Idle => {}
        }
        self.interaction = interaction;
        true
    }

    /// Pointer moved to host coordinates
    pub fn pointer_move(&mut self, x: f32, y: f32) {
        let point = self.to_canvas(x, y);
        self.place_brush(point);

        match self.interaction {
            Interaction::Resizing {
                mut preview,
                handle,
            } => {
                let canvas = &self.config.canvas;
                if handle.right {
                    preview.width = canvas.clamp_painting_dimension(point.x - preview.left);
                }
                if handle.top {
                    preview.height = canvas.clamp_painting_dimension(point.y - preview.bottom);
                }
                self.interaction = Interaction::Resizing { preview, handle };
                self.needs_redraw = true;
            }
            Interaction::Panning { last } => {
                let delta = point - last;
                self.painting.left += delta.x;
                self.painting.bottom += delta.y;
                self.clamp_painting_position();
                self.interaction = Interaction::Panning { last: point };
                self.needs_redraw = true;
            }
            Interaction::Painting | Interaction::Idle => {}
        }
    }

    /// Pointer released. A resize is committed here.
    pub fn pointer_up(&mut self, button: PointerButton) -> bool {
        if !button.is_primary() {
            return false;
        }
        match std::mem::take(&mut self.interaction) {
            Interaction::Idle => return false,
            Interaction::Painting => debug!("Stroke end"),
            Interaction::Resizing { preview, .. } => {
                self.resize_painting(preview.width, preview.height);
                self.needs_redraw = true;
            }
            Interaction::Panning { .. } => debug!("Pan end"),
        }
        true
    }

    /// Pointer entered the canvas: place the brush there without pressing
    pub fn pointer_enter(&mut self, x: f32, y: f32) {
        let point = self.to_canvas(x, y);
        self.brush_position = point;
        let z = self.brush_height();
        self.brush.initialize(point.x, point.y, z);
    }

    /// Splat settings for the current brush color and bristle count
    pub fn splat_params(&self) -> SplatParams {
        let [h, s, v, artist_alpha] = self.brush_color;
        let alpha = splat_alpha(
            &self.config.alpha,
            self.brush.bristle_count() as u32,
            self.config.min_bristle_count,
            self.config.max_bristle_count,
            artist_alpha,
        );
        SplatParams {
            color: hsv_to_pigment(h, s, v),
            alpha,
            radius: self.config.splat_radius * self.brush_scale,
            velocity_scale: SplatParams::velocity_scale_for(
                self.config.splat_velocity_scale,
                alpha,
                self.resolution_scale,
            ),
        }
    }

    /// Run one frame: bristles, splat (while painting), fluid, composite.
    ///
    /// Returns whether the frame was redrawn.
    pub fn step(&mut self) -> bool {
        self.stats.reset();

        let anchor = self.brush_position;
        let z = self.brush_height();
        let ((), bristles_ms) = timed(|| self.brush.update(anchor.x, anchor.y, z));
        self.stats.bristles_ms = bristles_ms;

        if self.interaction.is_painting() {
            let params = self.splat_params();
            let (landed, splat_ms) = timed(|| {
                splat(
                    &mut self.fields,
                    &self.brush,
                    &self.painting,
                    self.resolution_scale,
                    &params,
                )
            });
            if landed > 0 {
                self.solver.notify_splat();
            }
            self.stats.splat_ms = splat_ms;
            self.stats.contacts = landed as u32;
        }

        let (simulated, fluid_ms) = timed(|| self.solver.simulate(&mut self.fields));
        self.stats.fluid_ms = fluid_ms;
        self.stats.simulated = simulated;
        if simulated {
            self.needs_redraw = true;
        }

        if !self.needs_redraw {
            return false;
        }
        let ((), composite_ms) = timed(|| self.composite());
        self.stats.composite_ms = composite_ms;
        self.stats.redrawn = true;
        self.needs_redraw = false;

        trace!(
            "Frame: {:.2}ms ({} contacts)",
            self.stats.total_ms(),
            self.stats.contacts
        );
        true
    }

    fn composite(&mut self) {
        match self.interaction {
            Interaction::Resizing { preview, .. } => self.compositor.render_resize_preview(
                &mut self.frame,
                self.fields.layer(),
                &self.painting,
                &preview,
                self.resolution_scale,
            ),
            _ => self.compositor.render_display(
                &mut self.frame,
                self.fields.layer(),
                &self.painting,
                self.resolution_scale,
            ),
        }
    }
}
