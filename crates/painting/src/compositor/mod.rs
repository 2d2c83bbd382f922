//! Renders the paint layer to RGBA8 images
//!
//! Three paths share the same per-pixel shading: the live display (painting
//! placed on a white canvas), the resize preview (content outside the old
//! painting fades out over a feather distance) and export at the painting's
//! own size.

mod lighting;

pub use lighting::{LightingParams, reflectance_from_f0, shade, surface_normal};

use fluidpaint_config::{ColorModel, PaintConfig};
use glam::Vec2;
use image::{Rgba, RgbaImage};
use tracing::debug;

use crate::color::mix;
use crate::constants::RESIZING_FEATHER_SIZE;
use crate::error::PaintError;
use crate::field::PaintLayer;
use crate::types::Rectangle;

const CANVAS_BACKGROUND: Rgba<u8> = Rgba([255, 255, 255, 255]);

#[inline]
fn to_rgba8(rgb: [f32; 3]) -> Rgba<u8> {
    let q = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
    Rgba([q(rgb[0]), q(rgb[1]), q(rgb[2]), 255])
}

#[derive(Debug, Clone)]
pub struct Compositor {
    lighting: LightingParams,
    color_model: ColorModel,
}

impl Compositor {
    pub fn new(config: &PaintConfig) -> Self {
        Self {
            lighting: LightingParams::from_config(config),
            color_model: config.color_model,
        }
    }

    pub fn lighting(&self) -> &LightingParams {
        &self.lighting
    }

    pub fn color_model(&self) -> ColorModel {
        self.color_model
    }

    pub fn set_color_model(&mut self, model: ColorModel) {
        self.color_model = model;
    }

    /// Shaded color of the painting at a point in painting-local pixels
    fn shade_local(&self, layer: &PaintLayer, local: Vec2, resolution_scale: f32) -> [f32; 3] {
        let cell = local * resolution_scale - Vec2::splat(0.5);
        let (pigment, _) = layer.sample(cell);
        let height_scale = self.lighting.normal_scale / resolution_scale;
        let normal = surface_normal(layer, cell, height_scale);
        shade(pigment, normal, self.color_model, &self.lighting)
    }

    /// Draw the painting onto a canvas-sized frame.
    ///
    /// `painting` is in canvas pixels with a bottom-left origin; image rows
    /// run top to bottom.
    pub fn render_display(
        &self,
        frame: &mut RgbaImage,
        layer: &PaintLayer,
        painting: &Rectangle,
        resolution_scale: f32,
    ) {
        let (fw, fh) = frame.dimensions();
        for pixel in frame.pixels_mut() {
            *pixel = CANVAS_BACKGROUND;
        }

        let visible = painting.intersect(&Rectangle::new(0.0, 0.0, fw as f32, fh as f32));
        if visible.is_empty() {
            return;
        }
        let origin = Vec2::new(painting.left, painting.bottom);

        for_each_pixel(&visible, fw, fh, |x, y| {
            let center = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
            let rgb = self.shade_local(layer, center - origin, resolution_scale);
            frame.put_pixel(x, fh - 1 - y, to_rgba8(rgb));
        });
    }

    /// Draw the preview of a painting being resized.
    ///
    /// Inside the committed painting the content is drawn as usual. Beyond
    /// it, the nearest edge color is blended towards white with distance.
    pub fn render_resize_preview(
        &self,
        frame: &mut RgbaImage,
        layer: &PaintLayer,
        painting: &Rectangle,
        preview: &Rectangle,
        resolution_scale: f32,
    ) {
        let (fw, fh) = frame.dimensions();
        for pixel in frame.pixels_mut() {
            *pixel = CANVAS_BACKGROUND;
        }

        let visible = preview.intersect(&Rectangle::new(0.0, 0.0, fw as f32, fh as f32));
        if visible.is_empty() {
            return;
        }
        let origin = Vec2::new(painting.left, painting.bottom);
        let extent = Vec2::new(painting.width, painting.height);

        for_each_pixel(&visible, fw, fh, |x, y| {
            let center = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
            let local = (center - origin).clamp(Vec2::ZERO, extent);
            let rgb = self.shade_local(layer, local, resolution_scale);

            let distance = painting.distance_to(center);
            let rgb = if distance > 0.0 {
                let t = (1.0 - distance / RESIZING_FEATHER_SIZE).clamp(0.0, 1.0);
                rgb.map(|c| mix(1.0, c, t))
            } else {
                rgb
            };
            frame.put_pixel(x, fh - 1 - y, to_rgba8(rgb));
        });
    }

    /// Render the painting at its own size, top row first
    pub fn render_export(
        &self,
        layer: &PaintLayer,
        painting_width: f32,
        painting_height: f32,
        resolution_scale: f32,
    ) -> Result<RgbaImage, PaintError> {
        let width = painting_width.round().max(0.0) as u32;
        let height = painting_height.round().max(0.0) as u32;
        if width == 0 || height == 0 {
            return Err(PaintError::EmptyPainting { width, height });
        }

        let mut pixels = Vec::with_capacity(width as usize * height as usize * 4);
        for row in 0..height {
            let y = height - 1 - row;
            for x in 0..width {
                let local = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                let rgba = to_rgba8(self.shade_local(layer, local, resolution_scale));
                pixels.extend_from_slice(&rgba.0);
            }
        }

        let image = RgbaImage::from_raw(width, height, pixels)
            .ok_or(PaintError::ExportBuffer { width, height })?;
        debug!("Exported painting {}x{}", width, height);
        Ok(image)
    }
}

/// Visit every whole pixel covered by `rect` (bottom-left origin)
fn for_each_pixel(rect: &Rectangle, width: u32, height: u32, mut f: impl FnMut(u32, u32)) {
    let x0 = rect.left.floor().max(0.0) as u32;
    let y0 = rect.bottom.floor().max(0.0) as u32;
    let x1 = (rect.right().ceil() as u32).min(width);
    let y1 = (rect.top().ceil() as u32).min(height);
    for y in y0..y1 {
        for x in x0..x1 {
            f(x, y);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compositor() -> Compositor {
        let config = PaintConfig {
            color_model: ColorModel::Additive,
            ..PaintConfig::default()
        };
        Compositor::new(&config)
    }

    /// 10x10 px painting at scale 1 with the left half painted red
    fn half_red_layer() -> PaintLayer {
        let mut layer = PaintLayer::new(10, 10);
        for y in 0..10 {
            for x in 0..5 {
                layer.pigment_mut()[y * 10 + x] = [1.0, 0.0, 0.0, 1.0];
            }
        }
        layer
    }

    #[test]
    fn test_display_places_painting_bottom_up() {
        let mut frame = RgbaImage::new(40, 30);
        let layer = half_red_layer();
        let painting = Rectangle::new(5.0, 2.0, 10.0, 10.0);
        compositor().render_display(&mut frame, &layer, &painting, 1.0);

        // Outside the painting stays white
        assert_eq!(*frame.get_pixel(30, 5), CANVAS_BACKGROUND);
        // Canvas y = 3 is image row 26
        let inside = frame.get_pixel(6, 26);
        assert!(inside.0[0] > 200 && inside.0[1] < 60);
        assert_eq!(*frame.get_pixel(6, 5), CANVAS_BACKGROUND);
    }

    #[test]
    fn test_display_clips_offscreen_painting() {
        let mut frame = RgbaImage::new(16, 16);
        let layer = half_red_layer();
        let painting = Rectangle::new(100.0, 100.0, 10.0, 10.0);
        compositor().render_display(&mut frame, &layer, &painting, 1.0);
        assert!(frame.pixels().all(|p| *p == CANVAS_BACKGROUND));
    }

    #[test]
    fn test_resize_preview_feathers_to_white() {
        let mut frame = RgbaImage::new(400, 20);
        let painting = Rectangle::new(0.0, 0.0, 10.0, 10.0);
        let mut red = PaintLayer::new(10, 10);
        red.pigment_mut().fill([1.0, 0.0, 0.0, 1.0]);
        let preview = Rectangle::new(0.0, 0.0, 300.0, 10.0);
        compositor().render_resize_preview(&mut frame, &red, &painting, &preview, 1.0);

        let row = 19 - 5;
        let near = frame.get_pixel(20, row).0[1];
        let far = frame.get_pixel(150, row).0[1];
        let beyond = frame.get_pixel(250, row).0[1];
        assert!(near < far);
        assert_eq!(beyond, 255);
    }

    #[test]
    fn test_export_is_painting_sized() {
        let layer = half_red_layer();
        let image = compositor().render_export(&layer, 10.0, 10.0, 1.0);
        let image = image.expect("export");
        assert_eq!(image.dimensions(), (10, 10));
        assert!(image.get_pixel(1, 1).0[1] < 60);
        assert!(image.get_pixel(8, 1).0[1] > 200);
    }

    #[test]
    fn test_export_rejects_empty_painting() {
        let layer = PaintLayer::new(1, 1);
        let result = compositor().render_export(&layer, 0.0, 10.0, 1.0);
        assert!(matches!(result, Err(PaintError::EmptyPainting { .. })));
    }
}
