//! The paint layer: pigment color and paint thickness arenas.
//!
//! This is the part of the field store that carries the painting itself and
//! is what snapshots capture. Flow state (velocity, pressure) lives beside it
//! in [`super::FieldGrid`] and is never snapshotted.

use glam::Vec2;

use super::sampling::{cell_index, sample_bilinear};

/// How to carry content across a change of grid size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResampleMode {
    /// Same painting area at a new resolution: content is stretched
    Stretch,
    /// Same resolution, painting grown or shrunk from its bottom-left corner:
    /// overlapping cells are kept, new cells start empty
    Anchored,
}

/// Pigment (RGBA) and thickness arenas at simulation resolution
#[derive(Debug, Clone, PartialEq)]
pub struct PaintLayer {
    width: u32,
    height: u32,
    /// Pigment triple in the active color space plus coverage in alpha
    pigment: Vec<[f32; 4]>,
    /// Paint thickness, used for relief shading
    thickness: Vec<f32>,
}

impl PaintLayer {
    /// Create an empty (unpainted) layer
    pub fn new(width: u32, height: u32) -> Self {
        let cells = (width as usize) * (height as usize);
        Self {
            width,
            height,
            pigment: vec![[0.0; 4]; cells],
            thickness: vec![0.0; cells],
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn cell_count(&self) -> usize {
        self.pigment.len()
    }

    #[inline]
    pub fn pigment(&self) -> &[[f32; 4]] {
        &self.pigment
    }

    #[inline]
    pub fn pigment_mut(&mut self) -> &mut [[f32; 4]] {
        &mut self.pigment
    }

    #[inline]
    pub fn thickness(&self) -> &[f32] {
        &self.thickness
    }

    #[inline]
    pub fn thickness_mut(&mut self) -> &mut [f32] {
        &mut self.thickness
    }

    /// Pigment arena as raw bytes (RGBA32F), for texture upload
    pub fn pigment_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pigment)
    }

    pub fn clear(&mut self) {
        self.pigment.fill([0.0; 4]);
        self.thickness.fill(0.0);
    }

    /// Change dimensions in place, reusing the existing allocation when it is
    /// large enough. Contents are cleared.
    pub fn resize_storage(&mut self, width: u32, height: u32) {
        let cells = (width as usize) * (height as usize);
        self.width = width;
        self.height = height;
        self.pigment.resize(cells, [0.0; 4]);
        self.thickness.resize(cells, 0.0);
        self.clear();
    }

    /// Copy another layer's contents into this one
    ///
    /// Storage is only resized when the dimensions differ. Returns whether a
    /// resize was needed.
    pub fn copy_from(&mut self, other: &PaintLayer) -> bool {
        let resized = self.width != other.width || self.height != other.height;
        if resized {
            self.resize_storage(other.width, other.height);
        }
        self.pigment.copy_from_slice(&other.pigment);
        self.thickness.copy_from_slice(&other.thickness);
        resized
    }

    /// Bilinear sample of pigment and thickness at cell coordinates
    #[inline]
    pub fn sample(&self, pos: Vec2) -> ([f32; 4], f32) {
        let (w, h) = (self.width as usize, self.height as usize);
        (
            sample_bilinear(&self.pigment, w, h, pos),
            sample_bilinear(&self.thickness, w, h, pos),
        )
    }

    /// Build a copy of this layer at a new resolution
    pub fn resampled(&self, width: u32, height: u32, mode: ResampleMode) -> PaintLayer {
        let mut out = PaintLayer::new(width, height);
        let (w, h) = (width as usize, height as usize);
        let scale = Vec2::new(
            self.width as f32 / width.max(1) as f32,
            self.height as f32 / height.max(1) as f32,
        );

        for y in 0..h {
            for x in 0..w {
                let idx = cell_index(x, y, w);
                match mode {
                    ResampleMode::Stretch => {
                        // Map cell centers through normalized coordinates
                        let center = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                        let (pigment, thickness) = self.sample(center * scale - 0.5);
                        out.pigment[idx] = pigment;
                        out.thickness[idx] = thickness;
                    }
                    ResampleMode::Anchored => {
                        if x < self.width as usize && y < self.height as usize {
                            let src = cell_index(x, y, self.width as usize);
                            out.pigment[idx] = self.pigment[src];
                            out.thickness[idx] = self.thickness[src];
                        }
                    }
                }
            }
        }

        out
    }
}
