//! Grid-resident simulation fields
//!
//! All fields are flat, pre-sized arenas indexed by cell. A change of
//! resolution reallocates every arena at once; it never happens mid-step.

mod layer;
mod sampling;

use tracing::debug;

pub use layer::{PaintLayer, ResampleMode};
pub use sampling::{Texel, cell_index, clamped_index, sample_bilinear};

/// Simulation grid resolution for a painting size and resolution scale
///
/// `ceil(painting * scale)` per axis, never smaller than one cell. A tiny
/// tolerance absorbs float noise so that e.g. `300 * 0.1` stays 30 cells.
pub fn grid_resolution(painting_width: f32, painting_height: f32, resolution_scale: f32) -> (u32, u32) {
    let axis = |size: f32| ((size * resolution_scale) - 1e-3).ceil().max(1.0) as u32;
    (axis(painting_width), axis(painting_height))
}

/// The fluid simulation's field store
///
/// Holds the paint layer (pigment and thickness) plus the flow fields and
/// the scratch buffers the solver ping-pongs through.
pub struct FieldGrid {
    pub(crate) layer: PaintLayer,
    /// Velocity in cells per step
    pub(crate) velocity: Vec<[f32; 2]>,
    pub(crate) pressure: Vec<f32>,
    pub(crate) divergence: Vec<f32>,
    pub(crate) velocity_scratch: Vec<[f32; 2]>,
    pub(crate) pigment_scratch: Vec<[f32; 4]>,
    pub(crate) thickness_scratch: Vec<f32>,
    pub(crate) pressure_scratch: Vec<f32>,
}

impl FieldGrid {
    /// Allocate a zeroed grid
    pub fn new(width: u32, height: u32) -> Self {
        Self::from_layer(PaintLayer::new(width, height))
    }

    fn from_layer(layer: PaintLayer) -> Self {
        let cells = layer.cell_count();
        Self {
            layer,
            velocity: vec![[0.0; 2]; cells],
            pressure: vec![0.0; cells],
            divergence: vec![0.0; cells],
            velocity_scratch: vec![[0.0; 2]; cells],
            pigment_scratch: vec![[0.0; 4]; cells],
            thickness_scratch: vec![0.0; cells],
            pressure_scratch: vec![0.0; cells],
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.layer.width()
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.layer.height()
    }

    #[inline]
    pub fn cell_count(&self) -> usize {
        self.layer.cell_count()
    }

    #[inline]
    pub fn layer(&self) -> &PaintLayer {
        &self.layer
    }

    #[inline]
    pub fn layer_mut(&mut self) -> &mut PaintLayer {
        &mut self.layer
    }

    #[inline]
    pub fn velocity(&self) -> &[[f32; 2]] {
        &self.velocity
    }

    #[inline]
    pub fn velocity_mut(&mut self) -> &mut [[f32; 2]] {
        &mut self.velocity
    }

    #[inline]
    pub fn pressure(&self) -> &[f32] {
        &self.pressure
    }

    #[inline]
    pub fn divergence(&self) -> &[f32] {
        &self.divergence
    }

    /// Raw pigment bytes for display upload
    pub fn paint_bytes(&self) -> &[u8] {
        self.layer.pigment_bytes()
    }

    /// Wipe paint and flow
    pub fn clear(&mut self) {
        self.layer.clear();
        self.clear_flow();
    }

    /// Zero velocity, pressure and divergence, keeping the paint
    pub fn clear_flow(&mut self) {
        self.velocity.fill([0.0; 2]);
        self.pressure.fill(0.0);
        self.divergence.fill(0.0);
    }

    /// Replace the paint layer with a copy of `layer`, reallocating the grid
    /// first if the resolution differs. Flow state is zeroed.
    pub fn restore_layer(&mut self, layer: &PaintLayer) {
        if layer.width() != self.width() || layer.height() != self.height() {
            debug!(
                "FieldGrid: reallocating {}x{} -> {}x{} for restore",
                self.width(),
                self.height(),
                layer.width(),
                layer.height()
            );
            *self = Self::from_layer(layer.clone());
            return;
        }
        self.layer.copy_from(layer);
        self.clear_flow();
    }

    /// Reallocate at a new resolution, carrying the paint across with the
    /// given resample mode. Flow state starts at rest.
    pub fn change_resolution(&mut self, width: u32, height: u32, mode: ResampleMode) {
        if width == self.width() && height == self.height() {
            return;
        }
        debug!(
            "FieldGrid: change resolution {}x{} -> {}x{} ({:?})",
            self.width(),
            self.height(),
            width,
            height,
            mode
        );
        let layer = self.layer.resampled(width, height, mode);
        *self = Self::from_layer(layer);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_resolution_is_ceil() {
        assert_eq!(grid_resolution(300.0, 300.0, 0.1), (30, 30));
        assert_eq!(grid_resolution(301.0, 300.0, 0.1), (31, 30));
        assert_eq!(grid_resolution(333.0, 200.0, 1.5), (500, 300));
        assert_eq!(grid_resolution(0.0, 0.0, 2.0), (1, 1));
    }

    #[test]
    fn test_new_grid_sizes() {
        let grid = FieldGrid::new(16, 8);
        assert_eq!(grid.cell_count(), 128);
        assert_eq!(grid.velocity().len(), 128);
        assert_eq!(grid.pressure().len(), 128);
        assert_eq!(grid.paint_bytes().len(), 128 * 16);
    }

    #[test]
    fn test_clear_flow_keeps_paint() {
        let mut grid = FieldGrid::new(4, 4);
        grid.layer_mut().pigment_mut()[3] = [1.0, 1.0, 0.0, 0.5];
        grid.velocity_mut()[3] = [2.0, -1.0];
        grid.clear_flow();
        assert_eq!(grid.velocity()[3], [0.0, 0.0]);
        assert_eq!(grid.layer().pigment()[3], [1.0, 1.0, 0.0, 0.5]);

        grid.clear();
        assert_eq!(grid.layer().pigment()[3], [0.0; 4]);
    }

    #[test]
    fn test_restore_layer_reallocates() {
        let mut grid = FieldGrid::new(4, 4);
        grid.velocity_mut()[0] = [1.0, 1.0];
        let mut layer = PaintLayer::new(6, 2);
        layer.thickness_mut()[7] = 0.75;

        grid.restore_layer(&layer);
        assert_eq!((grid.width(), grid.height()), (6, 2));
        assert_eq!(grid.velocity().len(), 12);
        assert_eq!(grid.layer(), &layer);
        assert!(grid.velocity().iter().all(|v| *v == [0.0, 0.0]));
    }

    #[test]
    fn test_change_resolution_preserves_content() {
        let mut grid = FieldGrid::new(4, 4);
        for p in grid.layer_mut().pigment_mut().iter_mut() {
            *p = [0.5, 0.25, 0.0, 1.0];
        }
        grid.change_resolution(10, 6, ResampleMode::Stretch);
        assert_eq!((grid.width(), grid.height()), (10, 6));
        assert!(
            grid.layer()
                .pigment()
                .iter()
                .all(|p| (p[0] - 0.5).abs() < 1e-5 && (p[3] - 1.0).abs() < 1e-5)
        );
    }
}
