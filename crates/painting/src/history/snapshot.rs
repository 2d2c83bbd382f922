use crate::field::PaintLayer;

/// Borrowed view of the live state a snapshot is taken from
#[derive(Debug, Clone, Copy)]
pub struct SnapshotState<'a> {
    pub layer: &'a PaintLayer,
    pub painting_width: f32,
    pub painting_height: f32,
    pub resolution_scale: f32,
}

/// One saved copy of the painting
///
/// Captures the paint layer together with the painting size and the
/// resolution scale it was simulated at, so restoring it can also restore
/// the grid resolution.
#[derive(Debug, Clone)]
pub struct Snapshot {
    layer: PaintLayer,
    painting_width: f32,
    painting_height: f32,
    resolution_scale: f32,
}

impl Snapshot {
    /// Empty slot sized for a `width` x `height` grid
    pub(crate) fn blank(width: u32, height: u32) -> Self {
        Self {
            layer: PaintLayer::new(width, height),
            painting_width: 0.0,
            painting_height: 0.0,
            resolution_scale: 0.0,
        }
    }

    /// Overwrite this snapshot in place. Returns whether storage was resized.
    pub(crate) fn overwrite(&mut self, state: SnapshotState<'_>) -> bool {
        self.painting_width = state.painting_width;
        self.painting_height = state.painting_height;
        self.resolution_scale = state.resolution_scale;
        self.layer.copy_from(state.layer)
    }

    pub fn layer(&self) -> &PaintLayer {
        &self.layer
    }

    pub fn painting_width(&self) -> f32 {
        self.painting_width
    }

    pub fn painting_height(&self) -> f32 {
        self.painting_height
    }

    pub fn resolution_scale(&self) -> f32 {
        self.resolution_scale
    }

    pub fn resolution(&self) -> (u32, u32) {
        (self.layer.width(), self.layer.height())
    }
}
