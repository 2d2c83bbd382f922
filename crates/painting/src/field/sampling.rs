//! Clamp-to-edge addressing and bilinear sampling over flat cell arenas.

use glam::Vec2;

/// A value that can be linearly interpolated between cells
pub trait Texel: Copy {
    fn lerp(self, other: Self, t: f32) -> Self;
}

impl Texel for f32 {
    #[inline]
    fn lerp(self, other: Self, t: f32) -> Self {
        self * (1.0 - t) + other * t
    }
}

impl<const N: usize> Texel for [f32; N] {
    #[inline]
    fn lerp(self, other: Self, t: f32) -> Self {
        std::array::from_fn(|i| self[i] * (1.0 - t) + other[i] * t)
    }
}

/// Row-major index of a cell
#[inline]
pub fn cell_index(x: usize, y: usize, width: usize) -> usize {
    y * width + x
}

/// Cell index with clamp-to-edge addressing for signed coordinates
#[inline]
pub fn clamped_index(x: isize, y: isize, width: usize, height: usize) -> usize {
    let x = x.clamp(0, width as isize - 1) as usize;
    let y = y.clamp(0, height as isize - 1) as usize;
    cell_index(x, y, width)
}

/// Bilinear sample at `pos`, in cell coordinates where cell `i` has its
/// center at `i`. Positions outside the grid clamp to the edge cells.
pub fn sample_bilinear<T: Texel>(data: &[T], width: usize, height: usize, pos: Vec2) -> T {
    let x = pos.x.clamp(0.0, (width - 1) as f32);
    let y = pos.y.clamp(0.0, (height - 1) as f32);

    let x0 = x.floor() as usize;
    let y0 = y.floor() as usize;
    let x1 = (x0 + 1).min(width - 1);
    let y1 = (y0 + 1).min(height - 1);

    let sx = x - x0 as f32;
    let sy = y - y0 as f32;

    let v0 = data[cell_index(x0, y0, width)].lerp(data[cell_index(x1, y0, width)], sx);
    let v1 = data[cell_index(x0, y1, width)].lerp(data[cell_index(x1, y1, width)], sx);
    v0.lerp(v1, sy)
}
