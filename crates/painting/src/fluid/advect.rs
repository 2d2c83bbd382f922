//! Semi-Lagrangian advection of velocity, pigment and thickness.

use glam::Vec2;

use crate::field::{FieldGrid, cell_index, sample_bilinear};

/// Trace every cell back along the velocity field and pull the previous
/// step's values from there. Velocity is scaled by `retention` on the way.
pub fn advect(grid: &mut FieldGrid, dt: f32, retention: f32) {
    let w = grid.width() as usize;
    let h = grid.height() as usize;

    for y in 0..h {
        for x in 0..w {
            let idx = cell_index(x, y, w);
            let v = grid.velocity[idx];
            let source = Vec2::new(x as f32 - v[0] * dt, y as f32 - v[1] * dt);

            let traced: [f32; 2] = sample_bilinear(&grid.velocity, w, h, source);
            grid.velocity_scratch[idx] = [traced[0] * retention, traced[1] * retention];
            grid.pigment_scratch[idx] = sample_bilinear(grid.layer.pigment(), w, h, source);
            grid.thickness_scratch[idx] = sample_bilinear(grid.layer.thickness(), w, h, source);
        }
    }

    std::mem::swap(&mut grid.velocity, &mut grid.velocity_scratch);
    grid.layer.pigment_mut().copy_from_slice(&grid.pigment_scratch);
    grid.layer.thickness_mut().copy_from_slice(&grid.thickness_scratch);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_velocity_is_identity() {
        let mut grid = FieldGrid::new(5, 5);
        grid.layer_mut().pigment_mut()[12] = [0.3, 0.6, 0.9, 0.5];
        grid.layer_mut().thickness_mut()[12] = 0.4;
        let before = grid.layer().clone();

        advect(&mut grid, 1.0, 1.0);
        assert_eq!(grid.layer(), &before);
    }

    #[test]
    fn test_uniform_flow_moves_paint() {
        let mut grid = FieldGrid::new(8, 1);
        grid.velocity_mut().fill([1.0, 0.0]);
        grid.layer_mut().pigment_mut()[2] = [1.0, 0.0, 0.0, 1.0];

        advect(&mut grid, 1.0, 1.0);
        // Paint that was in cell 2 is now in cell 3
        assert_eq!(grid.layer().pigment()[3], [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(grid.layer().pigment()[2], [0.0; 4]);
    }

    #[test]
    fn test_retention_damps_velocity() {
        let mut grid = FieldGrid::new(4, 4);
        grid.velocity_mut().fill([0.5, 0.5]);
        advect(&mut grid, 1.0, 0.5);
        assert!(grid.velocity().iter().all(|v| (v[0] - 0.25).abs() < 1e-6));
    }
}
