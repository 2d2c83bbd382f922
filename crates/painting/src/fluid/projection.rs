//! Pressure projection: divergence, Jacobi relaxation, gradient subtraction.
//!
//! Velocity component `x` of a cell is read as the flux through its right
//! face and `y` as the flux through its top face. Divergence uses backward
//! differences with zero flux entering from outside the grid; the pressure
//! gradient uses forward differences with clamp-to-edge pressure. With that
//! pairing `div(v - grad p)` equals the Jacobi residual, so every extra
//! iteration can only shrink the remaining divergence.

use crate::field::{FieldGrid, cell_index, clamped_index};

/// Zero the flux through the right and top walls
pub fn enforce_walls(velocity: &mut [[f32; 2]], width: usize, height: usize) {
    for y in 0..height {
        velocity[cell_index(width - 1, y, width)][0] = 0.0;
    }
    for x in 0..width {
        velocity[cell_index(x, height - 1, width)][1] = 0.0;
    }
}

/// Discrete divergence of `velocity` into `out`
pub fn compute_divergence(velocity: &[[f32; 2]], out: &mut [f32], width: usize, height: usize) {
    for y in 0..height {
        for x in 0..width {
            let idx = cell_index(x, y, width);
            let left = if x > 0 { velocity[idx - 1][0] } else { 0.0 };
            let below = if y > 0 { velocity[idx - width][1] } else { 0.0 };
            out[idx] = (velocity[idx][0] - left) + (velocity[idx][1] - below);
        }
    }
}

/// Solve `laplacian(p) = divergence` by Jacobi relaxation starting from zero
pub fn jacobi(
    pressure: &mut Vec<f32>,
    scratch: &mut Vec<f32>,
    divergence: &[f32],
    width: usize,
    height: usize,
    iterations: u32,
) {
    pressure.fill(0.0);

    for _ in 0..iterations {
        for y in 0..height {
            for x in 0..width {
                let (xi, yi) = (x as isize, y as isize);
                let idx = cell_index(x, y, width);
                let neighbors = pressure[clamped_index(xi - 1, yi, width, height)]
                    + pressure[clamped_index(xi + 1, yi, width, height)]
                    + pressure[clamped_index(xi, yi - 1, width, height)]
                    + pressure[clamped_index(xi, yi + 1, width, height)];
                scratch[idx] = (neighbors - divergence[idx]) * 0.25;
            }
        }
        std::mem::swap(pressure, scratch);
    }
}

/// Subtract the pressure gradient from the velocity field
pub fn subtract_gradient(velocity: &mut [[f32; 2]], pressure: &[f32], width: usize, height: usize) {
    for y in 0..height {
        for x in 0..width {
            let (xi, yi) = (x as isize, y as isize);
            let idx = cell_index(x, y, width);
            let p = pressure[idx];
            velocity[idx][0] -= pressure[clamped_index(xi + 1, yi, width, height)] - p;
            velocity[idx][1] -= pressure[clamped_index(xi, yi + 1, width, height)] - p;
        }
    }
}

/// Full projection pass over a grid's velocity field
pub fn project(grid: &mut FieldGrid, iterations: u32) {
    let w = grid.width() as usize;
    let h = grid.height() as usize;

    enforce_walls(&mut grid.velocity, w, h);
    compute_divergence(&grid.velocity, &mut grid.divergence, w, h);
    jacobi(
        &mut grid.pressure,
        &mut grid.pressure_scratch,
        &grid.divergence,
        w,
        h,
        iterations,
    );
    subtract_gradient(&mut grid.velocity, &grid.pressure, w, h);
}

/// L2 norm of the velocity field's divergence
pub fn divergence_norm(velocity: &[[f32; 2]], width: usize, height: usize) -> f32 {
    let mut div = vec![0.0; width * height];
    compute_divergence(velocity, &mut div, width, height);
    div.iter().map(|d| d * d).sum::<f32>().sqrt()
}
