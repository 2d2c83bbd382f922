//! Grid fluid solver that moves paint after it has been deposited.
//!
//! Each step advects velocity, pigment and thickness semi-Lagrangianly and
//! then projects the velocity field back towards zero divergence. The solver
//! only runs for a fixed window of frames after the last splat so a resting
//! painting costs nothing.

mod advect;
mod projection;

pub use advect::advect;
pub use projection::{
    compute_divergence, divergence_norm, enforce_walls, jacobi, project, subtract_gradient,
};

use crate::constants::{FLUID_DT, FRAMES_TO_SIMULATE};
use crate::field::FieldGrid;

/// Fluid solver state that survives between frames
#[derive(Debug, Clone)]
pub struct FluidSolver {
    jacobi_iterations: u32,
    /// Fraction of velocity kept per step
    fluidity: f32,
    frames_since_splat: u32,
}

impl FluidSolver {
    pub fn new(jacobi_iterations: u32, fluidity: f32) -> Self {
        Self {
            jacobi_iterations,
            fluidity: fluidity.clamp(0.0, 1.0),
            // Start settled: nothing to move until paint arrives
            frames_since_splat: FRAMES_TO_SIMULATE,
        }
    }

    pub fn jacobi_iterations(&self) -> u32 {
        self.jacobi_iterations
    }

    pub fn set_iterations(&mut self, iterations: u32) {
        self.jacobi_iterations = iterations;
    }

    pub fn fluidity(&self) -> f32 {
        self.fluidity
    }

    /// Re-open the settle window after paint was deposited
    pub fn notify_splat(&mut self) {
        self.frames_since_splat = 0;
    }

    /// Close the settle window, e.g. after a clear or history restore
    pub fn reset(&mut self) {
        self.frames_since_splat = FRAMES_TO_SIMULATE;
    }

    pub fn is_settled(&self) -> bool {
        self.frames_since_splat >= FRAMES_TO_SIMULATE
    }

    /// Advance the simulation by one frame if paint is still settling.
    ///
    /// Returns whether a step was taken.
    pub fn simulate(&mut self, grid: &mut FieldGrid) -> bool {
        if self.is_settled() {
            return false;
        }
        self.step(grid);
        self.frames_since_splat += 1;
        true
    }

    /// One unconditional solver step
    pub fn step(&self, grid: &mut FieldGrid) {
        advect(grid, FLUID_DT, self.fluidity);
        project(grid, self.jacobi_iterations);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_settled() {
        let mut solver = FluidSolver::new(8, 0.9);
        let mut grid = FieldGrid::new(4, 4);
        assert!(solver.is_settled());
        assert!(!solver.simulate(&mut grid));
    }

    #[test]
    fn test_settle_window_after_splat() {
        let mut solver = FluidSolver::new(4, 0.9);
        let mut grid = FieldGrid::new(4, 4);
        solver.notify_splat();

        let steps = (0..FRAMES_TO_SIMULATE + 10)
            .filter(|_| solver.simulate(&mut grid))
            .count();
        assert_eq!(steps, FRAMES_TO_SIMULATE as usize);
        assert!(solver.is_settled());
    }

    #[test]
    fn test_static_paint_stays_put() {
        let solver = FluidSolver::new(8, 0.9);
        let mut grid = FieldGrid::new(6, 6);
        grid.layer_mut().pigment_mut()[14] = [0.2, 0.4, 0.6, 1.0];
        grid.layer_mut().thickness_mut()[14] = 1.0;
        let before = grid.layer().clone();

        solver.step(&mut grid);
        assert_eq!(grid.layer(), &before);
    }

    #[test]
    fn test_moving_paint_preserves_bounds() {
        let solver = FluidSolver::new(8, 0.9);
        let mut grid = FieldGrid::new(8, 8);
        grid.layer_mut().pigment_mut().fill([0.5, 0.5, 0.5, 1.0]);
        grid.velocity_mut()[27] = [2.0, 1.0];

        for _ in 0..10 {
            solver.step(&mut grid);
        }
        // Bilinear sampling never overshoots its inputs
        for p in grid.layer().pigment() {
            assert!(p.iter().all(|c| (0.0..=1.0 + 1e-5).contains(c)));
        }
    }

    #[test]
    fn test_reset_stops_simulation() {
        let mut solver = FluidSolver::new(4, 0.9);
        let mut grid = FieldGrid::new(4, 4);
        solver.notify_splat();
        assert!(solver.simulate(&mut grid));
        solver.reset();
        assert!(!solver.simulate(&mut grid));
    }
}
