//! Position-based constraints acting on one bristle chain.
//!
//! Every function takes the chain's particle positions in root-to-tip order.
//! Particle 0 is pinned to the brush and is never moved here.

use glam::Vec3;

/// Keep consecutive particles at their rest distance.
///
/// Each parent is treated as fixed when its child is corrected, so a single
/// root-to-tip pass leaves every segment at exactly its rest length.
pub fn solve_distance(chain: &mut [Vec3], segment_length: f32) {
    for i in 1..chain.len() {
        let parent = chain[i - 1];
        let offset = chain[i] - parent;
        let length = offset.length();
        if length > f32::EPSILON {
            chain[i] = parent + offset * (segment_length / length);
        } else {
            chain[i] = parent - Vec3::Z * segment_length;
        }
    }
}

/// Push particles that sank below the painting surface back onto it
pub fn solve_plane(chain: &mut [Vec3]) {
    for p in chain.iter_mut().skip(1) {
        if p.z < 0.0 {
            p.z = 0.0;
        }
    }
}

/// Pull each particle towards its rest place one segment straight below
/// its parent.
///
/// The rest target always points down, so the pass never lifts a pressed
/// bristle off the canvas; the plane constraint turns the pull into
/// splaying along the surface.
pub fn solve_bending(chain: &mut [Vec3], segment_length: f32, stiffness: f32) {
    for i in 1..chain.len() {
        let rest = chain[i - 1] - Vec3::Z * segment_length;
        chain[i] += (rest - chain[i]) * stiffness;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_restores_segment_lengths() {
        let mut chain = vec![Vec3::ZERO, Vec3::new(3.0, 0.0, 0.0), Vec3::new(3.0, 4.0, 0.0)];
        solve_distance(&mut chain, 1.0);
        assert_eq!(chain[0], Vec3::ZERO);
        assert!(((chain[1] - chain[0]).length() - 1.0).abs() < 1e-5);
        assert!(((chain[2] - chain[1]).length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_distance_handles_coincident_particles() {
        let mut chain = vec![Vec3::ONE, Vec3::ONE];
        solve_distance(&mut chain, 0.5);
        assert_eq!(chain[1], Vec3::new(1.0, 1.0, 0.5));
    }

    #[test]
    fn test_plane_leaves_root_alone() {
        let mut chain = vec![Vec3::new(0.0, 0.0, -1.0), Vec3::new(0.0, 0.0, -2.0)];
        solve_plane(&mut chain);
        assert_eq!(chain[0].z, -1.0);
        assert_eq!(chain[1].z, 0.0);
    }

    #[test]
    fn test_bending_pulls_towards_hanging_shape() {
        let mut chain = vec![Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0)];
        solve_bending(&mut chain, 1.0, 0.5);
        assert!((chain[1].x - 0.5).abs() < 1e-6);
        assert!((chain[1].z + 0.5).abs() < 1e-6);

        // A chain hanging straight down is already at rest
        let mut hanging = vec![Vec3::ZERO, Vec3::NEG_Z, Vec3::NEG_Z * 2.0];
        solve_bending(&mut hanging, 1.0, 0.5);
        assert_eq!(hanging, vec![Vec3::ZERO, Vec3::NEG_Z, Vec3::NEG_Z * 2.0]);
    }

    #[test]
    fn test_bending_never_lifts_a_squashed_chain() {
        let mut chain = vec![
            Vec3::new(0.0, 0.0, 0.5),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(2.0, 0.0, 0.0),
        ];
        solve_bending(&mut chain, 1.0, 0.3);
        solve_plane(&mut chain);
        assert!(chain.iter().skip(1).all(|p| p.z == 0.0));
    }
}
