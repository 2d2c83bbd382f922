//! Bristle bundle physics
//!
//! The brush tip is a bundle of particle chains hanging from a common
//! anchor. Each frame the anchor follows the pointer and the chains are
//! relaxed with position-based constraints, so pressing the anchor towards
//! the canvas squashes and splays the tips. Particles that end up below the
//! contact threshold are where paint gets deposited.

mod constraints;

pub use constraints::{solve_bending, solve_distance, solve_plane};

use glam::{Vec2, Vec3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::constants::{
    BRISTLE_DAMPING, BRISTLE_GRAVITY, BRISTLE_ITERATIONS, BRISTLE_JITTER, BRISTLE_LENGTH,
    BRISTLE_SEED, BRISTLE_STIFFNESS, VERTICES_PER_BRISTLE, Z_THRESHOLD,
};

/// A bristle particle below the contact threshold
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    pub position: Vec3,
    /// Displacement over the last update, in pixels per frame
    pub velocity: Vec3,
    /// How deep into the contact band the particle is (0..1)
    pub weight: f32,
}

/// Bundle of bristles attached to one anchor
///
/// Particle state is stored flat, bristle-major: particle `i` of bristle `b`
/// lives at `b * VERTICES_PER_BRISTLE + i`.
#[derive(Debug, Clone)]
pub struct Brush {
    bristle_count: usize,
    max_bristle_count: usize,
    scale: f32,
    anchor: Vec3,
    positions: Vec<Vec3>,
    previous: Vec<Vec3>,
    velocities: Vec<Vec3>,
    /// Root position of each bristle relative to the anchor
    root_offsets: Vec<Vec2>,
    segment_lengths: Vec<f32>,
    initialized: bool,
}

impl Brush {
    /// Build a bundle of `bristle_count` bristles for a brush of `scale` pixels.
    ///
    /// The count is fixed for the brush's lifetime; changing it means
    /// building a new brush.
    pub fn new(bristle_count: usize, max_bristle_count: usize, scale: f32) -> Self {
        let max_bristle_count = max_bristle_count.max(1);
        let bristle_count = bristle_count.clamp(1, max_bristle_count);
        let mut rng = StdRng::seed_from_u64(BRISTLE_SEED);

        let mut root_offsets = Vec::with_capacity(bristle_count);
        let mut segment_lengths = Vec::with_capacity(bristle_count);
        for _ in 0..bristle_count {
            // Uniform over the disc
            let angle = rng.random_range(0.0..std::f32::consts::TAU);
            let radius = rng.random::<f32>().sqrt() * scale;
            root_offsets.push(Vec2::from_angle(angle) * radius);

            let length = BRISTLE_LENGTH * scale * (1.0 - BRISTLE_JITTER * rng.random::<f32>());
            segment_lengths.push(length / (VERTICES_PER_BRISTLE - 1) as f32);
        }

        let particles = bristle_count * VERTICES_PER_BRISTLE;
        debug!(
            "Built brush: {} bristles, scale {:.1}px",
            bristle_count, scale
        );

        Self {
            bristle_count,
            max_bristle_count,
            scale,
            anchor: Vec3::ZERO,
            positions: vec![Vec3::ZERO; particles],
            previous: vec![Vec3::ZERO; particles],
            velocities: vec![Vec3::ZERO; particles],
            root_offsets,
            segment_lengths,
            initialized: false,
        }
    }

    pub fn bristle_count(&self) -> usize {
        self.bristle_count
    }

    pub fn max_bristle_count(&self) -> usize {
        self.max_bristle_count
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn anchor(&self) -> Vec3 {
        self.anchor
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Height below which a particle touches the canvas
    pub fn contact_threshold(&self) -> f32 {
        Z_THRESHOLD * self.scale
    }

    /// Particle positions, bristle-major
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn velocities(&self) -> &[Vec3] {
        &self.velocities
    }

    /// Particles of one bristle, root first
    pub fn bristle(&self, index: usize) -> &[Vec3] {
        let start = index * VERTICES_PER_BRISTLE;
        &self.positions[start..start + VERTICES_PER_BRISTLE]
    }

    /// Place the brush at a pointer location with every bristle hanging
    /// straight down from its root, resting on the canvas where it reaches it.
    pub fn initialize(&mut self, x: f32, y: f32, z: f32) {
        self.anchor = Vec3::new(x, y, z);

        for b in 0..self.bristle_count {
            let root = self.root(b);
            let segment = self.segment_lengths[b];
            let outward = self.root_offsets[b].try_normalize().unwrap_or(Vec2::X).extend(0.0);
            for i in 0..VERTICES_PER_BRISTLE {
                let idx = b * VERTICES_PER_BRISTLE + i;
                let reach = segment * i as f32;
                let p = if i > 0 && reach > root.z {
                    // Bent outwards along the canvas past the point of contact
                    let on_canvas = Vec3::new(root.x, root.y, 0.0);
                    on_canvas + outward * (reach - root.z.max(0.0))
                } else {
                    root - Vec3::Z * reach
                };
                self.positions[idx] = p;
                self.previous[idx] = p;
                self.velocities[idx] = Vec3::ZERO;
            }
        }

        self.initialized = true;
    }

    /// Move the anchor and relax the bundle for one frame.
    ///
    /// Does nothing until the brush has been placed with [`Brush::initialize`].
    pub fn update(&mut self, x: f32, y: f32, z: f32) {
        if !self.initialized {
            return;
        }
        self.anchor = Vec3::new(x, y, z);
        let gravity = Vec3::NEG_Z * (BRISTLE_GRAVITY * self.scale);

        for b in 0..self.bristle_count {
            let root = self.root(b);
            let start = b * VERTICES_PER_BRISTLE;
            let end = start + VERTICES_PER_BRISTLE;

            // Unconstrained motion
            for idx in start..end {
                let p = self.positions[idx];
                self.previous[idx] = p;
                if idx == start {
                    self.positions[idx] = root;
                } else {
                    self.positions[idx] = p + self.velocities[idx] * BRISTLE_DAMPING + gravity;
                }
            }

            let segment = self.segment_lengths[b];
            let chain = &mut self.positions[start..end];
            for _ in 0..BRISTLE_ITERATIONS {
                solve_distance(chain, segment);
                solve_plane(chain);
                solve_bending(chain, segment, BRISTLE_STIFFNESS);
            }
            solve_plane(chain);

            for idx in start..end {
                self.velocities[idx] = self.positions[idx] - self.previous[idx];
            }
        }
    }

    /// Every particle within the contact band, deepest contacts weighted most
    pub fn contacts(&self) -> impl Iterator<Item = Contact> + '_ {
        let threshold = self.contact_threshold();
        self.positions
            .iter()
            .zip(&self.velocities)
            .enumerate()
            .filter(move |(idx, (p, _))| idx % VERTICES_PER_BRISTLE != 0 && p.z < threshold)
            .map(move |(_, (p, v))| Contact {
                position: *p,
                velocity: *v,
                weight: (1.0 - p.z / threshold).clamp(0.0, 1.0),
            })
    }

    fn root(&self, bristle: usize) -> Vec3 {
        self.anchor + self.root_offsets[bristle].extend(0.0)
    }
}
