/// Particles per bristle chain, including the anchored root.
pub const VERTICES_PER_BRISTLE: usize = 10;

/// Bristle length in units of brush scale.
pub const BRISTLE_LENGTH: f32 = 4.5;

/// Random variation of bristle length, as a fraction of the length.
pub const BRISTLE_JITTER: f32 = 0.5;

/// Constraint solver iterations per brush update.
pub const BRISTLE_ITERATIONS: usize = 20;

/// Downward acceleration per frame, in units of brush scale.
pub const BRISTLE_GRAVITY: f32 = 0.01;

/// Fraction of bristle velocity kept from one frame to the next.
pub const BRISTLE_DAMPING: f32 = 0.85;

/// Strength of the bending constraint (0..1).
pub const BRISTLE_STIFFNESS: f32 = 0.3;

/// Seed for bristle placement so brushes are reproducible.
pub const BRISTLE_SEED: u64 = 0x5eed_b215;

/// Contact height threshold in units of brush scale.
pub const Z_THRESHOLD: f32 = 0.13333;

/// Distance from the painting's right/top edge that starts a resize, in pixels.
pub const RESIZING_RADIUS: f32 = 20.0;

/// Feather distance for the resize preview blend, in pixels.
pub const RESIZING_FEATHER_SIZE: f32 = 200.0;

/// Fluid steps to keep running after the last splat.
pub const FRAMES_TO_SIMULATE: u32 = 60;

/// Fluid time step in grid cells per frame.
pub const FLUID_DT: f32 = 1.0;
