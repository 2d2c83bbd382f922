//! Fluid paint simulation core
//!
//! This crate provides the simulation engine behind the painting tool:
//! - [`field`] - Flat per-cell arenas for pigment, thickness and flow
//! - [`fluid`] - Semi-Lagrangian advection with Jacobi pressure projection
//! - [`bristle`] - Position-based bristle bundle physics
//! - [`splat`] - Paint and velocity injection at bristle contacts
//! - [`history`] - Fixed-capacity snapshot ring for undo/redo
//! - [`compositor`] - Relief-lit rendering to RGBA8 images
//! - [`session`] - The per-frame pipeline and host command handling

pub mod bristle;
pub mod color;
pub mod compositor;
pub mod constants;
pub mod error;
pub mod field;
pub mod fluid;
pub mod history;
pub mod perf;
pub mod session;
pub mod splat;
pub mod types;

pub use bristle::{Brush, Contact};
pub use compositor::{Compositor, LightingParams};
pub use constants::*;
pub use error::PaintError;
pub use field::{FieldGrid, PaintLayer, ResampleMode, grid_resolution};
pub use fluid::FluidSolver;
pub use history::{HistoryCursor, Snapshot, SnapshotRing, SnapshotState};
pub use perf::FrameStats;
pub use session::PaintSession;
pub use splat::{SplatParams, splat, splat_alpha};
pub use types::*;
