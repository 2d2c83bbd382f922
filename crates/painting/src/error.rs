use thiserror::Error;

/// Errors surfaced by the painting engine
///
/// Simulation and history operations never fail; only producing output
/// buffers for the host can.
#[derive(Debug, Error)]
pub enum PaintError {
    #[error("Cannot export an empty painting ({width}x{height})")]
    EmptyPainting { width: u32, height: u32 },
    #[error("Pixel buffer does not match export size {width}x{height}")]
    ExportBuffer { width: u32, height: u32 },
}
