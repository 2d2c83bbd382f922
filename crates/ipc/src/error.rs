//! Errors from encoding or decoding host messages.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum IpcError {
    #[error("Message JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A line of a message batch could not be decoded
    #[error("Malformed message on line {line}: {reason}")]
    MalformedLine { line: usize, reason: String },
}
