//! Main IPC message enums for communication between the engine and its host.

use serde::{Deserialize, Serialize};

use crate::commands::PaintCommand;
use crate::error::IpcError;
use crate::input::PointerEvent;

/// Messages from the host UI to the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum HostToEngine {
    /// Primary pointer input
    Pointer(PointerEvent),
    /// Paint command from a widget or hotkey
    Command(PaintCommand),
}

/// Messages from the engine to the host UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum EngineToHost {
    /// Undo/redo availability changed
    HistoryChanged { can_undo: bool, can_redo: bool },

    /// Painting rectangle changed size
    PaintingResized { width: f32, height: f32 },

    /// An export image is ready for the host to encode
    ImageExported { width: u32, height: u32 },
}

impl HostToEngine {
    pub fn to_json(&self) -> Result<String, IpcError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, IpcError> {
        Ok(serde_json::from_str(json)?)
    }
}

impl EngineToHost {
    pub fn to_json(&self) -> Result<String, IpcError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, IpcError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Parse a batch of newline-delimited host messages.
///
/// Blank lines are skipped. The first malformed line aborts the batch.
pub fn parse_host_batch(batch: &str) -> Result<Vec<HostToEngine>, IpcError> {
    batch
        .lines()
        .enumerate()
        .map(|(idx, line)| (idx + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty())
        .map(|(line_no, line)| {
            HostToEngine::from_json(line).map_err(|err| IpcError::MalformedLine {
                line: line_no,
                reason: err.to_string(),
            })
        })
        .collect()
}
