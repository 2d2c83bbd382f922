//! Pointer input events.

use serde::{Deserialize, Serialize};

/// Pointer events in canvas pixel coordinates, y measured from the top.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Down { button: PointerButton, x: f32, y: f32 },
    Move { x: f32, y: f32 },
    Up { button: PointerButton },
    /// Pointer entered the canvas without a button pressed
    Enter { x: f32, y: f32 },
}

/// Pointer button identifier. Only `Primary` starts interactions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PointerButton {
    #[default]
    Primary,
    Secondary,
    Middle,
}

impl PointerButton {
    pub fn is_primary(self) -> bool {
        self == PointerButton::Primary
    }
}
