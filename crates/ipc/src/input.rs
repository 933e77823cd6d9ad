//! Pointer and keyboard input forwarded from the canvas.

use serde::{Deserialize, Serialize};

/// Pointer input, in screen pixels relative to the canvas element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MouseEvent {
    Move { x: f32, y: f32 },
    ButtonDown { button: MouseButton, x: f32, y: f32 },
    ButtonUp { button: MouseButton, x: f32, y: f32 },
    /// Pointer left the canvas
    Leave,
}

impl MouseEvent {
    /// Button involved in a press or release
    pub fn button(&self) -> Option<MouseButton> {
        match self {
            Self::ButtonDown { button, .. } | Self::ButtonUp { button, .. } => Some(*button),
            Self::Move { .. } | Self::Leave => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// A key transition with the modifier state at the time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyboardEvent {
    pub key: String,
    pub pressed: bool,
    #[serde(default)]
    pub modifiers: Modifiers,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    /// Command key on macOS
    pub meta: bool,
}
