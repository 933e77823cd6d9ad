//! Editor command types: tool selection, brush parameters and file actions.

use serde::{Deserialize, Serialize};

/// Editing tool identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolKind {
    #[default]
    Pen,
    Eraser,
    Bucket,
    Eyedropper,
}

/// Commands for controlling the editor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EditorCommand {
    SelectTool { tool: ToolKind },
    /// Set brush color (RGB, 0-255)
    SetBrushColor { color: [u8; 3] },
    /// Set brush diameter in cells (1-10)
    SetBrushSize { size: u8 },
    /// Set screen pixels per cell (1-10)
    SetZoom { zoom: u32 },
    /// Screen position of the canvas' top-left corner
    SetCanvasOrigin { x: i32, y: i32 },
    Undo,
    Redo,
    /// Load the image stored under `id`
    Load { id: String },
    /// Replace the current image with a PNG file
    Import { path: String },
    /// Write the current image to a PNG file
    Export { path: String },
}
