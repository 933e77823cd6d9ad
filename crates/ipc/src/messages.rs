//! Main IPC message enums for communication between the editor and UI.

use serde::{Deserialize, Serialize};

use crate::commands::EditorCommand;
use crate::error::IpcError;
use crate::input::{KeyboardEvent, MouseEvent};

/// Messages from the UI to the editor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum UiToEditor {
    /// Toolbar and file actions
    Command(EditorCommand),

    /// Pointer input over the canvas
    Mouse(MouseEvent),

    /// Key press or release
    Keyboard(KeyboardEvent),
}

/// Autosave progress shown next to the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SaveState {
    Idle,
    Pending,
    Saving,
    Saved,
    Failed,
}

/// Messages from the editor to the UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum EditorToUi {
    /// An image was loaded or imported
    Loaded { id: String, width: u32, height: u32 },

    /// Undo/redo availability changed (toolbar button state)
    HistoryChanged { can_undo: bool, can_redo: bool },

    /// Brush color changed, e.g. by the eyedropper
    BrushColorChanged { color: [u8; 3] },

    /// Autosave status
    SaveStatus {
        state: SaveState,
        message: Option<String>,
    },

    /// Error notification
    Error { code: String, message: String },

    /// Canvas needs repainting
    Redraw,
}

impl UiToEditor {
    /// Parse one JSON message
    pub fn from_json(text: &str) -> Result<Self, IpcError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(IpcError::Empty);
        }
        Ok(serde_json::from_str(text)?)
    }
}

impl EditorToUi {
    pub fn to_json(&self) -> Result<String, IpcError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn error(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Error {
            code: code.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::ToolKind;
    use crate::input::{Modifiers, MouseButton};

    #[test]
    fn test_command_wire_format() {
        let msg = UiToEditor::Command(EditorCommand::SelectTool {
            tool: ToolKind::Bucket,
        });
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "type": "Command",
                "data": { "SelectTool": { "tool": "bucket" } }
            })
        );
    }

    #[test]
    fn test_parse_script_lines() {
        let mouse = UiToEditor::from_json(
            r#"{"type":"Mouse","data":{"ButtonDown":{"button":"Left","x":3.5,"y":1.0}}}"#,
        )
        .unwrap();
        assert_eq!(
            mouse,
            UiToEditor::Mouse(MouseEvent::ButtonDown {
                button: MouseButton::Left,
                x: 3.5,
                y: 1.0
            })
        );

        let undo = UiToEditor::from_json(r#"{"type":"Command","data":"Undo"}"#).unwrap();
        assert_eq!(undo, UiToEditor::Command(EditorCommand::Undo));

        let key = UiToEditor::from_json(
            r#"{"type":"Keyboard","data":{"key":"z","pressed":true}}"#,
        )
        .unwrap();
        assert_eq!(
            key,
            UiToEditor::Keyboard(KeyboardEvent {
                key: "z".to_string(),
                pressed: true,
                modifiers: Modifiers::default(),
            })
        );
    }

    #[test]
    fn test_invalid_messages() {
        assert!(matches!(
            UiToEditor::from_json("   "),
            Err(IpcError::Empty)
        ));
        assert!(matches!(
            UiToEditor::from_json(r#"{"type":"Teleport"}"#),
            Err(IpcError::Json(_))
        ));
    }

    #[test]
    fn test_notification_json() {
        let json = EditorToUi::SaveStatus {
            state: SaveState::Failed,
            message: Some("disk full".to_string()),
        }
        .to_json()
        .unwrap();
        assert!(json.contains(r#""type":"SaveStatus""#));
        assert!(json.contains(r#""state":"failed""#));

        let json = EditorToUi::Redraw.to_json().unwrap();
        assert_eq!(json, r#"{"type":"Redraw"}"#);
    }
}
