//! Translation between IPC messages and session events

use std::path::PathBuf;

use glam::Vec2;
use nitro_ipc::{
    EditorCommand, EditorToUi, KeyboardEvent, MouseButton, MouseEvent, SaveState, ToolKind,
    UiToEditor,
};
use raster::{InputEvent, KeyChord, Rgb, SaveStatus, SideEffect, Tool};

/// What a UI message asks the driver to do
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Feed straight into the session
    Input(InputEvent),
    Undo,
    Redo,
    Load(String),
    Import(PathBuf),
    Export(PathBuf),
}

/// Map a UI message to a driver action; `None` for input the editor ignores
pub fn translate(message: UiToEditor) -> Option<Action> {
    match message {
        UiToEditor::Command(command) => Some(translate_command(command)),
        UiToEditor::Mouse(event) => translate_mouse(event).map(Action::Input),
        UiToEditor::Keyboard(event) => translate_key(event).map(Action::Input),
    }
}

fn translate_command(command: EditorCommand) -> Action {
    match command {
        EditorCommand::SelectTool { tool } => Action::Input(InputEvent::SelectTool(tool_from(tool))),
        EditorCommand::SetBrushColor { color } => {
            Action::Input(InputEvent::SetBrushColor(Rgb::from(color)))
        }
        EditorCommand::SetBrushSize { size } => Action::Input(InputEvent::SetBrushSize(size)),
        EditorCommand::SetZoom { zoom } => Action::Input(InputEvent::SetZoom(zoom)),
        EditorCommand::SetCanvasOrigin { x, y } => {
            Action::Input(InputEvent::SetCanvasOrigin(Vec2::new(x as f32, y as f32)))
        }
        EditorCommand::Undo => Action::Undo,
        EditorCommand::Redo => Action::Redo,
        EditorCommand::Load { id } => Action::Load(id),
        EditorCommand::Import { path } => Action::Import(PathBuf::from(path)),
        EditorCommand::Export { path } => Action::Export(PathBuf::from(path)),
    }
}

fn translate_mouse(event: MouseEvent) -> Option<InputEvent> {
    // Only the primary button edits
    if event.button().is_some_and(|button| button != MouseButton::Left) {
        return None;
    }
    let input = match event {
        MouseEvent::Move { x, y } => InputEvent::PointerMove {
            position: Vec2::new(x, y),
        },
        MouseEvent::ButtonDown { x, y, .. } => InputEvent::PointerDown {
            position: Vec2::new(x, y),
        },
        MouseEvent::ButtonUp { .. } => InputEvent::PointerUp,
        MouseEvent::Leave => InputEvent::PointerLeave,
    };
    Some(input)
}

fn translate_key(event: KeyboardEvent) -> Option<InputEvent> {
    if !event.pressed {
        return None;
    }
    Some(InputEvent::Key(KeyChord {
        key: event.key,
        ctrl: event.modifiers.ctrl,
        shift: event.modifiers.shift,
        alt: event.modifiers.alt,
        meta: event.modifiers.meta,
    }))
}

fn tool_from(kind: ToolKind) -> Tool {
    match kind {
        ToolKind::Pen => Tool::Pen,
        ToolKind::Eraser => Tool::Eraser,
        ToolKind::Bucket => Tool::Bucket,
        ToolKind::Eyedropper => Tool::Eyedropper,
    }
}

/// UI notification for a side effect, if the UI cares about it
pub fn notification(effect: &SideEffect) -> Option<EditorToUi> {
    match effect {
        SideEffect::Redraw => Some(EditorToUi::Redraw),
        SideEffect::BrushColorChanged(color) => Some(EditorToUi::BrushColorChanged {
            color: (*color).into(),
        }),
        SideEffect::HistoryChanged { can_undo, can_redo } => Some(EditorToUi::HistoryChanged {
            can_undo: *can_undo,
            can_redo: *can_redo,
        }),
        SideEffect::StatusChanged(status) => Some(save_status(status)),
        SideEffect::ScheduleSave { .. } | SideEffect::CancelSave | SideEffect::SaveNow(_) => None,
    }
}

pub fn save_status(status: &SaveStatus) -> EditorToUi {
    let (state, message) = match status {
        SaveStatus::Idle => (SaveState::Idle, None),
        SaveStatus::Pending => (SaveState::Pending, None),
        SaveStatus::Saving => (SaveState::Saving, None),
        SaveStatus::Saved => (SaveState::Saved, None),
        SaveStatus::Failed(message) => (SaveState::Failed, Some(message.clone())),
    };
    EditorToUi::SaveStatus { state, message }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nitro_ipc::Modifiers;

    #[test]
    fn test_translate_mouse() {
        let down = UiToEditor::Mouse(MouseEvent::ButtonDown {
            button: MouseButton::Left,
            x: 4.0,
            y: 2.5,
        });
        assert_eq!(
            translate(down),
            Some(Action::Input(InputEvent::PointerDown {
                position: Vec2::new(4.0, 2.5)
            }))
        );

        let right = UiToEditor::Mouse(MouseEvent::ButtonDown {
            button: MouseButton::Right,
            x: 0.0,
            y: 0.0,
        });
        assert_eq!(translate(right), None);
    }

    #[test]
    fn test_translate_keyboard() {
        let press = UiToEditor::Keyboard(KeyboardEvent {
            key: "z".to_string(),
            pressed: true,
            modifiers: Modifiers {
                ctrl: true,
                ..Default::default()
            },
        });
        assert_eq!(
            translate(press),
            Some(Action::Input(InputEvent::Key(KeyChord::new("z").ctrl())))
        );

        let release = UiToEditor::Keyboard(KeyboardEvent {
            key: "z".to_string(),
            pressed: false,
            modifiers: Modifiers::default(),
        });
        assert_eq!(translate(release), None);
    }

    #[test]
    fn test_translate_commands() {
        assert_eq!(
            translate(UiToEditor::Command(EditorCommand::SetBrushColor {
                color: [1, 2, 3]
            })),
            Some(Action::Input(InputEvent::SetBrushColor(Rgb::new(1, 2, 3))))
        );
        assert_eq!(
            translate(UiToEditor::Command(EditorCommand::Load {
                id: "hero".to_string()
            })),
            Some(Action::Load("hero".to_string()))
        );
    }

    #[test]
    fn test_notifications() {
        assert_eq!(notification(&SideEffect::CancelSave), None);
        assert_eq!(
            notification(&SideEffect::StatusChanged(SaveStatus::Failed("nope".into()))),
            Some(EditorToUi::SaveStatus {
                state: SaveState::Failed,
                message: Some("nope".to_string())
            })
        );
        assert_eq!(
            notification(&SideEffect::BrushColorChanged(Rgb::new(9, 8, 7))),
            Some(EditorToUi::BrushColorChanged { color: [9, 8, 7] })
        );
    }
}
