//! Session inputs and the side effects they produce

use std::time::Instant;

use glam::Vec2;

use crate::grid::PixelGrid;
use crate::types::{Rgb, Tool};

use super::SaveStatus;
use super::keyboard::KeyChord;

/// Everything that can drive an editing session
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Primary button pressed at a screen position
    PointerDown { position: Vec2 },
    /// Pointer moved (button held or not)
    PointerMove { position: Vec2 },
    /// Primary button released
    PointerUp,
    /// Pointer left the canvas
    PointerLeave,
    /// Key pressed with modifiers
    Key(KeyChord),
    SelectTool(Tool),
    SetBrushColor(Rgb),
    SetBrushSize(u8),
    SetZoom(u32),
    /// Screen position of the canvas' top-left corner
    SetCanvasOrigin(Vec2),
}

/// Work the caller must carry out after an event
///
/// The session never draws or performs I/O itself.
#[derive(Debug, Clone, PartialEq)]
pub enum SideEffect {
    /// Grid, cursor or view changed
    Redraw,
    /// Arm (or re-arm) the autosave timer; supersedes any earlier deadline
    ScheduleSave { deadline: Instant },
    /// Disarm the autosave timer
    CancelSave,
    /// Persist this job right away (pending edits of a grid being replaced)
    SaveNow(SaveJob),
    BrushColorChanged(Rgb),
    HistoryChanged { can_undo: bool, can_redo: bool },
    StatusChanged(SaveStatus),
}

/// A grid ready to hand to the save capability
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveJob {
    /// Autosave generation; pass back to `EditorSession::complete_save`
    pub generation: u64,
    pub id: String,
    pub grid: PixelGrid,
}
