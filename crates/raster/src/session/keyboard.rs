//! Keyboard shortcuts for history navigation

use std::time::Instant;

use tracing::{debug, info};

use super::events::SideEffect;
use super::{EditorSession, StrokeState};

/// A key press with its modifier state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyChord {
    pub key: String,
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
    /// Command key on macOS, treated like ctrl
    pub meta: bool,
}

impl KeyChord {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Default::default()
        }
    }

    pub fn ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    pub fn shift(mut self) -> Self {
        self.shift = true;
        self
    }
}

/// History actions reachable from the keyboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortcut {
    Undo,
    Redo,
}

impl Shortcut {
    /// Ctrl+Z undoes; Ctrl+Y and Ctrl+Shift+Z redo
    pub fn from_chord(chord: &KeyChord) -> Option<Shortcut> {
        if !(chord.ctrl || chord.meta) || chord.alt {
            return None;
        }
        match (chord.key.to_ascii_lowercase().as_str(), chord.shift) {
            ("z", false) => Some(Shortcut::Undo),
            ("z", true) | ("y", false) => Some(Shortcut::Redo),
            _ => None,
        }
    }
}

impl EditorSession {
    pub(crate) fn handle_key(&mut self, chord: KeyChord, now: Instant) -> Vec<SideEffect> {
        match Shortcut::from_chord(&chord) {
            Some(Shortcut::Undo) => self.undo(now),
            Some(Shortcut::Redo) => self.redo(now),
            None => Vec::new(),
        }
    }

    /// Restore the previous grid state
    ///
    /// No-op without a grid or with an empty undo stack. An in-progress stroke
    /// is committed first.
    pub fn undo(&mut self, now: Instant) -> Vec<SideEffect> {
        self.step_history(now, true)
    }

    /// Re-apply the most recently undone state
    pub fn redo(&mut self, now: Instant) -> Vec<SideEffect> {
        self.step_history(now, false)
    }

    fn step_history(&mut self, now: Instant, backwards: bool) -> Vec<SideEffect> {
        let Some(document) = self.document.as_mut() else {
            debug!("history step ignored: no grid loaded");
            return Vec::new();
        };

        let snapshot = if backwards {
            self.history.undo(&document.grid)
        } else {
            self.history.redo(&document.grid)
        };
        let Some(snapshot) = snapshot else {
            return Vec::new();
        };

        document.grid = snapshot.into_grid();
        self.stroke = StrokeState::Idle;
        info!(
            "{} ({} undo / {} redo)",
            if backwards { "Undo" } else { "Redo" },
            self.history.undo_len(),
            self.history.redo_len()
        );

        let mut effects = vec![self.history_changed(), SideEffect::Redraw];
        effects.extend(self.schedule_save(now));
        effects
    }
}
