//! Pointer handling: turns press / drag / release into history entries
//!
//! A pen or eraser stroke checkpoints once on press, mutates the live grid on
//! every move, and schedules the autosave on release. Bucket and eyedropper
//! act once per press.

use std::time::Instant;

use glam::Vec2;
use tracing::debug;

use crate::tools::{ToolOutcome, apply_tool, pick_color};
use crate::types::{CellCoord, Pixel, Tool};

use super::events::SideEffect;
use super::{EditorSession, StrokeState};

impl EditorSession {
    pub(crate) fn pointer_down(&mut self, position: Vec2, now: Instant) -> Vec<SideEffect> {
        let mut effects = Vec::new();
        // A press without a release in between closes the previous stroke
        if self.is_stroking() {
            effects.extend(self.finish_stroke(now));
        }

        let Some(cell) = self.map_to_cell(position) else {
            return effects;
        };
        self.cursor = Some(cell);

        let tool = self.tools.tool;
        if tool.is_continuous() {
            effects.extend(self.begin_stroke(tool, cell));
        } else if tool == Tool::Bucket {
            effects.extend(self.bucket_fill(cell, now));
        } else {
            effects.extend(self.pick(cell));
        }
        effects
    }

    pub(crate) fn pointer_move(&mut self, position: Vec2) -> Vec<SideEffect> {
        let cell = self.map_to_cell(position);
        let mut redraw = cell != self.cursor;
        self.cursor = cell;

        if let (StrokeState::Active { tool }, Some(cell)) = (self.stroke, cell) {
            redraw |= self.apply_at(tool, cell).modified();
        }

        if redraw {
            vec![SideEffect::Redraw]
        } else {
            Vec::new()
        }
    }

    pub(crate) fn pointer_up(&mut self, now: Instant) -> Vec<SideEffect> {
        self.finish_stroke(now)
    }

    pub(crate) fn pointer_leave(&mut self) -> Vec<SideEffect> {
        if self.cursor.take().is_some() {
            vec![SideEffect::Redraw]
        } else {
            Vec::new()
        }
    }

    /// Idle -> Active: one checkpoint for the whole stroke
    fn begin_stroke(&mut self, tool: Tool, cell: CellCoord) -> Vec<SideEffect> {
        let Some(document) = self.document.as_ref() else {
            return Vec::new();
        };
        let mut effects = Vec::new();

        // Edits restart the debounce window; the save is re-armed on release
        if self.autosave.cancel() {
            effects.push(SideEffect::CancelSave);
        }

        self.history.checkpoint(&document.grid);
        self.stroke = StrokeState::Active { tool };
        debug!("begin_stroke: {:?} at ({}, {})", tool, cell.x, cell.y);

        self.apply_at(tool, cell);
        effects.push(self.history_changed());
        effects.push(SideEffect::Redraw);
        effects
    }

    /// Active -> Idle: arm the autosave
    pub(crate) fn finish_stroke(&mut self, now: Instant) -> Vec<SideEffect> {
        let StrokeState::Active { tool } = self.stroke else {
            return Vec::new();
        };
        self.stroke = StrokeState::Idle;
        debug!("finish_stroke: {:?}", tool);
        self.schedule_save(now)
    }

    fn bucket_fill(&mut self, cell: CellCoord, now: Instant) -> Vec<SideEffect> {
        let fill = Pixel::Opaque(self.tools.brush_color);
        let Some(document) = self.document.as_ref() else {
            return Vec::new();
        };
        // Degenerate fills leave no trace in history
        if document.grid.get(cell) == Some(fill) {
            debug!("bucket_fill: target already {:?}, ignoring", fill);
            return Vec::new();
        }

        self.history.checkpoint(&document.grid);
        self.apply_at(Tool::Bucket, cell);

        let mut effects = vec![self.history_changed(), SideEffect::Redraw];
        effects.extend(self.schedule_save(now));
        effects
    }

    fn pick(&mut self, cell: CellCoord) -> Vec<SideEffect> {
        let picked = self
            .document
            .as_ref()
            .and_then(|document| pick_color(&document.grid, cell));
        match picked {
            Some(color) if color != self.tools.brush_color => {
                self.tools.brush_color = color;
                vec![SideEffect::BrushColorChanged(color), SideEffect::Redraw]
            }
            _ => Vec::new(),
        }
    }

    fn apply_at(&mut self, tool: Tool, cell: CellCoord) -> ToolOutcome {
        let color = self.tools.brush_color;
        let radius = self.tools.radius();
        match self.document.as_mut() {
            Some(document) => apply_tool(&mut document.grid, tool, color, radius, cell),
            None => ToolOutcome::Unchanged,
        }
    }
}
