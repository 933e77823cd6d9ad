//! Editing session
//!
//! One [`EditorSession`] owns everything a single editor needs: the grid
//! under edit, its history, tool parameters, the stroke state machine and
//! the autosave debouncer. Input arrives as [`InputEvent`]s and comes back
//! out as [`SideEffect`]s for the caller to carry out (redraw, arm a timer,
//! save), so the session has no rendering surface or I/O of its own.

mod events;
mod keyboard;
mod stroke;

pub use events::{InputEvent, SaveJob, SideEffect};
pub use keyboard::{KeyChord, Shortcut};

use std::time::{Duration, Instant};

use glam::Vec2;
use tracing::{debug, info, warn};

use crate::constants::{DEFAULT_HISTORY_LIMIT, DEFAULT_SAVE_DELAY};
use crate::debounce::Debouncer;
use crate::grid::PixelGrid;
use crate::history::HistoryManager;
use crate::mapper::CanvasView;
use crate::store::{GridStore, StoreError};
use crate::types::{CellCoord, Rgb, Tool};
use crate::validation::{brush_radius, clamp_brush_size, clamp_zoom};

/// Construction parameters for a session
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSettings {
    pub history_limit: usize,
    /// Autosave debounce window; zero saves on the first poll
    pub save_delay: Duration,
    pub zoom: u32,
    pub brush_size: u8,
    pub brush_color: Rgb,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            history_limit: DEFAULT_HISTORY_LIMIT,
            save_delay: DEFAULT_SAVE_DELAY,
            zoom: 1,
            brush_size: 1,
            brush_color: Rgb::BLACK,
        }
    }
}

/// User-selected tool parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolState {
    pub tool: Tool,
    pub brush_color: Rgb,
    /// 1..=10
    pub brush_size: u8,
    /// Screen pixels per cell, 1..=10
    pub zoom: u32,
}

impl ToolState {
    /// Disk radius for pen and eraser
    #[inline]
    pub fn radius(&self) -> u32 {
        brush_radius(self.brush_size)
    }
}

/// Whether a pen/eraser drag is in progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StrokeState {
    #[default]
    Idle,
    /// The stroke's checkpoint has been taken
    Active { tool: Tool },
}

/// Autosave progress as reported to the user
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SaveStatus {
    #[default]
    Idle,
    /// Timer armed
    Pending,
    /// Handed to the save capability
    Saving,
    Saved,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadStatus {
    #[default]
    Empty,
    Loaded,
    /// The last load failed; any previous grid is still in place
    Failed(String),
}

/// The grid under edit and the id it is stored under
#[derive(Debug, Clone)]
pub(crate) struct Document {
    pub(crate) id: String,
    pub(crate) grid: PixelGrid,
}

/// A single editing session
#[derive(Debug)]
pub struct EditorSession {
    pub(crate) document: Option<Document>,
    pub(crate) history: HistoryManager,
    pub(crate) tools: ToolState,
    pub(crate) stroke: StrokeState,
    pub(crate) origin: Vec2,
    pub(crate) autosave: Debouncer,
    /// Cell under the pointer, for the brush preview
    pub(crate) cursor: Option<CellCoord>,
    save_status: SaveStatus,
    load_status: LoadStatus,
    /// Generation of the most recent save handed out
    dispatched: Option<u64>,
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new(SessionSettings::default())
    }
}

impl EditorSession {
    pub fn new(settings: SessionSettings) -> Self {
        Self {
            document: None,
            history: HistoryManager::with_limit(settings.history_limit),
            tools: ToolState {
                tool: Tool::default(),
                brush_color: settings.brush_color,
                brush_size: clamp_brush_size(settings.brush_size),
                zoom: clamp_zoom(settings.zoom),
            },
            stroke: StrokeState::Idle,
            origin: Vec2::ZERO,
            autosave: Debouncer::new(settings.save_delay),
            cursor: None,
            save_status: SaveStatus::Idle,
            load_status: LoadStatus::Empty,
            dispatched: None,
        }
    }

    /// Process one input event to completion
    pub fn handle(&mut self, event: InputEvent, now: Instant) -> Vec<SideEffect> {
        match event {
            InputEvent::PointerDown { position } => self.pointer_down(position, now),
            InputEvent::PointerMove { position } => self.pointer_move(position),
            InputEvent::PointerUp => self.pointer_up(now),
            InputEvent::PointerLeave => self.pointer_leave(),
            InputEvent::Key(chord) => self.handle_key(chord, now),
            InputEvent::SelectTool(tool) => {
                // An active stroke keeps the tool it started with
                self.tools.tool = tool;
                vec![SideEffect::Redraw]
            }
            InputEvent::SetBrushColor(color) => {
                if color == self.tools.brush_color {
                    return Vec::new();
                }
                self.tools.brush_color = color;
                vec![SideEffect::BrushColorChanged(color), SideEffect::Redraw]
            }
            InputEvent::SetBrushSize(size) => {
                self.tools.brush_size = clamp_brush_size(size);
                vec![SideEffect::Redraw]
            }
            InputEvent::SetZoom(zoom) => {
                self.tools.zoom = clamp_zoom(zoom);
                vec![SideEffect::Redraw]
            }
            InputEvent::SetCanvasOrigin(origin) => {
                self.origin = origin;
                Vec::new()
            }
        }
    }

    /// Load `id` from `store`, replacing the current grid
    ///
    /// On failure the previous grid (if any) stays authoritative and the
    /// error is returned. Nothing is retried.
    pub fn load(&mut self, store: &dyn GridStore, id: &str) -> Result<Vec<SideEffect>, StoreError> {
        self.finish_load(id, store.load(id))
    }

    /// Apply the outcome of a store read done elsewhere, as [`Self::load`] does
    pub fn finish_load(
        &mut self,
        id: &str,
        loaded: Result<PixelGrid, StoreError>,
    ) -> Result<Vec<SideEffect>, StoreError> {
        match loaded {
            Ok(grid) => Ok(self.open(id, grid)),
            Err(e) => {
                warn!("Failed to load {}: {}", id, e);
                self.load_status = LoadStatus::Failed(e.to_string());
                Err(e)
            }
        }
    }

    /// Start editing `grid` under `id`
    ///
    /// History is reset because snapshots of the old grid no longer apply.
    /// Unsaved edits of the previous grid, including a stroke still in
    /// progress, are flushed as a `SaveNow`. Its result is not reported
    /// against the new grid.
    pub fn open(&mut self, id: &str, grid: PixelGrid) -> Vec<SideEffect> {
        let mut effects = Vec::new();
        if self.autosave.pending() {
            effects.push(SideEffect::CancelSave);
        }
        effects.extend(self.flush_autosave().map(SideEffect::SaveNow));
        self.dispatched = None;
        self.save_status = SaveStatus::Idle;

        info!("Editing {} ({}x{})", id, grid.width(), grid.height());
        self.document = Some(Document {
            id: id.to_string(),
            grid,
        });
        self.reset_editing_state();
        self.load_status = LoadStatus::Loaded;

        effects.push(self.history_changed());
        effects.push(SideEffect::Redraw);
        effects
    }

    /// Replace the current image with an imported one and schedule a save
    ///
    /// Ignored when nothing is loaded, since there is no id to save under.
    pub fn import(&mut self, grid: PixelGrid, now: Instant) -> Vec<SideEffect> {
        let Some(document) = self.document.as_mut() else {
            warn!("import ignored: no image loaded");
            return Vec::new();
        };
        info!(
            "Importing {}x{} image into {}",
            grid.width(),
            grid.height(),
            document.id
        );
        document.grid = grid;
        self.reset_editing_state();

        let mut effects = vec![self.history_changed(), SideEffect::Redraw];
        effects.extend(self.schedule_save(now));
        effects
    }

    fn reset_editing_state(&mut self) {
        self.history.clear();
        self.stroke = StrokeState::Idle;
        self.cursor = None;
    }

    /// Hand out the grid for saving once the debounce deadline has passed
    pub fn poll_autosave(&mut self, now: Instant) -> Option<SaveJob> {
        let generation = self.autosave.take_due(now)?;
        self.dispatch(generation)
    }

    /// Hand out the grid for saving now if it has unsaved edits
    ///
    /// A stroke in progress is committed first; its edits count as unsaved
    /// since pressing cancelled the timer.
    pub fn flush_autosave(&mut self) -> Option<SaveJob> {
        let stroking = self.is_stroking();
        self.stroke = StrokeState::Idle;
        if !self.autosave.pending() && !stroking {
            return None;
        }
        let generation = self.autosave.fire_now();
        self.dispatch(generation)
    }

    fn dispatch(&mut self, generation: u64) -> Option<SaveJob> {
        let document = self.document.as_ref()?;
        debug!("Dispatching save #{} of {}", generation, document.id);
        let job = SaveJob {
            generation,
            id: document.id.clone(),
            grid: document.grid.clone(),
        };
        self.dispatched = Some(generation);
        self.save_status = SaveStatus::Saving;
        Some(job)
    }

    /// Record the result of a save job
    ///
    /// The grid and history are never touched: a failed save leaves the edit
    /// applied locally. Results of superseded jobs are only logged.
    pub fn complete_save(
        &mut self,
        generation: u64,
        result: Result<(), StoreError>,
    ) -> Vec<SideEffect> {
        let current = self.dispatched == Some(generation) && !self.autosave.pending();
        let status = match result {
            Ok(()) => {
                debug!("Save #{} finished", generation);
                SaveStatus::Saved
            }
            Err(e) => {
                warn!("Save #{} failed: {}", generation, e);
                SaveStatus::Failed(e.to_string())
            }
        };
        if !current {
            return Vec::new();
        }
        self.save_status = status.clone();
        vec![SideEffect::StatusChanged(status)]
    }

    pub(crate) fn schedule_save(&mut self, now: Instant) -> Vec<SideEffect> {
        if self.document.is_none() {
            return Vec::new();
        }
        let deadline = self.autosave.schedule(now);
        self.save_status = SaveStatus::Pending;
        vec![
            SideEffect::ScheduleSave { deadline },
            SideEffect::StatusChanged(SaveStatus::Pending),
        ]
    }

    pub(crate) fn history_changed(&self) -> SideEffect {
        SideEffect::HistoryChanged {
            can_undo: self.history.can_undo(),
            can_redo: self.history.can_redo(),
        }
    }

    pub(crate) fn map_to_cell(&self, position: Vec2) -> Option<CellCoord> {
        let grid = self.grid()?;
        self.view().map(position, grid.width(), grid.height())
    }

    pub fn grid(&self) -> Option<&PixelGrid> {
        self.document.as_ref().map(|document| &document.grid)
    }

    pub fn document_id(&self) -> Option<&str> {
        self.document.as_ref().map(|document| document.id.as_str())
    }

    pub fn tool_state(&self) -> &ToolState {
        &self.tools
    }

    pub fn history(&self) -> &HistoryManager {
        &self.history
    }

    pub fn stroke_state(&self) -> StrokeState {
        self.stroke
    }

    pub fn is_stroking(&self) -> bool {
        matches!(self.stroke, StrokeState::Active { .. })
    }

    pub fn view(&self) -> CanvasView {
        CanvasView::new(self.origin, self.tools.zoom)
    }

    pub fn cursor(&self) -> Option<CellCoord> {
        self.cursor
    }

    pub fn save_status(&self) -> &SaveStatus {
        &self.save_status
    }

    pub fn load_status(&self) -> &LoadStatus {
        &self.load_status
    }

    /// Deadline of the armed autosave timer, if any
    pub fn save_deadline(&self) -> Option<Instant> {
        self.autosave.deadline()
    }
}
