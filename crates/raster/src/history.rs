//! Bounded undo/redo history of full-grid snapshots

use std::collections::VecDeque;

use tracing::debug;

use crate::constants::DEFAULT_HISTORY_LIMIT;
use crate::grid::PixelGrid;
use crate::types::Pixel;

/// An immutable value copy of a grid at one point in time
///
/// Owns its cells outright; editing the live grid afterwards never reaches
/// a stored snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    width: u32,
    height: u32,
    cells: Box<[Pixel]>,
}

impl Snapshot {
    pub fn capture(grid: &PixelGrid) -> Self {
        Self {
            width: grid.width(),
            height: grid.height(),
            cells: grid.cells().into(),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn cells(&self) -> &[Pixel] {
        &self.cells
    }

    /// Turn the snapshot back into a live grid
    pub fn into_grid(self) -> PixelGrid {
        PixelGrid::from_cells(self.width, self.height, self.cells.into_vec())
    }
}

/// Undo and redo stacks
///
/// The undo stack is a sliding window: once it holds `limit` snapshots the
/// oldest is dropped for every new one. Any checkpoint clears redo.
#[derive(Debug, Clone)]
pub struct HistoryManager {
    /// Oldest first
    undo_stack: VecDeque<Snapshot>,
    /// Most recent at the end
    redo_stack: Vec<Snapshot>,
    limit: usize,
}

impl Default for HistoryManager {
    fn default() -> Self {
        Self::with_limit(DEFAULT_HISTORY_LIMIT)
    }
}

impl HistoryManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// A limit of 0 disables undo entirely
    pub fn with_limit(limit: usize) -> Self {
        Self {
            undo_stack: VecDeque::with_capacity(limit.min(DEFAULT_HISTORY_LIMIT)),
            redo_stack: Vec::new(),
            limit,
        }
    }

    /// Record the grid as it is before a mutation
    pub fn checkpoint(&mut self, grid: &PixelGrid) {
        self.push_undo(Snapshot::capture(grid));
        if !self.redo_stack.is_empty() {
            debug!("checkpoint: discarding {} redo entries", self.redo_stack.len());
            self.redo_stack.clear();
        }
    }

    /// Pop the most recent snapshot, parking `current` on the redo stack
    ///
    /// Returns None (and changes nothing) when there is nothing to undo.
    pub fn undo(&mut self, current: &PixelGrid) -> Option<Snapshot> {
        let previous = self.undo_stack.pop_back()?;
        self.redo_stack.push(Snapshot::capture(current));
        debug!(
            "undo: {} undo / {} redo remaining",
            self.undo_stack.len(),
            self.redo_stack.len()
        );
        Some(previous)
    }

    /// Pop the most recent redo snapshot, parking `current` on the undo stack
    pub fn redo(&mut self, current: &PixelGrid) -> Option<Snapshot> {
        let next = self.redo_stack.pop()?;
        self.push_undo(Snapshot::capture(current));
        debug!(
            "redo: {} undo / {} redo remaining",
            self.undo_stack.len(),
            self.redo_stack.len()
        );
        Some(next)
    }

    fn push_undo(&mut self, snapshot: Snapshot) {
        self.undo_stack.push_back(snapshot);
        while self.undo_stack.len() > self.limit {
            self.undo_stack.pop_front();
        }
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    #[inline]
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    #[inline]
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    #[inline]
    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    #[inline]
    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }

    #[inline]
    pub fn limit(&self) -> usize {
        self.limit
    }
}
