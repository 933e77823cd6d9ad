use std::time::Duration;

/// Default number of undo levels kept per session.
pub const DEFAULT_HISTORY_LIMIT: usize = 50;

/// Default autosave debounce window.
pub const DEFAULT_SAVE_DELAY: Duration = Duration::from_millis(1000);

/// Zoom is expressed in screen pixels per grid cell.
pub const MIN_ZOOM: u32 = 1;
pub const MAX_ZOOM: u32 = 10;

/// Brush size range exposed to the user (radius = size / 2).
pub const MIN_BRUSH_SIZE: u8 = 1;
pub const MAX_BRUSH_SIZE: u8 = 10;

/// Smallest checkerboard square drawn behind transparent cells.
pub const MIN_CHECKER_SIZE: u32 = 8;

/// Grid lines are only drawn above this zoom.
pub const GRID_OVERLAY_MIN_ZOOM: u32 = 3;
