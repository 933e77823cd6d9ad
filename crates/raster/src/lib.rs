//! Nitro raster editor - pixel grid editing engine
//!
//! This crate provides everything behind the pixel-art editor canvas:
//! - [`types::Pixel`] - A cell value, transparent or an opaque RGB color
//! - [`grid`] - Row-major pixel grid with bounds-checked access
//! - [`mapper`] - Screen position to cell mapping at integer zoom
//! - [`tools`] - Pen, eraser, bucket fill and eyedropper
//! - [`history`] - Bounded undo/redo of grid snapshots
//! - [`debounce`] - Coalescing autosave deadline
//! - [`session`] - Event-driven editing session producing side effects
//! - [`store`] - PNG load/save capability
//! - [`render`] - CPU rasterization of the canvas view

pub mod constants;
pub mod debounce;
pub mod grid;
pub mod history;
pub mod mapper;
pub mod render;
pub mod session;
pub mod store;
pub mod tools;
pub mod types;
pub mod validation;

pub use constants::*;
pub use debounce::*;
pub use grid::*;
pub use history::*;
pub use mapper::*;
pub use render::*;
pub use session::*;
pub use store::*;
pub use tools::*;
pub use types::*;
pub use validation::*;
