//! Load and save capabilities for the grid under edit
//!
//! The engine only needs "give me a grid for this id" and "store this grid
//! under this id". How bytes travel is up to the implementation.

mod memory;
mod png;

pub use memory::MemoryStore;
pub use png::{PngDirStore, decode_png, grid_from_image, image_from_grid};

use thiserror::Error;

use crate::grid::PixelGrid;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Image not found: {0}")]
    NotFound(String),

    #[error("Invalid image id: {0:?}")]
    InvalidId(String),

    #[error("Failed to decode image: {0}")]
    Decode(String),

    #[error("Failed to encode image: {0}")]
    Encode(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Save rejected: {0}")]
    Rejected(String),
}

/// Backing storage for editable images
pub trait GridStore: Send + Sync {
    /// Fetch and decode the image stored under `id`
    fn load(&self, id: &str) -> Result<PixelGrid, StoreError>;

    /// Encode and store `grid` under `id`, replacing any previous image
    fn save(&self, id: &str, grid: &PixelGrid) -> Result<(), StoreError>;
}
