//! PNG files in a directory, one per image id

use std::path::{Path, PathBuf};

use image::{ImageError, ImageFormat, RgbaImage};
use tracing::{debug, info};

use crate::grid::PixelGrid;

use super::{GridStore, StoreError};

/// Stores each image as `{root}/{id}.png`
#[derive(Debug, Clone)]
pub struct PngDirStore {
    root: PathBuf,
}

impl PngDirStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File path for an id; ids must be plain file stems
    pub fn path_for(&self, id: &str) -> Result<PathBuf, StoreError> {
        let valid = !id.is_empty()
            && id != "."
            && id != ".."
            && !id.contains(['/', '\\'])
            && !id.contains('\0');
        if !valid {
            return Err(StoreError::InvalidId(id.to_string()));
        }
        Ok(self.root.join(format!("{id}.png")))
    }
}

/// Decode PNG bytes into a grid
pub fn decode_png(bytes: &[u8]) -> Result<PixelGrid, StoreError> {
    let image = image::load_from_memory_with_format(bytes, ImageFormat::Png)
        .map_err(|e| StoreError::Decode(e.to_string()))?
        .to_rgba8();
    grid_from_image(&image)
}

/// Convert a decoded RGBA8 image into a grid
pub fn grid_from_image(image: &RgbaImage) -> Result<PixelGrid, StoreError> {
    PixelGrid::from_rgba8(image.width(), image.height(), image.as_raw())
        .map_err(|e| StoreError::Decode(e.to_string()))
}

/// Convert a grid into an RGBA8 image (1 pixel per cell)
pub fn image_from_grid(grid: &PixelGrid) -> Result<RgbaImage, StoreError> {
    RgbaImage::from_raw(grid.width(), grid.height(), grid.to_rgba8()).ok_or_else(|| {
        StoreError::Encode(format!(
            "buffer does not fit {}x{}",
            grid.width(),
            grid.height()
        ))
    })
}

impl GridStore for PngDirStore {
    fn load(&self, id: &str) -> Result<PixelGrid, StoreError> {
        let path = self.path_for(id)?;
        debug!("PngDirStore::load: {}", path.display());

        let image = image::open(&path).map_err(|e| match e {
            ImageError::IoError(io) if io.kind() == std::io::ErrorKind::NotFound => {
                StoreError::NotFound(id.to_string())
            }
            ImageError::IoError(io) => StoreError::Io(io),
            other => StoreError::Decode(other.to_string()),
        })?;
        let grid = grid_from_image(&image.to_rgba8())?;

        info!("Loaded {} ({}x{})", id, grid.width(), grid.height());
        Ok(grid)
    }

    fn save(&self, id: &str, grid: &PixelGrid) -> Result<(), StoreError> {
        let path = self.path_for(id)?;
        let image = image_from_grid(grid)?;

        // Write next to the target and rename so readers never see half a file
        let tmp = path.with_extension("png.tmp");
        image
            .save_with_format(&tmp, ImageFormat::Png)
            .map_err(|e| match e {
                ImageError::IoError(io) => StoreError::Io(io),
                other => StoreError::Encode(other.to_string()),
            })?;
        std::fs::rename(&tmp, &path)?;

        info!("Saved {} ({}x{})", id, grid.width(), grid.height());
        Ok(())
    }
}
