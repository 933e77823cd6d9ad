//! Tool application on the pixel grid
//!
//! Pen and eraser stamp a filled Euclidean disk, the bucket flood-fills a
//! 4-connected region of one exact color, and the eyedropper only reads.

mod disk;
mod flood_fill;

pub use disk::{disk_offsets, stamp_disk};
pub use flood_fill::flood_fill;

use tracing::debug;

use crate::grid::PixelGrid;
use crate::types::{CellCoord, Pixel, Rgb, Tool};

/// What a tool application did to the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolOutcome {
    /// Pen or eraser wrote `changed` cells with a new value
    Painted { changed: usize },
    /// Bucket recolored `filled` cells
    Filled { filled: usize },
    /// Eyedropper read an opaque color
    Picked(Rgb),
    /// Nothing happened (out of bounds, degenerate fill, transparent pick)
    Unchanged,
}

impl ToolOutcome {
    /// Whether any pixel data changed
    pub fn modified(&self) -> bool {
        match self {
            ToolOutcome::Painted { changed } => *changed > 0,
            ToolOutcome::Filled { filled } => *filled > 0,
            ToolOutcome::Picked(_) | ToolOutcome::Unchanged => false,
        }
    }
}

/// Apply a tool centered on `center`
///
/// `radius` only matters for pen and eraser. A center outside the grid is a
/// no-op for every tool.
pub fn apply_tool(
    grid: &mut PixelGrid,
    tool: Tool,
    color: Rgb,
    radius: u32,
    center: CellCoord,
) -> ToolOutcome {
    if !grid.contains(center) {
        debug!("apply_tool: {:?} at {:?} outside grid, ignoring", tool, center);
        return ToolOutcome::Unchanged;
    }

    match tool {
        Tool::Pen => ToolOutcome::Painted {
            changed: stamp_disk(grid, center, radius, Pixel::Opaque(color)),
        },
        Tool::Eraser => ToolOutcome::Painted {
            changed: stamp_disk(grid, center, radius, Pixel::Transparent),
        },
        Tool::Bucket => match flood_fill(grid, center, Pixel::Opaque(color)) {
            0 => ToolOutcome::Unchanged,
            filled => ToolOutcome::Filled { filled },
        },
        Tool::Eyedropper => pick_color(grid, center)
            .map(ToolOutcome::Picked)
            .unwrap_or(ToolOutcome::Unchanged),
    }
}

/// Read the color under `center`; transparent and out-of-bounds read as None
pub fn pick_color(grid: &PixelGrid, center: CellCoord) -> Option<Rgb> {
    grid.get(center).and_then(Pixel::color)
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgb = Rgb::new(255, 0, 0);
    const BLUE: Rgb = Rgb::new(0, 0, 255);

    #[test]
    fn test_pen_and_eraser() {
        let mut grid = PixelGrid::new(9, 9);
        let center = CellCoord::new(4, 4);

        let outcome = apply_tool(&mut grid, Tool::Pen, RED, 1, center);
        assert_eq!(outcome, ToolOutcome::Painted { changed: 5 });
        assert_eq!(grid.opaque_count(), 5);

        let outcome = apply_tool(&mut grid, Tool::Eraser, BLUE, 0, center);
        assert_eq!(outcome, ToolOutcome::Painted { changed: 1 });
        assert_eq!(grid.get(center), Some(Pixel::Transparent));
        assert_eq!(grid.opaque_count(), 4);
    }

    #[test]
    fn test_out_of_bounds_is_noop() {
        let mut grid = PixelGrid::filled(4, 4, Pixel::Opaque(BLUE));
        let before = grid.clone();
        for tool in [Tool::Pen, Tool::Eraser, Tool::Bucket, Tool::Eyedropper] {
            let outcome = apply_tool(&mut grid, tool, RED, 3, CellCoord::new(4, 0));
            assert_eq!(outcome, ToolOutcome::Unchanged);
        }
        assert_eq!(grid, before);
    }

    #[test]
    fn test_bucket_outcome() {
        let mut grid = PixelGrid::new(3, 3);
        let outcome = apply_tool(&mut grid, Tool::Bucket, RED, 0, CellCoord::new(1, 1));
        assert_eq!(outcome, ToolOutcome::Filled { filled: 9 });
        assert!(outcome.modified());

        // Second fill with the same color is degenerate
        let outcome = apply_tool(&mut grid, Tool::Bucket, RED, 0, CellCoord::new(1, 1));
        assert_eq!(outcome, ToolOutcome::Unchanged);
    }

    #[test]
    fn test_eyedropper_never_mutates() {
        let mut grid = PixelGrid::new(2, 1);
        grid.set(CellCoord::new(0, 0), Pixel::Opaque(BLUE));
        let before = grid.clone();

        let picked = apply_tool(&mut grid, Tool::Eyedropper, RED, 4, CellCoord::new(0, 0));
        assert_eq!(picked, ToolOutcome::Picked(BLUE));
        assert!(!picked.modified());

        let picked = apply_tool(&mut grid, Tool::Eyedropper, RED, 4, CellCoord::new(1, 0));
        assert_eq!(picked, ToolOutcome::Unchanged);
        assert_eq!(grid, before);
    }

    #[test]
    fn test_repainting_same_color_reports_no_change() {
        let mut grid = PixelGrid::filled(3, 3, Pixel::Opaque(RED));
        let outcome = apply_tool(&mut grid, Tool::Pen, RED, 1, CellCoord::new(1, 1));
        assert_eq!(outcome, ToolOutcome::Painted { changed: 0 });
        assert!(!outcome.modified());
    }
}
