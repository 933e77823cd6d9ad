//! Screen-space to grid-cell mapping
//!
//! Zoom is an integer number of screen pixels per grid cell, so the mapping
//! is a floor division with no accumulated state between calls.

use glam::Vec2;

use crate::types::CellCoord;

/// Map a screen position to the cell under it
///
/// Returns None when the position falls outside `[0, width) x [0, height)`
/// or when `zoom` is zero.
pub fn map_to_cell(
    screen: Vec2,
    origin: Vec2,
    zoom: u32,
    width: u32,
    height: u32,
) -> Option<CellCoord> {
    if zoom == 0 {
        return None;
    }
    let local = (screen - origin) / zoom as f32;
    let col = local.x.floor();
    let row = local.y.floor();

    // Also rejects NaN
    if !(col >= 0.0 && row >= 0.0) {
        return None;
    }
    if col >= width as f32 || row >= height as f32 {
        return None;
    }
    Some(CellCoord::new(col as u32, row as u32))
}

/// Top-left screen position of a cell
pub fn cell_origin(coord: CellCoord, origin: Vec2, zoom: u32) -> Vec2 {
    origin + Vec2::new(coord.x as f32, coord.y as f32) * zoom as f32
}

/// Where the canvas sits on screen and how far it is zoomed
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasView {
    /// Screen position of the top-left corner of cell (0, 0)
    pub origin: Vec2,
    /// Screen pixels per cell
    pub zoom: u32,
}

impl Default for CanvasView {
    fn default() -> Self {
        Self {
            origin: Vec2::ZERO,
            zoom: 1,
        }
    }
}

impl CanvasView {
    pub fn new(origin: Vec2, zoom: u32) -> Self {
        Self { origin, zoom }
    }

    #[inline]
    pub fn map(&self, screen: Vec2, width: u32, height: u32) -> Option<CellCoord> {
        map_to_cell(screen, self.origin, self.zoom, width, height)
    }

    #[inline]
    pub fn cell_origin(&self, coord: CellCoord) -> Vec2 {
        cell_origin(coord, self.origin, self.zoom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_identity_zoom() {
        let cell = map_to_cell(Vec2::new(3.5, 7.9), Vec2::ZERO, 1, 10, 10);
        assert_eq!(cell, Some(CellCoord::new(3, 7)));
    }

    #[test]
    fn test_map_with_origin_and_zoom() {
        let origin = Vec2::new(100.0, 50.0);
        // 4 px per cell: x in [108, 112) is column 2
        assert_eq!(
            map_to_cell(Vec2::new(108.0, 50.0), origin, 4, 8, 8),
            Some(CellCoord::new(2, 0))
        );
        assert_eq!(
            map_to_cell(Vec2::new(111.99, 53.99), origin, 4, 8, 8),
            Some(CellCoord::new(2, 0))
        );
        assert_eq!(
            map_to_cell(Vec2::new(112.0, 54.0), origin, 4, 8, 8),
            Some(CellCoord::new(3, 1))
        );
    }

    #[test]
    fn test_map_out_of_bounds() {
        let origin = Vec2::new(10.0, 10.0);
        // Left of / above the canvas floors to -1
        assert_eq!(map_to_cell(Vec2::new(9.5, 12.0), origin, 2, 4, 4), None);
        assert_eq!(map_to_cell(Vec2::new(12.0, 9.99), origin, 2, 4, 4), None);
        // Right edge is exclusive
        assert_eq!(map_to_cell(Vec2::new(18.0, 12.0), origin, 2, 4, 4), None);
        assert_eq!(map_to_cell(Vec2::new(12.0, 12.0), origin, 0, 4, 4), None);
        assert_eq!(map_to_cell(Vec2::new(f32::NAN, 12.0), origin, 2, 4, 4), None);
    }

    #[test]
    fn test_map_exact_for_all_zooms() {
        let origin = Vec2::new(3.0, 5.0);
        for zoom in 1..=10u32 {
            let view = CanvasView::new(origin, zoom);
            for y in 0..16u32 {
                for x in 0..16u32 {
                    let cell = CellCoord::new(x, y);
                    let top_left = view.cell_origin(cell);
                    let bottom_right = top_left + Vec2::splat(zoom as f32 - 0.01);
                    assert_eq!(view.map(top_left, 16, 16), Some(cell));
                    assert_eq!(view.map(bottom_right, 16, 16), Some(cell));
                    // Repeated calls agree
                    assert_eq!(view.map(top_left, 16, 16), view.map(top_left, 16, 16));
                }
            }
        }
    }
}
