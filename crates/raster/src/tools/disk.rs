//! Filled-disk brush stamp for pen and eraser

use crate::grid::PixelGrid;
use crate::types::{CellCoord, Pixel};

/// All integer offsets with `dx² + dy² <= radius²`, row by row
///
/// Radius 0 is the single offset (0, 0).
pub fn disk_offsets(radius: u32) -> Vec<(i32, i32)> {
    let r = radius as i32;
    let r_sq = i64::from(r) * i64::from(r);
    let mut offsets = Vec::new();
    for dy in -r..=r {
        for dx in -r..=r {
            let dist_sq = i64::from(dx) * i64::from(dx) + i64::from(dy) * i64::from(dy);
            if dist_sq <= r_sq {
                offsets.push((dx, dy));
            }
        }
    }
    offsets
}

/// Write `pixel` to every in-bounds cell of the disk around `center`
///
/// Returns how many cells actually changed value.
pub fn stamp_disk(grid: &mut PixelGrid, center: CellCoord, radius: u32, pixel: Pixel) -> usize {
    let mut changed = 0;
    for (dx, dy) in disk_offsets(radius) {
        let Some(cell) = center.offset(dx, dy) else {
            continue;
        };
        if grid.get(cell).is_some_and(|current| current != pixel) {
            grid.set(cell, pixel);
            changed += 1;
        }
    }
    changed
}
