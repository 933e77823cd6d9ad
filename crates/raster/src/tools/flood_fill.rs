//! 4-connected flood fill with an explicit stack

use tracing::debug;

use crate::grid::PixelGrid;
use crate::types::{CellCoord, Pixel};

/// Recolor the 4-connected region of cells matching the start cell's value
///
/// Matching is exact. Returns the number of cells filled; zero when the start
/// is out of bounds or already holds `fill`.
pub fn flood_fill(grid: &mut PixelGrid, start: CellCoord, fill: Pixel) -> usize {
    let Some(target) = grid.get(start) else {
        return 0;
    };
    if target == fill {
        return 0;
    }

    let width = grid.width();
    let height = grid.height();
    // Gates exploration independently of cell values
    let mut visited = vec![false; grid.cell_count()];
    let mut stack = vec![start];
    let mut filled = 0;

    while let Some(cell) = stack.pop() {
        let Some(index) = grid.index(cell) else {
            continue;
        };
        if visited[index] || grid.cells()[index] != target {
            continue;
        }
        visited[index] = true;
        grid.cells_mut()[index] = fill;
        filled += 1;

        if cell.x + 1 < width {
            stack.push(CellCoord::new(cell.x + 1, cell.y));
        }
        if cell.x > 0 {
            stack.push(CellCoord::new(cell.x - 1, cell.y));
        }
        if cell.y + 1 < height {
            stack.push(CellCoord::new(cell.x, cell.y + 1));
        }
        if cell.y > 0 {
            stack.push(CellCoord::new(cell.x, cell.y - 1));
        }
    }

    debug!(
        "flood_fill: {} cells from ({}, {}) {:?} -> {:?}",
        filled, start.x, start.y, target, fill
    );
    filled
}
