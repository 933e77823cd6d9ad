//! In-memory pixel grid under edit

use thiserror::Error;

use crate::types::{CellCoord, Pixel};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridError {
    #[error("Row {row} has {len} cells, expected {expected}")]
    RaggedRows { row: usize, len: usize, expected: usize },
    #[error("Buffer of {len} bytes does not match {width}x{height} RGBA8")]
    BufferSize { width: u32, height: u32, len: usize },
}

/// A fixed-size 2D buffer of pixels
///
/// The shape never changes after creation; only cell values do.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PixelGrid {
    width: u32,
    height: u32,
    /// Row-major cells
    cells: Vec<Pixel>,
}

impl PixelGrid {
    /// Create a fully transparent grid
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, Pixel::Transparent)
    }

    pub fn filled(width: u32, height: u32, pixel: Pixel) -> Self {
        let cell_count = (width as usize) * (height as usize);
        Self {
            width,
            height,
            cells: vec![pixel; cell_count],
        }
    }

    /// Build from rows; every row must have the same length
    pub fn from_rows(rows: Vec<Vec<Pixel>>) -> Result<Self, GridError> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        let mut cells = Vec::with_capacity(width * height);
        for (row, cols) in rows.into_iter().enumerate() {
            if cols.len() != width {
                return Err(GridError::RaggedRows {
                    row,
                    len: cols.len(),
                    expected: width,
                });
            }
            cells.extend(cols);
        }
        Ok(Self {
            width: width as u32,
            height: height as u32,
            cells,
        })
    }

    /// Build from tightly packed RGBA8 bytes
    pub fn from_rgba8(width: u32, height: u32, bytes: &[u8]) -> Result<Self, GridError> {
        let expected = (width as usize) * (height as usize) * 4;
        if bytes.len() != expected {
            return Err(GridError::BufferSize {
                width,
                height,
                len: bytes.len(),
            });
        }
        let texels: &[[u8; 4]] = bytemuck::cast_slice(bytes);
        Ok(Self {
            width,
            height,
            cells: texels.iter().copied().map(Pixel::from_rgba8).collect(),
        })
    }

    /// Build from a cell buffer that already has the right length
    pub(crate) fn from_cells(width: u32, height: u32, cells: Vec<Pixel>) -> Self {
        debug_assert_eq!(cells.len(), (width as usize) * (height as usize));
        Self {
            width,
            height,
            cells,
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[inline]
    pub fn contains(&self, coord: CellCoord) -> bool {
        coord.x < self.width && coord.y < self.height
    }

    #[inline]
    pub(crate) fn index(&self, coord: CellCoord) -> Option<usize> {
        if !self.contains(coord) {
            return None;
        }
        Some((coord.y as usize) * (self.width as usize) + (coord.x as usize))
    }

    /// Returns None if the coordinate is out of bounds
    #[inline]
    pub fn get(&self, coord: CellCoord) -> Option<Pixel> {
        self.index(coord).map(|index| self.cells[index])
    }

    /// Set a cell; out of bounds is a no-op returning false
    #[inline]
    pub fn set(&mut self, coord: CellCoord, pixel: Pixel) -> bool {
        match self.index(coord) {
            Some(index) => {
                self.cells[index] = pixel;
                true
            }
            None => false,
        }
    }

    #[inline]
    pub fn cells(&self) -> &[Pixel] {
        &self.cells
    }

    #[inline]
    pub(crate) fn cells_mut(&mut self) -> &mut [Pixel] {
        &mut self.cells
    }

    /// Iterate rows top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Pixel]> {
        // chunks_exact panics on 0, and a zero-width grid has no cells anyway
        self.cells.chunks_exact(self.width.max(1) as usize)
    }

    /// Count cells that are not transparent
    pub fn opaque_count(&self) -> usize {
        self.cells.iter().filter(|p| !p.is_transparent()).count()
    }

    /// Tightly packed RGBA8 bytes for encoding
    pub fn to_rgba8(&self) -> Vec<u8> {
        let texels: Vec<[u8; 4]> = self.cells.iter().map(|p| p.to_rgba8()).collect();
        bytemuck::cast_slice(&texels).to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Rgb;

    const RED: Pixel = Pixel::Opaque(Rgb::new(255, 0, 0));

    #[test]
    fn test_new_grid() {
        let grid = PixelGrid::new(16, 8);
        assert_eq!(grid.width(), 16);
        assert_eq!(grid.height(), 8);
        assert_eq!(grid.cell_count(), 128);
        assert_eq!(grid.opaque_count(), 0);
    }

    #[test]
    fn test_get_set() {
        let mut grid = PixelGrid::new(4, 4);
        assert!(grid.set(CellCoord::new(1, 2), RED));
        assert_eq!(grid.get(CellCoord::new(1, 2)), Some(RED));
        assert_eq!(grid.get(CellCoord::new(2, 1)), Some(Pixel::Transparent));

        // Out of bounds
        assert!(!grid.set(CellCoord::new(4, 0), RED));
        assert_eq!(grid.get(CellCoord::new(0, 4)), None);
    }

    #[test]
    fn test_from_rows() {
        let grid = PixelGrid::from_rows(vec![
            vec![RED, Pixel::Transparent, RED],
            vec![Pixel::Transparent, RED, Pixel::Transparent],
        ])
        .unwrap();
        assert_eq!(grid.width(), 3);
        assert_eq!(grid.height(), 2);
        assert_eq!(grid.get(CellCoord::new(1, 1)), Some(RED));

        let rows: Vec<&[Pixel]> = grid.rows().collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], &[RED, Pixel::Transparent, RED]);
    }

    #[test]
    fn test_from_rows_ragged() {
        let err = PixelGrid::from_rows(vec![vec![RED, RED], vec![RED]]).unwrap_err();
        assert_eq!(
            err,
            GridError::RaggedRows {
                row: 1,
                len: 1,
                expected: 2
            }
        );
    }

    #[test]
    fn test_rgba8_conversion() {
        let bytes = [255, 0, 0, 255, 9, 9, 9, 0];
        let grid = PixelGrid::from_rgba8(2, 1, &bytes).unwrap();
        assert_eq!(grid.get(CellCoord::new(0, 0)), Some(RED));
        assert_eq!(grid.get(CellCoord::new(1, 0)), Some(Pixel::Transparent));

        // Transparent cells lose their color channels
        assert_eq!(grid.to_rgba8(), vec![255, 0, 0, 255, 0, 0, 0, 0]);

        assert!(matches!(
            PixelGrid::from_rgba8(2, 2, &bytes),
            Err(GridError::BufferSize { len: 8, .. })
        ));
    }

    #[test]
    fn test_clone_is_deep() {
        let mut grid = PixelGrid::new(2, 2);
        let copy = grid.clone();
        grid.set(CellCoord::new(0, 0), RED);
        assert_ne!(grid, copy);
        assert_eq!(copy.opaque_count(), 0);
    }
}
