//! CPU rasterization of the editor view
//!
//! Produces what the canvas shows: a transparency checkerboard, the opaque
//! cells scaled by the zoom factor, a faint cell grid at higher zoom levels
//! and the pen's brush silhouette under the cursor. Nothing here mutates the
//! grid.

use image::{Rgba, RgbaImage};

use crate::constants::{GRID_OVERLAY_MIN_ZOOM, MIN_CHECKER_SIZE};
use crate::grid::PixelGrid;
use crate::session::EditorSession;
use crate::tools::disk_offsets;
use crate::types::{CellCoord, Rgb, Tool};

const CHECKER_LIGHT: Rgba<u8> = Rgba([0xff, 0xff, 0xff, 0xff]);
const CHECKER_DARK: Rgba<u8> = Rgba([0xe0, 0xe0, 0xe0, 0xff]);
/// Grid line opacity over black, in 1/255 units (~10%)
const GRID_LINE_ALPHA: u16 = 26;

/// What to draw on top of the grid
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderOptions {
    /// Screen pixels per cell
    pub zoom: u32,
    pub tool: Tool,
    pub brush_color: Rgb,
    pub radius: u32,
    /// Hover cell for the brush preview
    pub cursor: Option<CellCoord>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            zoom: 1,
            tool: Tool::Pen,
            brush_color: Rgb::BLACK,
            radius: 0,
            cursor: None,
        }
    }
}

impl EditorSession {
    /// Render options reflecting the current tool state and cursor
    pub fn render_options(&self) -> RenderOptions {
        let tools = self.tool_state();
        RenderOptions {
            zoom: tools.zoom,
            tool: tools.tool,
            brush_color: tools.brush_color,
            radius: tools.radius(),
            cursor: self.cursor(),
        }
    }
}

/// Render `grid` as the canvas would show it
pub fn render_view(grid: &PixelGrid, options: &RenderOptions) -> RgbaImage {
    let zoom = options.zoom.max(1);
    let mut image = RgbaImage::new(grid.width() * zoom, grid.height() * zoom);

    draw_checkerboard(&mut image, zoom);

    for (y, row) in grid.rows().enumerate() {
        for (x, pixel) in row.iter().enumerate() {
            if let Some(color) = pixel.color() {
                fill_cell(&mut image, x as u32, y as u32, zoom, color);
            }
        }
    }

    if zoom >= GRID_OVERLAY_MIN_ZOOM {
        draw_grid_lines(&mut image, zoom);
    }

    if let (Tool::Pen, Some(cursor)) = (options.tool, options.cursor) {
        draw_brush_preview(&mut image, grid, cursor, options, zoom);
    }

    image
}

/// 1:1 export of the grid, transparent cells kept transparent
pub fn export_image(grid: &PixelGrid) -> RgbaImage {
    let mut image = RgbaImage::new(grid.width(), grid.height());
    for (pixel, cell) in image.pixels_mut().zip(grid.cells()) {
        *pixel = Rgba(cell.to_rgba8());
    }
    image
}

fn draw_checkerboard(image: &mut RgbaImage, zoom: u32) {
    let size = zoom.max(MIN_CHECKER_SIZE);
    for (x, y, pixel) in image.enumerate_pixels_mut() {
        *pixel = if (x / size + y / size) % 2 == 1 {
            CHECKER_DARK
        } else {
            CHECKER_LIGHT
        };
    }
}

fn fill_cell(image: &mut RgbaImage, x: u32, y: u32, zoom: u32, color: Rgb) {
    let rgba = Rgba(color.to_rgba8());
    for py in y * zoom..(y + 1) * zoom {
        for px in x * zoom..(x + 1) * zoom {
            image.put_pixel(px, py, rgba);
        }
    }
}

fn draw_grid_lines(image: &mut RgbaImage, zoom: u32) {
    for (x, y, pixel) in image.enumerate_pixels_mut() {
        if x % zoom == 0 || y % zoom == 0 {
            for channel in &mut pixel.0[..3] {
                *channel = darken(*channel);
            }
        }
    }
}

fn darken(channel: u8) -> u8 {
    ((channel as u16 * (255 - GRID_LINE_ALPHA) + 127) / 255) as u8
}

fn draw_brush_preview(
    image: &mut RgbaImage,
    grid: &PixelGrid,
    cursor: CellCoord,
    options: &RenderOptions,
    zoom: u32,
) {
    for (dx, dy) in disk_offsets(options.radius) {
        if let Some(cell) = cursor.offset(dx, dy).filter(|cell| grid.contains(*cell)) {
            fill_cell(image, cell.x, cell.y, zoom, options.brush_color);
        }
    }
}
