use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::validation::{ValidationError, parse_hex_color};

/// A concrete opaque color
///
/// Laid out as three bytes so a row of colors can be viewed as raw RGB data.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    bytemuck::Pod,
    bytemuck::Zeroable,
)]
#[repr(C)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// RGBA8 bytes with full alpha
    #[inline]
    pub fn to_rgba8(self) -> [u8; 4] {
        [self.r, self.g, self.b, 255]
    }
}

impl From<[u8; 3]> for Rgb {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self { r, g, b }
    }
}

impl From<Rgb> for [u8; 3] {
    fn from(color: Rgb) -> Self {
        [color.r, color.g, color.b]
    }
}

/// Formats as `#rrggbb`
impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_hex_color(s)
    }
}

/// One grid cell: fully opaque or fully transparent, never in between
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Pixel {
    #[default]
    Transparent,
    Opaque(Rgb),
}

impl Pixel {
    #[inline]
    pub fn is_transparent(self) -> bool {
        matches!(self, Pixel::Transparent)
    }

    /// The opaque color, if any
    #[inline]
    pub fn color(self) -> Option<Rgb> {
        match self {
            Pixel::Opaque(rgb) => Some(rgb),
            Pixel::Transparent => None,
        }
    }

    /// Any non-zero alpha counts as opaque; the alpha value itself is dropped.
    #[inline]
    pub fn from_rgba8([r, g, b, a]: [u8; 4]) -> Self {
        if a == 0 {
            Pixel::Transparent
        } else {
            Pixel::Opaque(Rgb::new(r, g, b))
        }
    }

    #[inline]
    pub fn to_rgba8(self) -> [u8; 4] {
        match self {
            Pixel::Opaque(rgb) => rgb.to_rgba8(),
            Pixel::Transparent => [0, 0, 0, 0],
        }
    }
}

impl From<Rgb> for Pixel {
    fn from(rgb: Rgb) -> Self {
        Pixel::Opaque(rgb)
    }
}

/// Editing tools
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Tool {
    #[default]
    Pen,
    Eraser,
    Bucket,
    Eyedropper,
}

impl Tool {
    /// Pen and eraser keep applying while the pointer is dragged
    #[inline]
    pub fn is_continuous(self) -> bool {
        matches!(self, Tool::Pen | Tool::Eraser)
    }
}

/// Grid cell index (column, row)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellCoord {
    pub x: u32,
    pub y: u32,
}

impl CellCoord {
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Offset by a signed delta, `None` if it would go negative
    #[inline]
    pub fn offset(self, dx: i32, dy: i32) -> Option<CellCoord> {
        let x = self.x.checked_add_signed(dx)?;
        let y = self.y.checked_add_signed(dy)?;
        Some(CellCoord { x, y })
    }
}
