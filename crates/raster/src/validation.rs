use crate::constants::{MAX_BRUSH_SIZE, MAX_ZOOM, MIN_BRUSH_SIZE, MIN_ZOOM};
use crate::types::Rgb;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid hex color: {0:?}")]
    InvalidColor(String),
    #[error("Zoom {0} outside {MIN_ZOOM}..={MAX_ZOOM}")]
    ZoomOutOfRange(u32),
    #[error("Brush size {0} outside {MIN_BRUSH_SIZE}..={MAX_BRUSH_SIZE}")]
    BrushSizeOutOfRange(u8),
}

/// Parse `#rrggbb`, `rrggbb` or the `#rgb` shorthand
pub fn parse_hex_color(input: &str) -> Result<Rgb, ValidationError> {
    let invalid = || ValidationError::InvalidColor(input.to_string());
    let digits = input.trim().trim_start_matches('#');
    if !digits.is_ascii() {
        return Err(invalid());
    }

    let channel = |s: &str| u8::from_str_radix(s, 16).map_err(|_| invalid());
    match digits.len() {
        6 => Ok(Rgb::new(
            channel(&digits[0..2])?,
            channel(&digits[2..4])?,
            channel(&digits[4..6])?,
        )),
        3 => {
            // #abc == #aabbcc
            let r = channel(&digits[0..1])?;
            let g = channel(&digits[1..2])?;
            let b = channel(&digits[2..3])?;
            Ok(Rgb::new(r * 17, g * 17, b * 17))
        }
        _ => Err(invalid()),
    }
}

/// Check a zoom level without clamping
pub fn validate_zoom(zoom: u32) -> Result<u32, ValidationError> {
    if (MIN_ZOOM..=MAX_ZOOM).contains(&zoom) {
        Ok(zoom)
    } else {
        Err(ValidationError::ZoomOutOfRange(zoom))
    }
}

/// Check a brush size without clamping
pub fn validate_brush_size(size: u8) -> Result<u8, ValidationError> {
    if (MIN_BRUSH_SIZE..=MAX_BRUSH_SIZE).contains(&size) {
        Ok(size)
    } else {
        Err(ValidationError::BrushSizeOutOfRange(size))
    }
}

pub fn clamp_zoom(zoom: u32) -> u32 {
    zoom.clamp(MIN_ZOOM, MAX_ZOOM)
}

pub fn clamp_brush_size(size: u8) -> u8 {
    size.clamp(MIN_BRUSH_SIZE, MAX_BRUSH_SIZE)
}

/// Convert a brush size to the disk radius used by pen and eraser
pub fn brush_radius(size: u8) -> u32 {
    u32::from(size / 2)
}
