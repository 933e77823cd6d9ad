//! Editor configuration resolution
//!
//! Layers, lowest first: built-in defaults or a JSON file, `NITRO_*`
//! environment variables, then command-line overrides.

use std::path::Path;
use std::time::Duration;

use anyhow::Context as _;
use nitro_config::EditorConfig;
use raster::{SessionSettings, parse_hex_color, validate_brush_size, validate_zoom};

/// Load the config file (or defaults) and apply environment overrides
pub fn load_config(path: Option<&Path>) -> anyhow::Result<EditorConfig> {
    let base = match path {
        Some(path) => EditorConfig::from_json_file(path)
            .with_context(|| format!("load config '{}'", path.display()))?,
        None => EditorConfig::default(),
    };
    Ok(base.with_overrides(|var| std::env::var(var).ok())?)
}

/// Convert a resolved config into session settings
///
/// Out-of-range zoom or brush size is an error here rather than being
/// clamped, so a typo in the config file does not go unnoticed.
pub fn session_settings(
    config: &EditorConfig,
    autosave_ms: Option<u64>,
) -> anyhow::Result<SessionSettings> {
    let brush_color = parse_hex_color(&config.brush_color)
        .with_context(|| format!("brush color '{}'", config.brush_color))?;
    let zoom = validate_zoom(config.zoom).context("zoom")?;
    let brush_size = validate_brush_size(config.brush_size).context("brush size")?;
    let save_delay = autosave_ms
        .map(Duration::from_millis)
        .unwrap_or_else(|| config.autosave_delay());

    Ok(SessionSettings {
        history_limit: config.history_limit,
        save_delay,
        zoom,
        brush_size,
        brush_color,
    })
}
