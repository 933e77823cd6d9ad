//! Shared configuration for the Nitro pixel editor
//!
//! This crate is the single source of truth for editor defaults: history
//! depth, autosave delay and the initial tool parameters. Values come from
//! the built-in defaults, a JSON file, or `NITRO_*` environment variables.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Default number of undo steps kept
pub const DEFAULT_HISTORY_LIMIT: usize = 50;

/// Default autosave debounce in milliseconds
pub const DEFAULT_AUTOSAVE_MS: u64 = 1000;

/// Default zoom (screen pixels per cell)
pub const DEFAULT_ZOOM: u32 = 1;

/// Default brush diameter in cells
pub const DEFAULT_BRUSH_SIZE: u8 = 1;

/// Default brush color
pub const DEFAULT_BRUSH_COLOR: &str = "#000000";

pub const ENV_HISTORY_LIMIT: &str = "NITRO_HISTORY_LIMIT";
pub const ENV_AUTOSAVE_MS: &str = "NITRO_AUTOSAVE_MS";
pub const ENV_ZOOM: &str = "NITRO_ZOOM";
pub const ENV_BRUSH_SIZE: &str = "NITRO_BRUSH_SIZE";
pub const ENV_BRUSH_COLOR: &str = "NITRO_BRUSH_COLOR";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid value for {var}: {value:?}")]
    InvalidEnv { var: &'static str, value: String },
}

/// Editor configuration
///
/// Missing JSON fields fall back to their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Undo steps kept before the oldest is dropped
    pub history_limit: usize,
    /// Autosave debounce; 0 saves immediately after each edit
    pub autosave_ms: u64,
    pub zoom: u32,
    pub brush_size: u8,
    /// `#rrggbb`
    pub brush_color: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            history_limit: DEFAULT_HISTORY_LIMIT,
            autosave_ms: DEFAULT_AUTOSAVE_MS,
            zoom: DEFAULT_ZOOM,
            brush_size: DEFAULT_BRUSH_SIZE,
            brush_color: DEFAULT_BRUSH_COLOR.to_string(),
        }
    }
}

impl EditorConfig {
    /// Defaults overridden by any `NITRO_*` environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().with_overrides(|var| std::env::var(var).ok())
    }

    /// Parse a JSON config file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let config = serde_json::from_str(&text)?;
        debug!("Loaded config from {}", path.as_ref().display());
        Ok(config)
    }

    /// Apply overrides from `lookup`, which maps a variable name to its value
    pub fn with_overrides(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(value) = lookup(ENV_HISTORY_LIMIT) {
            self.history_limit = parse_var(ENV_HISTORY_LIMIT, value)?;
        }
        if let Some(value) = lookup(ENV_AUTOSAVE_MS) {
            self.autosave_ms = parse_var(ENV_AUTOSAVE_MS, value)?;
        }
        if let Some(value) = lookup(ENV_ZOOM) {
            self.zoom = parse_var(ENV_ZOOM, value)?;
        }
        if let Some(value) = lookup(ENV_BRUSH_SIZE) {
            self.brush_size = parse_var(ENV_BRUSH_SIZE, value)?;
        }
        if let Some(value) = lookup(ENV_BRUSH_COLOR) {
            self.brush_color = value;
        }
        Ok(self)
    }

    /// Autosave delay as a duration
    pub fn autosave_delay(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.autosave_ms)
    }
}

fn parse_var<T: std::str::FromStr>(var: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidEnv { var, value })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var| vars.get(var).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = EditorConfig::default();
        assert_eq!(config.history_limit, 50);
        assert_eq!(config.autosave_ms, 1000);
        assert_eq!(config.zoom, 1);
        assert_eq!(config.brush_size, 1);
        assert_eq!(config.brush_color, "#000000");
    }

    #[test]
    fn test_env_overrides() {
        let config = EditorConfig::default()
            .with_overrides(lookup(&[
                (ENV_HISTORY_LIMIT, "10"),
                (ENV_AUTOSAVE_MS, " 0 "),
                (ENV_BRUSH_COLOR, "#ff8800"),
            ]))
            .unwrap();
        assert_eq!(config.history_limit, 10);
        assert_eq!(config.autosave_ms, 0);
        assert_eq!(config.brush_color, "#ff8800");
        assert_eq!(config.zoom, DEFAULT_ZOOM);
    }

    #[test]
    fn test_invalid_env_value() {
        let err = EditorConfig::default()
            .with_overrides(lookup(&[(ENV_BRUSH_SIZE, "huge")]))
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidEnv { var: ENV_BRUSH_SIZE, .. }
        ));
    }

    #[test]
    fn test_partial_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "zoom": 8, "autosave_ms": 250 }}"#).unwrap();

        let config = EditorConfig::from_json_file(file.path()).unwrap();
        assert_eq!(config.zoom, 8);
        assert_eq!(config.autosave_delay(), std::time::Duration::from_millis(250));
        assert_eq!(config.history_limit, DEFAULT_HISTORY_LIMIT);
    }

    #[test]
    fn test_missing_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = EditorConfig::from_json_file(dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
