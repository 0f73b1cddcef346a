//! Frame configuration.

use crate::snap::{GRID_SIZE, SnapMode};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Default handle buffer (half the handle size) in item units.
pub const DEFAULT_BUFFER: f64 = 4.0;
/// Smallest width/height a frame may be resized to.
pub const DEFAULT_MIN_SIZE: f64 = 40.0;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Result type for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Tunables for a handle frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameConfig {
    /// Handle buffer; handles are `2 * buffer` square.
    pub buffer: f64,
    /// Minimum frame width and height during resize.
    pub min_size: f64,
    /// When set, dragging the frame body does not move it.
    pub resize_only: bool,
    /// Snapping applied when a frame move is released.
    pub snap: SnapMode,
    /// Grid spacing used by [`SnapMode::Grid`].
    pub grid_size: f64,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            buffer: DEFAULT_BUFFER,
            min_size: DEFAULT_MIN_SIZE,
            resize_only: false,
            snap: SnapMode::None,
            grid_size: GRID_SIZE,
        }
    }
}

impl FrameConfig {
    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let json = std::fs::read_to_string(path.as_ref())?;
        log::debug!("Loading frame config from {}", path.as_ref().display());
        Self::from_json(&json)
    }

    /// Check that the values describe a usable frame.
    pub fn validate(&self) -> ConfigResult<()> {
        if !self.buffer.is_finite() || self.buffer < 0.0 {
            return Err(ConfigError::Invalid(format!("buffer must be >= 0, got {}", self.buffer)));
        }
        if !self.min_size.is_finite() || self.min_size < 2.0 * self.buffer {
            return Err(ConfigError::Invalid(format!(
                "min_size must be at least twice the buffer ({}), got {}",
                2.0 * self.buffer,
                self.min_size
            )));
        }
        if self.snap == SnapMode::Grid && !(self.grid_size.is_finite() && self.grid_size > 0.0) {
            return Err(ConfigError::Invalid(format!("grid_size must be > 0, got {}", self.grid_size)));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = FrameConfig::default();
        assert_eq!(config.buffer, 4.0);
        assert_eq!(config.min_size, 40.0);
        assert!(!config.resize_only);
        assert_eq!(config.snap, SnapMode::None);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = FrameConfig::from_json(r#"{ "resize_only": true }"#).unwrap();
        assert!(config.resize_only);
        assert_eq!(config.buffer, DEFAULT_BUFFER);
        assert_eq!(config.min_size, DEFAULT_MIN_SIZE);
    }

    #[test]
    fn test_invalid_buffer_rejected() {
        let err = FrameConfig::from_json(r#"{ "buffer": -1.0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_min_size_smaller_than_handles_rejected() {
        let err = FrameConfig::from_json(r#"{ "buffer": 30.0, "min_size": 40.0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_malformed_json() {
        let err = FrameConfig::from_json("{ buffer: ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "buffer": 6.0, "snap": "Grid", "grid_size": 10.0 }}"#).unwrap();

        let config = FrameConfig::load(file.path()).unwrap();
        assert_eq!(config.buffer, 6.0);
        assert_eq!(config.snap, SnapMode::Grid);
        assert_eq!(config.grid_size, 10.0);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = FrameConfig::load(dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
