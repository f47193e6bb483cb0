//! Configuration loading for the viewer.
//!
//! Viewer settings are loaded from an optional TOML file. Every key has a
//! default, so an empty file is a valid configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::mapping::CoordinateMapping;

/// Default location of the dataset, relative to the working directory.
pub const DEFAULT_DATA_PATH: &str = "assets/data/smlc_data.json";

/// Level shown when the viewer starts.
pub const DEFAULT_LEVEL: &str = "individual";

/// Complete viewer configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Path to the dataset JSON
    pub data_path: PathBuf,
    /// Level selected at startup
    pub initial_level: String,
    /// Slider to scene coordinate mapping
    pub mapping: CoordinateMapping,
    /// Window settings
    pub window: WindowConfig,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            initial_level: DEFAULT_LEVEL.to_string(),
            mapping: CoordinateMapping::default(),
            window: WindowConfig::default(),
        }
    }
}

impl ViewerConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_str(&content)
    }

    /// Parses configuration from a TOML string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks values the TOML types alone cannot rule out.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let scale = self.mapping.scale;
        if !scale.is_finite() || scale <= 0.0 {
            return Err(ConfigError::InvalidScale(scale));
        }
        Ok(())
    }

    /// Returns this configuration as a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

/// Window settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Window title
    pub title: String,
    /// Logical width in pixels
    pub width: f32,
    /// Logical height in pixels
    pub height: f32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "SMLC Cube".to_string(),
            width: 1280.0,
            height: 720.0,
        }
    }
}

/// Errors that can occur during configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// IO error reading config file
    #[error("failed to read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Error parsing TOML config
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    /// Mapping scale that would not keep coordinates increasing
    #[error("mapping scale must be a positive number, got {0}")]
    InvalidScale(f32),
    /// Error writing TOML config
    #[error("TOML serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = ViewerConfig::from_str("").unwrap();
        assert_eq!(config, ViewerConfig::default());
        assert_eq!(config.data_path, PathBuf::from(DEFAULT_DATA_PATH));
        assert_eq!(config.initial_level, "individual");
        assert_eq!(config.mapping.midpoint, 3);
        assert_eq!(config.mapping.scale, 50.0);
    }

    #[test]
    fn test_partial_config() {
        let config = ViewerConfig::from_str(
            r#"
            initial_level = "team"

            [mapping]
            scale = 25.0

            [window]
            title = "Cube"
            "#,
        )
        .unwrap();

        assert_eq!(config.initial_level, "team");
        assert_eq!(config.mapping.scale, 25.0);
        assert_eq!(config.mapping.midpoint, 3);
        assert_eq!(config.window.title, "Cube");
        assert_eq!(config.window.width, 1280.0);
        assert_eq!(config.data_path, PathBuf::from(DEFAULT_DATA_PATH));
    }

    #[test]
    fn test_invalid_config() {
        let err = ViewerConfig::from_str("initial_level = 3").unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
    }

    #[test]
    fn test_non_positive_scale_rejected() {
        for scale in ["0.0", "-50.0", "nan"] {
            let err = ViewerConfig::from_str(&format!("[mapping]\nscale = {}\n", scale)).unwrap_err();
            assert!(matches!(err, ConfigError::InvalidScale(_)), "scale {}", scale);
        }

        let config = ViewerConfig::from_str("[mapping]\nscale = 0.5\n").unwrap();
        assert_eq!(config.mapping.scale, 0.5);
    }

    #[test]
    fn test_toml_round_trip() {
        let config = ViewerConfig::default();
        let toml = config.to_toml().unwrap();
        assert!(toml.contains("initial_level = \"individual\""));
        assert_eq!(ViewerConfig::from_str(&toml).unwrap(), config);
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("viewer.toml");
        std::fs::write(&path, "data_path = \"other.json\"\n").unwrap();

        let config = ViewerConfig::from_file(&path).unwrap();
        assert_eq!(config.data_path, PathBuf::from("other.json"));

        let missing = ViewerConfig::from_file(&dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(missing, ConfigError::Io { .. }));
    }
}
