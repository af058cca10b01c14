//! Application configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{StudioError, StudioResult};

/// Sample stream played when no override is configured.
pub const DEFAULT_STREAM_URL: &str =
    "https://commondatastorage.googleapis.com/gtv-videos-bucket/sample/BigBuckBunny.mp4";

/// Global application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Video stream shown under the overlays. Not editable from the UI.
    pub stream_url: String,

    /// Main window settings.
    pub window: WindowConfig,

    /// Composition surface layout.
    pub surface: SurfaceConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Main window settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Initial inner width in logical pixels.
    pub width: f32,

    /// Initial inner height in logical pixels.
    pub height: f32,
}

/// Layout of the video/composition surface.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceConfig {
    /// Width divided by height of the surface while no frame has arrived yet.
    pub aspect_ratio: f32,

    /// Share of the window width given to the surface column.
    pub column_fraction: f32,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "studio_model=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,

    /// Optional log file path.
    pub file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            stream_url: DEFAULT_STREAM_URL.to_string(),
            window: WindowConfig::default(),
            surface: SurfaceConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 820.0,
        }
    }
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            aspect_ratio: 16.0 / 9.0,
            column_fraction: 2.0 / 3.0,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            file: None,
        }
    }
}

impl AppConfig {
    /// Load config from the standard location, falling back to defaults.
    pub fn load() -> Self {
        let config_path = config_file_path();
        if !config_path.exists() {
            return Self::default();
        }
        match Self::load_from(&config_path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Failed to load config at {:?}: {}", config_path, e);
                Self::default()
            }
        }
    }

    /// Load config from an explicit path.
    pub fn load_from(path: impl AsRef<Path>) -> StudioResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(StudioError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save config to the standard location.
    pub fn save(&self) -> StudioResult<()> {
        self.save_to(config_file_path())
    }

    /// Save config to an explicit path, creating parent directories.
    pub fn save_to(&self, path: impl AsRef<Path>) -> StudioResult<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    fn validate(&self) -> StudioResult<()> {
        if self.stream_url.trim().is_empty() {
            return Err(StudioError::config("stream_url must not be empty"));
        }
        if !(self.surface.aspect_ratio.is_finite() && self.surface.aspect_ratio > 0.0) {
            return Err(StudioError::config(format!(
                "surface.aspect_ratio must be positive, got {}",
                self.surface.aspect_ratio
            )));
        }
        if !(0.1..=1.0).contains(&self.surface.column_fraction) {
            return Err(StudioError::config(format!(
                "surface.column_fraction must be within [0.1, 1.0], got {}",
                self.surface.column_fraction
            )));
        }
        Ok(())
    }
}

/// Standard config file location.
pub fn config_file_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("overlay-studio").join("config.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_point_at_sample_stream() {
        let config = AppConfig::default();
        assert_eq!(config.stream_url, DEFAULT_STREAM_URL);
        assert_eq!(config.logging.level, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let config: AppConfig =
            serde_json::from_str(r#"{ "logging": { "level": "debug" } }"#).unwrap();
        assert_eq!(config.logging.level, "debug");
        assert!(!config.logging.json);
        assert_eq!(config.stream_url, DEFAULT_STREAM_URL);
        assert!((config.window.width - 1280.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = std::env::temp_dir().join("overlay_studio_test_config");
        let _ = std::fs::remove_dir_all(&dir);
        let path = dir.join("config.json");

        let mut config = AppConfig::default();
        config.stream_url = "file:///tmp/clip.mp4".to_string();
        config.save_to(&path).unwrap();

        let loaded = AppConfig::load_from(&path).unwrap();
        assert_eq!(loaded.stream_url, "file:///tmp/clip.mp4");

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_load_from_missing_path_reports_not_found() {
        let err = AppConfig::load_from("/nonexistent/overlay-studio.json").unwrap_err();
        assert!(matches!(err, StudioError::FileNotFound { .. }));
    }

    #[test]
    fn test_validation_rejects_empty_stream_url() {
        let mut config = AppConfig::default();
        config.stream_url = "  ".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("stream_url"));
    }
}
