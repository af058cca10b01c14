//! Error types shared across Overlay Studio crates.

use std::path::PathBuf;

/// Top-level error type for Overlay Studio operations.
///
/// Editing operations on the overlay list never fail; this type covers the
/// infrastructure around them (media backend, configuration, window setup).
#[derive(Debug, thiserror::Error)]
pub enum StudioError {
    #[error("Playback error: {message}")]
    Playback { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("UI error: {message}")]
    Ui { message: String },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using StudioError.
pub type StudioResult<T> = Result<T, StudioError>;

impl StudioError {
    pub fn playback(msg: impl Into<String>) -> Self {
        Self::Playback {
            message: msg.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    pub fn ui(msg: impl Into<String>) -> Self {
        Self::Ui {
            message: msg.into(),
        }
    }
}
