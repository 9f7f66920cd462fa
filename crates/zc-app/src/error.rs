//! Error types for the zc-app editor layer.

use std::path::PathBuf;

/// Application error type that wraps errors from the lower crates and the
/// outside world (zone-list fetch, files).
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Core(#[from] zc_core::CoreError),

    #[error("Zone list error: {0}")]
    ZoneList(#[from] zc_form::FormError),

    #[error("Failed to fetch zone list from {url}")]
    Fetch {
        url: String,
        source: reqwest::Error,
    },

    #[error("Failed to read file: {path}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for zc-app operations.
pub type AppResult<T> = Result<T, AppError>;
