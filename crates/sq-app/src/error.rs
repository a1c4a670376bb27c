//! Error types for the sq-app service layer.

use std::path::PathBuf;

/// Application error; each engine stage keeps its own variant so callers can
/// tell which step rejected the input.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Failed to read quote file: {path}")]
    QuoteFileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse quote file: {0}")]
    QuoteParse(#[from] serde_yaml::Error),

    #[error("Invalid input: {0}")]
    Input(#[from] sq_core::CoreError),

    #[error("Catalog error: {0}")]
    Catalog(#[from] sq_catalog::CatalogError),

    #[error("Profile generation failed: {0}")]
    Profile(#[from] sq_profile::ProfileError),

    #[error("Dispatch simulation failed: {0}")]
    Dispatch(#[from] sq_dispatch::DispatchError),

    #[error("Sizing failed: {0}")]
    Sizing(#[from] sq_sizing::SizingError),

    #[error("Forecast failed: {0}")]
    Forecast(#[from] sq_forecast::ForecastError),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for sq-app operations.
pub type AppResult<T> = Result<T, AppError>;
