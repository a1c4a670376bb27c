//! Error types for sizing.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SizingError {
    #[error("Invalid input: {0}")]
    Input(#[from] sq_core::CoreError),

    #[error("Invalid panel rating: {value} kW")]
    PanelRating { value: f64 },
}
