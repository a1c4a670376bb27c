//! Error types for forecasting.

use sq_core::CoreError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ForecastError {
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },
}

pub type ForecastResult<T> = Result<T, ForecastError>;

impl From<CoreError> for ForecastError {
    fn from(e: CoreError) -> Self {
        match e {
            CoreError::NonFinite { what, value } => ForecastError::NonFinite { what, value },
            CoreError::InvalidArg { what } => ForecastError::InvalidArg { what },
        }
    }
}
