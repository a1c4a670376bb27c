//! Error types for dispatch simulation.

use sq_core::CoreError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DispatchError {
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },
}

pub type DispatchResult<T> = Result<T, DispatchError>;

impl From<CoreError> for DispatchError {
    fn from(e: CoreError) -> Self {
        match e {
            CoreError::NonFinite { what, value } => DispatchError::NonFinite { what, value },
            CoreError::InvalidArg { what } => DispatchError::InvalidArg { what },
        }
    }
}
