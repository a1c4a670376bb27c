//! Error types for profile generation.

use sq_core::CoreError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProfileError {
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },
}

pub type ProfileResult<T> = Result<T, ProfileError>;

impl From<CoreError> for ProfileError {
    fn from(e: CoreError) -> Self {
        match e {
            CoreError::NonFinite { what, value } => ProfileError::NonFinite { what, value },
            CoreError::InvalidArg { what } => ProfileError::InvalidArg { what },
        }
    }
}
