//! Error types for catalog loading and validation.

use std::path::PathBuf;

use thiserror::Error;

pub type CatalogResult<T> = Result<T, CatalogError>;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Catalog has no {table}")]
    Empty { table: &'static str },

    #[error("Duplicate {table} brand: {brand}")]
    DuplicateBrand { table: &'static str, brand: String },

    #[error("More than one recommended entry in {table}")]
    MultipleRecommended { table: &'static str },

    #[error("Invalid value for {brand}.{field}: {value} ({reason})")]
    InvalidValue {
        brand: String,
        field: &'static str,
        value: f64,
        reason: &'static str,
    },

    #[error("Failed to read catalog file: {path}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
