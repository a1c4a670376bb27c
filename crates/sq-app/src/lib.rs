//! Shared application service layer for solar quoting.
//!
//! Composes sizing, forecasting and catalog selection into the immutable
//! `DocumentData` snapshot the UI renders, and runs the synthetic-day
//! dispatch for charting. Used by the CLI and by any other frontend.

pub mod config;
pub mod document;
pub mod error;
pub mod quote_id;
pub mod quote_service;
pub mod simulate;

pub use config::{ProfileSettings, QuoteFile, QuoteRequest, load_quote, parse_quote};
pub use document::{
    BatterySelection, CalculateDesign, DocumentData, Environment, SolarPanels, SystemEstimates,
    assemble_document,
};
pub use error::{AppError, AppResult};
pub use quote_id::compute_quote_id;
pub use quote_service::{PreparedQuote, QuoteResponse, prepare_quote, run_quote, validate_quote};
pub use simulate::{DaySimulation, battery_params, simulate_day};
