//! Year-by-year savings and return on investment over the system lifetime.

pub mod error;
pub mod forecast;

pub use error::{ForecastError, ForecastResult};
pub use forecast::{
    FORECAST_YEARS, Forecast, ForecastAssumptions, ForecastParams, ForecastYear, payback_year,
};
