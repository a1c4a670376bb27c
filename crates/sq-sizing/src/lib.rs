//! System sizing and pricing from a customer's bill and site.
//!
//! Sizing targets the array that pays back fastest for the customer's usage
//! pattern; pricing is a set of closed-form curves over the chosen size.

pub mod constants;
pub mod error;
pub mod pricing;
pub mod sizing;

pub use error::SizingError;
pub use pricing::{
    Pricing, inverter_price, labour_price, net_metering_price, price_system, solar_price,
};
pub use sizing::{DesignFigures, SizingResult, design_figures, panel_count, size_system};
