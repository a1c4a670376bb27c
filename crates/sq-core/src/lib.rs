//! sq-core: stable foundation for the solar quote engine.
//!
//! Contains:
//! - units (uom SI types + kW/kWh constructors)
//! - numeric (Real + tolerances + money helpers)
//! - inputs (customer inputs and their tagged constant tables)
//! - error (shared error types)

pub mod error;
pub mod inputs;
pub mod numeric;
pub mod units;

pub use error::{CoreError, CoreResult};
pub use inputs::*;
pub use numeric::*;
pub use units::*;
