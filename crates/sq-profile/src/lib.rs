//! Synthetic daily solar and load curves at 5-minute resolution.
//!
//! Provides:
//! - Sine-bell solar profile with bounded uniform jitter
//! - Two-hour block load profile, renormalised to an exact daily energy
//! - `TimeSeries` pairing both curves for dispatch
//!
//! All randomness comes from a caller-supplied seed so curves are reproducible.

pub mod config;
pub mod error;
pub mod load;
pub mod series;
pub mod solar;

pub use config::{ProfileConfig, SlotPercentages, default_slots};
pub use error::{ProfileError, ProfileResult};
pub use load::{generate_load_kw, load_energy_kwh};
pub use series::{Sample, TimeSeries};
pub use solar::{SolarCurve, SolarPctIter};
