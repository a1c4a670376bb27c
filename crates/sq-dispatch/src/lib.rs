//! Battery and grid dispatch over a synthetic day.
//!
//! Provides:
//! - Battery parameters scaled by unit count
//! - `DispatchPolicy` trait with the greedy, single-step `GreedyDispatch`
//! - Time-stepped runner producing SOC, battery flow and grid flow per sample

pub mod battery;
pub mod error;
pub mod policy;
pub mod result;
pub mod sim;

pub use battery::{BatteryBank, BatteryParams};
pub use error::{DispatchError, DispatchResult};
pub use policy::{DispatchPolicy, GreedyDispatch, StepOutcome};
pub use result::{EnergySummary, SimulationResult};
pub use sim::{simulate, simulate_with};
