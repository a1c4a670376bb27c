//! Profile tunables.

use serde::{Deserialize, Serialize};
use sq_core::TimeOfUse;

/// Share of daily load (percent) in each of the twelve two-hour blocks,
/// starting at midnight.
pub type SlotPercentages = [f64; 12];

const NIGHT_HEAVY: SlotPercentages = [
    12.0, 12.0, 10.0, 6.0, 4.0, 4.0, 4.0, 4.0, 6.0, 12.0, 14.0, 12.0,
];
const DAY_HEAVY: SlotPercentages = [
    2.0, 2.0, 3.0, 8.0, 12.0, 14.0, 14.0, 14.0, 12.0, 8.0, 6.0, 5.0,
];
const AROUND_THE_CLOCK: SlotPercentages = [
    8.5, 8.5, 8.5, 8.5, 8.0, 8.0, 8.0, 8.0, 8.5, 8.5, 8.5, 8.5,
];

/// Configuration for synthesising one day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileConfig {
    /// Uniform noise half-width applied to the solar curve (percent of peak).
    pub solar_jitter_pct: f64,
    /// Multiplicative noise half-width applied to each load slice (fraction).
    pub load_jitter_frac: f64,
    /// Minute of day at which the solar bell starts and ends.
    pub sunrise_minute: u32,
    pub sunset_minute: u32,
    /// Seed for the jitter; `None` draws one from the OS.
    pub seed: Option<u64>,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            solar_jitter_pct: 5.0,
            load_jitter_frac: 0.10,
            sunrise_minute: 6 * 60,
            sunset_minute: 18 * 60,
            seed: None,
        }
    }
}

impl ProfileConfig {
    /// Same settings with the jitter switched off.
    pub fn without_jitter(mut self) -> Self {
        self.solar_jitter_pct = 0.0;
        self.load_jitter_frac = 0.0;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Seed to use for this run.
    pub fn resolve_seed(&self) -> u64 {
        self.seed.unwrap_or_else(rand::random)
    }
}

/// Typical block shares for a usage pattern.
pub fn default_slots(time_of_use: TimeOfUse) -> SlotPercentages {
    match time_of_use {
        TimeOfUse::NightTime => NIGHT_HEAVY,
        TimeOfUse::DayTime => DAY_HEAVY,
        TimeOfUse::TwentyFourSeven => AROUND_THE_CLOCK,
    }
}
