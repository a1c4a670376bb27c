//! Paired solar/load series for one day.

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use serde::{Deserialize, Serialize};
use sq_core::constants::{DT_HOURS, STEP_MINUTES};
use sq_core::finite_non_negative;

use crate::config::{ProfileConfig, SlotPercentages};
use crate::error::ProfileResult;
use crate::load::generate_load_kw;
use crate::solar::SolarCurve;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Minute of day at the start of the step.
    pub minute: u32,
    pub solar_kw: f64,
    pub load_kw: f64,
}

/// Immutable day of samples at a fixed step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeries {
    samples: Vec<Sample>,
    dt_hours: f64,
}

impl TimeSeries {
    /// Wrap pre-computed samples taken every `dt_hours`.
    pub fn from_samples(samples: Vec<Sample>, dt_hours: f64) -> Self {
        Self { samples, dt_hours }
    }

    /// Build a series from parallel solar/load vectors at the 5-minute step.
    pub fn from_curves(solar_kw: &[f64], load_kw: &[f64]) -> Self {
        let samples = solar_kw
            .iter()
            .zip(load_kw)
            .enumerate()
            .map(|(i, (&solar_kw, &load_kw))| Sample {
                minute: i as u32 * STEP_MINUTES,
                solar_kw,
                load_kw,
            })
            .collect();
        Self::from_samples(samples, DT_HOURS)
    }

    /// Synthesise one day for an array of `peak_solar_kw` and a household
    /// consuming `daily_load_kwh`.
    pub fn synthesize(
        config: &ProfileConfig,
        peak_solar_kw: f64,
        daily_load_kwh: f64,
        slots: &SlotPercentages,
    ) -> ProfileResult<Self> {
        let peak = finite_non_negative(peak_solar_kw, "peak_solar_kw")?;
        let mut rng = StdRng::seed_from_u64(config.resolve_seed());

        let curve = SolarCurve::with_daylight(
            config.solar_jitter_pct,
            config.sunrise_minute,
            config.sunset_minute,
            rng.next_u64(),
        )?;
        let solar: Vec<f64> = curve.iter().map(|pct| pct / 100.0 * peak).collect();
        let load = generate_load_kw(slots, daily_load_kwh, config.load_jitter_frac, &mut rng)?;

        Ok(Self::from_curves(&solar, &load))
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn dt_hours(&self) -> f64 {
        self.dt_hours
    }

    pub fn solar_energy_kwh(&self) -> f64 {
        self.samples.iter().map(|s| s.solar_kw).sum::<f64>() * self.dt_hours
    }

    pub fn load_energy_kwh(&self) -> f64 {
        self.samples.iter().map(|s| s.load_kw).sum::<f64>() * self.dt_hours
    }
}
