//! Solar production curve as percent of peak output.

use std::f64::consts::PI;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sq_core::constants::{DT_HOURS, STEP_MINUTES, STEPS_PER_DAY};
use sq_core::ensure_finite;

use crate::error::{ProfileError, ProfileResult};

/// Description of one day's solar curve.
///
/// The curve is not materialised; [`SolarCurve::iter`] yields it lazily and
/// every call replays the same samples because the generator is re-seeded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolarCurve {
    jitter_pct: f64,
    sunrise_minute: u32,
    sunset_minute: u32,
    seed: u64,
}

impl SolarCurve {
    pub fn new(jitter_pct: f64, seed: u64) -> ProfileResult<Self> {
        Self::with_daylight(jitter_pct, 6 * 60, 18 * 60, seed)
    }

    pub fn with_daylight(
        jitter_pct: f64,
        sunrise_minute: u32,
        sunset_minute: u32,
        seed: u64,
    ) -> ProfileResult<Self> {
        let jitter_pct = ensure_finite(jitter_pct, "solar_jitter_pct")?;
        if !(0.0..=100.0).contains(&jitter_pct) {
            return Err(ProfileError::InvalidArg {
                what: "solar jitter must be within 0..=100 percent",
            });
        }
        if sunrise_minute >= sunset_minute || sunset_minute > 24 * 60 {
            return Err(ProfileError::InvalidArg {
                what: "sunrise must precede sunset within the day",
            });
        }
        Ok(Self {
            jitter_pct,
            sunrise_minute,
            sunset_minute,
            seed,
        })
    }

    /// Noise-free percentage of peak at `minute` of the day.
    pub fn bell_pct(&self, minute: u32) -> f64 {
        if minute <= self.sunrise_minute || minute >= self.sunset_minute {
            return 0.0;
        }
        let daylight = f64::from(self.sunset_minute - self.sunrise_minute);
        let phase = f64::from(minute - self.sunrise_minute) / daylight;
        100.0 * (PI * phase).sin()
    }

    /// Noise-free energy of one day per kW of peak, in equivalent full-sun hours.
    pub fn peak_hours(&self) -> f64 {
        (0..STEPS_PER_DAY as u32)
            .map(|step| self.bell_pct(step * STEP_MINUTES) / 100.0 * DT_HOURS)
            .sum()
    }

    pub fn iter(&self) -> SolarPctIter {
        SolarPctIter {
            curve: *self,
            rng: StdRng::seed_from_u64(self.seed),
            step: 0,
        }
    }
}

impl IntoIterator for &SolarCurve {
    type Item = f64;
    type IntoIter = SolarPctIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// One pass over the 288 samples of a [`SolarCurve`].
#[derive(Debug, Clone)]
pub struct SolarPctIter {
    curve: SolarCurve,
    rng: StdRng,
    step: usize,
}

impl Iterator for SolarPctIter {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        if self.step >= STEPS_PER_DAY {
            return None;
        }
        let minute = self.step as u32 * STEP_MINUTES;
        self.step += 1;

        let base = self.curve.bell_pct(minute);
        // Night stays dark; jitter only perturbs daylight samples.
        if base <= 0.0 {
            return Some(0.0);
        }
        let j = self.curve.jitter_pct;
        let noise = if j > 0.0 { self.rng.gen_range(-j..=j) } else { 0.0 };
        Some((base + noise).clamp(0.0, 100.0))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = STEPS_PER_DAY - self.step;
        (left, Some(left))
    }
}

impl ExactSizeIterator for SolarPctIter {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bell_peaks_at_noon_and_is_dark_at_night() {
        let curve = SolarCurve::new(0.0, 1).unwrap();
        assert_eq!(curve.bell_pct(0), 0.0);
        assert_eq!(curve.bell_pct(6 * 60), 0.0);
        assert_eq!(curve.bell_pct(18 * 60), 0.0);
        assert!((curve.bell_pct(12 * 60) - 100.0).abs() < 1e-9);
        assert!((curve.bell_pct(9 * 60) - curve.bell_pct(15 * 60)).abs() < 1e-9);
    }

    #[test]
    fn yields_exactly_one_day() {
        let curve = SolarCurve::new(5.0, 3).unwrap();
        let it = curve.iter();
        assert_eq!(it.len(), STEPS_PER_DAY);
        assert_eq!(it.count(), STEPS_PER_DAY);
    }

    #[test]
    fn restart_replays_same_samples() {
        let curve = SolarCurve::new(8.0, 42).unwrap();
        let first: Vec<f64> = curve.iter().collect();
        let second: Vec<f64> = (&curve).into_iter().collect();
        assert_eq!(first, second);

        let other: Vec<f64> = SolarCurve::new(8.0, 43).unwrap().iter().collect();
        assert_ne!(first, other);
    }

    #[test]
    fn jitter_stays_in_bounds() {
        let curve = SolarCurve::new(10.0, 9).unwrap();
        for (i, pct) in curve.iter().enumerate() {
            let base = curve.bell_pct(i as u32 * STEP_MINUTES);
            assert!((0.0..=100.0).contains(&pct));
            assert!((pct - base).abs() <= 10.0 + 1e-9);
            if base == 0.0 {
                assert_eq!(pct, 0.0);
            }
        }
    }

    #[test]
    fn peak_hours_integrate_the_bell() {
        // A sine bell over 12 h holds 24/pi hours at peak.
        let curve = SolarCurve::new(0.0, 0).unwrap();
        assert!((curve.peak_hours() - 24.0 / PI).abs() < 1e-3);

        let short = SolarCurve::with_daylight(0.0, 9 * 60, 15 * 60, 0).unwrap();
        assert!((short.peak_hours() - 12.0 / PI).abs() < 1e-3);
    }

    #[test]
    fn rejects_bad_config() {
        assert!(SolarCurve::new(-1.0, 0).is_err());
        assert!(SolarCurve::new(f64::NAN, 0).is_err());
        assert!(SolarCurve::with_daylight(0.0, 600, 500, 0).is_err());
    }
}
