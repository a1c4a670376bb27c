//! Load curve expanded from two-hour block shares.

use rand::Rng;
use sq_core::constants::{DT_HOURS, STEPS_PER_DAY};
use sq_core::{ensure_finite, step_energy_kwh};

use crate::config::SlotPercentages;
use crate::error::{ProfileError, ProfileResult};

/// Five-minute slices per two-hour block.
const SLICES_PER_SLOT: usize = STEPS_PER_DAY / 12;
const SLOT_HOURS: f64 = 2.0;

/// Expand block shares into 288 load samples (kW) whose energy integral is
/// exactly `total_daily_load_kwh`.
///
/// Each slice gets independent multiplicative noise in
/// `[1 - jitter_frac, 1 + jitter_frac]`; the whole day is then rescaled by
/// target/raw energy so the noise never moves the daily total.
pub fn generate_load_kw<R: Rng>(
    slot_percentages: &SlotPercentages,
    total_daily_load_kwh: f64,
    jitter_frac: f64,
    rng: &mut R,
) -> ProfileResult<Vec<f64>> {
    let total = ensure_finite(total_daily_load_kwh, "total_daily_load_kwh")?;
    if total < 0.0 {
        return Err(ProfileError::InvalidArg {
            what: "daily load must be non-negative",
        });
    }
    let jitter = ensure_finite(jitter_frac, "load_jitter_frac")?;
    if !(0.0..1.0).contains(&jitter) {
        return Err(ProfileError::InvalidArg {
            what: "load jitter must be within 0..1",
        });
    }
    for &pct in slot_percentages {
        ensure_finite(pct, "slot_percentage")?;
        if pct < 0.0 {
            return Err(ProfileError::InvalidArg {
                what: "slot percentages must be non-negative",
            });
        }
    }
    let pct_sum: f64 = slot_percentages.iter().sum();
    if pct_sum <= 0.0 {
        return Err(ProfileError::InvalidArg {
            what: "slot percentages must not all be zero",
        });
    }

    let mut slices = Vec::with_capacity(STEPS_PER_DAY);
    for &pct in slot_percentages {
        let block_kw = total * pct / 100.0 / SLOT_HOURS;
        for _ in 0..SLICES_PER_SLOT {
            let factor = if jitter > 0.0 {
                1.0 + rng.gen_range(-jitter..=jitter)
            } else {
                1.0
            };
            slices.push(block_kw * factor);
        }
    }

    let raw_kwh = load_energy_kwh(&slices);
    if raw_kwh > 0.0 {
        let scale = total / raw_kwh;
        for kw in &mut slices {
            *kw *= scale;
        }
    }
    Ok(slices)
}

/// Energy integral of a 5-minute power series.
pub fn load_energy_kwh(slices_kw: &[f64]) -> f64 {
    slices_kw.iter().map(|&kw| step_energy_kwh(kw, DT_HOURS)).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const FLAT: SlotPercentages = [100.0 / 12.0; 12];

    #[test]
    fn flat_profile_without_jitter_is_constant() {
        let mut rng = StdRng::seed_from_u64(0);
        let kw = generate_load_kw(&FLAT, 24.0, 0.0, &mut rng).unwrap();
        assert_eq!(kw.len(), STEPS_PER_DAY);
        for v in &kw {
            assert!((v - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn jitter_does_not_move_daily_energy() {
        let mut rng = StdRng::seed_from_u64(11);
        let slots = [3.0, 3.0, 4.0, 8.0, 9.0, 9.0, 9.0, 9.0, 10.0, 14.0, 14.0, 8.0];
        let kw = generate_load_kw(&slots, 26.67, 0.10, &mut rng).unwrap();
        let energy = load_energy_kwh(&kw);
        assert!((energy - 26.67).abs() / 26.67 < 1e-9);
    }

    #[test]
    fn zero_target_gives_flat_zero() {
        let mut rng = StdRng::seed_from_u64(1);
        let kw = generate_load_kw(&FLAT, 0.0, 0.1, &mut rng).unwrap();
        assert!(kw.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn rejects_bad_slots() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut slots = FLAT;
        slots[3] = -1.0;
        assert!(generate_load_kw(&slots, 10.0, 0.1, &mut rng).is_err());
        assert!(generate_load_kw(&[0.0; 12], 10.0, 0.1, &mut rng).is_err());
        assert!(generate_load_kw(&FLAT, f64::NAN, 0.1, &mut rng).is_err());
        assert!(generate_load_kw(&FLAT, 10.0, 1.0, &mut rng).is_err());
    }
}
