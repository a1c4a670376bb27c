//! Battery parameters and the sanitised bank used during dispatch.

use serde::{Deserialize, Serialize};
use sq_core::{ensure_finite, finite_non_negative};

use crate::error::{DispatchError, DispatchResult};

/// Per-unit battery parameters plus the number of installed units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatteryParams {
    pub capacity_kwh: f64,
    pub max_charge_kw: f64,
    pub max_discharge_kw: f64,
    pub charge_efficiency: f64,
    pub discharge_efficiency: f64,
    /// Fractions of capacity.
    pub min_soc: f64,
    pub max_soc: f64,
    pub initial_soc: f64,
    pub count: u32,
}

/// Battery bank after clamping and scaling by unit count.
///
/// `ready` is false when the bank cannot hold or deliver energy (no units,
/// zero capacity, zero efficiency); dispatch then bypasses it entirely.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BatteryBank {
    pub ready: bool,
    pub capacity_kwh: f64,
    pub max_charge_kw: f64,
    pub max_discharge_kw: f64,
    pub charge_efficiency: f64,
    pub discharge_efficiency: f64,
    pub min_kwh: f64,
    pub max_kwh: f64,
    pub initial_kwh: f64,
}

impl BatteryBank {
    pub fn absent() -> Self {
        Self {
            ready: false,
            capacity_kwh: 0.0,
            max_charge_kw: 0.0,
            max_discharge_kw: 0.0,
            charge_efficiency: 0.0,
            discharge_efficiency: 0.0,
            min_kwh: 0.0,
            max_kwh: 0.0,
            initial_kwh: 0.0,
        }
    }
}

impl BatteryParams {
    /// Clamp every input to its physical range and scale by `count`.
    pub fn bank(&self) -> DispatchResult<BatteryBank> {
        let count = f64::from(self.count);
        let capacity = finite_non_negative(self.capacity_kwh, "capacity_kwh")? * count;
        let max_charge = finite_non_negative(self.max_charge_kw, "max_charge_kw")? * count;
        let max_discharge =
            finite_non_negative(self.max_discharge_kw, "max_discharge_kw")? * count;
        let charge_eff = fraction(self.charge_efficiency, "charge_efficiency")?;
        let discharge_eff = fraction(self.discharge_efficiency, "discharge_efficiency")?;
        let min_soc = fraction(self.min_soc, "min_soc")?;
        let max_soc = fraction(self.max_soc, "max_soc")?;
        if min_soc > max_soc {
            return Err(DispatchError::InvalidArg {
                what: "min_soc must not exceed max_soc",
            });
        }
        let initial_soc = fraction(self.initial_soc, "initial_soc")?.clamp(min_soc, max_soc);

        if capacity <= 0.0 || charge_eff <= 0.0 || discharge_eff <= 0.0 {
            return Ok(BatteryBank::absent());
        }

        Ok(BatteryBank {
            ready: true,
            capacity_kwh: capacity,
            max_charge_kw: max_charge,
            max_discharge_kw: max_discharge,
            charge_efficiency: charge_eff,
            discharge_efficiency: discharge_eff,
            min_kwh: min_soc * capacity,
            max_kwh: max_soc * capacity,
            initial_kwh: initial_soc * capacity,
        })
    }
}

fn fraction(v: f64, what: &'static str) -> DispatchResult<f64> {
    Ok(ensure_finite(v, what)?.clamp(0.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> BatteryParams {
        BatteryParams {
            capacity_kwh: 10.0,
            max_charge_kw: 5.0,
            max_discharge_kw: 4.0,
            charge_efficiency: 0.95,
            discharge_efficiency: 0.95,
            min_soc: 0.1,
            max_soc: 0.9,
            initial_soc: 0.5,
            count: 1,
        }
    }

    #[test]
    fn bank_scales_with_count() {
        let mut p = params();
        p.count = 3;
        let bank = p.bank().unwrap();
        assert!(bank.ready);
        assert_eq!(bank.capacity_kwh, 30.0);
        assert_eq!(bank.max_charge_kw, 15.0);
        assert_eq!(bank.max_discharge_kw, 12.0);
        assert!((bank.min_kwh - 3.0).abs() < 1e-12);
        assert!((bank.max_kwh - 27.0).abs() < 1e-12);
        assert!((bank.initial_kwh - 15.0).abs() < 1e-12);
    }

    #[test]
    fn zero_capacity_or_units_is_absent() {
        let mut p = params();
        p.count = 0;
        assert!(!p.bank().unwrap().ready);

        let mut p = params();
        p.capacity_kwh = -5.0;
        assert!(!p.bank().unwrap().ready);

        let mut p = params();
        p.discharge_efficiency = 0.0;
        assert!(!p.bank().unwrap().ready);
    }

    #[test]
    fn initial_soc_is_clamped_into_window() {
        let mut p = params();
        p.initial_soc = 0.99;
        let bank = p.bank().unwrap();
        assert!((bank.initial_kwh - 9.0).abs() < 1e-12);
    }

    #[test]
    fn rejects_nan_and_inverted_window() {
        let mut p = params();
        p.max_charge_kw = f64::NAN;
        assert!(matches!(p.bank(), Err(DispatchError::NonFinite { .. })));

        let mut p = params();
        p.min_soc = 0.8;
        p.max_soc = 0.2;
        assert!(matches!(p.bank(), Err(DispatchError::InvalidArg { .. })));
    }
}
