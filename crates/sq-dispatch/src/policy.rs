//! Per-step dispatch decisions.

use crate::battery::BatteryBank;

/// Outcome of routing power for one step.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StepOutcome {
    /// Stored energy after the step (kWh).
    pub soc_kwh: f64,
    /// Power into the battery (kW, before losses).
    pub charge_kw: f64,
    /// Power out of the battery to the load (kW, after losses).
    pub discharge_kw: f64,
    pub export_kw: f64,
    pub import_kw: f64,
}

/// Decides how to route one step's solar surplus or deficit.
pub trait DispatchPolicy {
    /// `solar_kw` and `load_kw` are non-negative; `soc_kwh` is within the bank's window.
    fn step(
        &self,
        bank: &BatteryBank,
        soc_kwh: f64,
        solar_kw: f64,
        load_kw: f64,
        dt_hours: f64,
    ) -> StepOutcome;
}

/// Myopic self-consumption rule: charge from any surplus, discharge into any
/// deficit, each limited by power rating and the SOC window. No lookahead.
#[derive(Debug, Clone, Copy, Default)]
pub struct GreedyDispatch;

impl DispatchPolicy for GreedyDispatch {
    fn step(
        &self,
        bank: &BatteryBank,
        soc_kwh: f64,
        solar_kw: f64,
        load_kw: f64,
        dt_hours: f64,
    ) -> StepOutcome {
        let net = solar_kw - load_kw;

        if !bank.ready {
            return StepOutcome {
                soc_kwh,
                export_kw: net.max(0.0),
                import_kw: (-net).max(0.0),
                ..StepOutcome::default()
            };
        }

        if net > 0.0 {
            let charge = net.min(bank.max_charge_kw);
            let charged_kwh = charge * dt_hours * bank.charge_efficiency;
            StepOutcome {
                soc_kwh: (soc_kwh + charged_kwh).min(bank.max_kwh),
                charge_kw: charge,
                export_kw: net - charge,
                ..StepOutcome::default()
            }
        } else {
            let deficit = -net;
            let dischargeable =
                ((soc_kwh - bank.min_kwh) / dt_hours * bank.discharge_efficiency).max(0.0);
            let discharge = deficit.min(bank.max_discharge_kw).min(dischargeable);
            let discharged_kwh = discharge * dt_hours / bank.discharge_efficiency;
            StepOutcome {
                soc_kwh: (soc_kwh - discharged_kwh).max(bank.min_kwh),
                discharge_kw: discharge,
                import_kw: deficit - discharge,
                ..StepOutcome::default()
            }
        }
    }
}
