//! Dispatch runner.

use sq_core::finite_non_negative;
use sq_profile::TimeSeries;
use tracing::debug;

use crate::battery::{BatteryBank, BatteryParams};
use crate::error::{DispatchError, DispatchResult};
use crate::policy::{DispatchPolicy, GreedyDispatch};
use crate::result::{EnergySummary, SimulationResult};

/// Run the greedy dispatch over `series`. `None` means no battery installed.
pub fn simulate(
    series: &TimeSeries,
    battery: Option<&BatteryParams>,
) -> DispatchResult<SimulationResult> {
    simulate_with(&GreedyDispatch, series, battery)
}

/// Run `policy` over `series`, one decision per sample.
pub fn simulate_with<P: DispatchPolicy>(
    policy: &P,
    series: &TimeSeries,
    battery: Option<&BatteryParams>,
) -> DispatchResult<SimulationResult> {
    let dt = series.dt_hours();
    if !dt.is_finite() || dt <= 0.0 {
        return Err(DispatchError::InvalidArg {
            what: "time step must be positive",
        });
    }

    let bank = match battery {
        Some(params) => params.bank()?,
        None => BatteryBank::absent(),
    };

    let n = series.len();
    let mut soc_percent = Vec::with_capacity(n);
    let mut battery_flow_kw = Vec::with_capacity(n);
    let mut grid_flow_kw = Vec::with_capacity(n);
    let mut summary = EnergySummary::default();

    let mut soc = bank.initial_kwh;
    for sample in series.samples() {
        let solar = finite_non_negative(sample.solar_kw, "solar_kw")?;
        let load = finite_non_negative(sample.load_kw, "load_kw")?;

        let out = policy.step(&bank, soc, solar, load, dt);
        soc = out.soc_kwh;

        soc_percent.push(if bank.ready {
            soc / bank.capacity_kwh * 100.0
        } else {
            0.0
        });
        battery_flow_kw.push(out.discharge_kw - out.charge_kw);
        grid_flow_kw.push(out.export_kw - out.import_kw);

        summary.solar_kwh += solar * dt;
        summary.load_kwh += load * dt;
        summary.import_kwh += out.import_kw * dt;
        summary.export_kwh += out.export_kw * dt;
        summary.charge_kwh += out.charge_kw * dt;
        summary.discharge_kwh += out.discharge_kw * dt;
    }
    let summary = summary.finish();

    debug!(
        steps = n,
        battery = bank.ready,
        import_kwh = summary.import_kwh,
        export_kwh = summary.export_kwh,
        "dispatch complete"
    );

    Ok(SimulationResult {
        battery_active: bank.ready,
        dt_hours: dt,
        soc_percent,
        battery_flow_kw,
        grid_flow_kw,
        summary,
    })
}
