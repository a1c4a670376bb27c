//! Synthetic-day dispatch for a quoted system.

use serde::{Deserialize, Serialize};
use sq_catalog::BatterySpec;
use sq_dispatch::{BatteryParams, SimulationResult, simulate};
use sq_profile::{SolarCurve, TimeSeries, default_slots};
use tracing::debug;

use crate::config::ProfileSettings;
use crate::document::DocumentData;
use crate::error::AppResult;

/// Inputs and outputs of one simulated day, ready for charting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DaySimulation {
    pub series: TimeSeries,
    pub result: SimulationResult,
}

pub fn battery_params(spec: &BatterySpec, count: u32) -> BatteryParams {
    BatteryParams {
        capacity_kwh: spec.capacity_kwh,
        max_charge_kw: spec.max_charge_kw,
        max_discharge_kw: spec.max_discharge_kw,
        charge_efficiency: spec.charge_efficiency,
        discharge_efficiency: spec.discharge_efficiency,
        min_soc: spec.min_soc,
        max_soc: spec.max_soc,
        initial_soc: spec.initial_soc,
        count,
    }
}

/// Simulate a day for the system in `doc`: the array produces the quoted daily
/// generation and the household draws its average daily usage.
pub fn simulate_day(doc: &DocumentData, settings: &ProfileSettings) -> AppResult<DaySimulation> {
    let config = &settings.config;
    let shape = SolarCurve::with_daylight(0.0, config.sunrise_minute, config.sunset_minute, 0)?;
    let peak_hours = shape.peak_hours();
    let daily_generation_kwh = doc.system_estimates.daily_generation_kwh;
    let peak_kw = if peak_hours > 0.0 {
        daily_generation_kwh / peak_hours
    } else {
        0.0
    };
    let daily_load_kwh = doc.calculate_design.figures.utility_daily_usage_kwh;
    let slots = settings
        .slot_percentages
        .unwrap_or_else(|| default_slots(doc.inputs.time_of_use));

    let series = TimeSeries::synthesize(config, peak_kw, daily_load_kwh, &slots)?;
    let params = battery_params(&doc.battery.spec, doc.battery.count);
    let result = simulate(&series, Some(&params))?;

    debug!(
        quote_id = %doc.quote_id,
        peak_kw,
        daily_load_kwh,
        self_consumption = result.summary.self_consumption_ratio,
        "day simulated"
    );

    Ok(DaySimulation { series, result })
}
