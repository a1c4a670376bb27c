//! Dispatch outputs.

use serde::{Deserialize, Serialize};

/// Per-sample dispatch trace, parallel to the input series.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationResult {
    pub battery_active: bool,
    pub dt_hours: f64,
    /// Stored energy as percent of total capacity (0 when inactive).
    pub soc_percent: Vec<f64>,
    /// Positive = discharging.
    pub battery_flow_kw: Vec<f64>,
    /// Positive = exporting.
    pub grid_flow_kw: Vec<f64>,
    pub summary: EnergySummary,
}

impl SimulationResult {
    pub fn len(&self) -> usize {
        self.soc_percent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.soc_percent.is_empty()
    }
}

/// Daily energy totals (kWh).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnergySummary {
    pub solar_kwh: f64,
    pub load_kwh: f64,
    pub import_kwh: f64,
    pub export_kwh: f64,
    pub charge_kwh: f64,
    pub discharge_kwh: f64,
    /// Share of solar production not exported.
    pub self_consumption_ratio: f64,
}

impl EnergySummary {
    pub(crate) fn finish(mut self) -> Self {
        self.self_consumption_ratio = if self.solar_kwh > 0.0 {
            ((self.solar_kwh - self.export_kwh) / self.solar_kwh).clamp(0.0, 1.0)
        } else {
            0.0
        };
        self
    }
}
