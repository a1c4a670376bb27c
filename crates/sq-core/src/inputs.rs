//! Customer inputs collected by the quote wizard.
//!
//! Every categorical input is a closed enum that carries its own constants,
//! so the sizing and forecast tables live next to the variant they belong to.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::numeric::ensure_finite;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuildingType {
    Residential,
    Commercial,
}

impl BuildingType {
    /// Utility energy price for this customer class (currency per kWh).
    pub fn utility_price_per_kwh(self) -> f64 {
        match self {
            BuildingType::Residential => 12.5,
            BuildingType::Commercial => 10.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeOfUse {
    #[serde(alias = "nightTime")]
    NightTime,
    #[serde(alias = "dayTime")]
    DayTime,
    #[serde(alias = "twentyFourSeven", alias = "24/7")]
    TwentyFourSeven,
}

impl TimeOfUse {
    /// Share of daily consumption the array should cover for the fastest payback.
    pub fn optimal_roi_size_factor(self) -> f64 {
        match self {
            TimeOfUse::NightTime => 0.05,
            TimeOfUse::DayTime => 0.16,
            TimeOfUse::TwentyFourSeven => 0.10,
        }
    }

    /// Fraction of generation exported to the grid rather than self-consumed.
    pub fn export_pct(self) -> f64 {
        match self {
            TimeOfUse::NightTime => 0.95,
            TimeOfUse::DayTime => 0.84,
            TimeOfUse::TwentyFourSeven => 0.90,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NetMetering {
    Yes,
    No,
}

impl NetMetering {
    pub fn enabled(self) -> bool {
        matches!(self, NetMetering::Yes)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoofType {
    Metal,
    Shingles,
    Tiles,
    Concrete,
    Other,
}

impl RoofType {
    /// Per-kW labour surcharge on top of the base installation rate.
    pub fn labour_surcharge(self) -> f64 {
        match self {
            RoofType::Shingles | RoofType::Tiles => 1203.0,
            RoofType::Concrete => 2448.0,
            RoofType::Metal | RoofType::Other => 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineType {
    #[serde(alias = "singlePhase")]
    SinglePhase,
    #[serde(alias = "threePhase")]
    ThreePhase,
}

impl LineType {
    /// (numerator, floor) of the inverter rate curve `max(floor, numerator / (size + 5))`.
    pub fn inverter_rate_curve(self) -> (f64, f64) {
        match self {
            LineType::ThreePhase => (95_250.0, 4.0),
            LineType::SinglePhase => (61_000.0, 5.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LineVoltage {
    #[serde(rename = "220")]
    V220,
    #[serde(rename = "400")]
    V400,
}

impl LineVoltage {
    pub fn inverter_rate_surcharge(self) -> f64 {
        match self {
            LineVoltage::V220 => 2.0,
            LineVoltage::V400 => 0.0,
        }
    }
}

/// Inputs for one quote calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemInputs {
    pub building_type: BuildingType,
    /// Current monthly electricity bill (currency).
    pub monthly_bill: f64,
    pub time_of_use: TimeOfUse,
    pub net_metering: NetMetering,
    pub roof_type: RoofType,
    pub line_type: LineType,
    pub line_voltage: LineVoltage,
    /// Bill the customer wants to end up with; overrides the ROI sizing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_requested_monthly_bill: Option<f64>,
}

impl SystemInputs {
    /// Reject values the engine cannot compute with.
    pub fn validate(&self) -> CoreResult<()> {
        ensure_finite(self.monthly_bill, "monthly_bill")?;
        if self.monthly_bill <= 0.0 {
            return Err(CoreError::InvalidArg {
                what: "monthly_bill must be positive",
            });
        }
        if let Some(requested) = self.new_requested_monthly_bill {
            ensure_finite(requested, "new_requested_monthly_bill")?;
        }
        Ok(())
    }
}
