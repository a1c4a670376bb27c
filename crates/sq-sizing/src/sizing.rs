//! Suggested system size.

use serde::{Deserialize, Serialize};
use sq_core::constants::DAYS_PER_MONTH;
use sq_core::{SystemInputs, Tolerances, ensure_finite, nearly_equal};
use tracing::{debug, warn};

use crate::constants::{NET_METERING_TARIFF, PEAK_SUN_HOURS, SIZING_DERATE};
use crate::error::SizingError;
use crate::pricing::{Pricing, price_system};

/// Intermediate quantities behind the size recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignFigures {
    #[serde(rename = "utilityPricePerKWh")]
    pub utility_price_per_kwh: f64,
    #[serde(rename = "utilityMonthlyKWh")]
    pub utility_monthly_kwh: f64,
    /// kWh per day.
    #[serde(rename = "utilityDailyUsage")]
    pub utility_daily_usage_kwh: f64,
    #[serde(rename = "optimalROISizeFactor")]
    pub optimal_roi_size_factor: f64,
    #[serde(rename = "fastestROISolarSize")]
    pub fastest_roi_solar_size_kw: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SizingResult {
    #[serde(rename = "suggestedSizeKW")]
    pub suggested_size_kw: f64,
    pub pricing: Pricing,
    pub figures: DesignFigures,
}

pub fn design_figures(inputs: &SystemInputs) -> DesignFigures {
    let utility_price_per_kwh = inputs.building_type.utility_price_per_kwh();
    let utility_monthly_kwh = inputs.monthly_bill / utility_price_per_kwh;
    let utility_daily_usage_kwh = utility_monthly_kwh / DAYS_PER_MONTH;
    let optimal_roi_size_factor = inputs.time_of_use.optimal_roi_size_factor();
    let fastest_roi_solar_size_kw =
        utility_daily_usage_kwh * optimal_roi_size_factor / SIZING_DERATE;

    DesignFigures {
        utility_price_per_kwh,
        utility_monthly_kwh,
        utility_daily_usage_kwh,
        optimal_roi_size_factor,
        fastest_roi_solar_size_kw,
    }
}

/// Whole panels needed to reach `size_kw`; ratios within float noise of an
/// integer are not rounded up.
pub fn panel_count(size_kw: f64, panel_kw: f64) -> u32 {
    let ratio = size_kw / panel_kw;
    let nearest = ratio.round();
    let count = if nearly_equal(ratio, nearest, Tolerances::default()) {
        nearest
    } else {
        ratio.ceil()
    };
    count.max(0.0) as u32
}

/// Size and price a system for `inputs` using panels rated `panel_kw`.
pub fn size_system(inputs: &SystemInputs, panel_kw: f64) -> Result<SizingResult, SizingError> {
    inputs.validate()?;
    let panel_kw = ensure_finite(panel_kw, "panel_kw")?;
    if panel_kw <= 0.0 {
        return Err(SizingError::PanelRating { value: panel_kw });
    }

    let figures = design_figures(inputs);

    let raw_size = match inputs.new_requested_monthly_bill {
        Some(requested) => {
            (inputs.monthly_bill - requested)
                / DAYS_PER_MONTH
                / NET_METERING_TARIFF
                / PEAK_SUN_HOURS
        }
        None if inputs.net_metering.enabled() => {
            f64::from(panel_count(figures.fastest_roi_solar_size_kw, panel_kw)) * panel_kw
        }
        None => figures.fastest_roi_solar_size_kw,
    };
    let suggested_size_kw = ensure_finite(raw_size, "suggested_size_kw")?;
    let suggested_size_kw = if suggested_size_kw < 0.0 {
        warn!(
            size_kw = suggested_size_kw,
            "requested bill exceeds current bill, clamping size to zero"
        );
        0.0
    } else {
        suggested_size_kw
    };

    let pricing = price_system(suggested_size_kw, inputs);
    debug!(
        size_kw = suggested_size_kw,
        total = pricing.total,
        "system sized"
    );

    Ok(SizingResult {
        suggested_size_kw,
        pricing,
        figures,
    })
}
