//! The quote snapshot handed to the UI and persistence layer.

use serde::{Deserialize, Serialize};
use sq_catalog::{BatterySpec, Catalog, InverterSpec, PanelSpec};
use sq_core::constants::DAYS_PER_YEAR;
use sq_core::{SystemInputs, round2};
use sq_forecast::{Forecast, ForecastParams, ForecastYear, payback_year};
use sq_sizing::constants::{NET_METERING_TARIFF, PEAK_SUN_HOURS};
use sq_sizing::{DesignFigures, Pricing, SizingResult, panel_count, size_system};
use tracing::info;

use crate::config::QuoteRequest;
use crate::error::AppResult;
use crate::quote_id::compute_quote_id;

/// Tonnes of CO2e avoided per kWh of solar generation.
pub const CO2E_TONNES_PER_KWH: f64 = 0.000_760_3;

/// Tonnes of CO2e absorbed by one tree seedling grown for ten years.
pub const CO2E_TONNES_PER_SEEDLING: f64 = 0.060;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculateDesign {
    #[serde(flatten)]
    pub figures: DesignFigures,
    #[serde(rename = "suggestedSizeKW")]
    pub suggested_size_kw: f64,
    pub panel_count: u32,
    pub total_panel_area_m2: f64,
    pub inverter: Option<InverterSpec>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemEstimates {
    #[serde(rename = "dailyGenerationKWh")]
    pub daily_generation_kwh: f64,
    #[serde(rename = "annualGenerationKWh")]
    pub annual_generation_kwh: f64,
    pub monthly_savings: f64,
    pub estimated_new_monthly_bill: f64,
    pub payback_year: Option<u32>,
    pub lifetime_savings: f64,
    pub forecast: Vec<ForecastYear>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolarPanels {
    pub panel: PanelSpec,
    pub count: u32,
    pub total_area_m2: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatterySelection {
    pub spec: BatterySpec,
    pub count: u32,
    #[serde(rename = "totalCapacityKWh")]
    pub total_capacity_kwh: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Environment {
    pub annual_co2e_tonnes: f64,
    pub lifetime_co2e_tonnes: f64,
    pub tree_seedlings_equivalent: f64,
}

/// Write-once snapshot of a quote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentData {
    pub quote_id: String,
    pub inputs: SystemInputs,
    pub calculate_design: CalculateDesign,
    pub price_design: Pricing,
    pub system_estimates: SystemEstimates,
    pub solar_panels: SolarPanels,
    pub battery: BatterySelection,
    pub environment: Environment,
}

/// Size, price and forecast `request` against `catalog`.
///
/// Pure composition: no clocks, no randomness, nothing retained.
pub fn assemble_document(request: &QuoteRequest, catalog: &Catalog) -> AppResult<DocumentData> {
    let inputs = &request.inputs;
    let panel = catalog.panel(request.panel.as_deref());
    let battery = catalog.battery(request.battery.as_deref());

    let sizing = size_system(inputs, panel.rated_power_kw())?;
    let size_kw = sizing.suggested_size_kw;

    let panel_count = panel_count(size_kw, panel.rated_power_kw());
    let total_area_m2 = f64::from(panel_count) * panel.area_m2;
    let inverter = catalog.inverter_for(inputs.line_type, size_kw).cloned();

    let daily_generation_kwh = size_kw * PEAK_SUN_HOURS * panel.performance_ratio;
    let annual_generation_kwh = daily_generation_kwh * DAYS_PER_YEAR;

    let forecast = project(request, &sizing, annual_generation_kwh)?;
    let environment = environment(&forecast);
    let estimates = estimates(inputs, daily_generation_kwh, annual_generation_kwh, forecast);

    let quote_id = compute_quote_id(request, &panel.brand, &battery.brand);
    info!(
        quote_id = %quote_id,
        size_kw,
        total = sizing.pricing.total,
        payback_year = ?estimates.payback_year,
        "quote assembled"
    );

    Ok(DocumentData {
        quote_id,
        inputs: inputs.clone(),
        calculate_design: CalculateDesign {
            figures: sizing.figures,
            suggested_size_kw: size_kw,
            panel_count,
            total_panel_area_m2: total_area_m2,
            inverter,
        },
        price_design: sizing.pricing,
        system_estimates: estimates,
        solar_panels: SolarPanels {
            panel: panel.clone(),
            count: panel_count,
            total_area_m2,
        },
        battery: BatterySelection {
            spec: battery.clone(),
            count: request.battery_count,
            total_capacity_kwh: battery.capacity_kwh * f64::from(request.battery_count),
        },
        environment,
    })
}

fn project(
    request: &QuoteRequest,
    sizing: &SizingResult,
    annual_generation_kwh: f64,
) -> AppResult<Vec<ForecastYear>> {
    let inputs = &request.inputs;
    // Without net metering exported energy earns nothing.
    let net_metering_rate = if inputs.net_metering.enabled() {
        NET_METERING_TARIFF
    } else {
        0.0
    };
    let params = ForecastParams {
        generation_kwh: annual_generation_kwh,
        tariff: sizing.figures.utility_price_per_kwh,
        net_metering_rate,
        export_pct: inputs.time_of_use.export_pct(),
        total_system_cost: sizing.pricing.total,
    };
    Ok(Forecast::new(params, request.forecast)?.collect())
}

fn estimates(
    inputs: &SystemInputs,
    daily_generation_kwh: f64,
    annual_generation_kwh: f64,
    forecast: Vec<ForecastYear>,
) -> SystemEstimates {
    let first_year_savings = forecast.first().map_or(0.0, |y| y.annual_savings);
    let monthly_savings = first_year_savings / 12.0;
    let lifetime_savings: f64 = forecast.iter().map(|y| y.annual_savings).sum();

    SystemEstimates {
        daily_generation_kwh,
        annual_generation_kwh,
        monthly_savings: round2(monthly_savings),
        estimated_new_monthly_bill: round2((inputs.monthly_bill - monthly_savings).max(0.0)),
        payback_year: payback_year(&forecast),
        lifetime_savings: round2(lifetime_savings),
        forecast: forecast.into_iter().map(round_year).collect(),
    }
}

fn round_year(y: ForecastYear) -> ForecastYear {
    ForecastYear {
        year: y.year,
        solar_generation_kwh: round2(y.solar_generation_kwh),
        electricity_rate: round2(y.electricity_rate),
        net_metering_rate: round2(y.net_metering_rate),
        annual_savings: round2(y.annual_savings),
        cumulative_roi: round2(y.cumulative_roi),
    }
}

fn environment(forecast: &[ForecastYear]) -> Environment {
    let annual_kwh = forecast.first().map_or(0.0, |y| y.solar_generation_kwh);
    let lifetime_kwh: f64 = forecast.iter().map(|y| y.solar_generation_kwh).sum();
    let lifetime_co2e = lifetime_kwh * CO2E_TONNES_PER_KWH;

    Environment {
        annual_co2e_tonnes: annual_kwh * CO2E_TONNES_PER_KWH,
        lifetime_co2e_tonnes: lifetime_co2e,
        tree_seedlings_equivalent: lifetime_co2e / CO2E_TONNES_PER_SEEDLING,
    }
}
