//! Catalog entry definitions.

use serde::{Deserialize, Serialize};
use sq_core::LineType;

use crate::error::{CatalogError, CatalogResult};

/// Solar panel model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PanelSpec {
    pub brand: String,
    /// Nameplate power (W).
    pub rated_power_w: f64,
    /// Ratio of delivered to nameplate energy after system losses.
    pub performance_ratio: f64,
    /// Module footprint (m²).
    pub area_m2: f64,
    #[serde(default)]
    pub recommended: bool,
}

impl PanelSpec {
    pub fn rated_power_kw(&self) -> f64 {
        self.rated_power_w / 1000.0
    }

    pub(crate) fn check(&self) -> CatalogResult<()> {
        positive(&self.brand, "rated_power_w", self.rated_power_w)?;
        fraction(&self.brand, "performance_ratio", self.performance_ratio, false)?;
        positive(&self.brand, "area_m2", self.area_m2)
    }
}

/// Battery model, per unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatterySpec {
    pub brand: String,
    pub capacity_kwh: f64,
    pub max_charge_kw: f64,
    pub max_discharge_kw: f64,
    pub charge_efficiency: f64,
    pub discharge_efficiency: f64,
    /// SOC limits and starting point as fractions of capacity.
    pub min_soc: f64,
    pub max_soc: f64,
    pub initial_soc: f64,
    #[serde(default)]
    pub recommended: bool,
}

impl BatterySpec {
    pub(crate) fn check(&self) -> CatalogResult<()> {
        positive(&self.brand, "capacity_kwh", self.capacity_kwh)?;
        positive(&self.brand, "max_charge_kw", self.max_charge_kw)?;
        positive(&self.brand, "max_discharge_kw", self.max_discharge_kw)?;
        fraction(&self.brand, "charge_efficiency", self.charge_efficiency, false)?;
        fraction(
            &self.brand,
            "discharge_efficiency",
            self.discharge_efficiency,
            false,
        )?;
        fraction(&self.brand, "min_soc", self.min_soc, true)?;
        fraction(&self.brand, "max_soc", self.max_soc, true)?;
        fraction(&self.brand, "initial_soc", self.initial_soc, true)?;
        if self.min_soc > self.max_soc {
            return Err(CatalogError::InvalidValue {
                brand: self.brand.clone(),
                field: "min_soc",
                value: self.min_soc,
                reason: "must not exceed max_soc",
            });
        }
        Ok(())
    }
}

/// Grid-tie inverter model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InverterSpec {
    pub brand: String,
    pub rated_power_kw: f64,
    pub line_type: LineType,
    #[serde(default)]
    pub recommended: bool,
}

impl InverterSpec {
    pub(crate) fn check(&self) -> CatalogResult<()> {
        positive(&self.brand, "rated_power_kw", self.rated_power_kw)
    }
}

fn positive(brand: &str, field: &'static str, value: f64) -> CatalogResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(CatalogError::InvalidValue {
            brand: brand.to_string(),
            field,
            value,
            reason: "must be positive",
        })
    }
}

fn fraction(brand: &str, field: &'static str, value: f64, allow_zero: bool) -> CatalogResult<()> {
    let lower_ok = if allow_zero { value >= 0.0 } else { value > 0.0 };
    if value.is_finite() && lower_ok && value <= 1.0 {
        Ok(())
    } else {
        Err(CatalogError::InvalidValue {
            brand: brand.to_string(),
            field,
            value,
            reason: "must be a fraction of one",
        })
    }
}
