//! Compounding 25-year projection.

use serde::{Deserialize, Serialize};
use sq_core::ensure_finite;

use crate::error::{ForecastError, ForecastResult};

pub const FORECAST_YEARS: u32 = 25;

/// Annual rates applied after each projected year.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastAssumptions {
    /// Fractional loss of panel output per year.
    pub degradation_rate: f64,
    /// Fractional increase of both tariffs per year.
    pub escalation_rate: f64,
}

impl Default for ForecastAssumptions {
    fn default() -> Self {
        Self {
            degradation_rate: 0.01,
            escalation_rate: 0.02,
        }
    }
}

/// Year-one starting point of the projection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastParams {
    pub generation_kwh: f64,
    /// Utility price avoided for self-consumed energy.
    pub tariff: f64,
    /// Credit for exported energy.
    pub net_metering_rate: f64,
    /// Fraction of generation exported.
    pub export_pct: f64,
    pub total_system_cost: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastYear {
    pub year: u32,
    #[serde(rename = "solarGenerationKWh")]
    pub solar_generation_kwh: f64,
    pub electricity_rate: f64,
    pub net_metering_rate: f64,
    pub annual_savings: f64,
    #[serde(rename = "cumulativeROI")]
    pub cumulative_roi: f64,
}

/// Single pass over the projected years.
///
/// Each year's values are derived from the previous one, so the sequence is
/// consumed as it is produced and cannot be rewound.
#[derive(Debug)]
pub struct Forecast {
    year: u32,
    generation: f64,
    tariff: f64,
    net_metering_rate: f64,
    export_pct: f64,
    roi: f64,
    assumptions: ForecastAssumptions,
}

impl Forecast {
    pub fn new(params: ForecastParams, assumptions: ForecastAssumptions) -> ForecastResult<Self> {
        let generation = ensure_finite(params.generation_kwh, "generation_kwh")?;
        let tariff = ensure_finite(params.tariff, "tariff")?;
        let net_metering_rate = ensure_finite(params.net_metering_rate, "net_metering_rate")?;
        let export_pct = ensure_finite(params.export_pct, "export_pct")?;
        let cost = ensure_finite(params.total_system_cost, "total_system_cost")?;
        let degradation = ensure_finite(assumptions.degradation_rate, "degradation_rate")?;
        let escalation = ensure_finite(assumptions.escalation_rate, "escalation_rate")?;

        if generation < 0.0 || tariff < 0.0 || net_metering_rate < 0.0 || cost < 0.0 {
            return Err(ForecastError::InvalidArg {
                what: "generation, rates and cost must be non-negative",
            });
        }
        if !(0.0..=1.0).contains(&export_pct) {
            return Err(ForecastError::InvalidArg {
                what: "export_pct must be within 0..=1",
            });
        }
        if !(0.0..1.0).contains(&degradation) || escalation <= -1.0 {
            return Err(ForecastError::InvalidArg {
                what: "degradation must be within 0..1 and escalation above -1",
            });
        }

        Ok(Self {
            year: 0,
            generation,
            tariff,
            net_metering_rate,
            export_pct,
            roi: -cost,
            assumptions,
        })
    }

    /// Default degradation and escalation rates.
    pub fn with_defaults(params: ForecastParams) -> ForecastResult<Self> {
        Self::new(params, ForecastAssumptions::default())
    }
}

impl Iterator for Forecast {
    type Item = ForecastYear;

    fn next(&mut self) -> Option<ForecastYear> {
        if self.year >= FORECAST_YEARS {
            return None;
        }
        self.year += 1;

        let exported = self.generation * self.net_metering_rate * self.export_pct;
        let self_used = self.generation * self.tariff * (1.0 - self.export_pct);
        let annual_savings = exported + self_used;
        self.roi += annual_savings;

        let record = ForecastYear {
            year: self.year,
            solar_generation_kwh: self.generation,
            electricity_rate: self.tariff,
            net_metering_rate: self.net_metering_rate,
            annual_savings,
            cumulative_roi: self.roi,
        };

        self.generation *= 1.0 - self.assumptions.degradation_rate;
        self.tariff *= 1.0 + self.assumptions.escalation_rate;
        self.net_metering_rate *= 1.0 + self.assumptions.escalation_rate;

        Some(record)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = (FORECAST_YEARS - self.year) as usize;
        (left, Some(left))
    }
}

impl ExactSizeIterator for Forecast {}

/// First year whose cumulative ROI is non-negative.
pub fn payback_year(years: &[ForecastYear]) -> Option<u32> {
    years
        .iter()
        .find(|y| y.cumulative_roi >= 0.0)
        .map(|y| y.year)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> ForecastParams {
        ForecastParams {
            generation_kwh: 1000.0,
            tariff: 10.0,
            net_metering_rate: 8.0,
            export_pct: 0.5,
            total_system_cost: 5000.0,
        }
    }

    #[test]
    fn first_two_years() {
        let years: Vec<_> = Forecast::with_defaults(params()).unwrap().take(2).collect();

        assert_eq!(years[0].year, 1);
        assert!((years[0].annual_savings - 9000.0).abs() < 1e-9);
        assert!((years[0].cumulative_roi - 4000.0).abs() < 1e-9);

        let y2 = years[1];
        assert_eq!(y2.year, 2);
        assert!((y2.solar_generation_kwh - 990.0).abs() < 1e-9);
        assert!((y2.electricity_rate - 10.2).abs() < 1e-9);
        assert!((y2.net_metering_rate - 8.16).abs() < 1e-9);
        assert!((y2.annual_savings - 9088.2).abs() < 1e-9);
        assert!((y2.cumulative_roi - 13088.2).abs() < 1e-9);
    }

    #[test]
    fn exactly_twenty_five_years() {
        let mut f = Forecast::with_defaults(params()).unwrap();
        assert_eq!(f.len(), 25);
        let years: Vec<_> = f.by_ref().collect();
        assert_eq!(years.len(), 25);
        assert_eq!(years.last().map(|y| y.year), Some(25));
        assert!(f.next().is_none());
    }

    #[test]
    fn payback_found_when_roi_turns_positive() {
        let years: Vec<_> = Forecast::with_defaults(ForecastParams {
            total_system_cost: 20_000.0,
            ..params()
        })
        .unwrap()
        .collect();
        // 9000 + 9088.2 < 20000 <= 9000 + 9088.2 + ~9177
        assert_eq!(payback_year(&years), Some(3));
        assert!(years[0].cumulative_roi < 0.0);
    }

    #[test]
    fn no_payback_without_savings() {
        let years: Vec<_> = Forecast::with_defaults(ForecastParams {
            generation_kwh: 0.0,
            ..params()
        })
        .unwrap()
        .collect();
        assert_eq!(payback_year(&years), None);
    }

    #[test]
    fn rejects_bad_params() {
        let bad = ForecastParams {
            export_pct: 1.5,
            ..params()
        };
        assert!(matches!(
            Forecast::with_defaults(bad),
            Err(ForecastError::InvalidArg { .. })
        ));

        let nan = ForecastParams {
            tariff: f64::NAN,
            ..params()
        };
        assert!(matches!(
            Forecast::with_defaults(nan),
            Err(ForecastError::NonFinite { what: "tariff", .. })
        ));
    }
}
