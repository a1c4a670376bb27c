//! Quote file format and loading.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use sq_core::SystemInputs;
use sq_forecast::ForecastAssumptions;
use sq_profile::{ProfileConfig, SlotPercentages};

use crate::error::{AppError, AppResult};

fn default_battery_count() -> u32 {
    1
}

/// What to quote: customer inputs plus equipment choices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteRequest {
    pub inputs: SystemInputs,
    /// Panel brand key; unknown or missing keys use the recommended panel.
    #[serde(default)]
    pub panel: Option<String>,
    #[serde(default)]
    pub battery: Option<String>,
    #[serde(default = "default_battery_count")]
    pub battery_count: u32,
    #[serde(default)]
    pub forecast: ForecastAssumptions,
}

impl QuoteRequest {
    pub fn new(inputs: SystemInputs) -> Self {
        Self {
            inputs,
            panel: None,
            battery: None,
            battery_count: default_battery_count(),
            forecast: ForecastAssumptions::default(),
        }
    }
}

/// Synthetic-day settings.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProfileSettings {
    /// Load shares per two-hour block; defaults follow the usage pattern.
    #[serde(default)]
    pub slot_percentages: Option<SlotPercentages>,
    #[serde(flatten)]
    pub config: ProfileConfig,
}

/// On-disk quote file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteFile {
    #[serde(flatten)]
    pub request: QuoteRequest,
    /// Catalog file, relative to the quote file; the built-in catalog otherwise.
    #[serde(default)]
    pub catalog: Option<PathBuf>,
    #[serde(default)]
    pub profile: ProfileSettings,
}

impl QuoteFile {
    /// Catalog path resolved against the directory of `quote_path`.
    pub fn catalog_path(&self, quote_path: &Path) -> Option<PathBuf> {
        self.catalog.as_ref().map(|p| {
            if p.is_absolute() {
                p.clone()
            } else {
                quote_path
                    .parent()
                    .map(|dir| dir.join(p))
                    .unwrap_or_else(|| p.clone())
            }
        })
    }
}

pub fn parse_quote(content: &str) -> AppResult<QuoteFile> {
    Ok(serde_yaml::from_str(content)?)
}

/// Load a quote from a YAML file.
pub fn load_quote(path: &Path) -> AppResult<QuoteFile> {
    let content = std::fs::read_to_string(path).map_err(|e| AppError::QuoteFileRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    parse_quote(&content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sq_core::TimeOfUse;

    const MINIMAL: &str = r#"
inputs:
  building_type: residential
  monthly_bill: 8000
  time_of_use: day_time
  net_metering: "yes"
  roof_type: tiles
  line_type: single_phase
  line_voltage: "220"
"#;

    #[test]
    fn minimal_quote_gets_defaults() {
        let quote = parse_quote(MINIMAL).unwrap();
        assert_eq!(quote.request.inputs.time_of_use, TimeOfUse::DayTime);
        assert_eq!(quote.request.battery_count, 1);
        assert_eq!(quote.request.panel, None);
        assert_eq!(quote.request.forecast, ForecastAssumptions::default());
        assert_eq!(quote.profile, ProfileSettings::default());
        assert_eq!(quote.catalog, None);
    }

    #[test]
    fn full_quote_parses_every_section() {
        let yaml = format!(
            "{MINIMAL}
panel: longi-hi-mo-5-550
battery: tesla-powerwall-2
battery_count: 2
catalog: catalogs/regional.yaml
forecast:
  degradation_rate: 0.005
profile:
  seed: 11
  solar_jitter_pct: 2.5
  slot_percentages: [8.5, 8.5, 8.5, 8.5, 8, 8, 8, 8, 8.5, 8.5, 8.5, 8.5]
"
        );
        let quote = parse_quote(&yaml).unwrap();
        assert_eq!(quote.request.panel.as_deref(), Some("longi-hi-mo-5-550"));
        assert_eq!(quote.request.battery_count, 2);
        assert_eq!(quote.request.forecast.degradation_rate, 0.005);
        assert_eq!(quote.request.forecast.escalation_rate, 0.02);
        assert_eq!(quote.profile.config.seed, Some(11));
        assert_eq!(quote.profile.config.solar_jitter_pct, 2.5);
        assert_eq!(quote.profile.config.load_jitter_frac, 0.10);
        assert_eq!(quote.profile.slot_percentages.map(|s| s[4]), Some(8.0));

        let resolved = quote.catalog_path(Path::new("/quotes/home.yaml"));
        assert_eq!(resolved, Some(PathBuf::from("/quotes/catalogs/regional.yaml")));
    }

    #[test]
    fn bad_enum_is_a_parse_error() {
        let yaml = MINIMAL.replace("tiles", "thatch");
        assert!(matches!(parse_quote(&yaml), Err(AppError::QuoteParse(_))));
    }
}
