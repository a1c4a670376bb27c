//! Catalog container and brand lookup with recommended-entry fallback.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use sq_core::LineType;
use tracing::warn;

use crate::error::{CatalogError, CatalogResult};
use crate::spec::{BatterySpec, InverterSpec, PanelSpec};

/// Shared shape of every catalog table row.
pub trait CatalogEntry {
    fn brand(&self) -> &str;
    fn recommended(&self) -> bool;

    fn matches_key(&self, key: &str) -> bool {
        self.brand().eq_ignore_ascii_case(key.trim())
    }
}

impl CatalogEntry for PanelSpec {
    fn brand(&self) -> &str {
        &self.brand
    }
    fn recommended(&self) -> bool {
        self.recommended
    }
}

impl CatalogEntry for BatterySpec {
    fn brand(&self) -> &str {
        &self.brand
    }
    fn recommended(&self) -> bool {
        self.recommended
    }
}

impl CatalogEntry for InverterSpec {
    fn brand(&self) -> &str {
        &self.brand
    }
    fn recommended(&self) -> bool {
        self.recommended
    }
}

/// On-disk layout of a catalog file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct CatalogFile {
    panels: Vec<PanelSpec>,
    batteries: Vec<BatterySpec>,
    #[serde(default)]
    inverters: Vec<InverterSpec>,
}

/// Validated, read-only equipment catalog.
///
/// Panels and batteries are guaranteed non-empty, so lookups always resolve.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    panels: Vec<PanelSpec>,
    batteries: Vec<BatterySpec>,
    inverters: Vec<InverterSpec>,
}

impl Catalog {
    pub fn new(
        panels: Vec<PanelSpec>,
        batteries: Vec<BatterySpec>,
        inverters: Vec<InverterSpec>,
    ) -> CatalogResult<Self> {
        if panels.is_empty() {
            return Err(CatalogError::Empty { table: "panels" });
        }
        if batteries.is_empty() {
            return Err(CatalogError::Empty { table: "batteries" });
        }
        check_table("panels", &panels)?;
        check_table("batteries", &batteries)?;
        check_table("inverters", &inverters)?;
        for panel in &panels {
            panel.check()?;
        }
        for battery in &batteries {
            battery.check()?;
        }
        for inverter in &inverters {
            inverter.check()?;
        }
        Ok(Self {
            panels,
            batteries,
            inverters,
        })
    }

    /// Unchecked constructor for tables known to be valid.
    pub(crate) fn from_parts(
        panels: Vec<PanelSpec>,
        batteries: Vec<BatterySpec>,
        inverters: Vec<InverterSpec>,
    ) -> Self {
        Self {
            panels,
            batteries,
            inverters,
        }
    }

    pub fn builtin() -> Self {
        crate::builtin::builtin_catalog()
    }

    pub fn from_yaml_str(content: &str) -> CatalogResult<Self> {
        let file: CatalogFile = serde_yaml::from_str(content)?;
        Self::new(file.panels, file.batteries, file.inverters)
    }

    pub fn load_yaml(path: &Path) -> CatalogResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| CatalogError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_yaml_str(&content)
    }

    pub fn to_yaml_string(&self) -> CatalogResult<String> {
        let file = CatalogFile {
            panels: self.panels.clone(),
            batteries: self.batteries.clone(),
            inverters: self.inverters.clone(),
        };
        Ok(serde_yaml::to_string(&file)?)
    }

    pub fn panels(&self) -> &[PanelSpec] {
        &self.panels
    }

    pub fn batteries(&self) -> &[BatterySpec] {
        &self.batteries
    }

    pub fn inverters(&self) -> &[InverterSpec] {
        &self.inverters
    }

    /// Panel for `key`, or the recommended panel when the key is unset or unknown.
    pub fn panel(&self, key: Option<&str>) -> &PanelSpec {
        resolve("panel", &self.panels, key).unwrap_or(&self.panels[0])
    }

    /// Battery for `key`, or the recommended battery when the key is unset or unknown.
    pub fn battery(&self, key: Option<&str>) -> &BatterySpec {
        resolve("battery", &self.batteries, key).unwrap_or(&self.batteries[0])
    }

    /// Smallest inverter of the given phase that covers `size_kw`.
    ///
    /// Falls back to the largest inverter of that phase, then to the
    /// recommended inverter of any phase.
    pub fn inverter_for(&self, line_type: LineType, size_kw: f64) -> Option<&InverterSpec> {
        let mut same_phase: Vec<&InverterSpec> = self
            .inverters
            .iter()
            .filter(|inv| inv.line_type == line_type)
            .collect();
        same_phase.sort_by(|a, b| a.rated_power_kw.total_cmp(&b.rated_power_kw));

        same_phase
            .iter()
            .find(|inv| inv.rated_power_kw >= size_kw)
            .or_else(|| same_phase.last())
            .copied()
            .or_else(|| resolve("inverter", &self.inverters, None))
    }
}

/// Exact brand match, else the recommended entry, else the first entry.
fn resolve<'a, T: CatalogEntry>(
    what: &'static str,
    entries: &'a [T],
    key: Option<&str>,
) -> Option<&'a T> {
    if let Some(key) = key.filter(|k| !k.trim().is_empty()) {
        if let Some(hit) = entries.iter().find(|e| e.matches_key(key)) {
            return Some(hit);
        }
        warn!(what, key, "unknown catalog key, using recommended entry");
    }
    entries
        .iter()
        .find(|e| e.recommended())
        .or_else(|| entries.first())
}

fn check_table<T: CatalogEntry>(table: &'static str, entries: &[T]) -> CatalogResult<()> {
    let mut seen = HashSet::new();
    for entry in entries {
        if !seen.insert(entry.brand().to_ascii_lowercase()) {
            return Err(CatalogError::DuplicateBrand {
                table,
                brand: entry.brand().to_string(),
            });
        }
    }
    if entries.iter().filter(|e| e.recommended()).count() > 1 {
        return Err(CatalogError::MultipleRecommended { table });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn panel(brand: &str, watts: f64, recommended: bool) -> PanelSpec {
        PanelSpec {
            brand: brand.to_string(),
            rated_power_w: watts,
            performance_ratio: 0.8,
            area_m2: 2.5,
            recommended,
        }
    }

    fn battery(brand: &str, recommended: bool) -> BatterySpec {
        BatterySpec {
            brand: brand.to_string(),
            capacity_kwh: 10.0,
            max_charge_kw: 5.0,
            max_discharge_kw: 5.0,
            charge_efficiency: 0.95,
            discharge_efficiency: 0.95,
            min_soc: 0.1,
            max_soc: 0.9,
            initial_soc: 0.5,
            recommended,
        }
    }

    fn inverter(brand: &str, kw: f64, line_type: LineType) -> InverterSpec {
        InverterSpec {
            brand: brand.to_string(),
            rated_power_kw: kw,
            line_type,
            recommended: false,
        }
    }

    #[test]
    fn lookup_falls_back_to_recommended() {
        let catalog = Catalog::new(
            vec![panel("a", 400.0, false), panel("b", 550.0, true)],
            vec![battery("x", false)],
            vec![],
        )
        .unwrap();

        assert_eq!(catalog.panel(Some("A")).brand, "a");
        assert_eq!(catalog.panel(Some("missing")).brand, "b");
        assert_eq!(catalog.panel(Some("  ")).brand, "b");
        assert_eq!(catalog.panel(None).brand, "b");
        // No recommended battery: first entry wins.
        assert_eq!(catalog.battery(None).brand, "x");
    }

    #[test]
    fn rejects_empty_and_duplicate_tables() {
        let err = Catalog::new(vec![], vec![battery("x", false)], vec![]).unwrap_err();
        assert!(matches!(err, CatalogError::Empty { table: "panels" }));

        let err = Catalog::new(
            vec![panel("a", 400.0, false), panel("A", 500.0, false)],
            vec![battery("x", false)],
            vec![],
        )
        .unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateBrand { .. }));

        let err = Catalog::new(
            vec![panel("a", 400.0, true), panel("b", 500.0, true)],
            vec![battery("x", false)],
            vec![],
        )
        .unwrap_err();
        assert!(matches!(
            err,
            CatalogError::MultipleRecommended { table: "panels" }
        ));
    }

    #[test]
    fn inverter_selection_by_phase_and_size() {
        let catalog = Catalog::new(
            vec![panel("a", 400.0, true)],
            vec![battery("x", true)],
            vec![
                inverter("s5", 5.0, LineType::SinglePhase),
                inverter("s10", 10.0, LineType::SinglePhase),
                inverter("t20", 20.0, LineType::ThreePhase),
            ],
        )
        .unwrap();

        let pick = |lt, kw| catalog.inverter_for(lt, kw).map(|i| i.brand.as_str());
        assert_eq!(pick(LineType::SinglePhase, 4.2), Some("s5"));
        assert_eq!(pick(LineType::SinglePhase, 7.0), Some("s10"));
        assert_eq!(pick(LineType::SinglePhase, 30.0), Some("s10"));
        assert_eq!(pick(LineType::ThreePhase, 1.0), Some("t20"));
    }

    #[test]
    fn yaml_round_trip_keeps_entries() {
        let catalog = crate::builtin::builtin_catalog();
        let yaml = catalog.to_yaml_string().unwrap();
        let back = Catalog::from_yaml_str(&yaml).unwrap();
        assert_eq!(back, catalog);
    }
}
