//! Default equipment catalog shipped with the engine.

use sq_core::LineType;

use crate::catalog::Catalog;
use crate::spec::{BatterySpec, InverterSpec, PanelSpec};

fn panel(brand: &str, rated_power_w: f64, area_m2: f64, recommended: bool) -> PanelSpec {
    PanelSpec {
        brand: brand.to_string(),
        rated_power_w,
        performance_ratio: 0.8,
        area_m2,
        recommended,
    }
}

#[allow(clippy::too_many_arguments)]
fn battery(
    brand: &str,
    capacity_kwh: f64,
    max_charge_kw: f64,
    max_discharge_kw: f64,
    efficiency: f64,
    min_soc: f64,
    max_soc: f64,
    recommended: bool,
) -> BatterySpec {
    BatterySpec {
        brand: brand.to_string(),
        capacity_kwh,
        max_charge_kw,
        max_discharge_kw,
        charge_efficiency: efficiency,
        discharge_efficiency: efficiency,
        min_soc,
        max_soc,
        initial_soc: 0.5,
        recommended,
    }
}

fn inverter(brand: &str, rated_power_kw: f64, line_type: LineType) -> InverterSpec {
    InverterSpec {
        brand: brand.to_string(),
        rated_power_kw,
        line_type,
        recommended: false,
    }
}

/// Catalog used when the caller does not supply one.
pub fn builtin_catalog() -> Catalog {
    let panels = vec![
        panel("longi-hi-mo-5-550", 550.0, 2.58, false),
        panel("jinko-tiger-neo-580", 580.0, 2.58, true),
        panel("canadian-hiku6-455", 455.0, 2.21, false),
        panel("trina-vertex-s-425", 425.0, 1.95, false),
    ];

    let batteries = vec![
        battery("pylontech-us5000", 4.8, 2.5, 2.5, 0.95, 0.1, 0.95, false),
        battery("byd-hvs-10", 10.24, 10.0, 10.0, 0.96, 0.05, 0.95, true),
        battery("tesla-powerwall-2", 13.5, 5.0, 7.0, 0.95, 0.1, 1.0, false),
    ];

    let mut inverters = vec![
        inverter("huawei-sun2000-5ktl-l1", 5.0, LineType::SinglePhase),
        inverter("huawei-sun2000-8ktl-l1", 8.0, LineType::SinglePhase),
        inverter("solis-10k-s", 10.0, LineType::SinglePhase),
        inverter("huawei-sun2000-10ktl-m1", 10.0, LineType::ThreePhase),
        inverter("huawei-sun2000-20ktl-m2", 20.0, LineType::ThreePhase),
        inverter("sungrow-sg50cx", 50.0, LineType::ThreePhase),
        inverter("sungrow-sg110cx", 110.0, LineType::ThreePhase),
    ];
    inverters[1].recommended = true;

    Catalog::from_parts(panels, batteries, inverters)
}
