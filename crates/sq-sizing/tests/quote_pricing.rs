//! End-to-end sizing and pricing cases.

use proptest::prelude::*;
use sq_core::*;
use sq_sizing::{SizingError, panel_count, size_system};

fn base() -> SystemInputs {
    SystemInputs {
        building_type: BuildingType::Residential,
        monthly_bill: 10_000.0,
        time_of_use: TimeOfUse::DayTime,
        net_metering: NetMetering::Yes,
        roof_type: RoofType::Metal,
        line_type: LineType::SinglePhase,
        line_voltage: LineVoltage::V220,
        new_requested_monthly_bill: None,
    }
}

#[test]
fn residential_without_net_metering() {
    let inputs = SystemInputs {
        net_metering: NetMetering::No,
        time_of_use: TimeOfUse::NightTime,
        ..base()
    };
    let r = size_system(&inputs, 0.58).unwrap();

    assert_eq!(r.figures.utility_price_per_kwh, 12.5);
    assert_eq!(r.figures.utility_monthly_kwh, 800.0);
    assert_eq!(r.pricing.net_metering, 0.0);
    // Without net metering the ROI target is used as-is.
    assert!((r.suggested_size_kw - r.figures.fastest_roi_solar_size_kw).abs() < 1e-12);
}

#[test]
fn priced_breakdown_for_typical_home() {
    let r = size_system(&base(), 0.58).unwrap();
    let p = r.pricing;

    assert!((r.suggested_size_kw - 5.8).abs() < 1e-9);
    assert!((p.solar - 144_964.34).abs() < 1e-6);
    assert!((p.labour - 15_776.0).abs() < 1e-6);
    assert_eq!(p.net_metering, 40_000.0);
    assert!((p.inverter - 32_770.86).abs() < 1e-6);
    assert!((p.total - 233_511.2).abs() < 1e-6);
}

#[test]
fn commercial_uses_lower_utility_price() {
    let inputs = SystemInputs {
        building_type: BuildingType::Commercial,
        ..base()
    };
    let r = size_system(&inputs, 0.58).unwrap();
    assert_eq!(r.figures.utility_price_per_kwh, 10.0);
    assert_eq!(r.figures.utility_monthly_kwh, 1_000.0);
}

#[test]
fn large_commercial_net_metering_scales_with_size() {
    let inputs = SystemInputs {
        building_type: BuildingType::Commercial,
        monthly_bill: 1_000_000.0,
        line_type: LineType::ThreePhase,
        line_voltage: LineVoltage::V400,
        ..base()
    };
    let r = size_system(&inputs, 0.58).unwrap();
    assert!(r.suggested_size_kw > 40.0);
    assert_eq!(r.pricing.net_metering, r.suggested_size_kw.ceil() * 1_000.0);
}

#[test]
fn sizing_error_names_stage_input() {
    let inputs = SystemInputs {
        monthly_bill: f64::INFINITY,
        ..base()
    };
    let err = size_system(&inputs, 0.58).unwrap_err();
    assert!(matches!(err, SizingError::Input(CoreError::NonFinite { .. })));
}

#[test]
fn exact_panel_multiple_is_not_rounded_up() {
    // 28275 / 12.5 / 30 * 0.16 / 0.8 = 15.08 kW = 26 panels of 0.58 kW.
    let inputs = SystemInputs {
        monthly_bill: 28_275.0,
        ..base()
    };
    let r = size_system(&inputs, 0.58).unwrap();
    assert_eq!(panel_count(r.suggested_size_kw, 0.58), 26);
    assert!((r.suggested_size_kw - 15.08).abs() < 1e-9);
}

#[test]
fn every_exact_multiple_keeps_its_panel_count() {
    // A day-time residential target is bill / 1875 kW.
    for panels in 1..=200u32 {
        let inputs = SystemInputs {
            monthly_bill: f64::from(panels) * 0.58 * 1_875.0,
            ..base()
        };
        let r = size_system(&inputs, 0.58).unwrap();
        assert_eq!(
            panel_count(r.suggested_size_kw, 0.58),
            panels,
            "bill {}",
            inputs.monthly_bill
        );
    }
}

fn any_inputs() -> impl Strategy<Value = SystemInputs> {
    (
        prop_oneof![Just(BuildingType::Residential), Just(BuildingType::Commercial)],
        1.0_f64..2_000_000.0,
        prop_oneof![
            Just(TimeOfUse::NightTime),
            Just(TimeOfUse::DayTime),
            Just(TimeOfUse::TwentyFourSeven)
        ],
        prop_oneof![Just(NetMetering::Yes), Just(NetMetering::No)],
        prop_oneof![
            Just(RoofType::Metal),
            Just(RoofType::Shingles),
            Just(RoofType::Tiles),
            Just(RoofType::Concrete),
            Just(RoofType::Other)
        ],
        prop_oneof![Just(LineType::SinglePhase), Just(LineType::ThreePhase)],
        prop_oneof![Just(LineVoltage::V220), Just(LineVoltage::V400)],
        proptest::option::of(0.0_f64..2_000_000.0),
    )
        .prop_map(|(b, bill, tou, nm, roof, line, volt, requested)| SystemInputs {
            building_type: b,
            monthly_bill: bill,
            time_of_use: tou,
            net_metering: nm,
            roof_type: roof,
            line_type: line,
            line_voltage: volt,
            new_requested_monthly_bill: requested,
        })
}

proptest! {
    #[test]
    fn pricing_components_add_up(inputs in any_inputs(), panel_w in 300.0_f64..700.0) {
        let r = size_system(&inputs, panel_w / 1000.0).unwrap();
        let p = r.pricing;
        prop_assert_eq!(p.total, p.solar + p.labour + p.net_metering + p.inverter);
        prop_assert!(r.suggested_size_kw >= 0.0);
        if inputs.net_metering == NetMetering::No {
            prop_assert_eq!(p.net_metering, 0.0);
        }
    }
}
