//! Price curves over the suggested system size.

use serde::{Deserialize, Serialize};
use sq_core::{LineType, LineVoltage, NetMetering, RoofType, SystemInputs, round2};

use crate::constants::*;

/// Cost breakdown, rounded to cents.
///
/// `total` is the sum of the rounded components, so the breakdown always adds
/// up exactly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pricing {
    pub solar: f64,
    pub labour: f64,
    pub net_metering: f64,
    pub inverter: f64,
    pub total: f64,
}

pub fn net_metering_price(size_kw: f64, net_metering: NetMetering) -> f64 {
    if !net_metering.enabled() {
        return 0.0;
    }
    if size_kw > NET_METERING_THRESHOLD_KW {
        size_kw.ceil() * NET_METERING_PRICE_PER_KW
    } else {
        NET_METERING_BASE_PRICE
    }
}

pub fn solar_price(size_kw: f64) -> f64 {
    (MODULE_RATE + MOUNTING_RATE) * size_kw
        + size_kw * (PREMIUM_NUMERATOR / (size_kw + PREMIUM_OFFSET_KW)) * 1000.0
}

pub fn labour_price(size_kw: f64, roof: RoofType) -> f64 {
    (BASE_LABOUR_RATE + roof.labour_surcharge()) * size_kw
}

pub fn inverter_price(size_kw: f64, line: LineType, voltage: LineVoltage) -> f64 {
    let (numerator, floor) = line.inverter_rate_curve();
    let rate = (numerator / (size_kw + INVERTER_SIZE_OFFSET_KW)).max(floor)
        + voltage.inverter_rate_surcharge();
    rate * size_kw
}

/// Price a system of `size_kw` for the given site.
pub fn price_system(size_kw: f64, inputs: &SystemInputs) -> Pricing {
    let solar = round2(solar_price(size_kw));
    let labour = round2(labour_price(size_kw, inputs.roof_type));
    let net_metering = round2(net_metering_price(size_kw, inputs.net_metering));
    let inverter = round2(inverter_price(size_kw, inputs.line_type, inputs.line_voltage));
    Pricing {
        solar,
        labour,
        net_metering,
        inverter,
        total: solar + labour + net_metering + inverter,
    }
}
