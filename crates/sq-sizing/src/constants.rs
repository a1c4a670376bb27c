//! Tariff and pricing constants (currency per unit unless noted).

/// Fixed rate credited for exported energy under net metering (per kWh).
pub const NET_METERING_TARIFF: f64 = 7.6;

/// Equivalent full-sun hours per day used to turn kWh/day into kW.
pub const PEAK_SUN_HOURS: f64 = 4.0;

/// System derate applied when sizing for the fastest payback.
pub const SIZING_DERATE: f64 = 0.8;

pub const NET_METERING_BASE_PRICE: f64 = 40_000.0;
pub const NET_METERING_THRESHOLD_KW: f64 = 40.0;
pub const NET_METERING_PRICE_PER_KW: f64 = 1_000.0;

/// Module and mounting cost per kW.
pub const MODULE_RATE: f64 = 8_750.0;
pub const MOUNTING_RATE: f64 = 10_980.0;

/// Small-system premium: `size * PREMIUM_NUMERATOR / (size + PREMIUM_OFFSET_KW) * 1000`.
pub const PREMIUM_NUMERATOR: f64 = 399.0;
pub const PREMIUM_OFFSET_KW: f64 = 70.0;

pub const BASE_LABOUR_RATE: f64 = 2_720.0;

pub const INVERTER_SIZE_OFFSET_KW: f64 = 5.0;
