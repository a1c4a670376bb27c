//! Content-based hashing for quote IDs.

use sha2::{Digest, Sha256};

use crate::config::QuoteRequest;

/// Identical requests resolved to the same equipment share an id.
pub fn compute_quote_id(request: &QuoteRequest, panel_brand: &str, battery_brand: &str) -> String {
    let mut hasher = Sha256::new();

    let inputs_json = serde_json::to_string(&request.inputs).unwrap_or_default();
    hasher.update(inputs_json.as_bytes());

    hasher.update(panel_brand.as_bytes());
    hasher.update(battery_brand.as_bytes());
    hasher.update(request.battery_count.to_le_bytes());

    let forecast_json = serde_json::to_string(&request.forecast).unwrap_or_default();
    hasher.update(forecast_json.as_bytes());

    let result = hasher.finalize();
    format!("{:x}", result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sq_core::*;

    fn request() -> QuoteRequest {
        QuoteRequest::new(SystemInputs {
            building_type: BuildingType::Commercial,
            monthly_bill: 50_000.0,
            time_of_use: TimeOfUse::TwentyFourSeven,
            net_metering: NetMetering::Yes,
            roof_type: RoofType::Concrete,
            line_type: LineType::ThreePhase,
            line_voltage: LineVoltage::V400,
            new_requested_monthly_bill: None,
        })
    }

    #[test]
    fn hash_stability() {
        let a = compute_quote_id(&request(), "p", "b");
        let b = compute_quote_id(&request(), "p", "b");
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
    }

    #[test]
    fn hash_differs_for_different_inputs() {
        let base = compute_quote_id(&request(), "p", "b");

        let mut other = request();
        other.inputs.monthly_bill = 50_001.0;
        assert_ne!(base, compute_quote_id(&other, "p", "b"));

        assert_ne!(base, compute_quote_id(&request(), "p2", "b"));

        let mut more_batteries = request();
        more_batteries.battery_count = 2;
        assert_ne!(base, compute_quote_id(&more_batteries, "p", "b"));
    }
}
