use crate::CoreError;

/// Floating point type used throughout the engine
pub type Real = f64;

/// Marker printed in place of a value that cannot be displayed.
pub const UNAVAILABLE: &str = "unavailable";

/// One tolerance for everything
#[derive(Clone, Copy, Debug)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-12,
            rel: 1e-9,
        }
    }
}

pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    if diff <= tol.abs {
        return true;
    }
    diff <= tol.rel * a.abs().max(b.abs())
}

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, CoreError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(CoreError::NonFinite { what, value: v })
    }
}

/// Finite check followed by clamping negatives to zero.
pub fn finite_non_negative(v: Real, what: &'static str) -> Result<Real, CoreError> {
    Ok(ensure_finite(v, what)?.max(0.0))
}

/// Round a monetary amount to cents.
///
/// Only applied when a value leaves the engine; intermediate arithmetic keeps
/// full precision.
pub fn round2(v: Real) -> Real {
    (v * 100.0).round() / 100.0
}

/// Render an amount with two decimals, or [`UNAVAILABLE`] for NaN/infinity.
pub fn format_money(v: Real) -> String {
    if v.is_finite() {
        format!("{v:.2}")
    } else {
        UNAVAILABLE.to_string()
    }
}
