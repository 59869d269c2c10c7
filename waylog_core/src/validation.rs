//! Input sanity checks shared by workout creation.
//!
//! Checks run on raw numeric candidates before any workout is
//! constructed; a failed check must abort creation with no collection,
//! storage, or rendering change.

use crate::{Error, Result};

/// User-facing message shown when a submission fails validation.
pub const INVALID_INPUT_MESSAGE: &str = "Inputs need to be positive numbers.";

/// True only if every value is a finite number.
pub fn all_finite(values: &[f64]) -> bool {
    values.iter().all(|v| v.is_finite())
}

/// True only if every value is strictly greater than zero.
pub fn all_positive(values: &[f64]) -> bool {
    values.iter().all(|v| *v > 0.0)
}

/// Coerce a raw form field to a number. Anything unparseable becomes
/// NaN and falls to the finiteness check, matching how a numeric form
/// input degrades.
pub fn coerce(raw: &str) -> f64 {
    raw.trim().parse().unwrap_or(f64::NAN)
}

/// Validate the fields of a running submission: all finite, all positive.
pub fn check_running(distance_km: f64, duration_min: f64, cadence_spm: f64) -> Result<()> {
    let fields = [distance_km, duration_min, cadence_spm];
    if !all_finite(&fields) || !all_positive(&fields) {
        return Err(Error::Validation(INVALID_INPUT_MESSAGE.into()));
    }
    Ok(())
}

/// Validate the fields of a cycling submission.
///
/// Distance and duration must be finite and positive. Elevation gain
/// must be finite and non-negative: a flat ride legitimately gains zero
/// meters, but a negative or non-numeric gain is rejected.
pub fn check_cycling(distance_km: f64, duration_min: f64, elevation_gain_m: f64) -> Result<()> {
    let required = [distance_km, duration_min];
    if !all_finite(&required) || !all_positive(&required) {
        return Err(Error::Validation(INVALID_INPUT_MESSAGE.into()));
    }
    if !elevation_gain_m.is_finite() || elevation_gain_m < 0.0 {
        return Err(Error::Validation(INVALID_INPUT_MESSAGE.into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_positive_finite_values() {
        assert!(check_running(3.2, 30.0, 178.0).is_ok());
        assert!(check_cycling(3.2, 30.0, 120.0).is_ok());
    }

    #[test]
    fn test_rejects_zero_distance() {
        assert!(check_running(0.0, 30.0, 178.0).is_err());
    }

    #[test]
    fn test_rejects_negative_distance() {
        assert!(check_running(-5.0, 30.0, 178.0).is_err());
    }

    #[test]
    fn test_rejects_nan_distance() {
        assert!(check_running(f64::NAN, 30.0, 178.0).is_err());
        assert!(check_cycling(f64::NAN, 30.0, 0.0).is_err());
    }

    #[test]
    fn test_rejects_infinite_duration() {
        assert!(check_running(5.0, f64::INFINITY, 178.0).is_err());
    }

    #[test]
    fn test_cycling_elevation_may_be_zero_but_not_negative() {
        assert!(check_cycling(5.0, 30.0, 0.0).is_ok());
        assert!(check_cycling(5.0, 30.0, -20.0).is_err());
        assert!(check_cycling(5.0, 30.0, f64::NAN).is_err());
    }

    #[test]
    fn test_coerce_handles_garbage_and_blanks() {
        assert_eq!(coerce("3.2"), 3.2);
        assert_eq!(coerce(" 5 "), 5.0);
        assert!(coerce("").is_nan());
        assert!(coerce("fast").is_nan());
    }
}
