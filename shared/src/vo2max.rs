//! VO2Max estimation
//!
//! Estimates maximal oxygen uptake (ml/kg/min) from three independent
//! input modalities:
//!
//! 1. **Cooper test**: distance covered in a ~12 minute maximal run
//! 2. **Race performance**: Daniels and Gilbert oxygen cost model
//! 3. **Heart rate reserve**: ratio of maximum to resting heart rate
//!
//! The regression constants below are fixed by the published formulas.

use crate::errors::{ensure_finite, ensure_positive, CalculationError, CalculationResult};

const METERS_PER_KM: f64 = 1000.0;
const SECONDS_PER_MINUTE: f64 = 60.0;

/// Estimate VO2Max from a Cooper test distance in meters
///
/// Formula: VO2Max = 22.351 × km - 11.288
///
/// The effort duration (12:00 to 12:10) must be checked by whoever selects
/// the workout; see [`find_best_recent_efforts`](crate::find_best_recent_efforts).
pub fn estimate_vo2max_from_cooper_test(distance_meters: f64) -> CalculationResult<f64> {
    let distance = ensure_positive("Cooper test distance", distance_meters)?;
    let kms = distance / METERS_PER_KM;
    Ok(22.351 * kms - 11.288)
}

/// Estimate VO2Max from a Cooper test distance in miles
///
/// Formula: VO2Max = 25.97 × miles - 11.29
pub fn estimate_vo2max_from_cooper_test_miles(miles: f64) -> CalculationResult<f64> {
    let miles = ensure_positive("Cooper test distance", miles)?;
    Ok(25.97 * miles - 11.29)
}

/// Estimate VO2Max from a race result using the Daniels and Gilbert formula
///
/// With t = duration in minutes and v = velocity in meters per minute:
///
/// VO2Max = (-4.60 + 0.182258v + 0.000104v²)
///          / (0.8 + 0.1894393e^(-0.012778t) + 0.2989558e^(-0.1932605t))
pub fn estimate_vo2max_from_race(distance_meters: f64, duration_seconds: f64) -> CalculationResult<f64> {
    let distance = ensure_positive("race distance", distance_meters)?;
    let duration = ensure_positive("race duration", duration_seconds)?;

    let t = duration / SECONDS_PER_MINUTE;
    let v = distance / t;

    let oxygen_cost = -4.60 + 0.182258 * v + 0.000104 * v.powi(2);
    let fraction_sustained =
        0.8 + 0.1894393 * (-0.012778 * t).exp() + 0.2989558 * (-0.1932605 * t).exp();

    Ok(oxygen_cost / fraction_sustained)
}

/// Estimate VO2Max from the ratio of maximum to resting heart rate
///
/// Formula: VO2Max = 15.3 × (HRmax / HRrest)
pub fn estimate_vo2max_from_heart_rate_reserve(max_hr: f64, resting_hr: f64) -> CalculationResult<f64> {
    let max_hr = ensure_finite("maximum heart rate", max_hr)?;
    let resting_hr = ensure_positive("resting heart rate", resting_hr)?;
    Ok(15.3 * (max_hr / resting_hr))
}

/// Estimate VO2Max from a sub-maximal effort and the heart rate it was run at
///
/// VO2Max = (speed(m/min) × 0.2) / ((HRload - HRrest) / (HRmax - HRrest)) + 3.5
pub fn estimate_vo2max_from_race_and_heart_rate(
    distance_meters: f64,
    duration_minutes: f64,
    load_hr: f64,
    resting_hr: f64,
    max_hr: f64,
) -> CalculationResult<f64> {
    let distance = ensure_positive("race distance", distance_meters)?;
    let duration = ensure_positive("race duration", duration_minutes)?;
    let load_hr = ensure_finite("load heart rate", load_hr)?;
    let resting_hr = ensure_finite("resting heart rate", resting_hr)?;
    let max_hr = ensure_finite("maximum heart rate", max_hr)?;

    if max_hr <= resting_hr {
        return Err(CalculationError::invalid(
            "maximum heart rate",
            max_hr,
            "must be above the resting heart rate",
        ));
    }
    if load_hr <= resting_hr {
        return Err(CalculationError::invalid(
            "load heart rate",
            load_hr,
            "must be above the resting heart rate",
        ));
    }

    let reserve_fraction = (load_hr - resting_hr) / (max_hr - resting_hr);
    Ok((distance / duration * 0.2) / reserve_fraction + 3.5)
}
