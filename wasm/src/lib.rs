//! Training Zones WASM Module
//!
//! WebAssembly bindings so a browser client can run the zone and pace
//! calculations locally. Structured results are returned as JSON strings.

use serde::Serialize;
use std::collections::BTreeMap;
use training_zones_shared as engine;
use wasm_bindgen::prelude::*;

fn to_js_error(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Heart rate zones as sent to the client
#[derive(Serialize)]
struct HeartRateZonesResponse {
    boundaries: Vec<f64>,
    descriptions: Vec<&'static str>,
    method: &'static str,
}

/// Training paces as sent to the client, keyed by display label
#[derive(Serialize)]
struct TrainingPacesResponse {
    paces: BTreeMap<&'static str, f64>,
    method: Option<&'static str>,
}

/// Estimate VO2Max from a Cooper test distance in meters
#[wasm_bindgen]
pub fn estimate_vo2max_from_cooper_test(distance_meters: f64) -> Result<f64, JsValue> {
    engine::estimate_vo2max_from_cooper_test(distance_meters).map_err(to_js_error)
}

/// Estimate VO2Max from a race distance (meters) and duration (seconds)
#[wasm_bindgen]
pub fn estimate_vo2max_from_race(distance_meters: f64, duration_seconds: f64) -> Result<f64, JsValue> {
    engine::estimate_vo2max_from_race(distance_meters, duration_seconds).map_err(to_js_error)
}

/// Estimate VO2Max from maximum and resting heart rate
#[wasm_bindgen]
pub fn estimate_vo2max_from_heart_rate_reserve(max_hr: f64, resting_hr: f64) -> Result<f64, JsValue> {
    engine::estimate_vo2max_from_heart_rate_reserve(max_hr, resting_hr).map_err(to_js_error)
}

/// Compute heart rate zones; returns JSON with boundaries, descriptions and method
#[wasm_bindgen]
pub fn compute_heart_rate_zones(
    resting_hr: Option<f64>,
    max_hr: Option<f64>,
    age_years: Option<f64>,
) -> Result<String, JsValue> {
    let zones = engine::compute_heart_rate_zones(resting_hr, max_hr, age_years).map_err(to_js_error)?;
    let response = HeartRateZonesResponse {
        boundaries: zones.boundaries.to_vec(),
        descriptions: engine::HR_ZONE_DESCRIPTIONS.to_vec(),
        method: zones.method.name(),
    };
    serde_json::to_string(&response).map_err(to_js_error)
}

/// Compute the six power zone boundaries from FTP
#[wasm_bindgen]
pub fn compute_power_zones(ftp_watts: f64) -> Result<Vec<f64>, JsValue> {
    engine::compute_power_zones(ftp_watts)
        .map(|zones| zones.boundaries.to_vec())
        .map_err(to_js_error)
}

/// Compute training paces from a JSON encoded set of physiological inputs
///
/// Speeds are in meters per minute. `method` is null when no input qualifies.
#[wasm_bindgen]
pub fn compute_training_paces(inputs_json: &str) -> Result<String, JsValue> {
    let inputs: engine::PhysiologicalInputs = serde_json::from_str(inputs_json).map_err(to_js_error)?;
    let table = engine::compute_training_paces(&inputs).map_err(to_js_error)?;
    let response = TrainingPacesResponse {
        paces: table.iter().map(|(category, speed)| (category.label(), speed)).collect(),
        method: table.method.map(|method| method.name()),
    };
    serde_json::to_string(&response).map_err(to_js_error)
}

/// Format a speed in meters per minute as a pace in "metric" or "imperial" units
#[wasm_bindgen]
pub fn speed_to_pace_string(speed_meters_per_min: f64, units: &str) -> Result<String, JsValue> {
    let units: engine::UnitSystem = units.parse().map_err(to_js_error)?;
    Ok(engine::speed_to_pace_string(speed_meters_per_min, units))
}
