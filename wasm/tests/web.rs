//! Browser tests for the WASM bindings

#![cfg(target_arch = "wasm32")]

use training_zones_wasm::{compute_power_zones, estimate_vo2max_from_heart_rate_reserve};
use wasm_bindgen_test::*;

#[wasm_bindgen_test]
fn heart_rate_reserve_in_browser() {
    let vo2max = estimate_vo2max_from_heart_rate_reserve(188.0, 49.0).unwrap();
    assert!((vo2max - 58.70).abs() < 0.01);
}

#[wasm_bindgen_test]
fn zero_resting_heart_rate_is_an_error() {
    assert!(estimate_vo2max_from_heart_rate_reserve(188.0, 0.0).is_err());
}

#[wasm_bindgen_test]
fn invalid_ftp_is_an_error() {
    assert!(compute_power_zones(0.0).is_err());
}
