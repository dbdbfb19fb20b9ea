//! Heart rate zones, power zones, and training pace selection
//!
//! Each calculation picks its algorithm from whichever inputs are available.
//!
//! # Heart rate zones (first match wins)
//!
//! 1. Resting and maximum heart rate: Karvonen (heart rate reserve)
//! 2. Maximum heart rate only: percentages of maximum
//! 3. Age only: Oakland nonlinear estimate of maximum, then percentages
//!
//! # Training paces (first match wins)
//!
//! Cooper test, best recent 5K, heart rate, then VO2Max. Measured VO2Max from
//! wearables ranks last because effort-based estimates are more reliable.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use crate::errors::{ensure_finite, ensure_positive, CalculationError, CalculationResult};
use crate::inputs::{PhysiologicalInputs, HEART_RATE_FLOOR_BPM};
use crate::paces::{
    calculate_paces_from_cooper_test, calculate_paces_from_heart_rate_reserve,
    calculate_paces_from_race, calculate_paces_from_vo2max, PaceMethod, TrainingPaceTable,
};

pub const NUM_HR_ZONES: usize = 5;
pub const NUM_POWER_ZONES: usize = 6;

/// Lower bounds of zones 1-4 as a fraction of maximum (or reserve)
const HR_ZONE_FRACTIONS: [f64; NUM_HR_ZONES - 1] = [0.60, 0.70, 0.80, 0.90];

/// Coggan 6 zone model; anything above the last boundary is zone 6
const POWER_ZONE_MULTIPLIERS: [f64; NUM_POWER_ZONES] = [0.55, 0.75, 0.90, 1.05, 1.20, 1.50];

/// Race distance used with the best recent 5K effort
const BEST_EFFORT_RACE_METERS: f64 = 5000.0;

// ============================================================================
// Heart Rate Zones
// ============================================================================

/// Algorithm used to produce heart rate zones
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeartRateZoneMethod {
    HeartRateReserve,
    ActualMaxHeartRate,
    EstimatedMaxHeartRate,
}

impl HeartRateZoneMethod {
    pub fn name(&self) -> &'static str {
        match self {
            HeartRateZoneMethod::HeartRateReserve => "Heart Rate Reserve (Karvonen Formula)",
            HeartRateZoneMethod::ActualMaxHeartRate => "Actual Maximum Heart Rate",
            HeartRateZoneMethod::EstimatedMaxHeartRate => "Estimated Maximum Heart Rate",
        }
    }
}

impl fmt::Display for HeartRateZoneMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Display descriptions for heart rate zones 1-5
pub const HR_ZONE_DESCRIPTIONS: [&str; NUM_HR_ZONES] = [
    "Very Light (Recovery)",
    "Light (Endurance)",
    "Moderate",
    "Hard (Speed Endurance)",
    "Maximum",
];

/// Five ascending heart rate boundaries in bpm
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeartRateZoneSet {
    pub boundaries: [f64; NUM_HR_ZONES],
    pub method: HeartRateZoneMethod,
}

impl HeartRateZoneSet {
    /// Maximum heart rate the zones were built from
    pub fn max_hr(&self) -> f64 {
        self.boundaries[NUM_HR_ZONES - 1]
    }

    /// Boundaries paired with their display descriptions
    pub fn described(&self) -> impl Iterator<Item = (f64, &'static str)> + '_ {
        self.boundaries
            .iter()
            .copied()
            .zip(HR_ZONE_DESCRIPTIONS.iter().copied())
    }
}

/// Estimate maximum heart rate from age
///
/// Oakland nonlinear formula: HRmax = 192 - 0.007 × age²
pub fn estimate_max_hr_from_age(age_years: f64) -> f64 {
    192.0 - 0.007 * (age_years * age_years)
}

fn zones_from_max(max_hr: f64) -> [f64; NUM_HR_ZONES] {
    let mut zones = [max_hr; NUM_HR_ZONES];
    for (zone, fraction) in zones.iter_mut().zip(HR_ZONE_FRACTIONS) {
        *zone = max_hr * fraction;
    }
    zones
}

fn zones_from_reserve(resting_hr: f64, max_hr: f64) -> [f64; NUM_HR_ZONES] {
    let reserve = max_hr - resting_hr;
    let mut zones = [max_hr; NUM_HR_ZONES];
    for (zone, fraction) in zones.iter_mut().zip(HR_ZONE_FRACTIONS) {
        *zone = reserve * fraction + resting_hr;
    }
    zones
}

/// Compute heart rate zones from whichever heart rate inputs are known
///
/// Heart rates at or below 1 bpm count as unknown. Fails with
/// [`CalculationError::MissingInput`] when neither maximum heart rate nor age
/// is available.
pub fn compute_heart_rate_zones(
    resting_hr: Option<f64>,
    max_hr: Option<f64>,
    age_years: Option<f64>,
) -> CalculationResult<HeartRateZoneSet> {
    let resting_hr = resting_hr
        .map(|bpm| ensure_finite("resting heart rate", bpm))
        .transpose()?
        .filter(|bpm| *bpm > HEART_RATE_FLOOR_BPM);
    let max_hr = max_hr
        .map(|bpm| ensure_finite("maximum heart rate", bpm))
        .transpose()?
        .filter(|bpm| *bpm > HEART_RATE_FLOOR_BPM);

    let zone_set = match (resting_hr, max_hr) {
        (Some(resting_hr), Some(max_hr)) => {
            if resting_hr >= max_hr {
                return Err(CalculationError::invalid(
                    "resting heart rate",
                    resting_hr,
                    "must be below the maximum heart rate",
                ));
            }
            HeartRateZoneSet {
                boundaries: zones_from_reserve(resting_hr, max_hr),
                method: HeartRateZoneMethod::HeartRateReserve,
            }
        }
        (_, Some(max_hr)) => HeartRateZoneSet {
            boundaries: zones_from_max(max_hr),
            method: HeartRateZoneMethod::ActualMaxHeartRate,
        },
        (_, None) => {
            let age_years = age_years.ok_or(CalculationError::MissingInput("age"))?;
            let age_years = ensure_finite("age", age_years)?;
            let estimated_max = estimate_max_hr_from_age(age_years);
            if estimated_max <= 0.0 {
                return Err(CalculationError::invalid(
                    "age",
                    age_years,
                    "gives a non-positive estimated maximum heart rate",
                ));
            }
            HeartRateZoneSet {
                boundaries: zones_from_max(estimated_max),
                method: HeartRateZoneMethod::EstimatedMaxHeartRate,
            }
        }
    };

    debug!(
        method = zone_set.method.name(),
        max_hr = zone_set.max_hr(),
        "Computed heart rate zones"
    );
    Ok(zone_set)
}

// ============================================================================
// Power Zones
// ============================================================================

/// Display names for power zones 1-6
pub const POWER_ZONE_DESCRIPTIONS: [&str; NUM_POWER_ZONES] = [
    "Active Recovery",
    "Endurance",
    "Tempo",
    "Lactate Threshold",
    "VO2 Max",
    "Anaerobic Capacity",
];

/// Six strictly ascending power boundaries in watts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerZoneSet {
    pub ftp_watts: f64,
    pub boundaries: [f64; NUM_POWER_ZONES],
}

impl PowerZoneSet {
    /// Boundaries paired with their display names
    pub fn described(&self) -> impl Iterator<Item = (f64, &'static str)> + '_ {
        self.boundaries
            .iter()
            .copied()
            .zip(POWER_ZONE_DESCRIPTIONS.iter().copied())
    }
}

/// Compute power zones from functional threshold power
pub fn compute_power_zones(ftp_watts: f64) -> CalculationResult<PowerZoneSet> {
    let ftp = ensure_positive("functional threshold power", ftp_watts)?;
    Ok(PowerZoneSet {
        ftp_watts: ftp,
        boundaries: POWER_ZONE_MULTIPLIERS.map(|multiplier| ftp * multiplier),
    })
}

// ============================================================================
// Training Pace Selection
// ============================================================================

/// Pick the pace method the inputs qualify for, in priority order
pub fn select_pace_method(inputs: &PhysiologicalInputs) -> Option<PaceMethod> {
    if inputs.qualifying_cooper_distance().is_some() {
        Some(PaceMethod::CooperTest)
    } else if inputs.qualifying_best_5k_duration().is_some() {
        Some(PaceMethod::BestRecent5K)
    } else if inputs.known_resting_hr().is_some() && inputs.known_max_hr().is_some() {
        Some(PaceMethod::HeartRate)
    } else if inputs.qualifying_vo2max().is_some() {
        Some(PaceMethod::Vo2Max)
    } else {
        None
    }
}

/// Compute training paces from the highest priority qualifying input
///
/// Returns an empty table with no method when nothing qualifies.
pub fn compute_training_paces(inputs: &PhysiologicalInputs) -> CalculationResult<TrainingPaceTable> {
    let Some(method) = select_pace_method(inputs) else {
        debug!("No qualifying input for training paces");
        return Ok(TrainingPaceTable::empty());
    };

    let table = match method {
        PaceMethod::CooperTest => {
            calculate_paces_from_cooper_test(inputs.cooper_distance_meters.unwrap_or_default())?
        }
        PaceMethod::BestRecent5K => calculate_paces_from_race(
            inputs.best_5k_duration_secs.unwrap_or_default(),
            BEST_EFFORT_RACE_METERS,
        )?,
        PaceMethod::HeartRate => calculate_paces_from_heart_rate_reserve(
            inputs.resting_hr.unwrap_or_default(),
            inputs.max_hr.unwrap_or_default(),
        )?,
        PaceMethod::Vo2Max => calculate_paces_from_vo2max(inputs.vo2max.unwrap_or_default())?,
    };

    debug!(method = method.name(), "Computed training paces");
    Ok(table.with_method(method))
}
