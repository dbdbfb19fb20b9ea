//! Physiological inputs for zone and pace calculations

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Heart rates at or below this are treated as "not measured"
pub const HEART_RATE_FLOOR_BPM: f64 = 1.0;

/// Cooper test distances at or below this do not qualify
pub const COOPER_DISTANCE_FLOOR_METERS: f64 = 100.0;

/// Best 5K durations at or below this (10 minutes) do not qualify
pub const BEST_5K_DURATION_FLOOR_SECS: f64 = 600.0;

/// Scalar readings supplied by a data source
///
/// Every field is independently optional. Plausibility ranges are checked by
/// [`validate_inputs`](crate::validate_inputs); the calculations themselves only
/// reject values that would break their arithmetic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct PhysiologicalInputs {
    /// Resting heart rate in beats per minute
    #[validate(range(min = 0.0, max = 300.0))]
    pub resting_hr: Option<f64>,
    /// Maximum heart rate in beats per minute
    #[validate(range(min = 0.0, max = 300.0))]
    pub max_hr: Option<f64>,
    /// Age in years
    #[validate(range(min = 0.0, max = 150.0))]
    pub age_years: Option<f64>,
    /// VO2Max in ml/kg/min
    #[validate(range(min = 0.0, max = 100.0))]
    pub vo2max: Option<f64>,
    /// Cycling functional threshold power in watts
    #[validate(range(min = 0.0, max = 3000.0))]
    pub ftp_watts: Option<f64>,
    /// Duration of the best recent 5K-or-longer effort, in seconds
    #[validate(range(min = 0.0, max = 86400.0))]
    pub best_5k_duration_secs: Option<f64>,
    /// Distance of the best recent ~12 minute effort, in meters
    #[validate(range(min = 0.0, max = 50000.0))]
    pub cooper_distance_meters: Option<f64>,
}

impl PhysiologicalInputs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_resting_hr(mut self, bpm: f64) -> Self {
        self.resting_hr = Some(bpm);
        self
    }

    pub fn with_max_hr(mut self, bpm: f64) -> Self {
        self.max_hr = Some(bpm);
        self
    }

    pub fn with_age_years(mut self, years: f64) -> Self {
        self.age_years = Some(years);
        self
    }

    pub fn with_vo2max(mut self, vo2max: f64) -> Self {
        self.vo2max = Some(vo2max);
        self
    }

    pub fn with_ftp_watts(mut self, watts: f64) -> Self {
        self.ftp_watts = Some(watts);
        self
    }

    pub fn with_best_5k_duration_secs(mut self, secs: f64) -> Self {
        self.best_5k_duration_secs = Some(secs);
        self
    }

    pub fn with_cooper_distance_meters(mut self, meters: f64) -> Self {
        self.cooper_distance_meters = Some(meters);
        self
    }

    /// Fill any unset field from `other`
    pub fn or(self, other: PhysiologicalInputs) -> Self {
        Self {
            resting_hr: self.resting_hr.or(other.resting_hr),
            max_hr: self.max_hr.or(other.max_hr),
            age_years: self.age_years.or(other.age_years),
            vo2max: self.vo2max.or(other.vo2max),
            ftp_watts: self.ftp_watts.or(other.ftp_watts),
            best_5k_duration_secs: self.best_5k_duration_secs.or(other.best_5k_duration_secs),
            cooper_distance_meters: self.cooper_distance_meters.or(other.cooper_distance_meters),
        }
    }

    /// Only the values a calculation would use; placeholders become unset
    pub fn usable(&self) -> Self {
        Self {
            resting_hr: self.known_resting_hr(),
            max_hr: self.known_max_hr(),
            age_years: self.age_years,
            vo2max: self.qualifying_vo2max(),
            ftp_watts: self.ftp_watts.filter(|ftp| *ftp > 0.0),
            best_5k_duration_secs: self.qualifying_best_5k_duration(),
            cooper_distance_meters: self.qualifying_cooper_distance(),
        }
    }

    /// Resting heart rate, if measured
    pub fn known_resting_hr(&self) -> Option<f64> {
        self.resting_hr.filter(|bpm| *bpm > HEART_RATE_FLOOR_BPM)
    }

    /// Maximum heart rate, if measured
    pub fn known_max_hr(&self) -> Option<f64> {
        self.max_hr.filter(|bpm| *bpm > HEART_RATE_FLOOR_BPM)
    }

    /// Cooper distance, if it qualifies for pace estimation
    pub fn qualifying_cooper_distance(&self) -> Option<f64> {
        self.cooper_distance_meters
            .filter(|meters| *meters > COOPER_DISTANCE_FLOOR_METERS)
    }

    /// Best 5K duration, if it qualifies for pace estimation
    pub fn qualifying_best_5k_duration(&self) -> Option<f64> {
        self.best_5k_duration_secs
            .filter(|secs| *secs > BEST_5K_DURATION_FLOOR_SECS)
    }

    /// VO2Max, if it qualifies for pace estimation
    pub fn qualifying_vo2max(&self) -> Option<f64> {
        self.vo2max.filter(|vo2max| *vo2max > 0.0)
    }

    /// Whether heart rate zones can be computed
    ///
    /// True when a maximum heart rate was measured or age is known.
    pub fn has_hr_data(&self) -> bool {
        self.known_max_hr().is_some() || self.age_years.is_some()
    }

    /// Whether power zones can be computed
    pub fn has_power_data(&self) -> bool {
        self.ftp_watts.is_some_and(|ftp| ftp > 0.0)
    }

    /// Whether any pace estimation method qualifies
    pub fn has_run_data(&self) -> bool {
        self.qualifying_cooper_distance().is_some()
            || self.qualifying_best_5k_duration().is_some()
            || (self.known_resting_hr().is_some() && self.known_max_hr().is_some())
            || self.qualifying_vo2max().is_some()
    }
}
