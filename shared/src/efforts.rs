//! Recent effort detection
//!
//! Scans a workout and heart rate history for the readings the zone
//! calculations need: best recent 5K-or-longer effort, best ~12 minute
//! effort (Cooper test), highest recent heart rate, latest resting heart
//! rate, and age from a date of birth.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Default window for best effort searches (26 weeks)
pub const DEFAULT_EFFORT_LOOKBACK_DAYS: i64 = 7 * 26;

/// Default window for maximum heart rate searches
pub const DEFAULT_MAX_HR_LOOKBACK_DAYS: i64 = 365;

/// Minimum distance for a best 5K effort
pub const FIVE_K_METERS: f64 = 5000.0;

/// Shortest effort accepted as a Cooper test (12:00)
pub const COOPER_MIN_SECS: f64 = 12.0 * 60.0;

/// Longest effort accepted as a Cooper test (12:10)
pub const COOPER_MAX_SECS: f64 = 12.0 * 60.0 + 10.0;

const SECS_PER_YEAR: f64 = 365.25 * 24.0 * 60.0 * 60.0;

/// Completed running workout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workout {
    pub start: DateTime<Utc>,
    pub duration_secs: f64,
    pub distance_meters: Option<f64>,
}

impl Workout {
    /// Pace in seconds per meter, when a usable distance and duration were recorded
    pub fn pace_secs_per_meter(&self) -> Option<f64> {
        if !(self.duration_secs.is_finite() && self.duration_secs > 0.0) {
            return None;
        }
        self.distance_meters
            .filter(|meters| meters.is_finite() && *meters > 0.0)
            .map(|meters| self.duration_secs / meters)
    }
}

/// Kind of heart rate reading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum HeartRateKind {
    Resting,
    #[default]
    Sample,
}

/// Timestamped heart rate reading
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeartRateSample {
    pub recorded_at: DateTime<Utc>,
    pub bpm: f64,
    #[serde(default)]
    pub kind: HeartRateKind,
}

/// Best recent efforts found in a workout history
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BestEfforts {
    /// Duration of the fastest 5K-or-longer workout, in seconds
    pub best_5k_duration_secs: Option<f64>,
    /// Pace of that workout, in seconds per meter
    pub best_5k_pace_secs_per_meter: Option<f64>,
    /// Longest distance covered in a 12:00 to 12:10 workout, in meters
    pub best_12_minute_distance_meters: Option<f64>,
}

/// Find the best 5K and Cooper test efforts started within `lookback` of `now`
///
/// The best 5K is the fastest pace among workouts of at least 5000m; the
/// reported duration is that workout's full duration.
pub fn find_best_recent_efforts(
    workouts: &[Workout],
    now: DateTime<Utc>,
    lookback: Duration,
) -> BestEfforts {
    let cutoff = now - lookback;
    let mut best = BestEfforts::default();

    for workout in workouts.iter().filter(|w| w.start >= cutoff) {
        let (Some(distance), Some(pace)) = (workout.distance_meters, workout.pace_secs_per_meter()) else {
            continue;
        };

        if distance >= FIVE_K_METERS
            && best
                .best_5k_pace_secs_per_meter
                .map_or(true, |best_pace| pace <= best_pace)
        {
            best.best_5k_pace_secs_per_meter = Some(pace);
            best.best_5k_duration_secs = Some(workout.duration_secs);
        }

        if (COOPER_MIN_SECS..=COOPER_MAX_SECS).contains(&workout.duration_secs)
            && best
                .best_12_minute_distance_meters
                .map_or(true, |best_distance| distance >= best_distance)
        {
            best.best_12_minute_distance_meters = Some(distance);
        }
    }

    best
}

/// Highest heart rate reading recorded within `lookback` of `now`
pub fn estimate_max_heart_rate(
    samples: &[HeartRateSample],
    now: DateTime<Utc>,
    lookback: Duration,
) -> Option<f64> {
    let cutoff = now - lookback;
    samples
        .iter()
        .filter(|s| s.recorded_at >= cutoff && s.bpm.is_finite())
        .map(|s| s.bpm)
        .reduce(f64::max)
}

/// Most recent resting heart rate reading
pub fn latest_resting_heart_rate(samples: &[HeartRateSample]) -> Option<f64> {
    samples
        .iter()
        .filter(|s| s.kind == HeartRateKind::Resting && s.bpm.is_finite())
        .max_by_key(|s| s.recorded_at)
        .map(|s| s.bpm)
}

/// Fractional age in years at `now`
pub fn age_in_years(date_of_birth: NaiveDate, now: DateTime<Utc>) -> Option<f64> {
    let born = date_of_birth.and_hms_opt(0, 0, 0)?.and_utc();
    if born > now {
        return None;
    }
    let elapsed_secs = (now - born).num_seconds() as f64;
    Some(elapsed_secs / SECS_PER_YEAR)
}
