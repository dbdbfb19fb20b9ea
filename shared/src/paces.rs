//! Running training pace calculations
//!
//! Converts a VO2Max value into a table of training paces. Each pace
//! category runs at a fixed fraction of VO2Max (USATF Coaches Education
//! Program percentages), and the scaled oxygen uptake is then converted to a
//! running speed in meters per minute.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::errors::{ensure_finite, CalculationResult};
use crate::vo2max::{
    estimate_vo2max_from_cooper_test, estimate_vo2max_from_heart_rate_reserve,
    estimate_vo2max_from_race,
};

// ============================================================================
// Pace Categories
// ============================================================================

/// Named training pace
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaceCategory {
    LongRun,
    EasyRun,
    Marathon,
    TempoRun,
    FunctionalThreshold,
    SpeedSession,
    ShortInterval,
}

impl PaceCategory {
    /// Every category, slowest first
    pub const ALL: [PaceCategory; 7] = [
        PaceCategory::LongRun,
        PaceCategory::EasyRun,
        PaceCategory::Marathon,
        PaceCategory::TempoRun,
        PaceCategory::FunctionalThreshold,
        PaceCategory::SpeedSession,
        PaceCategory::ShortInterval,
    ];

    /// Fraction of VO2Max this pace is run at
    ///
    /// Reference ranges: 800m 120-136%, 1500m 110-112%, 3000m 100-102%,
    /// 5000m 97-100%, 10000m 88-92%, half marathon 85-88%, marathon 82-85%.
    pub fn vo2max_fraction(&self) -> f64 {
        match self {
            PaceCategory::LongRun => 0.60,
            PaceCategory::EasyRun => 0.70,
            PaceCategory::Marathon => 0.82,
            PaceCategory::TempoRun => 0.88,
            PaceCategory::FunctionalThreshold => 0.90,
            PaceCategory::SpeedSession => 1.10,
            PaceCategory::ShortInterval => 1.15,
        }
    }

    /// Get a human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            PaceCategory::LongRun => "Long Run Pace",
            PaceCategory::EasyRun => "Easy Run Pace",
            PaceCategory::Marathon => "Marathon Pace",
            PaceCategory::TempoRun => "Tempo Run Pace",
            PaceCategory::FunctionalThreshold => "Functional Threshold Pace",
            PaceCategory::SpeedSession => "Speed Session Pace",
            PaceCategory::ShortInterval => "Short Interval Run Pace",
        }
    }

    /// Get a short description of what the pace is for
    pub fn description(&self) -> &'static str {
        match self {
            PaceCategory::LongRun => "Steady long distance runs",
            PaceCategory::EasyRun => "Recovery and general aerobic runs",
            PaceCategory::Marathon => "Goal marathon race pace",
            PaceCategory::TempoRun => "Comfortably hard sustained efforts",
            PaceCategory::FunctionalThreshold => "Pace that could be held for one hour at max effort",
            PaceCategory::SpeedSession => "Medium distance intervals",
            PaceCategory::ShortInterval => "Short track intervals",
        }
    }
}

impl fmt::Display for PaceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

// ============================================================================
// Pace Methods
// ============================================================================

/// Input the pace table was derived from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaceMethod {
    CooperTest,
    BestRecent5K,
    HeartRate,
    Vo2Max,
}

impl PaceMethod {
    pub fn name(&self) -> &'static str {
        match self {
            PaceMethod::CooperTest => "Cooper Test",
            PaceMethod::BestRecent5K => "Best Recent 5K",
            PaceMethod::HeartRate => "Heart Rate",
            PaceMethod::Vo2Max => "VO2 Max",
        }
    }
}

impl fmt::Display for PaceMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

// ============================================================================
// Pace Table
// ============================================================================

/// Training paces as speeds in meters per minute
///
/// Either empty with no method (insufficient data) or fully populated with
/// all seven categories and the method that produced them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrainingPaceTable {
    pub paces: BTreeMap<PaceCategory, f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<PaceMethod>,
}

impl TrainingPaceTable {
    /// Table signalling that no qualifying input was available
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.paces.is_empty()
    }

    /// Speed for a category in meters per minute
    pub fn speed(&self, category: PaceCategory) -> Option<f64> {
        self.paces.get(&category).copied()
    }

    /// Iterate categories slowest first
    pub fn iter(&self) -> impl Iterator<Item = (PaceCategory, f64)> + '_ {
        self.paces.iter().map(|(category, speed)| (*category, *speed))
    }

    pub(crate) fn with_method(mut self, method: PaceMethod) -> Self {
        self.method = Some(method);
        self
    }
}

// ============================================================================
// Calculations
// ============================================================================

/// Convert an oxygen uptake (ml/kg/min) into running speed (m/min)
///
/// Formula: speed = 29.54 + 5.000663x - 0.007546x²
pub fn speed_from_vo2(vo2: f64) -> f64 {
    29.54 + 5.000663 * vo2 - 0.007546 * vo2 * vo2
}

/// Calculate every training pace from a VO2Max value
///
/// The returned table has no method set; [`compute_training_paces`](crate::compute_training_paces)
/// records which input the VO2Max came from.
pub fn calculate_paces_from_vo2max(vo2max: f64) -> CalculationResult<TrainingPaceTable> {
    let vo2max = ensure_finite("VO2Max", vo2max)?;

    let paces = PaceCategory::ALL
        .iter()
        .map(|category| {
            let pace_vo2 = vo2max * category.vo2max_fraction();
            (*category, speed_from_vo2(pace_vo2))
        })
        .collect();

    Ok(TrainingPaceTable {
        paces,
        method: None,
    })
}

/// Calculate training paces from a Cooper test distance in meters
pub fn calculate_paces_from_cooper_test(distance_meters: f64) -> CalculationResult<TrainingPaceTable> {
    let vo2max = estimate_vo2max_from_cooper_test(distance_meters)?;
    calculate_paces_from_vo2max(vo2max)
}

/// Calculate training paces from a race duration and distance
pub fn calculate_paces_from_race(
    duration_seconds: f64,
    distance_meters: f64,
) -> CalculationResult<TrainingPaceTable> {
    let vo2max = estimate_vo2max_from_race(distance_meters, duration_seconds)?;
    calculate_paces_from_vo2max(vo2max)
}

/// Calculate training paces from resting and maximum heart rate
pub fn calculate_paces_from_heart_rate_reserve(
    resting_hr: f64,
    max_hr: f64,
) -> CalculationResult<TrainingPaceTable> {
    let vo2max = estimate_vo2max_from_heart_rate_reserve(max_hr, resting_hr)?;
    calculate_paces_from_vo2max(vo2max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    #[test]
    fn test_speed_conversion() {
        // x = 30 -> 29.54 + 150.01989 - 6.7914 = 172.76849
        assert!((speed_from_vo2(30.0) - 172.76849).abs() < 1e-6);
    }

    #[test]
    fn test_table_from_vo2max_has_every_category() {
        let table = calculate_paces_from_vo2max(50.0).unwrap();
        assert_eq!(table.paces.len(), PaceCategory::ALL.len());
        assert!(table.method.is_none());
        for category in PaceCategory::ALL {
            let expected = speed_from_vo2(50.0 * category.vo2max_fraction());
            assert_eq!(table.speed(category), Some(expected));
        }
    }

    #[rstest]
    #[case(PaceCategory::LongRun, 0.60)]
    #[case(PaceCategory::EasyRun, 0.70)]
    #[case(PaceCategory::Marathon, 0.82)]
    #[case(PaceCategory::TempoRun, 0.88)]
    #[case(PaceCategory::FunctionalThreshold, 0.90)]
    #[case(PaceCategory::SpeedSession, 1.10)]
    #[case(PaceCategory::ShortInterval, 1.15)]
    fn test_vo2max_fractions(#[case] category: PaceCategory, #[case] fraction: f64) {
        assert_eq!(category.vo2max_fraction(), fraction);
    }

    #[test]
    fn test_paces_from_cooper_test_match_direct_vo2max() {
        let via_cooper = calculate_paces_from_cooper_test(2800.0).unwrap();
        let direct = calculate_paces_from_vo2max(22.351 * 2.8 - 11.288).unwrap();
        assert_eq!(via_cooper, direct);
    }

    #[test]
    fn test_paces_from_heart_rate_reserve() {
        let table = calculate_paces_from_heart_rate_reserve(49.0, 188.0).unwrap();
        let direct = calculate_paces_from_vo2max(15.3 * (188.0 / 49.0)).unwrap();
        assert_eq!(table, direct);
        assert!(calculate_paces_from_heart_rate_reserve(0.0, 188.0).is_err());
    }

    #[test]
    fn test_paces_from_race_rejects_zero_duration() {
        assert!(calculate_paces_from_race(0.0, 5000.0).is_err());
    }

    #[test]
    fn test_category_labels() {
        assert_eq!(PaceCategory::FunctionalThreshold.to_string(), "Functional Threshold Pace");
        assert_eq!(PaceMethod::BestRecent5K.to_string(), "Best Recent 5K");
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Property: harder categories are faster for realistic VO2Max values
        #[test]
        fn prop_paces_ordered(vo2max in 25.0f64..85.0) {
            let table = calculate_paces_from_vo2max(vo2max).unwrap();
            let speeds: Vec<f64> = table.iter().map(|(_, speed)| speed).collect();
            for pair in speeds.windows(2) {
                prop_assert!(pair[1] > pair[0], "speeds not ascending: {:?}", speeds);
            }
        }
    }
}
