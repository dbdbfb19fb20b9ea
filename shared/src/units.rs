//! Unit system and pace formatting
//!
//! All calculations work in SI units: meters, seconds, meters per minute.
//! The user's unit system only affects how speeds and paces are displayed.

use serde::{Deserialize, Serialize};
use std::fmt;

pub const METERS_PER_KM: f64 = 1000.0;
pub const METERS_PER_MILE: f64 = 1609.34;

const SECS_PER_DAY: i64 = 86400;
const SECS_PER_HOUR: i64 = 3600;
const SECS_PER_MIN: i64 = 60;

// ============================================================================
// Unit System
// ============================================================================

/// Display unit preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    #[default]
    Metric,
    Imperial,
}

impl UnitSystem {
    /// Meters in this system's pace distance (km or mile)
    pub fn pace_distance_meters(&self) -> f64 {
        match self {
            UnitSystem::Metric => METERS_PER_KM,
            UnitSystem::Imperial => METERS_PER_MILE,
        }
    }

    /// Get the pace unit label
    pub fn pace_label(&self) -> &'static str {
        match self {
            UnitSystem::Metric => "min/km",
            UnitSystem::Imperial => "min/mile",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            UnitSystem::Metric => "Metric",
            UnitSystem::Imperial => "Imperial",
        }
    }
}

impl fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for UnitSystem {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "metric" | "si" | "km" => Ok(UnitSystem::Metric),
            "imperial" | "us" | "mi" | "miles" => Ok(UnitSystem::Imperial),
            _ => Err(format!("Unknown unit system: {}", s)),
        }
    }
}

// ============================================================================
// Formatting
// ============================================================================

/// Format whole seconds as MM:SS, HH:MM:SS or DD:HH:MM:SS
///
/// Fractional seconds are truncated.
pub fn format_hhmmss(num_seconds: f64) -> String {
    let mut remaining = num_seconds as i64;

    let days = remaining / SECS_PER_DAY;
    remaining -= days * SECS_PER_DAY;
    let hours = remaining / SECS_PER_HOUR;
    remaining -= hours * SECS_PER_HOUR;
    let minutes = remaining / SECS_PER_MIN;
    let seconds = remaining % SECS_PER_MIN;

    if days > 0 {
        format!("{:02}:{:02}:{:02}:{:02}", days, hours, minutes, seconds)
    } else if hours > 0 {
        format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
    } else {
        format!("{:02}:{:02}", minutes, seconds)
    }
}

/// Convert a speed in meters per minute to a pace string such as "04:30 min/km"
///
/// Non-positive speeds are returned as the raw number.
pub fn speed_to_pace_string(speed_meters_per_min: f64, units: UnitSystem) -> String {
    if speed_meters_per_min > 0.0 {
        let secs_per_unit = 60.0 / (speed_meters_per_min / units.pace_distance_meters());
        format!("{} {}", format_hhmmss(secs_per_unit), units.pace_label())
    } else {
        speed_meters_per_min.to_string()
    }
}

/// Convert a pace in seconds per meter to a pace string
///
/// Non-positive paces are returned as the raw number.
pub fn pace_to_display_string(pace_secs_per_meter: f64, units: UnitSystem) -> String {
    if pace_secs_per_meter > 0.0 {
        let secs_per_unit = pace_secs_per_meter * units.pace_distance_meters();
        format!("{} {}", format_hhmmss(secs_per_unit), units.pace_label())
    } else {
        pace_secs_per_meter.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0.0, "00:00")]
    #[case(59.9, "00:59")]
    #[case(270.0, "04:30")]
    #[case(3725.0, "01:02:05")]
    #[case(90061.0, "01:01:01:01")]
    fn test_format_hhmmss(#[case] seconds: f64, #[case] expected: &str) {
        assert_eq!(format_hhmmss(seconds), expected);
    }

    #[test]
    fn test_speed_to_pace_metric() {
        // 250 m/min -> 240 s/km
        assert_eq!(speed_to_pace_string(250.0, UnitSystem::Metric), "04:00 min/km");
    }

    #[test]
    fn test_speed_to_pace_imperial() {
        // 250 m/min -> 386.2 s/mile
        assert_eq!(speed_to_pace_string(250.0, UnitSystem::Imperial), "06:26 min/mile");
    }

    #[test]
    fn test_non_positive_speed_is_raw() {
        assert_eq!(speed_to_pace_string(0.0, UnitSystem::Metric), "0");
    }

    #[test]
    fn test_pace_to_display_string() {
        assert_eq!(pace_to_display_string(0.25, UnitSystem::Metric), "04:10 min/km");
        assert_eq!(pace_to_display_string(-1.0, UnitSystem::Imperial), "-1");
    }

    #[test]
    fn test_unit_system_parsing() {
        assert_eq!("Metric".parse::<UnitSystem>(), Ok(UnitSystem::Metric));
        assert_eq!("imperial".parse::<UnitSystem>(), Ok(UnitSystem::Imperial));
        assert!("furlongs".parse::<UnitSystem>().is_err());
        assert_eq!(UnitSystem::default(), UnitSystem::Metric);
        assert_eq!(UnitSystem::Imperial.to_string(), "Imperial");
    }
}
