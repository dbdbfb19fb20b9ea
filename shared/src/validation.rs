//! Input validation functions
//!
//! Range checks come from the `validator` derive on
//! [`PhysiologicalInputs`]; cross-field checks are written by hand.

use validator::{Validate, ValidationErrors};

use crate::errors::{CalculationError, CalculationResult};
use crate::inputs::PhysiologicalInputs;

/// Validate a set of inputs before handing them to the calculations
pub fn validate_inputs(inputs: &PhysiologicalInputs) -> CalculationResult<()> {
    inputs
        .validate()
        .map_err(|errors| CalculationError::Validation(describe_errors(&errors)))?;

    for (field, value) in [
        ("resting_hr", inputs.resting_hr),
        ("max_hr", inputs.max_hr),
        ("age_years", inputs.age_years),
        ("vo2max", inputs.vo2max),
        ("ftp_watts", inputs.ftp_watts),
        ("best_5k_duration_secs", inputs.best_5k_duration_secs),
        ("cooper_distance_meters", inputs.cooper_distance_meters),
    ] {
        if value.is_some_and(|v| !v.is_finite()) {
            return Err(CalculationError::Validation(format!(
                "{} must be a valid number",
                get_field_display_label(field)
            )));
        }
    }

    if let (Some(resting), Some(max)) = (inputs.known_resting_hr(), inputs.known_max_hr()) {
        if resting >= max {
            return Err(CalculationError::Validation(
                "Resting Heart Rate must be below Maximum Heart Rate".to_string(),
            ));
        }
    }

    Ok(())
}

fn describe_errors(errors: &ValidationErrors) -> String {
    let mut fields: Vec<String> = errors
        .field_errors()
        .keys()
        .map(|field| get_field_display_label(field).to_string())
        .collect();
    fields.sort_unstable();
    format!("Value out of range: {}", fields.join(", "))
}

/// Map input field names to display labels
pub fn get_field_display_label(field_name: &str) -> &str {
    match field_name {
        "resting_hr" => "Resting Heart Rate",
        "max_hr" => "Maximum Heart Rate",
        "age_years" => "Age",
        "vo2max" => "VO2 Max",
        "ftp_watts" => "Functional Threshold Power",
        "best_5k_duration_secs" => "Best Recent 5K Duration",
        "cooper_distance_meters" => "Best Recent 12 Minute Distance",
        _ => field_name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_inputs() {
        let inputs = PhysiologicalInputs::new()
            .with_resting_hr(49.0)
            .with_max_hr(188.0)
            .with_age_years(49.5)
            .with_ftp_watts(220.0);
        assert!(validate_inputs(&inputs).is_ok());
        assert!(validate_inputs(&PhysiologicalInputs::new()).is_ok());
    }

    #[test]
    fn test_out_of_range_heart_rate() {
        let inputs = PhysiologicalInputs::new().with_max_hr(450.0);
        let err = validate_inputs(&inputs).unwrap_err();
        assert_eq!(
            err,
            CalculationError::Validation("Value out of range: Maximum Heart Rate".to_string())
        );
    }

    #[test]
    fn test_non_finite_value() {
        let inputs = PhysiologicalInputs::new().with_vo2max(f64::NAN);
        assert!(validate_inputs(&inputs).is_err());
    }

    #[test]
    fn test_resting_must_be_below_max() {
        let inputs = PhysiologicalInputs::new().with_resting_hr(80.0).with_max_hr(75.0);
        assert!(validate_inputs(&inputs).is_err());
    }

    #[test]
    fn test_field_labels() {
        assert_eq!(get_field_display_label("ftp_watts"), "Functional Threshold Power");
        assert_eq!(get_field_display_label("unknown"), "unknown");
    }
}
