//! Error types for the training zones engine

use thiserror::Error;

/// Errors raised by the calculation engine
///
/// Missing pace inputs are not an error: they produce an empty
/// [`TrainingPaceTable`](crate::TrainingPaceTable) instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalculationError {
    #[error("Missing input: {0}")]
    MissingInput(&'static str),

    #[error("Invalid {field} ({value}): {reason}")]
    InvalidInput {
        field: &'static str,
        value: f64,
        reason: &'static str,
    },

    #[error("Validation error: {0}")]
    Validation(String),
}

impl CalculationError {
    pub(crate) fn invalid(field: &'static str, value: f64, reason: &'static str) -> Self {
        CalculationError::InvalidInput {
            field,
            value,
            reason,
        }
    }
}

/// Result alias for engine operations
pub type CalculationResult<T> = Result<T, CalculationError>;

/// Reject NaN and infinite inputs before they reach a formula
pub(crate) fn ensure_finite(field: &'static str, value: f64) -> CalculationResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CalculationError::invalid(field, value, "must be a finite number"))
    }
}

/// Require a strictly positive, finite value
pub(crate) fn ensure_positive(field: &'static str, value: f64) -> CalculationResult<f64> {
    let value = ensure_finite(field, value)?;
    if value > 0.0 {
        Ok(value)
    } else {
        Err(CalculationError::invalid(field, value, "must be greater than zero"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_positive() {
        assert_eq!(ensure_positive("ftp", 250.0), Ok(250.0));
        assert!(ensure_positive("ftp", 0.0).is_err());
        assert!(ensure_positive("ftp", -1.0).is_err());
        assert!(ensure_positive("ftp", f64::NAN).is_err());
        assert!(ensure_positive("ftp", f64::INFINITY).is_err());
    }

    #[test]
    fn test_error_messages() {
        let err = CalculationError::invalid("resting heart rate", 0.0, "must be greater than zero");
        assert_eq!(
            err.to_string(),
            "Invalid resting heart rate (0): must be greater than zero"
        );
        assert_eq!(
            CalculationError::MissingInput("age").to_string(),
            "Missing input: age"
        );
    }
}
