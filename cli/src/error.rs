//! CLI error handling

use std::path::PathBuf;
use thiserror::Error;
use training_zones_shared::CalculationError;

/// Errors surfaced by the CLI layer
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Calculation error: {0}")]
    Calculation(#[from] CalculationError),

    #[error("Could not read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed CSV in {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Timed out after {0} seconds gathering health data")]
    Timeout(u64),

    #[error("Data source task failed: {0}")]
    Task(String),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for CLI operations
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calculation_error_converts() {
        let error: CliError = CalculationError::MissingInput("age").into();
        assert_eq!(error.to_string(), "Calculation error: Missing input: age");
    }

    #[test]
    fn test_timeout_message() {
        assert_eq!(
            CliError::Timeout(10).to_string(),
            "Timed out after 10 seconds gathering health data"
        );
    }
}
