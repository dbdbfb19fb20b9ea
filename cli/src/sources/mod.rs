//! Health data sources
//!
//! A source answers independent questions about the athlete. Any reading a
//! source does not have is `Ok(None)`; errors are reserved for data that
//! exists but cannot be read.

pub mod exports;
pub mod profile;

pub use exports::CsvExportSource;
pub use profile::ProfileSource;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use training_zones_shared::BestEfforts;

use crate::error::CliResult;

#[async_trait]
pub trait HealthDataSource: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &str;

    async fn age_years(&self, _now: DateTime<Utc>) -> CliResult<Option<f64>> {
        Ok(None)
    }

    async fn resting_hr(&self) -> CliResult<Option<f64>> {
        Ok(None)
    }

    async fn max_hr(&self, _now: DateTime<Utc>) -> CliResult<Option<f64>> {
        Ok(None)
    }

    async fn vo2max(&self) -> CliResult<Option<f64>> {
        Ok(None)
    }

    async fn ftp_watts(&self) -> CliResult<Option<f64>> {
        Ok(None)
    }

    async fn best_efforts(&self, _now: DateTime<Utc>) -> CliResult<BestEfforts> {
        Ok(BestEfforts::default())
    }
}
