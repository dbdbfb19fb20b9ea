//! Readings entered directly in the configuration profile

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use training_zones_shared::{BestEfforts, FIVE_K_METERS};

use super::HealthDataSource;
use crate::config::ProfileConfig;
use crate::error::CliResult;

pub struct ProfileSource {
    profile: ProfileConfig,
}

impl ProfileSource {
    pub fn new(profile: ProfileConfig) -> Self {
        Self { profile }
    }
}

#[async_trait]
impl HealthDataSource for ProfileSource {
    fn name(&self) -> &str {
        "profile"
    }

    async fn age_years(&self, now: DateTime<Utc>) -> CliResult<Option<f64>> {
        Ok(self.profile.age_at(now))
    }

    async fn resting_hr(&self) -> CliResult<Option<f64>> {
        Ok(self.profile.resting_hr)
    }

    async fn max_hr(&self, _now: DateTime<Utc>) -> CliResult<Option<f64>> {
        Ok(self.profile.max_hr)
    }

    async fn vo2max(&self) -> CliResult<Option<f64>> {
        Ok(self.profile.vo2max)
    }

    async fn ftp_watts(&self) -> CliResult<Option<f64>> {
        Ok(self.profile.ftp_watts)
    }

    async fn best_efforts(&self, _now: DateTime<Utc>) -> CliResult<BestEfforts> {
        Ok(BestEfforts {
            best_5k_duration_secs: self.profile.best_5k_duration_secs,
            best_5k_pace_secs_per_meter: self
                .profile
                .best_5k_duration_secs
                .map(|secs| secs / FIVE_K_METERS),
            best_12_minute_distance_meters: self.profile.cooper_distance_meters,
        })
    }
}
