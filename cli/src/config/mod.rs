//! Configuration management for the training zones CLI
//!
//! Configuration is loaded hierarchically:
//! 1. Default values (in code)
//! 2. TOML config files (config/development.toml or config/production.toml)
//! 3. Environment variables (prefix: TZONES__)

use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use training_zones_shared::{
    age_in_years, PhysiologicalInputs, UnitSystem, DEFAULT_EFFORT_LOOKBACK_DAYS,
    DEFAULT_MAX_HR_LOOKBACK_DAYS,
};

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub profile: ProfileConfig,
    #[serde(default)]
    pub data: DataConfig,
}

/// Display preferences
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default)]
    pub units: UnitSystem,
}

/// Values entered by the athlete; these win over anything read from exports
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileConfig {
    pub date_of_birth: Option<NaiveDate>,
    pub age_years: Option<f64>,
    pub resting_hr: Option<f64>,
    pub max_hr: Option<f64>,
    pub vo2max: Option<f64>,
    pub ftp_watts: Option<f64>,
    pub best_5k_duration_secs: Option<f64>,
    pub cooper_distance_meters: Option<f64>,
}

impl ProfileConfig {
    /// Age at `now`; an explicit age wins over one derived from the birth date
    pub fn age_at(&self, now: DateTime<Utc>) -> Option<f64> {
        self.age_years
            .or_else(|| self.date_of_birth.and_then(|dob| age_in_years(dob, now)))
    }

    /// Profile values as calculation inputs
    pub fn to_inputs(&self, now: DateTime<Utc>) -> PhysiologicalInputs {
        PhysiologicalInputs {
            resting_hr: self.resting_hr,
            max_hr: self.max_hr,
            age_years: self.age_at(now),
            vo2max: self.vo2max,
            ftp_watts: self.ftp_watts,
            best_5k_duration_secs: self.best_5k_duration_secs,
            cooper_distance_meters: self.cooper_distance_meters,
        }
    }
}

/// Local data exports and gathering policy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// CSV export of running workouts
    pub workouts_csv: Option<PathBuf>,
    /// CSV export of heart rate readings
    pub heart_rate_csv: Option<PathBuf>,
    /// How far back to look for best efforts
    pub effort_lookback_days: i64,
    /// How far back to look for the highest heart rate
    pub max_hr_lookback_days: i64,
    /// Give up gathering after this many seconds
    pub fetch_timeout_secs: u64,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            workouts_csv: None,
            heart_rate_csv: None,
            effort_lookback_days: DEFAULT_EFFORT_LOOKBACK_DAYS,
            max_hr_lookback_days: DEFAULT_MAX_HR_LOOKBACK_DAYS,
            fetch_timeout_secs: 10,
        }
    }
}

impl AppConfig {
    /// Load configuration from files and environment
    ///
    /// Loading order (later sources override earlier):
    /// 1. Default values
    /// 2. Config file based on RUST_ENV (development.toml or production.toml)
    /// 3. Environment variables with TZONES__ prefix
    pub fn load() -> Result<Self> {
        let env = env::var("RUST_ENV").unwrap_or_else(|_| "development".to_string());
        let config_file = format!("config/{}.toml", env);
        Self::load_from(&config_file)
    }

    /// Load configuration using an explicit config file path
    pub fn load_from(config_file: &str) -> Result<Self> {
        let config = config::Config::builder()
            // Start with defaults
            .add_source(config::Config::try_from(&AppConfig::default())?)
            // Load from environment-specific config file
            .add_source(
                config::File::with_name(config_file)
                    .required(false)
            )
            // Override with environment variables (TZONES__ prefix)
            // e.g., TZONES__DISPLAY__UNITS=imperial sets display.units
            .add_source(
                config::Environment::with_prefix("TZONES")
                    .prefix_separator("__")
                    .separator("__")
            )
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// Check if running in production mode
    pub fn is_production() -> bool {
        env::var("RUST_ENV")
            .map(|v| v == "production")
            .unwrap_or(false)
    }
}
