//! Common test utilities for integration tests
//!
//! Writes health data exports into a temporary directory and builds a
//! configuration pointing at them.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use clap::Parser;
use std::path::PathBuf;
use tempfile::TempDir;
use training_zones_cli::{args::Cli, commands, config::AppConfig, error::CliResult};

pub const WORKOUTS_CSV: &str = "\
start,duration_secs,distance_meters,activity
2024-05-20T07:00:00Z,1250,5000,running
2024-05-10T07:00:00Z,725,2800,running
2024-05-12T07:00:00Z,3600,,running
2024-05-14T07:00:00Z,1200,12000,cycling
2023-05-01T07:00:00Z,1100,5000,running
";

pub const HEART_RATE_CSV: &str = "\
recorded_at,bpm,kind
2024-05-01T06:00:00Z,52,resting
2024-05-30T06:00:00Z,49,resting
2024-03-01T18:00:00Z,188,sample
2024-04-01T18:00:00Z,171,sample
2022-04-10T18:00:00Z,199,sample
";

/// Fixed clock for every test
pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
}

/// Exports written to a temporary directory
pub struct TestData {
    pub dir: TempDir,
    pub workouts: PathBuf,
    pub heart_rate: PathBuf,
}

impl TestData {
    pub fn new() -> Self {
        Self::with_contents(WORKOUTS_CSV, HEART_RATE_CSV)
    }

    pub fn with_contents(workouts: &str, heart_rate: &str) -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let workouts_path = dir.path().join("workouts.csv");
        let heart_rate_path = dir.path().join("heart_rate.csv");
        std::fs::write(&workouts_path, workouts).expect("Failed to write workouts");
        std::fs::write(&heart_rate_path, heart_rate).expect("Failed to write heart rate");
        Self {
            dir,
            workouts: workouts_path,
            heart_rate: heart_rate_path,
        }
    }

    /// Configuration reading both exports, with a birth date and FTP in the profile
    pub fn config(&self) -> AppConfig {
        let mut config = AppConfig::default();
        config.data.workouts_csv = Some(self.workouts.clone());
        config.data.heart_rate_csv = Some(self.heart_rate.clone());
        config.profile.date_of_birth = NaiveDate::from_ymd_opt(1974, 12, 1);
        config.profile.ftp_watts = Some(220.0);
        config
    }
}

/// Parse `args` as a command line and run it
pub async fn run(args: &[&str], config: AppConfig) -> CliResult<String> {
    let mut argv = vec!["training-zones"];
    argv.extend_from_slice(args);
    let cli = Cli::try_parse_from(argv).expect("Failed to parse arguments");
    commands::run(cli, config, now()).await
}
