//! Command dispatch
//!
//! Every command returns the text to print. Values given on the command line
//! take precedence over the configured profile.

use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use training_zones_shared::{
    compute_heart_rate_zones, compute_power_zones, compute_training_paces,
    estimate_vo2max_from_cooper_test, estimate_vo2max_from_cooper_test_miles,
    estimate_vo2max_from_heart_rate_reserve, estimate_vo2max_from_race,
    estimate_vo2max_from_race_and_heart_rate, validate_inputs, CalculationError,
    PhysiologicalInputs, UnitSystem,
};

use crate::args::{Cli, Command, Vo2MaxCommand};
use crate::config::AppConfig;
use crate::error::CliResult;
use crate::services::report::{HeartRateSection, PaceSection, PowerSection, PACES_UNAVAILABLE};
use crate::services::{GatherService, ReportService};
use crate::sources::{CsvExportSource, HealthDataSource, ProfileSource};

/// Run a parsed command against the loaded configuration
pub async fn run(cli: Cli, config: AppConfig, now: DateTime<Utc>) -> CliResult<String> {
    let units = cli.units.unwrap_or(config.display.units);
    let profile = config.profile.to_inputs(now);

    match cli.command {
        Command::Report { json } => report(&config, units, now, json).await,
        Command::HrZones(args) => {
            let inputs = checked(args.to_inputs().or(profile))?;
            let zone_set =
                compute_heart_rate_zones(inputs.resting_hr, inputs.max_hr, inputs.age_years)?;
            Ok(HeartRateSection::from_zones(&inputs, &zone_set).render_text())
        }
        Command::PowerZones { ftp } => {
            let inputs = checked(PhysiologicalInputs {
                ftp_watts: ftp,
                ..Default::default()
            }
            .or(profile))?;
            let ftp = inputs
                .ftp_watts
                .ok_or(CalculationError::MissingInput("functional threshold power"))?;
            Ok(PowerSection::from_zones(&compute_power_zones(ftp)?).render_text())
        }
        Command::Paces(args) => {
            let inputs = checked(args.to_inputs().or(profile))?;
            let table = compute_training_paces(&inputs)?;
            if table.is_empty() {
                return Ok(format!("{PACES_UNAVAILABLE}\n"));
            }
            Ok(PaceSection::from_table(&table, units).render_text())
        }
        Command::Vo2max { method } => {
            let vo2max = estimate_vo2max(method)?;
            Ok(format!("VO2Max: {vo2max:.1} ml/kg/min\n"))
        }
    }
}

fn checked(inputs: PhysiologicalInputs) -> CliResult<PhysiologicalInputs> {
    validate_inputs(&inputs)?;
    Ok(inputs)
}

fn estimate_vo2max(method: Vo2MaxCommand) -> CliResult<f64> {
    let vo2max = match method {
        Vo2MaxCommand::Cooper { distance, miles } => {
            if miles {
                estimate_vo2max_from_cooper_test_miles(distance)?
            } else {
                estimate_vo2max_from_cooper_test(distance)?
            }
        }
        Vo2MaxCommand::Race {
            distance,
            duration,
            load_hr: Some(load_hr),
            resting: Some(resting),
            max: Some(max),
        } => estimate_vo2max_from_race_and_heart_rate(
            distance,
            duration / 60.0,
            load_hr,
            resting,
            max,
        )?,
        Vo2MaxCommand::Race {
            distance, duration, ..
        } => estimate_vo2max_from_race(distance, duration)?,
        Vo2MaxCommand::HeartRate { max, resting } => {
            estimate_vo2max_from_heart_rate_reserve(max, resting)?
        }
    };
    Ok(vo2max)
}

async fn report(
    config: &AppConfig,
    units: UnitSystem,
    now: DateTime<Utc>,
    json: bool,
) -> CliResult<String> {
    let mut sources: Vec<Arc<dyn HealthDataSource>> =
        vec![Arc::new(ProfileSource::new(config.profile.clone()))];
    let exports = CsvExportSource::new(&config.data);
    if exports.is_configured() {
        sources.push(Arc::new(exports));
    }
    info!(sources = sources.len(), "Gathering health data");

    let gathered = GatherService::gather_inputs(
        sources,
        now,
        Duration::from_secs(config.data.fetch_timeout_secs),
    )
    .await?;
    validate_inputs(&gathered.inputs)?;

    let report = ReportService::build(&gathered, units)?;
    if json {
        Ok(serde_json::to_string_pretty(&report)? + "\n")
    } else {
        Ok(report.render_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CliError;
    use chrono::TimeZone;
    use clap::Parser;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    async fn run_args(args: &[&str], config: AppConfig) -> CliResult<String> {
        let mut argv = vec!["training-zones"];
        argv.extend_from_slice(args);
        run(Cli::try_parse_from(argv).unwrap(), config, now()).await
    }

    #[tokio::test]
    async fn test_hr_zones_from_flags() {
        let out = run_args(&["hr-zones", "--resting", "49", "--max", "188"], AppConfig::default())
            .await
            .unwrap();
        assert!(out.contains("Zone 5:   188 BPM  Maximum"));
        assert!(out.contains("Calculated Using Heart Rate Reserve (Karvonen Formula)"));
    }

    #[tokio::test]
    async fn test_hr_zones_fall_back_to_profile() {
        let mut config = AppConfig::default();
        config.profile.age_years = Some(40.0);
        let out = run_args(&["hr-zones"], config).await.unwrap();
        assert!(out.contains("Calculated Using Estimated Maximum Heart Rate"));
    }

    #[tokio::test]
    async fn test_hr_zones_without_data_is_missing_age() {
        let err = run_args(&["hr-zones"], AppConfig::default())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            CliError::Calculation(CalculationError::MissingInput("age"))
        ));
    }

    #[tokio::test]
    async fn test_power_zones_flag_overrides_profile() {
        let mut config = AppConfig::default();
        config.profile.ftp_watts = Some(300.0);
        let out = run_args(&["power-zones", "--ftp", "220"], config).await.unwrap();
        assert!(out.contains("Functional Threshold Power: 220 watts"));
        assert!(out.contains("Zone 1:   121 Watts  Active Recovery"));
    }

    #[tokio::test]
    async fn test_implausible_input_is_rejected() {
        let err = run_args(&["power-zones", "--ftp", "9000"], AppConfig::default())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            CliError::Calculation(CalculationError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_paces_without_inputs() {
        let out = run_args(&["paces"], AppConfig::default()).await.unwrap();
        assert_eq!(out.trim_end(), PACES_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_paces_prefer_cooper_test() {
        let out = run_args(
            &["paces", "--cooper-distance", "2800", "--best-5k", "1250"],
            AppConfig::default(),
        )
        .await
        .unwrap();
        assert!(out.contains("Calculated Using Cooper Test"));
        assert!(out.contains("min/km"));
    }

    #[tokio::test]
    async fn test_vo2max_commands() {
        let out = run_args(&["vo2max", "cooper", "--distance", "2800"], AppConfig::default())
            .await
            .unwrap();
        assert_eq!(out, "VO2Max: 51.3 ml/kg/min\n");

        let out = run_args(
            &["vo2max", "heart-rate", "--max", "188", "--resting", "49"],
            AppConfig::default(),
        )
        .await
        .unwrap();
        assert_eq!(out, "VO2Max: 58.7 ml/kg/min\n");
    }

    #[tokio::test]
    async fn test_report_from_profile_only() {
        let mut config = AppConfig::default();
        config.profile.resting_hr = Some(49.0);
        config.profile.max_hr = Some(188.0);
        config.profile.ftp_watts = Some(220.0);
        let out = run_args(&["report"], config).await.unwrap();
        assert!(out.starts_with("Heart Rate Zones\n================\n"));
        assert!(out.contains("Calculated Using Heart Rate Reserve (Karvonen Formula)"));
        assert!(out.contains("Zone 6:   330 Watts  Anaerobic Capacity"));
        assert!(out.contains("Run Training Paces (min/km)"));
    }

    #[tokio::test]
    async fn test_report_json() {
        let mut config = AppConfig::default();
        config.profile.vo2max = Some(50.0);
        let out = run_args(&["report", "--json", "--units", "imperial"], config)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(json["units"], "imperial");
        assert_eq!(json["paces"]["method"], "VO2 Max");
    }
}
