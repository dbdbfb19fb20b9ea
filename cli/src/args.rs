//! Command line arguments

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use training_zones_shared::{PhysiologicalInputs, UnitSystem};

#[derive(Debug, Parser)]
#[command(
    name = "training-zones",
    version,
    about = "Heart rate zones, cycling power zones and running training paces",
    long_about = "Estimates personalized training zones from a configured profile and local \
                  health data exports, or directly from values given on the command line."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Unit system for paces (overrides the configured one)
    #[arg(long, global = true)]
    pub units: Option<UnitSystem>,

    /// Config file to load instead of config/{RUST_ENV}.toml
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Gather all configured data and print the full report
    Report {
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Heart rate zones
    HrZones(HeartRateArgs),

    /// Cycling power zones
    PowerZones {
        /// Functional threshold power in watts
        #[arg(long)]
        ftp: Option<f64>,
    },

    /// Running training paces from the best available input
    Paces(PaceArgs),

    /// Estimate VO2Max
    Vo2max {
        #[command(subcommand)]
        method: Vo2MaxCommand,
    },
}

#[derive(Debug, Args)]
pub struct HeartRateArgs {
    /// Resting heart rate in bpm
    #[arg(long)]
    pub resting: Option<f64>,

    /// Maximum heart rate in bpm
    #[arg(long)]
    pub max: Option<f64>,

    /// Age in years
    #[arg(long)]
    pub age: Option<f64>,
}

#[derive(Debug, Args)]
pub struct PaceArgs {
    /// Distance covered in a 12 minute run, in meters
    #[arg(long)]
    pub cooper_distance: Option<f64>,

    /// Duration of the best recent 5K, in seconds
    #[arg(long = "best-5k")]
    pub best_5k: Option<f64>,

    /// Resting heart rate in bpm
    #[arg(long)]
    pub resting: Option<f64>,

    /// Maximum heart rate in bpm
    #[arg(long)]
    pub max: Option<f64>,

    /// VO2Max in ml/kg/min
    #[arg(long)]
    pub vo2max: Option<f64>,
}

#[derive(Debug, Subcommand)]
pub enum Vo2MaxCommand {
    /// From the distance covered in a 12 minute run
    Cooper {
        /// Distance in meters (or miles with --miles)
        #[arg(long)]
        distance: f64,

        /// Read the distance as miles
        #[arg(long)]
        miles: bool,
    },

    /// From a race result
    Race {
        /// Race distance in meters
        #[arg(long)]
        distance: f64,

        /// Finishing time in seconds
        #[arg(long)]
        duration: f64,

        /// Average heart rate during the race; needs --resting and --max
        #[arg(long, requires = "resting", requires = "max")]
        load_hr: Option<f64>,

        /// Resting heart rate in bpm
        #[arg(long)]
        resting: Option<f64>,

        /// Maximum heart rate in bpm
        #[arg(long)]
        max: Option<f64>,
    },

    /// From the ratio of maximum to resting heart rate
    HeartRate {
        /// Maximum heart rate in bpm
        #[arg(long)]
        max: f64,

        /// Resting heart rate in bpm
        #[arg(long)]
        resting: f64,
    },
}

impl HeartRateArgs {
    pub fn to_inputs(&self) -> PhysiologicalInputs {
        PhysiologicalInputs {
            resting_hr: self.resting,
            max_hr: self.max,
            age_years: self.age,
            ..Default::default()
        }
    }
}

impl PaceArgs {
    pub fn to_inputs(&self) -> PhysiologicalInputs {
        PhysiologicalInputs {
            resting_hr: self.resting,
            max_hr: self.max,
            vo2max: self.vo2max,
            best_5k_duration_secs: self.best_5k,
            cooper_distance_meters: self.cooper_distance,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_report_json() {
        let cli = Cli::try_parse_from(["training-zones", "report", "--json"]).unwrap();
        assert!(matches!(cli.command, Command::Report { json: true }));
        assert!(cli.units.is_none());
    }

    #[test]
    fn test_global_units_after_subcommand() {
        let cli =
            Cli::try_parse_from(["training-zones", "paces", "--vo2max", "50", "--units", "imperial"])
                .unwrap();
        assert_eq!(cli.units, Some(UnitSystem::Imperial));
        let Command::Paces(args) = cli.command else {
            panic!("expected paces");
        };
        assert_eq!(args.to_inputs().vo2max, Some(50.0));
    }

    #[test]
    fn test_unknown_units_rejected() {
        assert!(Cli::try_parse_from(["training-zones", "--units", "furlongs", "report"]).is_err());
    }

    #[test]
    fn test_race_heart_rate_needs_resting_and_max() {
        let result = Cli::try_parse_from([
            "training-zones",
            "vo2max",
            "race",
            "--distance",
            "5000",
            "--duration",
            "1250",
            "--load-hr",
            "170",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_hr_zone_flags() {
        let cli = Cli::try_parse_from([
            "training-zones",
            "hr-zones",
            "--resting",
            "49",
            "--max",
            "188",
        ])
        .unwrap();
        let Command::HrZones(args) = cli.command else {
            panic!("expected hr-zones");
        };
        let inputs = args.to_inputs();
        assert_eq!(inputs.resting_hr, Some(49.0));
        assert_eq!(inputs.max_hr, Some(188.0));
        assert!(inputs.age_years.is_none());
    }
}
