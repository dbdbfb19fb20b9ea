//! Training Zones command line tool
//!
//! Prints heart rate zones, cycling power zones and running training paces
//! computed from a configured profile and local health data exports.

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use training_zones_cli::{args::Cli, commands, config::AppConfig};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = match &cli.config {
        Some(path) => {
            let path = path.to_string_lossy();
            AppConfig::load_from(&path).with_context(|| format!("loading config from {path}"))?
        }
        None => AppConfig::load()?,
    };

    debug!(
        version = env!("CARGO_PKG_VERSION"),
        env = if AppConfig::is_production() { "production" } else { "development" },
        "Starting training zones"
    );

    let output = commands::run(cli, config, Utc::now()).await?;
    print!("{output}");
    Ok(())
}

/// Initialize tracing/logging
///
/// Logs go to stderr so command output stays clean on stdout.
fn init_tracing(verbose: bool) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            "training_zones_cli=debug,training_zones_shared=debug".into()
        } else {
            "training_zones_cli=warn,training_zones_shared=warn".into()
        }
    });

    let subscriber = tracing_subscriber::registry().with(env_filter);

    if AppConfig::is_production() {
        // JSON logging for production (better for log aggregation)
        subscriber
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        subscriber
            .with(
                tracing_subscriber::fmt::layer()
                    .pretty()
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}
