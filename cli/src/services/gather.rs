//! Gathers physiological inputs from every configured data source

use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinSet;
use tracing::{debug, warn};
use training_zones_shared::{
    BestEfforts, PhysiologicalInputs, BEST_5K_DURATION_FLOOR_SECS, COOPER_DISTANCE_FLOOR_METERS,
};

use crate::error::{CliError, CliResult};
use crate::sources::HealthDataSource;

/// Inputs merged across sources, plus the effort details the report shows
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GatheredInputs {
    pub inputs: PhysiologicalInputs,
    pub best_efforts: BestEfforts,
}

/// Data gathering service
pub struct GatherService;

impl GatherService {
    /// Read every source concurrently and merge the results
    ///
    /// Sources are listed in priority order: a value from an earlier source
    /// wins over the same value from a later one. A reading that fails is
    /// logged and treated as missing. The whole gather fails with
    /// [`CliError::Timeout`] if it does not finish in time, and any source
    /// still reading is cancelled.
    pub async fn gather_inputs(
        sources: Vec<Arc<dyn HealthDataSource>>,
        now: DateTime<Utc>,
        timeout: Duration,
    ) -> CliResult<GatheredInputs> {
        let count = sources.len();
        let mut tasks = JoinSet::new();
        for (index, source) in sources.into_iter().enumerate() {
            tasks.spawn(async move { (index, Self::read_source(source.as_ref(), now).await) });
        }

        let outcome = tokio::time::timeout(timeout, collect(&mut tasks, count)).await;
        let collected = match outcome {
            Ok(collected) => collected?,
            Err(_) => {
                tasks.shutdown().await;
                return Err(CliError::Timeout(timeout.as_secs()));
            }
        };
        let gathered = collected
            .into_iter()
            .flatten()
            .fold(GatheredInputs::default(), merge);

        debug!(
            has_hr_data = gathered.inputs.has_hr_data(),
            has_power_data = gathered.inputs.has_power_data(),
            has_run_data = gathered.inputs.has_run_data(),
            "Gathered inputs"
        );
        Ok(gathered)
    }

    async fn read_source(source: &dyn HealthDataSource, now: DateTime<Utc>) -> GatheredInputs {
        let name = source.name();
        let (age, resting, max, vo2max, ftp, efforts) = tokio::join!(
            source.age_years(now),
            source.resting_hr(),
            source.max_hr(now),
            source.vo2max(),
            source.ftp_watts(),
            source.best_efforts(now),
        );

        let best_efforts = reading(name, "best efforts", efforts).unwrap_or_default();
        let inputs = PhysiologicalInputs {
            resting_hr: reading(name, "resting heart rate", resting).flatten(),
            max_hr: reading(name, "maximum heart rate", max).flatten(),
            age_years: reading(name, "age", age).flatten(),
            vo2max: reading(name, "VO2Max", vo2max).flatten(),
            ftp_watts: reading(name, "FTP", ftp).flatten(),
            best_5k_duration_secs: best_efforts.best_5k_duration_secs,
            cooper_distance_meters: best_efforts.best_12_minute_distance_meters,
        };

        debug!(source = name, ?inputs, "Read data source");
        GatheredInputs {
            inputs,
            best_efforts,
        }
    }
}

fn reading<T>(source: &str, field: &str, result: CliResult<T>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(source, field, error = %e, "Failed to read from data source");
            None
        }
    }
}

async fn collect(
    tasks: &mut JoinSet<(usize, GatheredInputs)>,
    count: usize,
) -> CliResult<Vec<Option<GatheredInputs>>> {
    let mut collected = vec![None; count];
    while let Some(joined) = tasks.join_next().await {
        let (index, from_source) = joined.map_err(|e| CliError::Task(e.to_string()))?;
        collected[index] = Some(from_source);
    }
    Ok(collected)
}

/// Merge two sources, `first` taking priority
///
/// A usable value from either source wins over a placeholder, so an earlier
/// source reporting zero does not hide a real reading from a later one.
fn merge(first: GatheredInputs, second: GatheredInputs) -> GatheredInputs {
    let inputs = first
        .inputs
        .usable()
        .or(second.inputs.usable())
        .or(first.inputs)
        .or(second.inputs);

    let qualifying_5k = |efforts: &BestEfforts| {
        efforts
            .best_5k_duration_secs
            .is_some_and(|secs| secs > BEST_5K_DURATION_FLOOR_SECS)
    };
    let (best_5k_duration_secs, best_5k_pace_secs_per_meter) =
        if qualifying_5k(&first.best_efforts) || !qualifying_5k(&second.best_efforts) {
            (
                first
                    .best_efforts
                    .best_5k_duration_secs
                    .or(second.best_efforts.best_5k_duration_secs),
                first
                    .best_efforts
                    .best_5k_pace_secs_per_meter
                    .or(second.best_efforts.best_5k_pace_secs_per_meter),
            )
        } else {
            (
                second.best_efforts.best_5k_duration_secs,
                second.best_efforts.best_5k_pace_secs_per_meter,
            )
        };

    let qualifying_cooper = |meters: &f64| *meters > COOPER_DISTANCE_FLOOR_METERS;
    let first_cooper = first.best_efforts.best_12_minute_distance_meters;
    let second_cooper = second.best_efforts.best_12_minute_distance_meters;
    let best_12_minute_distance_meters = first_cooper
        .filter(qualifying_cooper)
        .or(second_cooper.filter(qualifying_cooper))
        .or(first_cooper)
        .or(second_cooper);

    GatheredInputs {
        inputs,
        best_efforts: BestEfforts {
            best_5k_duration_secs,
            best_5k_pace_secs_per_meter,
            best_12_minute_distance_meters,
        },
    }
}
