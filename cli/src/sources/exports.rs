//! Readings derived from CSV exports of a health store
//!
//! Workouts file columns: `start,duration_secs,distance_meters,activity`
//! (RFC 3339 start time; distance and activity may be empty).
//!
//! Heart rate file columns: `recorded_at,bpm,kind` where kind is
//! `resting` or `sample`.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tokio::sync::OnceCell;
use tracing::debug;
use training_zones_shared::{
    estimate_max_heart_rate, find_best_recent_efforts, latest_resting_heart_rate, BestEfforts,
    HeartRateSample, Workout,
};

use super::HealthDataSource;
use crate::config::DataConfig;
use crate::error::{CliError, CliResult};

#[derive(Debug, Deserialize)]
struct WorkoutRecord {
    start: DateTime<Utc>,
    duration_secs: f64,
    distance_meters: Option<f64>,
    #[serde(default)]
    activity: Option<String>,
}

impl WorkoutRecord {
    fn is_run(&self) -> bool {
        self.activity
            .as_deref()
            .map_or(true, |activity| activity.eq_ignore_ascii_case("running"))
    }
}

pub struct CsvExportSource {
    workouts_path: Option<PathBuf>,
    heart_rate_path: Option<PathBuf>,
    effort_lookback: Duration,
    max_hr_lookback: Duration,
    workouts: OnceCell<Vec<Workout>>,
    heart_rate: OnceCell<Vec<HeartRateSample>>,
}

impl CsvExportSource {
    pub fn new(data: &DataConfig) -> Self {
        Self {
            workouts_path: data.workouts_csv.clone(),
            heart_rate_path: data.heart_rate_csv.clone(),
            effort_lookback: Duration::days(data.effort_lookback_days),
            max_hr_lookback: Duration::days(data.max_hr_lookback_days),
            workouts: OnceCell::new(),
            heart_rate: OnceCell::new(),
        }
    }

    /// Whether any export is configured
    pub fn is_configured(&self) -> bool {
        self.workouts_path.is_some() || self.heart_rate_path.is_some()
    }

    async fn workouts(&self) -> CliResult<&[Workout]> {
        let workouts = self
            .workouts
            .get_or_try_init(|| async {
                let Some(path) = &self.workouts_path else {
                    return Ok(Vec::new());
                };
                let records: Vec<WorkoutRecord> = read_records(path).await?;
                let workouts: Vec<Workout> = records
                    .into_iter()
                    .filter(WorkoutRecord::is_run)
                    .map(|record| Workout {
                        start: record.start,
                        duration_secs: record.duration_secs,
                        distance_meters: record.distance_meters,
                    })
                    .collect();
                debug!(path = %path.display(), count = workouts.len(), "Loaded running workouts");
                Ok::<_, CliError>(workouts)
            })
            .await?;
        Ok(workouts)
    }

    async fn heart_rate_samples(&self) -> CliResult<&[HeartRateSample]> {
        let samples = self
            .heart_rate
            .get_or_try_init(|| async {
                let Some(path) = &self.heart_rate_path else {
                    return Ok(Vec::new());
                };
                let samples: Vec<HeartRateSample> = read_records(path).await?;
                debug!(path = %path.display(), count = samples.len(), "Loaded heart rate readings");
                Ok::<_, CliError>(samples)
            })
            .await?;
        Ok(samples)
    }
}

async fn read_records<T: DeserializeOwned>(path: &Path) -> CliResult<Vec<T>> {
    let bytes = tokio::fs::read(path).await.map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(bytes.as_slice());

    reader
        .deserialize()
        .collect::<Result<Vec<T>, _>>()
        .map_err(|source| CliError::Csv {
            path: path.to_path_buf(),
            source,
        })
}

#[async_trait]
impl HealthDataSource for CsvExportSource {
    fn name(&self) -> &str {
        "csv export"
    }

    async fn resting_hr(&self) -> CliResult<Option<f64>> {
        Ok(latest_resting_heart_rate(self.heart_rate_samples().await?))
    }

    async fn max_hr(&self, now: DateTime<Utc>) -> CliResult<Option<f64>> {
        Ok(estimate_max_heart_rate(
            self.heart_rate_samples().await?,
            now,
            self.max_hr_lookback,
        ))
    }

    async fn best_efforts(&self, now: DateTime<Utc>) -> CliResult<BestEfforts> {
        Ok(find_best_recent_efforts(
            self.workouts().await?,
            now,
            self.effort_lookback,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::io::Write;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    fn write_csv(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    fn source(workouts: Option<&Path>, heart_rate: Option<&Path>) -> CsvExportSource {
        CsvExportSource::new(&DataConfig {
            workouts_csv: workouts.map(Path::to_path_buf),
            heart_rate_csv: heart_rate.map(Path::to_path_buf),
            ..DataConfig::default()
        })
    }

    #[tokio::test]
    async fn test_best_efforts_from_workouts() {
        let file = write_csv(
            "start,duration_secs,distance_meters,activity\n\
             2024-05-20T07:00:00Z,1260,5000,running\n\
             2024-05-25T07:00:00Z,725,2950,running\n\
             2024-05-26T07:00:00Z,725,3400,cycling\n\
             2024-05-27T07:00:00Z,1800,,running\n",
        );
        let source = source(Some(file.path()), None);
        let efforts = source.best_efforts(now()).await.unwrap();
        assert_eq!(efforts.best_5k_duration_secs, Some(1260.0));
        assert_eq!(efforts.best_12_minute_distance_meters, Some(2950.0));
    }

    #[tokio::test]
    async fn test_heart_rate_readings() {
        let file = write_csv(
            "recorded_at,bpm,kind\n\
             2024-05-01T06:00:00Z,52,resting\n\
             2024-05-30T06:00:00Z,48,resting\n\
             2024-04-10T18:00:00Z,186,sample\n\
             2022-04-10T18:00:00Z,199,sample\n",
        );
        let source = source(None, Some(file.path()));
        assert_eq!(source.resting_hr().await.unwrap(), Some(48.0));
        assert_eq!(source.max_hr(now()).await.unwrap(), Some(186.0));
        assert!(source.vo2max().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_unconfigured_source_is_empty() {
        let source = source(None, None);
        assert!(!source.is_configured());
        assert_eq!(source.best_efforts(now()).await.unwrap(), BestEfforts::default());
        assert!(source.max_hr(now()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_missing_file_is_an_error() {
        let source = source(Some(Path::new("/nonexistent/workouts.csv")), None);
        let err = source.best_efforts(now()).await.unwrap_err();
        assert!(matches!(err, CliError::Io { .. }));
    }

    #[tokio::test]
    async fn test_malformed_row_is_an_error() {
        let file = write_csv("recorded_at,bpm,kind\nyesterday,fast,resting\n");
        let source = source(None, Some(file.path()));
        let err = source.resting_hr().await.unwrap_err();
        assert!(matches!(err, CliError::Csv { .. }));
    }
}
