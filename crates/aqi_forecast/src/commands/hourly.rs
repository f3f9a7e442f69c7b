//! Hourly command - one full ingestion cycle.
//!
//! Fetch a reading (or fall back), then run the logical transaction
//! load snapshot → backfill labels → build features → append row →
//! conditional push, and finally predict and log the forecast. A push
//! conflict retries the whole transaction against fresh data; the
//! cycle fails loudly once retries exhaust rather than writing over a
//! concurrent writer.

use std::sync::Arc;

use anyhow::{Context, Result};
use aqi_structs::Forecast;
use backon::{ExponentialBuilder, Retryable};
use chrono::Utc;
use config::Config;
use dataset_store::{DatasetStore, StoreError};
use feature_builder::{build_features, FeatureRecord};
use forecast_model::{ModelArtifacts, Predictor};
use meteo_ingestor::{CurrentReading, IngestError, MeteoClient};
use object_store::ObjectStore;
use tracing::{info, warn};

use crate::artifact::{write_prediction, PredictionArtifact};

/// What one cycle did, for logging and tests.
#[derive(Debug, Clone)]
pub struct CycleOutcome {
    pub row_id: u64,
    pub aqi: i32,
    pub pm2_5: f64,
    pub fallback_used: bool,
    pub targets_updated: usize,
    pub forecast: Forecast,
    pub artifact_path: String,
}

/// Runs the hourly command.
///
/// # Errors
///
/// Returns an error if the storage cycle fails after retries.
pub async fn run(config: &Config) -> Result<()> {
    let store = config.object_store()?;
    let client = MeteoClient::new(config).context("failed to build air-quality client")?;

    let reading = reading_or_fallback(client.fetch_current().await);

    let outcome = run_cycle(&reading, store, config.max_push_attempts).await?;

    info!(
        row_id = outcome.row_id,
        aqi = outcome.aqi,
        pm2_5 = outcome.pm2_5,
        fallback_used = outcome.fallback_used,
        targets_updated = outcome.targets_updated,
        day1 = outcome.forecast.day1,
        day2 = outcome.forecast.day2,
        day3 = outcome.forecast.day3,
        artifact = outcome.artifact_path,
        "hourly cycle complete"
    );

    Ok(())
}

/// Substitutes the deterministic fallback for a failed fetch. The
/// cycle always has a reading to ingest; a dead source is a logged
/// degradation, never a skipped hour.
fn reading_or_fallback(fetched: Result<CurrentReading, IngestError>) -> CurrentReading {
    match fetched {
        Ok(reading) => reading,
        Err(error) => {
            warn!(error = %error, "fetch failed, using deterministic fallback reading");
            CurrentReading::fallback()
        }
    }
}

/// Runs one ingestion cycle against the given storage backend.
///
/// # Errors
///
/// Returns an error if the snapshot push keeps conflicting after the
/// bounded retries, or on any other storage failure.
pub async fn run_cycle(
    reading: &CurrentReading,
    backend: Arc<dyn ObjectStore>,
    max_push_attempts: usize,
) -> Result<CycleOutcome> {
    let store = DatasetStore::new(Arc::clone(&backend));

    let commit = || async {
        let mut snapshot = store.load().await?;
        let targets_updated = snapshot.backfill_targets()?;
        let features = build_features(reading, snapshot.rows());
        let row_id = snapshot.append(features.to_row());
        store.push(&snapshot).await?;
        Ok::<(usize, FeatureRecord, u64), StoreError>((targets_updated, features, row_id))
    };

    let (targets_updated, features, row_id) = commit
        .retry(ExponentialBuilder::default().with_max_times(max_push_attempts))
        .when(|error| matches!(error, StoreError::Conflict))
        .notify(|error, delay| {
            warn!(error = %error, ?delay, "snapshot push conflicted, retrying cycle");
        })
        .await
        .context("storage cycle failed")?;

    if targets_updated > 0 {
        info!(targets_updated, "backfilled deferred labels");
    }

    let artifacts = ModelArtifacts::new(Arc::clone(&backend));
    let forecast = Predictor::new(&artifacts).predict(&features).await;

    let artifact = PredictionArtifact {
        generated_at: Utc::now(),
        timestamp: features.timestamp,
        predictions: forecast,
        features,
        targets_updated,
    };
    let artifact_path = write_prediction(&backend, &artifact).await?;

    Ok(CycleOutcome {
        row_id,
        aqi: reading.aqi,
        pm2_5: reading.pm2_5,
        fallback_used: reading.is_fallback,
        targets_updated,
        forecast,
        artifact_path: artifact_path.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use meteo_ingestor::FALLBACK_PM25;
    use reqwest::StatusCode;

    use super::*;

    #[test]
    fn successful_fetch_passes_through() {
        let fetched = CurrentReading::from_pm25(53.1, Utc::now());
        let reading = reading_or_fallback(Ok(fetched.clone()));
        assert_eq!(reading, fetched);
        assert!(!reading.is_fallback);
    }

    #[test]
    fn failed_fetch_recovers_via_fallback() {
        let failures = [
            IngestError::Status(StatusCode::INTERNAL_SERVER_ERROR),
            IngestError::MalformedPayload("unparsable observation time: garbage".to_string()),
        ];

        for error in failures {
            let reading = reading_or_fallback(Err(error));
            assert!(reading.is_fallback);
            assert_eq!(reading.aqi, 100);
            assert_eq!(reading.pm2_5, FALLBACK_PM25);
        }
    }
}
