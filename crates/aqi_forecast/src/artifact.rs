//! The prediction artifact log.
//!
//! One JSON artifact per ingestion cycle, named by generation time.
//! The log is append-only: artifacts are written once and never
//! overwritten, so downstream consumers (a dashboard, typically) can
//! read the most recent one and trust older entries to stay put.

use std::sync::Arc;

use anyhow::{Context, Result};
use aqi_structs::Forecast;
use chrono::{DateTime, Utc};
use feature_builder::FeatureRecord;
use object_store::path::Path as ObjectStorePath;
use object_store::{ObjectStore, PutMode, PutOptions, PutPayload};
use serde::Serialize;
use tracing::warn;

/// One cycle's forecast output.
#[derive(Debug, Clone, Serialize)]
pub struct PredictionArtifact {
    /// Wall-clock instant this forecast was generated. Names the
    /// artifact; the source returns hour-truncated observation times,
    /// so naming by observation time would collide every cycle within
    /// the same hour.
    pub generated_at: DateTime<Utc>,
    /// Observation instant of the reading this forecast was made from.
    pub timestamp: DateTime<Utc>,
    pub predictions: Forecast,
    /// The feature snapshot the models saw.
    pub features: FeatureRecord,
    /// Labels resolved by this cycle's backfill pass.
    pub targets_updated: usize,
}

impl PredictionArtifact {
    /// The artifact's location, named by generation time to minute
    /// resolution.
    #[must_use]
    pub fn path(&self) -> ObjectStorePath {
        ObjectStorePath::from(format!(
            "predictions/pred_{}.json",
            self.generated_at.format("%Y%m%d_%H%M")
        ))
    }
}

/// Writes an artifact into the append-only log.
///
/// A colliding name (a re-run within the same minute) leaves the
/// existing artifact in place and logs a warning; the log never
/// rewrites history.
///
/// # Errors
///
/// Returns an error if encoding or the store write fails.
pub async fn write_prediction(
    store: &Arc<dyn ObjectStore>,
    artifact: &PredictionArtifact,
) -> Result<ObjectStorePath> {
    let path = artifact.path();
    let payload = PutPayload::from(
        serde_json::to_vec_pretty(artifact).context("failed to encode prediction artifact")?,
    );

    match store
        .put_opts(&path, payload, PutOptions::from(PutMode::Create))
        .await
    {
        Ok(_) => Ok(path),
        Err(object_store::Error::AlreadyExists { .. }) => {
            warn!(path = %path, "prediction artifact already exists, keeping the original");
            Ok(path)
        }
        Err(error) => Err(error).context("failed to write prediction artifact"),
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use feature_builder::build_features;
    use meteo_ingestor::CurrentReading;
    use object_store::memory::InMemory;

    use super::*;

    fn artifact() -> PredictionArtifact {
        // Hour-truncated observation time, as the source reports it.
        let timestamp = Utc.with_ymd_and_hms(2026, 8, 23, 10, 0, 0).unwrap();
        let features = build_features(&CurrentReading::from_pm25(53.1, timestamp), &[]);
        PredictionArtifact {
            generated_at: Utc.with_ymd_and_hms(2026, 8, 23, 10, 7, 12).unwrap(),
            timestamp,
            predictions: Forecast {
                day1: 150.0,
                day2: 148.5,
                day3: 151.2,
            },
            features,
            targets_updated: 3,
        }
    }

    #[test]
    fn path_is_named_by_generation_time_not_observation_time() {
        assert_eq!(
            artifact().path().to_string(),
            "predictions/pred_20260823_1007.json"
        );
    }

    #[tokio::test]
    async fn same_observation_hour_reruns_get_distinct_artifacts() {
        let store: Arc<dyn ObjectStore> = Arc::new(InMemory::new());

        // Two cycles within one observation hour generate at different
        // minutes; each keeps its own artifact.
        let first = artifact();
        let mut second = artifact();
        second.generated_at = Utc.with_ymd_and_hms(2026, 8, 23, 10, 39, 0).unwrap();
        assert_eq!(first.timestamp, second.timestamp);

        let first_path = write_prediction(&store, &first).await.unwrap();
        let second_path = write_prediction(&store, &second).await.unwrap();

        assert_ne!(first_path, second_path);
        store.get(&first_path).await.unwrap();
        store.get(&second_path).await.unwrap();
    }

    #[tokio::test]
    async fn artifact_json_carries_the_full_payload() {
        let store: Arc<dyn ObjectStore> = Arc::new(InMemory::new());
        let artifact = artifact();
        let path = write_prediction(&store, &artifact).await.unwrap();

        let bytes = store.get(&path).await.unwrap().bytes().await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["predictions"]["day2"], 148.5);
        assert_eq!(json["features"]["aqi"], 150);
        assert_eq!(json["targets_updated"], 3);
    }

    #[tokio::test]
    async fn same_minute_rerun_keeps_the_original() {
        let store: Arc<dyn ObjectStore> = Arc::new(InMemory::new());
        let first = artifact();
        write_prediction(&store, &first).await.unwrap();

        let mut rerun = artifact();
        rerun.predictions.day1 = 999.0;
        let path = write_prediction(&store, &rerun).await.unwrap();

        let bytes = store.get(&path).await.unwrap().bytes().await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["predictions"]["day1"], 150.0);
    }
}
