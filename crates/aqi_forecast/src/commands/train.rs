//! Train command - daily candidate training and model selection.

use std::sync::Arc;

use anyhow::{Context, Result};
use aqi_structs::Horizon;
use config::Config;
use dataset_store::{DatasetStore, StoreError};
use forecast_model::{labeled_rows, train_horizon, ModelArtifacts, MIN_TRAINING_SAMPLES};
use object_store::ObjectStore;
use tracing::{info, warn};

/// Which horizons trained and which were skipped, for logging and
/// tests.
#[derive(Debug, Clone, Default)]
pub struct TrainingSummary {
    pub trained: Vec<Horizon>,
    pub skipped: Vec<Horizon>,
}

/// Runs the train command.
///
/// # Errors
///
/// Returns an error if the dataset cannot be read or an artifact
/// cannot be written.
pub async fn run(config: &Config) -> Result<()> {
    let store = config.object_store()?;
    let summary = run_training(store).await?;
    info!(
        trained = summary.trained.len(),
        skipped = summary.skipped.len(),
        "training run complete"
    );
    Ok(())
}

/// Trains each horizon on the fully-labeled rows and persists the
/// winners.
///
/// # Errors
///
/// Returns an error if the dataset cannot be read or an artifact
/// cannot be written. An insufficient sample count is not an error;
/// the horizon is skipped and the previous model stays authoritative.
pub async fn run_training(backend: Arc<dyn ObjectStore>) -> Result<TrainingSummary> {
    let store = DatasetStore::new(Arc::clone(&backend));
    let mut snapshot = store.load().await.context("failed to load dataset")?;

    // Resolve everything resolvable before selecting the training set.
    let updated = snapshot.backfill_targets()?;
    if updated > 0 {
        info!(targets_updated = updated, "backfilled deferred labels");
        match store.push(&snapshot).await {
            Ok(()) => {}
            // Training still sees the in-memory labels; the hourly
            // cycle persists them on its next pass.
            Err(StoreError::Conflict) => {
                warn!("concurrent writer beat the label push, continuing without persisting");
            }
            Err(error) => return Err(error).context("failed to persist backfilled labels"),
        }
    }

    let labeled = labeled_rows(snapshot.rows());
    info!(
        rows = snapshot.len(),
        labeled = labeled.len(),
        "selected training set"
    );

    let artifacts = ModelArtifacts::new(backend);
    let mut summary = TrainingSummary::default();

    for horizon in Horizon::ALL {
        match train_horizon(&labeled, horizon) {
            Some(trained) => {
                artifacts
                    .save(horizon, &trained.model, &trained.info)
                    .await
                    .with_context(|| format!("failed to persist {horizon} model"))?;
                info!(
                    %horizon,
                    model = trained.info.model_name,
                    mae = trained.info.mae,
                    r2 = trained.info.r2,
                    "model updated"
                );
                summary.trained.push(horizon);
            }
            None => {
                warn!(
                    %horizon,
                    labeled = labeled.len(),
                    minimum = MIN_TRAINING_SAMPLES,
                    "insufficient training data, keeping existing model"
                );
                summary.skipped.push(horizon);
            }
        }
    }

    Ok(summary)
}
