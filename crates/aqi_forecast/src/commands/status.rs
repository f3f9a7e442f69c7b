//! Status command - dataset freshness and model metadata.
//!
//! Emits the signals a downstream consumer polls for: row count,
//! latest observation, and per-horizon model state.

use std::sync::Arc;

use anyhow::{Context, Result};
use aqi_structs::Horizon;
use config::Config;
use dataset_store::DatasetStore;
use forecast_model::ModelArtifacts;
use tracing::info;

/// Runs the status command.
///
/// # Errors
///
/// Returns an error if the dataset or artifacts cannot be read.
pub async fn run(config: &Config) -> Result<()> {
    let backend = config.object_store()?;

    let store = DatasetStore::new(Arc::clone(&backend));
    let snapshot = store.load().await.context("failed to load dataset")?;

    match snapshot.latest() {
        Some(row) => info!(
            rows = snapshot.len(),
            latest_id = row.id,
            latest_timestamp = row.timestamp,
            latest_aqi = row.aqi,
            "dataset status"
        ),
        None => info!(rows = 0usize, "dataset is empty"),
    }

    let artifacts = ModelArtifacts::new(backend);
    for horizon in Horizon::ALL {
        match artifacts.load_info(horizon).await? {
            Some(metadata) => info!(
                %horizon,
                model = metadata.model_name,
                mae = metadata.mae,
                r2 = metadata.r2,
                training_samples = metadata.training_samples,
                trained_at = %metadata.trained_at,
                "model status"
            ),
            None => info!(%horizon, "no trained model"),
        }
    }

    Ok(())
}
