//! Model artifact persistence.
//!
//! Each horizon owns two objects: a binary model blob and a JSON
//! metadata sidecar. Both are replaced wholesale on a successful
//! training run; each put is staged and renamed by the object store,
//! so a reader never observes a partially-written artifact and the
//! old model stays servable until the new one lands.

use std::sync::Arc;

use aqi_structs::{Horizon, ModelInfo};
use object_store::path::Path as ObjectStorePath;
use object_store::{ObjectStore, PutPayload};
use thiserror::Error;

use crate::model::RegressionModel;

/// Errors from reading or writing model artifacts.
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("object store operation failed")]
    ObjectStore(#[from] object_store::Error),

    #[error("failed to encode or decode model blob")]
    Blob(#[from] postcard::Error),

    #[error("failed to encode or decode model metadata")]
    Metadata(#[from] serde_json::Error),
}

/// Store handle for the per-horizon model artifacts.
pub struct ModelArtifacts {
    store: Arc<dyn ObjectStore>,
}

impl ModelArtifacts {
    #[must_use]
    pub fn new(store: Arc<dyn ObjectStore>) -> Self {
        Self { store }
    }

    fn blob_path(horizon: Horizon) -> ObjectStorePath {
        ObjectStorePath::from(format!("models/best_model_day{}.bin", horizon.day_number()))
    }

    fn info_path(horizon: Horizon) -> ObjectStorePath {
        ObjectStorePath::from(format!("models/model_info_day{}.json", horizon.day_number()))
    }

    /// Persists a horizon's winning model and its metadata, replacing
    /// any previous artifact.
    ///
    /// The two puts are not atomic together. The sidecar lands first:
    /// predictions key off the blob, so a reader that observes the new
    /// blob already observes its metadata.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding or the store write fails.
    pub async fn save(
        &self,
        horizon: Horizon,
        model: &RegressionModel,
        info: &ModelInfo,
    ) -> Result<(), ArtifactError> {
        let sidecar = serde_json::to_vec_pretty(info)?;
        self.store
            .put(&Self::info_path(horizon), PutPayload::from(sidecar))
            .await?;

        let blob = postcard::to_allocvec(model)?;
        self.store
            .put(&Self::blob_path(horizon), PutPayload::from(blob))
            .await?;

        Ok(())
    }

    /// Loads a horizon's model. `None` when no model has been trained
    /// yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the store read or blob decode fails.
    pub async fn load_model(&self, horizon: Horizon) -> Result<Option<RegressionModel>, ArtifactError> {
        let result = match self.store.get(&Self::blob_path(horizon)).await {
            Ok(result) => result,
            Err(object_store::Error::NotFound { .. }) => return Ok(None),
            Err(error) => return Err(error.into()),
        };
        let bytes = result.bytes().await?;
        Ok(Some(postcard::from_bytes(&bytes)?))
    }

    /// Loads a horizon's metadata sidecar. `None` when absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the store read or JSON decode fails.
    pub async fn load_info(&self, horizon: Horizon) -> Result<Option<ModelInfo>, ArtifactError> {
        let result = match self.store.get(&Self::info_path(horizon)).await {
            Ok(result) => result,
            Err(object_store::Error::NotFound { .. }) => return Ok(None),
            Err(error) => return Err(error.into()),
        };
        let bytes = result.bytes().await?;
        Ok(Some(serde_json::from_slice(&bytes)?))
    }
}
