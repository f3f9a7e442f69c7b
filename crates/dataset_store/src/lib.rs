//! Append-only time-series store for observation rows.
//!
//! The dataset is persisted as a single snapshot object. A pipeline
//! run loads the snapshot, mutates it in memory (backfill + append)
//! and pushes the whole thing back with a conditional put, so the
//! read-modify-write cycle behaves as one logical transaction:
//! a concurrent writer that pushed first makes the put fail with
//! [`StoreError::Conflict`] instead of silently losing its update.

mod backfill;
mod error;
mod snapshot;

use std::sync::Arc;

use object_store::path::Path as ObjectStorePath;
use object_store::{GetResult, ObjectStore, PutMode, PutOptions, PutPayload, UpdateVersion};
use tracing::debug;

pub use backfill::backfill_targets;
pub use error::StoreError;
pub use snapshot::Snapshot;

/// Location of the dataset snapshot within the object store.
pub const DATASET_PATH: &str = "dataset/observations.json";

/// Handle to the persisted dataset.
pub struct DatasetStore {
    store: Arc<dyn ObjectStore>,
    path: ObjectStorePath,
}

impl DatasetStore {
    /// Creates a store handle over the given object store backend.
    #[must_use]
    pub fn new(store: Arc<dyn ObjectStore>) -> Self {
        Self {
            store,
            path: ObjectStorePath::from(DATASET_PATH),
        }
    }

    /// Loads the current snapshot.
    ///
    /// A missing snapshot object is the cold-start state and yields an
    /// empty snapshot, not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the object cannot be read or decoded.
    pub async fn load(&self) -> Result<Snapshot, StoreError> {
        let result: GetResult = match self.store.get(&self.path).await {
            Ok(result) => result,
            Err(object_store::Error::NotFound { .. }) => {
                debug!(path = %self.path, "no dataset snapshot yet, starting empty");
                return Ok(Snapshot::empty());
            }
            Err(error) => return Err(error.into()),
        };

        let version = UpdateVersion {
            e_tag: result.meta.e_tag.clone(),
            version: result.meta.version.clone(),
        };
        let bytes = result.bytes().await?;
        let rows = serde_json::from_slice(&bytes)?;

        Ok(Snapshot::from_parts(rows, Some(version)))
    }

    /// Pushes a snapshot back, conditional on the version observed at
    /// load time.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Conflict`] if another writer pushed since
    /// this snapshot was loaded; the caller should reload and retry
    /// the whole cycle with fresh data.
    pub async fn push(&self, snapshot: &Snapshot) -> Result<(), StoreError> {
        let payload = PutPayload::from(serde_json::to_vec_pretty(snapshot.rows())?);

        let mode = match snapshot.version() {
            Some(version) => PutMode::Update(version.clone()),
            None => PutMode::Create,
        };

        match self
            .store
            .put_opts(&self.path, payload, PutOptions::from(mode))
            .await
        {
            Ok(_) => Ok(()),
            Err(
                object_store::Error::Precondition { .. } | object_store::Error::AlreadyExists { .. },
            ) => Err(StoreError::Conflict),
            Err(error) => Err(error.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use aqi_structs::{Horizon, ObservationRow};
    use object_store::memory::InMemory;

    use super::*;

    fn synthetic_row(id: u64) -> ObservationRow {
        ObservationRow::new(
            id,
            1_700_000_000 + id as i64 * 3600,
            (100 + id % 50) as i32,
            35.4,
            (id % 24) as u32,
            ((id / 24) % 7) as u32,
            11,
            2023,
            100,
            0,
        )
    }

    fn store() -> DatasetStore {
        DatasetStore::new(Arc::new(InMemory::new()))
    }

    #[tokio::test]
    async fn missing_snapshot_loads_empty() {
        let store = store();
        let snapshot = store.load().await.unwrap();
        assert!(snapshot.is_empty());
    }

    #[tokio::test]
    async fn push_then_load_round_trips_rows() {
        let store = store();
        let mut snapshot = store.load().await.unwrap();
        for id in 0..5 {
            snapshot.append(synthetic_row(id));
        }
        store.push(&snapshot).await.unwrap();

        let reloaded = store.load().await.unwrap();
        assert_eq!(reloaded.rows(), snapshot.rows());
    }

    #[tokio::test]
    async fn concurrent_push_is_detected() {
        let store = store();

        let mut first = store.load().await.unwrap();
        let mut second = store.load().await.unwrap();

        first.append(synthetic_row(0));
        store.push(&first).await.unwrap();

        second.append(synthetic_row(0));
        let error = store.push(&second).await.unwrap_err();
        assert!(matches!(error, StoreError::Conflict));

        // A fresh load observes the winning writer and can push again.
        let mut retried = store.load().await.unwrap();
        retried.append(synthetic_row(1));
        store.push(&retried).await.unwrap();
        assert_eq!(store.load().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn stale_create_is_a_conflict() {
        let store = store();

        let mut first = store.load().await.unwrap();
        let mut second = store.load().await.unwrap();

        first.append(synthetic_row(0));
        store.push(&first).await.unwrap();

        // The second writer loaded before any snapshot existed, so its
        // push is an unconditional create that must not clobber.
        second.append(synthetic_row(0));
        assert!(matches!(
            store.push(&second).await.unwrap_err(),
            StoreError::Conflict
        ));
    }

    #[tokio::test]
    async fn backfilled_labels_survive_round_trip() {
        let store = store();
        let mut snapshot = store.load().await.unwrap();
        for id in 0..30 {
            snapshot.append(synthetic_row(id));
        }
        let updated = snapshot.backfill_targets().unwrap();
        assert_eq!(updated, 6); // rows 0..6 each gain target_day1
        store.push(&snapshot).await.unwrap();

        let reloaded = store.load().await.unwrap();
        assert_eq!(
            reloaded.rows()[0].target(Horizon::Day1),
            Some(f64::from(snapshot.rows()[24].aqi))
        );
    }
}
