//! Storage error kinds.

use aqi_structs::TargetAlreadySet;
use thiserror::Error;

/// Errors from the dataset store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Another writer pushed a snapshot between our load and push.
    /// Retry the whole read-modify-write cycle with fresh data.
    #[error("dataset snapshot was modified by a concurrent writer")]
    Conflict,

    /// A backfill attempted to overwrite a resolved label. This is a
    /// data-integrity fault, not a recoverable condition.
    #[error(transparent)]
    TargetAlreadySet(#[from] TargetAlreadySet),

    #[error("failed to encode or decode dataset snapshot")]
    Codec(#[from] serde_json::Error),

    #[error("object store operation failed")]
    ObjectStore(#[from] object_store::Error),
}
