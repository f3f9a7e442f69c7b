//! Pipeline configuration loaded from environment variables.
//!
//! A `Config` is built once in `main` and passed into each component;
//! the client and store handles it produces are scoped to a single
//! pipeline run.

use core::time::Duration;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use object_store::local::LocalFileSystem;
use object_store::ObjectStore;

/// Default observation coordinates (Karachi).
const DEFAULT_LATITUDE: f64 = 24.8607;
const DEFAULT_LONGITUDE: f64 = 67.0011;

/// Default base directory for the dataset, models and predictions.
const DEFAULT_DATA_DIR: &str = "./data";

/// Timeout applied to calls against the air-quality API.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Bounded retries for a conflicted snapshot push before the cycle
/// fails loudly.
const DEFAULT_MAX_PUSH_ATTEMPTS: usize = 3;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Latitude of the monitored location.
    pub latitude: f64,
    /// Longitude of the monitored location.
    pub longitude: f64,
    /// Base directory backing the object store.
    pub data_dir: PathBuf,
    /// Timeout for external HTTP requests.
    pub request_timeout: Duration,
    /// Maximum retries of the read-modify-write cycle on a storage
    /// conflict.
    pub max_push_attempts: usize,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// Optional environment variables:
    /// - `AQI_LATITUDE` / `AQI_LONGITUDE`: observation coordinates
    ///   (default: Karachi)
    /// - `AQI_DATA_DIR`: base directory for pipeline data
    ///   (default: `./data`)
    ///
    /// # Errors
    ///
    /// Returns an error if a set variable fails to parse.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let latitude = env_or("AQI_LATITUDE", DEFAULT_LATITUDE)?;
        let longitude = env_or("AQI_LONGITUDE", DEFAULT_LONGITUDE)?;
        let data_dir = std::env::var("AQI_DATA_DIR")
            .map_or_else(|_| PathBuf::from(DEFAULT_DATA_DIR), PathBuf::from);

        Ok(Self {
            latitude,
            longitude,
            data_dir,
            request_timeout: REQUEST_TIMEOUT,
            max_push_attempts: DEFAULT_MAX_PUSH_ATTEMPTS,
        })
    }

    /// Creates the local object store backing the dataset snapshot,
    /// model artifacts and prediction log.
    ///
    /// # Errors
    ///
    /// Returns an error if the base directory cannot be created or
    /// opened.
    pub fn object_store(&self) -> anyhow::Result<Arc<dyn ObjectStore>> {
        std::fs::create_dir_all(&self.data_dir).with_context(|| {
            format!("failed to create data directory {}", self.data_dir.display())
        })?;

        let store = LocalFileSystem::new_with_prefix(&self.data_dir)
            .with_context(|| format!("failed to open object store at {}", self.data_dir.display()))?;

        Ok(Arc::new(store))
    }
}

/// Reads an f64 environment variable, falling back to a default when
/// unset.
fn env_or(name: &str, default: f64) -> anyhow::Result<f64> {
    match std::env::var(name) {
        Ok(raw) => raw
            .parse()
            .with_context(|| format!("{name} is not a valid number: {raw}")),
        Err(_) => Ok(default),
    }
}
