//! Reading ingestor for the Open-Meteo air-quality API.
//!
//! Fetches one current-conditions observation per invocation and
//! derives an AQI value from it. Every failure mode maps to a typed
//! [`IngestError`]; callers convert that into the deterministic
//! fallback reading so the pipeline never blocks on an unreachable
//! source.

mod client;
mod models;

use thiserror::Error;

pub use client::MeteoClient;
pub use models::{CurrentReading, FALLBACK_PM25};

/// Errors from fetching the current reading.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Connection, timeout or body-decode failure.
    #[error("air-quality request failed")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("air-quality API returned status {0}")]
    Status(reqwest::StatusCode),

    /// The payload decoded but did not carry usable values.
    #[error("malformed air-quality payload: {0}")]
    MalformedPayload(String),
}
