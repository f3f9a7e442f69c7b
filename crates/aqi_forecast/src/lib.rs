//! AQI Forecast Pipeline
//!
//! Ingests hourly air-quality readings into an append-only dataset,
//! backfills deferred forecast labels, and serves short-horizon AQI
//! forecasts from periodically retrained regression models.

pub mod artifact;
pub mod commands;
