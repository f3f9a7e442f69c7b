//! Shared domain types for the AQI forecast pipeline.
//!
//! This crate defines the observation row stored in the dataset, the
//! forecast horizons, and the AQI conversion math used by both the
//! ingestion and prediction paths.

mod aqi;
mod horizon;
mod observation;

pub use aqi::{pm25_to_aqi, AQI_MAX, PM25_FULL_SCALE};
pub use horizon::Horizon;
pub use observation::{Forecast, ModelInfo, ObservationRow, TargetAlreadySet};
