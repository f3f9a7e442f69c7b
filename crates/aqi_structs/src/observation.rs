//! Observation rows, forecasts and model metadata.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::Horizon;

/// Attempt to overwrite a target label that has already been resolved.
///
/// Targets are one-shot: once backfilled from the future row they may
/// never change. A violation indicates a backfill bug or concurrent
/// write corruption, so it is surfaced rather than ignored.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("target {horizon} of row {id} is already set")]
pub struct TargetAlreadySet {
    pub id: u64,
    pub horizon: Horizon,
}

/// One row of the append-only dataset, written once per ingestion
/// cycle.
///
/// Every column has exactly one fixed-width native type; heterogeneous
/// numeric types across writes are a schema-drift hazard the struct
/// definition rules out. The target columns start null and are
/// backfilled once the corresponding future row exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObservationRow {
    /// Sequential id assigned at append time, never reused.
    pub id: u64,
    /// Observation instant, epoch seconds.
    pub timestamp: i64,
    /// Computed AQI, clamped to `[0, 500]`.
    pub aqi: i32,
    /// Raw PM2.5 concentration.
    pub pm2_5: f64,
    pub hour: u32,
    /// Day of week, Monday = 0.
    pub day_of_week: u32,
    pub month: u32,
    pub year: i32,
    /// AQI 24 rows prior at write time, or `aqi` when unavailable.
    pub aqi_yesterday: i32,
    pub aqi_change_24h: i32,
    target_day1: Option<f64>,
    target_day2: Option<f64>,
    target_day3: Option<f64>,
}

impl ObservationRow {
    /// Creates a row with all target labels still pending.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: u64,
        timestamp: i64,
        aqi: i32,
        pm2_5: f64,
        hour: u32,
        day_of_week: u32,
        month: u32,
        year: i32,
        aqi_yesterday: i32,
        aqi_change_24h: i32,
    ) -> Self {
        Self {
            id,
            timestamp,
            aqi,
            pm2_5,
            hour,
            day_of_week,
            month,
            year,
            aqi_yesterday,
            aqi_change_24h,
            target_day1: None,
            target_day2: None,
            target_day3: None,
        }
    }

    /// The target label for a horizon, or `None` while pending.
    #[must_use]
    pub fn target(&self, horizon: Horizon) -> Option<f64> {
        match horizon {
            Horizon::Day1 => self.target_day1,
            Horizon::Day2 => self.target_day2,
            Horizon::Day3 => self.target_day3,
        }
    }

    /// Resolves a pending target label. One-shot: fails if the label
    /// is already set.
    pub fn set_target(&mut self, horizon: Horizon, value: f64) -> Result<(), TargetAlreadySet> {
        let slot = match horizon {
            Horizon::Day1 => &mut self.target_day1,
            Horizon::Day2 => &mut self.target_day2,
            Horizon::Day3 => &mut self.target_day3,
        };
        if slot.is_some() {
            return Err(TargetAlreadySet {
                id: self.id,
                horizon,
            });
        }
        *slot = Some(value);
        Ok(())
    }

    /// Whether every target label has been resolved. Only such rows
    /// qualify as training examples.
    #[must_use]
    pub fn fully_labeled(&self) -> bool {
        Horizon::ALL.iter().all(|h| self.target(*h).is_some())
    }
}

/// A three-horizon forecast produced by one prediction pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    pub day1: f64,
    pub day2: f64,
    pub day3: f64,
}

impl Forecast {
    /// The predicted value for a horizon.
    #[must_use]
    pub fn get(&self, horizon: Horizon) -> f64 {
        match horizon {
            Horizon::Day1 => self.day1,
            Horizon::Day2 => self.day2,
            Horizon::Day3 => self.day3,
        }
    }
}

/// Metadata persisted alongside each horizon's winning model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelInfo {
    pub model_name: String,
    /// Mean absolute error on the held-out split.
    pub mae: f64,
    pub r2: f64,
    pub features: Vec<String>,
    pub target: String,
    pub trained_at: DateTime<Utc>,
    pub training_samples: usize,
}
