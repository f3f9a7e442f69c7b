//! Feature derivation for the AQI forecast models.
//!
//! This crate owns the model's feature schema: the fixed 7-feature
//! input order, the temporal fields derived from the observation
//! timestamp, and the 24-row lag features computed against recent
//! history.

use aqi_structs::ObservationRow;
use chrono::{DateTime, Datelike, Timelike, Utc};
use meteo_ingestor::CurrentReading;
use serde::Serialize;

/// Number of model input features.
pub const FEATURE_COUNT: usize = 7;

/// Model input column names, in input order.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "hour",
    "day_of_week",
    "month",
    "aqi",
    "aqi_yesterday",
    "aqi_change_24h",
    "pm2_5",
];

/// Rows of history consumed by the lag features (one day at hourly
/// cadence).
pub const LOOKBACK_ROWS: usize = 24;

/// A fixed-order model input vector.
pub type ModelInput = [f64; FEATURE_COUNT];

/// The feature record derived for one ingestion cycle.
///
/// Serialized verbatim into the prediction artifact as the features
/// snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureRecord {
    pub timestamp: DateTime<Utc>,
    pub aqi: i32,
    pub pm2_5: f64,
    pub hour: u32,
    /// Monday = 0.
    pub day_of_week: u32,
    pub month: u32,
    pub year: i32,
    pub aqi_yesterday: i32,
    pub aqi_change_24h: i32,
}

impl FeatureRecord {
    /// The record as a model input vector.
    #[must_use]
    pub fn to_model_input(&self) -> ModelInput {
        [
            f64::from(self.hour),
            f64::from(self.day_of_week),
            f64::from(self.month),
            f64::from(self.aqi),
            f64::from(self.aqi_yesterday),
            f64::from(self.aqi_change_24h),
            self.pm2_5,
        ]
    }

    /// The record as a dataset row with pending targets. The id is a
    /// placeholder; the store assigns the real one at append time.
    #[must_use]
    pub fn to_row(&self) -> ObservationRow {
        ObservationRow::new(
            0,
            self.timestamp.timestamp(),
            self.aqi,
            self.pm2_5,
            self.hour,
            self.day_of_week,
            self.month,
            self.year,
            self.aqi_yesterday,
            self.aqi_change_24h,
        )
    }
}

/// Derives the feature record for a reading against the dataset's
/// current history (the rows as loaded, before this cycle's append).
///
/// Cold-start policy: with fewer than [`LOOKBACK_ROWS`] rows of
/// history, `aqi_yesterday` equals the current `aqi`, which pins
/// `aqi_change_24h` to zero until enough history accumulates.
#[must_use]
pub fn build_features(reading: &CurrentReading, history: &[ObservationRow]) -> FeatureRecord {
    let aqi_yesterday = if history.len() >= LOOKBACK_ROWS {
        history[history.len() - LOOKBACK_ROWS].aqi
    } else {
        reading.aqi
    };

    FeatureRecord {
        timestamp: reading.timestamp,
        aqi: reading.aqi,
        pm2_5: reading.pm2_5,
        hour: reading.timestamp.hour(),
        day_of_week: reading.timestamp.weekday().num_days_from_monday(),
        month: reading.timestamp.month(),
        year: reading.timestamp.year(),
        aqi_yesterday,
        aqi_change_24h: reading.aqi - aqi_yesterday,
    }
}

/// A stored row as a model input vector, in the same fixed order as
/// [`FeatureRecord::to_model_input`].
#[must_use]
pub fn row_to_input(row: &ObservationRow) -> ModelInput {
    [
        f64::from(row.hour),
        f64::from(row.day_of_week),
        f64::from(row.month),
        f64::from(row.aqi),
        f64::from(row.aqi_yesterday),
        f64::from(row.aqi_change_24h),
        row.pm2_5,
    ]
}
