//! Response payloads and the derived reading type.

use aqi_structs::pm25_to_aqi;
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Deserialize;

/// PM2.5 concentration used for the deterministic fallback reading.
/// Converts to an AQI of exactly 100.
pub const FALLBACK_PM25: f64 = 35.4;

/// Open-Meteo air-quality response, reduced to the fields we consume.
#[derive(Debug, Deserialize)]
pub(crate) struct AirQualityResponse {
    pub current: CurrentConditions,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CurrentConditions {
    /// ISO-8601 observation time.
    pub time: String,
    pub pm2_5: f64,
}

/// One ingested observation: the derived AQI plus its raw inputs.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentReading {
    /// AQI derived from `pm2_5`, clamped to `[0, 500]`.
    pub aqi: i32,
    /// Observation instant.
    pub timestamp: DateTime<Utc>,
    /// Raw PM2.5 concentration.
    pub pm2_5: f64,
    /// Whether this reading is the deterministic fallback rather than
    /// a real observation.
    pub is_fallback: bool,
}

impl CurrentReading {
    /// Derives a reading from a fetched PM2.5 concentration.
    #[must_use]
    pub fn from_pm25(pm2_5: f64, timestamp: DateTime<Utc>) -> Self {
        Self {
            aqi: pm25_to_aqi(pm2_5),
            timestamp,
            pm2_5,
            is_fallback: false,
        }
    }

    /// The deterministic reading used when the external source is
    /// unreachable: AQI 100, PM2.5 35.4, current wall-clock time.
    #[must_use]
    pub fn fallback() -> Self {
        Self {
            aqi: pm25_to_aqi(FALLBACK_PM25),
            timestamp: Utc::now(),
            pm2_5: FALLBACK_PM25,
            is_fallback: true,
        }
    }
}

/// Parses the API's observation time.
///
/// Open-Meteo returns minute-resolution ISO-8601 without a zone
/// designator (`2026-08-23T10:00`); full RFC 3339 stamps are accepted
/// too. Naive stamps are taken as UTC.
pub(crate) fn parse_observation_time(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(stamp) = DateTime::parse_from_rfc3339(raw) {
        return Some(stamp.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use chrono::Timelike;

    use super::*;

    #[test]
    fn payload_decodes_current_block() {
        let json = r#"{
            "latitude": 24.875,
            "longitude": 67.0,
            "current": {"time": "2026-08-23T10:00", "interval": 3600, "pm2_5": 53.1}
        }"#;
        let payload: AirQualityResponse = serde_json::from_str(json).unwrap();
        assert_eq!(payload.current.pm2_5, 53.1);
        assert_eq!(payload.current.time, "2026-08-23T10:00");
    }

    #[test]
    fn minute_resolution_time_parses_as_utc() {
        let stamp = parse_observation_time("2026-08-23T10:00").unwrap();
        assert_eq!(stamp.hour(), 10);
        assert_eq!(stamp.to_rfc3339(), "2026-08-23T10:00:00+00:00");
    }

    #[test]
    fn rfc3339_time_parses() {
        let stamp = parse_observation_time("2026-08-23T10:00:00+05:00").unwrap();
        assert_eq!(stamp.hour(), 5);
    }

    #[test]
    fn garbage_time_is_rejected() {
        assert!(parse_observation_time("not-a-time").is_none());
    }

    #[test]
    fn fallback_reading_is_deterministic() {
        let reading = CurrentReading::fallback();
        assert_eq!(reading.aqi, 100);
        assert_eq!(reading.pm2_5, FALLBACK_PM25);
        assert!(reading.is_fallback);
    }

    #[test]
    fn reading_derives_clamped_aqi() {
        let now = Utc::now();
        assert_eq!(CurrentReading::from_pm25(1000.0, now).aqi, 500);
        assert_eq!(CurrentReading::from_pm25(0.0, now).aqi, 0);
    }
}
