//! HTTP client for the Open-Meteo air-quality endpoint.

use config::Config;
use reqwest::Client;
use tracing::info;

use crate::models::{parse_observation_time, AirQualityResponse};
use crate::{CurrentReading, IngestError};

/// Current-conditions endpoint.
const API_BASE_URL: &str = "https://air-quality-api.open-meteo.com/v1/air-quality";

/// Client for the current-conditions source.
///
/// The request timeout is bounded (5 seconds by default) so an
/// unreachable source can never stall the cycle; callers fall back to
/// [`CurrentReading::fallback`] on any error instead of retrying.
pub struct MeteoClient {
    client: Client,
    base_url: String,
    latitude: f64,
    longitude: f64,
}

impl MeteoClient {
    /// Creates a client scoped to one pipeline run.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: &Config) -> Result<Self, IngestError> {
        let client = Client::builder().timeout(config.request_timeout).build()?;

        Ok(Self {
            client,
            base_url: API_BASE_URL.to_string(),
            latitude: config.latitude,
            longitude: config.longitude,
        })
    }

    /// Fetches the current PM2.5 observation and derives a reading.
    ///
    /// # Errors
    ///
    /// Returns an error on timeout, transport failure, non-success
    /// status or malformed payload. None of these are fatal to the
    /// pipeline; the caller substitutes the deterministic fallback.
    pub async fn fetch_current(&self) -> Result<CurrentReading, IngestError> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("latitude", self.latitude.to_string()),
                ("longitude", self.longitude.to_string()),
                ("current", "pm2_5".to_string()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(IngestError::Status(status));
        }

        let payload: AirQualityResponse = response.json().await?;

        let timestamp = parse_observation_time(&payload.current.time).ok_or_else(|| {
            IngestError::MalformedPayload(format!(
                "unparsable observation time: {}",
                payload.current.time
            ))
        })?;

        let reading = CurrentReading::from_pm25(payload.current.pm2_5, timestamp);
        info!(
            aqi = reading.aqi,
            pm2_5 = reading.pm2_5,
            timestamp = %reading.timestamp,
            "fetched current reading"
        );

        Ok(reading)
    }
}
