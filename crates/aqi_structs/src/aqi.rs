//! PM2.5 to AQI conversion.

/// Upper bound of the AQI scale.
pub const AQI_MAX: i32 = 500;

/// PM2.5 concentration (µg/m³) that maps to an AQI of 100.
pub const PM25_FULL_SCALE: f64 = 35.4;

/// Converts a raw PM2.5 concentration to an AQI value.
///
/// Uses the linear mapping `round(pm2_5 / 35.4 * 100)` clamped to
/// `[0, 500]`.
#[must_use]
pub fn pm25_to_aqi(pm2_5: f64) -> i32 {
    let aqi = (pm2_5 / PM25_FULL_SCALE * 100.0).round() as i32;
    aqi.clamp(0, AQI_MAX)
}
