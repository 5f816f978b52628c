//! Open-Meteo historical archive: hourly weather for one UTC day.

use crate::classify::ms_to_kmh;
use crate::config::config;
use crate::http;
use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use shared::models::WeatherSample;

/// Hourly variables requested from the archive.
pub const HOURLY_VARS: &str = "temperature_2m,relativehumidity_2m,windspeed_10m,precipitation";

/// Hourly series as returned by the archive, arrays aligned on `time`.
///
/// Timestamps look like `2025-03-16T04:00` (UTC, no seconds).
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct HourlySeries {
    #[serde(default)]
    pub time: Vec<String>,
    #[serde(default)]
    pub temperature_2m: Vec<Option<f64>>,
    #[serde(default)]
    pub relativehumidity_2m: Vec<Option<f64>>,
    /// Metres per second (the request pins `wind_speed_unit=ms`).
    #[serde(default)]
    pub windspeed_10m: Vec<Option<f64>>,
    #[serde(default)]
    pub precipitation: Vec<Option<f64>>,
}

impl HourlySeries {
    /// Sample at `idx`; a short or null array only blanks its own field.
    pub fn sample_at(&self, idx: usize) -> WeatherSample {
        WeatherSample {
            temperature: value_at(&self.temperature_2m, idx),
            precipitation_mm: value_at(&self.precipitation, idx),
            wind_kmh: value_at(&self.windspeed_10m, idx).map(ms_to_kmh),
            humidity_pct: value_at(&self.relativehumidity_2m, idx),
        }
    }

    /// Sample for the hour of `instant`, if the series covers it.
    pub fn sample_for(&self, instant: DateTime<Utc>) -> Option<WeatherSample> {
        match_hour(&self.time, instant).map(|idx| self.sample_at(idx))
    }
}

fn value_at(values: &[Option<f64>], idx: usize) -> Option<f64> {
    values.get(idx).copied().flatten()
}

/// Index of the timestamp matching `instant`.
///
/// Exact minute match first, then the first entry of the same date and hour.
pub fn match_hour(times: &[String], instant: DateTime<Utc>) -> Option<usize> {
    let target = instant.format("%Y-%m-%dT%H:%M").to_string();
    if let Some(idx) = times.iter().position(|t| *t == target) {
        return Some(idx);
    }
    let hour_prefix = &target[..13];
    times.iter().position(|t| t.starts_with(hour_prefix))
}

#[derive(Debug, Default, Deserialize)]
struct ArchiveResponse {
    hourly: Option<HourlySeries>,
}

#[async_trait]
pub trait WeatherSource: Send + Sync {
    /// Hourly series for one UTC day, `None` when the archive has no data.
    async fn hourly(&self, latitude: f64, longitude: f64, day: NaiveDate) -> Result<Option<HourlySeries>>;
}

pub struct OpenMeteoArchive {
    client: reqwest::Client,
    base_url: String,
}

impl OpenMeteoArchive {
    pub fn new(client: reqwest::Client) -> Self {
        Self {
            client,
            base_url: config().archive_url.clone(),
        }
    }

    pub fn build_query(latitude: f64, longitude: f64, day: NaiveDate) -> Vec<(&'static str, String)> {
        let day = day.format("%Y-%m-%d").to_string();
        vec![
            ("latitude", latitude.to_string()),
            ("longitude", longitude.to_string()),
            ("start_date", day.clone()),
            ("end_date", day),
            ("hourly", HOURLY_VARS.to_string()),
            ("wind_speed_unit", "ms".to_string()),
            ("timezone", "UTC".to_string()),
        ]
    }
}

#[async_trait]
impl WeatherSource for OpenMeteoArchive {
    async fn hourly(&self, latitude: f64, longitude: f64, day: NaiveDate) -> Result<Option<HourlySeries>> {
        let url = http::join(&self.base_url, "archive");
        let query = Self::build_query(latitude, longitude, day);
        let response: ArchiveResponse = http::get_json(&self.client, &url, &query).await?;
        Ok(response.hourly.filter(|h| !h.time.is_empty()))
    }
}

/// Weather at `instant` for the given coordinates. `Ok(None)` is "data N/A".
pub async fn weather_at(
    source: &dyn WeatherSource,
    latitude: f64,
    longitude: f64,
    instant: DateTime<Utc>,
) -> Result<Option<WeatherSample>> {
    let series = source.hourly(latitude, longitude, instant.date_naive()).await?;
    Ok(series.and_then(|s| s.sample_for(instant)))
}
