//! Schedule report assembly: race resolution, then per-event weather.

use crate::f1api::RaceSource;
use crate::geocoding::{self, GeocodingSource};
use crate::schedule::{self, ResolvedRace};
use crate::weather::{self, WeatherSource};
use anyhow::Result;
use chrono::{DateTime, Utc};
use futures::StreamExt;
use shared::models::{
    Coordinates, Event, EventWeather, Location, ScheduleReport, WeatherSample, WeatherStatus,
};
use std::sync::Arc;

/// Reported to clients for a failed lookup; the cause only goes to the log.
pub const LOOKUP_FAILED: &str = "Weather lookup failed";

pub struct Correlator {
    geocoding: Arc<dyn GeocodingSource>,
    weather: Arc<dyn WeatherSource>,
    concurrency: usize,
}

impl Correlator {
    pub fn new(
        geocoding: Arc<dyn GeocodingSource>,
        weather: Arc<dyn WeatherSource>,
        concurrency: usize,
    ) -> Self {
        Self {
            geocoding,
            weather,
            concurrency: concurrency.max(1),
        }
    }

    /// Weather for every event, in event order.
    ///
    /// Lookups run `concurrency` at a time; a failing event never affects
    /// the others.
    pub async fn correlate(&self, location: &Location, events: Vec<Event>) -> Vec<EventWeather> {
        let results: Vec<EventWeather> = futures::stream::iter(events)
            .map(|event| self.event_weather(location, event))
            .buffered(self.concurrency)
            .collect()
            .await;

        log_summary(location, &results);
        results
    }

    pub async fn event_weather(&self, location: &Location, event: Event) -> EventWeather {
        let Some(instant) = event.instant() else {
            return EventWeather::without_weather(event, WeatherStatus::Tba);
        };
        if location.city.trim().is_empty() {
            return EventWeather::without_weather(event, WeatherStatus::NoCityData);
        }

        match self.lookup(location, instant).await {
            Ok(None) => EventWeather::without_weather(event, WeatherStatus::LocationNotFound),
            Ok(Some((coordinates, Some(sample)))) => EventWeather {
                event,
                coordinates: Some(coordinates),
                sample: Some(sample),
                status: WeatherStatus::Ok,
            },
            Ok(Some((coordinates, None))) => {
                log::warn!(
                    "No weather sample for {} at {}",
                    event.kind.label(),
                    instant
                );
                EventWeather {
                    event,
                    coordinates: Some(coordinates),
                    sample: None,
                    status: WeatherStatus::DataUnavailable,
                }
            }
            Err(e) => {
                log::error!("Error fetching weather for {}: {:#}", location.city, e);
                EventWeather::without_weather(
                    event,
                    WeatherStatus::Error(LOOKUP_FAILED.to_string()),
                )
            }
        }
    }

    async fn lookup(
        &self,
        location: &Location,
        instant: DateTime<Utc>,
    ) -> Result<Option<(Coordinates, Option<WeatherSample>)>> {
        let Some(coordinates) = geocoding::resolve(
            self.geocoding.as_ref(),
            &location.city,
            location.country_hint(),
        )
        .await?
        else {
            return Ok(None);
        };

        let sample = weather::weather_at(
            self.weather.as_ref(),
            coordinates.latitude,
            coordinates.longitude,
            instant,
        )
        .await?;
        Ok(Some((coordinates, sample)))
    }
}

/// Resolve a race and annotate its events. Without a correlator the events
/// are reported as `Skipped` (or `Tba`).
pub async fn schedule_report(
    races: &dyn RaceSource,
    correlator: Option<&Correlator>,
    season: &str,
    race_id: &str,
) -> Result<ScheduleReport> {
    let race = schedule::resolve(races, season, race_id).await?;
    Ok(annotate(race, correlator).await)
}

pub async fn annotate(race: ResolvedRace, correlator: Option<&Correlator>) -> ScheduleReport {
    let events = match correlator {
        Some(correlator) => correlator.correlate(&race.location, race.events).await,
        None => race
            .events
            .into_iter()
            .map(|event| {
                let status = if event.is_tba() {
                    WeatherStatus::Tba
                } else {
                    WeatherStatus::Skipped
                };
                EventWeather::without_weather(event, status)
            })
            .collect(),
    };

    ScheduleReport {
        race_id: race.race_id,
        race_name: race.name,
        round: race.round,
        season: race.season,
        circuit_name: race.circuit_name,
        location: race.location,
        events,
    }
}

fn log_summary(location: &Location, results: &[EventWeather]) {
    log::info!(
        "Weather data collected for {}, {}:",
        location.city,
        location.country
    );
    for r in results {
        let sample = r.sample.clone().unwrap_or_default();
        log::info!(
            "  {:<18} {:<25} lat={:?} lon={:?} temp={:?} precip_mm={:?} wind_kmh={:?} humidity_pct={:?} status={}",
            r.event.kind.label(),
            r.event
                .instant()
                .map(|i| i.to_rfc3339())
                .unwrap_or_default(),
            r.coordinates.as_ref().map(|c| c.latitude),
            r.coordinates.as_ref().map(|c| c.longitude),
            sample.temperature,
            sample.precipitation_mm,
            sample.wind_kmh,
            sample.humidity_pct,
            r.status.placeholder().unwrap_or("ok"),
        );
    }
}
