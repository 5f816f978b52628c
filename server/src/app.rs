use crate::config::config;
use crate::correlate::Correlator;
use crate::f1api::{F1Api, RaceSource};
use crate::geocoding::OpenMeteoGeocoding;
use crate::http;
use crate::weather::OpenMeteoArchive;
use anyhow::Result;
use std::sync::Arc;

/// Upstream sources wired together, shared by the CLI and the HTTP server.
pub struct App {
    pub races: Arc<dyn RaceSource>,
    pub correlator: Correlator,
    pub season: String,
}

impl App {
    pub fn from_config() -> Result<Self> {
        let client = http::client()?;
        let correlator = Correlator::new(
            Arc::new(OpenMeteoGeocoding::new(client.clone())),
            Arc::new(OpenMeteoArchive::new(client.clone())),
            config().weather_concurrency,
        );
        Ok(App {
            races: Arc::new(F1Api::new(client)),
            correlator,
            season: config().season.clone(),
        })
    }

    /// The given season, or the configured default.
    pub fn season<'a>(&'a self, season: Option<&'a str>) -> &'a str {
        season
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(self.season.as_str())
    }
}
