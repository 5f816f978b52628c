//! Race results API (f1api.dev) source: season calendars and drivers' championship.

use crate::config::config;
use crate::http;
use anyhow::Result;
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;

/// Read-only access to season data.
#[async_trait]
pub trait RaceSource: Send + Sync {
    /// Races of a season (`current` or a year).
    async fn season_races(&self, season: &str) -> Result<Season>;

    /// Drivers' championship classification of a season.
    async fn driver_standings(&self, season: &str) -> Result<Vec<ApiDriverStanding>>;
}

/// Numbers the API sometimes sends as strings.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum NumOrText {
    Number(u64),
    Text(String),
}

impl NumOrText {
    pub fn number(&self) -> Option<u32> {
        match self {
            NumOrText::Number(n) => u32::try_from(*n).ok(),
            NumOrText::Text(s) => s.trim().parse().ok(),
        }
    }
}

impl std::fmt::Display for NumOrText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NumOrText::Number(n) => write!(f, "{}", n),
            NumOrText::Text(s) => write!(f, "{}", s),
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct Season {
    pub season: Option<NumOrText>,
    #[serde(default)]
    pub races: Vec<ApiRace>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiRace {
    pub race_id: Option<String>,
    pub race_name: Option<String>,
    pub name: Option<String>,
    pub round: Option<NumOrText>,
    pub season: Option<NumOrText>,
    pub circuit: Option<ApiCircuit>,
    /// Sessions keyed by `fp1`, `qualy`, `race`, ...
    #[serde(default)]
    pub schedule: HashMap<String, Option<ApiSession>>,
    pub date: Option<String>,
    pub time: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiCircuit {
    pub circuit_name: Option<String>,
    pub name: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub location: Option<ApiCircuitLocation>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct ApiCircuitLocation {
    pub city: Option<String>,
    pub locality: Option<String>,
    pub country: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct ApiSession {
    pub date: Option<String>,
    pub time: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StandingsResponse {
    #[serde(default)]
    drivers_championship: Vec<ApiDriverStanding>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiDriverStanding {
    pub classification_id: Option<NumOrText>,
    pub driver_id: String,
    pub team_id: Option<String>,
    pub points: Option<f64>,
    pub position: Option<NumOrText>,
    pub wins: Option<u32>,
    pub driver: Option<ApiDriver>,
    pub team: Option<ApiTeam>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiDriver {
    pub name: Option<String>,
    pub surname: Option<String>,
    pub nationality: Option<String>,
    pub number: Option<NumOrText>,
    pub short_name: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiTeam {
    pub team_id: Option<String>,
    pub team_name: Option<String>,
}

pub struct F1Api {
    client: reqwest::Client,
    base_url: String,
}

impl F1Api {
    pub fn new(client: reqwest::Client) -> Self {
        Self {
            client,
            base_url: config().race_api_url.clone(),
        }
    }

    /// URL format: `{BASE}/{season}` or `{BASE}/{season}/drivers-championship`
    pub fn build_url(base_url: &str, season: &str, path: Option<&str>) -> String {
        let season_url = http::join(base_url, season.trim());
        match path {
            Some(path) => http::join(&season_url, path),
            None => season_url,
        }
    }
}

#[async_trait]
impl RaceSource for F1Api {
    async fn season_races(&self, season: &str) -> Result<Season> {
        let url = Self::build_url(&self.base_url, season, None);
        let season: Season = http::get_json(&self.client, &url, &[]).await?;
        log::info!("Fetched {} races", season.races.len());
        Ok(season)
    }

    async fn driver_standings(&self, season: &str) -> Result<Vec<ApiDriverStanding>> {
        let url = Self::build_url(&self.base_url, season, Some("drivers-championship"));
        let response: StandingsResponse = http::get_json(&self.client, &url, &[]).await?;
        log::info!(
            "Fetched {} driver standings",
            response.drivers_championship.len()
        );
        Ok(response.drivers_championship)
    }
}
