//! Open-Meteo geocoding: place name to coordinates.

use crate::config::config;
use crate::http;
use anyhow::Result;
use async_trait::async_trait;
use serde::Deserialize;
use shared::models::Coordinates;

/// Number of candidates asked for; the country filter picks among them.
pub const CANDIDATE_COUNT: u32 = 10;

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Candidate {
    pub name: String,
    pub country: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
}

impl From<Candidate> for Coordinates {
    fn from(c: Candidate) -> Self {
        Coordinates {
            name: c.name,
            country: c.country,
            latitude: c.latitude,
            longitude: c.longitude,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<Candidate>,
}

/// Ranked place candidates for a name.
#[async_trait]
pub trait GeocodingSource: Send + Sync {
    async fn search(&self, name: &str, count: u32) -> Result<Vec<Candidate>>;
}

pub struct OpenMeteoGeocoding {
    client: reqwest::Client,
    base_url: String,
}

impl OpenMeteoGeocoding {
    pub fn new(client: reqwest::Client) -> Self {
        Self {
            client,
            base_url: config().geocoding_url.clone(),
        }
    }
}

#[async_trait]
impl GeocodingSource for OpenMeteoGeocoding {
    async fn search(&self, name: &str, count: u32) -> Result<Vec<Candidate>> {
        let url = http::join(&self.base_url, "search");
        let query = [
            ("name", name.to_string()),
            ("count", count.to_string()),
            ("language", "en".to_string()),
        ];
        let response: SearchResponse = http::get_json(&self.client, &url, &query).await?;
        Ok(response.results)
    }
}

/// First candidate from `country` (case-insensitive), else the first one.
pub fn pick(candidates: Vec<Candidate>, country: Option<&str>) -> Option<Candidate> {
    let wanted = country
        .map(|c| c.trim().to_lowercase())
        .filter(|c| !c.is_empty());

    if let Some(wanted) = wanted {
        let position = candidates.iter().position(|c| {
            c.country
                .as_deref()
                .map_or(false, |country| country.to_lowercase() == wanted)
        });
        if let Some(idx) = position {
            return candidates.into_iter().nth(idx);
        }
    }
    candidates.into_iter().next()
}

/// Resolve a city to coordinates. `Ok(None)` means the place is unknown.
pub async fn resolve(
    source: &dyn GeocodingSource,
    city: &str,
    country: Option<&str>,
) -> Result<Option<Coordinates>> {
    let city = city.trim();
    if city.is_empty() {
        return Ok(None);
    }

    let candidates = source.search(city, CANDIDATE_COUNT).await?;
    let picked = pick(candidates, country);
    if picked.is_none() {
        log::warn!("No geocoding result for {} ({:?})", city, country);
    }
    Ok(picked.map(Coordinates::from))
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    pub fn candidate(name: &str, country: Option<&str>, latitude: f64, longitude: f64) -> Candidate {
        Candidate {
            name: name.to_string(),
            country: country.map(str::to_string),
            latitude,
            longitude,
        }
    }

    /// In-memory geocoder keyed by name; records every lookup.
    #[derive(Default)]
    pub struct FakeGeocoding {
        pub places: HashMap<String, Vec<Candidate>>,
        pub fail: bool,
        pub calls: Mutex<Vec<String>>,
    }

    impl FakeGeocoding {
        pub fn with(name: &str, candidates: Vec<Candidate>) -> Self {
            let mut fake = FakeGeocoding::default();
            fake.places.insert(name.to_string(), candidates);
            fake
        }
    }

    #[async_trait]
    impl GeocodingSource for FakeGeocoding {
        async fn search(&self, name: &str, _count: u32) -> Result<Vec<Candidate>> {
            self.calls.lock().unwrap().push(name.to_string());
            if self.fail {
                anyhow::bail!("geocoding unavailable");
            }
            Ok(self.places.get(name).cloned().unwrap_or_default())
        }
    }

    #[test]
    fn test_pick_country_case_insensitive() {
        let candidates = vec![
            candidate("Suzuka", Some("Australia"), -33.0, 151.0),
            candidate("Suzuka", Some("Japan"), 34.88, 136.58),
        ];
        let picked = pick(candidates.clone(), Some("japan")).unwrap();
        assert_eq!(picked.country.as_deref(), Some("Japan"));
        let picked = pick(candidates, Some("JAPAN")).unwrap();
        assert_eq!(picked.latitude, 34.88);
    }

    #[test]
    fn test_pick_falls_back_to_first() {
        let candidates = vec![
            candidate("Melbourne", Some("Australia"), -37.81, 144.96),
            candidate("Melbourne", Some("United States"), 28.08, -80.6),
        ];
        let picked = pick(candidates.clone(), Some("Atlantis")).unwrap();
        assert_eq!(picked.country.as_deref(), Some("Australia"));
        let picked = pick(candidates, None).unwrap();
        assert_eq!(picked.country.as_deref(), Some("Australia"));
    }

    #[test]
    fn test_pick_skips_candidates_without_country() {
        let candidates = vec![
            candidate("Monaco", None, 43.73, 7.42),
            candidate("Monaco", Some("Monaco"), 43.74, 7.43),
        ];
        let picked = pick(candidates, Some("monaco")).unwrap();
        assert_eq!(picked.latitude, 43.74);
    }

    #[test]
    fn test_pick_empty() {
        assert!(pick(vec![], Some("Japan")).is_none());
    }

    #[test]
    fn test_parse_search_response() {
        let json = r#"{"results":[{"id":1,"name":"Sakhir","latitude":26.03,"longitude":50.51,"country":"Bahrain","admin1":"Southern"}],"generationtime_ms":0.5}"#;
        let response: SearchResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.results[0].name, "Sakhir");

        let empty: SearchResponse = serde_json::from_str(r#"{"generationtime_ms":0.2}"#).unwrap();
        assert!(empty.results.is_empty());
    }

    #[tokio::test]
    async fn test_resolve_empty_response() {
        let source = FakeGeocoding::default();
        let resolved = resolve(&source, "Nowhere", Some("Japan")).await.unwrap();
        assert!(resolved.is_none());
    }

    #[tokio::test]
    async fn test_resolve_blank_city_skips_lookup() {
        let source = FakeGeocoding::default();
        assert!(resolve(&source, "  ", None).await.unwrap().is_none());
        assert!(source.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_resolve_picks_country() {
        let source = FakeGeocoding::with(
            "Suzuka",
            vec![
                candidate("Suzuka", Some("Australia"), -33.0, 151.0),
                candidate("Suzuka", Some("Japan"), 34.88, 136.58),
            ],
        );
        let resolved = resolve(&source, "Suzuka", Some("japan")).await.unwrap().unwrap();
        assert_eq!(resolved.country.as_deref(), Some("Japan"));
        assert_eq!(resolved.longitude, 136.58);
    }
}
