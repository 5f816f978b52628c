use once_cell::sync::Lazy;
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize)]
pub struct Config {
    #[serde(default = "default_race_api_url")]
    pub race_api_url: String,
    #[serde(default = "default_geocoding_url")]
    pub geocoding_url: String,
    #[serde(default = "default_archive_url")]
    pub archive_url: String,
    #[serde(default = "default_http_timeout_secs")]
    pub http_timeout_secs: u64,
    /// Geocode/weather lookups allowed in flight for one schedule.
    #[serde(default = "default_weather_concurrency")]
    pub weather_concurrency: usize,
    #[serde(default = "default_season")]
    pub season: String,
}

impl Config {
    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }
}

fn default_race_api_url() -> String {
    "https://f1api.dev/api".to_string()
}

fn default_geocoding_url() -> String {
    "https://geocoding-api.open-meteo.com/v1".to_string()
}

fn default_archive_url() -> String {
    "https://archive-api.open-meteo.com/v1".to_string()
}

fn default_http_timeout_secs() -> u64 {
    30
}

fn default_weather_concurrency() -> usize {
    4
}

fn default_season() -> String {
    "current".to_string()
}

pub static CONFIG: Lazy<Config> = Lazy::new(|| {
    envy::prefixed("PADDOCK_")
        .from_env::<Config>()
        .expect("Invalid config. Optional env vars: PADDOCK_RACE_API_URL, PADDOCK_GEOCODING_URL, PADDOCK_ARCHIVE_URL, PADDOCK_HTTP_TIMEOUT_SECS, PADDOCK_WEATHER_CONCURRENCY, PADDOCK_SEASON")
});

pub fn config() -> &'static Config {
    &CONFIG
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_env() {
        let config: Config = envy::from_iter(Vec::<(String, String)>::new()).unwrap();
        assert_eq!(config.race_api_url, "https://f1api.dev/api");
        assert_eq!(config.weather_concurrency, 4);
        assert_eq!(config.season, "current");
        assert_eq!(config.http_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_overrides() {
        let vars = vec![
            ("PADDOCK_SEASON".to_string(), "2024".to_string()),
            ("PADDOCK_WEATHER_CONCURRENCY".to_string(), "1".to_string()),
        ];
        let config: Config = envy::prefixed("PADDOCK_").from_iter(vars).unwrap();
        assert_eq!(config.season, "2024");
        assert_eq!(config.weather_concurrency, 1);
        assert_eq!(config.archive_url, "https://archive-api.open-meteo.com/v1");
    }

    #[test]
    fn test_bad_number_is_rejected() {
        let vars = vec![("PADDOCK_HTTP_TIMEOUT_SECS".to_string(), "soon".to_string())];
        let result = envy::prefixed("PADDOCK_").from_iter::<_, Config>(vars);
        assert!(result.is_err());
    }
}
