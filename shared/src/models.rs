use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// Named session of a race weekend, in display order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum EventKind {
    Practice1,
    Practice2,
    Practice3,
    Qualifying,
    SprintQualifying,
    SprintRace,
    Race,
}

impl EventKind {
    pub const ALL: [EventKind; 7] = [
        EventKind::Practice1,
        EventKind::Practice2,
        EventKind::Practice3,
        EventKind::Qualifying,
        EventKind::SprintQualifying,
        EventKind::SprintRace,
        EventKind::Race,
    ];

    /// Key of the session in the race API's `schedule` object.
    pub fn api_key(self) -> &'static str {
        match self {
            EventKind::Practice1 => "fp1",
            EventKind::Practice2 => "fp2",
            EventKind::Practice3 => "fp3",
            EventKind::Qualifying => "qualy",
            EventKind::SprintQualifying => "sprintQualy",
            EventKind::SprintRace => "sprintRace",
            EventKind::Race => "race",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            EventKind::Practice1 => "Practice 1",
            EventKind::Practice2 => "Practice 2",
            EventKind::Practice3 => "Practice 3",
            EventKind::Qualifying => "Qualifying",
            EventKind::SprintQualifying => "Sprint Qualifying",
            EventKind::SprintRace => "Sprint Race",
            EventKind::Race => "Race",
        }
    }

    /// Sprint race and race get the large cards of the bottom row.
    pub fn is_prominent(self) -> bool {
        matches!(self, EventKind::SprintRace | EventKind::Race)
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub kind: EventKind,
    pub date: Option<NaiveDate>,
    pub time: Option<String>,
}

impl Event {
    /// Start of the session, only known when both date and time are present.
    pub fn instant(&self) -> Option<DateTime<Utc>> {
        let date = self.date?;
        let time = self.time.as_deref().map(str::trim).filter(|t| !t.is_empty())?;
        parse_utc(&format!("{}T{}", date.format("%Y-%m-%d"), time))
    }

    pub fn is_tba(&self) -> bool {
        self.instant().is_none()
    }
}

/// Parse a date-time as RFC 3339, or as a naive date-time taken to be UTC.
pub fn parse_utc(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    let naive = s.strip_suffix('Z').unwrap_or(s);
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(naive, fmt).ok())
        .map(|dt| dt.and_utc())
}

/// Free-text place of a circuit, as given by the race API.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct Location {
    pub city: String,
    pub country: String,
}

impl Location {
    pub fn country_hint(&self) -> Option<&str> {
        Some(self.country.trim()).filter(|c| !c.is_empty())
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Coordinates {
    pub name: String,
    pub country: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
}

/// One hourly weather record. Wind is already in km/h.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherSample {
    pub temperature: Option<f64>,
    pub precipitation_mm: Option<f64>,
    pub wind_kmh: Option<f64>,
    pub humidity_pct: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "message")]
pub enum WeatherStatus {
    Ok,
    Tba,
    /// Weather lookup was not asked for.
    Skipped,
    NoCityData,
    LocationNotFound,
    DataUnavailable,
    Error(String),
}

impl WeatherStatus {
    /// Inline text shown in place of the missing metrics.
    pub fn placeholder(&self) -> Option<&'static str> {
        match self {
            WeatherStatus::Ok => None,
            WeatherStatus::Tba => Some("TBA"),
            WeatherStatus::Skipped => Some("-"),
            WeatherStatus::NoCityData => Some("No city data"),
            WeatherStatus::LocationNotFound => Some("Location not found"),
            WeatherStatus::DataUnavailable => Some("Data N/A"),
            WeatherStatus::Error(_) => Some("Error"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventWeather {
    pub event: Event,
    pub coordinates: Option<Coordinates>,
    pub sample: Option<WeatherSample>,
    pub status: WeatherStatus,
}

impl EventWeather {
    pub fn without_weather(event: Event, status: WeatherStatus) -> Self {
        EventWeather {
            event,
            coordinates: None,
            sample: None,
            status,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleReport {
    pub race_id: String,
    pub race_name: String,
    pub round: Option<u32>,
    pub season: Option<String>,
    pub circuit_name: Option<String>,
    pub location: Location,
    pub events: Vec<EventWeather>,
}
