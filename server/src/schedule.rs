use crate::f1api::{ApiCircuit, ApiRace, ApiSession, NumOrText, RaceSource, Season};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use shared::messages::RaceSummary;
use shared::models::{Event, EventKind, Location};

/// Race record located in a season, reduced to what the schedule needs.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedRace {
    pub race_id: String,
    pub name: String,
    pub round: Option<u32>,
    pub season: Option<String>,
    pub circuit_name: Option<String>,
    pub location: Location,
    pub events: Vec<Event>,
}

/// Fetch the season and resolve one race by `raceId` or round number.
pub async fn resolve(source: &dyn RaceSource, season: &str, race_id: &str) -> Result<ResolvedRace> {
    let data = source
        .season_races(season)
        .await
        .context("Failed to load race schedule")?;
    let resolved = locate(&data, race_id)
        .with_context(|| format!("Race schedule not found for raceId {}", race_id))?;

    log::info!(
        "Selected race location: {} {}, {} ({} events)",
        resolved.race_id,
        resolved.location.city,
        resolved.location.country,
        resolved.events.len()
    );
    Ok(resolved)
}

/// Races of a season in calendar order.
pub async fn race_summaries(source: &dyn RaceSource, season: &str) -> Result<Vec<RaceSummary>> {
    let data = source.season_races(season).await?;
    let mut summaries: Vec<RaceSummary> = data.races.iter().map(summary).collect();
    summaries.sort_by_key(|s| s.round.unwrap_or(u32::MAX));
    Ok(summaries)
}

/// Resolve a race of already fetched season data.
pub fn locate(data: &Season, race_id: &str) -> Option<ResolvedRace> {
    find_race(&data.races, race_id).map(|race| to_resolved(race, data))
}

pub fn find_race<'a>(races: &'a [ApiRace], race_id: &str) -> Option<&'a ApiRace> {
    let race_id = race_id.trim();
    races.iter().find(|r| {
        r.race_id.as_deref() == Some(race_id)
            || r.round.as_ref().map(|round| round.to_string()).as_deref() == Some(race_id)
    })
}

fn to_resolved(race: &ApiRace, data: &Season) -> ResolvedRace {
    ResolvedRace {
        race_id: race_key(race),
        name: race_name(race),
        round: race.round.as_ref().and_then(NumOrText::number),
        season: race
            .season
            .as_ref()
            .or(data.season.as_ref())
            .map(|s| s.to_string()),
        circuit_name: race.circuit.as_ref().and_then(circuit_name),
        location: race.circuit.as_ref().map(circuit_location).unwrap_or_default(),
        events: events(race),
    }
}

fn race_key(race: &ApiRace) -> String {
    race.race_id
        .clone()
        .or_else(|| race.round.as_ref().map(|r| r.to_string()))
        .unwrap_or_default()
}

fn race_name(race: &ApiRace) -> String {
    race.race_name
        .clone()
        .or_else(|| race.name.clone())
        .unwrap_or_default()
}

fn summary(race: &ApiRace) -> RaceSummary {
    let date = race
        .schedule
        .get(EventKind::Race.api_key())
        .and_then(Option::as_ref)
        .and_then(|s| s.date.as_deref())
        .or(race.date.as_deref())
        .and_then(parse_date);

    RaceSummary {
        race_id: race_key(race),
        round: race.round.as_ref().and_then(NumOrText::number),
        name: race_name(race),
        date,
    }
}

fn circuit_name(circuit: &ApiCircuit) -> Option<String> {
    non_empty(circuit.circuit_name.as_deref())
        .or_else(|| non_empty(circuit.name.as_deref()))
        .map(str::to_string)
}

/// City and country, looking into the nested `location` object when the
/// flat fields are missing.
pub fn circuit_location(circuit: &ApiCircuit) -> Location {
    let nested = circuit.location.as_ref();
    let city = non_empty(circuit.city.as_deref())
        .or_else(|| nested.and_then(|l| non_empty(l.city.as_deref())))
        .or_else(|| nested.and_then(|l| non_empty(l.locality.as_deref())))
        .unwrap_or_default();
    let country = non_empty(circuit.country.as_deref())
        .or_else(|| nested.and_then(|l| non_empty(l.country.as_deref())))
        .unwrap_or_default();

    Location {
        city: city.to_string(),
        country: country.to_string(),
    }
}

/// Sessions that carry a date or a time, in display order.
///
/// Races without a `schedule` object fall back to their top-level date/time
/// as a single race event.
pub fn events(race: &ApiRace) -> Vec<Event> {
    let mut events: Vec<Event> = EventKind::ALL
        .iter()
        .filter_map(|kind| {
            let session = race.schedule.get(kind.api_key())?.as_ref()?;
            to_event(*kind, session)
        })
        .collect();

    if events.is_empty() {
        let flat = ApiSession {
            date: race.date.clone(),
            time: race.time.clone(),
        };
        events.extend(to_event(EventKind::Race, &flat));
    }
    events
}

fn to_event(kind: EventKind, session: &ApiSession) -> Option<Event> {
    let date = non_empty(session.date.as_deref());
    let time = non_empty(session.time.as_deref());
    if date.is_none() && time.is_none() {
        return None;
    }
    Some(Event {
        kind,
        date: date.and_then(parse_date),
        time: time.map(str::to_string),
    })
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.map(str::trim).filter(|s| !s.is_empty())
}
