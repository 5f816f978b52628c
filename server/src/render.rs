//! Plain-text cards for the terminal.

use crate::classify::{self, Tier};
use chrono::{DateTime, Datelike, Utc};
use shared::messages::RaceSummary;
use shared::models::{Event, EventWeather, ScheduleReport, WeatherStatus};
use shared::standings::{Comparison, DriverStanding};
use std::fmt::Write;

/// `FRI - 3 OCT 2025`
pub fn format_date(instant: DateTime<Utc>) -> String {
    format!(
        "{} - {} {} {}",
        instant.format("%a").to_string().to_uppercase(),
        instant.day(),
        instant.format("%b").to_string().to_uppercase(),
        instant.year()
    )
}

/// Date and time columns of a card, `TBA` when the session has no instant.
pub fn event_parts(event: &Event) -> (String, String) {
    match event.instant() {
        Some(instant) => (
            format_date(instant),
            instant.format("%H:%M UTC").to_string(),
        ),
        None => ("TBA".to_string(), String::new()),
    }
}

pub fn schedule(report: &ScheduleReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", report.race_name);

    let mut round_line = String::new();
    if let Some(round) = report.round {
        let _ = write!(round_line, "Round: {}", round);
        if let Some(season) = &report.season {
            let _ = write!(round_line, " of {}", season);
        }
    }
    if !round_line.is_empty() {
        let _ = writeln!(out, "{}", round_line);
    }

    if let Some(circuit) = &report.circuit_name {
        let _ = writeln!(
            out,
            "Circuit: {} - {}, {}",
            circuit, report.location.city, report.location.country
        );
    }

    if report.events.is_empty() {
        let _ = writeln!(out, "\nNo schedule available");
        return out;
    }

    let (bottom, top): (Vec<&EventWeather>, Vec<&EventWeather>) = report
        .events
        .iter()
        .partition(|e| e.event.kind.is_prominent());

    for row in [top, bottom] {
        if row.is_empty() {
            continue;
        }
        out.push('\n');
        for event in row {
            card(&mut out, event);
        }
    }
    out
}

fn card(out: &mut String, ew: &EventWeather) {
    let kind = ew.event.kind;
    let label = if kind.is_prominent() {
        kind.label().to_uppercase()
    } else {
        kind.label().to_string()
    };
    let (date, time) = event_parts(&ew.event);
    let line = format!("  {:<18} {:<20} {}", label, date, time);
    let _ = writeln!(out, "{}", line.trim_end());

    match (&ew.status, &ew.sample) {
        (WeatherStatus::Ok, Some(sample)) => {
            let line: Vec<String> = classify::metrics(sample)
                .iter()
                .map(|m| match m.tier {
                    Tier::Neutral => format!("{} {}", m.label, m.value),
                    tier => format!("{} {} [{}]", m.label, m.value, tier.name()),
                })
                .collect();
            let _ = writeln!(out, "    {}", line.join(" | "));
        }
        // the date column already says TBA
        (WeatherStatus::Tba, _) | (WeatherStatus::Skipped, _) => {}
        (status, _) => {
            let _ = writeln!(out, "    {}", status.placeholder().unwrap_or("Data N/A"));
        }
    }
}

pub fn races(summaries: &[RaceSummary]) -> String {
    let mut out = String::new();
    for race in summaries {
        let round = race.round.map(|r| r.to_string()).unwrap_or_default();
        let date = race
            .date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "TBA".to_string());
        let _ = writeln!(
            out,
            "{:>3}  {:<10}  {:<24}  {}",
            round, date, race.race_id, race.name
        );
    }
    out
}

pub fn drivers(standings: &[DriverStanding]) -> String {
    let mut out = String::new();
    for d in standings {
        let _ = writeln!(
            out,
            "{:>3}  {:<4} {:<24} {:<20} {:>6} pts  {:>2} wins",
            d.position.map(|p| p.to_string()).unwrap_or_else(|| "-".to_string()),
            d.short_name.as_deref().unwrap_or(""),
            d.full_name(),
            d.team_name,
            format_points(d.points),
            d.wins
        );
    }
    out
}

pub fn comparison(cmp: &Comparison) -> String {
    let a = &cmp.first;
    let b = &cmp.second;
    let position = |d: &DriverStanding| {
        d.position
            .map(|p| format!("P{}", p))
            .unwrap_or_else(|| "-".to_string())
    };
    let rows = [
        ("Driver", a.full_name(), b.full_name()),
        ("Team", a.team_name.clone(), b.team_name.clone()),
        ("Position", position(a), position(b)),
        ("Points", format_points(a.points), format_points(b.points)),
        ("Wins", a.wins.to_string(), b.wins.to_string()),
        ("Colours", colours(a), colours(b)),
    ];

    let mut out = String::new();
    for (label, left, right) in rows {
        let _ = writeln!(out, "{:<10} {:<26} {}", label, left, right);
    }

    let leader = cmp.leader();
    let _ = writeln!(
        out,
        "\nLeader: {} (by {} pts)",
        leader.full_name(),
        format_points(cmp.points_gap.abs())
    );
    out
}

fn colours(d: &DriverStanding) -> String {
    format!("{} > {}", d.gradient.from, d.gradient.to)
}

/// Whole points without decimals, half points with one.
fn format_points(points: f64) -> String {
    if points.fract() == 0.0 {
        format!("{}", points as i64)
    } else {
        format!("{:.1}", points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone};
    use shared::models::{EventKind, Location, WeatherSample};
    use shared::standings::Team;

    fn event(kind: EventKind, date: &str, time: Option<&str>) -> Event {
        Event {
            kind,
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").ok(),
            time: time.map(str::to_string),
        }
    }

    fn report(events: Vec<EventWeather>) -> ScheduleReport {
        ScheduleReport {
            race_id: "singapore_2025".to_string(),
            race_name: "Singapore Grand Prix 2025".to_string(),
            round: Some(18),
            season: Some("2025".to_string()),
            circuit_name: Some("Marina Bay Street Circuit".to_string()),
            location: Location {
                city: "Marina Bay".to_string(),
                country: "Singapore".to_string(),
            },
            events,
        }
    }

    #[test]
    fn test_format_date() {
        let instant = Utc.with_ymd_and_hms(2025, 10, 3, 21, 0, 0).unwrap();
        assert_eq!(format_date(instant), "FRI - 3 OCT 2025");
    }

    #[test]
    fn test_event_parts_tba() {
        let (date, time) = event_parts(&event(EventKind::Race, "2025-10-05", None));
        assert_eq!(date, "TBA");
        assert_eq!(time, "");
    }

    #[test]
    fn test_schedule_cards() {
        let ok = EventWeather {
            event: event(EventKind::Race, "2025-10-05", Some("12:00:00Z")),
            coordinates: None,
            sample: Some(WeatherSample {
                temperature: Some(31.2),
                precipitation_mm: Some(0.0),
                wind_kmh: Some(7.2),
                humidity_pct: Some(74.4),
            }),
            status: WeatherStatus::Ok,
        };
        let missing = EventWeather::without_weather(
            event(EventKind::Practice1, "2025-10-03", Some("09:30:00Z")),
            WeatherStatus::LocationNotFound,
        );
        let tba = EventWeather::without_weather(
            event(EventKind::Qualifying, "2025-10-04", None),
            WeatherStatus::Tba,
        );

        let text = schedule(&report(vec![missing, tba, ok]));
        assert!(text.starts_with("Singapore Grand Prix 2025\nRound: 18 of 2025\n"));
        assert!(text.contains("Circuit: Marina Bay Street Circuit - Marina Bay, Singapore"));
        assert!(text.contains("Location not found"));
        assert!(text.contains(&format!("  {:<18} TBA\n", "Qualifying")));
        assert!(text.contains("RACE"));
        assert!(text.contains("Temp 31.2 °C [orange] | Precip 0.0 mm [green] | Wind 7.2 km/h | Humidity 74 % [yellow]"));

        // practice and qualifying come before the race row
        let practice = text.find("Practice 1").unwrap();
        let race = text.find("RACE").unwrap();
        assert!(practice < race);
    }

    #[test]
    fn test_schedule_without_events() {
        let text = schedule(&report(vec![]));
        assert!(text.ends_with("No schedule available\n"));
    }

    #[test]
    fn test_comparison() {
        let standing = |id: &str, name: &str, position: u32, points: f64| DriverStanding {
            classification_id: position,
            driver_id: id.to_string(),
            name: name.to_string(),
            surname: id.to_string(),
            short_name: None,
            number: None,
            nationality: None,
            team: Team::Ferrari,
            team_name: "Ferrari".to_string(),
            gradient: Team::Ferrari.gradient(),
            position: Some(position),
            points,
            wins: 0,
        };
        let cmp = Comparison::new(
            standing("hamilton", "Lewis", 6, 146.0),
            standing("leclerc", "Charles", 5, 210.5),
        );
        let text = comparison(&cmp);
        assert!(text.contains("Position   P6"));
        assert!(text.contains("210.5"));
        assert!(text.contains("Colours    #dc0000 > #6b0000"));
        assert!(text.ends_with("Leader: Charles leclerc (by 64.5 pts)\n"));
    }
}
