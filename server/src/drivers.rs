use crate::f1api::{ApiDriverStanding, NumOrText, RaceSource};
use anyhow::{Context, Result};
use shared::standings::{Comparison, DriverStanding, Team};

/// Drivers' championship of one season, fetched once and queried in memory.
#[derive(Clone, Debug, Default)]
pub struct DriverStore {
    season: String,
    drivers: Vec<DriverStanding>,
}

impl DriverStore {
    pub fn new(season: &str, drivers: Vec<DriverStanding>) -> Self {
        Self {
            season: season.to_string(),
            drivers,
        }
    }

    pub async fn load(source: &dyn RaceSource, season: &str) -> Result<Self> {
        let raw = source
            .driver_standings(season)
            .await
            .context("Failed to load drivers championship")?;
        let mut drivers: Vec<DriverStanding> = raw.into_iter().map(to_standing).collect();
        drivers.sort_by_key(|d| d.position.unwrap_or(u32::MAX));
        log::info!("Loaded {} drivers for season {}", drivers.len(), season);
        Ok(Self::new(season, drivers))
    }

    pub fn season(&self) -> &str {
        &self.season
    }

    pub fn all(&self) -> &[DriverStanding] {
        &self.drivers
    }

    /// Look a driver up by classification id, driver id or short name.
    pub fn get(&self, key: &str) -> Option<&DriverStanding> {
        let key = key.trim();
        if let Ok(classification_id) = key.parse::<u32>() {
            return self
                .drivers
                .iter()
                .find(|d| d.classification_id == classification_id);
        }
        let key = key.to_lowercase();
        self.drivers.iter().find(|d| {
            d.driver_id.to_lowercase() == key
                || d.short_name
                    .as_deref()
                    .map_or(false, |s| s.to_lowercase() == key)
        })
    }

    pub fn compare(&self, first: &str, second: &str) -> Result<Comparison> {
        let a = self
            .get(first)
            .with_context(|| format!("Driver not found: {}", first))?;
        let b = self
            .get(second)
            .with_context(|| format!("Driver not found: {}", second))?;
        Ok(Comparison::new(a.clone(), b.clone()))
    }
}

fn to_standing(raw: ApiDriverStanding) -> DriverStanding {
    let driver = raw.driver;
    let team = raw.team;
    let team_id = raw
        .team_id
        .or_else(|| team.as_ref().and_then(|t| t.team_id.clone()))
        .unwrap_or_default();
    let team_kind = Team::from_id(&team_id);
    let team_name = team
        .and_then(|t| t.team_name)
        .unwrap_or_else(|| team_kind.display_name().to_string());

    DriverStanding {
        classification_id: raw
            .classification_id
            .as_ref()
            .and_then(NumOrText::number)
            .unwrap_or_default(),
        name: driver
            .as_ref()
            .and_then(|d| d.name.clone())
            .unwrap_or_default(),
        surname: driver
            .as_ref()
            .and_then(|d| d.surname.clone())
            .unwrap_or_else(|| raw.driver_id.clone()),
        short_name: driver.as_ref().and_then(|d| d.short_name.clone()),
        number: driver
            .as_ref()
            .and_then(|d| d.number.as_ref())
            .and_then(NumOrText::number),
        nationality: driver.as_ref().and_then(|d| d.nationality.clone()),
        driver_id: raw.driver_id,
        gradient: team_kind.gradient(),
        team: team_kind,
        team_name,
        position: raw.position.as_ref().and_then(NumOrText::number),
        points: raw.points.unwrap_or_default(),
        wins: raw.wins.unwrap_or_default(),
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use crate::f1api::{ApiDriver, ApiTeam, Season};
    use crate::schedule::tests::FakeRaces;

    pub fn raw(
        classification_id: u64,
        driver_id: &str,
        short_name: &str,
        team_id: &str,
        points: f64,
        wins: u32,
    ) -> ApiDriverStanding {
        ApiDriverStanding {
            classification_id: Some(NumOrText::Number(classification_id)),
            driver_id: driver_id.to_string(),
            team_id: Some(team_id.to_string()),
            points: Some(points),
            position: Some(NumOrText::Number(classification_id)),
            wins: Some(wins),
            driver: Some(ApiDriver {
                name: Some(driver_id.to_uppercase()),
                surname: Some(driver_id.to_string()),
                nationality: None,
                number: Some(NumOrText::Text("4".to_string())),
                short_name: Some(short_name.to_string()),
            }),
            team: Some(ApiTeam {
                team_id: Some(team_id.to_string()),
                team_name: None,
            }),
        }
    }

    pub fn fake_standings() -> FakeRaces {
        FakeRaces {
            season: Season::default(),
            standings: vec![
                raw(2, "piastri", "PIA", "mclaren", 392.0, 7),
                raw(1, "norris", "NOR", "mclaren", 408.0, 7),
                raw(3, "max_verstappen", "VER", "red_bull", 396.0, 7),
            ],
            fail: false,
        }
    }

    #[tokio::test]
    async fn test_load_sorts_by_position() {
        let store = DriverStore::load(&fake_standings(), "current").await.unwrap();
        let ids: Vec<&str> = store.all().iter().map(|d| d.driver_id.as_str()).collect();
        assert_eq!(ids, vec!["norris", "piastri", "max_verstappen"]);
        assert_eq!(store.season(), "current");
    }

    #[tokio::test]
    async fn test_lookup_keys() {
        let store = DriverStore::load(&fake_standings(), "current").await.unwrap();
        assert_eq!(store.get("3").unwrap().driver_id, "max_verstappen");
        assert_eq!(store.get("PIASTRI").unwrap().classification_id, 2);
        assert_eq!(store.get("ver").unwrap().team, Team::RedBull);
        assert!(store.get("42").is_none());
        assert!(store.get("senna").is_none());
    }

    #[test]
    fn test_to_standing_defaults() {
        let standing = to_standing(raw(1, "norris", "NOR", "mclaren", 408.0, 7));
        assert_eq!(standing.team_name, "McLaren");
        assert_eq!(standing.number, Some(4));
        assert_eq!(standing.full_name(), "NORRIS norris");
        assert_eq!(standing.gradient, Team::McLaren.gradient());

        let bare = to_standing(ApiDriverStanding {
            classification_id: None,
            driver_id: "reserve".to_string(),
            team_id: None,
            points: None,
            position: None,
            wins: None,
            driver: None,
            team: None,
        });
        assert_eq!(bare.surname, "reserve");
        assert_eq!(bare.points, 0.0);
        assert_eq!(bare.position, None);
    }

    #[tokio::test]
    async fn test_load_failure() {
        let mut source = fake_standings();
        source.fail = true;
        let err = DriverStore::load(&source, "2025").await.unwrap_err();
        assert_eq!(err.to_string(), "Failed to load drivers championship");
        assert_eq!(
            format!("{:#}", err),
            "Failed to load drivers championship: race api unavailable"
        );
    }

    #[tokio::test]
    async fn test_compare() {
        let store = DriverStore::load(&fake_standings(), "current").await.unwrap();
        let cmp = store.compare("NOR", "max_verstappen").unwrap();
        assert_eq!(cmp.points_gap, 12.0);
        assert_eq!(cmp.position_gap, Some(2));
        assert_eq!(cmp.leader().driver_id, "norris");

        let err = store.compare("NOR", "senna").unwrap_err();
        assert_eq!(err.to_string(), "Driver not found: senna");
    }
}
