use serde::{Deserialize, Serialize};

/// Constructor of a driver, keyed by the race API's `teamId`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(from = "String", into = "String")]
pub enum Team {
    RedBull,
    Ferrari,
    Mercedes,
    McLaren,
    AstonMartin,
    Alpine,
    Williams,
    RacingBulls,
    Sauber,
    Haas,
    Other(String),
}

impl Team {
    pub fn from_id(id: &str) -> Team {
        match id.trim().to_lowercase().as_str() {
            "red_bull" => Team::RedBull,
            "ferrari" => Team::Ferrari,
            "mercedes" => Team::Mercedes,
            "mclaren" => Team::McLaren,
            "aston_martin" => Team::AstonMartin,
            "alpine" => Team::Alpine,
            "williams" => Team::Williams,
            "rb" | "racing_bulls" => Team::RacingBulls,
            "sauber" | "kick_sauber" => Team::Sauber,
            "haas" => Team::Haas,
            other => Team::Other(other.to_string()),
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Team::RedBull => "red_bull",
            Team::Ferrari => "ferrari",
            Team::Mercedes => "mercedes",
            Team::McLaren => "mclaren",
            Team::AstonMartin => "aston_martin",
            Team::Alpine => "alpine",
            Team::Williams => "williams",
            Team::RacingBulls => "rb",
            Team::Sauber => "sauber",
            Team::Haas => "haas",
            Team::Other(id) => id,
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            Team::RedBull => "Red Bull Racing",
            Team::Ferrari => "Ferrari",
            Team::Mercedes => "Mercedes",
            Team::McLaren => "McLaren",
            Team::AstonMartin => "Aston Martin",
            Team::Alpine => "Alpine",
            Team::Williams => "Williams",
            Team::RacingBulls => "Racing Bulls",
            Team::Sauber => "Kick Sauber",
            Team::Haas => "Haas",
            Team::Other(id) => id,
        }
    }

    /// Card background gradient of the team.
    pub fn gradient(&self) -> Gradient {
        let (from, to) = match self {
            Team::RedBull => ("#1e41ff", "#0a1a5c"),
            Team::Ferrari => ("#dc0000", "#6b0000"),
            Team::Mercedes => ("#00d2be", "#005f56"),
            Team::McLaren => ("#ff8700", "#7a4100"),
            Team::AstonMartin => ("#006f62", "#00352f"),
            Team::Alpine => ("#0090ff", "#ff87bc"),
            Team::Williams => ("#005aff", "#00205b"),
            Team::RacingBulls => ("#6692ff", "#1434cb"),
            Team::Sauber => ("#52e252", "#1a4d1a"),
            Team::Haas => ("#b6babd", "#4d5052"),
            Team::Other(_) => ("#444444", "#111111"),
        };
        Gradient {
            from: from.to_string(),
            to: to.to_string(),
        }
    }
}

/// Two hex colours, top-left to bottom-right.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Gradient {
    pub from: String,
    pub to: String,
}

impl From<String> for Team {
    fn from(id: String) -> Self {
        Team::from_id(&id)
    }
}

impl From<Team> for String {
    fn from(team: Team) -> Self {
        team.id().to_string()
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DriverStanding {
    pub classification_id: u32,
    pub driver_id: String,
    pub name: String,
    pub surname: String,
    pub short_name: Option<String>,
    pub number: Option<u32>,
    pub nationality: Option<String>,
    pub team: Team,
    pub team_name: String,
    pub gradient: Gradient,
    pub position: Option<u32>,
    pub points: f64,
    pub wins: u32,
}

impl DriverStanding {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.name, self.surname)
    }
}

/// Two drivers side by side, gaps measured from `first` to `second`.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Comparison {
    pub first: DriverStanding,
    pub second: DriverStanding,
    pub points_gap: f64,
    pub position_gap: Option<i64>,
    pub wins_gap: i64,
}

impl Comparison {
    pub fn new(first: DriverStanding, second: DriverStanding) -> Self {
        let points_gap = first.points - second.points;
        let position_gap = match (first.position, second.position) {
            (Some(a), Some(b)) => Some(b as i64 - a as i64),
            _ => None,
        };
        let wins_gap = first.wins as i64 - second.wins as i64;
        Comparison {
            first,
            second,
            points_gap,
            position_gap,
            wins_gap,
        }
    }

    /// Better classified driver; unclassified drivers fall back to points.
    pub fn leader(&self) -> &DriverStanding {
        match (self.first.position, self.second.position) {
            (Some(a), Some(b)) if a != b => {
                if a < b {
                    &self.first
                } else {
                    &self.second
                }
            }
            (Some(_), None) => &self.first,
            (None, Some(_)) => &self.second,
            _ => {
                if self.second.points > self.first.points {
                    &self.second
                } else {
                    &self.first
                }
            }
        }
    }
}
