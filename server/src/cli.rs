use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(about = "Paddock CLI: race weekend schedules, weather and driver standings.")]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List the races of a season
    Races(SeasonArgs),
    /// Show the schedule of a race, with weather at each session
    Schedule(ScheduleArgs),
    /// List the drivers' championship
    Drivers(SeasonArgs),
    /// Compare two drivers' standings side by side
    Compare(CompareArgs),
    /// Serve the JSON API
    Http {
        #[arg(env = "PADDOCK_SERVER_ADDRESS", default_value = "127.0.0.1:3030")]
        address: std::net::SocketAddr,
    },
}

#[derive(Debug, Args)]
pub struct SeasonArgs {
    /// Season year, or `current`
    #[arg(long)]
    pub season: Option<String>,
    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct ScheduleArgs {
    /// Race identifier (e.g. `australian_2025`) or round number
    pub race: String,
    #[command(flatten)]
    pub common: SeasonArgs,
    /// Skip geocoding and weather lookups
    #[arg(long)]
    pub no_weather: bool,
}

#[derive(Debug, Args)]
pub struct CompareArgs {
    /// Classification id, driver id or short name
    pub driver1: String,
    pub driver2: String,
    #[command(flatten)]
    pub common: SeasonArgs,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_schedule() {
        let cli = Cli::parse_from(["paddock", "schedule", "japanese_2025", "--season", "2025", "--no-weather"]);
        match cli.cmd {
            Command::Schedule(args) => {
                assert_eq!(args.race, "japanese_2025");
                assert_eq!(args.common.season.as_deref(), Some("2025"));
                assert!(args.no_weather);
                assert!(!args.common.json);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_compare() {
        let cli = Cli::parse_from(["paddock", "compare", "NOR", "1", "--json"]);
        match cli.cmd {
            Command::Compare(args) => {
                assert_eq!(args.driver1, "NOR");
                assert_eq!(args.driver2, "1");
                assert!(args.common.json);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_compare_needs_two_drivers() {
        assert!(Cli::try_parse_from(["paddock", "compare", "NOR"]).is_err());
    }
}
