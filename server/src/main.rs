use clap::Parser;
use cli::{Cli, Command};
use serde::Serialize;

use app::App;
use drivers::DriverStore;

mod app;
mod classify;
mod cli;
mod config;
mod correlate;
mod drivers;
mod f1api;
mod geocoding;
mod http;
mod render;
mod schedule;
mod server;
mod weather;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    env_logger::init();

    let args = Cli::parse();

    if let Err(e) = run(args).await {
        log::error!("{:#}", e);
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

async fn run(args: Cli) -> anyhow::Result<()> {
    let app = App::from_config()?;

    match args.cmd {
        Command::Races(opts) => {
            let season = app.season(opts.season.as_deref());
            let races = schedule::race_summaries(app.races.as_ref(), season).await?;
            output(races.as_slice(), opts.json, render::races)
        }
        Command::Schedule(opts) => {
            let season = app.season(opts.common.season.as_deref());
            let correlator = (!opts.no_weather).then_some(&app.correlator);
            let report =
                correlate::schedule_report(app.races.as_ref(), correlator, season, &opts.race)
                    .await?;
            output(&report, opts.common.json, render::schedule)
        }
        Command::Drivers(opts) => {
            let store = DriverStore::load(app.races.as_ref(), app.season(opts.season.as_deref())).await?;
            if !opts.json {
                println!("Drivers' championship ({})\n", store.season());
            }
            output(store.all(), opts.json, render::drivers)
        }
        Command::Compare(opts) => {
            let season = app.season(opts.common.season.as_deref());
            let store = DriverStore::load(app.races.as_ref(), season).await?;
            let comparison = store.compare(&opts.driver1, &opts.driver2)?;
            output(&comparison, opts.common.json, render::comparison)
        }
        Command::Http { address } => server::run(address, app).await,
    }
}

fn output<T: Serialize + ?Sized>(value: &T, json: bool, text: impl Fn(&T) -> String) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        print!("{}", text(value));
    }
    Ok(())
}
