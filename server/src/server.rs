use serde::Deserialize;
use shared::messages::ErrorMessage;
use std::convert::Infallible;
use std::sync::Arc;
use warp::http::StatusCode;
use warp::{Filter, Rejection, Reply};

use super::app::App;
use super::correlate;
use super::drivers::DriverStore;
use super::schedule;

pub async fn run(address: std::net::SocketAddr, app: App) -> anyhow::Result<()> {
    log::info!("Listening on {}", address);
    warp::serve(routes(Arc::new(app))).run(address).await;
    Ok(())
}

pub fn routes(
    app: Arc<App>,
) -> impl Filter<Extract = (impl Reply,), Error = Infallible> + Clone {
    let health_route = warp::path!("health").and(warp::get()).map(|| StatusCode::OK);

    let races_route = warp::path!("races")
        .and(warp::get())
        .and(warp::query::<ScheduleQuery>())
        .and(with_app(app.clone()))
        .and_then(list_races);

    let schedule_route = warp::path!("races" / String)
        .and(warp::get())
        .and(warp::query::<ScheduleQuery>())
        .and(with_app(app.clone()))
        .and_then(race_schedule);

    let drivers_route = warp::path!("drivers")
        .and(warp::get())
        .and(warp::query::<SeasonQuery>())
        .and(with_app(app.clone()))
        .and_then(list_drivers);

    let compare_route = warp::path!("compare" / String / String)
        .and(warp::get())
        .and(warp::query::<SeasonQuery>())
        .and(with_app(app))
        .and_then(compare);

    health_route
        .or(races_route)
        .or(schedule_route)
        .or(drivers_route)
        .or(compare_route)
        .recover(rejection)
}

fn with_app(app: Arc<App>) -> impl Filter<Extract = (Arc<App>,), Error = Infallible> + Clone {
    warp::any().map(move || app.clone())
}

#[derive(Debug, Default, Deserialize)]
pub struct ScheduleQuery {
    season: Option<String>,
    weather: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SeasonQuery {
    season: Option<String>,
}

pub async fn list_races(query: ScheduleQuery, app: Arc<App>) -> Result<impl Reply, Rejection> {
    let season = app.season(query.season.as_deref());
    let races = schedule::race_summaries(app.races.as_ref(), season)
        .await
        .map_err(internal)?;
    Ok(warp::reply::json(&races))
}

pub async fn race_schedule(
    race_id: String,
    query: ScheduleQuery,
    app: Arc<App>,
) -> Result<impl Reply, Rejection> {
    let season = app.season(query.season.as_deref());
    let data = app
        .races
        .season_races(season)
        .await
        .map_err(internal)?;
    let race = schedule::locate(&data, &race_id).ok_or_else(|| {
        warp::reject::custom(NotFound(format!(
            "Race schedule not found for raceId {}",
            race_id
        )))
    })?;

    let correlator = query
        .weather
        .unwrap_or(true)
        .then_some(&app.correlator);
    let report = correlate::annotate(race, correlator).await;
    Ok(warp::reply::json(&report))
}

pub async fn list_drivers(query: SeasonQuery, app: Arc<App>) -> Result<impl Reply, Rejection> {
    let drivers = load_drivers(&app, query).await?;
    Ok(warp::reply::json(&drivers.all()))
}

pub async fn compare(
    first: String,
    second: String,
    query: SeasonQuery,
    app: Arc<App>,
) -> Result<impl Reply, Rejection> {
    let drivers = load_drivers(&app, query).await?;
    drivers
        .compare(&first, &second)
        .map(|cmp| warp::reply::json(&cmp))
        .map_err(|e| warp::reject::custom(NotFound(e.to_string())))
}

async fn load_drivers(app: &App, query: SeasonQuery) -> Result<DriverStore, Rejection> {
    let season = app.season(query.season.as_deref());
    DriverStore::load(app.races.as_ref(), season)
        .await
        .map_err(internal)
}

fn internal(e: anyhow::Error) -> Rejection {
    warp::reject::custom(Error(e))
}

#[derive(Debug)]
struct Error(anyhow::Error);
impl warp::reject::Reject for Error {}

#[derive(Debug)]
struct NotFound(String);
impl warp::reject::Reject for NotFound {}

pub async fn rejection(err: Rejection) -> Result<impl Reply, Infallible> {
    let (code, message) = if let Some(NotFound(message)) = err.find::<NotFound>() {
        (StatusCode::NOT_FOUND, message.clone())
    } else if err.is_not_found() {
        (StatusCode::NOT_FOUND, "Not found.".to_string())
    } else if let Some(Error(e)) = err.find::<Error>() {
        log::error!("Error: {:#}", e);
        (
            StatusCode::BAD_GATEWAY,
            "Upstream data source failed.".to_string(),
        )
    } else if err.find::<warp::reject::InvalidQuery>().is_some() {
        (StatusCode::BAD_REQUEST, "Invalid query string.".to_string())
    } else if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        (
            StatusCode::METHOD_NOT_ALLOWED,
            "Method not allowed.".to_string(),
        )
    } else {
        log::error!("Error: {:?}", err);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal server error.".to_string(),
        )
    };

    let json = warp::reply::json(&ErrorMessage {
        code: code.as_u16(),
        message,
    });

    Ok(warp::reply::with_status(json, code))
}
