use crate::generator::profile::{build_sweep, GeneratorConfig};
use crate::gui_bridge::model::{RadarSnapshot, RangeRequest};
use crate::workflow::runner::Runner;
use crate::workflow::state::SharedState;
use log::{info, warn};
use radarcore::feed::{entities_from_records, ApRecord, GpsFixReport};
use radarcore::GeoPosition;
use serde::de::DeserializeOwned;
use serde_json::json;
use std::convert::Infallible;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use warp::{
    http::StatusCode,
    reply::{Json, WithStatus},
    Filter, Rejection, Reply,
};

const BODY_LIMIT_BYTES: u64 = 1024 * 1024;

type JsonReply = WithStatus<Json>;

fn ok(body: serde_json::Value) -> JsonReply {
    warp::reply::with_status(warp::reply::json(&body), StatusCode::OK)
}

fn bad_request(message: impl std::fmt::Display) -> JsonReply {
    warn!("rejected bridge request: {}", message);
    warp::reply::with_status(
        warp::reply::json(&json!({"status": "error", "message": message.to_string()})),
        StatusCode::BAD_REQUEST,
    )
}

fn with_state(state: SharedState) -> impl Filter<Extract = (SharedState,), Error = Infallible> + Clone {
    warp::any().map(move || state.clone())
}

fn with_runner(runner: Arc<Runner>) -> impl Filter<Extract = (Arc<Runner>,), Error = Infallible> + Clone {
    warp::any().map(move || runner.clone())
}

fn json_body<T: DeserializeOwned + Send>() -> impl Filter<Extract = (T,), Error = Rejection> + Clone {
    warp::body::content_length_limit(BODY_LIMIT_BYTES).and(warp::body::json())
}

/// HTTP surface of the host: snapshot/frame reads plus wholesale updates of
/// the observer, device list, range and synthetic scenario.
pub fn routes(
    state: SharedState,
    runner: Arc<Runner>,
) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    let snapshot_route = warp::path("snapshot")
        .and(warp::path::end())
        .and(warp::get())
        .and(with_state(state.clone()))
        .map(|state: SharedState| {
            let snapshot = RadarSnapshot::from(&*state.read());
            warp::reply::with_status(warp::reply::json(&snapshot), StatusCode::OK)
        });

    let frame_route = warp::path("frame")
        .and(warp::path::end())
        .and(warp::get())
        .and(with_state(state.clone()))
        .and(with_runner(runner.clone()))
        .map(|state: SharedState, runner: Arc<Runner>| {
            let frame = runner.execute(&state.read());
            warp::reply::with_status(warp::reply::json(&frame), StatusCode::OK)
        });

    let observer_route = warp::path("observer")
        .and(warp::path::end())
        .and(warp::post())
        .and(json_body::<Option<GeoPosition>>())
        .and(with_state(state.clone()))
        .map(|observer: Option<GeoPosition>, state: SharedState| {
            let validated = match observer {
                Some(position) => {
                    match GeoPosition::validated(position.latitude(), position.longitude()) {
                        Ok(position) => Some(position),
                        Err(err) => return bad_request(err),
                    }
                }
                None => None,
            };
            let mut guard = state.write();
            guard.config = guard.config.with_observer(validated);
            match validated {
                Some(position) => info!("observer fix updated to {}", position),
                None => info!("observer fix cleared"),
            }
            ok(json!({"status": "ok", "has_fix": validated.is_some()}))
        });

    let fix_route = warp::path("fix")
        .and(warp::path::end())
        .and(warp::post())
        .and(json_body::<GpsFixReport>())
        .and(with_state(state.clone()))
        .map(|report: GpsFixReport, state: SharedState| {
            let observer = report.observer();
            let mut guard = state.write();
            guard.config = guard.config.with_observer(observer);
            match observer {
                Some(position) => info!(
                    "GPS fix at {} ({} satellites)",
                    position,
                    report.satellites.unwrap_or(0)
                ),
                None => warn!("GPS report without a usable fix, radar idle"),
            }
            ok(json!({"status": "ok", "has_fix": observer.is_some()}))
        });

    let entities_route = warp::path("entities")
        .and(warp::path::end())
        .and(warp::post())
        .and(json_body::<Vec<ApRecord>>())
        .and(with_state(state.clone()))
        .and(with_runner(runner.clone()))
        .map(|records: Vec<ApRecord>, state: SharedState, runner: Arc<Runner>| {
            let batch = entities_from_records(records);
            runner.metrics().record_skipped(batch.skipped);
            let accepted = batch.entities.len();
            state.write().replace_entities(batch.entities, None);
            info!("device list replaced: {} accepted, {} skipped", accepted, batch.skipped);
            ok(json!({"status": "ok", "accepted": accepted, "skipped": batch.skipped}))
        });

    let range_route = warp::path("range")
        .and(warp::path::end())
        .and(warp::post())
        .and(json_body::<RangeRequest>())
        .and(with_state(state.clone()))
        .map(|request: RangeRequest, state: SharedState| {
            let mut guard = state.write();
            match guard.config.with_range(request.max_range_m) {
                Ok(config) => {
                    guard.config = config;
                    ok(json!({"status": "ok", "max_range_m": request.max_range_m}))
                }
                Err(err) => bad_request(err),
            }
        });

    let scenario_route = warp::path("scenario")
        .and(warp::path::end())
        .and(warp::post())
        .and(json_body::<GeneratorConfig>())
        .and(with_state(state))
        .map(|config: GeneratorConfig, state: SharedState| match build_sweep(&config) {
            Ok(entities) => {
                let devices = entities.len();
                if let Some(name) = config.scenario.as_ref() {
                    info!("scenario {} -> {} devices", name, devices);
                }
                let description = config.description.clone().unwrap_or_default();
                state.write().replace_entities(entities, Some(config));
                ok(json!({
                    "status": "ok",
                    "devices": devices,
                    "description": description
                }))
            }
            Err(err) => bad_request(format!("{err:#}")),
        });

    snapshot_route
        .or(frame_route)
        .or(observer_route)
        .or(fix_route)
        .or(entities_route)
        .or(range_route)
        .or(scenario_route)
}

/// Bridge that hosts the radar HTTP endpoints over the shared host state.
pub struct GuiBridge {
    state: SharedState,
    runner: Arc<Runner>,
}

impl GuiBridge {
    pub fn new(state: SharedState, runner: Arc<Runner>) -> Self {
        Self { state, runner }
    }

    pub fn serve(&self, addr: SocketAddr) -> impl Future<Output = ()> {
        info!("radar bridge listening on http://{}", addr);
        warp::serve(routes(self.state.clone(), self.runner.clone())).run(addr)
    }

    pub fn publish_status(&self, message: &str) {
        self.state.write().status = message.to_string();
        info!("[GUI] {}", message);
    }

    #[cfg(test)]
    pub fn snapshot(&self) -> RadarSnapshot {
        RadarSnapshot::from(&*self.state.read())
    }
}
