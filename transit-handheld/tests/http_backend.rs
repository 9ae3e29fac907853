//! The reqwest transport against a real HTTP backend served by axum.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Value, json};

use transit_handheld::cache::EntityCache;
use transit_handheld::catalog::{CatalogClient, CatalogError, ReqwestTransport};
use transit_handheld::clock::ManualClock;
use transit_handheld::config::NavTimings;
use transit_handheld::domain::RouteId;
use transit_handheld::nav::{Fault, NavigationController, Screen, Source};
use transit_handheld::store::MemoryBlobStore;
use transit_handheld::ui::RecordingPresenter;

#[derive(Default)]
struct Backend {
    location: Option<HashMap<String, String>>,
    route_hits: usize,
}

type Shared = Arc<Mutex<Backend>>;

async fn routes(State(backend): State<Shared>) -> Json<Value> {
    backend.lock().unwrap().route_hits += 1;
    Json(json!([
        {"route_id": 41, "route_short_name": "41", "route_long_name": "Ghencea - Presei", "route_type": 0, "hasVehicle": 1},
        {"route_id": 336, "route_short_name": "336", "route_long_name": "Pta Unirii - Pantelimon", "route_type": 3, "hasVehicle": false}
    ]))
}

async fn trips(Query(params): Query<HashMap<String, String>>) -> (StatusCode, String) {
    match params.get("routeId").map(String::as_str) {
        Some("41") => (
            StatusCode::OK,
            json!([
                {"trip_id": "41_0", "route_id": 41, "direction_id": 0, "trip_headsign": "Presei"},
                {"trip_id": "41_1", "route_id": 41, "direction_id": 1, "trip_headsign": "Ghencea"}
            ])
            .to_string(),
        ),
        Some("13") => (StatusCode::OK, "<html>maintenance</html>".to_string()),
        _ => (StatusCode::INTERNAL_SERVER_ERROR, "no such route".to_string()),
    }
}

async fn stations() -> Json<Value> {
    Json(json!([
        {"sequence": 7, "stationName": "Piata Unirii 2", "lat": 44.4, "lon": 26.1, "hasVehicle": 0}
    ]))
}

async fn user_location(
    State(backend): State<Shared>,
    Query(params): Query<HashMap<String, String>>,
) -> &'static str {
    backend.lock().unwrap().location = Some(params);
    "User location set"
}

async fn status() -> &'static str {
    "Bus 336 arriving in 2 min"
}

/// Serve the backend on an ephemeral port from its own runtime thread.
fn spawn_backend() -> (SocketAddr, Shared) {
    let backend = Shared::default();
    let app = Router::new()
        .route("/api/routes-with-vehicles", get(routes))
        .route("/api/trips", get(trips))
        .route("/api/stations-with-vehicles", get(stations))
        .route("/api/user-location", post(user_location))
        .route("/api/status", get(status))
        .with_state(backend.clone());

    let (tx, rx) = std::sync::mpsc::channel();
    std::thread::spawn(move || {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .unwrap();
        runtime.block_on(async move {
            let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
            tx.send(listener.local_addr().unwrap()).unwrap();
            axum::serve(listener, app).await.unwrap();
        });
    });
    (rx.recv().unwrap(), backend)
}

fn client(addr: SocketAddr) -> CatalogClient<ReqwestTransport> {
    let transport = ReqwestTransport::new(5, false).unwrap();
    CatalogClient::new(transport, format!("http://{addr}/")).unwrap()
}

#[test]
fn fetches_every_collection() {
    let (addr, _) = spawn_backend();
    let client = client(addr);

    let routes = client.fetch_routes().unwrap();
    assert_eq!(routes.len(), 2);
    assert_eq!(routes[0].id, RouteId(41));
    assert!(routes[0].has_vehicle);
    assert!(!routes[1].has_vehicle);
    assert_eq!(routes[1].category, 3);

    let trips = client.fetch_trips(RouteId(41)).unwrap();
    assert_eq!(trips.len(), 2);
    assert_eq!(trips[1].headsign, "Ghencea");
    assert!(trips.iter().all(|t| t.route_id == RouteId(41)));

    let stations = client.fetch_stations().unwrap();
    assert_eq!(stations[0].name, "Piata Unirii 2");
    assert_eq!(stations[0].sequence, 7);

    assert_eq!(client.fetch_status().unwrap(), "Bus 336 arriving in 2 min");
}

#[test]
fn announce_location_sends_fixed_precision_coordinates() {
    let (addr, backend) = spawn_backend();
    let client = client(addr);
    let station = client.fetch_stations().unwrap().remove(0);

    client.announce_location(&station).unwrap();

    let location = backend.lock().unwrap().location.clone().unwrap();
    assert_eq!(location["lat"], "44.400000");
    assert_eq!(location["lon"], "26.100000");
    assert_eq!(location["name"], "Piata Unirii 2");
}

#[test]
fn server_errors_and_bad_bodies_are_reported() {
    let (addr, _) = spawn_backend();
    let client = client(addr);

    match client.fetch_trips(RouteId(99)).unwrap_err() {
        CatalogError::Status { status, body } => {
            assert_eq!(status, 500);
            assert_eq!(body, "no such route");
        }
        other => panic!("unexpected error {other:?}"),
    }

    let err = client.fetch_trips(RouteId(13)).unwrap_err();
    assert!(matches!(err, CatalogError::Json { .. }));
    assert_eq!(Fault::from(err), Fault::MalformedPayload);
}

#[test]
fn closed_port_is_a_connection_failure() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = client(addr).fetch_routes().unwrap_err();
    assert!(matches!(err, CatalogError::Connect { .. }));
    assert_eq!(Fault::from(err), Fault::ConnectionFailed);
}

#[test]
fn controller_caches_what_it_fetched_over_http() {
    let (addr, backend) = spawn_backend();
    let mut controller = NavigationController::new(
        client(addr),
        EntityCache::new(MemoryBlobStore::new()),
        RecordingPresenter::new(),
        ManualClock::starting_at(0),
        NavTimings::default(),
    );

    assert_eq!(controller.enter_routes(), Ok(Source::Network));
    assert_eq!(controller.enter_routes(), Ok(Source::Cache));
    assert_eq!(backend.lock().unwrap().route_hits, 1);

    controller.select().unwrap();
    assert_eq!(controller.screen(), Screen::Trips);
    assert_eq!(controller.cache().load_trips(RouteId(41)).unwrap().len(), 2);
}
