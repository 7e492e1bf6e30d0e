//! End-to-end tests: a stub flood-monitoring API on an ephemeral port,
//! with requests pushed through `App` in-process.

use rouille::{Request, Response, Server};
use serde_json::{json, Value};
use std::io::Read;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc::Sender;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use hydro_util::http::HttpServer;

use crate::config::Config;
use crate::ctx::App;
use crate::tmpl;

static STATIONS: &str = include_str!("stations_01.json");

struct Stub {
    hits: Arc<AtomicUsize>,
    last_url: Arc<Mutex<String>>,
    base_url: String,
    stop: Sender<()>
}
impl Stub {
    fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
    fn last_url(&self) -> String {
        self.last_url.lock().unwrap().clone()
    }
}
impl Drop for Stub {
    fn drop(&mut self) {
        let _ = self.stop.send(());
    }
}

fn stub<F>(handler: F) -> Stub where F: Fn(&Request) -> Response + Send + Sync + 'static {
    let hits = Arc::new(AtomicUsize::new(0));
    let last_url = Arc::new(Mutex::new(String::new()));
    let (h2, l2) = (hits.clone(), last_url.clone());
    let server = Server::new("127.0.0.1:0", move |req| {
        h2.fetch_add(1, Ordering::SeqCst);
        *l2.lock().unwrap() = req.raw_url().to_owned();
        handler(req)
    }).unwrap();
    let base_url = format!("http://{}", server.server_addr());
    let (_, stop) = server.stoppable();
    Stub { hits, last_url, base_url, stop }
}

/// A stub that behaves like the real API for the fixture data.
fn flood_stub() -> Stub {
    stub(|req| {
        let url = req.url();
        if url == "/id/stations" {
            Response::from_data("application/json", STATIONS)
        }
        else if url == "/id/stations/TEST1.json" {
            Response::text("down for maintenance").with_status_code(503)
        }
        else if url.starts_with("/id/stations/") && url.ends_with(".json") {
            Response::json(&json!({ "items": { "stationReference": "1029TH" } }))
        }
        else if url.ends_with("/readings") {
            Response::json(&json!({ "items": [
                { "dateTime": "2024-03-08T12:00:00Z", "value": 0.203 },
                { "dateTime": "2024-03-08T11:45:00Z", "value": 0.201 }
            ]}))
        }
        else {
            Response::empty_404()
        }
    })
}

fn app_for(base_url: &str) -> App {
    app_with(Config {
        upstream_base_url: base_url.to_owned(),
        ..Config::default()
    })
}

fn app_with(cfg: Config) -> App {
    App::new(&cfg, tmpl::handlebars_init().unwrap()).unwrap()
}

fn get(app: &App, url: &str) -> (u16, String) {
    let req = Request::fake_http("GET", url, vec![], vec![]);
    let resp = app.process_request(&req);
    let status = resp.status_code;
    let (mut reader, _) = resp.data.into_reader_and_size();
    let mut body = String::new();
    reader.read_to_string(&mut body).unwrap();
    (status, body)
}

#[test]
fn index_lists_referenced_stations() {
    let upstream = flood_stub();
    let app = app_for(&upstream.base_url);
    let (status, body) = get(&app, "/");
    assert_eq!(status, 200);
    assert!(body.contains("Test Station"));
    assert!(body.contains("ABC"));
    assert!(body.contains("Water Level (level)"));
    assert!(body.contains("Bourton Dickler"));
    assert!(!body.contains("Orphaned Gauge"));
    assert!(!body.contains("class=\"error\""));
    assert_eq!(upstream.last_url(), "/id/stations?_view=full");
    // Upstream order is kept.
    let first = body.find("Test Station").unwrap();
    let second = body.find("Bourton Dickler").unwrap();
    assert!(first < second);
}

#[test]
fn index_is_not_cached() {
    let upstream = flood_stub();
    let app = app_for(&upstream.base_url);
    get(&app, "/");
    get(&app, "/");
    assert_eq!(upstream.hits(), 2);
}

#[test]
fn index_shows_banner_on_upstream_failure() {
    let upstream = stub(|_| Response::text("nope").with_status_code(500));
    let app = app_for(&upstream.base_url);
    let (status, body) = get(&app, "/");
    assert_eq!(status, 200);
    assert!(body.contains("class=\"error\""));
    assert!(body.contains("Failed to retrieve station list: 500"));
    assert!(!body.contains("class=\"station\""));
}

#[test]
fn index_in_chinese() {
    let upstream = flood_stub();
    let app = app_for(&upstream.base_url);
    let (_, body) = get(&app, "/?lang=zh");
    assert!(body.contains("站点列表"));
    assert!(body.contains("Test Station"));
    // Unsupported languages fall back to the configured default.
    let (_, body) = get(&app, "/?lang=xx");
    assert!(body.contains("Station List"));
}

#[test]
fn api_stations_are_cached() {
    let upstream = flood_stub();
    let app = app_for(&upstream.base_url);
    let (s1, b1) = get(&app, "/api/stations");
    let (s2, b2) = get(&app, "/api/stations");
    assert_eq!((s1, s2), (200, 200));
    assert_eq!(b1, b2);
    assert_eq!(upstream.hits(), 1);
    // Raw passthrough of the items list, unprojected.
    let fixture: Value = serde_json::from_str(STATIONS).unwrap();
    let served: Value = serde_json::from_str(&b1).unwrap();
    assert_eq!(served, fixture["items"]);
}

#[test]
fn station_detail_passthrough() {
    let upstream = flood_stub();
    let app = app_for(&upstream.base_url);
    let (status, body) = get(&app, "/api/station/1029TH");
    assert_eq!(status, 200);
    let served: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(served, json!({ "items": { "stationReference": "1029TH" } }));
    assert_eq!(upstream.last_url(), "/id/stations/1029TH.json");
    get(&app, "/api/station/1029TH");
    assert_eq!(upstream.hits(), 1);
}

#[test]
fn station_detail_upstream_503() {
    let upstream = flood_stub();
    let app = app_for(&upstream.base_url);
    let (status, body) = get(&app, "/api/station/TEST1");
    assert_eq!(status, 500);
    let err: Value = serde_json::from_str(&body).unwrap();
    let msg = err["error"].as_str().unwrap();
    assert!(!msg.is_empty());
    assert!(msg.contains("503"));
    // Failures aren't cached.
    get(&app, "/api/station/TEST1");
    assert_eq!(upstream.hits(), 2);
}

#[test]
fn readings_cache_per_query_string() {
    let upstream = flood_stub();
    let app = app_for(&upstream.base_url);
    let (status, body) = get(&app, "/api/readings/1029TH?period=24h");
    assert_eq!(status, 200);
    let served: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(served.as_array().map(|x| x.len()), Some(2));
    let day_url = upstream.last_url();
    assert!(day_url.starts_with("/id/stations/1029TH/readings?since="));
    assert!(day_url.ends_with("Z&_sorted"));

    get(&app, "/api/readings/1029TH?period=7d");
    let week_url = upstream.last_url();
    // Both timestamps share a format, so string order is time order.
    assert!(week_url < day_url);
    assert_eq!(upstream.hits(), 2);

    get(&app, "/api/readings/1029TH?period=24h");
    get(&app, "/api/readings/1029TH?period=7d");
    assert_eq!(upstream.hits(), 2);
}

#[test]
fn readings_key_ignores_parameter_order() {
    let upstream = flood_stub();
    let app = app_for(&upstream.base_url);
    let (_, a) = get(&app, "/api/readings/1029TH?period=7d&x=1");
    let (_, b) = get(&app, "/api/readings/1029TH?x=1&period=7d");
    assert_eq!(a, b);
    assert_eq!(upstream.hits(), 1);
}

#[test]
fn cached_routes_refetch_after_ttl() {
    let upstream = flood_stub();
    let app = app_with(Config {
        upstream_base_url: upstream.base_url.clone(),
        cache_ttl_secs: 0,
        ..Config::default()
    });
    let (s1, b1) = get(&app, "/api/stations");
    let (s2, b2) = get(&app, "/api/stations");
    assert_eq!((s1, s2), (200, 200));
    assert_eq!(b1, b2);
    assert_eq!(upstream.hits(), 2);
}

#[test]
fn slow_upstream_times_out() {
    let upstream = stub(|_| {
        std::thread::sleep(Duration::from_secs(3));
        Response::json(&json!({ "items": [] }))
    });
    let app = app_with(Config {
        upstream_base_url: upstream.base_url.clone(),
        upstream_timeout_secs: 1,
        ..Config::default()
    });
    let start = Instant::now();
    let (status, body) = get(&app, "/api/stations");
    assert!(start.elapsed() < Duration::from_millis(2500));
    assert_eq!(status, 500);
    let err: Value = serde_json::from_str(&body).unwrap();
    assert!(!err["error"].as_str().unwrap().is_empty());
}

#[test]
fn unknown_routes() {
    let upstream = flood_stub();
    let app = app_for(&upstream.base_url);
    let (status, body) = get(&app, "/api/nope");
    assert_eq!(status, 404);
    let err: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(err, json!({ "error": "not found" }));
    let (status, body) = get(&app, "/station/ABC");
    assert_eq!(status, 404);
    assert!(body.contains("/station/ABC"));
    assert_eq!(upstream.hits(), 0);
}

#[test]
fn unreachable_upstream() {
    // Nothing listens on the discard port.
    let app = app_for("http://127.0.0.1:9");
    let (status, body) = get(&app, "/api/stations");
    assert_eq!(status, 500);
    let err: Value = serde_json::from_str(&body).unwrap();
    assert!(!err["error"].as_str().unwrap().is_empty());
}

#[test]
fn labels_are_escaped() {
    let upstream = stub(|_| Response::json(&json!({ "items": [
        { "stationReference": "X1", "label": "<script>alert(1)</script>" }
    ]})));
    let app = app_for(&upstream.base_url);
    let (_, body) = get(&app, "/");
    assert!(!body.contains("<script>"));
    assert!(body.contains("&lt;script&gt;"));
}
