#![allow(clippy::unwrap_used)]
// HTTP tests: a real axum listener in front of a `LiveMonitor` whose
// provider and image host are wiremock servers.

use pretty_assertions::assert_eq;
use secrecy::SecretString;
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use greenpulse::server;
use greenpulse_core::{LiveMonitor, MonitorConfig};

// ── Helpers ─────────────────────────────────────────────────────────

struct TestServer {
    base: String,
    upstream: MockServer,
    http: reqwest::Client,
    _shutdown: oneshot::Sender<()>,
}

impl TestServer {
    async fn start() -> Self {
        let upstream = MockServer::start().await;
        let upstream_url = Url::parse(&upstream.uri()).unwrap();

        let mut config = MonitorConfig::new(SecretString::from("test-key".to_string())).unwrap();
        config.vision_endpoint = upstream_url.clone();
        config.preload_images = false;
        config.room_images = [(
            "A1".to_owned(),
            upstream_url.join("/img/a1.jpg").unwrap(),
        )]
        .into_iter()
        .collect();

        let monitor = LiveMonitor::from_config(config).unwrap();
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let (tx, rx) = oneshot::channel::<()>();
        tokio::spawn(server::serve(listener, monitor, async {
            let _ = rx.await;
        }));

        Self {
            base: format!("http://{addr}"),
            upstream,
            http: reqwest::Client::new(),
            _shutdown: tx,
        }
    }

    async fn get(&self, route: &str) -> (u16, Value) {
        let resp = self
            .http
            .get(format!("{}{route}", self.base))
            .send()
            .await
            .unwrap();
        let status = resp.status().as_u16();
        (status, resp.json().await.unwrap())
    }

    async fn post(&self, route: &str, body: Value) -> (u16, Value) {
        let resp = self
            .http
            .post(format!("{}{route}", self.base))
            .json(&body)
            .send()
            .await
            .unwrap();
        let status = resp.status().as_u16();
        (status, resp.json().await.unwrap())
    }

    async fn vision_returns(&self, status: u16, body: Value) {
        Mock::given(method("POST"))
            .and(path("/v1/images:annotate"))
            .respond_with(ResponseTemplate::new(status).set_body_json(body))
            .mount(&self.upstream)
            .await;
    }
}

// ── Read endpoints ──────────────────────────────────────────────────

#[tokio::test]
async fn test_rooms_in_seed_order() {
    let srv = TestServer::start().await;
    let (status, body) = srv.get("/rooms").await;

    assert_eq!(status, 200);
    let codes: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["code"].as_str().unwrap())
        .collect();
    assert_eq!(codes, ["A1", "A2", "B1", "B2", "C1", "C2"]);
    assert_eq!(body[3]["source"], "browser_webcam");
    assert_eq!(body[2]["status"], "waste");
}

#[tokio::test]
async fn test_summary() {
    let srv = TestServer::start().await;
    let (status, body) = srv.get("/summary").await;

    assert_eq!(status, 200);
    assert_eq!(
        body,
        json!({
            "total_rooms": 6,
            "occupied": 3,
            "waste": 3,
            "waste_rooms": ["B1", "B2", "C2"]
        })
    );
}

#[tokio::test]
async fn test_health() {
    let srv = TestServer::start().await;
    let (status, body) = srv.get("/healthz").await;
    assert_eq!(status, 200);
    assert_eq!(body["status"], "ok");
}

// ── Analyze ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_analyze_defaults_to_b2() {
    let srv = TestServer::start().await;
    srv.vision_returns(
        200,
        json!({ "responses": [{ "faceAnnotations": [ {} ] }] }),
    )
    .await;

    let (status, body) = srv.post("/analyze", json!({ "image_base64": "ZnJhbWU=" })).await;

    assert_eq!(status, 200);
    assert_eq!(body["room_id"], "B2");
    assert_eq!(body["count"], 1);
    assert_eq!(body["confidence"], 0.85);
    assert_eq!(body["status"], "occupied");
}

#[tokio::test]
async fn test_analyze_transition_raises_alert() {
    let srv = TestServer::start().await;
    srv.vision_returns(200, json!({ "responses": [{}] })).await;

    let (status, body) = srv
        .post("/analyze", json!({ "room_id": "c1", "image_base64": "ZnJhbWU=" }))
        .await;
    assert_eq!(status, 200);
    assert_eq!(body["status"], "waste");

    let (_, alerts) = srv.get("/alerts").await;
    let alerts = alerts.as_array().unwrap();
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0]["type"], "WARNING");
    assert_eq!(alerts[0]["room_id"], "C1");
    assert_eq!(alerts[0]["room_name"], "Lab Space");
}

#[tokio::test]
async fn test_analyze_missing_image() {
    let srv = TestServer::start().await;
    let (status, body) = srv.post("/analyze", json!({ "room_id": "A1" })).await;

    assert_eq!(status, 400);
    assert_eq!(body, json!({ "error": "Missing image_base64" }));
}

#[tokio::test]
async fn test_analyze_non_string_room_id() {
    let srv = TestServer::start().await;
    let (status, body) = srv
        .post("/analyze", json!({ "room_id": 5, "image_base64": "ZnJhbWU=" }))
        .await;

    assert_eq!(status, 400);
    assert_eq!(body, json!({ "error": "Invalid room_id" }));
}

#[tokio::test]
async fn test_analyze_unknown_room() {
    let srv = TestServer::start().await;
    let (status, body) = srv
        .post("/analyze", json!({ "room_id": "Z9", "image_base64": "ZnJhbWU=" }))
        .await;

    assert_eq!(status, 404);
    assert_eq!(body["error"], "Room not found");
}

#[tokio::test]
async fn test_analyze_provider_down() {
    let srv = TestServer::start().await;
    srv.vision_returns(500, json!({ "error": { "message": "backend error" } }))
        .await;

    let (status, body) = srv
        .post("/analyze", json!({ "room_id": "A1", "image_base64": "ZnJhbWU=" }))
        .await;

    assert_eq!(status, 503);
    assert_eq!(
        body,
        json!({ "error": "Vision API unavailable", "count": 0, "confidence": 0 })
    );

    let (_, rooms) = srv.get("/rooms").await;
    assert_eq!(rooms[0]["occupancy"], 8);
    assert_eq!(rooms[0]["source"], "static");
}

// ── Snapshot ────────────────────────────────────────────────────────

#[tokio::test]
async fn test_snapshot_live_room() {
    let srv = TestServer::start().await;
    let (status, body) = srv.get("/snapshot/b2").await;

    assert_eq!(status, 200);
    assert_eq!(body["room_id"], "B2");
    assert_eq!(body["image_base64"], Value::Null);
    assert_eq!(body["image_source"], "browser_webcam");
    assert_eq!(body["is_live"], true);
    assert_eq!(body["capacity"], 20);
}

#[tokio::test]
async fn test_snapshot_simulated_room() {
    let srv = TestServer::start().await;
    Mock::given(method("GET"))
        .and(path("/img/a1.jpg"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"jpeg".to_vec()))
        .mount(&srv.upstream)
        .await;

    let (status, body) = srv.get("/snapshot/A1").await;

    assert_eq!(status, 200);
    assert_eq!(body["image_base64"], "anBlZw==");
    assert_eq!(body["image_source"], "simulated_feed");
    assert_eq!(body["is_live"], false);
    assert_eq!(body["room_name"], "Conference Room A");
    assert_eq!(body["status"], "occupied");
}

#[tokio::test]
async fn test_snapshot_errors() {
    let srv = TestServer::start().await;

    let (status, body) = srv.get("/snapshot/Z9").await;
    assert_eq!(status, 404);
    assert_eq!(body, json!({ "error": "Room not found" }));

    // C1 has no configured image in this fixture.
    let (status, body) = srv.get("/snapshot/C1").await;
    assert_eq!(status, 503);
    assert_eq!(body, json!({ "error": "Image unavailable" }));
}

#[tokio::test]
async fn test_cors_allows_any_origin() {
    let srv = TestServer::start().await;
    let resp = srv
        .http
        .get(format!("{}/rooms", srv.base))
        .header("Origin", "http://dashboard.example")
        .send()
        .await
        .unwrap();

    assert_eq!(
        resp.headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );
}
