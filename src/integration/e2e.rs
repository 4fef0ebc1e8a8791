//! End-to-end tests: addon routes against a mock tuner.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tower::util::ServiceExt;

use crate::config::ServerConfig;
use crate::http::create_router;
use crate::integration::fixtures::{unreachable_config, MockResponses, MockTuner};
use crate::state::AppState;

fn app(config: ServerConfig) -> Router {
    create_router(Arc::new(AppState::new(config).unwrap()))
}

async fn get(app: Router, uri: &str) -> (StatusCode, String) {
    let response = app
        .oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

async fn get_json(app: Router, uri: &str) -> Value {
    let (status, body) = get(app, uri).await;
    assert_eq!(status, StatusCode::OK, "{}", uri);
    serde_json::from_str(&body).unwrap()
}

#[tokio::test]
async fn test_manifest() {
    let tuner = MockTuner::start(MockResponses::healthy(0)).await;
    let manifest = get_json(app(tuner.config()), "/manifest.json").await;

    assert_eq!(manifest["name"], "HDHomerun Live");
    assert_eq!(
        manifest["description"],
        format!("OTA via {}", tuner.address())
    );
}

#[tokio::test]
async fn test_catalog_route() {
    let tuner = MockTuner::start(MockResponses::healthy(0)).await;
    let catalog = get_json(app(tuner.config()), "/catalog/channel/hdhr_ota.json").await;

    let metas = catalog["metas"].as_array().unwrap();
    assert_eq!(metas.len(), 2);
    assert_eq!(metas[0]["id"], "hdhr_5.1");
    assert_eq!(metas[0]["poster"], "http://addon.lan/assets/WABC.png");
}

#[tokio::test]
async fn test_catalog_extra_route() {
    let tuner = MockTuner::start(MockResponses::healthy(0)).await;
    let catalog = get_json(
        app(tuner.config()),
        "/catalog/tv/hdhr_ota/skip=100.json",
    )
    .await;
    assert_eq!(catalog["metas"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_meta_route() {
    let now = chrono::Utc::now().timestamp();
    let tuner = MockTuner::start(MockResponses::healthy(now)).await;
    let meta = get_json(app(tuner.config()), "/meta/tv/hdhr_5.1.json").await;

    assert_eq!(meta["meta"]["name"], "WABC-HD");
    assert_eq!(meta["meta"]["description"], "Live on News");
    assert_eq!(meta["meta"]["behaviorHints"]["isLive"], true);
    assert_eq!(meta["meta"]["behaviorHints"]["defaultVideoId"], "hdhr_5.1");
}

#[tokio::test]
async fn test_stream_route() {
    let now = chrono::Utc::now().timestamp();
    let tuner = MockTuner::start(MockResponses::healthy(now)).await;
    let body = get_json(app(tuner.config()), "/stream/tv/hdhr_5.1.json").await;

    let streams = body["streams"].as_array().unwrap();
    assert_eq!(streams.len(), 3);
    assert_eq!(streams[0]["title"], "🌀 Mediaflow (News)");
    assert_eq!(
        streams[0]["url"],
        "http://px:8888/proxy/hls/manifest.m3u8?d=http%3A%2F%2F127.0.0.1%3A5004%2Fauto%2Fv5.1&api_password=secret"
    );
    assert_eq!(streams[0]["behaviorHints"]["bingeGroup"], "tv");
    assert_eq!(streams[1]["title"], "📡 Direct (News)");
    assert_eq!(streams[1]["url"], "http://127.0.0.1:5004/auto/v5.1");
    assert_eq!(streams[1]["behaviorHints"]["notWebReady"], true);
    assert_eq!(streams[2]["name"], "ℹ️ DEVICE INFO");
}

#[tokio::test]
async fn test_stream_route_with_slow_tuner() {
    let responses = MockResponses::healthy(0).with_discover_delay(Duration::from_millis(400));
    let tuner = MockTuner::start(responses).await;
    let mut config = tuner.config();
    config.tuner.discover_timeout_ms = 50;

    let body = get_json(app(config), "/stream/channel/hdhr_5.1.json").await;
    let streams = body["streams"].as_array().unwrap();

    assert_eq!(streams.len(), 3);
    assert_eq!(streams[0]["title"], "🌀 Mediaflow (Live)");
    assert_eq!(streams[1]["title"], "📡 Direct (Live)");
    assert_eq!(
        streams[2]["title"],
        "Unavailable - Could not reach HDHomeRun API"
    );
}

#[tokio::test]
async fn test_unreachable_tuner_degrades() {
    let app = app(unreachable_config());

    let catalog = get_json(app.clone(), "/catalog/tv/hdhr_ota.json").await;
    assert_eq!(catalog["metas"].as_array().unwrap().len(), 0);

    let meta = get_json(app.clone(), "/meta/tv/hdhr_9.1.json").await;
    assert_eq!(meta["meta"]["name"], "Channel 9.1");

    let streams = get_json(app, "/stream/tv/hdhr_9.1.json").await;
    assert_eq!(streams["streams"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_foreign_ids() {
    let app = app(unreachable_config());

    let meta = get_json(app.clone(), "/meta/movie/tt0111161.json").await;
    assert!(meta["meta"].is_null());

    let streams = get_json(app, "/stream/movie/tt0111161.json").await;
    assert_eq!(streams["streams"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_health() {
    let tuner = MockTuner::start(MockResponses::healthy(0)).await;
    let (status, body) = get(app(tuner.config()), "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, format!("HDHomerun available at {}", tuner.address()));
}

#[tokio::test]
async fn test_health_unreachable() {
    let (status, body) = get(app(unreachable_config()), "/health").await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body, "Unreachable");
}

#[tokio::test]
async fn test_health_without_guide_token() {
    let responses = MockResponses::healthy(0)
        .with_discover(serde_json::json!({ "FriendlyName": "HDHomeRun" }));
    let tuner = MockTuner::start(responses).await;
    let (status, _) = get(app(tuner.config()), "/health").await;

    assert_eq!(status, StatusCode::OK);
}
