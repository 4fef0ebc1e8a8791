//! Test fixtures for integration tests
//!
//! Provides a mock tuner that serves `/discover.json`, `/lineup.json` and the
//! guide service from one local axum server.

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

use crate::config::ServerConfig;

/// Token the mock guide service accepts.
pub const DEVICE_AUTH: &str = "abc123";

/// Canned upstream bodies. `None` answers 404.
#[derive(Debug, Clone)]
pub struct MockResponses {
    pub discover: Option<String>,
    pub lineup: Option<String>,
    pub guide: Option<String>,
    pub discover_delay: Duration,
    pub lineup_delay: Duration,
}

impl MockResponses {
    /// A tuner with two channels and a guide covering `now`
    pub fn healthy(now: i64) -> Self {
        Self {
            discover: Some(sample_discover().to_string()),
            lineup: Some(sample_lineup().to_string()),
            guide: Some(sample_guide(now).to_string()),
            discover_delay: Duration::ZERO,
            lineup_delay: Duration::ZERO,
        }
    }

    pub fn with_discover(mut self, body: Value) -> Self {
        self.discover = Some(body.to_string());
        self
    }

    pub fn with_lineup(mut self, body: Value) -> Self {
        self.lineup = Some(body.to_string());
        self
    }

    pub fn with_raw_lineup(mut self, body: &str) -> Self {
        self.lineup = Some(body.to_string());
        self
    }

    pub fn with_guide(mut self, body: Value) -> Self {
        self.guide = Some(body.to_string());
        self
    }

    pub fn with_discover_delay(mut self, delay: Duration) -> Self {
        self.discover_delay = delay;
        self
    }

    pub fn with_lineup_delay(mut self, delay: Duration) -> Self {
        self.lineup_delay = delay;
        self
    }
}

pub fn sample_discover() -> Value {
    json!({
        "FriendlyName": "HDHomeRun FLEX 4K",
        "ModelNumber": "HDFX-4K",
        "FirmwareName": "hdhomerun_dvr_atsc3",
        "FirmwareVersion": "20230713",
        "DeviceID": "1050A1B2",
        "DeviceAuth": DEVICE_AUTH,
        "TunerCount": 4,
        "BaseURL": "http://10.0.0.5:80",
        "LineupURL": "http://10.0.0.5:80/lineup.json"
    })
}

pub fn sample_lineup() -> Value {
    json!([
        {
            "GuideNumber": "5.1",
            "GuideName": "WABC-HD",
            "VideoCodec": "MPEG2",
            "AudioCodec": "AC3",
            "HD": 1,
            "SignalStrength": 92,
            "SignalQuality": 100,
            "URL": "http://10.0.0.5:5004/auto/v5.1"
        },
        {
            "GuideNumber": "7.2",
            "GuideName": "Bounce",
            "VideoCodec": "MPEG2",
            "AudioCodec": "AC3",
            "SignalStrength": 71,
            "SignalQuality": 88,
            "URL": "http://10.0.0.5:5004/auto/v7.2"
        }
    ])
}

/// Guide where "News" airs on 5.1 around `now` and 7.2 has no entries.
pub fn sample_guide(now: i64) -> Value {
    json!([
        {
            "GuideNumber": "5.1",
            "GuideName": "WABC-HD",
            "Guide": [
                { "Title": "Morning Show", "StartTime": now - 7200, "EndTime": now - 600 },
                { "Title": "News", "StartTime": now - 600, "EndTime": now + 1200,
                  "EpisodeTitle": "Evening Edition" },
                { "Title": "Jeopardy!", "StartTime": now + 1200, "EndTime": now + 3000 }
            ]
        },
        {
            "GuideNumber": "7.2",
            "GuideName": "Bounce",
            "Guide": []
        }
    ])
}

/// A local mock tuner, shut down on drop.
pub struct MockTuner {
    addr: SocketAddr,
    handle: JoinHandle<()>,
}

fn json_response(body: Option<&String>) -> Response {
    match body {
        Some(body) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "application/json")],
            body.clone(),
        )
            .into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn discover(State(responses): State<Arc<MockResponses>>) -> Response {
    tokio::time::sleep(responses.discover_delay).await;
    json_response(responses.discover.as_ref())
}

async fn lineup(State(responses): State<Arc<MockResponses>>) -> Response {
    tokio::time::sleep(responses.lineup_delay).await;
    json_response(responses.lineup.as_ref())
}

async fn guide(
    State(responses): State<Arc<MockResponses>>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    if params.get("DeviceAuth").map(String::as_str) != Some(DEVICE_AUTH) {
        return StatusCode::FORBIDDEN.into_response();
    }
    json_response(responses.guide.as_ref())
}

impl MockTuner {
    pub async fn start(responses: MockResponses) -> Self {
        let app = Router::new()
            .route("/discover.json", get(discover))
            .route("/lineup.json", get(lineup))
            .route("/api/guide", get(guide))
            .with_state(Arc::new(responses));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock tuner");
        let addr = listener.local_addr().expect("mock tuner address");
        let handle = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self { addr, handle }
    }

    /// `127.0.0.1:<port>`, usable as the tuner address
    pub fn address(&self) -> String {
        self.addr.to_string()
    }

    /// Server configuration pointing the tuner and guide service at this mock
    pub fn config(&self) -> ServerConfig {
        let mut config = ServerConfig::default();
        config.tuner.address = self.address();
        config.tuner.guide_url = format!("http://{}/api/guide", self.addr);
        config.tuner.discover_timeout_ms = 500;
        config.tuner.lineup_timeout_ms = 500;
        config.tuner.guide_timeout_ms = 500;
        config.proxy.base_url = "http://px:8888".to_string();
        config.proxy.api_password = "secret".to_string();
        config.external_url = "http://addon.lan".to_string();
        config
    }
}

impl Drop for MockTuner {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// A listener that accepts connections and never answers.
///
/// Keep the returned listener alive for as long as requests should hang.
pub async fn silent_listener() -> (tokio::net::TcpListener, String) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind silent listener");
    let addr = listener.local_addr().expect("silent listener address");
    (listener, addr.to_string())
}

/// An address nothing listens on.
pub fn closed_address() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind probe");
    let addr = listener.local_addr().expect("probe address");
    drop(listener);
    addr.to_string()
}

/// Configuration for a tuner that refuses connections.
pub fn unreachable_config() -> ServerConfig {
    let mut config = ServerConfig::default();
    let address = closed_address();
    config.tuner.guide_url = format!("http://{}/api/guide", address);
    config.tuner.address = address;
    config.tuner.discover_timeout_ms = 500;
    config.tuner.lineup_timeout_ms = 500;
    config.tuner.guide_timeout_ms = 500;
    config.proxy.base_url = "http://px:8888".to_string();
    config.proxy.api_password = "secret".to_string();
    config.external_url = "http://addon.lan".to_string();
    config
}
