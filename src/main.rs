//! HDHomeRun addon bridge
//!
//! Exposes the channels of a local HDHomeRun tuner as an addon with
//! catalog, meta and stream resources. Titles come from the HDHomeRun guide
//! service; playback goes through an HLS transcoding proxy or straight to
//! the tuner.

mod addon;
mod config;
mod config_file;
mod error;
mod guide;
mod http;
mod state;
mod stream;
mod tuner;

use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::ServerConfig;
use crate::error::{BridgeError, Result};
use crate::http::create_router;
use crate::state::AppState;

/// Application version
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
const APP_NAME: &str = "hdhr-bridge";

#[tokio::main]
async fn main() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let first = args.next();

    // `hdhr-bridge --init [path]` writes a default configuration file
    if first.as_deref() == Some("--init") {
        let path = args.next().unwrap_or_else(|| "config.toml".to_string());
        crate::config_file::generate_default_config(&path)
            .map_err(|e| BridgeError::Config(format!("Failed to write {}: {}", path, e)))?;
        println!("Wrote default configuration to {}", path);
        return Ok(());
    }

    // Load configuration
    let config_path = first.unwrap_or_else(|| "config.toml".to_string());
    let (mut config, load_error) = load_config(&config_path);
    config
        .apply_env_overrides(|key| std::env::var(key).ok())
        .map_err(BridgeError::Config)?;

    // Initialize logging
    init_logging(&config);

    tracing::info!("{} v{} starting", APP_NAME, VERSION);
    if let Some(e) = load_error {
        tracing::warn!(
            "Failed to load config file {}: {}. Using defaults.",
            config_path,
            e
        );
    }
    config.validate().map_err(BridgeError::Config)?;
    tracing::info!("Configuration loaded: {:?}", config);

    // Create application state
    let state = Arc::new(AppState::new(config.clone())?);

    // Build router
    let app = create_router(state);

    // Start server
    let addr: SocketAddr = config
        .socket_addr()
        .parse()
        .map_err(|e| BridgeError::Config(format!("Invalid listen address: {}", e)))?;
    tracing::info!(
        "Addon active on {} (tuner {}, proxy {})",
        addr,
        config.tuner.address,
        config.proxy.base_url
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Read the configuration file, falling back to defaults.
///
/// The second value explains why the defaults were used, for logging once
/// tracing is up.
fn load_config(path: &str) -> (ServerConfig, Option<String>) {
    if !std::path::Path::new(path).exists() {
        return (ServerConfig::default(), Some("file not found".to_string()));
    }
    match crate::config_file::ConfigFile::from_file(path) {
        Ok(cf) => (cf.into_server_config(), None),
        Err(e) => (ServerConfig::default(), Some(e.to_string())),
    }
}

/// Initialize logging with tracing
fn init_logging(config: &ServerConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!(
            "hdhr_bridge={},tower_http={}",
            config.log_level, config.log_level
        )
        .into()
    });

    let registry = tracing_subscriber::registry().with(filter);
    if config.log_format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}
