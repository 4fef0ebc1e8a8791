//! Axum router configuration

use axum::{
    http::{header, Method},
    routing::get,
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

use super::handlers::{
    asset_handler, catalog_extra_handler, catalog_handler, health_check, manifest_handler,
    meta_handler, stream_handler, version_check,
};

/// Create the Axum router with all routes
pub fn create_router(state: Arc<AppState>) -> Router {
    let cors_enabled = state.config.cors_enabled;

    let router = Router::new()
        // Health and version endpoints
        .route("/health", get(health_check))
        .route("/version", get(version_check))
        // Addon protocol
        .route("/manifest.json", get(manifest_handler))
        .route("/catalog/{type}/{id}", get(catalog_handler))
        .route("/catalog/{type}/{id}/{extra}", get(catalog_extra_handler))
        .route("/meta/{type}/{id}", get(meta_handler))
        .route("/stream/{type}/{id}", get(stream_handler))
        // Channel art
        .route("/assets/{file}", get(asset_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    if !cors_enabled {
        return router;
    }

    // Playback clients fetch the addon from web origins
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::OPTIONS, Method::HEAD])
        .allow_headers([header::ACCEPT, header::CONTENT_TYPE, header::ORIGIN])
        .allow_private_network(true)
        .max_age(Duration::from_secs(3600));

    router.layer(cors)
}
