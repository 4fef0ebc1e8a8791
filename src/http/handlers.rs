//! HTTP request handlers
//!
//! Every addon handler answers 200 with a degraded body when the tuner
//! misbehaves; only `/health` reports upstream state through the status code.

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;

use crate::addon::{
    assets::{avatar_url, name_from_file},
    manifest,
    types::{CatalogResponse, Manifest, MetaResponse, StreamResponse},
};
use crate::state::AppState;

// helper.
fn resource_id(file: &str) -> &str {
    file.strip_suffix(".json").unwrap_or(file)
}

/// Health check endpoint
/// GET /health
pub async fn health_check(State(state): State<Arc<AppState>>) -> Response {
    match state.gateway.identify().await {
        Ok(_) => (
            StatusCode::OK,
            format!("HDHomerun available at {}", state.config.tuner.address),
        )
            .into_response(),
        Err(e) => {
            tracing::warn!("Health check failed: {}", e);
            (StatusCode::SERVICE_UNAVAILABLE, "Unreachable").into_response()
        }
    }
}

/// Version endpoint
pub async fn version_check() -> &'static str {
    concat!("hdhr-bridge v", env!("CARGO_PKG_VERSION"))
}

/// Addon manifest
/// GET /manifest.json
pub async fn manifest_handler(State(state): State<Arc<AppState>>) -> Json<Manifest> {
    Json(manifest(&state.config.tuner.address))
}

/// Channel catalog
/// GET /catalog/{type}/{id}.json
pub async fn catalog_handler(
    State(state): State<Arc<AppState>>,
    Path((kind, file)): Path<(String, String)>,
) -> Json<CatalogResponse> {
    tracing::debug!("Catalog request {}/{}", kind, resource_id(&file));
    Json(state.addon.catalog(&kind).await)
}

/// Catalog with extra arguments (search, skip); extras are not supported
/// GET /catalog/{type}/{id}/{extra}.json
pub async fn catalog_extra_handler(
    State(state): State<Arc<AppState>>,
    Path((kind, _id, _extra)): Path<(String, String, String)>,
) -> Json<CatalogResponse> {
    Json(state.addon.catalog(&kind).await)
}

/// Channel metadata
/// GET /meta/{type}/{id}.json
pub async fn meta_handler(
    State(state): State<Arc<AppState>>,
    Path((kind, file)): Path<(String, String)>,
) -> Json<MetaResponse> {
    Json(state.addon.meta(&kind, resource_id(&file)).await)
}

/// Stream listing
/// GET /stream/{type}/{id}.json
pub async fn stream_handler(
    State(state): State<Arc<AppState>>,
    Path((kind, file)): Path<(String, String)>,
) -> Json<StreamResponse> {
    Json(state.addon.streams(&kind, resource_id(&file)).await)
}

/// Channel logo
/// GET /assets/{name}.png
pub async fn asset_handler(
    State(state): State<Arc<AppState>>,
    Path(file): Path<String>,
) -> Response {
    match name_from_file(&file) {
        Some(name) => (
            StatusCode::FOUND,
            [(
                header::LOCATION,
                avatar_url(&state.config.assets.avatar_url, &name),
            )],
        )
            .into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}
