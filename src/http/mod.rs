//! HTTP server module
//!
//! This module handles HTTP request routing and handling:
//! - Axum router with the addon endpoints
//! - Request handlers for manifest, catalog, meta and stream resources
//! - Channel art redirects and the health probe
//! - CORS middleware

pub mod handlers;
pub mod routes;

pub use routes::create_router;
