//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /`                        - Welcome message
//! - `GET  /health`                  - Store health check
//! - `POST /api/v1/short-urls`       - Create a short URL
//! - `GET  /api/v1/short-urls/{id}`  - Inspect a short URL
//! - `GET  /{short_url}`             - Redirect to the original URL
//!
//! # Middleware
//!
//! - **Route policy** - Per-route Cache-Control and access logging
//! - **Tracing** - Request spans with the matched route
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::{health_handler, redirect_handler, welcome_handler};
use crate::api::middleware::route_policy::{self, RouteRegistry};
use crate::api::middleware::tracing;
use crate::state::AppState;
use axum::routing::get;
use axum::{Router, middleware};
use std::sync::Arc;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Builds the router with all routes and middleware, without path
/// normalization.
pub fn build_router(state: AppState) -> Router {
    let registry = Arc::new(RouteRegistry::default());

    Router::new()
        .route("/", get(welcome_handler))
        .route("/health", get(health_handler))
        .nest("/api/v1", api::routes::v1_routes())
        .route("/{short_url}", get(redirect_handler))
        .with_state(state)
        .layer(tracing::layer())
        .layer(middleware::from_fn_with_state(registry, route_policy::layer))
}

/// Constructs the application router, trimming trailing slashes before
/// routing.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(build_router(state))
}
