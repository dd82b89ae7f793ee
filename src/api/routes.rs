//! API route configuration.

use crate::api::handlers::{create_short_url_handler, get_short_url_handler};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Versioned short URL API, nested under `/api/v1`.
///
/// # Endpoints
///
/// - `POST /short-urls`      - Create a short URL
/// - `GET  /short-urls/{id}` - Inspect a short URL
pub fn v1_routes() -> Router<AppState> {
    Router::new()
        .route("/short-urls", post(create_short_url_handler))
        .route("/short-urls/{id}", get(get_short_url_handler))
}
