//! Handlers for the short URL resource.

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
};
use chrono::Utc;
use validator::Validate;

use crate::api::dto::short_url::{CreateShortUrlRequest, CreateShortUrlResponse, ShortUrlResponse};
use crate::domain::entities::expires_at;
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short URL for a long URL and user.
///
/// # Endpoint
///
/// `POST /api/v1/short-urls`
///
/// # Request Body
///
/// ```json
/// { "long_url": "https://example.com/a", "user_id": "user1" }
/// ```
///
/// # Response
///
/// ```json
/// {
///   "message": "short url created successfully",
///   "short_url": "http://localhost:9808/wLkJasyJ",
///   "code": "wLkJasyJ",
///   "expires_at": "2026-01-01T06:00:00Z"
/// }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request if the body is malformed or a field is missing.
/// Returns 500 Internal Server Error if the store write fails.
pub async fn create_short_url_handler(
    State(state): State<AppState>,
    payload: Result<Json<CreateShortUrlRequest>, JsonRejection>,
) -> Result<Json<CreateShortUrlResponse>, AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let written_at = Utc::now();
    let code = state
        .url_service
        .create_short_url(&payload.long_url, &payload.user_id)
        .await?;

    Ok(Json(CreateShortUrlResponse {
        message: "short url created successfully".to_string(),
        short_url: state.url_service.short_url(&code),
        expires_at: expires_at(written_at, state.url_service.mapping_ttl()),
        code,
    }))
}

/// Returns the mapping behind a short code.
///
/// # Endpoint
///
/// `GET /api/v1/short-urls/{id}`
///
/// # Errors
///
/// Returns 404 Not Found if the code is unknown, expired, or the store is
/// unreachable.
pub async fn get_short_url_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ShortUrlResponse>, AppError> {
    let mapping = state.url_service.lookup(&id).await?;

    Ok(Json(ShortUrlResponse {
        short_url: state.url_service.short_url(&mapping.code),
        long_url: mapping.long_url,
    }))
}
