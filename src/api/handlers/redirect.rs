//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{HeaderValue, StatusCode, header},
    response::IntoResponse,
};
use serde_json::json;

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /{short_url}`
///
/// Answers `302 Found` with the original URL in `Location`. Bytes that are
/// not allowed in a header value are percent-encoded.
///
/// # Errors
///
/// Returns 404 Not Found if the code is unknown, expired, or the store is
/// unreachable.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let long_url = state.url_service.resolve(&code).await?;
    let location = location_header(&long_url)?;

    Ok((StatusCode::FOUND, [(header::LOCATION, location)]))
}

fn location_header(long_url: &str) -> Result<HeaderValue, AppError> {
    if let Ok(value) = HeaderValue::from_str(long_url) {
        return Ok(value);
    }

    HeaderValue::try_from(escape_header_bytes(long_url)).map_err(|e| {
        AppError::internal(
            "Stored URL cannot be used as a redirect target",
            json!({ "reason": e.to_string() }),
        )
    })
}

/// Percent-encodes control bytes, leaving everything a header value accepts.
fn escape_header_bytes(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());

    for ch in value.chars() {
        if ch.is_ascii_control() && ch != '\t' {
            escaped.push_str(&format!("%{:02X}", ch as u32));
        } else {
            escaped.push(ch);
        }
    }

    escaped
}
