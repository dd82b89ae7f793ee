//! DTOs for the short URL endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to create a short URL.
///
/// Both fields are required and must be non-empty. Missing fields
/// deserialize to empty strings so they are reported by validation rather
/// than by the JSON extractor.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateShortUrlRequest {
    /// The original URL to shorten.
    #[serde(default)]
    #[validate(length(min = 1, message = "long_url is required"))]
    pub long_url: String,

    /// Identifier of the requesting user, folded into the short code.
    #[serde(default)]
    #[validate(length(min = 1, message = "user_id is required"))]
    pub user_id: String,
}

/// Response for a newly created short URL.
#[derive(Debug, Serialize)]
pub struct CreateShortUrlResponse {
    pub message: String,
    pub short_url: String,
    pub code: String,
    pub expires_at: DateTime<Utc>,
}

/// A resolved short URL.
#[derive(Debug, Serialize)]
pub struct ShortUrlResponse {
    pub short_url: String,
    pub long_url: String,
}
