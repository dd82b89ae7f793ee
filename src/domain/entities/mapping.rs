//! URL mapping entity and its lifetime.

use chrono::{DateTime, TimeDelta, Utc};
use std::time::Duration;

/// How long a mapping lives after it is written.
///
/// Enforced by the store's native expiry and reset on every overwrite.
/// Reads do not extend it.
pub const MAPPING_TTL: Duration = Duration::from_secs(6 * 60 * 60);

/// A short code and the original URL it resolves to.
///
/// The user identifier is not part of the mapping. It only feeds the code
/// derivation, so it cannot be recovered from a stored entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlMapping {
    pub code: String,
    pub long_url: String,
}

impl UrlMapping {
    /// Creates a new mapping.
    pub fn new(code: impl Into<String>, long_url: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            long_url: long_url.into(),
        }
    }
}

/// Returns the wall-clock time at which a mapping written at `written_at`
/// with the given `ttl` stops resolving.
pub fn expires_at(written_at: DateTime<Utc>, ttl: Duration) -> DateTime<Utc> {
    written_at + TimeDelta::seconds(ttl.as_secs() as i64)
}
