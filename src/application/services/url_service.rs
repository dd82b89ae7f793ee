//! Short URL creation and resolution service.

use std::sync::Arc;
use std::time::Duration;

use crate::domain::entities::{MAPPING_TTL, UrlMapping};
use crate::domain::repositories::{MappingRepository, StoreError};
use crate::error::AppError;
use crate::utils::code_generator::derive_short_code;
use serde_json::json;
use tracing::{info, warn};

/// Service for creating and resolving short URLs.
///
/// Stateless apart from the shared store handle. Concurrent creations of the
/// same code are not coordinated: the last write wins.
pub struct UrlService<R: MappingRepository + ?Sized> {
    repository: Arc<R>,
    base_url: String,
}

impl<R: MappingRepository + ?Sized> UrlService<R> {
    /// Creates a new URL service.
    ///
    /// `base_url` is the public prefix short URLs are built from, e.g.
    /// `http://localhost:9808/`.
    pub fn new(repository: Arc<R>, base_url: impl Into<String>) -> Self {
        Self {
            repository,
            base_url: base_url.into(),
        }
    }

    /// Derives the short code for `long_url` and `user_id` and stores the
    /// mapping.
    ///
    /// Saving an already existing code overwrites it and restarts its TTL.
    /// Collisions between distinct inputs are not detected.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] if the store write fails. Nothing is
    /// retried or rolled back.
    pub async fn create_short_url(&self, long_url: &str, user_id: &str) -> Result<String, AppError> {
        let code = derive_short_code(long_url, user_id);

        self.repository.save(&code, long_url, user_id).await?;

        info!(code = %code, "Short URL created");
        Ok(code)
    }

    /// Resolves a short code to its original URL.
    ///
    /// An absent code and an unreachable store produce the same
    /// [`AppError::NotFound`]; the store failure is only visible in logs.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the code cannot be resolved.
    pub async fn resolve(&self, short_code: &str) -> Result<String, AppError> {
        match self.repository.retrieve(short_code).await {
            Ok(url) if !url.is_empty() => Ok(url),
            Ok(_) | Err(StoreError::NotFound) => Err(url_not_found(short_code)),
            Err(e) => {
                warn!(code = %short_code, error = %e, "Lookup failed, reporting as not found");
                Err(url_not_found(short_code))
            }
        }
    }

    /// Resolves a short code into a full [`UrlMapping`].
    ///
    /// # Errors
    ///
    /// Same as [`Self::resolve`].
    pub async fn lookup(&self, short_code: &str) -> Result<UrlMapping, AppError> {
        let long_url = self.resolve(short_code).await?;
        Ok(UrlMapping::new(short_code, long_url))
    }

    /// Returns whether a short code currently resolves.
    pub async fn exists(&self, short_code: &str) -> bool {
        self.repository.exists(short_code).await
    }

    /// Checks whether the backing store answers.
    pub async fn store_healthy(&self) -> bool {
        self.repository.health_check().await
    }

    /// Builds the public short URL for a code.
    pub fn short_url(&self, code: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), code)
    }

    /// Lifetime of a newly created mapping.
    pub fn mapping_ttl(&self) -> Duration {
        MAPPING_TTL
    }
}

fn url_not_found(short_code: &str) -> AppError {
    AppError::not_found("URL not found", json!({ "code": short_code }))
}
