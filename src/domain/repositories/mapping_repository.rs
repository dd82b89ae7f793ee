//! Store adapter contract for URL mappings.

use async_trait::async_trait;
use thiserror::Error;

/// Errors returned by mapping store adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// No mapping exists for the code, or it has expired.
    #[error("mapping not found")]
    NotFound,

    /// The backend could not be reached or rejected the operation.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Key-value store adapter for short code mappings.
///
/// Every write carries the adapter's fixed TTL. Writing an existing code
/// overwrites the URL and restarts the expiry clock; there is no separate
/// update operation.
///
/// # Implementations
///
/// - [`crate::infrastructure::store::RedisMappingStore`] - Redis `SET .. EX`
/// - [`crate::infrastructure::store::MemoryMappingStore`] - In-process map
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MappingRepository: Send + Sync {
    /// Persists `original_url` under `short_code` with the adapter's TTL.
    ///
    /// `user_id` is accepted for symmetry with the derivation input but is
    /// not persisted.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] if the write fails.
    async fn save(&self, short_code: &str, original_url: &str, user_id: &str) -> StoreResult<()>;

    /// Reads the URL stored under `short_code`.
    ///
    /// # Errors
    ///
    /// - [`StoreError::NotFound`] if the code is absent or expired
    /// - [`StoreError::Unavailable`] on backend failure
    async fn retrieve(&self, short_code: &str) -> StoreResult<String>;

    /// Returns whether `short_code` currently resolves.
    ///
    /// Any retrieval error counts as "does not exist", so a store outage
    /// looks the same as a missing key.
    async fn exists(&self, short_code: &str) -> bool;

    /// Checks whether the backend answers.
    async fn health_check(&self) -> bool;
}
