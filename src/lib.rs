//! # KV Shortener
//!
//! A URL shortening service that derives short codes deterministically from
//! the long URL and the requesting user, and keeps mappings in Redis with a
//! fixed time-to-live.
//!
//! ## Architecture
//!
//! - **Utilities** ([`utils`]) - Short code derivation
//! - **Domain Layer** ([`domain`]) - Mapping entity and store adapter trait
//! - **Application Layer** ([`application`]) - URL service
//! - **Infrastructure Layer** ([`infrastructure`]) - Redis and in-memory stores
//! - **API Layer** ([`api`]) - REST handlers, DTOs, and middleware
//!
//! ## Quick Start
//!
//! ```bash
//! export REDIS_ADDR="localhost:6379"   # default
//! cargo run
//!
//! curl -X POST localhost:9808/api/v1/short-urls \
//!   -H 'content-type: application/json' \
//!   -d '{"long_url":"https://example.com/a","user_id":"user1"}'
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::UrlService;
    pub use crate::domain::entities::{MAPPING_TTL, UrlMapping};
    pub use crate::domain::repositories::{MappingRepository, StoreError, StoreResult};
    pub use crate::error::AppError;
    pub use crate::infrastructure::store::{MemoryMappingStore, RedisMappingStore};
    pub use crate::state::AppState;
    pub use crate::utils::code_generator::derive_short_code;
}
