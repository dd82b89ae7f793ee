//! Domain layer: the mapping entity and the store adapter contract.
//!
//! - [`entities`] - [`entities::UrlMapping`] and the fixed mapping TTL
//! - [`repositories`] - [`repositories::MappingRepository`] trait and [`repositories::StoreError`]
//!
//! Nothing here depends on Redis or Axum; the infrastructure and API layers
//! depend on this module, never the other way around.

pub mod entities;
pub mod repositories;
