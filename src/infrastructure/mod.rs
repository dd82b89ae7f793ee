//! Infrastructure layer for external integrations.
//!
//! Implements the store adapter contract defined by the domain layer.
//!
//! - [`store`] - Redis and in-memory mapping stores

pub mod store;
