//! Repository trait definitions for the domain layer.
//!
//! Implementations live in `crate::infrastructure::store`. Mock
//! implementations are generated via `mockall` for unit tests.

pub mod mapping_repository;

pub use mapping_repository::{MappingRepository, StoreError, StoreResult};

#[cfg(test)]
pub use mapping_repository::MockMappingRepository;
