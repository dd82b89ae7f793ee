//! Mapping store adapters.
//!
//! Both adapters implement [`crate::domain::repositories::MappingRepository`]:
//! - [`RedisMappingStore`] - Production store, TTL enforced by Redis
//! - [`MemoryMappingStore`] - In-process store for tests and local runs

mod memory_store;
mod redis_store;

pub use memory_store::MemoryMappingStore;
pub use redis_store::{RedisMappingStore, RedisStoreOptions};
