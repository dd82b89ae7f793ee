//! In-process mapping store for tests and Redis-less local runs.

use crate::domain::entities::MAPPING_TTL;
use crate::domain::repositories::{MappingRepository, StoreError, StoreResult};
use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::Instant;
use tracing::debug;

struct Entry {
    url: String,
    expires_at: Instant,
}

impl Entry {
    fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// A mapping store held in a `HashMap`.
///
/// Mirrors the Redis adapter's semantics: fixed TTL per write, overwrite
/// resets the clock, reads do not extend it. Expired entries are dropped
/// lazily on read and swept on write. Deadlines use [`tokio::time::Instant`]
/// so tests can drive expiry with a paused clock.
pub struct MemoryMappingStore {
    entries: RwLock<HashMap<String, Entry>>,
    ttl: Duration,
}

impl MemoryMappingStore {
    /// Creates an empty store using [`MAPPING_TTL`].
    pub fn new() -> Self {
        Self::with_ttl(MAPPING_TTL)
    }

    /// Creates an empty store with a custom TTL.
    pub fn with_ttl(ttl: Duration) -> Self {
        debug!("Using in-memory mapping store (TTL: {:?})", ttl);
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    /// Number of entries that have not expired yet.
    pub async fn len(&self) -> usize {
        let now = Instant::now();
        self.entries
            .read()
            .await
            .values()
            .filter(|entry| !entry.is_expired(now))
            .count()
    }

    /// Returns `true` if no live entries remain.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

/// Returns a live entry, dropping it if expired. A write may have refreshed
/// the entry since it was last seen under the read lock.
fn take_live(entries: &mut HashMap<String, Entry>, short_code: &str, now: Instant) -> StoreResult<String> {
    match entries.get(short_code) {
        Some(entry) if !entry.is_expired(now) => Ok(entry.url.clone()),
        Some(_) => {
            entries.remove(short_code);
            debug!(code = %short_code, "Dropped expired mapping");
            Err(StoreError::NotFound)
        }
        None => Err(StoreError::NotFound),
    }
}

impl Default for MemoryMappingStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MappingRepository for MemoryMappingStore {
    async fn save(&self, short_code: &str, original_url: &str, user_id: &str) -> StoreResult<()> {
        let now = Instant::now();
        let mut entries = self.entries.write().await;

        entries.retain(|_, entry| !entry.is_expired(now));
        entries.insert(
            short_code.to_string(),
            Entry {
                url: original_url.to_string(),
                expires_at: now + self.ttl,
            },
        );

        debug!(code = %short_code, user_id = %user_id, "Stored mapping in memory");
        Ok(())
    }

    async fn retrieve(&self, short_code: &str) -> StoreResult<String> {
        let now = Instant::now();

        {
            let entries = self.entries.read().await;
            match entries.get(short_code) {
                None => return Err(StoreError::NotFound),
                Some(entry) if !entry.is_expired(now) => return Ok(entry.url.clone()),
                Some(_) => {}
            }
        }

        let mut entries = self.entries.write().await;
        take_live(&mut entries, short_code, Instant::now())
    }

    async fn exists(&self, short_code: &str) -> bool {
        self.retrieve(short_code).await.is_ok()
    }

    async fn health_check(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_save_then_retrieve() {
        let store = MemoryMappingStore::new();

        store
            .save("wLkJasyJ", "https://example.com/a", "user1")
            .await
            .unwrap();

        assert_eq!(
            store.retrieve("wLkJasyJ").await.unwrap(),
            "https://example.com/a"
        );
    }

    #[tokio::test]
    async fn test_retrieve_unknown_code() {
        let store = MemoryMappingStore::new();

        assert_eq!(store.retrieve("missing1").await, Err(StoreError::NotFound));
    }

    #[tokio::test]
    async fn test_exists() {
        let store = MemoryMappingStore::new();
        store
            .save("wLkJasyJ", "https://example.com/a", "user1")
            .await
            .unwrap();

        assert!(store.exists("wLkJasyJ").await);
        assert!(!store.exists("neverset").await);
    }

    #[tokio::test]
    async fn test_save_overwrites_existing_code() {
        let store = MemoryMappingStore::new();
        store.save("code0001", "https://first.example", "a").await.unwrap();
        store.save("code0001", "https://second.example", "b").await.unwrap();

        assert_eq!(
            store.retrieve("code0001").await.unwrap(),
            "https://second.example"
        );
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_entry_expires_after_ttl() {
        let store = MemoryMappingStore::with_ttl(Duration::from_secs(10));
        store.save("code0001", "https://example.com", "u").await.unwrap();

        tokio::time::advance(Duration::from_secs(9)).await;
        assert!(store.exists("code0001").await);

        tokio::time::advance(Duration::from_secs(1)).await;
        assert_eq!(store.retrieve("code0001").await, Err(StoreError::NotFound));
        assert!(store.is_empty().await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_read_does_not_extend_ttl() {
        let store = MemoryMappingStore::with_ttl(Duration::from_secs(10));
        store.save("code0001", "https://example.com", "u").await.unwrap();

        tokio::time::advance(Duration::from_secs(6)).await;
        assert!(store.retrieve("code0001").await.is_ok());

        tokio::time::advance(Duration::from_secs(6)).await;
        assert!(store.retrieve("code0001").await.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_overwrite_resets_ttl() {
        let store = MemoryMappingStore::with_ttl(Duration::from_secs(10));
        store.save("code0001", "https://example.com", "u").await.unwrap();

        tokio::time::advance(Duration::from_secs(8)).await;
        store.save("code0001", "https://example.com", "u").await.unwrap();

        tokio::time::advance(Duration::from_secs(8)).await;
        assert!(store.exists("code0001").await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_save_sweeps_expired_entries() {
        let store = MemoryMappingStore::with_ttl(Duration::from_secs(1));
        store.save("old00001", "https://old.example", "u").await.unwrap();

        tokio::time::advance(Duration::from_secs(2)).await;
        store.save("new00001", "https://new.example", "u").await.unwrap();

        assert_eq!(store.entries.read().await.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_retrieve_returns_entry_refreshed_after_read() {
        let store = MemoryMappingStore::with_ttl(Duration::from_secs(10));
        store.save("code0001", "https://stale.example", "u").await.unwrap();

        tokio::time::advance(Duration::from_secs(11)).await;
        let seen_expired = store.entries.read().await["code0001"].is_expired(Instant::now());
        assert!(seen_expired);

        // A save lands between the expired read and the write lock
        store.save("code0001", "https://fresh.example", "u").await.unwrap();

        let mut entries = store.entries.write().await;
        assert_eq!(
            take_live(&mut entries, "code0001", Instant::now()),
            Ok("https://fresh.example".to_string())
        );
        assert!(entries.contains_key("code0001"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_take_live_drops_expired_entry() {
        let store = MemoryMappingStore::with_ttl(Duration::from_secs(1));
        store.save("code0001", "https://example.com", "u").await.unwrap();

        tokio::time::advance(Duration::from_secs(2)).await;

        let mut entries = store.entries.write().await;
        assert_eq!(
            take_live(&mut entries, "code0001", Instant::now()),
            Err(StoreError::NotFound)
        );
        assert!(entries.is_empty());
    }
}
