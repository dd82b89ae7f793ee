#![allow(dead_code)]

use async_trait::async_trait;
use kv_shortener::domain::repositories::{MappingRepository, StoreError, StoreResult};
use kv_shortener::infrastructure::store::MemoryMappingStore;
use kv_shortener::state::AppState;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

pub const BASE_URL: &str = "http://localhost:9808/";

pub fn create_test_state() -> (AppState, Arc<MemoryMappingStore>) {
    let store = Arc::new(MemoryMappingStore::new());
    let state = AppState::new(store.clone(), BASE_URL);

    (state, store)
}

pub fn create_state_with(store: Arc<dyn MappingRepository>) -> AppState {
    AppState::new(store, BASE_URL)
}

/// Memory store that counts how often each operation is called.
#[derive(Default)]
pub struct RecordingStore {
    inner: MemoryMappingStore,
    saves: AtomicUsize,
    retrievals: AtomicUsize,
}

impl RecordingStore {
    pub fn saves(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    pub fn retrievals(&self) -> usize {
        self.retrievals.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MappingRepository for RecordingStore {
    async fn save(&self, short_code: &str, original_url: &str, user_id: &str) -> StoreResult<()> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        self.inner.save(short_code, original_url, user_id).await
    }

    async fn retrieve(&self, short_code: &str) -> StoreResult<String> {
        self.retrievals.fetch_add(1, Ordering::SeqCst);
        self.inner.retrieve(short_code).await
    }

    async fn exists(&self, short_code: &str) -> bool {
        self.inner.exists(short_code).await
    }

    async fn health_check(&self) -> bool {
        self.inner.health_check().await
    }
}

/// Store whose backend is permanently unreachable.
pub struct UnavailableStore;

#[async_trait]
impl MappingRepository for UnavailableStore {
    async fn save(&self, _short_code: &str, _original_url: &str, _user_id: &str) -> StoreResult<()> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    async fn retrieve(&self, _short_code: &str) -> StoreResult<String> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    async fn exists(&self, _short_code: &str) -> bool {
        false
    }

    async fn health_check(&self) -> bool {
        false
    }
}
