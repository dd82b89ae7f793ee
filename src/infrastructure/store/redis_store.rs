//! Redis-backed mapping store.

use crate::domain::entities::MAPPING_TTL;
use crate::domain::repositories::{MappingRepository, StoreError, StoreResult};
use async_trait::async_trait;
use redis::{AsyncCommands, Client, RedisResult, aio::ConnectionManager};
use std::future::Future;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Connection settings for [`RedisMappingStore::connect`].
#[derive(Debug, Clone, Copy)]
pub struct RedisStoreOptions {
    /// Upper bound for establishing the connection and the initial PING.
    pub connect_timeout: Duration,
    /// Upper bound for a single command round-trip.
    pub response_timeout: Duration,
}

impl Default for RedisStoreOptions {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(5),
            response_timeout: Duration::from_secs(2),
        }
    }
}

/// Mapping store on top of a Redis connection.
///
/// One entry per short code, value is the original URL as a plain string,
/// expiry handled by Redis (`SET key value EX ttl`). The `ConnectionManager`
/// is opened once and cloned per command; clones share the underlying
/// multiplexed connection and reconnect transparently.
pub struct RedisMappingStore {
    conn: ConnectionManager,
    ttl: Duration,
    key_prefix: String,
    response_timeout: Duration,
}

impl RedisMappingStore {
    /// Connects to Redis and validates the connection with a PING.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] if the URL is invalid, the
    /// connection cannot be established in time, or the PING fails.
    pub async fn connect(redis_url: &str, options: RedisStoreOptions) -> StoreResult<Self> {
        info!("Connecting to Redis");

        let client = Client::open(redis_url).map_err(|e| {
            StoreError::Unavailable(format!("Failed to create Redis client: {}", e))
        })?;

        let manager = tokio::time::timeout(options.connect_timeout, ConnectionManager::new(client))
            .await
            .map_err(|_| {
                StoreError::Unavailable(format!(
                    "Timed out connecting to Redis after {:?}",
                    options.connect_timeout
                ))
            })?
            .map_err(|e| StoreError::Unavailable(format!("Failed to connect to Redis: {}", e)))?;

        let store = Self {
            conn: manager,
            ttl: MAPPING_TTL,
            key_prefix: String::new(),
            response_timeout: options.response_timeout,
        };

        let mut conn = store.conn.clone();
        store.timed("PING", conn.ping::<()>()).await?;

        info!("✓ Connected to Redis");

        Ok(store)
    }

    /// Overrides the mapping TTL. Redis cannot expire in under a second,
    /// so sub-second values are rounded up.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Namespaces every key, for deployments sharing one Redis database.
    pub fn with_key_prefix(mut self, key_prefix: impl Into<String>) -> Self {
        self.key_prefix = key_prefix.into();
        self
    }


    /// Runs a command under the response timeout.
    async fn timed<T, F>(&self, operation: &str, command: F) -> StoreResult<T>
    where
        F: Future<Output = RedisResult<T>>,
    {
        match tokio::time::timeout(self.response_timeout, command).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => Err(map_redis_error(operation, e)),
            Err(_) => Err(StoreError::Unavailable(format!(
                "{operation}: timed out after {:?}",
                self.response_timeout
            ))),
        }
    }
}

/// Whole seconds for `EX`, rounding up and never below one.
fn ttl_seconds(ttl: Duration) -> u64 {
    (ttl.as_secs_f64().ceil() as u64).max(1)
}

/// Builds the Redis key for a short code.
fn build_key(key_prefix: &str, short_code: &str) -> String {
    format!("{}{}", key_prefix, short_code)
}

fn map_redis_error(operation: &str, err: redis::RedisError) -> StoreError {
    StoreError::Unavailable(format!("{operation}: {err}"))
}

#[async_trait]
impl MappingRepository for RedisMappingStore {
    async fn save(&self, short_code: &str, original_url: &str, user_id: &str) -> StoreResult<()> {
        let key = build_key(&self.key_prefix, short_code);
        let ttl_seconds = ttl_seconds(self.ttl);
        let mut conn = self.conn.clone();

        match self
            .timed(
                "SET",
                conn.set_ex::<_, _, ()>(&key, original_url, ttl_seconds),
            )
            .await
        {
            Ok(()) => {
                debug!(
                    code = %short_code,
                    user_id = %user_id,
                    ttl_seconds,
                    "Stored mapping"
                );
                Ok(())
            }
            Err(e) => {
                warn!(code = %short_code, error = %e, "Redis SET failed");
                Err(e)
            }
        }
    }

    async fn retrieve(&self, short_code: &str) -> StoreResult<String> {
        let key = build_key(&self.key_prefix, short_code);
        let mut conn = self.conn.clone();

        match self
            .timed("GET", conn.get::<_, Option<String>>(&key))
            .await
        {
            Ok(Some(url)) => {
                debug!(code = %short_code, "Mapping HIT");
                Ok(url)
            }
            Ok(None) => {
                debug!(code = %short_code, "Mapping MISS");
                Err(StoreError::NotFound)
            }
            Err(e) => {
                warn!(code = %short_code, error = %e, "Redis GET failed");
                Err(e)
            }
        }
    }

    async fn exists(&self, short_code: &str) -> bool {
        self.retrieve(short_code).await.is_ok()
    }

    async fn health_check(&self) -> bool {
        let mut conn = self.conn.clone();
        self.timed("PING", conn.ping::<()>()).await.is_ok()
    }
}
