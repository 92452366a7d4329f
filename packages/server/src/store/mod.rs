//! Key-value storage with time-based expiry.
//!
//! Available backends:
//! - `MemoryKvStore` - In-process map (development and tests)
//! - `PostgresKvStore` - `kv_entries` table (production)
//!
//! Values are opaque strings; callers serialize their own records.

pub mod memory;
pub mod postgres;

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

pub use memory::MemoryKvStore;
pub use postgres::PostgresKvStore;

/// Errors raised by a storage backend.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("TTL out of range: {0:?}")]
    InvalidTtl(Duration),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// String key to string value, with a TTL on every write.
#[async_trait]
pub trait KvStore: Send + Sync {
    /// Get a live value. Expired entries read as `None`.
    async fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Insert or overwrite `key`, expiring `ttl` from now.
    async fn put(&self, key: &str, value: &str, ttl: Duration) -> StoreResult<()>;

    /// Delete `key`. Deleting a missing key is not an error.
    async fn delete(&self, key: &str) -> StoreResult<()>;

    /// Remove expired entries, returning how many were removed.
    async fn purge_expired(&self) -> StoreResult<u64>;

    /// Cheap liveness check used by `/health`.
    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }

    /// Backend name (for logging/health).
    fn name(&self) -> &'static str;
}
