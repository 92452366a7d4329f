//! In-memory key-value store for testing and development.

use std::collections::HashMap;
use std::sync::{Mutex, RwLock};
use std::time::{Duration, Instant};

use async_trait::async_trait;

use super::{KvStore, StoreError, StoreResult};

struct Entry {
    value: String,
    expires_at: Instant,
}

/// How often `put` sweeps expired entries by default.
pub const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

/// In-memory store with per-entry expiry, for development and tests.
///
/// Data is lost on restart. Expired entries are hidden on read. They are
/// dropped by [`KvStore::purge_expired`] and by a sweep that `put` runs at
/// most once per sweep interval, so a long-running process stays bounded
/// by its live entries.
pub struct MemoryKvStore {
    entries: RwLock<HashMap<String, Entry>>,
    sweep_interval: Duration,
    last_sweep: Mutex<Instant>,
}

impl Default for MemoryKvStore {
    fn default() -> Self {
        Self::with_sweep_interval(DEFAULT_SWEEP_INTERVAL)
    }
}

impl MemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose writes sweep expired entries once `interval` has passed
    /// since the last sweep.
    pub fn with_sweep_interval(interval: Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            sweep_interval: interval,
            last_sweep: Mutex::new(Instant::now()),
        }
    }

    /// Number of stored entries, including expired ones not yet purged.
    pub fn len(&self) -> usize {
        self.entries.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl KvStore for MemoryKvStore {
    async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let now = Instant::now();
        Ok(self
            .entries
            .read()
            .unwrap()
            .get(key)
            .filter(|e| e.expires_at > now)
            .map(|e| e.value.clone()))
    }

    async fn put(&self, key: &str, value: &str, ttl: Duration) -> StoreResult<()> {
        let expires_at = Instant::now()
            .checked_add(ttl)
            .ok_or(StoreError::InvalidTtl(ttl))?;

        let mut entries = self.entries.write().unwrap();
        entries.insert(
            key.to_string(),
            Entry {
                value: value.to_string(),
                expires_at,
            },
        );

        let now = Instant::now();
        let mut last_sweep = self.last_sweep.lock().unwrap();
        if now.duration_since(*last_sweep) >= self.sweep_interval {
            let before = entries.len();
            entries.retain(|_, e| e.expires_at > now);
            *last_sweep = now;
            tracing::debug!(removed = before - entries.len(), "Swept expired entries");
        }
        Ok(())
    }

    async fn delete(&self, key: &str) -> StoreResult<()> {
        self.entries.write().unwrap().remove(key);
        Ok(())
    }

    async fn purge_expired(&self) -> StoreResult<u64> {
        let now = Instant::now();
        let mut entries = self.entries.write().unwrap();
        let before = entries.len();
        entries.retain(|_, e| e.expires_at > now);
        Ok((before - entries.len()) as u64)
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
