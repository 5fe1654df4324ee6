// SPDX-License-Identifier: GPL-3.0-or-later

//! Memoization of lookup results with a fixed daily expiry.

use crate::error::{MatcherError, MatcherResult};
use automatcher_config::{CacheBackend, CacheConfig};
use chrono::{DateTime, Local, NaiveTime, TimeZone, Utc};
use moka::sync::Cache;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, warn};

/// Key-value store behind the [`CachedQueryExecutor`].
///
/// Values are opaque JSON documents so that negative results (`NoMatch`, an
/// empty alias list) are stored like any other value and stay distinguishable
/// from a missing key.
pub trait CacheStore: Send + Sync {
    fn get(&self, key: &str) -> Option<Value>;
    fn put(&self, key: &str, value: Value, expires_at: DateTime<Utc>);
}

#[derive(Debug, Clone)]
struct StoredEntry {
    value: Value,
    expires_at: DateTime<Utc>,
}

/// In-process store backed by a bounded moka cache.
#[derive(Clone)]
pub struct MemoryStore {
    entries: Cache<String, StoredEntry>,
}

impl MemoryStore {
    pub fn new(max_capacity: u64) -> Self {
        Self {
            entries: Cache::new(max_capacity),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new(10_000)
    }
}

impl CacheStore for MemoryStore {
    fn get(&self, key: &str) -> Option<Value> {
        let entry = self.entries.get(key)?;
        if entry.expires_at <= Utc::now() {
            self.entries.invalidate(key);
            return None;
        }
        Some(entry.value)
    }

    fn put(&self, key: &str, value: Value, expires_at: DateTime<Utc>) {
        self.entries
            .insert(key.to_string(), StoredEntry { value, expires_at });
    }
}

/// Store that remembers nothing; every call computes.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopStore;

impl CacheStore for NoopStore {
    fn get(&self, _key: &str) -> Option<Value> {
        None
    }

    fn put(&self, _key: &str, _value: Value, _expires_at: DateTime<Utc>) {}
}

/// Next occurrence of the wall-clock time `at` strictly after `now`, in UTC.
pub fn next_daily_expiry<Tz: TimeZone>(now: &DateTime<Tz>, at: NaiveTime) -> DateTime<Utc> {
    let zone = now.timezone();
    let today = now.date_naive().and_time(at);

    if let Some(expiry) = zone.from_local_datetime(&today).earliest() {
        if expiry > *now {
            return expiry.with_timezone(&Utc);
        }
    }

    let tomorrow = today + chrono::Duration::days(1);
    zone.from_local_datetime(&tomorrow)
        .earliest()
        .map(|expiry| expiry.with_timezone(&Utc))
        .unwrap_or_else(|| now.with_timezone(&Utc) + chrono::Duration::days(1))
}

/// Runs a computation once per key and day, serving repeats from the store.
///
/// Concurrent callers with the same key may both compute; the last write wins.
/// Errors are returned to the caller and never stored.
#[derive(Clone)]
pub struct CachedQueryExecutor {
    store: Arc<dyn CacheStore>,
    daily_expiry: NaiveTime,
}

impl CachedQueryExecutor {
    pub fn new(store: Arc<dyn CacheStore>, daily_expiry: NaiveTime) -> Self {
        Self {
            store,
            daily_expiry,
        }
    }

    pub fn from_config(config: &CacheConfig) -> anyhow::Result<Self> {
        let store: Arc<dyn CacheStore> = match config.backend {
            CacheBackend::Memory => Arc::new(MemoryStore::new(config.max_capacity)),
            CacheBackend::None => Arc::new(NoopStore),
        };
        Ok(Self::new(store, config.daily_expiry_time()?))
    }

    pub fn store(&self) -> &Arc<dyn CacheStore> {
        &self.store
    }

    pub async fn cached_call<T, F, Fut>(&self, key: &str, compute: F) -> MatcherResult<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = MatcherResult<T>>,
    {
        if let Some(stored) = self.store.get(key) {
            match serde_json::from_value(stored) {
                Ok(value) => {
                    debug!(target: "cache", key, "cache hit");
                    return Ok(value);
                }
                Err(err) => {
                    warn!(target: "cache", key, error = %err, "discarding unreadable cache entry");
                }
            }
        }

        debug!(target: "cache", key, "cache miss");
        let value = compute().await?;

        let document = serde_json::to_value(&value).map_err(|source| MatcherError::CacheValue {
            key: key.to_string(),
            source,
        })?;
        let expires_at = next_daily_expiry(&Local::now(), self.daily_expiry);
        self.store.put(key, document, expires_at);

        Ok(value)
    }
}
