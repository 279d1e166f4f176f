//! The in-memory [`Cache`] backend.
//!
//! Entries live in a concurrent map owned by the cache instance and expire
//! lazily: an expired entry is removed when a lookup touches it, or when
//! [`size`](Cache::size) sweeps the whole map. There is no background task.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::cache::Cache;
use crate::config::CacheConfig;
use crate::error::{CacheError, CacheResult};
use crate::size::ApproxSize;
use crate::storage::Store;

/// A thread-safe, lazily expiring in-memory cache.
///
/// Cloning a `MemoryCache` creates a new handle to the same entries and the
/// same open/closed state.
///
/// # Example
/// ```
/// use ttl_cache::{Cache, CacheConfig, MemoryCache};
/// use std::time::Duration;
///
/// let config = CacheConfig::builder()
///     .default_ttl(Duration::from_secs(300))
///     .build();
/// let cache = MemoryCache::new(config);
///
/// cache.set("user:123", "Alice".to_string())?;
/// cache.set_with_ttl("session:abc", "data".to_string(), Duration::from_secs(60))?;
///
/// assert_eq!(cache.get(&"user:123")?, Some("Alice".to_string()));
/// assert_eq!(cache.size()?, 2);
///
/// cache.close()?;
/// assert!(!cache.is_healthy());
/// # Ok::<(), ttl_cache::CacheError>(())
/// ```
#[derive(Debug)]
pub struct MemoryCache<K, V>
where
    K: Eq + Hash,
{
    inner: Arc<Inner<K, V>>,
}

#[derive(Debug)]
struct Inner<K, V>
where
    K: Eq + Hash,
{
    store: Store<K, V>,
    config: CacheConfig,
    closed: AtomicBool,
}

impl<K, V> MemoryCache<K, V>
where
    K: Eq + Hash + Clone + ApproxSize + Send + Sync,
    V: Clone + ApproxSize + Send + Sync,
{
    /// Create a new, open cache with the given configuration.
    pub fn new(config: CacheConfig) -> Self {
        debug!(
            default_ttl_ms = config.default_ttl().as_millis() as u64,
            max_key_size = config.max_key_size(),
            max_value_size = config.max_value_size(),
            "creating in-memory cache"
        );

        Self {
            inner: Arc::new(Inner {
                store: Store::new(),
                config,
                closed: AtomicBool::new(false),
            }),
        }
    }

    /// Create a new cache with the default configuration.
    pub fn with_defaults() -> Self {
        Self::new(CacheConfig::default())
    }

    /// The configuration this cache was built with.
    pub fn config(&self) -> &CacheConfig {
        &self.inner.config
    }

    fn ensure_open(&self) -> CacheResult<()> {
        if self.inner.closed.load(Ordering::Acquire) {
            Err(CacheError::closed())
        } else {
            Ok(())
        }
    }

    fn validate_key(&self, key: &K) -> CacheResult<()> {
        if key.is_null() {
            return Err(CacheError::invalid_key("key must not be null"));
        }
        let size = key.approx_size();
        let max = self.inner.config.max_key_size();
        if size > max {
            return Err(CacheError::invalid_key(format!(
                "key size {} exceeds maximum of {} bytes",
                size, max
            )));
        }
        Ok(())
    }

    fn validate_value(&self, value: &V) -> CacheResult<()> {
        if value.is_null() {
            return Err(CacheError::invalid_value("value must not be null"));
        }
        let size = value.approx_size();
        let max = self.inner.config.max_value_size();
        if size > max {
            return Err(CacheError::invalid_value(format!(
                "value size {} exceeds maximum of {} bytes",
                size, max
            )));
        }
        Ok(())
    }

    fn validate_entry(&self, key: &K, value: &V) -> CacheResult<()> {
        self.validate_key(key)?;
        self.validate_value(value)
    }

    fn write_entries(&self, entries: HashMap<K, V>, ttl: Duration) -> CacheResult<()> {
        self.ensure_open()?;

        let total = entries.len();
        let mut skipped = 0;

        for (key, value) in entries {
            if let Err(err) = self.validate_entry(&key, &value) {
                skipped += 1;
                warn!(
                    key_size = key.approx_size(),
                    error = %err,
                    "skipping invalid entry in bulk write"
                );
                continue;
            }
            self.inner.store.insert(key, value, ttl);
        }

        debug!(
            written = total - skipped,
            skipped,
            ttl_ms = ttl.as_millis() as u64,
            "bulk write"
        );
        Ok(())
    }
}

impl<K, V> Cache<K, V> for MemoryCache<K, V>
where
    K: Eq + Hash + Clone + ApproxSize + Send + Sync,
    V: Clone + ApproxSize + Send + Sync,
{
    fn get(&self, key: &K) -> CacheResult<Option<V>> {
        self.ensure_open()?;
        self.validate_key(key)?;
        Ok(self.inner.store.get_live(key))
    }

    fn set(&self, key: K, value: V) -> CacheResult<()> {
        let ttl = self.inner.config.default_ttl();
        self.set_with_ttl(key, value, ttl)
    }

    fn set_with_ttl(&self, key: K, value: V, ttl: Duration) -> CacheResult<()> {
        self.ensure_open()?;
        self.validate_entry(&key, &value)?;

        let replaced = self.inner.store.insert(key, value, ttl);
        debug!(ttl_ms = ttl.as_millis() as u64, replaced, "set");
        Ok(())
    }

    fn delete(&self, key: &K) -> CacheResult<bool> {
        self.ensure_open()?;
        self.validate_key(key)?;

        let removed = self.inner.store.remove(key);
        debug!(removed, "delete");
        Ok(removed)
    }

    fn exists(&self, key: &K) -> CacheResult<bool> {
        self.ensure_open()?;
        self.validate_key(key)?;
        Ok(self.inner.store.contains_live(key))
    }

    fn get_multiple(&self, keys: &[K]) -> CacheResult<HashMap<K, V>> {
        self.ensure_open()?;

        let found: HashMap<K, V> = keys
            .iter()
            .filter_map(|key| {
                self.inner
                    .store
                    .get_live(key)
                    .map(|value| (key.clone(), value))
            })
            .collect();

        debug!(requested = keys.len(), found = found.len(), "bulk read");
        Ok(found)
    }

    fn set_multiple(&self, entries: HashMap<K, V>) -> CacheResult<()> {
        let ttl = self.inner.config.default_ttl();
        self.write_entries(entries, ttl)
    }

    fn set_multiple_with_ttl(&self, entries: HashMap<K, V>, ttl: Duration) -> CacheResult<()> {
        self.write_entries(entries, ttl)
    }

    fn delete_multiple(&self, keys: &[K]) -> CacheResult<usize> {
        self.ensure_open()?;

        let removed = keys
            .iter()
            .filter(|key| self.inner.store.remove(key))
            .count();

        debug!(requested = keys.len(), removed, "bulk delete");
        Ok(removed)
    }

    fn clear(&self) -> CacheResult<()> {
        self.ensure_open()?;
        self.inner.store.clear();
        debug!("cleared all entries");
        Ok(())
    }

    fn size(&self) -> CacheResult<usize> {
        self.ensure_open()?;

        let purged = self.inner.store.purge_expired();
        if purged > 0 {
            debug!(purged, "purged expired entries");
        }
        Ok(self.inner.store.len())
    }

    fn is_healthy(&self) -> bool {
        !self.inner.closed.load(Ordering::Acquire)
    }

    fn close(&self) -> CacheResult<()> {
        if self.inner.closed.swap(true, Ordering::AcqRel) {
            debug!("cache already closed");
            return Ok(());
        }

        let dropped = self.inner.store.len();
        self.inner.store.clear();
        info!(dropped, "cache closed");
        Ok(())
    }
}

impl<K, V> Clone for MemoryCache<K, V>
where
    K: Eq + Hash,
{
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<K, V> Default for MemoryCache<K, V>
where
    K: Eq + Hash + Clone + ApproxSize + Send + Sync,
    V: Clone + ApproxSize + Send + Sync,
{
    fn default() -> Self {
        Self::with_defaults()
    }
}
