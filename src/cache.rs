//! The cache contract.
//!
//! [`Cache`] is the operation set every backend provides. Callers hold a
//! backend through this trait (often as `Arc<dyn Cache<K, V>>`) and never
//! reach into its storage or configuration.
//!
//! Every operation is synchronous. Every operation except
//! [`is_healthy`](Cache::is_healthy) fails with
//! [`ErrorKind::OperationFailed`](crate::ErrorKind::OperationFailed) once the
//! cache has been closed.

use std::collections::HashMap;
use std::time::Duration;

use crate::error::CacheResult;

/// A key-value cache with per-entry time-to-live.
///
/// # Example
/// ```
/// use ttl_cache::{Cache, MemoryCache};
/// use std::sync::Arc;
///
/// let cache: Arc<dyn Cache<String, String>> = Arc::new(MemoryCache::<String, String>::with_defaults());
///
/// cache.set("user:123".to_string(), "Alice".to_string())?;
/// assert_eq!(cache.get(&"user:123".to_string())?, Some("Alice".to_string()));
/// # Ok::<(), ttl_cache::CacheError>(())
/// ```
pub trait Cache<K, V>: Send + Sync {
    /// Get the value stored under `key`.
    ///
    /// Returns `None` if the key is absent or its entry has expired. An
    /// expired entry is removed as a side effect.
    fn get(&self, key: &K) -> CacheResult<Option<V>>;

    /// Store `value` under `key` with the configured default TTL, replacing
    /// any existing entry.
    fn set(&self, key: K, value: V) -> CacheResult<()>;

    /// Store `value` under `key`, expiring after `ttl`.
    ///
    /// A zero `ttl` stores an entry that is already expired.
    fn set_with_ttl(&self, key: K, value: V, ttl: Duration) -> CacheResult<()>;

    /// Remove the entry under `key`. Returns `true` if something was removed.
    fn delete(&self, key: &K) -> CacheResult<bool>;

    /// Whether a non-expired entry is stored under `key`.
    fn exists(&self, key: &K) -> CacheResult<bool>;

    /// Look up several keys at once.
    ///
    /// The result holds only the keys that were present and unexpired when
    /// each was looked up. Keys are processed independently.
    fn get_multiple(&self, keys: &[K]) -> CacheResult<HashMap<K, V>>;

    /// Store several entries with the configured default TTL.
    ///
    /// Entries that fail validation are skipped and logged; the rest are
    /// still written.
    fn set_multiple(&self, entries: HashMap<K, V>) -> CacheResult<()>;

    /// Store several entries, each expiring after `ttl`.
    fn set_multiple_with_ttl(&self, entries: HashMap<K, V>, ttl: Duration) -> CacheResult<()>;

    /// Remove several keys. Returns how many entries were actually removed.
    fn delete_multiple(&self, keys: &[K]) -> CacheResult<usize>;

    /// Remove every entry.
    fn clear(&self) -> CacheResult<()>;

    /// Purge expired entries, then return the number remaining.
    fn size(&self) -> CacheResult<usize>;

    /// `true` until the cache is closed. Never fails.
    fn is_healthy(&self) -> bool;

    /// Close the cache and release its entries. Closing twice is harmless.
    fn close(&self) -> CacheResult<()>;
}
