//! Internal storage for the in-memory backend.
//!
//! A sharded concurrent map from key to [`CacheEntry`]. Single-key inserts and
//! removals are atomic at the map level, so no lock is taken around them.
//! Expiration is lazy: an expired entry stays in the map until a lookup
//! touches it or [`Store::purge_expired`] sweeps it.

use dashmap::DashMap;
use std::hash::Hash;
use std::time::{Duration, Instant};
use tracing::trace;

use crate::entry::CacheEntry;

/// Thread-safe map of live and not-yet-evicted entries.
///
/// This is the internal implementation; users go through
/// [`MemoryCache`](crate::MemoryCache).
#[derive(Debug)]
pub(crate) struct Store<K, V>
where
    K: Eq + Hash,
{
    entries: DashMap<K, CacheEntry<V>>,
}

impl<K, V> Store<K, V>
where
    K: Eq + Hash,
{
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    /// Fetch-if-live-else-evict.
    ///
    /// Applies `f` to the value when the entry exists and has not expired.
    /// An expired entry is removed and `None` is returned. The removal only
    /// happens if the entry is still expired at that point, so a value
    /// written concurrently in between survives.
    pub fn with_live<R>(&self, key: &K, f: impl FnOnce(&V) -> R) -> Option<R> {
        let now = Instant::now();
        {
            let guard = self.entries.get(key)?;
            let entry = guard.value();
            if !entry.is_expired_at(now) {
                return Some(f(entry.value()));
            }
            // The shard guard must be released before `remove_if` below.
        }

        if self
            .entries
            .remove_if(key, |_, entry| entry.is_expired_at(now))
            .is_some()
        {
            trace!("evicted expired entry on access");
        }
        None
    }

    /// Clone of the live value stored under `key`.
    pub fn get_live(&self, key: &K) -> Option<V>
    where
        V: Clone,
    {
        self.with_live(key, V::clone)
    }

    /// Whether a live entry is stored under `key`.
    pub fn contains_live(&self, key: &K) -> bool {
        self.with_live(key, |_| ()).is_some()
    }

    /// Store `value` under `key`, expiring `ttl` from now.
    ///
    /// Returns `true` if an entry (live or expired) was replaced.
    pub fn insert(&self, key: K, value: V, ttl: Duration) -> bool {
        self.entries
            .insert(key, CacheEntry::with_ttl(value, ttl))
            .is_some()
    }

    /// Remove the entry under `key`. Returns `true` if one was present.
    pub fn remove(&self, key: &K) -> bool {
        self.entries.remove(key).is_some()
    }

    /// Remove every entry.
    pub fn clear(&self) {
        self.entries.clear();
    }

    /// Remove all expired entries, returning how many were removed.
    pub fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let mut removed = 0;

        self.entries.retain(|_, entry| {
            let expired = entry.is_expired_at(now);
            if expired {
                removed += 1;
            }
            !expired
        });

        removed
    }

    /// Number of stored entries, including expired ones not yet evicted.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> Default for Store<K, V>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}
