//! Cache entry with its absolute expiry instant.

use std::time::{Duration, Instant};

/// A stored value together with the instant it stops being valid.
///
/// Entries never leave the store; callers only ever receive clones of the
/// value.
#[derive(Debug, Clone)]
pub(crate) struct CacheEntry<V> {
    /// The stored value.
    value: V,

    /// When this entry expires. `None` only when `now + ttl` is not
    /// representable, in which case the entry never expires.
    expires_at: Option<Instant>,
}

impl<V> CacheEntry<V> {
    /// Create an entry that expires `ttl` after `now`.
    ///
    /// A zero TTL produces an entry that is already expired.
    pub fn with_ttl_at(value: V, ttl: Duration, now: Instant) -> Self {
        Self {
            value,
            expires_at: now.checked_add(ttl),
        }
    }

    /// Create an entry that expires `ttl` from now.
    pub fn with_ttl(value: V, ttl: Duration) -> Self {
        Self::with_ttl_at(value, ttl, Instant::now())
    }

    /// Check if this entry has expired.
    #[cfg(test)]
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Instant::now())
    }

    /// Check if this entry has expired at a given time.
    pub fn is_expired_at(&self, now: Instant) -> bool {
        match self.expires_at {
            Some(expires) => now >= expires,
            None => false,
        }
    }

    pub fn value(&self) -> &V {
        &self.value
    }

    #[cfg(test)]
    pub fn expires_at(&self) -> Option<Instant> {
        self.expires_at
    }
}
