//! Configuration for a cache instance.
//!
//! A [`CacheConfig`] is produced once by [`CacheConfigBuilder::build`] and is
//! read-only afterwards. Several tunables are reserved for networked backends
//! and are carried but not honored by [`MemoryCache`](crate::MemoryCache):
//! `max_retries`, `connection_timeout`, `operation_timeout`,
//! `enable_metrics` and `enable_compression`.
//!
//! ```
//! use ttl_cache::CacheConfig;
//! use std::time::Duration;
//!
//! let config = CacheConfig::builder()
//!     .default_ttl(Duration::from_secs(300))
//!     .max_key_size(256)
//!     .build();
//!
//! assert_eq!(config.default_ttl(), Duration::from_secs(300));
//! assert_eq!(config.max_key_size(), 256);
//! ```

use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Default time-to-live applied by `set` without an explicit TTL.
pub const DEFAULT_TTL: Duration = Duration::from_secs(30 * 60);
pub const DEFAULT_MAX_RETRIES: u32 = 3;
pub const DEFAULT_CONNECTION_TIMEOUT: Duration = Duration::from_secs(5);
pub const DEFAULT_OPERATION_TIMEOUT: Duration = Duration::from_secs(10);
/// Maximum key size in bytes of its textual representation.
pub const DEFAULT_MAX_KEY_SIZE: usize = 1024;
/// Maximum value size in bytes of its textual representation.
pub const DEFAULT_MAX_VALUE_SIZE: usize = 1024 * 1024; // 1 MiB

/// Immutable configuration shared by every operation on a cache instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    default_ttl: Duration,
    max_retries: u32,
    connection_timeout: Duration,
    operation_timeout: Duration,
    enable_metrics: bool,
    enable_compression: bool,
    max_key_size: usize,
    max_value_size: usize,
}

impl CacheConfig {
    /// Start a builder populated with the default values.
    pub fn builder() -> CacheConfigBuilder {
        CacheConfigBuilder::new()
    }

    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    pub fn connection_timeout(&self) -> Duration {
        self.connection_timeout
    }

    pub fn operation_timeout(&self) -> Duration {
        self.operation_timeout
    }

    pub fn enable_metrics(&self) -> bool {
        self.enable_metrics
    }

    pub fn enable_compression(&self) -> bool {
        self.enable_compression
    }

    pub fn max_key_size(&self) -> usize {
        self.max_key_size
    }

    pub fn max_value_size(&self) -> usize {
        self.max_value_size
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        CacheConfigBuilder::new().build()
    }
}

/// Builder for [`CacheConfig`].
///
/// Values are accepted as given; no cross-field validation is performed, so a
/// zero TTL or a zero size limit is taken literally.
#[derive(Debug, Clone)]
pub struct CacheConfigBuilder {
    default_ttl: Duration,
    max_retries: u32,
    connection_timeout: Duration,
    operation_timeout: Duration,
    enable_metrics: bool,
    enable_compression: bool,
    max_key_size: usize,
    max_value_size: usize,
}

impl Default for CacheConfigBuilder {
    fn default() -> Self {
        Self {
            default_ttl: DEFAULT_TTL,
            max_retries: DEFAULT_MAX_RETRIES,
            connection_timeout: DEFAULT_CONNECTION_TIMEOUT,
            operation_timeout: DEFAULT_OPERATION_TIMEOUT,
            enable_metrics: true,
            enable_compression: false,
            max_key_size: DEFAULT_MAX_KEY_SIZE,
            max_value_size: DEFAULT_MAX_VALUE_SIZE,
        }
    }
}

impl CacheConfigBuilder {
    /// Create a new builder with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder seeded from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_DEFAULT_TTL_MS` - Default TTL in milliseconds (default: 1800000)
    /// - `CACHE_MAX_RETRIES` - Retry budget for networked backends (default: 3)
    /// - `CACHE_CONNECTION_TIMEOUT_MS` - Connection timeout (default: 5000)
    /// - `CACHE_OPERATION_TIMEOUT_MS` - Operation timeout (default: 10000)
    /// - `CACHE_ENABLE_METRICS` - `true`/`false` (default: true)
    /// - `CACHE_ENABLE_COMPRESSION` - `true`/`false` (default: false)
    /// - `CACHE_MAX_KEY_SIZE` - Maximum key size in bytes (default: 1024)
    /// - `CACHE_MAX_VALUE_SIZE` - Maximum value size in bytes (default: 1048576)
    ///
    /// Missing or unparsable variables fall back to the defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            default_ttl: env_millis("CACHE_DEFAULT_TTL_MS").unwrap_or(defaults.default_ttl),
            max_retries: env_parse("CACHE_MAX_RETRIES").unwrap_or(defaults.max_retries),
            connection_timeout: env_millis("CACHE_CONNECTION_TIMEOUT_MS")
                .unwrap_or(defaults.connection_timeout),
            operation_timeout: env_millis("CACHE_OPERATION_TIMEOUT_MS")
                .unwrap_or(defaults.operation_timeout),
            enable_metrics: env_parse("CACHE_ENABLE_METRICS").unwrap_or(defaults.enable_metrics),
            enable_compression: env_parse("CACHE_ENABLE_COMPRESSION")
                .unwrap_or(defaults.enable_compression),
            max_key_size: env_parse("CACHE_MAX_KEY_SIZE").unwrap_or(defaults.max_key_size),
            max_value_size: env_parse("CACHE_MAX_VALUE_SIZE").unwrap_or(defaults.max_value_size),
        }
    }

    /// Set the TTL used when an entry is written without an explicit one.
    ///
    /// `Duration::ZERO` makes such entries expire immediately.
    pub fn default_ttl(mut self, ttl: Duration) -> Self {
        self.default_ttl = ttl;
        self
    }

    /// Reserved for networked backends.
    pub fn max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    /// Reserved for networked backends.
    pub fn connection_timeout(mut self, timeout: Duration) -> Self {
        self.connection_timeout = timeout;
        self
    }

    /// Reserved for networked backends.
    pub fn operation_timeout(mut self, timeout: Duration) -> Self {
        self.operation_timeout = timeout;
        self
    }

    /// Reserved; no metrics are emitted by the in-memory backend.
    pub fn enable_metrics(mut self, enabled: bool) -> Self {
        self.enable_metrics = enabled;
        self
    }

    /// Reserved; values are stored as-is.
    pub fn enable_compression(mut self, enabled: bool) -> Self {
        self.enable_compression = enabled;
        self
    }

    /// Set the largest accepted key, measured by
    /// [`ApproxSize`](crate::ApproxSize).
    pub fn max_key_size(mut self, size: usize) -> Self {
        self.max_key_size = size;
        self
    }

    /// Set the largest accepted value, measured by
    /// [`ApproxSize`](crate::ApproxSize).
    pub fn max_value_size(mut self, size: usize) -> Self {
        self.max_value_size = size;
        self
    }

    /// Freeze the values into an immutable [`CacheConfig`].
    pub fn build(self) -> CacheConfig {
        CacheConfig {
            default_ttl: self.default_ttl,
            max_retries: self.max_retries,
            connection_timeout: self.connection_timeout,
            operation_timeout: self.operation_timeout,
            enable_metrics: self.enable_metrics,
            enable_compression: self.enable_compression,
            max_key_size: self.max_key_size,
            max_value_size: self.max_value_size,
        }
    }
}

fn env_parse<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

fn env_millis(name: &str) -> Option<Duration> {
    env_parse::<u64>(name).map(Duration::from_millis)
}
