//! # TTL Cache
//!
//! A pluggable key-value cache contract for Rust, with a thread-safe,
//! lazily expiring in-memory backend.
//!
//! ## Features
//!
//! - **Pluggable**: callers program against the [`Cache`] trait, which is
//!   object safe and can be held as `Arc<dyn Cache<K, V>>`
//! - **Thread-safe**: share a [`MemoryCache`] across threads with `Clone`
//!   (uses `Arc` internally)
//! - **TTL support**: every entry expires; expired entries are removed when
//!   touched or when [`Cache::size`] sweeps
//! - **Categorized errors**: every failure carries an [`ErrorKind`]
//!
//! ## Quick Start
//!
//! ```rust
//! use ttl_cache::{Cache, CacheConfig, MemoryCache};
//! use std::collections::HashMap;
//! use std::time::Duration;
//!
//! let config = CacheConfig::builder()
//!     .default_ttl(Duration::from_secs(300))
//!     .max_value_size(64 * 1024)
//!     .build();
//!
//! let cache = MemoryCache::new(config);
//!
//! cache.set("user:123", "Alice".to_string())?;
//! if let Some(value) = cache.get(&"user:123")? {
//!     println!("Found: {}", value);
//! }
//!
//! // Set with custom TTL
//! cache.set_with_ttl("session:abc", "session_data".to_string(), Duration::from_secs(60))?;
//!
//! // Bulk operations
//! let mut batch = HashMap::new();
//! batch.insert("x", "1".to_string());
//! batch.insert("y", "2".to_string());
//! cache.set_multiple(batch)?;
//!
//! let found = cache.get_multiple(&["x", "y", "z"])?;
//! assert_eq!(found.len(), 2);
//! # Ok::<(), ttl_cache::CacheError>(())
//! ```
//!
//! ## Thread Safety
//!
//! Cloning a `MemoryCache` creates a new handle to the same underlying data:
//!
//! ```rust
//! use ttl_cache::{Cache, MemoryCache};
//! use std::thread;
//!
//! let cache: MemoryCache<String, String> = MemoryCache::default();
//!
//! let handles: Vec<_> = (0..4).map(|i| {
//!     let cache = cache.clone();
//!     thread::spawn(move || {
//!         cache.set(format!("key_{}", i), format!("value_{}", i)).unwrap();
//!     })
//! }).collect();
//!
//! for handle in handles {
//!     handle.join().unwrap();
//! }
//! assert_eq!(cache.size().unwrap(), 4);
//! ```

pub mod cache;
pub mod cli;
pub mod config;
pub mod error;
pub mod memory;
pub mod size;

pub use cache::Cache;
pub use config::{CacheConfig, CacheConfigBuilder};
pub use error::{CacheError, CacheResult, ErrorKind};
pub use memory::MemoryCache;
pub use size::ApproxSize;

// Internal modules - not part of public API
pub(crate) mod entry;
pub(crate) mod storage;
