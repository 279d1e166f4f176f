//! Integration tests for the cache library.

use std::collections::HashMap;
use std::sync::{Arc, Barrier};
use std::thread;
use std::time::Duration;

use bytes::Bytes;
use ttl_cache::{Cache, CacheConfig, ErrorKind, MemoryCache};

fn string_cache() -> MemoryCache<String, String> {
    MemoryCache::with_defaults()
}

fn s(value: &str) -> String {
    value.to_string()
}

#[test]
fn test_basic_workflow() {
    let cache = string_cache();

    // Initially empty
    assert_eq!(cache.size().unwrap(), 0);

    // Set a value and read it back
    cache.set(s("key1"), s("value1")).unwrap();
    assert_eq!(cache.size().unwrap(), 1);
    assert_eq!(cache.get(&s("key1")).unwrap(), Some(s("value1")));

    // Exists
    assert!(cache.exists(&s("key1")).unwrap());
    assert!(!cache.exists(&s("nonexistent")).unwrap());

    // Delete
    assert!(cache.delete(&s("key1")).unwrap());
    assert!(!cache.exists(&s("key1")).unwrap());
    assert!(!cache.delete(&s("key1")).unwrap()); // Already deleted

    // Clear
    cache.set(s("a"), s("1")).unwrap();
    cache.set(s("b"), s("2")).unwrap();
    cache.set(s("c"), s("3")).unwrap();
    assert_eq!(cache.size().unwrap(), 3);
    cache.clear().unwrap();
    assert_eq!(cache.size().unwrap(), 0);
}

#[test]
fn test_overwrite_replaces_value() {
    let cache = string_cache();

    cache.set(s("k"), s("first")).unwrap();
    cache.set(s("k"), s("second")).unwrap();

    assert_eq!(cache.get(&s("k")).unwrap(), Some(s("second")));
    assert_eq!(cache.size().unwrap(), 1);
}

#[test]
fn test_ttl_expiration() {
    let cache = string_cache();

    cache
        .set_with_ttl(s("a"), s("v"), Duration::from_millis(100))
        .unwrap();
    assert_eq!(cache.get(&s("a")).unwrap(), Some(s("v")));

    thread::sleep(Duration::from_millis(150));

    assert_eq!(cache.get(&s("a")).unwrap(), None);
    assert_eq!(cache.size().unwrap(), 0);
}

#[test]
fn test_expired_entry_not_counted_by_size() {
    let cache = string_cache();

    cache
        .set_with_ttl(s("short"), s("v"), Duration::from_millis(20))
        .unwrap();
    cache.set(s("long"), s("v")).unwrap();

    thread::sleep(Duration::from_millis(60));

    // No lookup touched "short"; size must still not count it.
    assert_eq!(cache.size().unwrap(), 1);
    assert!(!cache.exists(&s("short")).unwrap());
}

#[test]
fn test_zero_ttl_is_immediately_expired() {
    let cache = string_cache();

    cache.set_with_ttl(s("k"), s("v"), Duration::ZERO).unwrap();

    assert_eq!(cache.get(&s("k")).unwrap(), None);
    assert!(!cache.exists(&s("k")).unwrap());
}

#[test]
fn test_delete_absent_key() {
    let cache = string_cache();
    assert!(!cache.delete(&s("missing")).unwrap());
}

#[test]
fn test_oversized_key_and_value_are_rejected() {
    let config = CacheConfig::builder()
        .max_key_size(4)
        .max_value_size(4)
        .build();
    let cache: MemoryCache<String, String> = MemoryCache::new(config);

    let err = cache.set(s("too-long"), s("v")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidKey);

    let err = cache.set(s("k"), s("too-long")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidValue);

    assert_eq!(cache.size().unwrap(), 0);
}

#[test]
fn test_null_value_is_rejected() {
    let cache: MemoryCache<String, Option<String>> = MemoryCache::with_defaults();

    let err = cache.set(s("k"), None).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidValue);
    assert_eq!(cache.get(&s("k")).unwrap(), None);
}

#[test]
fn test_null_key_is_rejected() {
    let cache: MemoryCache<Option<String>, String> = MemoryCache::with_defaults();

    let err = cache.set(None, s("v")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidKey);
    assert_eq!(cache.size().unwrap(), 0);
}

#[test]
fn test_bulk_write_skips_null_entry() {
    let cache: MemoryCache<String, Option<String>> = MemoryCache::with_defaults();

    let mut entries = HashMap::new();
    entries.insert(s("validKey"), Some(s("v1")));
    entries.insert(s("invalidKeyCandidate"), None);

    cache.set_multiple(entries).unwrap();

    assert_eq!(cache.get(&s("validKey")).unwrap(), Some(Some(s("v1"))));
    assert!(!cache.exists(&s("invalidKeyCandidate")).unwrap());
    assert_eq!(cache.size().unwrap(), 1);
}

#[test]
fn test_bulk_write_then_bulk_read() {
    let cache = string_cache();

    let mut entries = HashMap::new();
    entries.insert(s("x"), s("1"));
    entries.insert(s("y"), s("2"));
    cache.set_multiple(entries).unwrap();

    let found = cache
        .get_multiple(&[s("x"), s("y"), s("z")])
        .unwrap();

    let mut expected = HashMap::new();
    expected.insert(s("x"), s("1"));
    expected.insert(s("y"), s("2"));
    assert_eq!(found, expected);
}

#[test]
fn test_bulk_operations_on_empty_input() {
    let cache = string_cache();

    assert!(cache.get_multiple(&[]).unwrap().is_empty());
    cache.set_multiple(HashMap::new()).unwrap();
    assert_eq!(cache.delete_multiple(&[]).unwrap(), 0);
}

#[test]
fn test_bulk_write_continues_past_invalid_entries() {
    let config = CacheConfig::builder().max_value_size(8).build();
    let cache: MemoryCache<String, String> = MemoryCache::new(config);

    let mut entries = HashMap::new();
    entries.insert(s("validKey"), s("v1"));
    entries.insert(s("invalidCandidate"), "x".repeat(64));

    cache.set_multiple(entries).unwrap();

    assert_eq!(cache.get(&s("validKey")).unwrap(), Some(s("v1")));
    assert!(!cache.exists(&s("invalidCandidate")).unwrap());
}

#[test]
fn test_bulk_write_with_ttl() {
    let cache = string_cache();

    let mut entries = HashMap::new();
    entries.insert(s("a"), s("1"));
    entries.insert(s("b"), s("2"));
    cache
        .set_multiple_with_ttl(entries, Duration::from_millis(20))
        .unwrap();
    assert_eq!(cache.size().unwrap(), 2);

    thread::sleep(Duration::from_millis(60));

    assert!(cache.get_multiple(&[s("a"), s("b")]).unwrap().is_empty());
    assert_eq!(cache.size().unwrap(), 0);
}

#[test]
fn test_bulk_read_omits_expired_keys() {
    let cache = string_cache();

    cache.set(s("live"), s("1")).unwrap();
    cache.set_with_ttl(s("dead"), s("2"), Duration::ZERO).unwrap();

    let found = cache.get_multiple(&[s("live"), s("dead")]).unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found.get("live"), Some(&s("1")));
}

#[test]
fn test_delete_multiple_counts_removed() {
    let cache = string_cache();

    cache.set(s("a"), s("1")).unwrap();
    cache.set(s("b"), s("2")).unwrap();

    let removed = cache
        .delete_multiple(&[s("a"), s("b"), s("missing"), s("a")])
        .unwrap();
    assert_eq!(removed, 2);
    assert_eq!(cache.size().unwrap(), 0);
}

#[test]
fn test_use_after_close() {
    let cache = string_cache();
    cache.set(s("a"), s("v")).unwrap();

    assert!(cache.is_healthy());
    cache.close().unwrap();
    assert!(!cache.is_healthy());

    let err = cache.get(&s("a")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::OperationFailed);
    assert!(err.to_string().contains("cache is closed"));

    // Closing again is harmless.
    cache.close().unwrap();
    assert!(!cache.is_healthy());
}

#[test]
fn test_trait_object_usage() {
    let cache: Arc<dyn Cache<String, String>> = Arc::new(string_cache());

    cache.set(s("k"), s("v")).unwrap();
    assert_eq!(cache.get(&s("k")).unwrap(), Some(s("v")));
    assert_eq!(cache.size().unwrap(), 1);
    cache.close().unwrap();
    assert!(!cache.is_healthy());
}

#[test]
fn test_concurrent_delete_has_one_winner() {
    let cache = Arc::new(string_cache());
    cache.set(s("k"), s("v")).unwrap();

    let barrier = Arc::new(Barrier::new(2));
    let handles: Vec<_> = (0..2)
        .map(|_| {
            let cache = Arc::clone(&cache);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                cache.delete(&s("k"))
            })
        })
        .collect();

    let outcomes: Vec<bool> = handles
        .into_iter()
        .map(|h| h.join().expect("Thread panicked").expect("delete failed"))
        .collect();

    assert_eq!(outcomes.iter().filter(|removed| **removed).count(), 1);
}

#[test]
fn test_concurrent_writes_on_disjoint_keys() {
    let cache = string_cache();

    // Spawn multiple writer threads
    let handles: Vec<_> = (0..8)
        .map(|t| {
            let cache = cache.clone();
            thread::spawn(move || {
                for i in 0..1000 {
                    let key = format!("thread_{}_key_{}", t, i);
                    cache.set(key.clone(), format!("value_{}", i)).unwrap();
                    // Overwrite once so the last writer is observable.
                    cache.set(key.clone(), format!("final_{}_{}", t, i)).unwrap();
                    assert_eq!(
                        cache.get(&key).unwrap(),
                        Some(format!("final_{}_{}", t, i))
                    );
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("Thread panicked");
    }

    // Should have 8000 keys (8 threads × 1000 keys each)
    assert_eq!(cache.size().unwrap(), 8000);
    for t in 0..8 {
        for i in 0..1000 {
            let key = format!("thread_{}_key_{}", t, i);
            assert_eq!(
                cache.get(&key).unwrap(),
                Some(format!("final_{}_{}", t, i))
            );
        }
    }
}

#[test]
fn test_concurrent_reads() {
    let cache = string_cache();

    // Pre-populate
    for i in 0..100 {
        cache.set(format!("key_{}", i), format!("value_{}", i)).unwrap();
    }

    // Spawn multiple reader threads
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let cache = cache.clone();
            thread::spawn(move || {
                for _ in 0..100 {
                    let keys: Vec<String> = (0..100).map(|i| format!("key_{}", i)).collect();
                    assert_eq!(cache.get_multiple(&keys).unwrap().len(), 100);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("Thread panicked");
    }

    assert_eq!(cache.size().unwrap(), 100);
}

#[test]
fn test_close_while_threads_are_writing() {
    let cache = string_cache();

    let handles: Vec<_> = (0..4)
        .map(|t| {
            let cache = cache.clone();
            thread::spawn(move || {
                for i in 0..10_000 {
                    if let Err(err) = cache.set(format!("{}_{}", t, i), s("v")) {
                        assert_eq!(err.kind(), ErrorKind::OperationFailed);
                        return;
                    }
                }
            })
        })
        .collect();

    cache.close().unwrap();

    for handle in handles {
        handle.join().expect("Thread panicked");
    }

    assert!(!cache.is_healthy());
    assert_eq!(cache.size().unwrap_err().kind(), ErrorKind::OperationFailed);
}

#[test]
fn test_binary_values() {
    let cache: MemoryCache<&str, Bytes> = MemoryCache::with_defaults();

    // Store binary data
    let binary_data: Vec<u8> = vec![0, 1, 2, 255, 254, 253];
    cache.set("binary", Bytes::from(binary_data.clone())).unwrap();

    let retrieved = cache.get(&"binary").unwrap();
    assert!(retrieved.is_some());
    assert_eq!(&retrieved.unwrap()[..], &binary_data[..]);
}

#[test]
fn test_numeric_keys_and_values() {
    let config = CacheConfig::builder().max_key_size(3).build();
    let cache: MemoryCache<u32, i64> = MemoryCache::new(config);

    cache.set(999, -5).unwrap();
    assert_eq!(cache.get(&999).unwrap(), Some(-5));

    // "1000" is four characters long.
    let err = cache.set(1000, 1).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidKey);
}
