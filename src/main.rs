//! Command-line driver for the TTL cache.
//!
//! ```bash
//! cargo run -- scenarios
//! cargo run -- workload --threads 8 --keys 10000
//! RUST_LOG=ttl_cache=debug cargo run -- --default-ttl-ms 100 scenarios
//! ```

use std::collections::HashMap;
use std::process::ExitCode;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ttl_cache::cli::{Cli, Command};
use ttl_cache::{Cache, CacheConfig, CacheConfigBuilder, CacheError, CacheResult, MemoryCache};

type SharedCache = Arc<dyn Cache<String, String>>;

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ttl_cache=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = cli.overrides.apply(CacheConfigBuilder::from_env()).build();
    info!(
        default_ttl_ms = config.default_ttl().as_millis() as u64,
        max_key_size = config.max_key_size(),
        max_value_size = config.max_value_size(),
        "configuration loaded"
    );

    let result = match cli.command {
        Command::Scenarios => run_scenarios(&config),
        Command::Workload {
            threads,
            keys,
            ttl_ms,
        } => run_workload(&config, threads, keys, Duration::from_millis(ttl_ms)),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(kind = ?err.kind(), error = %err, "cache operation failed");
            ExitCode::FAILURE
        }
    }
}

fn new_cache(config: &CacheConfig) -> SharedCache {
    Arc::new(MemoryCache::<String, String>::new(config.clone()))
}

fn run_scenarios(config: &CacheConfig) -> CacheResult<()> {
    // Expiry after sleeping past the TTL.
    let cache = new_cache(config);
    cache.set_with_ttl("a".into(), "v".into(), Duration::from_millis(100))?;
    thread::sleep(Duration::from_millis(150));
    let value = cache.get(&"a".to_string())?;
    let size = cache.size()?;
    info!(?value, size, "expired entry after 150ms");

    // Bulk write then bulk read with a missing key.
    let mut batch = HashMap::new();
    batch.insert("x".to_string(), "1".to_string());
    batch.insert("y".to_string(), "2".to_string());
    cache.set_multiple(batch)?;
    let found = cache.get_multiple(&["x".to_string(), "y".to_string(), "z".to_string()])?;
    info!(?found, "bulk read of x, y, z");

    // Oversized key.
    let oversized = "k".repeat(config.max_key_size() + 1);
    report_rejection("oversized key", cache.set(oversized, "v".into()));

    // Racing deletes on one key.
    cache.set("k".into(), "v".into())?;
    let racers: Vec<_> = (0..2)
        .map(|_| {
            let cache = Arc::clone(&cache);
            thread::spawn(move || cache.delete(&"k".to_string()))
        })
        .collect();
    for racer in racers {
        match racer.join() {
            Ok(outcome) => {
                let removed = outcome?;
                info!(removed, "concurrent delete");
            }
            Err(_) => {
                return Err(CacheError::operation_failed("delete thread panicked"));
            }
        }
    }

    // Use after close.
    cache.close()?;
    info!(healthy = cache.is_healthy(), "cache closed");
    report_rejection("get after close", cache.get(&"a".to_string()).map(|_| ()));

    Ok(())
}

fn report_rejection(scenario: &str, outcome: CacheResult<()>) {
    match outcome {
        Ok(()) => info!(scenario, "accepted"),
        Err(err) => info!(scenario, kind = ?err.kind(), error = %err, "rejected"),
    }
}

fn run_workload(config: &CacheConfig, threads: usize, keys: usize, ttl: Duration) -> CacheResult<()> {
    let cache = new_cache(config);
    let started = Instant::now();

    let handles: Vec<_> = (0..threads)
        .map(|t| {
            let cache = Arc::clone(&cache);
            thread::spawn(move || -> CacheResult<usize> {
                let mut hits = 0;
                for i in 0..keys {
                    let key = format!("thread_{}_key_{}", t, i);
                    cache.set_with_ttl(key.clone(), format!("value_{}", i), ttl)?;
                    if cache.get(&key)?.is_some() {
                        hits += 1;
                    }
                }
                Ok(hits)
            })
        })
        .collect();

    let mut hits = 0;
    for handle in handles {
        hits += handle
            .join()
            .map_err(|_| CacheError::operation_failed("workload thread panicked"))??;
    }

    let size = cache.size()?;
    info!(
        threads,
        keys_per_thread = keys,
        hits,
        size,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "workload finished"
    );
    println!("{}", size);

    cache.close()
}
