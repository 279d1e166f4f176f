//! Command-line interface definitions.
//!
//! This module defines the CLI of the `ttl-cache` binary using clap. The
//! binary only ever talks to a cache through the [`Cache`](crate::Cache)
//! contract.

use clap::{Args, Parser, Subcommand};
use std::time::Duration;

use crate::config::CacheConfigBuilder;

/// Exercise an in-memory TTL cache from the command line.
///
/// Configuration is read from `CACHE_*` environment variables first and then
/// overridden by any flags given here.
#[derive(Parser, Debug)]
#[command(name = "ttl-cache")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub overrides: ConfigOverrides,

    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Flags that override the environment-derived configuration.
#[derive(Args, Debug, Default, Clone)]
pub struct ConfigOverrides {
    /// Default TTL in milliseconds.
    #[arg(long, global = true)]
    pub default_ttl_ms: Option<u64>,

    /// Maximum key size in bytes.
    #[arg(long, global = true)]
    pub max_key_size: Option<usize>,

    /// Maximum value size in bytes.
    #[arg(long, global = true)]
    pub max_value_size: Option<usize>,
}

impl ConfigOverrides {
    /// Apply the flags that were given on top of `builder`.
    pub fn apply(&self, mut builder: CacheConfigBuilder) -> CacheConfigBuilder {
        if let Some(ms) = self.default_ttl_ms {
            builder = builder.default_ttl(Duration::from_millis(ms));
        }
        if let Some(size) = self.max_key_size {
            builder = builder.max_key_size(size);
        }
        if let Some(size) = self.max_value_size {
            builder = builder.max_value_size(size);
        }
        builder
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the end-to-end scenarios and report what happened.
    Scenarios,

    /// Hammer one cache from several threads on disjoint keys.
    ///
    /// Prints the number of live entries once every thread is done.
    Workload {
        /// Number of writer threads.
        #[arg(long, default_value_t = 4)]
        threads: usize,

        /// Keys written by each thread.
        #[arg(long, default_value_t = 1000)]
        keys: usize,

        /// TTL of every written entry in milliseconds.
        #[arg(long, default_value_t = 60_000)]
        ttl_ms: u64,
    },
}
