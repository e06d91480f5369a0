//! Command-line interface parsing for the Pokedex CLI
//!
//! This module handles parsing of CLI arguments using clap. Every option can
//! also come from an environment variable; the result is validated into a
//! [`StartupConfig`] before the REPL starts.

use std::time::Duration;

use clap::Parser;
use thiserror::Error;

use crate::data::client::{ClientConfig, POKEAPI_BASE_URL};

/// Default cache reclamation interval in seconds
pub const DEFAULT_CACHE_INTERVAL_SECS: u64 = 30;

/// Default per-request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Error types for CLI argument validation
#[derive(Debug, Error)]
pub enum CliError {
    /// The base URL is not an http(s) URL
    #[error("Invalid base URL: '{0}'. Expected an http:// or https:// URL")]
    InvalidBaseUrl(String),

    /// A duration option was zero
    #[error("--{0} must be greater than zero")]
    ZeroDuration(&'static str),
}

/// Pokedex CLI - explore PokeAPI location areas and catch Pokemon
#[derive(Parser, Debug)]
#[command(name = "pokedex")]
#[command(about = "Interactive Pokedex backed by PokeAPI")]
#[command(version)]
pub struct Cli {
    /// Root URL of the PokeAPI v2 endpoints
    #[arg(long, env = "POKEDEX_BASE_URL", default_value = POKEAPI_BASE_URL)]
    pub base_url: String,

    /// Seconds a response stays cached; also how often expired entries are swept
    #[arg(long, env = "POKEDEX_CACHE_INTERVAL", default_value_t = DEFAULT_CACHE_INTERVAL_SECS)]
    pub cache_interval_secs: u64,

    /// Seconds before a single API request is abandoned
    #[arg(long, env = "POKEDEX_TIMEOUT", default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,

    /// Log cache hits, misses, and sweeps to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

/// Configuration derived from CLI arguments for application startup
#[derive(Debug, Clone)]
pub struct StartupConfig {
    /// Reclamation interval for the response cache
    pub cache_interval: Duration,
    /// Settings for the API client
    pub client: ClientConfig,
    /// Default `tracing` filter when `RUST_LOG` is unset
    pub log_filter: &'static str,
}

impl Default for StartupConfig {
    fn default() -> Self {
        Self {
            cache_interval: Duration::from_secs(DEFAULT_CACHE_INTERVAL_SECS),
            client: ClientConfig::default(),
            log_filter: "pokedex=warn",
        }
    }
}

impl StartupConfig {
    /// Creates a StartupConfig from parsed CLI arguments.
    ///
    /// # Returns
    /// * `Ok(StartupConfig)` with durations converted and the URL checked
    /// * `Err(CliError)` if a duration is zero or the URL is not http(s)
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        if cli.cache_interval_secs == 0 {
            return Err(CliError::ZeroDuration("cache-interval-secs"));
        }
        if cli.timeout_secs == 0 {
            return Err(CliError::ZeroDuration("timeout-secs"));
        }

        let base_url = cli.base_url.trim();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(CliError::InvalidBaseUrl(cli.base_url.clone()));
        }

        Ok(StartupConfig {
            cache_interval: Duration::from_secs(cli.cache_interval_secs),
            client: ClientConfig {
                base_url: base_url.to_string(),
                timeout: Duration::from_secs(cli.timeout_secs),
            },
            log_filter: if cli.verbose { "pokedex=debug" } else { "pokedex=warn" },
        })
    }
}
