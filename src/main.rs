//! Pokedex CLI - explore PokeAPI from the terminal
//!
//! An interactive prompt that pages through location areas, lists the Pokemon
//! found in each, and keeps a Pokedex of the ones you catch. API responses are
//! memoized in memory for the configured cache interval.

use std::io;
use std::process;
use std::sync::Arc;

use clap::Parser;
use tokio::io::BufReader;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use pokedex::cache::Cache;
use pokedex::cli::{Cli, StartupConfig};
use pokedex::commands::Session;
use pokedex::data::PokeClient;
use pokedex::repl;

/// Logs go to stderr so they never interleave with REPL output
fn init_tracing(default_filter: &str) {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = match StartupConfig::from_cli(&cli) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("pokedex: {}", err);
            process::exit(2);
        }
    };

    init_tracing(config.log_filter);
    info!(
        base_url = %config.client.base_url,
        cache_interval = ?config.cache_interval,
        timeout = ?config.client.timeout,
        "starting pokedex"
    );

    let cache = Arc::new(Cache::new(config.cache_interval));
    let client = PokeClient::new(cache.clone(), &config.client)?;
    let mut session = Session::new(client);

    let stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = io::stdout();
    repl::run(&mut session, stdin, &mut stdout).await?;

    cache.shutdown();
    Ok(())
}
