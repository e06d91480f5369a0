//! In-memory response cache with background reclamation
//!
//! Provides a `Cache` that maps request URLs to raw response bodies. Entries
//! are never evicted on read; a reaper task sweeps the map once per interval
//! and drops everything older than that interval.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;
use tokio::time::{Instant, Interval};
use tokio_util::sync::{CancellationToken, DropGuard};
use tracing::debug;

/// A single cached response body
#[derive(Debug, Clone)]
struct CacheEntry {
    /// Raw, undecoded response body
    value: Vec<u8>,
    /// When the entry was stored
    created_at: Instant,
}

type Entries = Arc<RwLock<HashMap<String, CacheEntry>>>;

/// Thread-safe key to bytes store whose entries expire after a fixed interval
///
/// The reclamation interval is both the staleness threshold and the period of
/// the background sweep. The reaper task is stopped when the cache is dropped
/// or when [`Cache::shutdown`] is called.
#[derive(Debug)]
pub struct Cache {
    entries: Entries,
    interval: Duration,
    shutdown: CancellationToken,
    _reaper_guard: DropGuard,
}

impl Cache {
    /// Creates an empty cache and spawns its reaper on the current Tokio runtime
    ///
    /// # Panics
    /// Panics if `interval` is zero or if called outside a Tokio runtime.
    pub fn new(interval: Duration) -> Self {
        assert!(!interval.is_zero(), "cache interval must be non-zero");

        let entries: Entries = Arc::new(RwLock::new(HashMap::new()));
        let shutdown = CancellationToken::new();

        let ticker = tokio::time::interval(interval);
        tokio::spawn(reap_loop(entries.clone(), ticker, shutdown.clone()));

        Self {
            entries,
            interval,
            _reaper_guard: shutdown.clone().drop_guard(),
            shutdown,
        }
    }

    /// Inserts or replaces the entry for `key`, stamping it with the current time
    pub fn store(&self, key: impl Into<String>, value: impl Into<Vec<u8>>) {
        let entry = CacheEntry {
            value: value.into(),
            created_at: Instant::now(),
        };
        self.entries.write().insert(key.into(), entry);
    }

    /// Returns a copy of the bytes stored under `key`, regardless of their age
    pub fn lookup(&self, key: &str) -> Option<Vec<u8>> {
        self.entries.read().get(key).map(|entry| entry.value.clone())
    }

    /// Number of entries currently held
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// The reclamation interval this cache was built with
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Stops the reaper task. Entries already stored stay readable.
    pub fn shutdown(&self) {
        self.shutdown.cancel();
    }

    /// Whether the reaper has been asked to stop
    pub fn is_shut_down(&self) -> bool {
        self.shutdown.is_cancelled()
    }
}

/// Sweeps `entries` once per tick of `ticker` until `shutdown` fires
async fn reap_loop(entries: Entries, mut ticker: Interval, shutdown: CancellationToken) {
    let interval = ticker.period();
    // The first tick completes immediately
    ticker.tick().await;

    loop {
        tokio::select! {
            _ = shutdown.cancelled() => {
                debug!("cache reaper stopped");
                break;
            }
            now = ticker.tick() => {
                let removed = reap_expired(&mut entries.write(), interval, now);
                if removed > 0 {
                    debug!(removed, "cache reaper removed expired entries");
                }
            }
        }
    }
}

/// Removes every entry older than `interval` as of `now`, returning how many went
///
/// An entry whose age equals `interval` exactly is kept.
fn reap_expired(entries: &mut HashMap<String, CacheEntry>, interval: Duration, now: Instant) -> usize {
    let before = entries.len();
    entries.retain(|_, entry| now.saturating_duration_since(entry.created_at) <= interval);
    before - entries.len()
}
