//! Cache module for memoizing API responses in memory
//!
//! This module provides an expiring key to bytes cache. Values are opaque
//! response bodies keyed by the exact request URL; a background reaper drops
//! entries once they outlive the cache's reclamation interval. Nothing is
//! persisted across runs.

mod store;

pub use store::Cache;
