//! Key/value cache for inline compile results
//!
//! Entries are keyed by a digest of the source text and expire after a
//! timeout. Two backends exist: an on-disk store shared between runs, and an
//! in-memory one for embedding and tests.

mod memory;
mod storage;

pub use memory::MemoryCache;
pub use storage::{clear_cache, FileCache};

use crate::error::Result;
use std::time::Duration;

/// A generic key/value cache with per-entry expiry
pub trait KeyValueCache: Send + Sync {
    /// Look up a live entry
    fn get(&self, key: &str) -> Option<String>;

    /// Store `value` under `key` for `timeout`
    fn set(&self, key: &str, value: &str, timeout: Duration) -> Result<()>;
}
