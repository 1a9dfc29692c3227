//! On-disk cache storage

use crate::cache::KeyValueCache;
use crate::core::hexdigest;
use crate::error::{CoffeeError, Result};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tracing::debug;

/// Current cache format version
const CACHE_VERSION: u32 = 1;

/// Cache entry for a single key
#[derive(Debug, Serialize, Deserialize)]
struct CacheEntry {
    /// Cache format version
    version: u32,
    /// Full key, checked on read to rule out file-name collisions
    key: String,
    /// Expiry as seconds since the Unix epoch
    expires_at: u64,
    /// Cached value
    value: String,
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// File cache manager
pub struct FileCache {
    /// Directory where cache files are stored
    cache_dir: PathBuf,
}

impl FileCache {
    /// Create a new FileCache
    ///
    /// # Returns
    /// A FileCache instance, or an error if the cache directory cannot be created
    pub fn new(cache_dir: &Path) -> Result<Self> {
        if !cache_dir.exists() {
            fs::create_dir_all(cache_dir).map_err(|e| {
                CoffeeError::CacheError(format!(
                    "Failed to create cache directory '{}': {}",
                    cache_dir.display(),
                    e
                ))
            })?;
        }

        Ok(Self {
            cache_dir: cache_dir.to_path_buf(),
        })
    }

    /// Get the cache file path for a key
    fn cache_path(&self, key: &str) -> PathBuf {
        // Keys can be long and contain arbitrary characters
        self.cache_dir.join(format!("{}.cache", hexdigest(key, None)))
    }

    fn load(&self, key: &str) -> Option<CacheEntry> {
        let file = File::open(self.cache_path(key)).ok()?;
        serde_json::from_reader(BufReader::new(file)).ok()
    }
}

impl KeyValueCache for FileCache {
    /// Returns None if the entry is missing, unreadable, or expired
    fn get(&self, key: &str) -> Option<String> {
        let entry = self.load(key)?;

        if entry.version != CACHE_VERSION || entry.key != key {
            return None;
        }

        if entry.expires_at <= now_secs() {
            debug!(key, "cache entry expired");
            return None;
        }

        Some(entry.value)
    }

    fn set(&self, key: &str, value: &str, timeout: Duration) -> Result<()> {
        let cache_path = self.cache_path(key);
        let entry = CacheEntry {
            version: CACHE_VERSION,
            key: key.to_string(),
            expires_at: now_secs().saturating_add(timeout.as_secs()),
            value: value.to_string(),
        };

        let file = File::create(&cache_path).map_err(|e| {
            CoffeeError::CacheError(format!(
                "Failed to create cache file '{}': {}",
                cache_path.display(),
                e
            ))
        })?;

        let writer = BufWriter::new(file);
        serde_json::to_writer(writer, &entry)
            .map_err(|e| CoffeeError::CacheError(format!("Failed to write cache entry: {}", e)))?;

        Ok(())
    }
}

/// Remove every cache entry in `cache_dir`, returning how many were removed
pub fn clear_cache(cache_dir: &Path) -> Result<usize> {
    let mut removed = 0;

    if cache_dir.exists() {
        for entry in fs::read_dir(cache_dir).map_err(|e| {
            CoffeeError::CacheError(format!(
                "Failed to read cache directory '{}': {}",
                cache_dir.display(),
                e
            ))
        })? {
            let entry = entry.map_err(|e| {
                CoffeeError::CacheError(format!("Failed to read cache entry: {}", e))
            })?;

            let path = entry.path();
            if path.extension().map_or(false, |ext| ext == "cache") {
                fs::remove_file(&path).map_err(|e| {
                    CoffeeError::CacheError(format!(
                        "Failed to remove cache file '{}': {}",
                        path.display(),
                        e
                    ))
                })?;
                removed += 1;
            }
        }
    }

    Ok(removed)
}
