//! In-process cache backend

use crate::cache::KeyValueCache;
use crate::error::Result;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Cache held in memory for the lifetime of the process
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<String, (String, Instant)>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries, expired ones included
    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or(0)
    }
}

impl KeyValueCache for MemoryCache {
    fn get(&self, key: &str) -> Option<String> {
        let mut entries = self.entries.lock().ok()?;
        match entries.get(key) {
            Some((value, expires)) if Instant::now() < *expires => Some(value.clone()),
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    fn set(&self, key: &str, value: &str, timeout: Duration) -> Result<()> {
        let expires = Instant::now() + timeout;
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(key.to_string(), (value.to_string(), expires));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_then_get() {
        let cache = MemoryCache::new();
        assert!(cache.get("k").is_none());

        cache.set("k", "v", Duration::from_secs(60)).unwrap();
        assert_eq!(cache.get("k").as_deref(), Some("v"));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_zero_timeout_expires_immediately() {
        let cache = MemoryCache::new();
        cache.set("k", "v", Duration::ZERO).unwrap();

        assert!(cache.get("k").is_none());
        assert_eq!(cache.len(), 0);
    }

    #[test]
    fn test_overwrite() {
        let cache = MemoryCache::new();
        cache.set("k", "old", Duration::from_secs(60)).unwrap();
        cache.set("k", "new", Duration::from_secs(60)).unwrap();
        assert_eq!(cache.get("k").as_deref(), Some("new"));
    }
}
