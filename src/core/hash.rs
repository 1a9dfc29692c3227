//! Stable digests for cache keys and output file names
//!
//! Digests end up in file names and persistent cache keys, so they must not
//! change between builds. std's `DefaultHasher` gives no such guarantee; this
//! module uses the 64-bit FNV-1a function instead.

use std::time::{SystemTime, UNIX_EPOCH};

/// FNV-1a offset basis (64-bit)
const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;

/// FNV-1a prime (64-bit)
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// Length of the modification-time digest embedded in output file names
pub const MTIME_HASH_LEN: usize = 12;

/// Prefix for inline cache keys
const CACHE_KEY_PREFIX: &str = "coffeescript-";

/// Compute FNV-1a hash for a byte slice
#[inline]
pub fn fnv1a_64(data: &[u8]) -> u64 {
    let mut hash = FNV_OFFSET_BASIS;
    for &byte in data {
        hash ^= byte as u64;
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    hash
}

/// Lowercase hex digest of `text`, optionally truncated to `length` characters
pub fn hexdigest(text: &str, length: Option<usize>) -> String {
    let mut digest = format!("{:016x}", fnv1a_64(text.as_bytes()));
    if let Some(len) = length {
        digest.truncate(len);
    }
    digest
}

/// Digest of a modification time at the full precision the filesystem reports
///
/// Times before the Unix epoch hash as zero.
pub fn hashed_mtime(modified: SystemTime) -> String {
    let nanos = modified
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);
    hexdigest(&nanos.to_string(), Some(MTIME_HASH_LEN))
}

/// Inline cache key for a source digest
pub fn cache_key(digest: &str) -> String {
    format!("{}{}", CACHE_KEY_PREFIX, digest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_empty_hash() {
        assert_eq!(fnv1a_64(&[]), FNV_OFFSET_BASIS);
    }

    #[test]
    fn test_known_vector() {
        // Published FNV-1a 64 test vector
        assert_eq!(fnv1a_64(b"a"), 0xaf63_dc4c_8601_ec8c);
    }

    #[test]
    fn test_hexdigest_is_deterministic() {
        assert_eq!(hexdigest("x = 1", None), hexdigest("x = 1", None));
        assert_ne!(hexdigest("x = 1", None), hexdigest("x = 2", None));
        assert_eq!(hexdigest("x = 1", None).len(), 16);
    }

    #[test]
    fn test_hexdigest_truncates() {
        let full = hexdigest("alert 'hi'", None);
        let short = hexdigest("alert 'hi'", Some(6));
        assert_eq!(short.len(), 6);
        assert!(full.starts_with(&short));
    }

    #[test]
    fn test_hashed_mtime_distinguishes_subsecond_changes() {
        let base = UNIX_EPOCH + Duration::from_secs(1_700_000_000);
        let later = base + Duration::from_millis(400);
        let next_nano = base + Duration::from_nanos(1);

        assert_ne!(hashed_mtime(base), hashed_mtime(later));
        assert_ne!(hashed_mtime(base), hashed_mtime(next_nano));
        assert_eq!(hashed_mtime(base), hashed_mtime(base));
        assert_eq!(hashed_mtime(base).len(), MTIME_HASH_LEN);
    }

    #[test]
    fn test_cache_key_prefix() {
        assert_eq!(cache_key("abc"), "coffeescript-abc");
    }
}
