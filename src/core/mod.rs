//! Cache-key derivation and output path layout

pub mod hash;
pub mod paths;

pub use hash::{cache_key, hashed_mtime, hexdigest};
pub use paths::{is_hashed_sibling, Layout};
