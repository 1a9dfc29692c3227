//! Storage capability behind freshness checks
//!
//! Compile policy never touches the filesystem directly. It asks an
//! [`AssetStore`] for modification times and listings and commits outputs
//! through it, so the policy can be exercised against [`MemoryStore`].

mod disk;
#[cfg(test)]
mod memory;

pub use disk::DiskStore;
#[cfg(test)]
pub use memory::MemoryStore;

use crate::error::Result;
use std::path::Path;
use std::time::SystemTime;

/// File operations needed to check freshness and commit outputs
pub trait AssetStore: Send + Sync {
    /// Modification time of `path`, or None when it does not exist
    fn modified(&self, path: &Path) -> Result<Option<SystemTime>>;

    /// Whole contents of a source file
    fn read_to_string(&self, path: &Path) -> Result<String>;

    /// Write `contents` to `path`, creating parent directories as needed
    fn write(&self, path: &Path, contents: &str) -> Result<()>;

    /// Delete a file
    fn remove(&self, path: &Path) -> Result<()>;

    /// Names of the files directly inside `dir`; empty when `dir` is missing
    fn list_dir(&self, dir: &Path) -> Result<Vec<String>>;
}

impl<S: AssetStore + ?Sized> AssetStore for &S {
    fn modified(&self, path: &Path) -> Result<Option<SystemTime>> {
        (**self).modified(path)
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        (**self).read_to_string(path)
    }

    fn write(&self, path: &Path, contents: &str) -> Result<()> {
        (**self).write(path, contents)
    }

    fn remove(&self, path: &Path) -> Result<()> {
        (**self).remove(path)
    }

    fn list_dir(&self, dir: &Path) -> Result<Vec<String>> {
        (**self).list_dir(dir)
    }
}
