//! In-memory store with an explicit clock, for testing compile policy

use crate::error::{CoffeeError, Result};
use crate::store::AssetStore;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

#[derive(Debug, Clone)]
struct MemoryFile {
    contents: String,
    modified: SystemTime,
}

#[derive(Debug)]
struct State {
    files: BTreeMap<PathBuf, MemoryFile>,
    clock: SystemTime,
}

/// Store whose files live in a map; every write stamps the current clock,
/// and the clock only moves when the test advances it
#[derive(Debug)]
pub struct MemoryStore {
    state: Mutex<State>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(State {
                files: BTreeMap::new(),
                clock: UNIX_EPOCH + Duration::from_secs(1_700_000_000),
            }),
        }
    }

    /// Move the clock forward
    pub fn advance(&self, by: Duration) {
        let mut state = self.state.lock().unwrap();
        state.clock += by;
    }

    /// Create or replace a file, stamped with the current clock
    pub fn put(&self, path: impl AsRef<Path>, contents: &str) {
        self.write(path.as_ref(), contents).unwrap();
    }

    /// Update a file's modification time to the current clock
    pub fn touch(&self, path: impl AsRef<Path>) {
        let mut state = self.state.lock().unwrap();
        let clock = state.clock;
        if let Some(file) = state.files.get_mut(path.as_ref()) {
            file.modified = clock;
        }
    }

    pub fn contents(&self, path: impl AsRef<Path>) -> Option<String> {
        let state = self.state.lock().unwrap();
        state.files.get(path.as_ref()).map(|f| f.contents.clone())
    }

    pub fn exists(&self, path: impl AsRef<Path>) -> bool {
        self.contents(path).is_some()
    }
}

impl AssetStore for MemoryStore {
    fn modified(&self, path: &Path) -> Result<Option<SystemTime>> {
        let state = self.state.lock().unwrap();
        Ok(state.files.get(path).map(|f| f.modified))
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        self.contents(path).ok_or_else(|| CoffeeError::SourceNotFound {
            path: path.display().to_string(),
            reason: "no such file".to_string(),
        })
    }

    fn write(&self, path: &Path, contents: &str) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        let modified = state.clock;
        state.files.insert(
            path.to_path_buf(),
            MemoryFile {
                contents: contents.to_string(),
                modified,
            },
        );
        Ok(())
    }

    fn remove(&self, path: &Path) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state
            .files
            .remove(path)
            .map(|_| ())
            .ok_or_else(|| std::io::Error::from(std::io::ErrorKind::NotFound).into())
    }

    fn list_dir(&self, dir: &Path) -> Result<Vec<String>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .files
            .keys()
            .filter(|p| p.parent() == Some(dir))
            .filter_map(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .collect())
    }
}
