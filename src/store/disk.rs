//! Filesystem-backed store

use crate::error::{CoffeeError, Result};
use crate::store::AssetStore;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::time::SystemTime;

/// [`AssetStore`] over the real filesystem
#[derive(Debug, Default, Clone, Copy)]
pub struct DiskStore;

impl AssetStore for DiskStore {
    fn modified(&self, path: &Path) -> Result<Option<SystemTime>> {
        match fs::metadata(path) {
            Ok(meta) => Ok(Some(meta.modified()?)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        fs::read_to_string(path).map_err(|e| {
            let path = path.display().to_string();
            let reason = e.to_string();
            match e.kind() {
                ErrorKind::NotFound => CoffeeError::SourceNotFound { path, reason },
                _ => CoffeeError::SourceUnreadable { path, reason },
            }
        })
    }

    fn write(&self, path: &Path, contents: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, contents)?;
        Ok(())
    }

    fn remove(&self, path: &Path) -> Result<()> {
        fs::remove_file(path)?;
        Ok(())
    }

    fn list_dir(&self, dir: &Path) -> Result<Vec<String>> {
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry?;
            if entry.file_type()?.is_file() {
                names.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_has_no_mtime() {
        let temp = TempDir::new().unwrap();
        assert!(DiskStore.modified(&temp.path().join("nope")).unwrap().is_none());
    }

    #[test]
    fn test_write_creates_parents() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("a").join("b").join("out.js");

        DiskStore.write(&path, "var x;").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "var x;");
        assert!(DiskStore.modified(&path).unwrap().is_some());
    }

    #[test]
    fn test_list_dir_skips_directories() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("one.js"), "").unwrap();
        fs::create_dir(temp.path().join("sub")).unwrap();

        assert_eq!(DiskStore.list_dir(temp.path()).unwrap(), vec!["one.js"]);
        assert!(DiskStore
            .list_dir(&temp.path().join("absent"))
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_read_missing_source() {
        let temp = TempDir::new().unwrap();
        let result = DiskStore.read_to_string(&temp.path().join("gone.coffee"));
        assert!(matches!(result, Err(CoffeeError::SourceNotFound { .. })));
    }

    #[test]
    fn test_read_non_utf8_source_is_not_missing() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("latin1.coffee");
        fs::write(&path, [b'x', b' ', b'=', b' ', 0xff, 0xfe]).unwrap();

        let result = DiskStore.read_to_string(&path);
        let Err(CoffeeError::SourceUnreadable { path: reported, .. }) = result else {
            panic!("expected unreadable source, got {:?}", result);
        };
        assert!(reported.ends_with("latin1.coffee"));
    }
}
