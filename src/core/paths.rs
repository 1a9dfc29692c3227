//! Path layout for sources and compiled outputs under the static root

use crate::core::hash::MTIME_HASH_LEN;
use std::path::{Component, Path, PathBuf};

/// Extension of source files
pub const SOURCE_EXTENSION: &str = ".coffee";

/// Suffix of concatenated bundle outputs
const BUNDLE_SUFFIX: &str = "-cache.js";

/// Resolves source and output paths relative to a static-assets root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    static_root: PathBuf,
    output_dir: String,
}

impl Layout {
    pub fn new(static_root: PathBuf, output_dir: String) -> Self {
        Self {
            static_root,
            output_dir,
        }
    }

    /// Absolute location of a source given relative to the static root
    pub fn source_path(&self, rel: &str) -> PathBuf {
        self.static_root.join(rel)
    }

    /// Directory that receives the compiled output for `rel`, mirroring the
    /// directory part of `rel` below the output directory
    pub fn output_directory(&self, rel: &str) -> PathBuf {
        let mut dir = self.static_root.join(&self.output_dir);
        if let Some(parent) = Path::new(rel).parent() {
            dir.push(parent);
        }
        dir
    }

    /// File name of `rel` with the source extension removed, if present
    pub fn base_name(rel: &str) -> &str {
        let file_name = Path::new(rel)
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or(rel);
        file_name
            .strip_suffix(SOURCE_EXTENSION)
            .unwrap_or(file_name)
    }

    /// `<output_dir>/<dir>/<base>-<hash>.js` for a single source file
    pub fn single_output_path(&self, rel: &str, hash: &str) -> PathBuf {
        self.output_directory(rel)
            .join(format!("{}-{}.js", Self::base_name(rel), hash))
    }

    /// `<output_dir>/<dir>/<name>-cache.js` for a concatenated bundle
    pub fn bundle_output_path(&self, name: &str) -> PathBuf {
        let base = Path::new(name)
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or(name);
        self.output_directory(name)
            .join(format!("{}{}", base, BUNDLE_SUFFIX))
    }

    /// Absolute location of a bundle input; inputs are named without extension
    pub fn bundle_input_path(&self, input: &str) -> PathBuf {
        self.static_root.join(format!("{}{}", input, SOURCE_EXTENSION))
    }

    /// Path relative to the static root with forward slashes, as served to
    /// templates
    pub fn public_path(&self, path: &Path) -> String {
        match path.strip_prefix(&self.static_root) {
            Ok(rel) => rel
                .components()
                .filter_map(|c| match c {
                    Component::Normal(part) => Some(part.to_string_lossy()),
                    _ => None,
                })
                .collect::<Vec<_>>()
                .join("/"),
            Err(_) => path
                .to_string_lossy()
                .replace(std::path::MAIN_SEPARATOR, "/")
                .trim_start_matches('/')
                .to_string(),
        }
    }
}

/// True when `file_name` is a hashed output of `base`: `<base>-<12 hex>.js`
pub fn is_hashed_sibling(file_name: &str, base: &str) -> bool {
    file_name
        .strip_prefix(base)
        .and_then(|rest| rest.strip_prefix('-'))
        .and_then(|rest| rest.strip_suffix(".js"))
        .map_or(false, |hash| {
            hash.len() == MTIME_HASH_LEN && hash.bytes().all(|b| b.is_ascii_hexdigit())
        })
}
