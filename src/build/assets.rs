//! File-based compilation: single sources and concatenated bundles
//!
//! Single files are fresh when an output named after the source's hashed
//! modification time already exists. Bundles have a fixed output name and are
//! fresh when no input is newer than that output.

use crate::build::Artifact;
use crate::compiler::{CompileOutput, Compiler};
use crate::core::{hashed_mtime, is_hashed_sibling, Layout};
use crate::error::{CoffeeError, Result};
use crate::store::AssetStore;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

/// Compiles sources under a static root into hashed or bundled outputs
pub struct Builder<S, C> {
    layout: Layout,
    store: S,
    compiler: C,
}

impl<S: AssetStore, C: Compiler> Builder<S, C> {
    pub fn new(layout: Layout, store: S, compiler: C) -> Self {
        Self {
            layout,
            store,
            compiler,
        }
    }

    /// Modification time of a source that must exist
    fn source_mtime(&self, path: &Path) -> Result<std::time::SystemTime> {
        self.store
            .modified(path)?
            .ok_or_else(|| CoffeeError::SourceNotFound {
                path: path.display().to_string(),
                reason: "no such file".to_string(),
            })
    }

    /// Output path that `rel` compiles to at its current modification time;
    /// the source is fresh exactly when this path exists
    pub fn file_output_path(&self, rel: &str) -> Result<PathBuf> {
        let modified = self.source_mtime(&self.layout.source_path(rel))?;
        Ok(self.layout.single_output_path(rel, &hashed_mtime(modified)))
    }

    /// True when the bundle output exists and no input is strictly newer
    pub fn is_bundle_fresh(&self, name: &str, inputs: &[String]) -> Result<bool> {
        let output = self.layout.bundle_output_path(name);
        let Some(output_mtime) = self.store.modified(&output)? else {
            return Ok(false);
        };

        for input in inputs {
            let input_mtime = self.source_mtime(&self.layout.bundle_input_path(input))?;
            if input_mtime > output_mtime {
                debug!(input = %input, bundle = %name, "input newer than bundle");
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Compile a single source given relative to the static root
    ///
    /// On success, older hashed outputs of the same source are deleted. On a
    /// diagnostic, nothing is written and the source path itself is the
    /// fallback.
    pub fn compile_file(&self, rel: &str) -> Result<Artifact> {
        let output_path = self.file_output_path(rel)?;
        let public = self.layout.public_path(&output_path);

        if self.store.modified(&output_path)?.is_some() {
            debug!(source = %rel, output = %public, "output is fresh");
            return Ok(Artifact::Fresh { path: public });
        }

        let source = self.store.read_to_string(&self.layout.source_path(rel))?;
        match self.compiler.compile(&source)? {
            CompileOutput::Compiled(js) => {
                self.store.write(&output_path, &js)?;
                self.remove_stale_outputs(rel, &output_path)?;
                info!(source = %rel, output = %public, "compiled");
                Ok(Artifact::Compiled { path: public })
            }
            CompileOutput::Diagnostic(diagnostic) => {
                error!(source = %rel, "{}", diagnostic.trim_end());
                Ok(Artifact::Failed {
                    fallback: rel.to_string(),
                    diagnostic,
                })
            }
        }
    }

    /// Delete hashed outputs of `rel` other than `current`
    fn remove_stale_outputs(&self, rel: &str, current: &Path) -> Result<()> {
        let Some(dir) = current.parent() else {
            return Ok(());
        };
        let current_name = current.file_name().and_then(|n| n.to_str()).unwrap_or("");
        let base = Layout::base_name(rel);

        for name in self.store.list_dir(dir)? {
            if name != current_name && is_hashed_sibling(&name, base) {
                debug!(file = %name, "removing stale output");
                self.store.remove(&dir.join(&name))?;
            }
        }
        Ok(())
    }

    /// Concatenate `inputs` (named without extension, in the given order) and
    /// compile them into the bundle `name`
    ///
    /// A previous bundle is left in place until a successful compile replaces
    /// it, so a diagnostic never destroys a working output. The fallback of a
    /// failed compile may therefore point at the previous successful bundle,
    /// which no longer matches the current inputs.
    pub fn compile_bundle(&self, name: &str, inputs: &[String]) -> Result<Artifact> {
        let output_path = self.layout.bundle_output_path(name);
        let public = self.layout.public_path(&output_path);

        if self.is_bundle_fresh(name, inputs)? {
            debug!(bundle = %name, output = %public, "bundle is fresh");
            return Ok(Artifact::Fresh { path: public });
        }

        let mut source = String::new();
        for input in inputs {
            source.push_str(&self.store.read_to_string(&self.layout.bundle_input_path(input))?);
            source.push('\n');
        }

        match self.compiler.compile(&source)? {
            CompileOutput::Compiled(js) => {
                self.store.write(&output_path, &js)?;
                info!(bundle = %name, inputs = inputs.len(), output = %public, "compiled bundle");
                Ok(Artifact::Compiled { path: public })
            }
            CompileOutput::Diagnostic(diagnostic) => {
                error!(bundle = %name, "{}", diagnostic.trim_end());
                Ok(Artifact::Failed {
                    fallback: public,
                    diagnostic,
                })
            }
        }
    }
}
