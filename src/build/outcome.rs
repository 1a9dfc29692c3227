//! Result of a file-based compile

/// Outcome of compiling a file or bundle
///
/// Filesystem and process failures are reported as errors alongside this
/// type; `Failed` only means the compiler itself rejected the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Artifact {
    /// Output already up to date; nothing was compiled
    Fresh { path: String },
    /// Output was (re)compiled and written
    Compiled { path: String },
    /// Compiler produced only diagnostics; nothing was written
    Failed {
        /// Best path to serve instead: the uncompiled source for single
        /// files, the (possibly stale or absent) output for bundles
        fallback: String,
        diagnostic: String,
    },
}

impl Artifact {
    /// Public path to serve, relative to the static root
    pub fn path(&self) -> &str {
        match self {
            Artifact::Fresh { path } | Artifact::Compiled { path } => path,
            Artifact::Failed { fallback, .. } => fallback,
        }
    }

    pub fn diagnostic(&self) -> Option<&str> {
        match self {
            Artifact::Failed { diagnostic, .. } => Some(diagnostic),
            _ => None,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Artifact::Failed { .. })
    }

    /// Short status label used in reports
    pub fn status(&self) -> &'static str {
        match self {
            Artifact::Fresh { .. } => "fresh",
            Artifact::Compiled { .. } => "compiled",
            Artifact::Failed { .. } => "failed",
        }
    }
}
