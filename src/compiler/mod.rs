//! External compiler invocation
//!
//! A compile attempt has three outcomes: compiled output, diagnostic output,
//! or an execution failure reported as an error. Callers that only need the
//! text served to templates use [`CompileOutput::into_text`].

mod process;

pub use process::ExternalCompiler;

use crate::error::Result;
use serde::{Deserialize, Serialize};

/// What the compiler printed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "text", rename_all = "lowercase")]
pub enum CompileOutput {
    /// Non-empty primary output
    Compiled(String),
    /// Primary output was empty; whatever was printed on the diagnostic stream
    Diagnostic(String),
}

impl CompileOutput {
    /// Choose between the two streams, preferring primary output
    pub fn from_streams(stdout: &[u8], stderr: &[u8]) -> Self {
        if !stdout.is_empty() {
            CompileOutput::Compiled(String::from_utf8_lossy(stdout).into_owned())
        } else {
            CompileOutput::Diagnostic(String::from_utf8_lossy(stderr).into_owned())
        }
    }

    pub fn is_compiled(&self) -> bool {
        matches!(self, CompileOutput::Compiled(_))
    }

    /// The rendered text, regardless of which stream produced it
    pub fn into_text(self) -> String {
        match self {
            CompileOutput::Compiled(text) | CompileOutput::Diagnostic(text) => text,
        }
    }
}

/// Something that turns CoffeeScript source into JavaScript
pub trait Compiler: Send + Sync {
    /// Compile `source` as a single unit
    fn compile(&self, source: &str) -> Result<CompileOutput>;
}

impl<C: Compiler + ?Sized> Compiler for &C {
    fn compile(&self, source: &str) -> Result<CompileOutput> {
        (**self).compile(source)
    }
}
