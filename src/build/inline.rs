//! Inline compilation of rendered template text

use crate::cache::KeyValueCache;
use crate::compiler::{CompileOutput, Compiler};
use crate::core::{cache_key, hexdigest};
use crate::error::Result;
use std::time::Duration;
use tracing::{debug, warn};

/// Compiles source text directly, optionally memoized in a key/value cache
///
/// Cache keys derive from the source text, not the compiled output, so a hit
/// skips the compiler entirely. Diagnostics are cached like any other output.
pub struct InlineCompiler<C> {
    compiler: C,
    cache: Option<Box<dyn KeyValueCache>>,
    timeout: Duration,
}

impl<C: Compiler> InlineCompiler<C> {
    /// Uncached inline compiler
    pub fn new(compiler: C) -> Self {
        Self {
            compiler,
            cache: None,
            timeout: Duration::ZERO,
        }
    }

    /// Memoize results in `cache` for `timeout`
    pub fn with_cache(mut self, cache: Box<dyn KeyValueCache>, timeout: Duration) -> Self {
        self.cache = Some(cache);
        self.timeout = timeout;
        self
    }

    /// Compile `source`, consulting the cache first
    pub fn compile(&self, source: &str) -> Result<CompileOutput> {
        let Some(cache) = &self.cache else {
            return self.compiler.compile(source);
        };

        let key = cache_key(&hexdigest(source, None));
        if let Some(raw) = cache.get(&key) {
            match serde_json::from_str::<CompileOutput>(&raw) {
                Ok(output) => {
                    debug!(key = %key, "inline cache hit");
                    return Ok(output);
                }
                Err(e) => warn!(key = %key, "ignoring unreadable cache entry: {}", e),
            }
        }

        let output = self.compiler.compile(source)?;
        match serde_json::to_string(&output) {
            Ok(raw) => {
                if let Err(e) = cache.set(&key, &raw, self.timeout) {
                    warn!(key = %key, "failed to store inline result: {}", e);
                }
            }
            Err(e) => warn!(key = %key, "failed to encode inline result: {}", e),
        }
        Ok(output)
    }

    /// Text to substitute into the template: compiled output, or the
    /// diagnostic when compilation failed
    pub fn render(&self, source: &str) -> Result<String> {
        Ok(self.compile(source)?.into_text())
    }
}
