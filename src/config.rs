//! Configuration types for coffee-cache

use crate::core::Layout;
use crate::error::{CoffeeError, Result};
use std::path::PathBuf;
use std::time::Duration;

/// Flags passed to the compiler on every invocation
pub const COMPILER_FLAGS: [&str; 3] = ["-c", "-s", "-p"];

/// Default lifetime of inline cache entries (30 days)
pub const DEFAULT_CACHE_TIMEOUT: Duration = Duration::from_secs(60 * 60 * 24 * 30);

/// Output format for compile reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// One public path per line
    #[default]
    Console,
    /// JSON array of reports
    Json,
}

/// Configuration options for coffee-cache
#[derive(Debug, Clone)]
pub struct Config {
    /// Compiler executable, optionally followed by leading arguments
    /// (default: "coffee")
    pub executable: String,

    /// Cache inline compile results (default: true)
    pub use_cache: bool,

    /// Lifetime of inline cache entries
    pub cache_timeout: Duration,

    /// Directory under the static root that receives compiled files
    /// (default: "COFFEESCRIPT_CACHE")
    pub output_dir: String,

    /// Static-assets root all source and output paths are resolved against
    pub static_root: PathBuf,

    /// Inline cache directory (default: .coffee-cache in the static root)
    pub cache_dir: Option<PathBuf>,

    /// Kill the compiler if it runs longer than this (default: no limit)
    pub compile_timeout: Option<Duration>,

    /// Number of threads for compiling several files (default: num_cpus)
    pub num_threads: usize,

    /// Output format (console or json)
    pub output_format: OutputFormat,

    /// Enable debug logging
    pub verbose: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            executable: String::from("coffee"),
            use_cache: true,
            cache_timeout: DEFAULT_CACHE_TIMEOUT,
            output_dir: String::from("COFFEESCRIPT_CACHE"),
            static_root: PathBuf::from("."),
            cache_dir: None,
            compile_timeout: None,
            num_threads: num_cpus::get(),
            output_format: OutputFormat::Console,
            verbose: false,
        }
    }
}

impl Config {
    /// Split the executable setting into a program and its leading arguments
    /// using shell quoting rules, with the fixed compiler flags appended
    pub fn compiler_command(&self) -> Result<(String, Vec<String>)> {
        let words = shlex::split(&self.executable).ok_or_else(|| {
            CoffeeError::InvalidConfig(format!(
                "compiler executable has unbalanced quotes: {}",
                self.executable
            ))
        })?;
        let mut words = words.into_iter();
        let program = words
            .next()
            .ok_or_else(|| CoffeeError::InvalidConfig("compiler executable is empty".to_string()))?;

        let mut args: Vec<String> = words.collect();
        args.extend(COMPILER_FLAGS.iter().map(|f| f.to_string()));

        Ok((program, args))
    }

    /// Returns the inline cache directory, falling back to the default
    /// location inside the static root
    pub fn effective_cache_dir(&self) -> PathBuf {
        self.cache_dir
            .clone()
            .unwrap_or_else(|| self.static_root.join(".coffee-cache"))
    }

    /// Path layout derived from the static root and output directory
    pub fn layout(&self) -> Layout {
        Layout::new(self.static_root.clone(), self.output_dir.clone())
    }
}
