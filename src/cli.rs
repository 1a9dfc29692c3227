//! CLI argument parsing using clap

use crate::config::{Config, OutputFormat};
use crate::error::{CoffeeError, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

/// Caching CoffeeScript compile step
#[derive(Parser, Debug)]
#[command(name = "coffee-cache")]
#[command(version)]
#[command(
    about = "Compile CoffeeScript, reusing previously compiled output",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Static-assets root that sources and outputs are resolved against
    #[arg(long = "static-root", value_name = "DIR", global = true)]
    pub static_root: Option<PathBuf>,

    /// Compiler executable, optionally with leading arguments
    #[arg(long = "executable", value_name = "CMD", global = true)]
    pub executable: Option<String>,

    /// Directory under the static root for compiled output
    #[arg(long = "output-dir", value_name = "NAME", global = true)]
    pub output_dir: Option<String>,

    /// Do not cache inline compile results
    #[arg(long = "no-cache", global = true)]
    pub no_cache: bool,

    /// Lifetime of inline cache entries in seconds
    #[arg(long = "cache-timeout", value_name = "SECS", global = true)]
    pub cache_timeout: Option<u64>,

    /// Directory for inline cache entries
    #[arg(long = "cache-dir", value_name = "DIR", global = true)]
    pub cache_dir: Option<PathBuf>,

    /// Kill the compiler after this many seconds
    #[arg(long = "timeout", value_name = "SECS", global = true)]
    pub timeout: Option<u64>,

    /// Number of threads for compiling several files
    #[arg(short = 'j', long = "threads", value_name = "N", global = true)]
    pub threads: Option<usize>,

    /// Output reports in JSON format
    #[arg(long = "json", global = true)]
    pub json: bool,

    /// Log freshness decisions and cache hits
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Compile source read from stdin and print the result
    Inline,

    /// Compile source files to outputs named after their modification time
    Compile {
        /// Source paths relative to the static root
        #[arg(value_name = "PATH", required = true)]
        paths: Vec<String>,
    },

    /// Concatenate inputs in order and compile them into one bundle
    ///
    /// Without inputs, they are read from stdin one per line. Without a name,
    /// stdin holds a whole `coffeescripts` block.
    Bundle {
        /// Bundle name relative to the static root
        #[arg(value_name = "NAME")]
        name: Option<String>,

        /// Input names relative to the static root, without extension
        #[arg(value_name = "INPUT")]
        inputs: Vec<String>,
    },

    /// Remove all inline cache entries
    ClearCache,
}

impl Cli {
    /// Parse command line arguments into a Config and the command to run
    pub fn into_config(self) -> Result<(Config, Command)> {
        if self.threads == Some(0) {
            return Err(CoffeeError::InvalidConfig(
                "--threads must be at least 1".to_string(),
            ));
        }
        if self.timeout == Some(0) {
            return Err(CoffeeError::InvalidConfig(
                "--timeout must be at least 1 second".to_string(),
            ));
        }

        let defaults = Config::default();
        let output_format = if self.json {
            OutputFormat::Json
        } else {
            OutputFormat::Console
        };

        let config = Config {
            executable: self.executable.unwrap_or(defaults.executable),
            use_cache: !self.no_cache,
            cache_timeout: self
                .cache_timeout
                .map(Duration::from_secs)
                .unwrap_or(defaults.cache_timeout),
            output_dir: self.output_dir.unwrap_or(defaults.output_dir),
            static_root: self.static_root.unwrap_or(defaults.static_root),
            cache_dir: self.cache_dir,
            compile_timeout: self.timeout.map(Duration::from_secs),
            num_threads: self.threads.unwrap_or(defaults.num_threads),
            output_format,
            verbose: self.verbose,
        };

        Ok((config, self.command))
    }
}
