//! Error types for coffee-cache

use thiserror::Error;

/// Result type alias for coffee-cache operations
pub type Result<T> = std::result::Result<T, CoffeeError>;

/// Error types for compile and cache operations
///
/// Compiler diagnostics are not errors: they are reported through
/// [`crate::compiler::CompileOutput::Diagnostic`]. These variants cover the
/// cases where no compiler verdict could be obtained at all.
#[derive(Error, Debug)]
pub enum CoffeeError {
    /// Source file does not exist
    #[error("Cannot open source '{path}': {reason}")]
    SourceNotFound { path: String, reason: String },

    /// Source file exists but its contents could not be read as UTF-8 text
    #[error("Cannot read source '{path}': {reason}")]
    SourceUnreadable { path: String, reason: String },

    /// I/O error during file operations
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The compiler process could not be started or driven
    #[error("Failed to run compiler '{program}': {reason}")]
    Spawn { program: String, reason: String },

    /// The compiler did not exit within the configured timeout
    #[error("Compiler '{program}' did not finish within {seconds}s and was killed")]
    Timeout { program: String, seconds: u64 },

    /// Invalid configuration provided
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Cache error
    #[error("Cache error: {0}")]
    CacheError(String),

    /// Malformed block tag contents
    #[error("Invalid tag: {0}")]
    InvalidTag(String),
}
