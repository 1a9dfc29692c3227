//! Export system for compile reports

mod console;
mod json;

use crate::build::Artifact;
use crate::config::OutputFormat;
use crate::error::Result;
use std::io::Write;

pub use console::ConsoleExporter;
pub use json::JsonExporter;

/// Outcome of one requested compile
#[derive(Debug, Clone)]
pub struct Report {
    /// What was requested: a source path or a bundle name
    pub source: String,
    pub artifact: Artifact,
}

impl Report {
    pub fn new(source: impl Into<String>, artifact: Artifact) -> Self {
        Self {
            source: source.into(),
            artifact,
        }
    }
}

/// Trait for output formatting
pub trait Exporter {
    /// Write the complete output for the given reports
    fn export(&self, reports: &[Report], writer: &mut dyn Write) -> Result<()>;
}

/// Create an appropriate exporter based on configuration
pub fn create_exporter(format: OutputFormat) -> Box<dyn Exporter> {
    match format {
        OutputFormat::Console => Box::new(ConsoleExporter),
        OutputFormat::Json => Box::new(JsonExporter),
    }
}
