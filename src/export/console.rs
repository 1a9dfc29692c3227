//! Console exporter

use crate::error::Result;
use crate::export::{Exporter, Report};
use std::io::Write;

/// Prints one public path per report, ready to drop into a script tag
///
/// Failed compiles print their fallback path; the diagnostic has already been
/// logged.
pub struct ConsoleExporter;

impl Exporter for ConsoleExporter {
    fn export(&self, reports: &[Report], writer: &mut dyn Write) -> Result<()> {
        for report in reports {
            writeln!(writer, "{}", report.artifact.path())?;
        }
        Ok(())
    }
}
