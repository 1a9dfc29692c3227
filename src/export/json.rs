//! JSON exporter

use crate::error::Result;
use crate::export::{Exporter, Report};
use serde::Serialize;
use std::io::{self, Write};

/// JSON output exporter
pub struct JsonExporter;

#[derive(Serialize)]
struct JsonReport<'a> {
    source: &'a str,
    status: &'a str,
    path: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    diagnostic: Option<&'a str>,
}

impl Exporter for JsonExporter {
    fn export(&self, reports: &[Report], writer: &mut dyn Write) -> Result<()> {
        let output: Vec<JsonReport> = reports
            .iter()
            .map(|report| JsonReport {
                source: &report.source,
                status: report.artifact.status(),
                path: report.artifact.path(),
                diagnostic: report.artifact.diagnostic(),
            })
            .collect();

        let json = serde_json::to_string_pretty(&output).map_err(io::Error::from)?;
        writeln!(writer, "{}", json)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build::Artifact;

    #[test]
    fn test_json_export() {
        let reports = vec![
            Report::new(
                "js/all",
                Artifact::Fresh {
                    path: "COFFEESCRIPT_CACHE/js/all-cache.js".to_string(),
                },
            ),
            Report::new(
                "js/bad.coffee",
                Artifact::Failed {
                    fallback: "js/bad.coffee".to_string(),
                    diagnostic: "SyntaxError: missing )".to_string(),
                },
            ),
        ];

        let mut output = Vec::new();
        JsonExporter.export(&reports, &mut output).unwrap();

        let parsed: serde_json::Value = serde_json::from_slice(&output).unwrap();
        let entries = parsed.as_array().unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0]["status"], "fresh");
        assert_eq!(entries[0]["path"], "COFFEESCRIPT_CACHE/js/all-cache.js");
        assert!(entries[0].get("diagnostic").is_none());
        assert_eq!(entries[1]["status"], "failed");
        assert_eq!(entries[1]["path"], "js/bad.coffee");
        assert_eq!(entries[1]["diagnostic"], "SyntaxError: missing )");
    }
}
