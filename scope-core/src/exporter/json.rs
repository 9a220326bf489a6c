//! JSON format exporter.

use serde::Serialize;

use crate::error::Result;
use crate::types::{ProjectAnalysis, ProjectStructure};

#[derive(Serialize)]
struct ExportDocument<'a> {
    structure: &'a ProjectStructure,
    analysis: &'a ProjectAnalysis,
}

/// Export the structure and analysis as one JSON document.
pub fn export(
    structure: &ProjectStructure,
    analysis: &ProjectAnalysis,
    pretty: bool,
) -> Result<String> {
    let document = ExportDocument {
        structure,
        analysis,
    };
    let output = if pretty {
        serde_json::to_string_pretty(&document)?
    } else {
        serde_json::to_string(&document)?
    };
    Ok(output)
}
