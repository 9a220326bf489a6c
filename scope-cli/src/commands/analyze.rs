//! Analyze command - structure document and analysis report for a directory

use anyhow::Context;
use colored::Colorize;
use scope_core::exporter::{document, json, report};
use scope_core::{analyze_project, build_structure_with, ProjectAnalysis, ProjectStructure};
use std::path::Path;
use std::time::Instant;

use super::load_project;
use crate::config::ScopeConfig;
use crate::output::OutputFormat;

/// Which parts of the result to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sections {
    All,
    ReportOnly,
    StructureOnly,
}

impl Sections {
    pub fn from_flags(report_only: bool, structure_only: bool) -> Self {
        match (report_only, structure_only) {
            (true, _) => Sections::ReportOnly,
            (_, true) => Sections::StructureOnly,
            _ => Sections::All,
        }
    }
}

/// Options for the analyze command.
#[derive(Debug, Clone)]
pub struct AnalyzeOptions<'a> {
    pub output: Option<&'a Path>,
    pub threads: Option<usize>,
    pub sections: Sections,
    pub format: OutputFormat,
    pub quiet: bool,
}

/// Run the analyze command
pub fn run(
    path: &Path,
    config: &ScopeConfig,
    options: &AnalyzeOptions<'_>,
) -> anyhow::Result<()> {
    let start = Instant::now();
    let loaded = load_project(path, config, options.quiet)?;
    let threads = options.threads.or(config.threads());

    let structure = match options.sections {
        Sections::ReportOnly => None,
        _ => Some(build_structure_with(&loaded.files, threads)),
    };
    let analysis = match options.sections {
        Sections::StructureOnly => None,
        _ => Some(analyze_project(&loaded.files, threads)),
    };

    let rendered = render(structure.as_ref(), analysis.as_ref(), options.format)?;

    match options.output {
        Some(out) => std::fs::write(out, &rendered)
            .with_context(|| format!("Failed to write {}", out.display()))?,
        None => print!("{}", rendered),
    }

    if !options.quiet {
        let analysed = analysis.as_ref().map(|a| a.summary.total_files).unwrap_or(0);
        let destination = options
            .output
            .map(|p| format!(" -> {}", p.display()))
            .unwrap_or_default();
        eprintln!(
            "{} {} files loaded, {} source files analysed in {:.2}s{}",
            "✓".green().bold(),
            loaded.len().to_string().cyan(),
            analysed.to_string().cyan(),
            start.elapsed().as_secs_f64(),
            destination
        );
        if loaded.error_count > 0 {
            eprintln!(
                "{} {} files could not be read",
                "!".yellow().bold(),
                loaded.error_count
            );
        }
    }

    Ok(())
}

fn render(
    structure: Option<&ProjectStructure>,
    analysis: Option<&ProjectAnalysis>,
    format: OutputFormat,
) -> anyhow::Result<String> {
    let mut out = match (format, structure, analysis) {
        (OutputFormat::Json, Some(s), Some(a)) => json::export(s, a, true)?,
        (OutputFormat::Json, Some(s), None) => serde_json::to_string_pretty(s)?,
        (OutputFormat::Json, None, Some(a)) => serde_json::to_string_pretty(a)?,
        (OutputFormat::Text, Some(s), Some(a)) => {
            document::render(s, &report::render_analysis(a))
        }
        (OutputFormat::Text, Some(s), None) => document::render_structure(s),
        (OutputFormat::Text, None, Some(a)) => report::render_analysis(a),
        (_, None, None) => String::new(),
    };
    if !out.ends_with('\n') {
        out.push('\n');
    }
    Ok(out)
}
