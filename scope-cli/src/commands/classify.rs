//! Classify command - show the category assigned to every file

use colored::Colorize;
use scope_core::classifier::matching_rule;
use scope_core::{classify, FileCategory};
use serde::Serialize;
use std::path::Path;

use super::load_project;
use crate::config::ScopeConfig;
use crate::output::{self, OutputFormat, TextDisplay};

/// Category of one path and the key-file rule that matched it.
#[derive(Debug, Serialize)]
pub struct ClassifiedPath {
    pub path: String,
    pub category: FileCategory,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule: Option<&'static str>,
}

/// Classification of a loaded directory.
#[derive(Debug, Serialize)]
pub struct Classification {
    pub entries: Vec<ClassifiedPath>,
}

impl Classification {
    pub fn from_paths<'a>(paths: impl IntoIterator<Item = &'a String>) -> Self {
        let entries = paths
            .into_iter()
            .map(|path| ClassifiedPath {
                path: path.clone(),
                category: classify(path),
                rule: matching_rule(path),
            })
            .collect();
        Self { entries }
    }

    pub fn count(&self, category: FileCategory) -> usize {
        self.entries.iter().filter(|e| e.category == category).count()
    }
}

impl TextDisplay for Classification {
    fn to_text(&self) -> String {
        let mut output = String::new();
        for entry in &self.entries {
            let label = format!("{:<6}", entry.category.as_str());
            let label = match entry.category {
                FileCategory::KeyFile => label.green().bold(),
                FileCategory::ConfigFile => label.yellow(),
                FileCategory::OtherFile => label.dimmed(),
            };
            match entry.rule {
                Some(rule) => output.push_str(&format!(
                    "{} {} {}\n",
                    label,
                    entry.path,
                    format!("({})", rule).dimmed()
                )),
                None => output.push_str(&format!("{} {}\n", label, entry.path)),
            }
        }
        output.push_str(&format!(
            "\n{} key, {} config, {} other\n",
            self.count(FileCategory::KeyFile),
            self.count(FileCategory::ConfigFile),
            self.count(FileCategory::OtherFile)
        ));
        output
    }
}

/// Run the classify command
pub fn run(
    path: &Path,
    config: &ScopeConfig,
    format: OutputFormat,
    quiet: bool,
) -> anyhow::Result<()> {
    let loaded = load_project(path, config, quiet)?;
    let classification = Classification::from_paths(loaded.files.keys());
    output::print(&classification, format)
}
