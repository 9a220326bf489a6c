//! Tree command - render the file tree of a directory

use serde::Serialize;
use std::path::Path;

use super::load_project;
use crate::config::ScopeConfig;
use crate::output::{self, OutputFormat, TextDisplay};

/// Rendered tree of a loaded directory.
#[derive(Debug, Serialize)]
pub struct TreeView {
    pub root: String,
    pub files: usize,
    pub tree: String,
}

impl TextDisplay for TreeView {
    fn to_text(&self) -> String {
        self.tree.clone()
    }
}

/// Run the tree command
pub fn run(
    path: &Path,
    config: &ScopeConfig,
    format: OutputFormat,
    quiet: bool,
) -> anyhow::Result<()> {
    let loaded = load_project(path, config, quiet)?;
    let view = TreeView {
        root: path.display().to_string(),
        files: loaded.len(),
        tree: scope_core::tree::render(loaded.files.keys()),
    };
    output::print(&view, format)
}
