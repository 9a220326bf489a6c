//! Command implementations for codescope CLI
//!
//! Each command module provides a `run` function that executes the command logic.

pub mod analyze;
pub mod classify;
pub mod tree;

use anyhow::Context;
use indicatif::{ProgressBar, ProgressStyle};
use scope_core::{load_directory, LoadProgress, LoadedTree, ProgressFn};
use std::path::Path;

use crate::config::ScopeConfig;

/// Load the source tree under `root`, showing a progress bar unless `quiet`.
pub fn load_project(
    root: &Path,
    config: &ScopeConfig,
    quiet: bool,
) -> anyhow::Result<LoadedTree> {
    let bar = if quiet {
        ProgressBar::hidden()
    } else {
        create_progress_bar()
    };

    let report = |p: LoadProgress| {
        bar.set_length(p.total as u64);
        bar.inc(1);
    };
    let progress: ProgressFn<'_> = &report;

    let result = load_directory(root, &config.load_options(), Some(progress))
        .with_context(|| format!("Failed to load {}", root.display()));
    bar.finish_and_clear();

    let loaded = result?;
    tracing::debug!(
        files = loaded.len(),
        skipped = loaded.skipped_count,
        errors = loaded.error_count,
        "load finished in {:.1}ms",
        loaded.duration_ms
    );
    Ok(loaded)
}

/// Create a progress bar for file loading.
fn create_progress_bar() -> ProgressBar {
    let bar = ProgressBar::new(0);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.cyan} Loading files [{bar:30.cyan/blue}] {pos}/{len}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> "),
    );
    bar
}
