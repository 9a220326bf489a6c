//! Local source-tree loader using the `ignore` crate.
//!
//! Walks a directory with gitignore semantics, keeps text files matching an
//! extension allow-list, and reads them in parallel into a `SourceTree`
//! keyed by forward-slash relative paths.
//!
//! # Features
//!
//! - Native `.gitignore` support at all levels
//! - Custom `.scopeignore` file support
//! - Extra ignore patterns supplied by the caller
//! - Size limit and binary/non-UTF-8 detection
//! - Progress callbacks with `{ loaded, total }` counts

use ignore::WalkBuilder;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use crate::error::{Result, ScopeError};
use crate::types::SourceTree;

/// Per-directory ignore file honoured in addition to `.gitignore`.
pub const IGNORE_FILENAME: &str = ".scopeignore";

/// Extensions loaded when no explicit list is configured.
pub const DEFAULT_EXTENSIONS: &[&str] = &[
    // web and scripts
    "js", "jsx", "mjs", "cjs", "ts", "tsx", "mts", "cts", "css", "html", "json", "md",
    // languages
    "py", "java", "c", "h", "cpp", "hpp", "cs", "php", "rb", "go", "swift", "rs", "kt", "kts",
    "gradle", "dart", "lua", "pl", "r", "clj", "coffee", "fs", "hs", "m", "mm", "nim", "v",
    "groovy", "scala", "vb",
    // config and data
    "yml", "yaml", "xml", "ini", "toml", "env", "properties", "cfg", "tf", "csv", "tsv", "sql",
    "rss", "json5", "jsonc", "proto",
    // markup and docs
    "htm", "xhtml", "svg", "rst", "tex", "markdown", "adoc", "asciidoc", "txt", "log", "rtf",
    "odt", "org", "bib",
    // stylesheets
    "scss", "sass", "less", "stylus",
    // shell and templates
    "sh", "bat", "ps1", "tcl", "ejs", "hbs", "pug", "j2", "slim", "twig", "erb", "mustache",
    "njk",
    // frameworks and tooling
    "vue", "svelte", "graphql", "gql", "lock", "conf", "gitattributes",
    "diff", "patch", "nix", "zsh", "fish",
];

/// Extensionless file names loaded alongside `DEFAULT_EXTENSIONS`.
pub const DEFAULT_FILENAMES: &[&str] = &["Dockerfile", "Makefile", "Gemfile", "Rakefile"];

/// Options for `load_directory`.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct LoadOptions {
    /// Extensions to load (without dot). `None` uses `DEFAULT_EXTENSIONS`.
    pub extensions: Option<Vec<String>>,
    /// Additional gitignore-style patterns to skip.
    pub ignore_patterns: Vec<String>,
    /// Include dot-files and dot-directories (`.git` is always skipped).
    pub include_hidden: bool,
    /// Skip files larger than this many bytes.
    pub max_file_size: Option<u64>,
    pub follow_symlinks: bool,
}

/// Progress of the read phase.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadProgress {
    pub loaded: usize,
    pub total: usize,
}

/// Callback invoked from worker threads as files are read.
pub type ProgressFn<'a> = &'a (dyn Fn(LoadProgress) + Sync);

/// Result of loading a directory.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct LoadedTree {
    /// Relative path → content.
    pub files: SourceTree,

    /// Files dropped by the extension filter, size limit or text check.
    pub skipped_count: usize,

    /// Files that could not be read.
    pub error_count: usize,

    /// Time taken in milliseconds.
    pub duration_ms: f64,
}

impl LoadedTree {
    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

enum ReadOutcome {
    Loaded(String, String),
    Skipped,
    Failed,
}

/// Load every text file under `root` into a source tree.
pub fn load_directory(
    root: &Path,
    options: &LoadOptions,
    progress: Option<ProgressFn<'_>>,
) -> Result<LoadedTree> {
    let start = Instant::now();

    if !root.exists() {
        return Err(ScopeError::PathNotFound {
            path: root.display().to_string(),
        });
    }

    let ext_filter: HashSet<String> = match &options.extensions {
        Some(exts) => exts
            .iter()
            .map(|e| e.trim_start_matches('.').to_lowercase())
            .collect(),
        None => DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
    };

    let mut builder = WalkBuilder::new(root);
    builder
        .hidden(!options.include_hidden)
        .git_ignore(true)
        .git_global(true)
        .git_exclude(true)
        .require_git(false)
        .follow_links(options.follow_symlinks)
        .add_custom_ignore_filename(IGNORE_FILENAME)
        .filter_entry(|entry| entry.file_name() != ".git");

    if !options.ignore_patterns.is_empty() {
        let mut override_builder = ignore::overrides::OverrideBuilder::new(root);
        for pattern in &options.ignore_patterns {
            // `!` turns an override into an exclusion
            if let Err(e) = override_builder.add(&format!("!{}", pattern)) {
                tracing::warn!("Invalid ignore pattern '{}': {}", pattern, e);
            }
        }
        match override_builder.build() {
            Ok(overrides) => {
                builder.overrides(overrides);
            }
            Err(e) => tracing::warn!("Ignoring extra ignore patterns: {}", e),
        }
    }

    let mut skipped = 0usize;
    let candidates: Vec<PathBuf> = builder
        .build()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().map(|ft| ft.is_file()).unwrap_or(false))
        .map(|entry| entry.into_path())
        .filter(|path| {
            let keep = is_wanted(path, &ext_filter, options.extensions.is_none());
            if !keep {
                skipped += 1;
            }
            keep
        })
        .collect();

    let total = candidates.len();
    let loaded = AtomicUsize::new(0);

    let outcomes: Vec<ReadOutcome> = candidates
        .par_iter()
        .map(|path| {
            let outcome = read_text(root, path, options.max_file_size);
            let done = loaded.fetch_add(1, Ordering::Relaxed) + 1;
            if let Some(report) = progress {
                report(LoadProgress {
                    loaded: done,
                    total,
                });
            }
            outcome
        })
        .collect();

    let mut result = LoadedTree {
        skipped_count: skipped,
        ..Default::default()
    };
    for outcome in outcomes {
        match outcome {
            ReadOutcome::Loaded(path, content) => {
                result.files.insert(path, content);
            }
            ReadOutcome::Skipped => result.skipped_count += 1,
            ReadOutcome::Failed => result.error_count += 1,
        }
    }
    result.duration_ms = start.elapsed().as_secs_f64() * 1000.0;

    tracing::info!(
        root = %root.display(),
        files = result.files.len(),
        skipped = result.skipped_count,
        errors = result.error_count,
        "loaded source tree"
    );

    Ok(result)
}

fn is_wanted(path: &Path, ext_filter: &HashSet<String>, default_names: bool) -> bool {
    // `.env` and `.gitattributes` match on the name after the leading dot
    let ext = path.extension().and_then(|e| e.to_str()).or_else(|| {
        path.file_name()
            .and_then(|n| n.to_str())
            .and_then(|n| n.strip_prefix('.'))
    });
    match ext {
        Some(ext) => ext_filter.contains(&ext.to_lowercase()),
        None if !default_names => false,
        None => path
            .file_name()
            .and_then(|n| n.to_str())
            .map(|name| DEFAULT_FILENAMES.contains(&name))
            .unwrap_or(false),
    }
}

fn read_text(root: &Path, path: &Path, max_size: Option<u64>) -> ReadOutcome {
    if let Some(limit) = max_size {
        match fs::metadata(path) {
            Ok(meta) if meta.len() > limit => {
                tracing::debug!(path = %path.display(), size = meta.len(), "over size limit");
                return ReadOutcome::Skipped;
            }
            Ok(_) => {}
            Err(e) => {
                tracing::warn!("Cannot stat {}: {}", path.display(), e);
                return ReadOutcome::Failed;
            }
        }
    }

    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!("Cannot read {}: {}", path.display(), e);
            return ReadOutcome::Failed;
        }
    };

    if bytes.contains(&0) {
        tracing::debug!(path = %path.display(), "binary content");
        return ReadOutcome::Skipped;
    }
    let content = match String::from_utf8(bytes) {
        Ok(content) => content,
        Err(_) => {
            tracing::debug!(path = %path.display(), "not UTF-8");
            return ReadOutcome::Skipped;
        }
    };

    ReadOutcome::Loaded(relative_path(root, path), content)
}

/// Forward-slash path of `path` relative to `root`.
fn relative_path(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
