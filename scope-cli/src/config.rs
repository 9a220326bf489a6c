//! codescope configuration loading from `.scoperc.toml`.
//!
//! Configuration is optional. The file is looked up in the analysed root and
//! every section falls back to defaults when missing.
//!
//! # Example Configuration
//!
//! ```toml
//! [scanner]
//! ignore = ["vendor/", "*.generated.ts"]
//! include_hidden = false
//! max_file_size_kb = 512
//! extensions = ["ts", "tsx", "json"]
//!
//! [analysis]
//! threads = 4
//!
//! [output]
//! format = "text"
//! color = true
//! ```

use scope_core::LoadOptions;
use serde::Deserialize;
use std::path::Path;

/// Name of the configuration file.
pub const CONFIG_FILENAME: &str = ".scoperc.toml";

/// Root configuration structure loaded from `.scoperc.toml`.
#[derive(Debug, Deserialize, Default)]
pub struct ScopeConfig {
    /// File loading configuration (what to include/exclude).
    #[serde(default)]
    pub scanner: ScannerConfig,

    /// Analysis settings.
    #[serde(default)]
    pub analysis: AnalysisConfig,

    /// Output formatting preferences.
    #[serde(default)]
    pub output: OutputSettings,
}

/// Scanner configuration controlling which files are loaded.
#[derive(Debug, Deserialize, Default)]
pub struct ScannerConfig {
    /// Additional glob patterns to ignore, on top of `.gitignore`,
    /// `.scopeignore` and the built-in defaults.
    #[serde(default)]
    pub ignore: Vec<String>,

    /// Whether to include hidden files (starting with `.`).
    #[serde(default)]
    pub include_hidden: bool,

    /// Maximum file size to load, in kilobytes. Default: no limit.
    #[serde(default)]
    pub max_file_size_kb: Option<u64>,

    /// Extensions to load. Default: the built-in text extension list.
    #[serde(default)]
    pub extensions: Option<Vec<String>>,
}

/// Analysis settings.
#[derive(Debug, Deserialize, Default)]
pub struct AnalysisConfig {
    /// Worker threads for per-file work. Default: one per CPU.
    #[serde(default)]
    pub threads: Option<usize>,
}

/// Output formatting preferences. Command-line flags override these.
#[derive(Debug, Deserialize, Default)]
pub struct OutputSettings {
    /// Default output format: `text` or `json`.
    #[serde(default)]
    pub format: Option<String>,

    /// Whether to use colored output. Defaults to TTY detection.
    #[serde(default)]
    pub color: Option<bool>,
}

/// Default ignore patterns that are always included.
const DEFAULT_IGNORE_PATTERNS: &[&str] = &[
    "node_modules/",
    "dist/",
    "build/",
    "coverage/",
    ".next/",
    "target/",
];

impl ScopeConfig {
    /// Load configuration from `.scoperc.toml` in `root`.
    ///
    /// A missing file yields defaults. Read and parse errors are logged as
    /// warnings and also yield defaults.
    pub fn load(root: &Path) -> Self {
        let config_path = root.join(CONFIG_FILENAME);
        if config_path.exists() {
            match std::fs::read_to_string(&config_path) {
                Ok(content) => match toml::from_str(&content) {
                    Ok(config) => return config,
                    Err(e) => {
                        tracing::warn!("Failed to parse {}: {}", CONFIG_FILENAME, e);
                    }
                },
                Err(e) => {
                    tracing::warn!("Failed to read {}: {}", CONFIG_FILENAME, e);
                }
            }
        }
        Self::default()
    }

    /// Ignore patterns for the loader: user patterns first, then defaults.
    pub fn ignore_patterns(&self) -> Vec<String> {
        let mut patterns = self.scanner.ignore.clone();
        for default in DEFAULT_IGNORE_PATTERNS {
            if !patterns.iter().any(|p| p.as_str() == *default) {
                patterns.push(default.to_string());
            }
        }
        patterns
    }

    /// Maximum file size in bytes, if configured.
    pub fn max_file_size_bytes(&self) -> Option<u64> {
        self.scanner.max_file_size_kb.map(|kb| kb * 1024)
    }

    /// Loader options derived from the `[scanner]` section.
    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            extensions: self.scanner.extensions.clone(),
            ignore_patterns: self.ignore_patterns(),
            include_hidden: self.scanner.include_hidden,
            max_file_size: self.max_file_size_bytes(),
            follow_symlinks: false,
        }
    }

    pub fn threads(&self) -> Option<usize> {
        self.analysis.threads
    }

    pub fn default_format(&self) -> Option<&str> {
        self.output.format.as_deref()
    }

    pub fn use_color(&self) -> Option<bool> {
        self.output.color
    }
}
