//! codescope core - source-tree structure and static analysis engine.
//!
//! Takes a mapping of relative path → text content and produces a classified
//! project structure plus a static-analysis report for the
//! TypeScript/JavaScript files in it.
//!
//! # Features
//!
//! - **Path classification**: key files, config files, everything else
//! - **Tree rendering**: deterministic box-drawing file tree
//! - **Structural abstracts**: syntax-tree summaries with a line-scan fallback
//! - **Source analysis**: imports, exports, functions, classes, variables
//! - **Cyclomatic complexity**: per function and per file
//! - **Parallel processing**: per-file work runs on Rayon
//!
//! # Usage
//!
//! ```no_run
//! use scope_core::{analyze_project, build_structure, exporter, SourceTree};
//!
//! let mut files = SourceTree::new();
//! files.insert("src/App.tsx".into(), "function bar(x) { if (x) return 1; return 0; }".into());
//!
//! let structure = build_structure(&files);
//! let analysis = analyze_project(&files, None);
//! let report = exporter::report::render_analysis(&analysis);
//! println!("{}", exporter::document::render(&structure, &report));
//! ```

pub mod classifier;
pub mod error;
pub mod exporter;
pub mod parser;
pub mod reducer;
pub mod scanner;
pub mod structure;
pub mod summary;
pub mod tree;
pub mod types;

pub use classifier::classify;
pub use error::{Result, ScopeError};
pub use parser::{analyze, analyze_file};
pub use reducer::abstract_file;
pub use scanner::{load_directory, LoadOptions, LoadProgress, LoadedTree, ProgressFn};
pub use structure::{build_structure, build_structure_with};
pub use summary::{aggregate, analyze_project};
pub use types::*;

/// Get the version of the core library.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
