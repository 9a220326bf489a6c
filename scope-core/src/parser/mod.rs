//! ECMAScript-family parsing.
//!
//! Selects a tree-sitter grammar from the file extension, builds the syntax
//! tree, and rejects trees containing syntax errors. Files are analysed in
//! parallel with rayon; each file is independent of every other.

use rayon::prelude::*;
use std::path::Path;
use tree_sitter::{Parser, Tree};

use crate::error::{Result, ScopeError};
use crate::types::{FileAnalysis, SourceFile};

pub mod analyzer;

pub(crate) mod helpers;

pub use analyzer::{analyze, analyze_file};

/// Grammar used for a given file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EcmaDialect {
    JavaScript,
    TypeScript,
    Tsx,
}

impl EcmaDialect {
    /// Detect the dialect from a path's extension.
    pub fn from_path(path: &str) -> Option<Self> {
        let ext = Path::new(path).extension()?.to_str()?;
        match ext.to_lowercase().as_str() {
            "js" | "jsx" | "mjs" | "cjs" => Some(EcmaDialect::JavaScript),
            "ts" | "mts" | "cts" => Some(EcmaDialect::TypeScript),
            "tsx" => Some(EcmaDialect::Tsx),
            _ => None,
        }
    }

    fn language(&self) -> tree_sitter::Language {
        match self {
            EcmaDialect::JavaScript => tree_sitter_javascript::LANGUAGE.into(),
            EcmaDialect::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
            EcmaDialect::Tsx => tree_sitter_typescript::LANGUAGE_TSX.into(),
        }
    }
}

/// Whether a path is analysed as ECMAScript-family source.
pub fn is_ecmascript(path: &str) -> bool {
    EcmaDialect::from_path(path).is_some()
}

/// Parse `source` with the grammar selected by `path`.
///
/// Returns `ParseFailed` if the resulting tree contains any error or
/// missing node.
pub fn parse_tree(path: &str, source: &str) -> Result<Tree> {
    let dialect = EcmaDialect::from_path(path).ok_or_else(|| ScopeError::UnsupportedLanguage {
        path: path.to_string(),
    })?;

    let mut parser = Parser::new();
    parser
        .set_language(&dialect.language())
        .map_err(|e| ScopeError::LanguageSetup(e.to_string()))?;

    let tree = parser
        .parse(source, None)
        .ok_or_else(|| ScopeError::parse_failed(path, "parser returned no tree"))?;

    let root = tree.root_node();
    if let Some(error) = helpers::find_first_error(&root) {
        let pos = error.start_position();
        let what = if error.is_missing() {
            format!("missing {}", error.kind())
        } else {
            "syntax error".to_string()
        };
        return Err(ScopeError::parse_failed(
            path,
            format!("{} at {}:{}", what, pos.row + 1, pos.column + 1),
        ));
    }

    Ok(tree)
}

/// Analyse multiple files in parallel using rayon.
///
/// Results come back in input order. When `num_threads` is set, a dedicated
/// pool of that size is used; otherwise the global pool.
pub fn analyze_files_parallel(
    files: &[SourceFile],
    num_threads: Option<usize>,
) -> Vec<(String, FileAnalysis)> {
    let analyze_fn = |file: &SourceFile| -> (String, FileAnalysis) {
        (file.path.clone(), analyze_file(&file.path, &file.content))
    };

    match build_pool(num_threads) {
        Some(pool) => pool.install(|| files.par_iter().map(analyze_fn).collect()),
        None => files.par_iter().map(analyze_fn).collect(),
    }
}

/// Dedicated rayon pool for an explicit thread count.
pub(crate) fn build_pool(num_threads: Option<usize>) -> Option<rayon::ThreadPool> {
    match num_threads {
        Some(n) if n > 0 => rayon::ThreadPoolBuilder::new()
            .num_threads(n)
            .build()
            .map_err(|e| tracing::warn!("Falling back to global thread pool: {}", e))
            .ok(),
        _ => None,
    }
}
