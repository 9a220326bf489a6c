//! Error types for scope-core.

use thiserror::Error;

/// Result type alias for scope-core operations.
pub type Result<T> = std::result::Result<T, ScopeError>;

/// Errors that can occur while loading or analysing a source tree.
///
/// Per-file failures (`ParseFailed`, `UnsupportedLanguage`) are recovered by
/// the pipeline and never abort a batch; they are only surfaced by the
/// lower-level entry points.
#[derive(Error, Debug)]
pub enum ScopeError {
    /// The syntax tree for a file contained errors.
    #[error("Failed to parse {path}: {reason}")]
    ParseFailed {
        /// Path of the file that failed to parse.
        path: String,
        /// Location or description of the first syntax error.
        reason: String,
    },

    /// The file extension does not map to an ECMAScript-family grammar.
    #[error("Unsupported language for {path}")]
    UnsupportedLanguage {
        /// Path of the rejected file.
        path: String,
    },

    /// The tree-sitter grammar could not be loaded.
    #[error("Failed to set language: {0}")]
    LanguageSetup(String),

    /// The root handed to the loader does not exist.
    #[error("Path does not exist: {path}")]
    PathNotFound {
        /// Path that was searched.
        path: String,
    },

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ScopeError {
    pub fn parse_failed(path: impl Into<String>, reason: impl Into<String>) -> Self {
        ScopeError::ParseFailed {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Whether this error only affects a single file.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            ScopeError::ParseFailed { .. } | ScopeError::UnsupportedLanguage { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_failed_message() {
        let err = ScopeError::parse_failed("src/a.ts", "syntax error at 3:7");
        assert_eq!(err.to_string(), "Failed to parse src/a.ts: syntax error at 3:7");
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_path_not_found_is_fatal() {
        let err = ScopeError::PathNotFound {
            path: "/nope".to_string(),
        };
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_json_error_converts() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: ScopeError = source.into();
        assert!(matches!(err, ScopeError::Json(_)));
        assert!(err.to_string().starts_with("JSON error: "));
        assert!(!err.is_recoverable());
    }
}
