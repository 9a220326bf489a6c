//! Data models shared by the classifier, analyzer and renderers.
//!
//! Every record here is built once per run and never mutated afterwards.
//! Maps are `BTreeMap`s keyed by path so that iteration order (and therefore
//! every rendered artifact) is stable across runs. The dependency map is the
//! exception: it keeps modules in the order they were first imported.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Path → raw text content for every file in a source tree.
pub type SourceTree = BTreeMap<String, String>;

/// A single ingested file.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SourceFile {
    pub path: String,
    pub content: String,
}

impl SourceFile {
    pub fn new(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }
}

/// Category assigned to a path by the classifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileCategory {
    /// Entry points and build manifests, kept verbatim.
    KeyFile,
    /// Structured data (JSON), parsed.
    ConfigFile,
    /// Everything else, reduced to a structural abstract.
    OtherFile,
}

impl FileCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            FileCategory::KeyFile => "key",
            FileCategory::ConfigFile => "config",
            FileCategory::OtherFile => "other",
        }
    }
}

impl std::fmt::Display for FileCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An import (or re-export) statement.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ImportEntry {
    /// What is imported, e.g. `React, { useState }` or `* as fs`.
    /// Empty for side-effect imports.
    pub specifiers: String,
    /// The module specifier string, unquoted.
    pub source: String,
}

impl ImportEntry {
    pub fn new(specifiers: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            specifiers: specifiers.into(),
            source: source.into(),
        }
    }
}

/// A named function declaration.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FunctionInfo {
    pub name: String,
    /// Declared parameter names; unresolved patterns become `unknown`.
    pub params: Vec<String>,
    pub complexity: u32,
    /// Inclusive source line span.
    pub lines: u32,
}

/// A named class declaration with the members declared directly in its body.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClassInfo {
    pub name: String,
    pub methods: Vec<String>,
    pub properties: Vec<String>,
}

/// Analysis of one ECMAScript-family file.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct FileAnalysis {
    pub imports: Vec<ImportEntry>,
    pub exports: Vec<String>,
    pub functions: Vec<FunctionInfo>,
    pub classes: Vec<ClassInfo>,
    pub variables: Vec<String>,
    pub complexity: u32,
}

impl Default for FileAnalysis {
    fn default() -> Self {
        Self::empty()
    }
}

impl FileAnalysis {
    /// Degraded analysis used when a file cannot be parsed.
    pub fn empty() -> Self {
        Self {
            imports: Vec::new(),
            exports: Vec::new(),
            functions: Vec::new(),
            classes: Vec::new(),
            variables: Vec::new(),
            complexity: 1,
        }
    }

    /// Synthetic analysis for files that are not parsed as source
    /// (JSON and other grammars). Its only variable is `config_<file name>`.
    pub fn placeholder(path: &str) -> Self {
        let file_name = Path::new(path)
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or(path);
        Self {
            variables: vec![format!("config_{}", file_name)],
            ..Self::empty()
        }
    }

    /// Sum of the line spans of every recorded function.
    pub fn function_lines(&self) -> u64 {
        self.functions.iter().map(|f| u64::from(f.lines)).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.imports.is_empty()
            && self.exports.is_empty()
            && self.functions.is_empty()
            && self.classes.is_empty()
            && self.variables.is_empty()
    }
}

/// Project-wide totals folded from every file analysis.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct ProjectSummary {
    pub total_files: usize,
    pub total_functions: usize,
    pub total_classes: usize,
    /// Sum of per-function line spans, not raw file line counts.
    pub total_lines: u64,
    pub average_complexity: f64,
    /// Module specifier → distinct importing paths, in first-seen order.
    pub dependencies: DependencyMap,
}

/// Module → importing paths, kept in the order modules were first imported.
///
/// Serialized as a JSON object whose keys follow that order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DependencyMap {
    entries: Vec<(String, Vec<String>)>,
}

impl DependencyMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `path` imports `module`. Repeated pairs are ignored.
    pub fn record(&mut self, module: &str, path: &str) {
        let index = match self.entries.iter().position(|(m, _)| m == module) {
            Some(index) => index,
            None => {
                self.entries.push((module.to_string(), Vec::new()));
                self.entries.len() - 1
            }
        };
        let importers = &mut self.entries[index].1;
        if !importers.iter().any(|p| p == path) {
            importers.push(path.to_string());
        }
    }

    pub fn get(&self, module: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|(m, _)| m == module)
            .map(|(_, paths)| paths.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(m, paths)| (m.as_str(), paths.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for DependencyMap {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.entries.iter().map(|(m, paths)| (m, paths)))
    }
}

impl<'de> Deserialize<'de> for DependencyMap {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct DependencyVisitor;

        impl<'de> serde::de::Visitor<'de> for DependencyVisitor {
            type Value = DependencyMap;

            fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str("a map of module to importing paths")
            }

            fn visit_map<A: serde::de::MapAccess<'de>>(
                self,
                mut access: A,
            ) -> Result<Self::Value, A::Error> {
                let mut map = DependencyMap::new();
                while let Some((module, paths)) = access.next_entry::<String, Vec<String>>()? {
                    for path in &paths {
                        map.record(&module, path);
                    }
                    if paths.is_empty() && map.get(&module).is_none() {
                        map.entries.push((module, Vec::new()));
                    }
                }
                Ok(map)
            }
        }

        deserializer.deserialize_map(DependencyVisitor)
    }
}

/// Per-file analyses together with their summary.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct ProjectAnalysis {
    pub files: BTreeMap<String, FileAnalysis>,
    pub summary: ProjectSummary,
}

/// Content of a config file: parsed JSON when possible, raw text otherwise.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ConfigEntry {
    Json(serde_json::Value),
    Raw(String),
}

impl ConfigEntry {
    pub fn parse(content: &str) -> Self {
        match serde_json::from_str(content) {
            Ok(value) => ConfigEntry::Json(value),
            Err(_) => ConfigEntry::Raw(content.to_string()),
        }
    }

    /// Text used when the entry is rendered into a document.
    pub fn to_display_string(&self) -> String {
        match self {
            ConfigEntry::Json(value) => {
                serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
            }
            ConfigEntry::Raw(raw) => raw.clone(),
        }
    }
}

/// Classified and rendered project layout.
///
/// Every input path appears in exactly one of `key_files`,
/// `abstract_files` and `configs`.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct ProjectStructure {
    pub tree: String,
    pub key_files: BTreeMap<String, String>,
    pub abstract_files: BTreeMap<String, String>,
    pub configs: BTreeMap<String, ConfigEntry>,
}

impl ProjectStructure {
    pub fn len(&self) -> usize {
        self.key_files.len() + self.abstract_files.len() + self.configs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Category a path landed in, if it is part of this structure.
    pub fn category_of(&self, path: &str) -> Option<FileCategory> {
        if self.key_files.contains_key(path) {
            Some(FileCategory::KeyFile)
        } else if self.configs.contains_key(path) {
            Some(FileCategory::ConfigFile)
        } else if self.abstract_files.contains_key(path) {
            Some(FileCategory::OtherFile)
        } else {
            None
        }
    }
}

/// Output of the structural abstractor.
///
/// `Fallback` marks output produced by the line scanner instead of the
/// syntax tree, so callers can tell degraded summaries apart.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", content = "summary", rename_all = "snake_case")]
pub enum Abstraction {
    Structured(String),
    Fallback(String),
}

impl Abstraction {
    pub fn summary(&self) -> &str {
        match self {
            Abstraction::Structured(s) | Abstraction::Fallback(s) => s,
        }
    }

    pub fn into_summary(self) -> String {
        match self {
            Abstraction::Structured(s) | Abstraction::Fallback(s) => s,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Abstraction::Fallback(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_analysis_defaults() {
        let analysis = FileAnalysis::default();
        assert!(analysis.is_empty());
        assert_eq!(analysis.complexity, 1);
    }

    #[test]
    fn test_placeholder_uses_file_name() {
        let analysis = FileAnalysis::placeholder("config/settings.json");
        assert_eq!(analysis.variables, vec!["config_settings.json".to_string()]);
        assert_eq!(analysis.complexity, 1);
        assert!(analysis.functions.is_empty());
    }

    #[test]
    fn test_config_entry_parse() {
        assert!(matches!(ConfigEntry::parse("{\"a\": 1}"), ConfigEntry::Json(_)));
        assert_eq!(
            ConfigEntry::parse("{ not json"),
            ConfigEntry::Raw("{ not json".to_string())
        );
    }

    #[test]
    fn test_config_entry_serializes_untagged() {
        let entry = ConfigEntry::parse("{\"name\":\"x\"}");
        let json = serde_json::to_string(&entry).unwrap();
        assert_eq!(json, "{\"name\":\"x\"}");
    }

    #[test]
    fn test_abstraction_tiers() {
        let structured = Abstraction::Structured("// Imports".to_string());
        let fallback = Abstraction::Fallback("// import: import x".to_string());
        assert!(!structured.is_fallback());
        assert!(fallback.is_fallback());
        assert_eq!(fallback.summary(), "// import: import x");
    }

    #[test]
    fn test_function_lines_sum() {
        let analysis = FileAnalysis {
            functions: vec![
                FunctionInfo {
                    name: "a".to_string(),
                    lines: 3,
                    complexity: 1,
                    ..Default::default()
                },
                FunctionInfo {
                    name: "b".to_string(),
                    lines: 4,
                    complexity: 1,
                    ..Default::default()
                },
            ],
            ..FileAnalysis::empty()
        };
        assert_eq!(analysis.function_lines(), 7);
    }
}
