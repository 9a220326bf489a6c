//! Project-wide aggregation of per-file analyses.

use std::collections::BTreeMap;

use crate::parser::{analyze_files_parallel, is_ecmascript};
use crate::types::{FileAnalysis, ProjectAnalysis, ProjectSummary, SourceFile, SourceTree};

/// Fold per-file analyses into project totals.
///
/// Always rebuilt from the complete map. An empty map yields zero totals and
/// an average complexity of `0.0`.
pub fn aggregate(files: &BTreeMap<String, FileAnalysis>) -> ProjectSummary {
    let mut summary = ProjectSummary {
        total_files: files.len(),
        ..Default::default()
    };

    let mut complexity_sum: u64 = 0;
    for (path, analysis) in files {
        summary.total_functions += analysis.functions.len();
        summary.total_classes += analysis.classes.len();
        summary.total_lines += analysis.function_lines();
        complexity_sum += u64::from(analysis.complexity);

        for import in &analysis.imports {
            summary.dependencies.record(&import.source, path);
        }
    }

    summary.average_complexity = match summary.total_files {
        0 => 0.0,
        n => complexity_sum as f64 / n as f64,
    };

    summary
}

/// Analyse the ECMAScript files of a source tree and aggregate them.
///
/// Other files are not part of the analysis. Files that fail to parse are
/// kept with an empty analysis so they still count towards the totals.
pub fn analyze_project(files: &SourceTree, num_threads: Option<usize>) -> ProjectAnalysis {
    let sources: Vec<SourceFile> = files
        .iter()
        .filter(|(path, _)| is_ecmascript(path))
        .map(|(path, content)| SourceFile::new(path.as_str(), content.as_str()))
        .collect();

    let analysed: BTreeMap<String, FileAnalysis> =
        analyze_files_parallel(&sources, num_threads).into_iter().collect();
    let summary = aggregate(&analysed);

    tracing::info!(
        files = summary.total_files,
        functions = summary.total_functions,
        classes = summary.total_classes,
        "analysed project"
    );

    ProjectAnalysis {
        files: analysed,
        summary,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{FunctionInfo, ImportEntry};

    fn with_imports(sources: &[&str]) -> FileAnalysis {
        FileAnalysis {
            imports: sources.iter().map(|s| ImportEntry::new("x", *s)).collect(),
            ..FileAnalysis::empty()
        }
    }

    #[test]
    fn test_aggregate_empty() {
        let summary = aggregate(&BTreeMap::new());
        assert_eq!(summary.total_files, 0);
        assert_eq!(summary.average_complexity, 0.0);
        assert!(!summary.average_complexity.is_nan());
        assert!(summary.dependencies.is_empty());
    }

    #[test]
    fn test_aggregate_totals() {
        let mut files = BTreeMap::new();
        files.insert(
            "a.ts".to_string(),
            FileAnalysis {
                functions: vec![
                    FunctionInfo {
                        name: "f".into(),
                        params: vec![],
                        complexity: 2,
                        lines: 3,
                    },
                    FunctionInfo {
                        name: "g".into(),
                        params: vec![],
                        complexity: 1,
                        lines: 4,
                    },
                ],
                complexity: 4,
                ..FileAnalysis::empty()
            },
        );
        files.insert("b.ts".to_string(), FileAnalysis::empty());

        let summary = aggregate(&files);
        assert_eq!(summary.total_files, 2);
        assert_eq!(summary.total_functions, 2);
        assert_eq!(summary.total_lines, 7);
        assert_eq!(summary.average_complexity, 2.5);
    }

    #[test]
    fn test_dependencies_distinct_and_stable() {
        let mut files = BTreeMap::new();
        files.insert("b.ts".to_string(), with_imports(&["foo", "foo"]));
        files.insert("a.ts".to_string(), with_imports(&["bar", "foo"]));

        let summary = aggregate(&files);
        assert_eq!(summary.dependencies.get("foo").unwrap(), ["a.ts", "b.ts"]);
        assert_eq!(summary.dependencies.get("bar").unwrap(), ["a.ts"]);
    }

    #[test]
    fn test_dependencies_keep_first_import_order() {
        let mut files = BTreeMap::new();
        files.insert("a.ts".to_string(), with_imports(&["react", "axios"]));
        files.insert("b.ts".to_string(), with_imports(&["zod", "axios", "@app/core"]));

        let summary = aggregate(&files);
        let modules: Vec<&str> = summary.dependencies.iter().map(|(m, _)| m).collect();
        assert_eq!(modules, vec!["react", "axios", "zod", "@app/core"]);
        assert_eq!(summary.dependencies.get("axios").unwrap(), ["a.ts", "b.ts"]);
    }

    #[test]
    fn test_analyze_project_filters_and_degrades() {
        let mut files = SourceTree::new();
        files.insert("ok.js".into(), "import x from 'x';\nfunction f() {}".into());
        files.insert("bad.ts".into(), "function (((".into());
        files.insert("package.json".into(), "{}".into());
        files.insert("README.md".into(), "# x".into());

        let analysis = analyze_project(&files, Some(2));
        assert_eq!(analysis.summary.total_files, 2);
        assert_eq!(analysis.files["bad.ts"], FileAnalysis::empty());
        assert!(!analysis.files.contains_key("package.json"));
        assert_eq!(analysis.summary.dependencies.get("x").unwrap(), ["ok.js"]);
        assert_eq!(analysis.summary.average_complexity, 1.0);
    }
}
