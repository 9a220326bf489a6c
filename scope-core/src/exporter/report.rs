//! Plain-text analysis report.

use std::collections::BTreeMap;

use crate::types::{FileAnalysis, ProjectAnalysis, ProjectSummary};

const TITLE_RULE: usize = 50;
const SECTION_RULE: usize = 20;

/// Render the report for a summary and the per-file analyses it was built from.
///
/// Files appear in map order. Function and class sections are omitted for
/// files without any; the file header is always present.
pub fn render(summary: &ProjectSummary, files: &BTreeMap<String, FileAnalysis>) -> String {
    let mut out = String::new();

    out.push_str("代码分析报告\n");
    out.push_str(&"=".repeat(TITLE_RULE));
    out.push_str("\n\n");

    section(&mut out, "项目概览:");
    out.push_str(&format!("总文件数: {}\n", summary.total_files));
    out.push_str(&format!("总函数数: {}\n", summary.total_functions));
    out.push_str(&format!("总类数: {}\n", summary.total_classes));
    out.push_str(&format!("总代码行数: {}\n", summary.total_lines));
    out.push_str(&format!("平均复杂度: {:.2}\n\n", summary.average_complexity));

    section(&mut out, "依赖关系:");
    for (module, importers) in summary.dependencies.iter() {
        out.push_str(&format!("{} 被以下文件引用:\n", module));
        for path in importers {
            out.push_str(&format!("  - {}\n", path));
        }
    }
    out.push('\n');

    section(&mut out, "文件详细分析:");
    for (path, analysis) in files {
        render_file(&mut out, path, analysis);
    }

    out
}

/// Render the report for a complete project analysis.
pub fn render_analysis(analysis: &ProjectAnalysis) -> String {
    render(&analysis.summary, &analysis.files)
}

fn section(out: &mut String, title: &str) {
    out.push_str(title);
    out.push('\n');
    out.push_str(&"-".repeat(SECTION_RULE));
    out.push('\n');
}

fn render_file(out: &mut String, path: &str, analysis: &FileAnalysis) {
    out.push_str(&format!("\n文件: {}\n", path));
    out.push_str(&format!("复杂度: {}\n", analysis.complexity));

    if !analysis.functions.is_empty() {
        out.push_str("\n函数:\n");
        for func in &analysis.functions {
            out.push_str(&format!("  {}:\n", func.name));
            out.push_str(&format!("    参数: {}\n", func.params.join(", ")));
            out.push_str(&format!("    复杂度: {}\n", func.complexity));
            out.push_str(&format!("    行数: {}\n", func.lines));
        }
    }

    if !analysis.classes.is_empty() {
        out.push_str("\n类:\n");
        for class in &analysis.classes {
            out.push_str(&format!("  {}:\n", class.name));
            out.push_str(&format!("    方法: {}\n", class.methods.join(", ")));
            out.push_str(&format!("    属性: {}\n", class.properties.join(", ")));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::summary::aggregate;
    use crate::types::{ClassInfo, FunctionInfo, ImportEntry};

    #[test]
    fn test_empty_report() {
        let files = BTreeMap::new();
        let report = render(&aggregate(&files), &files);
        let expected = format!(
            "代码分析报告\n{}\n\n项目概览:\n{}\n总文件数: 0\n总函数数: 0\n总类数: 0\n总代码行数: 0\n平均复杂度: 0.00\n\n依赖关系:\n{}\n\n文件详细分析:\n{}\n",
            "=".repeat(50),
            "-".repeat(20),
            "-".repeat(20),
            "-".repeat(20),
        );
        assert_eq!(report, expected);
    }

    #[test]
    fn test_file_blocks() {
        let mut files = BTreeMap::new();
        files.insert(
            "src/a.ts".to_string(),
            FileAnalysis {
                imports: vec![ImportEntry::new("{ x }", "./x")],
                functions: vec![FunctionInfo {
                    name: "run".into(),
                    params: vec!["a".into(), "b".into()],
                    complexity: 2,
                    lines: 5,
                }],
                classes: vec![ClassInfo {
                    name: "Box".into(),
                    methods: vec!["open".into(), "close".into()],
                    properties: vec!["size".into()],
                }],
                complexity: 3,
                ..FileAnalysis::empty()
            },
        );
        files.insert("src/b.ts".to_string(), FileAnalysis::empty());

        let report = render(&aggregate(&files), &files);

        assert!(report.contains("平均复杂度: 2.00\n"));
        assert!(report.contains("./x 被以下文件引用:\n  - src/a.ts\n"));
        assert!(report.contains(
            "\n文件: src/a.ts\n复杂度: 3\n\n函数:\n  run:\n    参数: a, b\n    复杂度: 2\n    行数: 5\n\n类:\n  Box:\n    方法: open, close\n    属性: size\n"
        ));
        assert!(report.ends_with("\n文件: src/b.ts\n复杂度: 1\n"));
    }

    #[test]
    fn test_average_two_decimals() {
        let summary = ProjectSummary {
            total_files: 3,
            average_complexity: 4.0 / 3.0,
            ..Default::default()
        };
        let report = render(&summary, &BTreeMap::new());
        assert!(report.contains("平均复杂度: 1.33\n"));
    }
}
