//! Combined structure document.
//!
//! Concatenates the tree, key files, abstracts and configs of a
//! `ProjectStructure`, followed by the analysis report.

use crate::types::ProjectStructure;

/// Render the structure sections followed by `report`.
pub fn render(structure: &ProjectStructure, report: &str) -> String {
    let mut out = render_structure(structure);
    out.push_str(report);
    out
}

/// Render only the structure sections.
pub fn render_structure(structure: &ProjectStructure) -> String {
    let mut out = String::new();

    out.push_str("项目结构:\n");
    out.push_str(&structure.tree);
    out.push('\n');

    out.push_str("关键文件:\n");
    for (path, content) in &structure.key_files {
        entry(&mut out, path, content);
    }

    out.push_str("文件摘要:\n");
    for (path, summary) in &structure.abstract_files {
        entry(&mut out, path, summary);
    }

    out.push_str("配置文件:\n");
    for (path, config) in &structure.configs {
        entry(&mut out, path, &config.to_display_string());
    }

    out
}

fn entry(out: &mut String, path: &str, body: &str) {
    out.push_str(&format!("=== {} ===\n", path));
    out.push_str(body);
    if !body.ends_with('\n') {
        out.push('\n');
    }
    out.push('\n');
}
