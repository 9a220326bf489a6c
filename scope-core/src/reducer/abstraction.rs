//! Structural abstracts for files that are not kept verbatim.
//!
//! ECMAScript files that parse cleanly are summarised from the syntax tree.
//! Everything else goes through a line scanner. Both tiers emit commented
//! lines so the abstract can be embedded in a document without being mistaken
//! for runnable code.

use once_cell::sync::Lazy;
use regex::Regex;
use tree_sitter::Node;

use crate::parser::analyzer::{analyze_tree, extract_class, extract_parameters};
use crate::parser::helpers::get_node_text;
use crate::parser::{is_ecmascript, parse_tree};
use crate::types::Abstraction;

/// Marker emitted when neither tier finds anything.
pub const NO_STRUCTURE: &str = "// No structure found";

/// Longest scanned line kept by the fallback tier, in characters.
const MAX_LINE_CHARS: usize = 120;

static IMPORT_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^import\b").unwrap());
static EXPORT_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^export\b").unwrap());
static FUNCTION_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bfunction\b").unwrap());
static ARROW_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"=>").unwrap());
static CLASS_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bclass\b").unwrap());

/// Line kinds recognised by the fallback scanner, in priority order.
static LINE_KINDS: [(&str, &Lazy<Regex>); 5] = [
    ("import", &IMPORT_LINE),
    ("export", &EXPORT_LINE),
    ("function", &FUNCTION_LINE),
    ("arrow", &ARROW_LINE),
    ("class", &CLASS_LINE),
];

/// Produce the structural abstract of one file.
pub fn abstract_file(path: &str, content: &str) -> Abstraction {
    if is_ecmascript(path) {
        match parse_tree(path, content) {
            Ok(tree) => {
                let summary = structured_summary(&tree.root_node(), content);
                return Abstraction::Structured(or_marker(summary));
            }
            Err(e) => tracing::debug!("{}, scanning lines instead", e),
        }
    }

    Abstraction::Fallback(or_marker(scan_lines(content)))
}

fn or_marker(lines: Vec<String>) -> String {
    if lines.is_empty() {
        NO_STRUCTURE.to_string()
    } else {
        lines.join("\n")
    }
}

#[derive(Default)]
struct Outline {
    functions: Vec<String>,
    classes: Vec<String>,
    arrows: Vec<String>,
}

fn structured_summary(root: &Node, source: &str) -> Vec<String> {
    let analysis = analyze_tree(root, source);

    let mut outline = Outline::default();
    let mut cursor = root.walk();
    for child in root.named_children(&mut cursor) {
        let declaration = match child.kind() {
            "export_statement" => child.child_by_field_name("declaration"),
            _ => Some(child),
        };
        if let Some(declaration) = declaration {
            outline_declaration(&declaration, source, &mut outline);
        }
    }

    let imports = analysis
        .imports
        .iter()
        .map(|import| match import.specifiers.as_str() {
            "" => format!("// import '{}'", import.source),
            specifiers => format!("// import {} from '{}'", specifiers, import.source),
        })
        .collect::<Vec<_>>();
    let exports = analysis
        .exports
        .iter()
        .map(|name| format!("// export {}", name))
        .collect::<Vec<_>>();

    let mut lines = Vec::new();
    for (heading, group) in [
        ("// Imports", imports),
        ("// Exports", exports),
        ("// Functions", outline.functions),
        ("// Classes", outline.classes),
        ("// Arrow functions", outline.arrows),
    ] {
        if group.is_empty() {
            continue;
        }
        if !lines.is_empty() {
            lines.push(String::new());
        }
        lines.push(heading.to_string());
        lines.extend(group);
    }
    lines
}

fn outline_declaration(node: &Node, source: &str, outline: &mut Outline) {
    match node.kind() {
        "function_declaration" | "generator_function_declaration" => {
            if let Some(name) = node.child_by_field_name("name") {
                let params = node
                    .child_by_field_name("parameters")
                    .map(|p| extract_parameters(&p, source))
                    .unwrap_or_default();
                outline.functions.push(format!(
                    "// function {}({})",
                    get_node_text(&name, source),
                    params.join(", ")
                ));
            }
        }
        "class_declaration" | "abstract_class_declaration" => {
            if let Some(class) = extract_class(node, source) {
                let methods = class
                    .methods
                    .iter()
                    .map(|m| format!("{}()", m))
                    .collect::<Vec<_>>();
                let line = if methods.is_empty() {
                    format!("// class {} {{}}", class.name)
                } else {
                    format!("// class {} {{ {} }}", class.name, methods.join(", "))
                };
                outline.classes.push(line);
            }
        }
        "lexical_declaration" | "variable_declaration" => {
            let keyword = match node.kind() {
                "variable_declaration" => "var",
                _ => node
                    .child(0)
                    .map(|k| get_node_text(&k, source))
                    .unwrap_or("const"),
            };
            let mut cursor = node.walk();
            for declarator in node.named_children(&mut cursor) {
                if let Some(line) = arrow_line(&declarator, keyword, source) {
                    outline.arrows.push(line);
                }
            }
        }
        _ => {}
    }
}

/// `// const f = (a, b) => {…}` for a declarator bound to an arrow function.
fn arrow_line(declarator: &Node, keyword: &str, source: &str) -> Option<String> {
    if declarator.kind() != "variable_declarator" {
        return None;
    }
    let name = declarator.child_by_field_name("name")?;
    let value = declarator.child_by_field_name("value")?;
    if name.kind() != "identifier" || value.kind() != "arrow_function" {
        return None;
    }

    let params = match value.child_by_field_name("parameters") {
        Some(p) => extract_parameters(&p, source),
        None => value
            .child_by_field_name("parameter")
            .map(|p| vec![get_node_text(&p, source).to_string()])
            .unwrap_or_default(),
    };

    Some(format!(
        "// {} {} = ({}) => {{…}}",
        keyword,
        get_node_text(&name, source),
        params.join(", ")
    ))
}

/// Fallback tier: one comment per line that looks structural.
fn scan_lines(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter_map(|line| {
            let (kind, _) = LINE_KINDS.iter().find(|(_, re)| re.is_match(line))?;
            Some(format!("// {}: {}", kind, truncate(line)))
        })
        .collect()
}

fn truncate(line: &str) -> &str {
    match line.char_indices().nth(MAX_LINE_CHARS) {
        Some((idx, _)) => &line[..idx],
        None => line,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structured_groups() {
        let source = r#"
import React from 'react';
import './index.css';
export const add = (a, b) => a + b;
export function render(el: HTMLElement) {}
class Widget { mount() {} unmount() {} }
const noop = () => {};
"#;
        let result = abstract_file("src/widget.ts", source);
        assert!(!result.is_fallback());
        let expected = "// Imports\n\
                        // import React from 'react'\n\
                        // import './index.css'\n\
                        \n\
                        // Exports\n\
                        // export add\n\
                        // export render\n\
                        \n\
                        // Functions\n\
                        // function render(el)\n\
                        \n\
                        // Classes\n\
                        // class Widget { mount(), unmount() }\n\
                        \n\
                        // Arrow functions\n\
                        // const add = (a, b) => {…}\n\
                        // const noop = () => {…}";
        assert_eq!(result.summary(), expected);
    }

    #[test]
    fn test_nested_functions_not_listed() {
        let source = "function outer() { function inner() {} }";
        let result = abstract_file("a.js", source);
        assert_eq!(result.summary(), "// Functions\n// function outer()");
    }

    #[test]
    fn test_single_param_arrow() {
        let result = abstract_file("a.js", "let double = x => x * 2;");
        assert_eq!(
            result.summary(),
            "// Arrow functions\n// let double = (x) => {…}"
        );
    }

    #[test]
    fn test_empty_class() {
        let result = abstract_file("a.ts", "export class Empty {}");
        assert!(result.summary().contains("// class Empty {}"));
    }

    #[test]
    fn test_no_structure_marker() {
        let result = abstract_file("a.ts", "const x = 1;\n");
        assert_eq!(result, Abstraction::Structured(NO_STRUCTURE.to_string()));

        let result = abstract_file("notes.txt", "");
        assert_eq!(result, Abstraction::Fallback(NO_STRUCTURE.to_string()));
    }

    #[test]
    fn test_fallback_for_other_languages() {
        let source = "import os\nclass Foo:\n    pass\nx = 1\n";
        let result = abstract_file("tool.py", source);
        assert!(result.is_fallback());
        assert_eq!(result.summary(), "// import: import os\n// class: class Foo:");
    }

    #[test]
    fn test_fallback_on_parse_failure() {
        let source = "import a from 'a';\nfunction broken( {\nconst f = () => 1;\n";
        let result = abstract_file("broken.js", source);
        assert!(result.is_fallback());
        assert_eq!(
            result.summary(),
            "// import: import a from 'a';\n\
             // function: function broken( {\n\
             // arrow: const f = () => 1;"
        );
    }

    #[test]
    fn test_fallback_kind_priority() {
        let result = abstract_file("x.vue", "export default function setup() {}");
        assert_eq!(
            result.summary(),
            "// export: export default function setup() {}"
        );
    }

    #[test]
    fn test_fallback_truncates_long_lines() {
        let line = format!("function {}", "x".repeat(300));
        let result = abstract_file("long.rb", &line);
        let summary = result.summary();
        let body = summary.trim_start_matches("// function: ");
        assert_eq!(body.chars().count(), MAX_LINE_CHARS);
    }

    #[test]
    fn test_never_empty() {
        for (path, content) in [("a.ts", ""), ("b.md", "# Title"), ("c.js", "1 +")] {
            assert!(!abstract_file(path, content).summary().is_empty());
        }
    }
}
