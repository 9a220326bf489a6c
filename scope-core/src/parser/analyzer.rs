//! Per-file source analysis for TypeScript/JavaScript.
//!
//! One recursive-descent walk over the syntax tree collects imports,
//! exports, functions, classes and top-level variables into an `Inventory`,
//! which is then frozen into a `FileAnalysis`.

use tree_sitter::Node;

use super::helpers::{
    collapse_whitespace, get_node_text, has_child_of_type, line_span, push_unique, unquote,
};
use super::{is_ecmascript, parse_tree};
use crate::error::Result;
use crate::reducer::complexity;
use crate::types::{ClassInfo, FileAnalysis, FunctionInfo, ImportEntry};

/// Placeholder recorded for parameters that are not plain identifiers.
pub const UNKNOWN_PARAM: &str = "unknown";

/// Sentinel recorded for `export default ...`.
pub const DEFAULT_EXPORT: &str = "default";

/// Analyse ECMAScript-family source.
///
/// `path` selects the grammar and is used in diagnostics. Returns
/// `ParseFailed` when the source does not parse cleanly.
pub fn analyze(path: &str, source: &str) -> Result<FileAnalysis> {
    let tree = parse_tree(path, source)?;
    Ok(analyze_tree(&tree.root_node(), source))
}

/// Analyse an already parsed program node.
pub(crate) fn analyze_tree(root: &Node, source: &str) -> FileAnalysis {
    let mut inventory = Inventory::default();
    walk(root, source, true, &mut inventory);
    inventory.finish(complexity::calculate_for_node(root))
}

/// Analyse any file without failing.
///
/// Non-ECMAScript files get a placeholder analysis; files that fail to parse
/// get an empty one (complexity 1) so the batch carries on.
pub fn analyze_file(path: &str, source: &str) -> FileAnalysis {
    if !is_ecmascript(path) {
        tracing::debug!(path, "not ECMAScript, using placeholder analysis");
        return FileAnalysis::placeholder(path);
    }

    match analyze(path, source) {
        Ok(analysis) => {
            tracing::debug!(
                path,
                functions = analysis.functions.len(),
                classes = analysis.classes.len(),
                complexity = analysis.complexity,
                "analyzed"
            );
            analysis
        }
        Err(e) => {
            tracing::warn!("{}", e);
            FileAnalysis::empty()
        }
    }
}

#[derive(Default)]
struct Inventory {
    imports: Vec<ImportEntry>,
    exports: Vec<String>,
    functions: Vec<FunctionInfo>,
    classes: Vec<ClassInfo>,
    variables: Vec<String>,
}

impl Inventory {
    fn finish(self, complexity: u32) -> FileAnalysis {
        FileAnalysis {
            imports: self.imports,
            exports: self.exports,
            functions: self.functions,
            classes: self.classes,
            variables: self.variables,
            complexity,
        }
    }
}

/// Visit `node` and its descendants in source order.
///
/// `top_level` is true for direct children of the program node (and the
/// declaration inside a top-level `export`).
fn walk(node: &Node, source: &str, top_level: bool, inv: &mut Inventory) {
    let mut children_top_level = false;

    match node.kind() {
        "program" => children_top_level = true,
        "import_statement" => {
            if let Some(import) = extract_import(node, source) {
                inv.imports.push(import);
            }
        }
        "export_statement" => {
            extract_export(node, source, inv);
            children_top_level = top_level;
        }
        "function_declaration" | "generator_function_declaration" => {
            if let Some(function) = extract_function(node, source) {
                inv.functions.push(function);
            }
        }
        "class_declaration" | "abstract_class_declaration" => {
            if let Some(class) = extract_class(node, source) {
                inv.classes.push(class);
            }
        }
        "lexical_declaration" | "variable_declaration" if top_level => {
            for name in declarator_names(node, source) {
                push_unique(&mut inv.variables, &name);
            }
        }
        _ => {}
    }

    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        walk(&child, source, children_top_level, inv);
    }
}

/// Extract an import statement.
fn extract_import(node: &Node, source: &str) -> Option<ImportEntry> {
    let module = node.child_by_field_name("source")?;
    let specifiers = {
        let mut cursor = node.walk();
        let clause = node
            .named_children(&mut cursor)
            .find(|c| c.kind() == "import_clause");
        clause
            .map(|c| collapse_whitespace(get_node_text(&c, source)))
            .unwrap_or_default()
    };

    Some(ImportEntry::new(
        specifiers,
        unquote(get_node_text(&module, source)),
    ))
}

/// Record exported names, and re-exports as imports.
fn extract_export(node: &Node, source: &str, inv: &mut Inventory) {
    if let Some(module) = node.child_by_field_name("source") {
        inv.imports.push(ImportEntry::new(
            reexport_specifiers(node, source),
            unquote(get_node_text(&module, source)),
        ));
    }

    if has_child_of_type(node, "default") {
        push_unique(&mut inv.exports, DEFAULT_EXPORT);
        return;
    }

    if let Some(declaration) = node.child_by_field_name("declaration") {
        match declaration.kind() {
            "lexical_declaration" | "variable_declaration" => {
                for name in declarator_names(&declaration, source) {
                    push_unique(&mut inv.exports, &name);
                }
            }
            "function_declaration"
            | "generator_function_declaration"
            | "class_declaration"
            | "abstract_class_declaration" => {
                if let Some(name) = declaration.child_by_field_name("name") {
                    push_unique(&mut inv.exports, get_node_text(&name, source));
                }
            }
            _ => {}
        }
        return;
    }

    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        if child.kind() == "export_clause" {
            let mut inner = child.walk();
            for spec in child.named_children(&mut inner) {
                if spec.kind() != "export_specifier" {
                    continue;
                }
                let exported = spec
                    .child_by_field_name("alias")
                    .or_else(|| spec.child_by_field_name("name"));
                if let Some(exported) = exported {
                    push_unique(&mut inv.exports, &unquote(get_node_text(&exported, source)));
                }
            }
        }
    }
}

/// Specifier summary for `export ... from '...'`.
fn reexport_specifiers(node: &Node, source: &str) -> String {
    let mut cursor = node.walk();
    let summary = node
        .named_children(&mut cursor)
        .find(|c| matches!(c.kind(), "export_clause" | "namespace_export"))
        .map(|c| collapse_whitespace(get_node_text(&c, source)));
    summary.unwrap_or_else(|| "*".to_string())
}

/// Identifier names bound by the declarators of a variable declaration.
/// Destructuring patterns bind nothing here.
fn declarator_names(node: &Node, source: &str) -> Vec<String> {
    let mut names = Vec::new();
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        if child.kind() != "variable_declarator" {
            continue;
        }
        if let Some(name) = child.child_by_field_name("name") {
            if name.kind() == "identifier" {
                names.push(get_node_text(&name, source).to_string());
            }
        }
    }
    names
}

/// Extract a named function declaration.
fn extract_function(node: &Node, source: &str) -> Option<FunctionInfo> {
    let name = node.child_by_field_name("name")?;
    let params = node
        .child_by_field_name("parameters")
        .map(|p| extract_parameters(&p, source))
        .unwrap_or_default();

    Some(FunctionInfo {
        name: get_node_text(&name, source).to_string(),
        params,
        complexity: complexity::calculate_for_node(node),
        lines: line_span(node),
    })
}

/// Extract parameter names from `formal_parameters`.
pub(crate) fn extract_parameters(node: &Node, source: &str) -> Vec<String> {
    let mut params = Vec::new();

    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        match child.kind() {
            "comment" | "decorator" => {}
            "identifier" => params.push(get_node_text(&child, source).to_string()),
            "required_parameter" | "optional_parameter" => {
                let pattern = child.child_by_field_name("pattern");
                let has_default = child.child_by_field_name("value").is_some();
                match pattern {
                    Some(p) if p.kind() == "identifier" && !has_default => {
                        params.push(get_node_text(&p, source).to_string())
                    }
                    _ => params.push(UNKNOWN_PARAM.to_string()),
                }
            }
            _ => params.push(UNKNOWN_PARAM.to_string()),
        }
    }

    params
}

/// Extract a named class declaration and its directly declared members.
pub(crate) fn extract_class(node: &Node, source: &str) -> Option<ClassInfo> {
    let name = node.child_by_field_name("name")?;
    let mut class = ClassInfo {
        name: get_node_text(&name, source).to_string(),
        ..Default::default()
    };

    if let Some(body) = node.child_by_field_name("body") {
        let mut cursor = body.walk();
        for member in body.named_children(&mut cursor) {
            match member.kind() {
                "method_definition" => {
                    if let Some(key) = plain_member_name(&member, &["name"], source) {
                        push_unique(&mut class.methods, key);
                    }
                }
                "field_definition" | "public_field_definition" => {
                    if let Some(key) = plain_member_name(&member, &["property", "name"], source) {
                        push_unique(&mut class.properties, key);
                    }
                }
                _ => {}
            }
        }
    }

    Some(class)
}

/// Member key text when it is a plain identifier (not private, computed or quoted).
fn plain_member_name<'a>(member: &Node, fields: &[&str], source: &'a str) -> Option<&'a str> {
    fields
        .iter()
        .find_map(|field| member.child_by_field_name(field))
        .filter(|key| key.kind() == "property_identifier")
        .map(|key| get_node_text(&key, source))
}
