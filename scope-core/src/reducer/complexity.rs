//! Cyclomatic complexity calculation.
//!
//! Calculates McCabe cyclomatic complexity by counting decision points in
//! the tree-sitter AST. Base complexity is 1; each decision point adds 1.

use once_cell::sync::Lazy;
use std::collections::HashSet;
use tree_sitter::Node;

/// Decision point node types (tree-sitter node names) for the ECMAScript grammars.
static DECISION_POINTS: Lazy<HashSet<&str>> = Lazy::new(|| {
    HashSet::from([
        "if_statement",
        "for_statement",
        "while_statement",
        "do_statement",
        "switch_case",
        "switch_default",
        "ternary_expression",
        "binary_expression", // SPECIAL: check operator
    ])
});

/// Binary operators that count as decision points.
static DECISION_OPERATORS: Lazy<HashSet<&str>> = Lazy::new(|| HashSet::from(["&&", "||", "??"]));

/// Calculate cyclomatic complexity for a tree-sitter node and its subtree.
pub fn calculate_for_node(node: &Node) -> u32 {
    1 + count_decisions(node)
}

fn is_decision_point(node: &Node) -> bool {
    if !DECISION_POINTS.contains(node.kind()) {
        return false;
    }
    if node.kind() == "binary_expression" {
        // Only count if operator is && || or ??
        return node
            .child_by_field_name("operator")
            .map(|op| DECISION_OPERATORS.contains(op.kind()))
            .unwrap_or(false);
    }
    true
}

fn count_decisions(node: &Node) -> u32 {
    let own = u32::from(is_decision_point(node));
    let mut cursor = node.walk();
    node.children(&mut cursor)
        .fold(own, |acc, child| acc.saturating_add(count_decisions(&child)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_tree;

    fn complexity_of(source: &str) -> u32 {
        let tree = parse_tree("test.ts", source).unwrap();
        calculate_for_node(&tree.root_node())
    }

    #[test]
    fn test_simple_complexity() {
        assert_eq!(complexity_of("function foo() { return 1; }"), 1);
    }

    #[test]
    fn test_if_and_logical_and() {
        // 1 (base) + 1 (if) + 1 (&&) = 3
        assert_eq!(complexity_of("function f(a, b) { if (a && b) { return 1; } }"), 3);
    }

    #[test]
    fn test_loops_and_ternary() {
        let source = r#"
function g(xs) {
    for (let i = 0; i < xs.length; i++) {}
    while (xs.length) { xs.pop(); }
    do { xs.push(1); } while (false);
    return xs.length ? 1 : 0;
}
"#;
        // for + while + do + ternary
        assert_eq!(complexity_of(source), 5);
    }

    #[test]
    fn test_switch_cases_including_default() {
        let source = r#"
function h(x) {
    switch (x) {
        case 1: return "a";
        case 2: return "b";
        default: return "c";
    }
}
"#;
        assert_eq!(complexity_of(source), 4);
    }

    #[test]
    fn test_non_logical_binary_ignored() {
        assert_eq!(complexity_of("const x = a + b * c - (d === e ? 1 : 2);"), 2);
    }

    #[test]
    fn test_logical_or_and_nullish() {
        assert_eq!(complexity_of("const x = a || b; const y = c ?? d;"), 3);
    }

    #[test]
    fn test_else_if_counts_each_if() {
        assert_eq!(
            complexity_of("if (a) { x(); } else if (b) { y(); } else { z(); }"),
            3
        );
    }
}
