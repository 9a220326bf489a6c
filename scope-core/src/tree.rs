//! File tree rendering.
//!
//! Renders a set of slash-separated paths as an indented tree, one line per
//! path segment, using box-drawing connectors:
//!
//! ```text
//! ├── package.json
//! └── src
//!   ├── App.tsx
//!   └── main.tsx
//! ```

use std::collections::BTreeSet;

/// Tree branch characters.
struct TreeChars {
    /// Branch for non-last items (|-)
    branch: &'static str,
    /// Branch for last item in a level (L-)
    last: &'static str,
    /// Indentation per depth level
    indent: &'static str,
}

impl TreeChars {
    const UNICODE: TreeChars = TreeChars {
        branch: "\u{251c}\u{2500}\u{2500} ", // |--
        last: "\u{2514}\u{2500}\u{2500} ",   // L--
        indent: "  ",
    };
}

/// Render paths as a tree. Output is identical for identical input sets.
pub fn render<I, S>(paths: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let sorted: Vec<String> = paths
        .into_iter()
        .map(|p| p.as_ref().to_string())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let split: Vec<Vec<&str>> = sorted.iter().map(|p| p.split('/').collect()).collect();
    let chars = &TreeChars::UNICODE;
    let mut out = String::new();

    for (index, segments) in split.iter().enumerate() {
        let common = match index {
            0 => 0,
            _ => common_prefix_len(&split[index - 1], segments),
        };

        for depth in common..segments.len() {
            let connector = if is_last_sibling(&split, index, depth) {
                chars.last
            } else {
                chars.branch
            };
            out.push_str(&chars.indent.repeat(depth));
            out.push_str(connector);
            out.push_str(segments[depth]);
            out.push('\n');
        }
    }

    out
}

/// Number of leading segments two paths share.
fn common_prefix_len(a: &[&str], b: &[&str]) -> usize {
    a.iter().zip(b.iter()).take_while(|(x, y)| x == y).count()
}

/// Whether the segment at `depth` of path `index` is the last entry under its
/// parent. Paths sharing a parent prefix are contiguous once sorted, so the
/// block ends at the first later path with a different prefix.
fn is_last_sibling(split: &[Vec<&str>], index: usize, depth: usize) -> bool {
    let current = &split[index];
    let parent = &current[..depth];
    let segment = current[depth];

    split[index + 1..]
        .iter()
        .take_while(|other| other.len() > depth && other[..depth] == *parent)
        .all(|other| other[depth] == segment)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        assert_eq!(render(Vec::<String>::new()), "");
    }

    #[test]
    fn test_single_file() {
        assert_eq!(render(["README.md"]), "\u{2514}\u{2500}\u{2500} README.md\n");
    }

    #[test]
    fn test_nested_layout() {
        let output = render(["src/main.tsx", "package.json", "src/App.tsx"]);
        let expected = "├── package.json\n\
                        └── src\n\
                        \x20 ├── App.tsx\n\
                        \x20 └── main.tsx\n";
        assert_eq!(output, expected);
    }

    #[test]
    fn test_last_sibling_recomputed_per_segment() {
        let output = render(["a/x.ts", "a/y/z.ts", "b.ts"]);
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(
            lines,
            vec![
                "├── a",
                "  ├── x.ts",
                "  └── y",
                "    └── z.ts",
                "└── b.ts",
            ]
        );
    }

    #[test]
    fn test_deterministic_regardless_of_input_order() {
        let a = render(["src/b.ts", "src/a.ts", "lib/c.ts"]);
        let b = render(["lib/c.ts", "src/a.ts", "src/b.ts"]);
        assert_eq!(a, b);
    }

    #[test]
    fn test_one_line_per_leaf() {
        let paths = ["src/a/b/c.ts", "src/a/d.ts", "src/e.ts", "f.json"];
        let output = render(paths);
        for path in paths {
            let leaf = path.rsplit('/').next().unwrap();
            let count = output.lines().filter(|l| l.ends_with(leaf)).count();
            assert_eq!(count, 1, "leaf {} rendered {} times", leaf, count);
        }
        assert!(output.ends_with('\n'));
    }

    #[test]
    fn test_segment_prefix_not_string_prefix() {
        let output = render(["a/x.ts", "ab/y.ts"]);
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines, vec!["├── a", "  └── x.ts", "└── ab", "  └── y.ts"]);
    }
}
