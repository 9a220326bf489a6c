//! Project structure assembly.
//!
//! Classifies every path, renders the tree, and fills the three content maps.
//! Per-file work runs on rayon; results are merged into the maps after the
//! join, so no map is ever shared between workers.

use rayon::prelude::*;

use crate::classifier::classify;
use crate::parser::build_pool;
use crate::reducer::abstract_file;
use crate::tree;
use crate::types::{ConfigEntry, FileCategory, ProjectStructure, SourceTree};

/// Content produced for a single path.
enum Placed {
    Key(String),
    Abstract(String),
    Config(ConfigEntry),
}

/// Build the project structure using the global rayon pool.
pub fn build_structure(files: &SourceTree) -> ProjectStructure {
    build_structure_with(files, None)
}

/// Build the project structure, optionally on a dedicated pool of
/// `num_threads` workers.
pub fn build_structure_with(files: &SourceTree, num_threads: Option<usize>) -> ProjectStructure {
    let entries: Vec<(&String, &String)> = files.iter().collect();

    let place = |(path, content): &(&String, &String)| -> (String, Placed) {
        let category = classify(path);
        tracing::debug!(path = path.as_str(), %category, "classified");
        let placed = match category {
            FileCategory::KeyFile => Placed::Key(content.to_string()),
            FileCategory::ConfigFile => Placed::Config(ConfigEntry::parse(content)),
            FileCategory::OtherFile => {
                let abstraction = abstract_file(path, content);
                if abstraction.is_fallback() {
                    tracing::debug!(path = path.as_str(), "fallback abstract");
                }
                Placed::Abstract(abstraction.into_summary())
            }
        };
        (path.to_string(), placed)
    };

    let placed: Vec<(String, Placed)> = match build_pool(num_threads) {
        Some(pool) => pool.install(|| entries.par_iter().map(place).collect()),
        None => entries.par_iter().map(place).collect(),
    };

    let mut structure = ProjectStructure {
        tree: tree::render(files.keys()),
        ..Default::default()
    };
    for (path, content) in placed {
        match content {
            Placed::Key(text) => {
                structure.key_files.insert(path, text);
            }
            Placed::Abstract(summary) => {
                structure.abstract_files.insert(path, summary);
            }
            Placed::Config(entry) => {
                structure.configs.insert(path, entry);
            }
        }
    }

    tracing::info!(
        key_files = structure.key_files.len(),
        abstract_files = structure.abstract_files.len(),
        configs = structure.configs.len(),
        "built project structure"
    );

    structure
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reducer::abstraction::NO_STRUCTURE;

    fn tree_of(entries: &[(&str, &str)]) -> SourceTree {
        entries
            .iter()
            .map(|(p, c)| (p.to_string(), c.to_string()))
            .collect()
    }

    #[test]
    fn test_partition() {
        let files = tree_of(&[
            ("package.json", r#"{"name":"x"}"#),
            ("src/App.tsx", "export default function App() {}"),
            ("src/util.ts", "export const x = 1;"),
            ("tsconfig.json", "{ not json"),
            ("docs/guide.md", "# Guide"),
        ]);
        let structure = build_structure(&files);

        assert_eq!(structure.len(), files.len());
        for path in files.keys() {
            let hits = [
                structure.key_files.contains_key(path),
                structure.abstract_files.contains_key(path),
                structure.configs.contains_key(path),
            ]
            .iter()
            .filter(|hit| **hit)
            .count();
            assert_eq!(hits, 1, "{} placed {} times", path, hits);
        }

        assert_eq!(structure.category_of("package.json"), Some(FileCategory::KeyFile));
        assert_eq!(structure.category_of("src/App.tsx"), Some(FileCategory::KeyFile));
        assert_eq!(structure.category_of("src/util.ts"), Some(FileCategory::OtherFile));
        assert_eq!(structure.category_of("tsconfig.json"), Some(FileCategory::ConfigFile));
    }

    #[test]
    fn test_contents() {
        let files = tree_of(&[
            ("src/main.ts", "console.log(1);"),
            ("data.json", r#"{"a": [1, 2]}"#),
            ("broken.json", "{"),
            ("notes.txt", "hello"),
        ]);
        let structure = build_structure_with(&files, Some(2));

        assert_eq!(structure.key_files["src/main.ts"], "console.log(1);");
        assert_eq!(
            structure.configs["data.json"],
            ConfigEntry::Json(serde_json::json!({"a": [1, 2]}))
        );
        assert_eq!(structure.configs["broken.json"], ConfigEntry::Raw("{".to_string()));
        assert_eq!(structure.abstract_files["notes.txt"], NO_STRUCTURE);
        assert!(structure.tree.contains("main.ts"));
    }

    #[test]
    fn test_empty_input() {
        let structure = build_structure(&SourceTree::new());
        assert!(structure.is_empty());
        assert_eq!(structure.tree, "");
    }
}
