//! Path classification.
//!
//! Paths are matched against an ordered list of key-file rules covering
//! entry points, build manifests and framework conventions of several
//! ecosystems. The first matching rule wins. Paths that match no key-file
//! rule and end in `.json` are config files; everything else is "other".

use once_cell::sync::Lazy;
use regex::Regex;

use crate::types::FileCategory;

/// A named key-file pattern.
pub struct KeyFileRule {
    pub name: &'static str,
    pub regex: &'static Lazy<Regex>,
}

static PACKAGE_MANIFEST: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(^|/)(package|composer)\.json$").unwrap());
static JS_ENTRY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(^|/)(index|main|app|App|server)\.(js|jsx|ts|tsx|mjs|cjs)$").unwrap()
});
static FRAMEWORK_CONFIG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(^|/)(vite|webpack|rollup|next|nuxt|svelte|astro|tailwind|postcss|babel|jest|vitest)\.config\.(js|ts|mjs|cjs)$",
    )
    .unwrap()
});
static FRAMEWORK_CONVENTION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(^|/)(pages/_(app|document)|app/(layout|page))\.(js|jsx|ts|tsx)$").unwrap()
});
static HTML_ENTRY: Lazy<Regex> = Lazy::new(|| Regex::new(r"(^|/)index\.html?$").unwrap());
static RUST_MANIFEST: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(^|/)(Cargo\.toml|src/main\.rs|src/lib\.rs)$").unwrap());
static PYTHON_ENTRY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(^|/)(setup\.py|pyproject\.toml|requirements\.txt|manage\.py|__main__\.py|main\.py|app\.py)$",
    )
    .unwrap()
});
static GO_ENTRY: Lazy<Regex> = Lazy::new(|| Regex::new(r"(^|/)(go\.mod|main\.go)$").unwrap());
static JVM_BUILD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(^|/)(pom\.xml|(build|settings)\.gradle(\.kts)?|[A-Za-z0-9_]*Application\.java|Main\.java)$",
    )
    .unwrap()
});
static RUBY_PHP_ENTRY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(^|/)(Gemfile|Rakefile|config\.ru|index\.php)$").unwrap());
static BUILD_FILE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(^|/)(Dockerfile|Makefile|CMakeLists\.txt|docker-compose\.ya?ml)$").unwrap()
});
static ROOT_README: Lazy<Regex> = Lazy::new(|| Regex::new(r"^README\.md$").unwrap());

static CONFIG_SUFFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\.json$").unwrap());

/// Key-file rules in priority order.
pub static KEY_FILE_RULES: &[KeyFileRule] = &[
    KeyFileRule {
        name: "package-manifest",
        regex: &PACKAGE_MANIFEST,
    },
    KeyFileRule {
        name: "js-entry",
        regex: &JS_ENTRY,
    },
    KeyFileRule {
        name: "framework-config",
        regex: &FRAMEWORK_CONFIG,
    },
    KeyFileRule {
        name: "framework-convention",
        regex: &FRAMEWORK_CONVENTION,
    },
    KeyFileRule {
        name: "html-entry",
        regex: &HTML_ENTRY,
    },
    KeyFileRule {
        name: "rust",
        regex: &RUST_MANIFEST,
    },
    KeyFileRule {
        name: "python",
        regex: &PYTHON_ENTRY,
    },
    KeyFileRule {
        name: "go",
        regex: &GO_ENTRY,
    },
    KeyFileRule {
        name: "jvm",
        regex: &JVM_BUILD,
    },
    KeyFileRule {
        name: "ruby-php",
        regex: &RUBY_PHP_ENTRY,
    },
    KeyFileRule {
        name: "build",
        regex: &BUILD_FILE,
    },
    KeyFileRule {
        name: "readme",
        regex: &ROOT_README,
    },
];

/// Name of the first key-file rule matching `path`, if any.
pub fn matching_rule(path: &str) -> Option<&'static str> {
    KEY_FILE_RULES
        .iter()
        .find(|rule| rule.regex.is_match(path))
        .map(|rule| rule.name)
}

/// Classify a path. Total: every path gets exactly one category.
pub fn classify(path: &str) -> FileCategory {
    if matching_rule(path).is_some() {
        FileCategory::KeyFile
    } else if CONFIG_SUFFIX.is_match(path) {
        FileCategory::ConfigFile
    } else {
        FileCategory::OtherFile
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_package_json_is_key_file() {
        assert_eq!(classify("package.json"), FileCategory::KeyFile);
        assert_eq!(classify("packages/web/package.json"), FileCategory::KeyFile);
        assert_eq!(matching_rule("package.json"), Some("package-manifest"));
    }

    #[test]
    fn test_unmatched_json_is_config() {
        assert_eq!(classify("foo.json"), FileCategory::ConfigFile);
        assert_eq!(classify("config/tsconfig.json"), FileCategory::ConfigFile);
        assert_eq!(matching_rule("foo.json"), None);
    }

    #[test]
    fn test_entry_points() {
        assert_eq!(classify("src/App.tsx"), FileCategory::KeyFile);
        assert_eq!(classify("src/index.js"), FileCategory::KeyFile);
        assert_eq!(classify("server.ts"), FileCategory::KeyFile);
        assert_eq!(classify("vite.config.ts"), FileCategory::KeyFile);
        assert_eq!(classify("app/layout.tsx"), FileCategory::KeyFile);
        assert_eq!(classify("pages/_app.jsx"), FileCategory::KeyFile);
    }

    #[test]
    fn test_other_ecosystems() {
        assert_eq!(classify("Cargo.toml"), FileCategory::KeyFile);
        assert_eq!(classify("crates/x/src/lib.rs"), FileCategory::KeyFile);
        assert_eq!(classify("go.mod"), FileCategory::KeyFile);
        assert_eq!(classify("pyproject.toml"), FileCategory::KeyFile);
        assert_eq!(classify("api/pom.xml"), FileCategory::KeyFile);
        assert_eq!(
            classify("src/main/java/com/acme/DemoApplication.java"),
            FileCategory::KeyFile
        );
        assert_eq!(classify("Dockerfile"), FileCategory::KeyFile);
        assert_eq!(matching_rule("build.gradle.kts"), Some("jvm"));
    }

    #[test]
    fn test_readme_only_at_root() {
        assert_eq!(classify("README.md"), FileCategory::KeyFile);
        assert_eq!(classify("docs/README.md"), FileCategory::OtherFile);
    }

    #[test]
    fn test_other_files() {
        assert_eq!(classify("src/components/Button.tsx"), FileCategory::OtherFile);
        assert_eq!(classify("src/styles.css"), FileCategory::OtherFile);
        assert_eq!(classify("notes.jsonc"), FileCategory::OtherFile);
        assert_eq!(classify("myindex.js"), FileCategory::OtherFile);
        assert_eq!(classify(""), FileCategory::OtherFile);
    }

    #[test]
    fn test_rule_order_is_stable() {
        let names: Vec<_> = KEY_FILE_RULES.iter().map(|r| r.name).collect();
        assert_eq!(names.first(), Some(&"package-manifest"));
        assert_eq!(names.len(), 12);
    }
}
