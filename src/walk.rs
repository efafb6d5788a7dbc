use std::error::Error;
use std::path::Path;

use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::WalkBuilder;

/// Test directory names to skip when test files are excluded.
pub const TEST_DIRS: &[&str] = &["tests", "test", "__tests__", "spec"];

/// Check whether a file matches a test naming pattern for its language.
pub fn is_test_file(path: &Path) -> bool {
    let file_name = match path.file_name().and_then(|n| n.to_str()) {
        Some(n) => n,
        None => return false,
    };

    let Some(dot) = file_name.rfind('.') else {
        return false;
    };
    let ext = &file_name[dot + 1..];
    let base = &file_name[..dot];

    match ext {
        "rs" | "go" => base.ends_with("_test"),
        "py" => base.starts_with("test_") || base.ends_with("_test"),
        "rb" => base.ends_with("_test") || base.ends_with("_spec"),
        "php" => base.ends_with("Test") || base.ends_with("_test"),
        "js" | "jsx" | "mjs" | "cjs" | "ts" | "tsx" => {
            base.ends_with(".test") || base.ends_with(".spec")
        }
        "java" | "kt" | "cs" | "swift" => base.ends_with("Test") || base.ends_with("Tests"),
        "c" => base.ends_with("_test") || base.starts_with("test_"),
        "cc" | "cpp" => {
            base.ends_with("_test") || base.starts_with("test_") || base.ends_with("Test")
        }
        _ => false,
    }
}

/// User-supplied glob patterns that remove files from the analysis.
/// Patterns match against the path relative to the walk root.
pub struct ExcludeFilter {
    globs: Option<GlobSet>,
}

impl ExcludeFilter {
    pub fn new(patterns: &[String]) -> Result<Self, Box<dyn Error>> {
        if patterns.is_empty() {
            return Ok(Self { globs: None });
        }
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            builder.add(Glob::new(pattern).map_err(|e| format!("--exclude {pattern}: {e}"))?);
        }
        Ok(Self {
            globs: Some(builder.build()?),
        })
    }

    pub fn excludes(&self, path: &Path, root: &Path) -> bool {
        let Some(globs) = &self.globs else {
            return false;
        };
        let relative = path.strip_prefix(root).unwrap_or(path);
        globs.is_match(relative)
    }
}

/// Build a directory walker that respects `.gitignore`, skips `.git`,
/// and optionally excludes test directories.
pub fn walk(path: &Path, exclude_tests: bool) -> ignore::Walk {
    WalkBuilder::new(path)
        .hidden(false)
        .follow_links(false)
        .filter_entry(move |entry| {
            if entry.file_type().is_some_and(|ft| ft.is_dir()) {
                if entry.file_name() == ".git" {
                    return false;
                }
                if exclude_tests
                    && let Some(name) = entry.file_name().to_str()
                    && TEST_DIRS.contains(&name)
                {
                    return false;
                }
            }
            true
        })
        .build()
}

#[cfg(test)]
#[path = "walk_test.rs"]
mod tests;
