use std::path::Path;

use serde::Serialize;

use crate::walk;

/// Extensions scanned for duplication.
pub const SOURCE_EXTS: &[&str] = &[
    "js", "jsx", "mjs", "cjs", "ts", "tsx", "rs", "py", "go", "java", "kt", "c", "h", "cc",
    "cpp", "hpp", "cs", "rb", "php", "swift",
];

/// Extensions classified (and scanned) as configuration.
pub const CONFIG_EXTS: &[&str] = &["json", "toml", "yaml", "yml", "ini", "cfg", "conf"];

/// Directory names that mark example/demo trees.
const EXAMPLE_DIRS: &[&str] = &["examples", "example", "demo", "demos", "samples"];

/// File classification used to pick duplication-issue thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    Production,
    Test,
    Example,
    Config,
}

/// Whether a path has an extension this tool scans at all.
pub fn is_scanned(path: &Path) -> bool {
    let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
        return false;
    };
    let ext = ext.to_ascii_lowercase();
    SOURCE_EXTS.contains(&ext.as_str()) || CONFIG_EXTS.contains(&ext.as_str())
}

/// Classify a file. Test naming patterns and test directories win over
/// everything else; config extensions win over example directories.
pub fn classify(path: &Path) -> FileType {
    if walk::is_test_file(path) || in_test_dir(path) {
        return FileType::Test;
    }
    if let Some(ext) = path.extension().and_then(|e| e.to_str())
        && CONFIG_EXTS.contains(&ext.to_ascii_lowercase().as_str())
    {
        return FileType::Config;
    }
    if path.components().any(|c| {
        c.as_os_str()
            .to_str()
            .is_some_and(|name| EXAMPLE_DIRS.contains(&name))
    }) {
        return FileType::Example;
    }
    FileType::Production
}

fn in_test_dir(path: &Path) -> bool {
    path.components().any(|c| {
        c.as_os_str()
            .to_str()
            .is_some_and(|name| walk::TEST_DIRS.contains(&name))
    })
}

#[cfg(test)]
#[path = "filetype_test.rs"]
mod tests;
