use std::fs;
use std::path::Path;

use tempfile::tempdir;

use super::*;

// ── is_test_file ───────────────────────────────────────────────────────

#[test]
fn test_file_rust_and_go() {
    assert!(is_test_file(Path::new("parser_test.rs")));
    assert!(is_test_file(Path::new("parser_test.go")));
    assert!(!is_test_file(Path::new("parser.rs")));
    assert!(!is_test_file(Path::new("test.rs"))); // no _test suffix
}

#[test]
fn test_file_python_and_ruby() {
    assert!(is_test_file(Path::new("test_parser.py")));
    assert!(is_test_file(Path::new("parser_test.py")));
    assert!(is_test_file(Path::new("parser_spec.rb")));
    assert!(!is_test_file(Path::new("parser.py")));
}

#[test]
fn test_file_javascript_family() {
    assert!(is_test_file(Path::new("parser.test.js")));
    assert!(is_test_file(Path::new("parser.spec.tsx")));
    assert!(!is_test_file(Path::new("parser.js")));
}

#[test]
fn test_file_pascal_case_suffixes() {
    assert!(is_test_file(Path::new("ParserTest.java")));
    assert!(is_test_file(Path::new("ParserTests.cs")));
    assert!(is_test_file(Path::new("ParserTest.kt")));
    assert!(!is_test_file(Path::new("Parser.java")));
}

#[test]
fn test_file_c_family() {
    assert!(is_test_file(Path::new("parser_test.c")));
    assert!(is_test_file(Path::new("test_parser.cpp")));
    assert!(!is_test_file(Path::new("parser.c")));
}

#[test]
fn test_file_no_extension() {
    assert!(!is_test_file(Path::new("Makefile")));
    assert!(!is_test_file(Path::new("README")));
}

// ── ExcludeFilter ──────────────────────────────────────────────────────

#[test]
fn empty_filter_excludes_nothing() {
    let f = ExcludeFilter::new(&[]).unwrap();
    assert!(!f.excludes(Path::new("a.ts"), Path::new("")));
}

#[test]
fn glob_matches_relative_path() {
    let f = ExcludeFilter::new(&["vendor/**".to_string()]).unwrap();
    let root = Path::new("/repo");
    assert!(f.excludes(Path::new("/repo/vendor/lib.js"), root));
    assert!(!f.excludes(Path::new("/repo/src/lib.js"), root));
}

#[test]
fn glob_matches_extension_patterns() {
    let f = ExcludeFilter::new(&["**/*.min.js".to_string()]).unwrap();
    let root = Path::new("/repo");
    assert!(f.excludes(Path::new("/repo/dist/app.min.js"), root));
    assert!(!f.excludes(Path::new("/repo/dist/app.js"), root));
}

#[test]
fn invalid_glob_is_an_error() {
    assert!(ExcludeFilter::new(&["a[".to_string()]).is_err());
}

// ── walk ───────────────────────────────────────────────────────────────

#[test]
fn walk_skips_test_dirs_when_excluded() {
    let dir = tempdir().unwrap();
    fs::create_dir(dir.path().join("tests")).unwrap();
    fs::write(dir.path().join("tests/a.rs"), "fn a() {}").unwrap();
    fs::write(dir.path().join("lib.rs"), "fn lib() {}").unwrap();

    let visit = |exclude: bool| -> Vec<String> {
        walk(dir.path(), exclude)
            .filter_map(Result::ok)
            .filter(|e| e.file_type().is_some_and(|ft| ft.is_file()))
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .collect()
    };

    let all = visit(false);
    assert!(all.contains(&"a.rs".to_string()));

    let trimmed = visit(true);
    assert!(trimmed.contains(&"lib.rs".to_string()));
    assert!(!trimmed.contains(&"a.rs".to_string()));
}
