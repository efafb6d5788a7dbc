mod detector;
mod hasher;
mod report;

use std::error::Error;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::config::DupConfig;
use crate::filetype::{self, FileType};
use crate::util::is_binary_reader;
use crate::walk::{self, ExcludeFilter};
use detector::{SourceFile, detect_duplication};
use report::{DEFAULT_FILE_LIMIT, DuplicationSummary, display_limit, sort_for_display};

/// Read a file's text, or `None` for binary content.
fn load_content(path: &Path) -> Result<Option<String>, Box<dyn Error>> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);
    if is_binary_reader(&mut reader)? {
        return Ok(None);
    }
    Ok(Some(std::io::read_to_string(reader)?))
}

/// Detect literal duplication under `path` and report.
///
/// Unreadable files are logged and still included with zero blocks (they
/// score a 0.0 ratio); a bad file never aborts the batch.
pub fn run(
    path: &Path,
    config: &DupConfig,
    exclude: &[String],
    include_tests: bool,
    show_report: bool,
    top: Option<usize>,
    json: bool,
) -> Result<(), Box<dyn Error>> {
    let filter = ExcludeFilter::new(exclude)?;
    let exclude_tests = !include_tests;

    let mut files: Vec<SourceFile> = Vec::new();
    for entry in walk::walk(path, exclude_tests) {
        let entry = match entry {
            Ok(e) => e,
            Err(err) => {
                eprintln!("warning: {err}");
                continue;
            }
        };
        if !entry.file_type().is_some_and(|ft| ft.is_file()) {
            continue;
        }

        let file_path = entry.path();
        if !filetype::is_scanned(file_path) || filter.excludes(file_path, path) {
            continue;
        }
        let file_type = filetype::classify(file_path);
        if exclude_tests && file_type == FileType::Test {
            continue;
        }

        match load_content(file_path) {
            Ok(Some(content)) => files.push(SourceFile {
                path: file_path.to_path_buf(),
                content,
                file_type,
            }),
            Ok(None) => {} // binary, skip
            Err(err) => {
                eprintln!("warning: {}: {err}", file_path.display());
                files.push(SourceFile {
                    path: file_path.to_path_buf(),
                    content: String::new(),
                    file_type,
                });
            }
        }
    }

    let (mut results, issues) = detect_duplication(&files, config);
    let summary = DuplicationSummary::build(&results, &issues);
    sort_for_display(&mut results);

    let total_files = results.len();
    let limit = display_limit(total_files, top.unwrap_or(DEFAULT_FILE_LIMIT));

    if json {
        report::print_json(&summary, &results, &issues)?;
    } else if show_report {
        report::print_detailed(&summary, &results[..limit], &issues, total_files);
    } else {
        report::print_summary(&summary);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const BODY: &str = "\
const total = fetchRows(\"users\");
const summary = this.summarize(db);
emit(\"done\");
cleanup(42);
return 1;
";

    fn defaults() -> DupConfig {
        DupConfig::default()
    }

    #[test]
    fn run_on_empty_dir() {
        let dir = tempfile::tempdir().unwrap();
        run(dir.path(), &defaults(), &[], false, false, None, false).unwrap();
    }

    #[test]
    fn run_detects_duplicates() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.ts"), BODY).unwrap();
        fs::write(dir.path().join("b.ts"), BODY).unwrap();
        run(dir.path(), &defaults(), &[], false, false, None, false).unwrap();
        run(dir.path(), &defaults(), &[], false, true, None, false).unwrap();
        run(dir.path(), &defaults(), &[], false, false, None, true).unwrap();
    }

    #[test]
    fn run_skips_binary_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("data.c"), b"hello\x00world").unwrap();
        run(dir.path(), &defaults(), &[], false, false, None, false).unwrap();
    }

    #[test]
    fn run_survives_unreadable_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.ts"), BODY).unwrap();
        fs::write(dir.path().join("b.ts"), BODY).unwrap();
        // no null byte, so the binary probe passes, but reading it as
        // text fails; the file is kept with zero content and the twins
        // are still scored
        fs::write(dir.path().join("mangled.ts"), [0xE2u8, 0x28, 0xA1, b'\n']).unwrap();
        run(dir.path(), &defaults(), &[], false, true, None, false).unwrap();
    }

    #[test]
    fn run_skips_unrecognized_extensions() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("image.png"), "not source").unwrap();
        fs::write(dir.path().join("notes.txt"), "not source either").unwrap();
        run(dir.path(), &defaults(), &[], false, true, None, false).unwrap();
    }

    #[test]
    fn run_excludes_test_dirs_by_default() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("tests")).unwrap();
        fs::write(dir.path().join("tests/a.ts"), BODY).unwrap();
        fs::write(dir.path().join("tests/b.ts"), BODY).unwrap();
        fs::write(dir.path().join("lib.ts"), "const x = 1;\n").unwrap();
        // default: tests/ skipped; with include_tests the twins are seen
        run(dir.path(), &defaults(), &[], false, true, None, false).unwrap();
        run(dir.path(), &defaults(), &[], true, true, None, false).unwrap();
    }

    #[test]
    fn run_applies_exclude_globs() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("vendor")).unwrap();
        fs::write(dir.path().join("vendor/dep.js"), BODY).unwrap();
        fs::write(dir.path().join("app.js"), BODY).unwrap();
        let excludes = vec!["vendor/**".to_string()];
        run(dir.path(), &defaults(), &excludes, false, true, None, false).unwrap();
    }

    #[test]
    fn run_rejects_invalid_exclude_glob() {
        let dir = tempfile::tempdir().unwrap();
        let excludes = vec!["a[".to_string()];
        assert!(run(dir.path(), &defaults(), &excludes, false, false, None, false).is_err());
    }

    #[test]
    fn run_with_top_limit() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["a.ts", "b.ts", "c.ts"] {
            fs::write(dir.path().join(name), BODY).unwrap();
        }
        run(dir.path(), &defaults(), &[], false, true, Some(1), false).unwrap();
        run(dir.path(), &defaults(), &[], false, true, Some(0), false).unwrap();
    }
}
