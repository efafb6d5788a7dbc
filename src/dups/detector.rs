use std::collections::{HashMap, HashSet};
use std::path::PathBuf;

use serde::Serialize;

use super::hasher::{BlockHash, BlockHasher};
use crate::config::DupConfig;
use crate::filetype::FileType;

/// Severity of a duplication issue, by per-file-type thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum IssueSeverity {
    Medium,
    High,
}

/// An actionable duplication finding for one file.
#[derive(Debug, Clone, Serialize)]
pub struct DuplicationIssue {
    pub path: PathBuf,
    pub severity: IssueSeverity,
    /// Rounded `duplication_ratio * 100`.
    pub percentage: u32,
    pub message: String,
}

/// One file's raw text plus its classification, as supplied by the caller.
pub struct SourceFile {
    pub path: PathBuf,
    pub content: String,
    pub file_type: FileType,
}

/// Per-file duplication result.
#[derive(Debug, Clone, Serialize)]
pub struct FileDuplication {
    pub path: PathBuf,
    /// Share of this file's distinct blocks that occur anywhere else in
    /// the corpus; 0 when the file is too short to produce blocks.
    pub duplication_ratio: f64,
    pub block_count: usize,
    pub duplicated_blocks: usize,
}

impl FileDuplication {
    pub fn percentage(&self) -> u32 {
        (self.duplication_ratio * 100.0).round() as u32
    }
}

/// Detect literal duplication across a file corpus.
///
/// Two passes. The collection pass slides a `block_lines` window (stride
/// one) over each file's non-blank lines, hashing every surviving window
/// into that file's distinct-block set; the corpus tally then increments
/// once per distinct hash per file, so a block repeated inside one file
/// counts once toward other files' scores. The scoring pass divides each
/// file's blocks with corpus count > 1 by its total distinct blocks.
///
/// Results are independent of file order: the corpus map construction is
/// commutative over insertion.
pub fn detect_duplication(
    files: &[SourceFile],
    config: &DupConfig,
) -> (Vec<FileDuplication>, Vec<DuplicationIssue>) {
    let hasher = BlockHasher::new(config.min_block_chars, config.min_block_tokens);

    // Collection pass.
    let mut corpus: HashMap<BlockHash, usize> = HashMap::new();
    let mut file_blocks: Vec<HashSet<BlockHash>> = Vec::with_capacity(files.len());
    for file in files {
        let blocks = collect_blocks(&file.content, config.block_lines, &hasher);
        for hash in &blocks {
            *corpus.entry(*hash).or_insert(0) += 1;
        }
        file_blocks.push(blocks);
    }

    // Scoring pass.
    let mut results = Vec::with_capacity(files.len());
    let mut issues = Vec::new();
    for (file, blocks) in files.iter().zip(&file_blocks) {
        let duplicated = blocks
            .iter()
            .filter(|hash| corpus.get(*hash).copied().unwrap_or(0) > 1)
            .count();
        let ratio = if blocks.is_empty() {
            0.0
        } else {
            duplicated as f64 / blocks.len() as f64
        };

        let result = FileDuplication {
            path: file.path.clone(),
            duplication_ratio: ratio,
            block_count: blocks.len(),
            duplicated_blocks: duplicated,
        };
        if let Some(issue) = issue_for(&result, file.file_type, config) {
            issues.push(issue);
        }
        results.push(result);
    }

    (results, issues)
}

/// Emit an issue when the file's duplication percentage reaches its
/// file-type thresholds; below the medium threshold there is no issue.
fn issue_for(
    result: &FileDuplication,
    file_type: FileType,
    config: &DupConfig,
) -> Option<DuplicationIssue> {
    let thresholds = config.thresholds_for(file_type);
    let percentage = result.percentage();

    let severity = if percentage >= thresholds.high {
        IssueSeverity::High
    } else if percentage >= thresholds.medium {
        IssueSeverity::Medium
    } else {
        return None;
    };

    Some(DuplicationIssue {
        path: result.path.clone(),
        severity,
        percentage,
        message: format!(
            "{percentage}% of this file's code blocks appear elsewhere in the project"
        ),
    })
}

/// Slide the block window over a file's non-blank lines, returning the
/// distinct block hashes. Files shorter than the window produce none,
/// and a zero-line window matches nothing.
fn collect_blocks(
    content: &str,
    block_lines: usize,
    hasher: &BlockHasher,
) -> HashSet<BlockHash> {
    let lines: Vec<&str> = content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .collect();

    let mut blocks = HashSet::new();
    if block_lines == 0 || lines.len() < block_lines {
        return blocks;
    }
    for window in lines.windows(block_lines) {
        if let Some(hash) = hasher.hash_window(window) {
            blocks.insert(hash);
        }
    }
    blocks
}

#[cfg(test)]
#[path = "detector_test.rs"]
mod tests;
