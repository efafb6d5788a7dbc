use serde::Serialize;

use super::detector::{DuplicationIssue, FileDuplication, IssueSeverity};
use crate::report_helpers;

/// Maximum files shown in the detailed table by default.
pub const DEFAULT_FILE_LIMIT: usize = 20;

/// How many files to display given the `--top` override (0 = all).
pub fn display_limit(total: usize, top: usize) -> usize {
    if top == 0 {
        total
    } else {
        top.min(total)
    }
}

/// Project-wide duplication metrics.
#[derive(Serialize)]
pub struct DuplicationSummary {
    pub files_analyzed: usize,
    pub files_with_blocks: usize,
    pub total_blocks: usize,
    pub duplicated_blocks: usize,
    pub high_issues: usize,
    pub medium_issues: usize,
}

impl DuplicationSummary {
    pub fn build(results: &[FileDuplication], issues: &[DuplicationIssue]) -> Self {
        Self {
            files_analyzed: results.len(),
            files_with_blocks: results.iter().filter(|r| r.block_count > 0).count(),
            total_blocks: results.iter().map(|r| r.block_count).sum(),
            duplicated_blocks: results.iter().map(|r| r.duplicated_blocks).sum(),
            high_issues: issues
                .iter()
                .filter(|i| i.severity == IssueSeverity::High)
                .count(),
            medium_issues: issues
                .iter()
                .filter(|i| i.severity == IssueSeverity::Medium)
                .count(),
        }
    }

    /// Share of all distinct blocks that occur in more than one place.
    pub fn percentage(&self) -> f64 {
        if self.total_blocks == 0 {
            0.0
        } else {
            (self.duplicated_blocks as f64 / self.total_blocks as f64) * 100.0
        }
    }
}

/// Classify project duplication into a human-readable assessment label.
fn assessment(percentage: f64) -> &'static str {
    if percentage < 3.0 {
        "Excellent"
    } else if percentage < 8.0 {
        "Good"
    } else if percentage < 15.0 {
        "Moderate"
    } else if percentage < 30.0 {
        "High"
    } else {
        "Very High"
    }
}

/// Order results for display: worst duplication first, larger files
/// first on ties, then by path for a stable tail.
pub fn sort_for_display(results: &mut [FileDuplication]) {
    results.sort_by(|a, b| {
        b.duplication_ratio
            .total_cmp(&a.duplication_ratio)
            .then_with(|| b.block_count.cmp(&a.block_count))
            .then_with(|| a.path.cmp(&b.path))
    });
}

/// Print the project-wide summary block.
pub fn print_summary(summary: &DuplicationSummary) {
    let separator = report_helpers::separator(68);
    let pct = summary.percentage();

    println!("{separator}");
    println!(" Duplication Analysis");
    println!();
    println!(" Files analyzed:       {:>42}", summary.files_analyzed);
    println!(" Files with blocks:    {:>42}", summary.files_with_blocks);
    println!(" Distinct blocks:      {:>42}", summary.total_blocks);
    println!(" Duplicated blocks:    {:>42}", summary.duplicated_blocks);
    println!(" Duplication:          {:>41.1}%", pct);
    if summary.high_issues > 0 || summary.medium_issues > 0 {
        println!();
        println!(" High severity issues: {:>42}", summary.high_issues);
        println!(" Medium severity:      {:>42}", summary.medium_issues);
    }
    println!();
    println!(" Assessment:           {:>42}", assessment(pct));
    println!("{separator}");
}

/// Print the summary followed by the per-file table (pre-sorted, already
/// truncated to the limit) and the issue list.
pub fn print_detailed(
    summary: &DuplicationSummary,
    results: &[FileDuplication],
    issues: &[DuplicationIssue],
    total_files: usize,
) {
    print_summary(summary);

    if !results.is_empty() {
        let width = report_helpers::max_width(
            results.iter().filter_map(|r| r.path.to_str()),
            4,
        );
        println!();
        println!(
            " {:<width$}  {:>7} {:>7} {:>6}",
            "File", "Blocks", "Dup", "Pct"
        );
        println!(" {}", report_helpers::separator(width + 25));
        for result in results {
            println!(
                " {:<width$}  {:>7} {:>7} {:>5}%",
                result.path.display(),
                result.block_count,
                result.duplicated_blocks,
                result.percentage()
            );
        }
        if results.len() < total_files {
            println!();
            println!(
                " Showing top {} of {} files. Use --top 0 to see all files.",
                results.len(),
                total_files
            );
        }
    }

    if !issues.is_empty() {
        println!();
        println!(" Issues:");
        for issue in issues {
            let label = match issue.severity {
                IssueSeverity::High => "HIGH",
                IssueSeverity::Medium => "MEDIUM",
            };
            println!("   [{label}] {}: {}", issue.path.display(), issue.message);
        }
    }
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    summary: &'a DuplicationSummary,
    files: &'a [FileDuplication],
    issues: &'a [DuplicationIssue],
}

/// Serialize the full result as pretty JSON on stdout.
pub fn print_json(
    summary: &DuplicationSummary,
    results: &[FileDuplication],
    issues: &[DuplicationIssue],
) -> Result<(), Box<dyn std::error::Error>> {
    report_helpers::print_json_stdout(&JsonOutput {
        summary,
        files: results,
        issues,
    })
}

#[cfg(test)]
#[path = "report_test.rs"]
mod tests;
