use serde::Serialize;

use super::analysis::FileAnalysis;
use super::graph::{Cycle, GraphStatistics, HubFile};
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

/// Order per-file analyses for display: most depended-upon first, then
/// most importing, then by path for a stable tail.
pub fn sort_for_display(analyses: &mut [FileAnalysis]) {
    analyses.sort_by(|a, b| {
        b.incoming_dependencies
            .cmp(&a.incoming_dependencies)
            .then_with(|| b.outgoing_dependencies.cmp(&a.outgoing_dependencies))
            .then_with(|| a.path.cmp(&b.path))
    });
}

/// Print the aggregate summary block.
pub fn print_summary(stats: &GraphStatistics, cycles: &[Cycle], hubs: &[HubFile]) {
    let separator = report_helpers::separator(68);

    println!("{separator}");
    println!(" Dependency Analysis");
    println!();
    println!(" Files analyzed:       {:>42}", stats.total_files);
    println!(" Import edges:         {:>42}", stats.total_imports);
    println!(
        " Avg imports per file: {:>42.2}",
        stats.average_imports_per_file
    );
    if let Some(max) = &stats.max_imports
        && max.count > 0
    {
        println!(" Most imports:         {:>42}", format!("{} ({})", max.file, max.count));
    }
    println!();
    println!(" Dependency cycles:    {:>42}", cycles.len());
    println!(" Hub files:            {:>42}", hubs.len());
    println!(" Isolated files:       {:>42}", stats.isolated_files.len());
    println!("{separator}");
}

/// Print the summary followed by cycles, hubs, isolated files, and the
/// per-file metric table (pre-sorted, already truncated to the limit).
pub fn print_detailed(
    stats: &GraphStatistics,
    cycles: &[Cycle],
    hubs: &[HubFile],
    analyses: &[FileAnalysis],
    total_files: usize,
) {
    print_summary(stats, cycles, hubs);

    if !cycles.is_empty() {
        println!();
        println!(" Cycles:");
        for (i, cycle) in cycles.iter().enumerate() {
            println!("   [{}] {}", i + 1, cycle.signature());
        }
    }

    if !hubs.is_empty() {
        println!();
        println!(" Hub files (by incoming dependencies):");
        for hub in hubs {
            println!("   {:>5}  {}", hub.incoming, hub.file);
        }
    }

    if !stats.isolated_files.is_empty() {
        println!();
        println!(" Isolated files (no imports in or out):");
        for file in &stats.isolated_files {
            println!("   {file}");
        }
    }

    if analyses.is_empty() {
        return;
    }

    let width = report_helpers::max_width(analyses.iter().map(|a| a.path.as_str()), 4);
    println!();
    println!(
        " {:<width$}  {:>4} {:>4} {:>6} {:>6} {:>5} {:>5}",
        "File", "In", "Out", "Inst", "Coh", "Pct", "Cycle"
    );
    println!(" {}", report_helpers::separator(width + 36));
    for a in analyses {
        println!(
            " {:<width$}  {:>4} {:>4} {:>6.2} {:>6.2} {:>5} {:>5}",
            a.path,
            a.incoming_dependencies,
            a.outgoing_dependencies,
            a.instability,
            a.cohesion_score,
            a.percentile_usage_rank,
            if a.is_in_cycle { "yes" } else { "" }
        );
    }

    if analyses.len() < total_files {
        println!();
        println!(
            " Showing top {} of {} files. Use --top 0 to see all files.",
            analyses.len(),
            total_files
        );
    }
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    statistics: &'a GraphStatistics,
    cycles: &'a [Cycle],
    hub_files: &'a [HubFile],
    files: &'a [FileAnalysis],
}

/// Serialize the full result as pretty JSON on stdout.
pub fn print_json(
    stats: &GraphStatistics,
    cycles: &[Cycle],
    hubs: &[HubFile],
    analyses: &[FileAnalysis],
) -> Result<(), Box<dyn std::error::Error>> {
    report_helpers::print_json_stdout(&JsonOutput {
        statistics: stats,
        cycles,
        hub_files: hubs,
        files: analyses,
    })
}

#[cfg(test)]
#[path = "report_test.rs"]
mod tests;
