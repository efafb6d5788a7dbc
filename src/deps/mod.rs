pub(crate) mod analysis;
pub(crate) mod graph;
mod manifest;
mod report;

use std::error::Error;
use std::path::Path;

use analysis::analyze_files;
use manifest::ImportManifest;
use report::{DEFAULT_FILE_LIMIT, display_limit, sort_for_display};

/// Analyze a resolved-imports manifest: build the graph, detect cycles,
/// compute aggregate statistics, hubs, and per-file metrics, then report.
pub fn run(
    manifest_path: &Path,
    hub_threshold: usize,
    show_report: bool,
    top: Option<usize>,
    json: bool,
) -> Result<(), Box<dyn Error>> {
    let manifest = ImportManifest::load(manifest_path)?;
    let (graph, files) = manifest.build_graph();

    let cycles = graph.detect_cycles();
    let stats = graph.statistics();
    let hubs = graph.hub_files(hub_threshold);

    let mut analyses: Vec<_> = analyze_files(&graph, &files, &cycles)
        .into_values()
        .collect();
    sort_for_display(&mut analyses);

    let total_files = analyses.len();
    let limit = display_limit(total_files, top.unwrap_or(DEFAULT_FILE_LIMIT));

    if json {
        report::print_json(&stats, &cycles, &hubs, &analyses)?;
    } else if show_report {
        report::print_detailed(&stats, &cycles, &hubs, &analyses[..limit], total_files);
    } else {
        report::print_summary(&stats, &cycles, &hubs);
    }

    Ok(())
}
