use std::collections::{BTreeMap, HashMap, HashSet};

use serde::Serialize;

use super::graph::{Cycle, DependencyGraph};

/// Derived per-file dependency metrics, recomputed for every run.
#[derive(Debug, Clone, Serialize)]
pub struct FileAnalysis {
    pub path: String,
    pub outgoing_dependencies: usize,
    pub incoming_dependencies: usize,
    /// outgoing / (incoming + outgoing); 0 = stable, 1 = unstable.
    pub instability: f64,
    /// Average path-prefix affinity with this file's imports.
    pub cohesion_score: f64,
    /// Incoming-count percentile among all analyzed files, 0-100.
    pub percentile_usage_rank: u32,
    pub is_in_cycle: bool,
}

/// Combine graph-derived metrics into one record per file.
///
/// Percentile ranks are computed once for the whole set; cycle membership
/// is tested against the flattened node set of all detected cycles.
pub fn analyze_files(
    graph: &DependencyGraph,
    files: &[String],
    cycles: &[Cycle],
) -> HashMap<String, FileAnalysis> {
    let ranks = percentile_ranks(graph, files);
    let cyclic: HashSet<&str> = cycles
        .iter()
        .flat_map(|c| c.nodes.iter().map(String::as_str))
        .collect();

    files
        .iter()
        .map(|file| {
            let analysis = FileAnalysis {
                path: file.clone(),
                outgoing_dependencies: graph.outgoing_count(file),
                incoming_dependencies: graph.incoming_count(file),
                instability: graph.instability(file),
                cohesion_score: graph.cohesion(file),
                percentile_usage_rank: ranks.get(file).copied().unwrap_or(0),
                is_in_cycle: cyclic.contains(file.as_str()),
            };
            (file.clone(), analysis)
        })
        .collect()
}

/// Rank each file's incoming-dependency count as a 0-100 percentile.
///
/// Files are grouped by incoming count and the distinct counts walked in
/// ascending order; every member of a group receives the same percentile,
/// `round(first_index / (total - 1) * 100)` where `first_index` is the
/// 0-based position of the group's first member in overall ascending
/// order. A single file ranks 0 (no division by zero); an empty input
/// yields an empty map.
fn percentile_ranks(graph: &DependencyGraph, files: &[String]) -> HashMap<String, u32> {
    let total = files.len();
    if total == 0 {
        return HashMap::new();
    }
    if total == 1 {
        return HashMap::from([(files[0].clone(), 0)]);
    }

    // BTreeMap keys iterate in ascending incoming-count order.
    let mut groups: BTreeMap<usize, Vec<&String>> = BTreeMap::new();
    for file in files {
        groups.entry(graph.incoming_count(file)).or_default().push(file);
    }

    let mut ranks = HashMap::with_capacity(total);
    let mut first_index = 0usize;
    for group in groups.values() {
        let percentile =
            ((first_index as f64 / (total - 1) as f64) * 100.0).round() as u32;
        for file in group {
            ranks.insert((*file).clone(), percentile);
        }
        first_index += group.len();
    }
    ranks
}

#[cfg(test)]
#[path = "analysis_test.rs"]
mod tests;
