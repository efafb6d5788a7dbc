use std::collections::BTreeSet;
use std::error::Error;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::Deserialize;

use super::graph::DependencyGraph;

/// A single resolved import edge: `from` imports `to`.
#[derive(Debug, Clone, Deserialize)]
pub struct ImportEdge {
    pub from: String,
    pub to: String,
}

/// Resolved-imports manifest produced by an import resolver.
///
/// Edge endpoints must already be normalized project-relative paths;
/// unresolved or external imports are expected to be filtered out before
/// the manifest is written. `files` is optional and exists so that files
/// with no imports in either direction still appear in the analysis.
#[derive(Debug, Deserialize)]
pub struct ImportManifest {
    #[serde(default)]
    pub files: Vec<String>,
    pub edges: Vec<ImportEdge>,
}

impl ImportManifest {
    /// Read and parse a manifest JSON file. Unlike per-file source reads,
    /// a broken manifest is a hard error: it is the tool's input contract.
    pub fn load(path: &Path) -> Result<Self, Box<dyn Error>> {
        let file = File::open(path)
            .map_err(|e| format!("{}: {e}", path.display()))?;
        let manifest = serde_json::from_reader(BufReader::new(file))
            .map_err(|e| format!("{}: {e}", path.display()))?;
        Ok(manifest)
    }

    /// Build the dependency graph and the sorted, deduplicated file set
    /// (listed files plus every edge endpoint).
    pub fn build_graph(&self) -> (DependencyGraph, Vec<String>) {
        let mut graph = DependencyGraph::new();
        let mut files: BTreeSet<&str> = BTreeSet::new();

        for file in &self.files {
            graph.add_node(file);
            files.insert(file);
        }
        for edge in &self.edges {
            // Register endpoints first so a (discarded) self-edge still
            // leaves its file as a node.
            graph.add_node(&edge.from);
            graph.add_node(&edge.to);
            graph.add_edge(&edge.from, &edge.to);
            files.insert(&edge.from);
            files.insert(&edge.to);
        }

        let files = files.into_iter().map(|f| f.to_string()).collect();
        (graph, files)
    }
}

#[cfg(test)]
#[path = "manifest_test.rs"]
mod tests;
