use std::collections::{BTreeSet, HashMap, HashSet};

use serde::Serialize;

/// A closed walk found in the import graph, stored in canonical rotation
/// (the lexicographically smallest node first) so that equivalent cycles
/// compare equal regardless of where traversal entered them.
#[derive(Debug, Clone, Serialize)]
pub struct Cycle {
    pub nodes: Vec<String>,
}

impl Cycle {
    /// Build a cycle from a traversal-ordered node sequence, rotating it
    /// so the lexicographically smallest node comes first.
    pub fn canonical(mut nodes: Vec<String>) -> Self {
        if let Some(min_pos) = nodes
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| a.cmp(b))
            .map(|(i, _)| i)
        {
            nodes.rotate_left(min_pos);
        }
        Self { nodes }
    }

    /// Stable identity for deduplication: canonical nodes joined by " -> ".
    pub fn signature(&self) -> String {
        self.nodes.join(" -> ")
    }
}

/// A file whose incoming-dependency count exceeds the hub threshold.
#[derive(Debug, Clone, Serialize)]
pub struct HubFile {
    pub file: String,
    pub incoming: usize,
}

/// The file with the most outgoing imports.
#[derive(Debug, Clone, Serialize)]
pub struct MaxImports {
    pub file: String,
    pub count: usize,
}

/// Aggregate shape of the whole graph, computed in one pass over all nodes.
#[derive(Debug, Clone, Serialize)]
pub struct GraphStatistics {
    pub total_files: usize,
    pub total_imports: usize,
    pub average_imports_per_file: f64,
    pub max_imports: Option<MaxImports>,
    pub isolated_files: Vec<String>,
}

/// Directed graph of file-to-file import edges.
///
/// Nodes are normalized project-relative paths. Edges have set semantics:
/// self-loops are ignored and re-adding an existing edge is a no-op, so
/// `incoming` counts equal the number of *distinct* incoming edges rather
/// than the number of `add_edge` calls.
pub struct DependencyGraph {
    edges: HashMap<String, BTreeSet<String>>,
    incoming: HashMap<String, usize>,
}

/// DFS visit state. Nodes absent from the state map are unvisited.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Visit {
    OnStack,
    Done,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self {
            edges: HashMap::new(),
            incoming: HashMap::new(),
        }
    }

    /// Ensure the file has adjacency and incoming-count entries.
    pub fn add_node(&mut self, file: &str) {
        self.edges.entry(file.to_string()).or_default();
        self.incoming.entry(file.to_string()).or_insert(0);
    }

    /// Add a directed import edge. Self-loops are ignored; unknown
    /// endpoints are auto-registered; the incoming count of `to` goes up
    /// exactly once the first time this specific edge appears.
    pub fn add_edge(&mut self, from: &str, to: &str) {
        if from == to {
            return;
        }
        self.add_node(from);
        self.add_node(to);
        let outgoing = self.edges.entry(from.to_string()).or_default();
        if outgoing.insert(to.to_string()) {
            *self.incoming.entry(to.to_string()).or_insert(0) += 1;
        }
    }

    pub fn node_count(&self) -> usize {
        self.edges.len()
    }

    /// Nodes in sorted order, for deterministic traversal and reports.
    pub fn sorted_nodes(&self) -> Vec<&str> {
        let mut nodes: Vec<&str> = self.edges.keys().map(String::as_str).collect();
        nodes.sort_unstable();
        nodes
    }

    pub fn outgoing_count(&self, file: &str) -> usize {
        self.edges.get(file).map_or(0, BTreeSet::len)
    }

    pub fn incoming_count(&self, file: &str) -> usize {
        self.incoming.get(file).copied().unwrap_or(0)
    }

    fn neighbors(&self, file: &str) -> Vec<&str> {
        self.edges
            .get(file)
            .map(|set| set.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Find import cycles with a single iterative depth-first pass.
    ///
    /// Each node is in one of three states: unvisited, on-stack (part of
    /// the active DFS path) or done (fully explored). Following an edge to
    /// an on-stack node closes a cycle: the suffix of the current path from
    /// that node onward is captured, canonicalized, and kept only if its
    /// signature has not been seen yet.
    ///
    /// The traversal uses an explicit frame stack instead of recursion so
    /// deep import chains cannot overflow the call stack. Roots iterate in
    /// sorted order, making the result deterministic.
    ///
    /// Limitation: when several cycles overlap on shared nodes, a single
    /// DFS pass is not guaranteed to enumerate every elementary cycle
    /// (that would need Johnson's algorithm). Downstream reporting relies
    /// on the cycle *set* being representative, not exhaustive.
    pub fn detect_cycles(&self) -> Vec<Cycle> {
        let mut state: HashMap<&str, Visit> = HashMap::new();
        let mut seen: HashSet<String> = HashSet::new();
        let mut cycles: Vec<Cycle> = Vec::new();

        for root in self.sorted_nodes() {
            if state.contains_key(root) {
                continue;
            }

            // Frame: (node, its neighbors, index of the next neighbor).
            let mut stack: Vec<(&str, Vec<&str>, usize)> =
                vec![(root, self.neighbors(root), 0)];
            let mut path: Vec<&str> = vec![root];
            state.insert(root, Visit::OnStack);

            while let Some(frame) = stack.last_mut() {
                if frame.2 < frame.1.len() {
                    let next = frame.1[frame.2];
                    frame.2 += 1;
                    match state.get(next).copied() {
                        None => {
                            state.insert(next, Visit::OnStack);
                            path.push(next);
                            stack.push((next, self.neighbors(next), 0));
                        }
                        Some(Visit::OnStack) => {
                            if let Some(pos) = path.iter().position(|n| *n == next) {
                                let cycle = Cycle::canonical(
                                    path[pos..].iter().map(|n| n.to_string()).collect(),
                                );
                                if seen.insert(cycle.signature()) {
                                    cycles.push(cycle);
                                }
                            }
                        }
                        Some(Visit::Done) => {}
                    }
                } else {
                    let node = frame.0;
                    stack.pop();
                    path.pop();
                    state.insert(node, Visit::Done);
                }
            }
        }

        cycles
    }

    /// Instability per Martin: outgoing / (incoming + outgoing).
    /// 0 = fully depended-upon (stable), 1 = fully dependent (unstable).
    /// A node with no edges at all is treated as stable (0).
    pub fn instability(&self, file: &str) -> f64 {
        let outgoing = self.outgoing_count(file);
        let incoming = self.incoming_count(file);
        let total = incoming + outgoing;
        if total == 0 {
            0.0
        } else {
            outgoing as f64 / total as f64
        }
    }

    /// Average path-prefix affinity between a file and its outgoing
    /// dependencies: imports from the same subtree score high, imports
    /// reaching across the tree score low. Vacuously 1 with no imports.
    pub fn cohesion(&self, file: &str) -> f64 {
        let deps = match self.edges.get(file) {
            Some(deps) if !deps.is_empty() => deps,
            _ => return 1.0,
        };
        let total: f64 = deps.iter().map(|dep| path_affinity(file, dep)).sum();
        total / deps.len() as f64
    }

    /// One pass over all nodes: import totals, the heaviest importer, and
    /// files with no edges in either direction.
    pub fn statistics(&self) -> GraphStatistics {
        let total_files = self.edges.len();
        let mut total_imports = 0usize;
        let mut max_imports: Option<MaxImports> = None;
        let mut isolated_files: Vec<String> = Vec::new();

        for node in self.sorted_nodes() {
            let out = self.outgoing_count(node);
            total_imports += out;
            if max_imports.as_ref().is_none_or(|m| out > m.count) {
                max_imports = Some(MaxImports {
                    file: node.to_string(),
                    count: out,
                });
            }
            if out == 0 && self.incoming_count(node) == 0 {
                isolated_files.push(node.to_string());
            }
        }

        let average_imports_per_file = if total_files == 0 {
            0.0
        } else {
            total_imports as f64 / total_files as f64
        };

        GraphStatistics {
            total_files,
            total_imports,
            average_imports_per_file,
            max_imports,
            isolated_files,
        }
    }

    /// Files whose incoming count strictly exceeds `threshold`, most
    /// depended-upon first (name ascending on ties, for stable output).
    pub fn hub_files(&self, threshold: usize) -> Vec<HubFile> {
        let mut hubs: Vec<HubFile> = self
            .incoming
            .iter()
            .filter(|(_, count)| **count > threshold)
            .map(|(file, count)| HubFile {
                file: file.clone(),
                incoming: *count,
            })
            .collect();
        hubs.sort_by(|a, b| b.incoming.cmp(&a.incoming).then_with(|| a.file.cmp(&b.file)));
        hubs
    }
}

impl Default for DependencyGraph {
    fn default() -> Self {
        Self::new()
    }
}

/// Shared leading path segments divided by the longer path's segment
/// count: `a/b/c.ts` vs `a/b/d.ts` share 2 of 3 segments → 2/3.
fn path_affinity(a: &str, b: &str) -> f64 {
    let a_parts: Vec<&str> = a.split('/').collect();
    let b_parts: Vec<&str> = b.split('/').collect();
    let shared = a_parts
        .iter()
        .zip(b_parts.iter())
        .take_while(|(x, y)| x == y)
        .count();
    let longest = a_parts.len().max(b_parts.len());
    if longest == 0 {
        0.0
    } else {
        shared as f64 / longest as f64
    }
}

#[cfg(test)]
#[path = "graph_test.rs"]
mod tests;
