//! Dependency graph of changed workspaces using petgraph.

use std::collections::HashMap;

use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};

use crate::change::ClassificationMap;
use crate::error::{Error, Result};

/// Directed graph restricted to qualifying workspaces.
///
/// Edges point from a workspace to each of its qualifying dependencies.
#[derive(Debug)]
pub struct DependencyGraph {
    graph: DiGraph<String, ()>,
}

impl DependencyGraph {
    /// Builds the graph for `names` from their in-repo dependencies.
    ///
    /// Dependencies outside `names` are left out.
    pub fn new(names: &[String], classifications: &ClassificationMap) -> Self {
        let mut graph = DiGraph::new();
        let mut node_map: HashMap<&str, NodeIndex> = HashMap::with_capacity(names.len());

        for name in names {
            let node = graph.add_node(name.clone());
            node_map.insert(name.as_str(), node);
        }

        for name in names {
            let Some(classification) = classifications.get(name) else {
                continue;
            };
            let from_node = node_map[name.as_str()];
            for dep in &classification.changed_in_repo_dependencies {
                if let Some(&to_node) = node_map.get(dep.as_str()) {
                    graph.add_edge(from_node, to_node, ());
                }
            }
        }

        Self { graph }
    }

    /// Fails if the graph contains a cycle.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DependencyCycle`] naming a workspace on the cycle.
    pub fn ensure_acyclic(&self) -> Result<()> {
        toposort(&self.graph, None).map(|_| ()).map_err(|cycle| {
            let cycle_node = self.graph[cycle.node_id()].clone();
            Error::DependencyCycle(format!("cycle detected involving: {}", cycle_node))
        })
    }
}
