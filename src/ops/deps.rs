//! Namespace dependency ordering.

use std::collections::HashMap;

use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};

use crate::ops::generate::GenerateError;
use crate::provider::IntrospectionProvider;

/// The dependency closure of `roots`, dependencies before dependents.
///
/// Every namespace in the closure must already be loaded.
pub fn dependency_order(
    provider: &dyn IntrospectionProvider,
    roots: &[String],
) -> Result<Vec<String>, GenerateError> {
    let mut graph: DiGraph<String, ()> = DiGraph::new();
    let mut nodes: HashMap<String, NodeIndex> = HashMap::new();
    let mut pending: Vec<String> = roots.to_vec();

    // Discovery order decides the order of unrelated namespaces.
    let mut node_for = |graph: &mut DiGraph<String, ()>, name: &str| -> (NodeIndex, bool) {
        match nodes.get(name) {
            Some(&index) => (index, false),
            None => {
                let index = graph.add_node(name.to_string());
                nodes.insert(name.to_string(), index);
                (index, true)
            }
        }
    };

    for root in roots {
        node_for(&mut graph, root);
    }

    while let Some(namespace) = pending.pop() {
        if !provider.is_loaded(&namespace) {
            return Err(GenerateError::NotLoaded(namespace));
        }
        let (from, _) = node_for(&mut graph, &namespace);
        for dependency in provider.dependencies(&namespace) {
            let (to, new) = node_for(&mut graph, &dependency);
            // Edge dependent -> dependency
            graph.update_edge(from, to, ());
            if new {
                pending.push(dependency);
            }
        }
    }

    let sorted = toposort(&graph, None)
        .map_err(|cycle| GenerateError::DependencyCycle(graph[cycle.node_id()].clone()))?;

    // toposort puts dependents first.
    Ok(sorted.into_iter().rev().map(|n| graph[n].clone()).collect())
}
