//! Deterministic topological scheduling for AoT graphs.
//!
//! Kahn-style worklist: every node carries a count of unresolved
//! dependencies, and the ready set holds nodes whose count reached zero. Each
//! step removes one node from the unresolved set, so the walk terminates after
//! at most `len` steps. Whatever is left unresolved at the end is stranded by a
//! cycle or by a reference to an unknown id.
//!
//! A failed node still counts as complete, so readiness never depends on
//! action outcomes and the full order can be computed before anything runs.

use std::collections::{BTreeSet, HashMap, HashSet};

use crate::core::error::{DanglingRef, GraphError};
use crate::core::types::{Graph, Node};

/// Compute the execution order as indices into `graph.nodes()`.
///
/// Among nodes that are ready at the same time, the one that appears first in
/// the input runs first.
pub fn schedule(graph: &Graph) -> Result<Vec<usize>, GraphError> {
    let nodes = graph.nodes();
    let index: HashMap<&str, usize> = nodes
        .iter()
        .enumerate()
        .map(|(i, node)| (node.id.as_str(), i))
        .collect();

    let mut pending = vec![0usize; nodes.len()];
    let mut dependents: Vec<Vec<usize>> = vec![Vec::new(); nodes.len()];
    let mut dangling = Vec::new();

    for (i, node) in nodes.iter().enumerate() {
        let mut unique = HashSet::new();
        for dep in &node.depends_on {
            if !unique.insert(dep.as_str()) {
                continue;
            }
            // Unknown ids still count as pending so the node is never released.
            pending[i] += 1;
            match index.get(dep.as_str()) {
                Some(&upstream) => dependents[upstream].push(i),
                None => dangling.push(DanglingRef {
                    node_id: node.id.clone(),
                    missing: dep.clone(),
                }),
            }
        }
    }

    let mut ready: BTreeSet<usize> = (0..nodes.len()).filter(|&i| pending[i] == 0).collect();
    let mut order = Vec::with_capacity(nodes.len());

    while let Some(next) = ready.pop_first() {
        order.push(next);
        for &dependent in &dependents[next] {
            pending[dependent] -= 1;
            if pending[dependent] == 0 {
                ready.insert(dependent);
            }
        }
    }

    if order.len() < nodes.len() {
        let stranded = nodes
            .iter()
            .zip(&pending)
            .filter(|(_, count)| **count > 0)
            .map(|(node, _)| node.id.clone())
            .collect();
        return Err(GraphError::Structure { stranded, dangling });
    }

    Ok(order)
}

/// Nodes in execution order.
pub fn execution_order(graph: &Graph) -> Result<Vec<&Node>, GraphError> {
    let order = schedule(graph)?;
    Ok(order.into_iter().map(|i| &graph.nodes()[i]).collect())
}
