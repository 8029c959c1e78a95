//! Semantic invariants not expressible via JSON Schema.

use std::collections::HashSet;

use crate::core::types::Node;

/// Why a single node is malformed, or `None` if it is well formed:
/// - non-blank `id`
/// - non-blank `action`
/// - no blank entries in `depends_on`
pub fn node_violation(node: &Node) -> Option<String> {
    if node.id.trim().is_empty() {
        return Some("id must be a non-empty string".to_string());
    }
    if node.action.trim().is_empty() {
        return Some(format!("{}: action must be a non-empty string", node.id));
    }
    if node.depends_on.iter().any(|dep| dep.trim().is_empty()) {
        return Some(format!("{}: depends_on contains an empty id", node.id));
    }
    None
}

/// Collect every invariant violation in a node list, in input order:
/// - malformed nodes
/// - duplicate ids
/// - references to unknown ids
/// - nodes depending on themselves
///
/// Cycles longer than one node are left to the scheduler, which reports
/// them with the full set of stranded ids.
pub fn validate_nodes(nodes: &[Node]) -> Vec<String> {
    let mut errors = Vec::new();
    let known: HashSet<&str> = nodes.iter().map(|node| node.id.as_str()).collect();
    let mut seen = HashSet::new();

    for (index, node) in nodes.iter().enumerate() {
        if let Some(reason) = node_violation(node) {
            errors.push(format!("nodes[{}]: {}", index, reason));
            continue;
        }
        if !seen.insert(node.id.as_str()) {
            errors.push(format!("duplicate id '{}' at nodes[{}]", node.id, index));
        }
        for dep in &node.depends_on {
            if dep == &node.id {
                errors.push(format!("{}: depends on itself", node.id));
            } else if !known.contains(dep.as_str()) {
                errors.push(format!("{}: unknown dependency '{}'", node.id, dep));
            }
        }
    }

    errors
}
