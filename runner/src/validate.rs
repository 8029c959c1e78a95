//! Validation of graph files for `aot-runner validate` and `aot-runner order`.

use std::path::Path;

use anyhow::{Context, Result, bail};

use crate::core::error::GraphError;
use crate::core::invariants::validate_nodes;
use crate::core::schedule::execution_order;
use crate::io::graph_store::{LoadOptions, load_graph};

/// A graph that can be executed, with its execution order.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidateOutcome {
    /// Node ids in the order they would run.
    pub order: Vec<String>,
    /// Records dropped while salvaging (empty for strict loads).
    pub dropped: Vec<GraphError>,
}

/// Load a graph file and check that it can be executed.
///
/// Reports every invariant violation at once, then any cycle found by the
/// scheduler.
pub fn validate_graph_file(path: &Path, options: LoadOptions) -> Result<ValidateOutcome> {
    let loaded = load_graph(path, options)?;
    let errors = validate_nodes(loaded.graph.nodes());
    if !errors.is_empty() {
        bail!("invariant violations:\n- {}", errors.join("\n- "));
    }
    let order = execution_order(&loaded.graph)
        .with_context(|| format!("schedule {}", path.display()))?
        .into_iter()
        .map(|node| node.id.clone())
        .collect();
    Ok(ValidateOutcome {
        order,
        dropped: loaded.dropped,
    })
}
