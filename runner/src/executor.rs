//! Graph executor: runs every node of an AoT graph exactly once.
//!
//! The order comes from [`schedule`], so a graph with a cycle or an unknown
//! reference is rejected before the action executor is ever called. Per-node
//! failures are captured on that node's result and do not block dependents.

use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use crate::actions::ActionExecutor;
use crate::core::error::{GraphError, NodeExecutionError};
use crate::core::schedule::schedule;
use crate::core::types::{ExecutionResult, Graph, NodeOutcome};

/// Execute `graph`, invoking `actions` once per node in dependency order.
///
/// Returns one result per node, in the order the nodes ran.
#[instrument(skip_all, fields(nodes = graph.len()))]
pub fn execute<A: ActionExecutor + ?Sized>(
    graph: &Graph,
    actions: &A,
) -> Result<Vec<ExecutionResult>, GraphError> {
    let order = schedule(graph).inspect_err(|err| warn!(%err, "graph rejected"))?;
    let mut results = Vec::with_capacity(order.len());

    for index in order {
        let node = &graph.nodes()[index];
        debug!(node_id = %node.id, action = %node.action, "executing node");
        let outcome = match actions.execute(&node.action) {
            Ok(result) => NodeOutcome::Success { result },
            Err(err) => {
                let error = format!("{err:#}");
                warn!(node_id = %node.id, %error, "node failed");
                NodeOutcome::Failure { error }
            }
        };
        results.push(ExecutionResult {
            node_id: node.id.clone(),
            action: node.action.clone(),
            outcome,
        });
    }

    let summary = ExecutionSummary::from_results(&results);
    info!(
        succeeded = summary.succeeded,
        failed = summary.failed,
        "graph executed"
    );
    Ok(results)
}

/// Counts over a result list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ExecutionSummary {
    pub succeeded: usize,
    pub failed: usize,
}

impl ExecutionSummary {
    pub fn from_results(results: &[ExecutionResult]) -> Self {
        let succeeded = results.iter().filter(|result| result.success()).count();
        Self {
            succeeded,
            failed: results.len() - succeeded,
        }
    }

    pub fn all_succeeded(&self) -> bool {
        self.failed == 0
    }
}

/// Typed failures from a result list, in execution order.
pub fn failures(results: &[ExecutionResult]) -> Vec<NodeExecutionError> {
    results.iter().filter_map(ExecutionResult::failure).collect()
}
