//! Shared deterministic types for graph execution.
//!
//! These types define stable contracts between the scheduler, the executor,
//! and the I/O layer. They carry no behavior that depends on external state.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::error::{GraphError, NodeExecutionError};

/// An atomic unit of work in an AoT graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    /// Opaque label interpreted only by the action executor.
    pub action: String,
    /// Ids that must complete (successfully or not) before this node runs.
    #[serde(default)]
    pub depends_on: Vec<String>,
}

impl Node {
    pub fn new<I, S>(id: impl Into<String>, action: impl Into<String>, depends_on: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id: id.into(),
            action: action.into(),
            depends_on: depends_on.into_iter().map(Into::into).collect(),
        }
    }
}

/// A validated set of nodes, kept in input order.
///
/// Construction rejects malformed nodes and duplicate ids. Dependency
/// references are not checked here: a dangling reference is a structural
/// problem reported when the graph is scheduled.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Graph {
    nodes: Vec<Node>,
}

impl Graph {
    pub fn new(nodes: Vec<Node>) -> Result<Self, GraphError> {
        let mut seen = HashSet::new();
        for (index, node) in nodes.iter().enumerate() {
            if let Some(reason) = crate::core::invariants::node_violation(node) {
                return Err(GraphError::InvalidNode { index, reason });
            }
            if !seen.insert(node.id.as_str()) {
                return Err(GraphError::InvalidNode {
                    index,
                    reason: format!("duplicate id '{}'", node.id),
                });
            }
        }
        Ok(Self { nodes })
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Tagged outcome of running one node.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeOutcome {
    Success { result: Value },
    Failure { error: String },
}

/// One entry of the ordered result list produced by the executor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "ResultRecord", try_from = "ResultRecord")]
pub struct ExecutionResult {
    pub node_id: String,
    pub action: String,
    pub outcome: NodeOutcome,
}

impl ExecutionResult {
    pub fn success(&self) -> bool {
        matches!(self.outcome, NodeOutcome::Success { .. })
    }

    pub fn result(&self) -> Option<&Value> {
        match &self.outcome {
            NodeOutcome::Success { result } => Some(result),
            NodeOutcome::Failure { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.outcome {
            NodeOutcome::Success { .. } => None,
            NodeOutcome::Failure { error } => Some(error),
        }
    }

    /// The recorded failure as a typed error, if the node failed.
    pub fn failure(&self) -> Option<NodeExecutionError> {
        self.error().map(|message| NodeExecutionError {
            node_id: self.node_id.clone(),
            action: self.action.clone(),
            message: message.to_string(),
        })
    }
}

/// Flat wire form: `result` only on success, `error` only on failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ResultRecord {
    node_id: String,
    action: String,
    success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    result: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl From<ExecutionResult> for ResultRecord {
    fn from(value: ExecutionResult) -> Self {
        let (success, result, error) = match value.outcome {
            NodeOutcome::Success { result } => (true, Some(result), None),
            NodeOutcome::Failure { error } => (false, None, Some(error)),
        };
        Self {
            node_id: value.node_id,
            action: value.action,
            success,
            result,
            error,
        }
    }
}

impl TryFrom<ResultRecord> for ExecutionResult {
    type Error = String;

    fn try_from(record: ResultRecord) -> Result<Self, Self::Error> {
        let outcome = if record.success {
            NodeOutcome::Success {
                result: record.result.unwrap_or(Value::Null),
            }
        } else {
            let error = record
                .error
                .ok_or_else(|| format!("failed result for '{}' has no error", record.node_id))?;
            NodeOutcome::Failure { error }
        };
        Ok(Self {
            node_id: record.node_id,
            action: record.action,
            outcome,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn graph_rejects_duplicate_ids() {
        let err = Graph::new(vec![
            Node::new("1", "research", Vec::<String>::new()),
            Node::new("1", "write", Vec::<String>::new()),
        ])
        .unwrap_err();
        assert_eq!(
            err,
            GraphError::InvalidNode {
                index: 1,
                reason: "duplicate id '1'".to_string()
            }
        );
    }

    #[test]
    fn graph_rejects_blank_action() {
        let err = Graph::new(vec![Node::new("1", "  ", Vec::<String>::new())]).unwrap_err();
        assert!(matches!(err, GraphError::InvalidNode { index: 0, .. }));
    }

    #[test]
    fn failed_result_serializes_error_without_result() {
        let result = ExecutionResult {
            node_id: "1".to_string(),
            action: "research".to_string(),
            outcome: NodeOutcome::Failure {
                error: "boom".to_string(),
            },
        };
        let value = serde_json::to_value(&result).expect("serialize");
        assert_eq!(
            value,
            json!({"node_id": "1", "action": "research", "success": false, "error": "boom"})
        );
    }

    #[test]
    fn successful_result_serializes_result_field() {
        let result = ExecutionResult {
            node_id: "2".to_string(),
            action: "write".to_string(),
            outcome: NodeOutcome::Success {
                result: json!("done:write"),
            },
        };
        let value = serde_json::to_value(&result).expect("serialize");
        assert_eq!(
            value,
            json!({"node_id": "2", "action": "write", "success": true, "result": "done:write"})
        );
    }

    #[test]
    fn failed_record_without_error_is_rejected() {
        let err = serde_json::from_value::<ExecutionResult>(
            json!({"node_id": "1", "action": "a", "success": false}),
        )
        .unwrap_err();
        assert!(err.to_string().contains("has no error"));
    }

    #[test]
    fn failure_exposes_typed_error() {
        let result = ExecutionResult {
            node_id: "3".to_string(),
            action: "review".to_string(),
            outcome: NodeOutcome::Failure {
                error: "timeout".to_string(),
            },
        };
        let failure = result.failure().expect("failure");
        assert_eq!(failure.node_id, "3");
        assert_eq!(failure.to_string(), "node '3' (review) failed: timeout");
    }
}
