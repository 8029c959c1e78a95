//! Error taxonomy for graph construction and execution.
//!
//! Two failure scopes are kept apart:
//! - [`NodeExecutionError`] is local to one node. It is recorded on that
//!   node's result and never aborts the graph.
//! - [`GraphError`] means the graph itself cannot be executed. It aborts the
//!   whole `execute` call before any action runs.

use thiserror::Error;

/// A dependency entry that names an id not present in the graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DanglingRef {
    pub node_id: String,
    pub missing: String,
}

impl std::fmt::Display for DanglingRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.node_id, self.missing)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// Cycle or unknown reference: these nodes can never become ready.
    #[error(
        "graph cannot be executed: stranded nodes [{}]{}",
        .stranded.join(", "),
        dangling_suffix(.dangling)
    )]
    Structure {
        /// Unreachable node ids, in input order.
        stranded: Vec<String>,
        /// References to ids that do not exist.
        dangling: Vec<DanglingRef>,
    },

    /// A node is malformed or repeats an id; rejected before execution.
    #[error("invalid node at index {index}: {reason}")]
    InvalidNode { index: usize, reason: String },

    /// The input document is not a graph at all.
    #[error("invalid graph document: {0}")]
    InvalidDocument(String),
}

impl GraphError {
    /// Ids affected by a structural error (empty for other variants).
    pub fn stranded(&self) -> &[String] {
        match self {
            GraphError::Structure { stranded, .. } => stranded,
            _ => &[],
        }
    }
}

fn dangling_suffix(dangling: &[DanglingRef]) -> String {
    if dangling.is_empty() {
        return String::new();
    }
    let refs: Vec<String> = dangling.iter().map(ToString::to_string).collect();
    format!("; unknown dependencies [{}]", refs.join(", "))
}

/// Failure of the action executor for one node.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("node '{node_id}' ({action}) failed: {message}")]
pub struct NodeExecutionError {
    pub node_id: String,
    pub action: String,
    pub message: String,
}
