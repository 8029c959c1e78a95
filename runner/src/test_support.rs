//! Test-only helpers for constructing graphs and observing action calls.

use std::cell::RefCell;

use anyhow::Result;
use serde_json::Value;

use crate::actions::ActionExecutor;
use crate::core::types::{Graph, Node};

/// Create a node with the given dependencies.
pub fn node(id: &str, action: &str, depends_on: &[&str]) -> Node {
    Node::new(id, action, depends_on.iter().copied())
}

/// Build a graph from well-formed nodes, panicking on invalid input.
pub fn graph(nodes: Vec<Node>) -> Graph {
    Graph::new(nodes).expect("test graph should be valid")
}

/// Deterministic action that returns `done:<action>`.
pub fn done_executor(action: &str) -> Result<Value> {
    Ok(Value::String(format!("done:{action}")))
}

/// Wraps an action executor and records every action it receives.
pub struct RecordingExecutor<F> {
    inner: F,
    calls: RefCell<Vec<String>>,
}

impl<F> RecordingExecutor<F> {
    pub fn new(inner: F) -> Self {
        Self {
            inner,
            calls: RefCell::new(Vec::new()),
        }
    }

    /// Actions received so far, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

impl<F: ActionExecutor> ActionExecutor for RecordingExecutor<F> {
    fn execute(&self, action: &str) -> Result<Value> {
        self.calls.borrow_mut().push(action.to_string());
        self.inner.execute(action)
    }
}

/// Write `contents` to `name` inside a fresh temp dir.
pub fn write_temp_file(
    name: &str,
    contents: &str,
) -> Result<(tempfile::TempDir, std::path::PathBuf)> {
    let temp = tempfile::tempdir()?;
    let path = temp.path().join(name);
    std::fs::write(&path, contents)?;
    Ok((temp, path))
}
