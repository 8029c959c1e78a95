//! End-to-end properties of graph execution through the public API.
//!
//! Each test builds a graph, runs it through `execute` with a scripted action
//! executor, and checks the ordered result list.

use std::collections::HashMap;

use anyhow::{Result, anyhow};
use aot_runner::core::error::GraphError;
use aot_runner::core::plan::graph_from_value;
use aot_runner::core::types::{ExecutionResult, Graph};
use aot_runner::executor::execute;
use aot_runner::test_support::{RecordingExecutor, done_executor, graph, node};
use serde_json::{Value, json};

fn position(results: &[ExecutionResult], id: &str) -> usize {
    results
        .iter()
        .position(|result| result.node_id == id)
        .unwrap_or_else(|| panic!("missing result for {id}"))
}

/// Research fans out to write and review; each result is `done:<action>`.
#[test]
fn research_write_review_example() {
    let g = graph_from_value(&json!({"nodes": [
        {"id": "1", "action": "research", "depends_on": []},
        {"id": "2", "action": "write", "depends_on": ["1"]},
        {"id": "3", "action": "review", "depends_on": ["1"]}
    ]}))
    .expect("graph");

    let results = execute(&g, &done_executor).expect("execute");

    assert_eq!(results.len(), 3);
    assert_eq!(results[0].node_id, "1");
    for result in &results {
        assert!(result.success());
        assert_eq!(
            result.result(),
            Some(&json!(format!("done:{}", result.action)))
        );
    }
}

/// Every node appears once, after all of its dependencies.
#[test]
fn results_respect_dependencies_in_a_diamond_with_tail() {
    let g = graph(vec![
        node("publish", "publish", &["merge"]),
        node("merge", "merge", &["left", "right"]),
        node("right", "right", &["start"]),
        node("left", "left", &["start"]),
        node("start", "start", &[]),
        node("lonely", "lonely", &[]),
    ]);

    let results = execute(&g, &done_executor).expect("execute");

    assert_eq!(results.len(), g.len());
    for n in g.nodes() {
        let at = position(&results, &n.id);
        for dep in &n.depends_on {
            assert!(position(&results, dep) < at, "{dep} must precede {}", n.id);
        }
    }
}

/// A failing node is reported, and its dependent still runs.
#[test]
fn failure_is_isolated_to_its_node() {
    let g = graph(vec![node("A", "fail", &[]), node("B", "succeed", &["A"])]);
    let scripted: HashMap<&str, Result<Value, &str>> = HashMap::from([
        ("fail", Err("forced failure")),
        ("succeed", Ok(json!("fine"))),
    ]);
    let actions = |action: &str| -> Result<Value> {
        match scripted.get(action) {
            Some(Ok(value)) => Ok(value.clone()),
            Some(Err(message)) => Err(anyhow!("{message}")),
            None => Err(anyhow!("unscripted action {action}")),
        }
    };

    let results = execute(&g, &actions).expect("execute");

    assert_eq!(results.len(), 2);
    assert!(!results[0].success());
    assert_eq!(results[0].error(), Some("forced failure"));
    assert!(results[1].success());
    assert_eq!(results[1].result(), Some(&json!("fine")));
}

/// A two-node cycle aborts the call, names both ids, and runs nothing.
#[test]
fn cycle_is_a_structural_error() {
    let g = graph(vec![node("A", "one", &["B"]), node("B", "two", &["A"])]);
    let recorder = RecordingExecutor::new(done_executor);

    let err = execute(&g, &recorder).unwrap_err();

    match err {
        GraphError::Structure { stranded, dangling } => {
            assert_eq!(stranded, vec!["A", "B"]);
            assert!(dangling.is_empty());
        }
        other => panic!("expected structure error, got {other:?}"),
    }
    assert!(recorder.calls().is_empty());
}

/// A reference to a missing id is a structural error, not a hang.
#[test]
fn unknown_reference_is_a_structural_error() {
    let g = graph(vec![node("1", "research", &[]), node("2", "write", &["7"])]);
    let recorder = RecordingExecutor::new(done_executor);

    let err = execute(&g, &recorder).unwrap_err();

    assert_eq!(err.stranded(), ["2"]);
    assert!(err.to_string().contains("unknown dependencies [2 -> 7]"));
    assert!(recorder.calls().is_empty());
}

/// Malformed nodes never reach the executor.
#[test]
fn malformed_node_is_rejected_at_construction() {
    let err = graph_from_value(&json!({"nodes": [
        {"id": "1", "action": "research", "depends_on": []},
        {"id": "2", "depends_on": ["1"]}
    ]}))
    .unwrap_err();
    assert_eq!(
        err,
        GraphError::InvalidNode {
            index: 1,
            reason: "missing 'action'".to_string()
        }
    );
}

#[test]
fn empty_graph_yields_empty_results() {
    let results = execute(&Graph::default(), &done_executor).expect("execute");
    assert!(results.is_empty());
}

/// Same graph, same executor, same ordering every time.
#[test]
fn execution_order_is_deterministic() {
    let g = graph(vec![
        node("d", "d", &["a"]),
        node("a", "a", &[]),
        node("c", "c", &["a"]),
        node("b", "b", &[]),
        node("e", "e", &["b", "c"]),
    ]);
    let first = execute(&g, &done_executor).expect("execute");
    for _ in 0..10 {
        assert_eq!(execute(&g, &done_executor).expect("execute"), first);
    }
    let ids: Vec<&str> = first.iter().map(|r| r.node_id.as_str()).collect();
    assert_eq!(ids, vec!["a", "d", "c", "b", "e"]);
}
