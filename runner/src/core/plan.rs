//! Conversion of plan documents into graphs.
//!
//! A plan document is a JSON object `{"nodes": [...]}` where each node record
//! has a string `id`, a string `action`, and an array-of-strings
//! `depends_on`. Two policies are offered:
//!
//! - [`graph_from_value`] is strict: the first malformed record rejects the
//!   whole document with [`GraphError::InvalidNode`].
//! - [`salvage_graph`] keeps every well-formed record and reports the rest,
//!   which is how a plan producer recovers from partially broken model output.

use serde_json::{Map, Value};

use crate::core::error::GraphError;
use crate::core::extract::extract_json;
use crate::core::invariants::node_violation;
use crate::core::types::{Graph, Node};

/// A graph built from the well-formed records of a document.
#[derive(Debug, Clone, PartialEq)]
pub struct Salvaged {
    pub graph: Graph,
    /// Records that were dropped, with the reason.
    pub dropped: Vec<GraphError>,
}

/// Strictly convert a plan document into a graph.
pub fn graph_from_value(value: &Value) -> Result<Graph, GraphError> {
    let records = node_records(value)?;
    let nodes = records
        .iter()
        .enumerate()
        .map(|(index, record)| {
            node_from_record(record).map_err(|reason| GraphError::InvalidNode { index, reason })
        })
        .collect::<Result<Vec<_>, _>>()?;
    Graph::new(nodes)
}

/// Convert a plan document, dropping malformed records and repeated ids.
///
/// Fails only if the document has no `nodes` array or no record survives.
pub fn salvage_graph(value: &Value) -> Result<Salvaged, GraphError> {
    let records = node_records(value)?;
    let mut nodes: Vec<Node> = Vec::new();
    let mut dropped = Vec::new();

    for (index, record) in records.iter().enumerate() {
        let node = match node_from_record(record) {
            Ok(node) => node,
            Err(reason) => {
                dropped.push(GraphError::InvalidNode { index, reason });
                continue;
            }
        };
        if nodes.iter().any(|kept| kept.id == node.id) {
            dropped.push(GraphError::InvalidNode {
                index,
                reason: format!("duplicate id '{}'", node.id),
            });
            continue;
        }
        nodes.push(node);
    }

    if nodes.is_empty() {
        return Err(GraphError::InvalidDocument(
            "no well-formed nodes".to_string(),
        ));
    }

    Ok(Salvaged {
        graph: Graph::new(nodes)?,
        dropped,
    })
}

/// Convert a plan document with the strict or the salvaging policy.
pub fn graph_from_document(value: &Value, salvage: bool) -> Result<Salvaged, GraphError> {
    if salvage {
        return salvage_graph(value);
    }
    Ok(Salvaged {
        graph: graph_from_value(value)?,
        dropped: Vec::new(),
    })
}

/// Recover a plan document from model text.
pub fn document_from_text(text: &str) -> Result<Value, GraphError> {
    extract_json(text)
        .ok_or_else(|| GraphError::InvalidDocument("no JSON document found".to_string()))
}

fn node_records(value: &Value) -> Result<&Vec<Value>, GraphError> {
    let object = value
        .as_object()
        .ok_or_else(|| GraphError::InvalidDocument("expected a JSON object".to_string()))?;
    match object.get("nodes") {
        Some(Value::Array(records)) => Ok(records),
        Some(_) => Err(GraphError::InvalidDocument(
            "'nodes' must be an array".to_string(),
        )),
        None => Err(GraphError::InvalidDocument("missing 'nodes'".to_string())),
    }
}

fn node_from_record(record: &Value) -> Result<Node, String> {
    let object = record
        .as_object()
        .ok_or_else(|| "node must be an object".to_string())?;
    let id = string_field(object, "id")?;
    let action = string_field(object, "action")?;
    let depends_on = match object.get("depends_on") {
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| {
                item.as_str()
                    .map(str::to_string)
                    .ok_or_else(|| format!("{id}: depends_on entries must be strings"))
            })
            .collect::<Result<Vec<_>, _>>()?,
        Some(_) => return Err(format!("{id}: depends_on must be an array")),
        None => return Err(format!("{id}: missing depends_on")),
    };
    let node = Node {
        id,
        action,
        depends_on,
    };
    match node_violation(&node) {
        Some(reason) => Err(reason),
        None => Ok(node),
    }
}

fn string_field(object: &Map<String, Value>, key: &str) -> Result<String, String> {
    match object.get(key) {
        Some(Value::String(value)) => Ok(value.clone()),
        Some(_) => Err(format!("'{key}' must be a string")),
        None => Err(format!("missing '{key}'")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn strict_parse_keeps_input_order() {
        let value = json!({"nodes": [
            {"id": "1", "action": "research", "depends_on": []},
            {"id": "2", "action": "write", "depends_on": ["1"]}
        ]});
        let graph = graph_from_value(&value).expect("graph");
        let ids: Vec<&str> = graph.nodes().iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2"]);
        assert_eq!(graph.nodes()[1].depends_on, vec!["1".to_string()]);
    }

    #[test]
    fn strict_parse_rejects_non_array_depends_on() {
        let value = json!({"nodes": [
            {"id": "1", "action": "research", "depends_on": "none"}
        ]});
        let err = graph_from_value(&value).unwrap_err();
        assert_eq!(
            err,
            GraphError::InvalidNode {
                index: 0,
                reason: "1: depends_on must be an array".to_string()
            }
        );
    }

    #[test]
    fn strict_parse_rejects_missing_action() {
        let value = json!({"nodes": [{"id": "1", "depends_on": []}]});
        let err = graph_from_value(&value).unwrap_err();
        assert_eq!(err.to_string(), "invalid node at index 0: missing 'action'");
    }

    #[test]
    fn missing_nodes_is_invalid_document() {
        let err = graph_from_value(&json!({"steps": []})).unwrap_err();
        assert_eq!(err, GraphError::InvalidDocument("missing 'nodes'".to_string()));
    }

    #[test]
    fn salvage_drops_malformed_and_duplicate_records() {
        let value = json!({"nodes": [
            {"id": "1", "action": "research", "depends_on": []},
            {"id": "2", "action": "write", "depends_on": "1"},
            {"id": "1", "action": "again", "depends_on": []},
            {"id": "3", "action": "review", "depends_on": ["1"]},
            "not a node"
        ]});
        let salvaged = salvage_graph(&value).expect("salvage");
        let ids: Vec<&str> = salvaged
            .graph
            .nodes()
            .iter()
            .map(|n| n.id.as_str())
            .collect();
        assert_eq!(ids, vec!["1", "3"]);
        let indices: Vec<usize> = salvaged
            .dropped
            .iter()
            .map(|err| match err {
                GraphError::InvalidNode { index, .. } => *index,
                other => panic!("unexpected {other:?}"),
            })
            .collect();
        assert_eq!(indices, vec![1, 2, 4]);
    }

    #[test]
    fn salvage_fails_when_nothing_survives() {
        let value = json!({"nodes": [{"id": 1}]});
        let err = salvage_graph(&value).unwrap_err();
        assert_eq!(
            err,
            GraphError::InvalidDocument("no well-formed nodes".to_string())
        );
    }

    #[test]
    fn document_from_text_reads_fenced_model_output() {
        let text = "```json\n{\"nodes\": [{\"id\": \"1\", \"action\": \"research\", \"depends_on\": []}]}\n```";
        let value = document_from_text(text).expect("document");
        let salvaged = graph_from_document(&value, false).expect("graph");
        assert_eq!(salvaged.graph.len(), 1);
        assert!(salvaged.dropped.is_empty());
    }

    #[test]
    fn document_from_text_without_json_fails() {
        let err = document_from_text("I could not make a plan.").unwrap_err();
        assert_eq!(
            err,
            GraphError::InvalidDocument("no JSON document found".to_string())
        );
    }

    #[test]
    fn graph_from_document_picks_policy() {
        let value = json!({"nodes": [
            {"id": "1", "action": "research", "depends_on": []},
            {"id": "2", "action": "write"}
        ]});
        assert!(matches!(
            graph_from_document(&value, false),
            Err(GraphError::InvalidNode { index: 1, .. })
        ));
        let salvaged = graph_from_document(&value, true).expect("salvage");
        assert_eq!(salvaged.graph.len(), 1);
        assert_eq!(salvaged.dropped.len(), 1);
    }
}
