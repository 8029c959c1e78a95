//! Graph file loading with schema + invariant validation.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use jsonschema::validator_for;
use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::core::error::GraphError;
use crate::core::plan::{Salvaged, document_from_text, graph_from_document};
use crate::core::types::Graph;

use super::write_atomic;

pub const GRAPH_SCHEMA: &str = include_str!("../../schemas/aot_graph.schema.json");

/// How a graph file should be read.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoadOptions {
    /// Input is raw model output; recover the JSON document from it first.
    pub extract: bool,
    /// Drop malformed nodes instead of rejecting the file.
    pub salvage: bool,
}

/// A loaded graph plus the records dropped while salvaging.
#[derive(Debug, Clone)]
pub struct LoadedGraph {
    pub graph: Graph,
    pub dropped: Vec<GraphError>,
}

/// Load a graph document from disk.
///
/// Strict loads are checked against the embedded JSON Schema before
/// conversion, so every shape problem is reported at once.
#[instrument(skip_all, fields(path = %path.display(), extract = options.extract, salvage = options.salvage))]
pub fn load_graph(path: &Path, options: LoadOptions) -> Result<LoadedGraph> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read graph {}", path.display()))?;
    let value = if options.extract {
        document_from_text(&contents)
            .with_context(|| format!("extract graph from {}", path.display()))?
    } else {
        serde_json::from_str(&contents)
            .with_context(|| format!("parse graph {}", path.display()))?
    };
    if !options.salvage {
        validate_schema(&value)?;
    }

    let Salvaged { graph, dropped } = graph_from_document(&value, options.salvage)
        .with_context(|| format!("load graph {}", path.display()))?;
    for dropped in &dropped {
        warn!(%dropped, "dropped malformed node");
    }
    debug!(nodes = graph.len(), "graph loaded");
    Ok(LoadedGraph { graph, dropped })
}

/// Atomically write a graph document with canonical formatting.
pub fn write_graph(path: &Path, graph: &Graph) -> Result<()> {
    let mut buf = serde_json::to_string_pretty(graph).context("serialize graph")?;
    buf.push('\n');
    write_atomic(path, &buf)
}

fn validate_schema(value: &Value) -> Result<()> {
    let schema: Value = serde_json::from_str(GRAPH_SCHEMA).context("parse graph schema")?;
    let validator = validator_for(&schema).map_err(|err| anyhow!("invalid schema: {}", err))?;
    if validator.is_valid(value) {
        return Ok(());
    }
    let messages = validator
        .iter_errors(value)
        .map(|err| err.to_string())
        .collect::<Vec<_>>();
    Err(anyhow!(
        "graph schema validation failed: {}",
        messages.join("; ")
    ))
}
