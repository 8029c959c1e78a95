//! Run reports: the ordered result list of one graph execution, on disk.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::types::ExecutionResult;
use crate::executor::ExecutionSummary;

use super::write_atomic;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    /// Graph file the results came from.
    pub graph: String,
    pub succeeded: usize,
    pub failed: usize,
    pub results: Vec<ExecutionResult>,
}

impl RunReport {
    pub fn new(graph_path: &Path, results: Vec<ExecutionResult>) -> Self {
        let summary = ExecutionSummary::from_results(&results);
        Self {
            graph: graph_path.display().to_string(),
            succeeded: summary.succeeded,
            failed: summary.failed,
            results,
        }
    }

    pub fn summary(&self) -> ExecutionSummary {
        ExecutionSummary {
            succeeded: self.succeeded,
            failed: self.failed,
        }
    }
}

/// Default report location: `<dir>/<graph stem>.results.json`.
pub fn default_report_path(reports_dir: &Path, graph_path: &Path) -> PathBuf {
    let stem = graph_path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "graph".to_string());
    reports_dir.join(format!("{stem}.results.json"))
}

/// Atomically write a report as pretty JSON (temp file + rename).
pub fn write_report(path: &Path, report: &RunReport) -> Result<()> {
    debug!(path = %path.display(), results = report.results.len(), "writing report");
    let mut buf = serde_json::to_string_pretty(report).context("serialize report")?;
    buf.push('\n');
    write_atomic(path, &buf)
}

pub fn load_report(path: &Path) -> Result<RunReport> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read report {}", path.display()))?;
    serde_json::from_str(&contents).with_context(|| format!("parse report {}", path.display()))
}
