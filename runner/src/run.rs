//! Orchestration for `aot-runner run`: config, graph loading, execution,
//! and report writing.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{info, instrument};

use crate::actions::from_config;
use crate::executor::execute;
use crate::io::config::load_config;
use crate::io::graph_store::{LoadOptions, load_graph};
use crate::io::init::AotPaths;
use crate::io::report::{RunReport, default_report_path, write_report};

/// Inputs for a single `run` invocation.
#[derive(Debug, Clone)]
pub struct RunRequest {
    /// Project root; `.aot/` lives here.
    pub root: PathBuf,
    pub graph_path: PathBuf,
    /// Input is raw model output rather than a graph document.
    pub extract: bool,
    /// Overrides `<root>/.aot/config.toml`.
    pub config_path: Option<PathBuf>,
    /// Overrides the configured report location.
    pub report_path: Option<PathBuf>,
}

/// Result of a `run` invocation.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub report: RunReport,
    pub report_path: PathBuf,
    /// Number of malformed records dropped while salvaging.
    pub dropped: usize,
}

/// Execute a graph file end to end.
///
/// Structural problems abort before any action runs. Node failures are
/// recorded in the report and do not make this call fail.
#[instrument(skip_all, fields(graph = %request.graph_path.display()))]
pub fn run_graph(request: &RunRequest) -> Result<RunOutcome> {
    let paths = AotPaths::new(&request.root);
    let config_path = request
        .config_path
        .clone()
        .unwrap_or_else(|| paths.config_path.clone());
    let cfg = load_config(&config_path).context("load config")?;

    let actions = from_config(&cfg.executor).context("build action executor")?;
    let options = LoadOptions {
        extract: request.extract,
        salvage: cfg.plan.salvage_malformed_nodes,
    };
    let loaded = load_graph(&request.graph_path, options)?;

    let results = execute(&loaded.graph, actions.as_ref())
        .with_context(|| format!("execute {}", request.graph_path.display()))?;
    let report = RunReport::new(&request.graph_path, results);

    let report_path = request
        .report_path
        .clone()
        .unwrap_or_else(|| default_report_path(&paths.reports_dir(&cfg), &request.graph_path));
    write_report(&report_path, &report)?;
    info!(
        report = %report_path.display(),
        succeeded = report.succeeded,
        failed = report.failed,
        "run complete"
    );

    Ok(RunOutcome {
        report,
        report_path,
        dropped: loaded.dropped.len(),
    })
}

/// Resolve a possibly relative path against the project root.
pub fn resolve(root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::init::{InitOptions, init_aot};
    use serde_json::json;

    #[test]
    fn run_writes_report_for_example_graph() {
        let temp = tempfile::tempdir().expect("tempdir");
        let paths = init_aot(temp.path(), &InitOptions { force: false }).expect("init");

        let outcome = run_graph(&RunRequest {
            root: temp.path().to_path_buf(),
            graph_path: paths.example_graph_path.clone(),
            extract: false,
            config_path: None,
            report_path: None,
        })
        .expect("run");

        assert_eq!(outcome.report.succeeded, 3);
        assert_eq!(
            outcome.report.results[0].result(),
            Some(&json!("Executed: research"))
        );
        assert_eq!(
            outcome.report_path,
            temp.path().join(".aot/reports/example_graph.results.json")
        );
        assert!(outcome.report_path.is_file());
    }

    #[test]
    fn resolve_keeps_absolute_paths() {
        let root = Path::new("/project");
        assert_eq!(resolve(root, Path::new("/tmp/g.json")), PathBuf::from("/tmp/g.json"));
        assert_eq!(resolve(root, Path::new("g.json")), PathBuf::from("/project/g.json"));
    }
}
