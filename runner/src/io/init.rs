//! Initialization helpers for `.aot/` scaffolding.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};

use super::config::{AotConfig, write_config};
use super::graph_store::{GRAPH_SCHEMA, write_graph};
use crate::core::types::{Graph, Node};

/// All canonical paths within `.aot/` for a project root.
#[derive(Debug, Clone)]
pub struct AotPaths {
    pub root: PathBuf,
    pub aot_dir: PathBuf,
    pub config_path: PathBuf,
    pub schema_path: PathBuf,
    pub example_graph_path: PathBuf,
}

impl AotPaths {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let aot_dir = root.join(".aot");
        Self {
            root: root.clone(),
            aot_dir: aot_dir.clone(),
            config_path: aot_dir.join("config.toml"),
            schema_path: aot_dir.join("aot_graph.schema.json"),
            example_graph_path: aot_dir.join("example_graph.json"),
        }
    }

    /// Resolve the configured report directory against the project root.
    pub fn reports_dir(&self, cfg: &AotConfig) -> PathBuf {
        self.root.join(&cfg.report.dir)
    }
}

/// Options for `init_aot`.
#[derive(Debug, Clone)]
pub struct InitOptions {
    /// If true, overwrite existing files.
    pub force: bool,
}

/// Create `.aot/` scaffolding in `root`: default config, graph schema, and
/// an example graph.
///
/// Fails if `.aot/` already exists unless `options.force` is set.
pub fn init_aot(root: &Path, options: &InitOptions) -> Result<AotPaths> {
    let paths = AotPaths::new(root);
    if paths.aot_dir.exists() && !options.force {
        return Err(anyhow!("init: .aot already exists (use --force to overwrite)"));
    }
    if paths.aot_dir.exists() && !paths.aot_dir.is_dir() {
        return Err(anyhow!("init: .aot exists but is not a directory"));
    }

    fs::create_dir_all(&paths.aot_dir)
        .with_context(|| format!("create directory {}", paths.aot_dir.display()))?;

    let cfg = AotConfig::default();
    write_config(&paths.config_path, &cfg)?;
    fs::write(&paths.schema_path, GRAPH_SCHEMA)
        .with_context(|| format!("write {}", paths.schema_path.display()))?;
    write_graph(&paths.example_graph_path, &example_graph()?)?;
    let reports_dir = paths.reports_dir(&cfg);
    fs::create_dir_all(&reports_dir)
        .with_context(|| format!("create directory {}", reports_dir.display()))?;

    Ok(paths)
}

/// research -> {write, review}
fn example_graph() -> Result<Graph> {
    let graph = Graph::new(vec![
        Node::new("1", "research", Vec::<String>::new()),
        Node::new("2", "write", ["1"]),
        Node::new("3", "review", ["1"]),
    ])?;
    Ok(graph)
}
