//! Runner configuration stored at `.aot/config.toml`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::actions::DEFAULT_STUB_TEMPLATE;

use super::write_atomic;

/// Runner configuration (TOML).
///
/// Meant to be edited by humans. Missing fields fall back to defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct AotConfig {
    pub executor: ExecutorConfig,
    pub plan: PlanConfig,
    pub report: ReportConfig,
}

/// Which action executor `aot-runner run` uses.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ExecutorKind {
    /// Render `stub_template` for every action.
    #[default]
    Stub,
    /// Treat every action as a JSON tool call.
    Tools,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ExecutorConfig {
    pub kind: ExecutorKind,
    /// minijinja template with an `action` variable.
    pub stub_template: String,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            kind: ExecutorKind::default(),
            stub_template: DEFAULT_STUB_TEMPLATE.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct PlanConfig {
    /// Drop malformed nodes instead of rejecting the whole graph.
    pub salvage_malformed_nodes: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ReportConfig {
    /// Directory for run reports, relative to the project root.
    pub dir: PathBuf,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(".aot/reports"),
        }
    }
}

impl AotConfig {
    pub fn validate(&self) -> Result<()> {
        if self.executor.kind == ExecutorKind::Stub && self.executor.stub_template.trim().is_empty()
        {
            return Err(anyhow!("executor.stub_template must be non-empty"));
        }
        if self.report.dir.as_os_str().is_empty() {
            return Err(anyhow!("report.dir must be non-empty"));
        }
        Ok(())
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `AotConfig::default()`.
pub fn load_config(path: &Path) -> Result<AotConfig> {
    if !path.exists() {
        debug!(path = %path.display(), "config missing, using defaults");
        let cfg = AotConfig::default();
        cfg.validate()?;
        return Ok(cfg);
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: AotConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()?;
    debug!(path = %path.display(), executor = ?cfg.executor.kind, "config loaded");
    Ok(cfg)
}

/// Atomically write config to disk (temp file + rename).
pub fn write_config(path: &Path, cfg: &AotConfig) -> Result<()> {
    cfg.validate()?;
    let mut buf = toml::to_string_pretty(cfg).context("serialize config toml")?;
    buf.push('\n');
    write_atomic(path, &buf)
}
