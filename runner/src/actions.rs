//! Action executor abstraction.
//!
//! The [`ActionExecutor`] trait decouples graph execution from whatever
//! actually performs an action (tool dispatch, a model call, a stub). Tests use
//! closures or recording executors without touching any backend.

use anyhow::{Context, Result, anyhow};
use minijinja::{Environment, context};
use serde_json::Value;
use tracing::debug;

use crate::core::extract::extract_object;
use crate::io::config::{ExecutorConfig, ExecutorKind};
use crate::tools::execute_tool;

pub const DEFAULT_STUB_TEMPLATE: &str = "Executed: {{ action }}";

/// Maps an action label to a produced value, or fails.
pub trait ActionExecutor {
    fn execute(&self, action: &str) -> Result<Value>;
}

impl<F> ActionExecutor for F
where
    F: Fn(&str) -> Result<Value>,
{
    fn execute(&self, action: &str) -> Result<Value> {
        self(action)
    }
}

/// Placeholder executor that renders a template instead of doing work.
pub struct StubExecutor {
    env: Environment<'static>,
    template: String,
}

impl StubExecutor {
    /// Build a stub from a minijinja template with an `action` variable.
    pub fn new(template: &str) -> Result<Self> {
        let env = Environment::new();
        env.template_from_str(template).context("compile stub template")?;
        Ok(Self {
            env,
            template: template.to_string(),
        })
    }
}

impl ActionExecutor for StubExecutor {
    fn execute(&self, action: &str) -> Result<Value> {
        let rendered = self
            .env
            .render_str(&self.template, context! { action => action })
            .context("render stub template")?;
        Ok(Value::String(rendered))
    }
}

/// Executor that treats each action as a tool call document:
/// `{"tool": "<name>", "arguments": {...}}`.
#[derive(Debug, Default, Clone, Copy)]
pub struct ToolExecutor;

impl ActionExecutor for ToolExecutor {
    fn execute(&self, action: &str) -> Result<Value> {
        let call = extract_object(action).ok_or_else(|| anyhow!("unknown action: {action}"))?;
        let tool = call
            .get("tool")
            .and_then(Value::as_str)
            .ok_or_else(|| anyhow!("tool call missing 'tool'"))?;
        let arguments = call
            .get("arguments")
            .ok_or_else(|| anyhow!("tool call missing 'arguments'"))?;
        debug!(tool, "dispatching tool call");
        execute_tool(tool, arguments).with_context(|| format!("tool {tool}"))
    }
}

/// Build the executor selected by configuration.
pub fn from_config(cfg: &ExecutorConfig) -> Result<Box<dyn ActionExecutor>> {
    match cfg.kind {
        ExecutorKind::Stub => Ok(Box::new(StubExecutor::new(&cfg.stub_template)?)),
        ExecutorKind::Tools => Ok(Box::new(ToolExecutor)),
    }
}
