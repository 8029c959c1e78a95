//! Built-in tools the agent can request by name.
//!
//! A tool call names a tool and carries JSON arguments. The model only
//! requests calls; dispatch happens here.

use std::str::FromStr;

use anyhow::{Context, Result, anyhow, bail};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::debug;

pub const CALCULATOR: &str = "calculator";

/// Arithmetic supported by the calculator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl FromStr for Operation {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "add" => Ok(Operation::Add),
            "subtract" => Ok(Operation::Subtract),
            "multiply" => Ok(Operation::Multiply),
            "divide" => Ok(Operation::Divide),
            other => Err(anyhow!("unknown operation: {other}")),
        }
    }
}

/// Apply `operation` to `a` and `b`.
///
/// Division by zero yields infinity rather than an error.
pub fn calculator(a: f64, b: f64, operation: Operation) -> f64 {
    match operation {
        Operation::Add => a + b,
        Operation::Subtract => a - b,
        Operation::Multiply => a * b,
        Operation::Divide if b == 0.0 => f64::INFINITY,
        Operation::Divide => a / b,
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CalculatorArgs {
    a: f64,
    b: f64,
    #[serde(default = "default_operation")]
    operation: String,
}

fn default_operation() -> String {
    "add".to_string()
}

/// Description of the available tools, as shown to a planning model.
pub fn tool_schema() -> Value {
    json!({
        CALCULATOR: {
            "description": "Perform basic arithmetic operations",
            "parameters": {
                "a": {"type": "number", "description": "First number"},
                "b": {"type": "number", "description": "Second number"},
                "operation": {
                    "type": "string",
                    "enum": ["add", "subtract", "multiply", "divide"],
                    "description": "The operation to perform"
                }
            },
            "required": ["a", "b"]
        }
    })
}

/// Run the tool `name` with JSON `arguments`.
pub fn execute_tool(name: &str, arguments: &Value) -> Result<Value> {
    debug!(tool = name, "executing tool");
    match name {
        CALCULATOR => {
            let args = CalculatorArgs::deserialize(arguments)
                .with_context(|| format!("invalid {CALCULATOR} arguments"))?;
            let operation: Operation = args.operation.parse()?;
            Ok(number_value(calculator(args.a, args.b, operation)))
        }
        other => bail!("unknown tool: {other}"),
    }
}

/// JSON has no infinities or NaN; those are carried as strings.
fn number_value(value: f64) -> Value {
    match serde_json::Number::from_f64(value) {
        Some(number) => Value::Number(number),
        None if value.is_nan() => Value::String("nan".to_string()),
        None if value.is_sign_negative() => Value::String("-inf".to_string()),
        None => Value::String("inf".to_string()),
    }
}
