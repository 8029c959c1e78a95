//! Atom-of-Thought graph runner.
//!
//! Executes a graph of atomic actions with declared dependencies, running each
//! node exactly once in dependency order. The architecture enforces a strict
//! separation:
//!
//! - **[`core`]**: Pure, deterministic logic (graph types, validation,
//!   scheduling, plan parsing). No I/O, fully testable in isolation.
//! - **[`io`]**: Side-effecting operations (config, graph files, reports).
//!
//! [`executor`] runs a graph through an [`actions::ActionExecutor`].
//! Orchestration modules ([`run`], [`validate`]) coordinate core logic with
//! I/O to implement CLI commands.

pub mod actions;
pub mod core;
pub mod executor;
pub mod exit_codes;
pub mod io;
pub mod logging;
pub mod run;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
pub mod tools;
pub mod validate;
