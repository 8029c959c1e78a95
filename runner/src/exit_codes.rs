//! Stable exit codes for runner CLI commands.

/// Command succeeded; for `run`, every node succeeded.
pub const OK: i32 = 0;
/// Invalid input, config, or a graph that cannot be executed.
pub const INVALID: i32 = 1;
/// `aot-runner run` executed every node but some of them failed.
pub const NODE_FAILURES: i32 = 2;
