//! Deterministic, pure logic for AoT graphs.
//!
//! Core modules must be free of I/O side effects. They operate on in-memory
//! data structures and return deterministic outputs suitable for tests.

pub mod error;
pub mod extract;
pub mod invariants;
pub mod plan;
pub mod schedule;
pub mod types;
