//! Nasab Engine - Orchestration layer
//!
//! Coordinates the core lineage kernel with SQLite persistence: each
//! mutating command runs inside one transaction, gated by a pre-resolved
//! access decision; queries run read-only against the live connection.

pub mod access;
pub mod commands;
pub mod queries;

pub use access::AccessDecision;
pub use commands::{apply_engine_command, EngineCommand, EngineCommandResult};
