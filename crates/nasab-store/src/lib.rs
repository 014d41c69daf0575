//! Nasab Store - SQLite persistence for the lineage graph
//!
//! Provides:
//! - Connection management with lineage-appropriate pragmas
//! - Embedded SQL migrations with checksums and idempotent application
//! - `SqliteRepo`, implementing the core store traits over a connection
//!   (and, via deref, over a transaction)
//!
//! The schema carries the hard constraints the kernel's advisory checks are
//! backed by: a unique index on the normalized `(name, father_name)`
//! identity and a single-parent unique index on edge child ids.

pub mod db;
pub mod errors;
pub mod migrations;
pub mod repo;

pub use repo::SqliteRepo;

/// Result type alias re-exported from the core taxonomy
pub use nasab_core::errors::Result;
