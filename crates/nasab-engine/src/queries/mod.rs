//! Read-only engine queries.
//!
//! No transaction is taken: reads may observe a snapshot that is stale
//! relative to concurrent writes, which is acceptable for listings, traces,
//! and audits.

#![allow(clippy::result_large_err)]

use rusqlite::Connection;
use tracing::debug;

use nasab_core::errors::Result;
use nasab_core::model::Person;
use nasab_core::ops::person_ops;
use nasab_core::rules::invariants;
use nasab_core::traversal;
use nasab_store::SqliteRepo;

/// List every recorded person
pub fn list_persons(conn: &Connection) -> Result<Vec<Person>> {
    person_ops::list_persons(&SqliteRepo::new(conn))
}

/// Trace the deepest ancestor chain from `(name, father_name)` to a root
pub fn trace_to_root(
    conn: &Connection,
    name: &str,
    father_name: Option<&str>,
) -> Result<Vec<Person>> {
    let chain = traversal::trace_to_root(&SqliteRepo::new(conn), name, father_name)?;
    debug!(start = name, depth = chain.len(), "traced ancestor chain");
    Ok(chain)
}

/// Audit the whole graph against the lineage invariants
pub fn audit_lineage(conn: &Connection) -> Result<()> {
    invariants::audit_lineage(&SqliteRepo::new(conn))
}
