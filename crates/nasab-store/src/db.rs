//! Database connection management
//!
//! Provides utilities for opening and configuring SQLite connections

#![allow(clippy::result_large_err)]

use std::path::Path;

use rusqlite::Connection;

use crate::errors::from_rusqlite;
use crate::Result;

/// Open a SQLite database at the given path
pub fn open<P: AsRef<Path>>(path: P) -> Result<Connection> {
    Connection::open(path).map_err(|e| from_rusqlite("open", e))
}

/// Open an in-memory SQLite database (for testing)
pub fn open_in_memory() -> Result<Connection> {
    Connection::open_in_memory().map_err(|e| from_rusqlite("open_in_memory", e))
}

/// Configure a connection for lineage workloads
pub fn configure(conn: &Connection) -> Result<()> {
    // Foreign keys back the deletion guard at the storage level
    conn.execute_batch(
        "PRAGMA foreign_keys = ON;
         PRAGMA busy_timeout = 5000;",
    )
    .map_err(|e| from_rusqlite("configure", e))?;

    // WAL improves concurrent reader behavior; journal_mode returns a row
    conn.query_row("PRAGMA journal_mode = WAL", [], |_| Ok(()))
        .map_err(|e| from_rusqlite("configure", e))?;

    Ok(())
}
