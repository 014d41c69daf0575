//! Error translation helpers for the SQLite layer.
//!
//! The store surfaces everything through the core taxonomy; constraint
//! violations on the identity index are translated to `DuplicateExact` at
//! the insert site, everything else becomes `Persistence`.

use nasab_core::errors::NasabError;

/// Create a store error from a rusqlite error
pub fn from_rusqlite(op: &str, err: rusqlite::Error) -> NasabError {
    NasabError::Persistence {
        op: op.to_string(),
        reason: err.to_string(),
    }
}

/// Create a migration error
pub fn migration_error(migration_id: &str, reason: &str) -> NasabError {
    NasabError::Persistence {
        op: "migration".to_string(),
        reason: format!("migration {migration_id} failed: {reason}"),
    }
}

/// Check whether an error is a unique-constraint violation on the named index
pub fn is_unique_violation(err: &rusqlite::Error, index_name: &str) -> bool {
    match err {
        rusqlite::Error::SqliteFailure(failure, Some(message)) => {
            failure.code == rusqlite::ErrorCode::ConstraintViolation
                && message.contains(index_name)
        }
        _ => false,
    }
}
