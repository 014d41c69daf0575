//! Engine-level mutating commands.
//!
//! Each command executes as one SQLite transaction: the transaction is a
//! scoped value, so every error path rolls back on drop and only the
//! success path commits. The access check runs before the transaction is
//! even opened.

#![allow(clippy::result_large_err)]

use rusqlite::Connection;
use tracing::info;

use nasab_core::errors::Result;
use nasab_core::model::{Person, PersonInput, PersonSelector};
use nasab_core::ops::person_ops;
use nasab_store::errors::from_rusqlite;
use nasab_store::SqliteRepo;

use crate::access::AccessDecision;

/// Mutating engine commands
#[derive(Debug, Clone)]
pub enum EngineCommand {
    /// Admit and record a new person
    CreatePerson { input: PersonInput },
    /// Remove a childless person resolved by the selector
    DeletePerson { selector: PersonSelector },
}

impl EngineCommand {
    fn op_name(&self) -> &'static str {
        match self {
            EngineCommand::CreatePerson { .. } => "create_person",
            EngineCommand::DeletePerson { .. } => "delete_person",
        }
    }
}

/// Result of applying an engine command
#[derive(Debug, Clone)]
pub enum EngineCommandResult {
    /// The newly recorded person
    Created(Person),
    /// The removed person
    Deleted(Person),
}

/// Apply a mutating command inside one transaction.
///
/// # Errors
///
/// `Unauthorized` when access is denied; otherwise whatever the kernel's
/// validation or the store raises. Nothing is committed on any error.
pub fn apply_engine_command(
    cmd: EngineCommand,
    conn: &mut Connection,
    access: AccessDecision,
) -> Result<EngineCommandResult> {
    access.ensure(cmd.op_name())?;

    let tx = conn
        .transaction()
        .map_err(|e| from_rusqlite("transaction", e))?;

    let result = {
        let mut repo = SqliteRepo::new(&tx);
        match cmd {
            EngineCommand::CreatePerson { input } => {
                let person = person_ops::create_person(&mut repo, input)?;
                info!(person_id = %person.id, name = %person.name, "created person");
                EngineCommandResult::Created(person)
            }
            EngineCommand::DeletePerson { selector } => {
                let person = person_ops::delete_person(&mut repo, &selector)?;
                info!(person_id = %person.id, name = %person.name, "deleted person");
                EngineCommandResult::Deleted(person)
            }
        }
    };

    tx.commit().map_err(|e| from_rusqlite("commit", e))?;
    Ok(result)
}
