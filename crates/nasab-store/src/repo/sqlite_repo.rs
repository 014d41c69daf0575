//! SQLite repository implementation
//!
//! Implements the core `LineageStore` / `LineageStoreMut` traits over a
//! `rusqlite::Connection`. A `Transaction` derefs to `Connection`, so the
//! engine constructs a repo over `&tx` to get transactional semantics.

#![allow(clippy::result_large_err)]

use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension, Row};

use nasab_core::errors::NasabError;
use nasab_core::model::{normalize, Gender, KinLabel, ParentEdge, Person};
use nasab_core::ops::{LineageStore, LineageStoreMut};

use crate::errors::{from_rusqlite, is_unique_violation};
use crate::Result;

const PERSON_COLUMNS: &str = "id, name, gender, father_name, grandfather_name, \
     mother_name, notable, notes, created_at";

/// SQLite-backed lineage store
pub struct SqliteRepo<'c> {
    conn: &'c Connection,
}

impl<'c> SqliteRepo<'c> {
    /// Wrap a connection (or a transaction, via deref)
    pub fn new(conn: &'c Connection) -> Self {
        Self { conn }
    }
}

fn map_person_row(row: &Row<'_>) -> rusqlite::Result<Person> {
    let gender_raw: String = row.get(2)?;
    let gender: Gender = gender_raw.parse().map_err(|e: NasabError| {
        rusqlite::Error::FromSqlConversionFailure(
            2,
            rusqlite::types::Type::Text,
            Box::new(e),
        )
    })?;

    let notable: i64 = row.get(6)?;
    let created_at: i64 = row.get(8)?;

    Ok(Person {
        id: row.get(0)?,
        name: row.get(1)?,
        gender,
        father_name: row.get(3)?,
        grandfather_name: row.get(4)?,
        mother_name: row.get(5)?,
        notable: notable != 0,
        notes: row.get(7)?,
        created_at: DateTime::from_timestamp(created_at, 0).unwrap_or_else(Utc::now),
    })
}

fn map_edge_row(row: &Row<'_>) -> rusqlite::Result<ParentEdge> {
    let label_raw: String = row.get(2)?;
    let label: KinLabel = label_raw.parse().map_err(|e: NasabError| {
        rusqlite::Error::FromSqlConversionFailure(
            2,
            rusqlite::types::Type::Text,
            Box::new(e),
        )
    })?;

    Ok(ParentEdge {
        child_id: row.get(0)?,
        father_id: row.get(1)?,
        label,
    })
}

impl SqliteRepo<'_> {
    fn query_persons(
        &self,
        sql: &str,
        params: &[&dyn rusqlite::ToSql],
        op: &str,
    ) -> Result<Vec<Person>> {
        let mut stmt = self.conn.prepare(sql).map_err(|e| from_rusqlite(op, e))?;
        let rows = stmt
            .query_map(params, map_person_row)
            .map_err(|e| from_rusqlite(op, e))?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| from_rusqlite(op, e))?;
        Ok(rows)
    }
}

impl LineageStore for SqliteRepo<'_> {
    fn person_by_id(&self, id: &str) -> Result<Option<Person>> {
        self.conn
            .query_row(
                &format!("SELECT {PERSON_COLUMNS} FROM persons WHERE id = ?1"),
                [id],
                map_person_row,
            )
            .optional()
            .map_err(|e| from_rusqlite("person_by_id", e))
    }

    fn persons_by_name(&self, name: &str) -> Result<Vec<Person>> {
        self.query_persons(
            &format!("SELECT {PERSON_COLUMNS} FROM persons WHERE name_norm = ?1 ORDER BY id"),
            &[&normalize(name)],
            "persons_by_name",
        )
    }

    fn persons_by_name_and_father(
        &self,
        name: &str,
        father_name: Option<&str>,
    ) -> Result<Vec<Person>> {
        let father_norm = father_name.map(normalize).unwrap_or_default();
        self.query_persons(
            &format!(
                "SELECT {PERSON_COLUMNS} FROM persons \
                 WHERE name_norm = ?1 AND father_norm = ?2 ORDER BY id"
            ),
            &[&normalize(name), &father_norm],
            "persons_by_name_and_father",
        )
    }

    fn persons_by_father_name(&self, father_name: &str) -> Result<Vec<Person>> {
        self.query_persons(
            &format!(
                "SELECT {PERSON_COLUMNS} FROM persons \
                 WHERE father_norm = ?1 AND father_norm != '' ORDER BY id"
            ),
            &[&normalize(father_name)],
            "persons_by_father_name",
        )
    }

    fn list_persons(&self) -> Result<Vec<Person>> {
        self.query_persons(
            &format!("SELECT {PERSON_COLUMNS} FROM persons ORDER BY id"),
            &[],
            "list_persons",
        )
    }

    fn child_count(&self, person_id: &str) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row(
                "SELECT COUNT(*) FROM parent_edges WHERE father_id = ?1",
                [person_id],
                |row| row.get(0),
            )
            .map_err(|e| from_rusqlite("child_count", e))?;
        Ok(count as usize)
    }

    fn outgoing_edge(&self, child_id: &str) -> Result<Option<ParentEdge>> {
        self.conn
            .query_row(
                "SELECT child_id, father_id, label FROM parent_edges WHERE child_id = ?1",
                [child_id],
                map_edge_row,
            )
            .optional()
            .map_err(|e| from_rusqlite("outgoing_edge", e))
    }
}

impl LineageStoreMut for SqliteRepo<'_> {
    fn insert_person(&mut self, person: &Person) -> Result<()> {
        let name_norm = normalize(&person.name);
        let father_norm = person
            .father_name
            .as_deref()
            .map(normalize)
            .unwrap_or_default();

        let result = self.conn.execute(
            "INSERT INTO persons (id, name, name_norm, gender, father_name, father_norm, \
             grandfather_name, mother_name, notable, notes, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
            rusqlite::params![
                person.id,
                person.name,
                name_norm,
                person.gender.as_str(),
                person.father_name,
                father_norm,
                person.grandfather_name,
                person.mother_name,
                i64::from(person.notable),
                person.notes,
                person.created_at.timestamp(),
            ],
        );

        match result {
            Ok(_) => Ok(()),
            // The identity index is the race-proof backstop for the
            // validator's advisory duplicate pre-check
            Err(e) if is_unique_violation(&e, "idx_persons_identity") => {
                Err(NasabError::DuplicateExact {
                    name: name_norm,
                    father_name: father_norm,
                })
            }
            Err(e) => Err(from_rusqlite("insert_person", e)),
        }
    }

    fn upsert_edge(&mut self, edge: &ParentEdge) -> Result<()> {
        self.conn
            .execute(
                "INSERT INTO parent_edges (child_id, father_id, label) VALUES (?1, ?2, ?3)
                 ON CONFLICT (child_id, father_id, label) DO NOTHING",
                rusqlite::params![edge.child_id, edge.father_id, edge.label.as_str()],
            )
            .map_err(|e| from_rusqlite("upsert_edge", e))?;
        Ok(())
    }

    fn delete_person(&mut self, person_id: &str) -> Result<usize> {
        // Outgoing edge rows cascade with the person; incoming rows cannot
        // exist when the deletion guard has passed
        self.conn
            .execute("DELETE FROM persons WHERE id = ?1", [person_id])
            .map_err(|e| from_rusqlite("delete_person", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::migrations::apply_migrations;
    use nasab_core::model::PersonInput;
    use nasab_core::ops::person_ops;

    fn test_conn() -> Connection {
        let mut conn = Connection::open_in_memory().unwrap();
        crate::db::configure(&conn).unwrap();
        apply_migrations(&mut conn).unwrap();
        conn
    }

    fn seed_person(repo: &mut SqliteRepo<'_>, id: &str, name: &str, father: Option<&str>) {
        let mut p = Person::new(id.to_string(), name.to_string(), Gender::Male);
        p.father_name = father.map(str::to_string);
        repo.insert_person(&p).unwrap();
    }

    #[test]
    fn test_insert_and_lookup_case_insensitive() {
        let conn = test_conn();
        let mut repo = SqliteRepo::new(&conn);
        seed_person(&mut repo, "p-1", "Omar", None);

        let found = repo.persons_by_name(" OMAR ").unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Omar");
    }

    #[test]
    fn test_identity_index_is_hard_constraint() {
        let conn = test_conn();
        let mut repo = SqliteRepo::new(&conn);
        seed_person(&mut repo, "p-1", "Ali", Some("Hassan"));

        let mut dup = Person::new("p-2".to_string(), "ALI".to_string(), Gender::Male);
        dup.father_name = Some("HASSAN".to_string());
        let result = repo.insert_person(&dup);
        assert!(matches!(result, Err(NasabError::DuplicateExact { .. })));
    }

    #[test]
    fn test_root_identity_also_unique() {
        let conn = test_conn();
        let mut repo = SqliteRepo::new(&conn);
        seed_person(&mut repo, "p-1", "Omar", None);

        let dup = Person::new("p-2".to_string(), "omar".to_string(), Gender::Male);
        let result = repo.insert_person(&dup);
        assert!(matches!(result, Err(NasabError::DuplicateExact { .. })));
    }

    #[test]
    fn test_edge_upsert_idempotent_and_single_parent() {
        let conn = test_conn();
        let mut repo = SqliteRepo::new(&conn);
        seed_person(&mut repo, "f", "Hassan", None);
        seed_person(&mut repo, "f2", "Khalid", None);
        seed_person(&mut repo, "c", "Ali", Some("Hassan"));

        let edge = ParentEdge::new("c".to_string(), "f".to_string(), KinLabel::SonOf);
        repo.upsert_edge(&edge).unwrap();
        repo.upsert_edge(&edge).unwrap();
        assert_eq!(repo.child_count("f").unwrap(), 1);

        // A second father for the same child violates the single-parent index
        let second = ParentEdge::new("c".to_string(), "f2".to_string(), KinLabel::SonOf);
        assert!(matches!(
            repo.upsert_edge(&second),
            Err(NasabError::Persistence { .. })
        ));
    }

    #[test]
    fn test_delete_cascades_outgoing_edge() {
        let conn = test_conn();
        let mut repo = SqliteRepo::new(&conn);
        seed_person(&mut repo, "f", "Hassan", None);
        seed_person(&mut repo, "c", "Ali", Some("Hassan"));
        repo.upsert_edge(&ParentEdge::new(
            "c".to_string(),
            "f".to_string(),
            KinLabel::SonOf,
        ))
        .unwrap();

        assert_eq!(repo.delete_person("c").unwrap(), 1);
        assert_eq!(repo.child_count("f").unwrap(), 0);
        assert_eq!(repo.delete_person("c").unwrap(), 0);
    }

    #[test]
    fn test_kernel_ops_run_over_sqlite() {
        let conn = test_conn();
        let mut repo = SqliteRepo::new(&conn);
        seed_person(&mut repo, "omar", "Omar", None);
        seed_person(&mut repo, "hassan", "Hassan", Some("Omar"));

        let ali = person_ops::create_person(
            &mut repo,
            PersonInput::new("Ali", "male", "Hassan", "Omar"),
        )
        .unwrap();

        let edge = repo.outgoing_edge(&ali.id).unwrap().unwrap();
        assert_eq!(edge.father_id, "hassan");
        assert_eq!(edge.label, KinLabel::SonOf);
    }

    #[test]
    fn test_round_trip_preserves_fields() {
        let conn = test_conn();
        let mut repo = SqliteRepo::new(&conn);

        let mut p = Person::new("p-1".to_string(), "Fatima".to_string(), Gender::Female);
        p.father_name = Some("Hassan".to_string());
        p.grandfather_name = Some("Omar".to_string());
        p.mother_name = Some("Aisha".to_string());
        p.notable = true;
        p.notes = Some("first recorded".to_string());
        repo.insert_person(&p).unwrap();

        let loaded = repo.person_by_id("p-1").unwrap().unwrap();
        assert_eq!(loaded.gender, Gender::Female);
        assert_eq!(loaded.mother_name.as_deref(), Some("Aisha"));
        assert!(loaded.notable);
        assert_eq!(loaded.notes.as_deref(), Some("first recorded"));
    }
}
