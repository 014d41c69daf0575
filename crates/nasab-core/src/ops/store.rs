use std::collections::HashMap;

use crate::errors::{NasabError, Result};
use crate::model::{normalize, ParentEdge, Person};

use super::repo::{LineageStore, LineageStoreMut};

/// In-memory lineage store
///
/// HashMap-backed implementation of the store traits, used by unit tests and
/// single-process callers that do not need durability. Enforces the same
/// hard constraints the SQLite store enforces: unique `(name, father_name)`
/// identity and a single outgoing edge per child.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    /// Map of person ID to Person
    persons: HashMap<String, Person>,
    /// Parentage edges, at most one per child
    edges: Vec<ParentEdge>,
}

impl MemoryStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    fn identity_key(person: &Person) -> (String, String) {
        (
            normalize(&person.name),
            person.father_name.as_deref().map(normalize).unwrap_or_default(),
        )
    }
}

impl LineageStore for MemoryStore {
    fn person_by_id(&self, id: &str) -> Result<Option<Person>> {
        Ok(self.persons.get(id).cloned())
    }

    fn persons_by_name(&self, name: &str) -> Result<Vec<Person>> {
        let needle = normalize(name);
        Ok(self
            .persons
            .values()
            .filter(|p| normalize(&p.name) == needle)
            .cloned()
            .collect())
    }

    fn persons_by_name_and_father(
        &self,
        name: &str,
        father_name: Option<&str>,
    ) -> Result<Vec<Person>> {
        let needle = normalize(name);
        let father_needle = father_name.map(normalize).unwrap_or_default();
        Ok(self
            .persons
            .values()
            .filter(|p| {
                normalize(&p.name) == needle
                    && p.father_name.as_deref().map(normalize).unwrap_or_default()
                        == father_needle
            })
            .cloned()
            .collect())
    }

    fn persons_by_father_name(&self, father_name: &str) -> Result<Vec<Person>> {
        let needle = normalize(father_name);
        Ok(self
            .persons
            .values()
            .filter(|p| p.father_name.as_deref().map(normalize).as_deref() == Some(needle.as_str()))
            .cloned()
            .collect())
    }

    fn list_persons(&self) -> Result<Vec<Person>> {
        let mut all: Vec<Person> = self.persons.values().cloned().collect();
        all.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(all)
    }

    fn child_count(&self, person_id: &str) -> Result<usize> {
        Ok(self.edges.iter().filter(|e| e.father_id == person_id).count())
    }

    fn outgoing_edge(&self, child_id: &str) -> Result<Option<ParentEdge>> {
        Ok(self
            .edges
            .iter()
            .find(|e| e.child_id == child_id)
            .cloned())
    }
}

impl LineageStoreMut for MemoryStore {
    fn insert_person(&mut self, person: &Person) -> Result<()> {
        // Hard identity constraint, mirroring the SQLite unique index
        let key = Self::identity_key(person);
        if self.persons.values().any(|p| Self::identity_key(p) == key) {
            return Err(NasabError::DuplicateExact {
                name: key.0,
                father_name: key.1,
            });
        }
        self.persons.insert(person.id.clone(), person.clone());
        Ok(())
    }

    fn upsert_edge(&mut self, edge: &ParentEdge) -> Result<()> {
        if self.edges.contains(edge) {
            // Retried attach of the same triple is a no-op
            return Ok(());
        }
        if self.edges.iter().any(|e| e.child_id == edge.child_id) {
            return Err(NasabError::Persistence {
                op: "upsert_edge".to_string(),
                reason: format!("child {} already has a parentage edge", edge.child_id),
            });
        }
        self.edges.push(edge.clone());
        Ok(())
    }

    fn delete_person(&mut self, person_id: &str) -> Result<usize> {
        self.edges
            .retain(|e| e.child_id != person_id && e.father_id != person_id);
        Ok(usize::from(self.persons.remove(person_id).is_some()))
    }
}
