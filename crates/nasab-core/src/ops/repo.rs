//! Store traits - the seam between the lineage kernel and any backing store.
//!
//! The kernel's rules, traversal, and operations are generic over these
//! traits. `MemoryStore` implements them over HashMaps; `nasab-store`
//! implements them over a SQLite connection (and therefore over a
//! transaction). All name parameters are matched case-insensitively after
//! trimming; implementations index by the normalized form.

use crate::errors::Result;
use crate::model::{ParentEdge, Person};

/// Read-only lineage store capabilities
pub trait LineageStore {
    /// Look up a person by id
    fn person_by_id(&self, id: &str) -> Result<Option<Person>>;

    /// All persons whose name matches (normalized)
    fn persons_by_name(&self, name: &str) -> Result<Vec<Person>>;

    /// All persons matching a (name, father_name) pair (normalized);
    /// `None` father matches roots only
    fn persons_by_name_and_father(
        &self,
        name: &str,
        father_name: Option<&str>,
    ) -> Result<Vec<Person>>;

    /// All persons whose recorded father_name matches (normalized) -
    /// the sibling set used by the near-duplicate check
    fn persons_by_father_name(&self, father_name: &str) -> Result<Vec<Person>>;

    /// Every person in the store
    fn list_persons(&self) -> Result<Vec<Person>>;

    /// Number of incoming parentage edges (children) of a person
    fn child_count(&self, person_id: &str) -> Result<usize>;

    /// The single outgoing parentage edge of a person, if any
    fn outgoing_edge(&self, child_id: &str) -> Result<Option<ParentEdge>>;
}

/// Mutating lineage store capabilities
///
/// `insert_person` must enforce the `(name, father_name)` uniqueness
/// invariant as a hard constraint, independent of the validator's advisory
/// pre-check, so two racing creates cannot both commit.
pub trait LineageStoreMut: LineageStore {
    /// Insert a new person; fails with `DuplicateExact` on identity conflict
    fn insert_person(&mut self, person: &Person) -> Result<()>;

    /// Idempotent edge upsert keyed on (child_id, father_id, label)
    fn upsert_edge(&mut self, edge: &ParentEdge) -> Result<()>;

    /// Delete a person and all their edges; returns the number of person
    /// records removed (0 or 1)
    fn delete_person(&mut self, person_id: &str) -> Result<usize>;
}
