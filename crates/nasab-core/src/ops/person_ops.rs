//! Person lifecycle operations over any lineage store.
//!
//! These functions assume the caller supplies transactional scoping: the
//! SQLite engine wraps each call in one transaction, the in-memory store is
//! single-threaded. Validation happens strictly before any mutation.

use tracing::debug;

use crate::errors::{NasabError, Result};
use crate::guard;
use crate::identity;
use crate::model::{Gender, KinLabel, ParentEdge, Person, PersonInput, PersonSelector};
use crate::rules::admission;

use super::repo::{LineageStore, LineageStoreMut};

fn trimmed_nonempty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Create a new person after full admission validation.
///
/// Allocates the id, inserts the node, and attaches the gender-labeled
/// parentage edge for non-roots. The store's hard identity constraint backs
/// the advisory duplicate pre-check, so a racing create surfaces as
/// `DuplicateExact` from the insert itself.
///
/// # Errors
///
/// * `InvalidName` - empty or whitespace-only name
/// * `InvalidGender` - unrecognized gender form
/// * `InvalidInput` - grandfather supplied without a father
/// * Any admission error from [`admission::admit`]
pub fn create_person<S: LineageStoreMut + ?Sized>(
    store: &mut S,
    input: PersonInput,
) -> Result<Person> {
    let name = input.name.trim();
    if name.is_empty() {
        return Err(NasabError::InvalidName {
            reason: "name cannot be empty or whitespace-only".to_string(),
        });
    }
    let gender: Gender = input.gender.parse()?;

    let father_name = trimmed_nonempty(input.father_name.as_deref());
    let grandfather_name = trimmed_nonempty(input.grandfather_name.as_deref());
    if father_name.is_none() && grandfather_name.is_some() {
        return Err(NasabError::InvalidInput {
            reason: "grandfather_name requires father_name".to_string(),
        });
    }

    let admission = admission::admit(
        store,
        name,
        father_name.as_deref(),
        grandfather_name.as_deref(),
    )?;

    let person = Person {
        id: identity::allocate_person_id(),
        name: name.to_string(),
        gender,
        father_name,
        grandfather_name,
        mother_name: trimmed_nonempty(input.mother_name.as_deref()),
        notable: input.notable,
        notes: input.notes,
        created_at: chrono::Utc::now(),
    };

    store.insert_person(&person)?;

    if let Some(father) = admission.father {
        let edge = ParentEdge::new(
            person.id.clone(),
            father.id.clone(),
            KinLabel::for_gender(gender),
        );
        store.upsert_edge(&edge)?;
        debug!(
            person_id = %person.id,
            father_id = %father.id,
            label = edge.label.as_str(),
            "person created and linked"
        );
    } else {
        debug!(person_id = %person.id, "root person created");
    }

    Ok(person)
}

/// Delete a person resolved by the given selector.
///
/// Resolution must be unambiguous and the person childless. Returns the
/// removed person.
///
/// # Errors
///
/// * `NotFound` / `AmbiguousSelector` - selector resolution failures
/// * `HasChildren` - the person has at least one child
/// * `DeletionFailed` - the delete affected zero records (defensive)
pub fn delete_person<S: LineageStoreMut + ?Sized>(
    store: &mut S,
    selector: &PersonSelector,
) -> Result<Person> {
    let person = guard::resolve_selector(store, selector)?;
    guard::ensure_childless(store, &person)?;

    let removed = store.delete_person(&person.id)?;
    if removed == 0 {
        return Err(NasabError::DeletionFailed {
            id: person.id.clone(),
        });
    }

    debug!(person_id = %person.id, name = %person.name, "person deleted");
    Ok(person)
}

/// List every recorded person
pub fn list_persons<S: LineageStore + ?Sized>(store: &S) -> Result<Vec<Person>> {
    store.list_persons()
}
