//! Deletion guard: resolve the target unambiguously, then refuse removal of
//! anyone with recorded children.

use crate::errors::{NasabError, Result};
use crate::model::{Person, PersonSelector};
use crate::ops::LineageStore;

/// Resolve a selector to exactly one person.
///
/// # Errors
///
/// * `NotFound` - nothing matches
/// * `AmbiguousSelector` - a name+father pair matches more than one record
pub fn resolve_selector<S: LineageStore + ?Sized>(
    store: &S,
    selector: &PersonSelector,
) -> Result<Person> {
    match selector {
        PersonSelector::ById(id) => {
            store.person_by_id(id)?.ok_or_else(|| NasabError::NotFound {
                selector: selector.to_string(),
            })
        }
        PersonSelector::ByNameAndFather { name, father_name } => {
            let mut matches =
                store.persons_by_name_and_father(name, father_name.as_deref())?;
            match matches.len() {
                0 => Err(NasabError::NotFound {
                    selector: selector.to_string(),
                }),
                1 => Ok(matches.remove(0)),
                count => Err(NasabError::AmbiguousSelector {
                    selector: selector.to_string(),
                    count,
                }),
            }
        }
    }
}

/// Reject deletion of a person with one or more children.
///
/// # Errors
///
/// * `HasChildren` - the person has at least one incoming parentage edge
pub fn ensure_childless<S: LineageStore + ?Sized>(store: &S, person: &Person) -> Result<()> {
    let child_count = store.child_count(&person.id)?;
    if child_count > 0 {
        return Err(NasabError::HasChildren {
            id: person.id.clone(),
            child_count,
        });
    }
    Ok(())
}
