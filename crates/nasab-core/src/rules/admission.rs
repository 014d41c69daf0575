//! Admission rules for candidate persons.
//!
//! Fail-fast, first failure wins, no store mutation on any path. Check
//! order: exact duplicate, father existence, grandfather consistency,
//! near-duplicate siblings. Roots (no father) run the duplicate check only.

use crate::errors::{NasabError, Result};
use crate::model::{normalize, Person};
use crate::ops::similarity::edit_distance_within;
use crate::ops::LineageStore;

/// Maximum edit distance at which two sibling names count as duplicates
pub const SIMILARITY_THRESHOLD: usize = 2;

/// Outcome of a successful admission
///
/// Carries the resolved father so creation can attach the parentage edge
/// without a second lookup.
#[derive(Debug, Clone)]
pub struct Admission {
    /// Resolved father, None for root candidates
    pub father: Option<Person>,
}

/// Run all admission checks for a candidate `(name, father, grandfather)`.
///
/// Names arrive already trimmed; comparisons normalize internally. The
/// father lookup is by name only, so a name shared by several recorded
/// persons cannot be resolved and is rejected rather than silently taking
/// an arbitrary match.
///
/// # Errors
///
/// * `DuplicateExact` - a person with this (name, father_name) exists
/// * `FatherNotFound` - no person matches father_name
/// * `AmbiguousFather` - more than one person matches father_name
/// * `MissingGrandfather` - the father has no recorded father
/// * `GrandfatherMismatch` - the father's father_name disagrees with the
///   candidate's grandfather_name (or the candidate supplied none)
/// * `DuplicateSimilar` - a same-father sibling's name is within edit
///   distance 2
pub fn admit<S: LineageStore + ?Sized>(
    store: &S,
    name: &str,
    father_name: Option<&str>,
    grandfather_name: Option<&str>,
) -> Result<Admission> {
    // Check 1: exact duplicate on (name, father_name)
    let existing = store.persons_by_name_and_father(name, father_name)?;
    if !existing.is_empty() {
        return Err(NasabError::DuplicateExact {
            name: normalize(name),
            father_name: father_name.map(normalize).unwrap_or_default(),
        });
    }

    let Some(father_name) = father_name else {
        // Root candidate: checks 2-4 do not apply
        return Ok(Admission { father: None });
    };

    // Check 2: father must resolve to exactly one person
    let mut fathers = store.persons_by_name(father_name)?;
    let father = match fathers.len() {
        0 => {
            return Err(NasabError::FatherNotFound {
                father_name: father_name.to_string(),
            })
        }
        1 => fathers.remove(0),
        count => {
            return Err(NasabError::AmbiguousFather {
                father_name: father_name.to_string(),
                count,
            })
        }
    };

    // Check 3: grandfather consistency against the father's own record
    let Some(actual_grandfather) = father.father_name.as_deref() else {
        return Err(NasabError::MissingGrandfather {
            father_name: father_name.to_string(),
        });
    };
    let claimed = grandfather_name.map(normalize).unwrap_or_default();
    if normalize(actual_grandfather) != claimed {
        return Err(NasabError::GrandfatherMismatch {
            expected: actual_grandfather.to_string(),
            got: grandfather_name.unwrap_or("").to_string(),
        });
    }

    // Check 4: near-duplicate guard among same-father siblings
    let candidate_norm = normalize(name);
    for sibling in store.persons_by_father_name(father_name)? {
        if let Some(distance) = edit_distance_within(
            &candidate_norm,
            &normalize(&sibling.name),
            SIMILARITY_THRESHOLD,
        ) {
            return Err(NasabError::DuplicateSimilar {
                name: name.to_string(),
                sibling: sibling.name.clone(),
                father_name: father_name.to_string(),
                distance,
            });
        }
    }

    Ok(Admission {
        father: Some(father),
    })
}
