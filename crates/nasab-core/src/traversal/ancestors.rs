//! Ancestor chain reconstruction.
//!
//! Follows recorded father names upward from a starting person until a root
//! is reached. Admission enforces that a father name resolves uniquely, but
//! the trace runs against whatever the store currently holds, so it handles
//! two degenerate shapes explicitly: a father name matching several persons
//! (the deepest resulting chain wins) and a chain that revisits a person
//! (fails with `CycleDetected` instead of looping).

use std::collections::HashSet;

use crate::errors::{NasabError, Result};
use crate::model::{normalize, Person};
use crate::ops::LineageStore;

/// Hard bound on chain length; generous for any real genealogy
pub const MAX_TRACE_DEPTH: usize = 512;

/// Trace the deepest ancestor chain from `(name, father_name)` to a root.
///
/// Returns the ordered sequence of persons from the starting person to the
/// root inclusive. Read-only; requires no transaction.
///
/// # Errors
///
/// * `NotFound` - no person matches the starting pair
/// * `Ambiguous` - the starting pair matches more than one person
/// * `FatherNotFound` - a non-root ancestor's father_name resolves to nobody
/// * `CycleDetected` - the chain revisits a person or exceeds
///   [`MAX_TRACE_DEPTH`]
pub fn trace_to_root<S: LineageStore + ?Sized>(
    store: &S,
    name: &str,
    father_name: Option<&str>,
) -> Result<Vec<Person>> {
    let mut starts = store.persons_by_name_and_father(name, father_name)?;
    let start = match starts.len() {
        0 => {
            return Err(NasabError::NotFound {
                selector: format!(
                    "name={}, father={}",
                    normalize(name),
                    father_name.map(normalize).unwrap_or_else(|| "-".to_string())
                ),
            })
        }
        1 => starts.remove(0),
        count => {
            return Err(NasabError::Ambiguous {
                name: name.to_string(),
                father_name: father_name.unwrap_or("-").to_string(),
                count,
            })
        }
    };

    let mut visited = HashSet::new();
    ascend(store, start, &mut visited, 0)
}

/// Recursive ascent keeping the deepest chain among father-name candidates.
///
/// `visited` tracks ids on the current path only; entries are removed on
/// backtrack so parallel branches are not confused with cycles.
fn ascend<S: LineageStore + ?Sized>(
    store: &S,
    person: Person,
    visited: &mut HashSet<String>,
    depth: usize,
) -> Result<Vec<Person>> {
    if depth >= MAX_TRACE_DEPTH || !visited.insert(person.id.clone()) {
        return Err(NasabError::CycleDetected { id: person.id });
    }

    let chain = match person.father_name.as_deref() {
        None => vec![person.clone()],
        Some(father_name) => {
            let candidates = store.persons_by_name(father_name)?;
            if candidates.is_empty() {
                visited.remove(&person.id);
                return Err(NasabError::FatherNotFound {
                    father_name: father_name.to_string(),
                });
            }

            let mut deepest: Option<Vec<Person>> = None;
            for candidate in candidates {
                let tail = ascend(store, candidate, visited, depth + 1)?;
                if deepest.as_ref().map_or(true, |best| tail.len() > best.len()) {
                    deepest = Some(tail);
                }
            }

            let mut chain = vec![person.clone()];
            // candidates was non-empty, so deepest is always set here
            chain.extend(deepest.unwrap_or_default());
            chain
        }
    };

    visited.remove(&person.id);
    Ok(chain)
}
