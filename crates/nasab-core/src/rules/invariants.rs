//! Whole-graph consistency audit.
//!
//! Read-only detectors, one per lineage invariant. The write path enforces
//! these at admission time; the audit exists to flag data that predates the
//! engine or was mutated out-of-band. `audit_lineage` returns the first
//! violation found as an error, in invariant order; the individual finders
//! return exhaustive lists.

use std::collections::{HashMap, HashSet};

use crate::errors::{NasabError, Result};
use crate::model::{normalize, KinLabel, Person};
use crate::ops::similarity::edit_distance_within;
use crate::ops::LineageStore;

use super::admission::SIMILARITY_THRESHOLD;

fn identity_key(person: &Person) -> (String, String) {
    (
        normalize(&person.name),
        person.father_name.as_deref().map(normalize).unwrap_or_default(),
    )
}

/// Find pairs of person ids sharing the same (name, father_name) identity
pub fn find_duplicate_identities<S: LineageStore + ?Sized>(
    store: &S,
) -> Result<Vec<(String, String)>> {
    let mut seen: HashMap<(String, String), String> = HashMap::new();
    let mut duplicates = Vec::new();

    for person in store.list_persons()? {
        let key = identity_key(&person);
        if let Some(first) = seen.get(&key) {
            duplicates.push((first.clone(), person.id.clone()));
        } else {
            seen.insert(key, person.id.clone());
        }
    }

    Ok(duplicates)
}

/// Find same-father sibling pairs whose names are within the similarity
/// threshold of each other
pub fn find_similar_siblings<S: LineageStore + ?Sized>(
    store: &S,
) -> Result<Vec<(String, String, usize)>> {
    let mut by_father: HashMap<String, Vec<Person>> = HashMap::new();
    for person in store.list_persons()? {
        if let Some(father) = person.father_name.as_deref() {
            by_father.entry(normalize(father)).or_default().push(person);
        }
    }

    let mut similar = Vec::new();
    for siblings in by_father.values() {
        for (i, a) in siblings.iter().enumerate() {
            for b in &siblings[i + 1..] {
                let a_norm = normalize(&a.name);
                let b_norm = normalize(&b.name);
                if a_norm == b_norm {
                    continue; // exact duplicates are reported separately
                }
                if let Some(d) = edit_distance_within(&a_norm, &b_norm, SIMILARITY_THRESHOLD) {
                    similar.push((a.id.clone(), b.id.clone(), d));
                }
            }
        }
    }

    Ok(similar)
}

/// Find non-root persons whose father_name resolves to zero or multiple
/// persons, or whose grandfather_name disagrees with the father's record
///
/// Returns (person_id, reason) pairs.
pub fn find_broken_lineage<S: LineageStore + ?Sized>(store: &S) -> Result<Vec<(String, String)>> {
    let mut broken = Vec::new();

    for person in store.list_persons()? {
        let Some(father_name) = person.father_name.as_deref() else {
            continue;
        };
        let fathers = store.persons_by_name(father_name)?;
        match fathers.len() {
            0 => {
                broken.push((person.id.clone(), format!("father '{father_name}' not found")));
                continue;
            }
            1 => {}
            n => {
                broken.push((
                    person.id.clone(),
                    format!("father '{father_name}' matches {n} persons"),
                ));
                continue;
            }
        }

        let father = &fathers[0];
        let expected = father.father_name.as_deref().map(normalize).unwrap_or_default();
        let claimed = person
            .grandfather_name
            .as_deref()
            .map(normalize)
            .unwrap_or_default();
        if expected != claimed {
            broken.push((
                person.id.clone(),
                format!("grandfather mismatch: father records '{expected}', person claims '{claimed}'"),
            ));
        }
    }

    Ok(broken)
}

/// Find persons whose edge presence or label disagrees with their record
///
/// Non-roots must have exactly one outgoing edge labeled per their gender;
/// roots must have none. Returns (person_id, reason) pairs.
pub fn find_edge_violations<S: LineageStore + ?Sized>(store: &S) -> Result<Vec<(String, String)>> {
    let mut violations = Vec::new();

    for person in store.list_persons()? {
        let edge = store.outgoing_edge(&person.id)?;
        match (&person.father_name, edge) {
            (None, Some(_)) => {
                violations.push((person.id.clone(), "root has an outgoing edge".to_string()));
            }
            (Some(_), None) => {
                violations.push((person.id.clone(), "non-root has no outgoing edge".to_string()));
            }
            (Some(_), Some(edge)) => {
                let expected = KinLabel::for_gender(person.gender);
                if edge.label != expected {
                    violations.push((
                        person.id.clone(),
                        format!(
                            "edge labeled {} but gender implies {}",
                            edge.label.as_str(),
                            expected.as_str()
                        ),
                    ));
                }
            }
            (None, None) => {}
        }
    }

    Ok(violations)
}

/// Check whether the edge chain starting at a person revisits a node
pub fn has_cycle<S: LineageStore + ?Sized>(store: &S, person_id: &str) -> Result<bool> {
    let mut visited = HashSet::new();
    let mut current = person_id.to_string();

    loop {
        if !visited.insert(current.clone()) {
            return Ok(true);
        }
        match store.outgoing_edge(&current)? {
            Some(edge) => current = edge.father_id,
            None => return Ok(false),
        }
    }
}

/// Audit the entire lineage graph, returning the first violation as an error
///
/// # Errors
///
/// The error variant matching the first violated invariant: duplicate
/// identities, similar siblings, broken father/grandfather resolution,
/// edge inconsistencies, then cycles.
pub fn audit_lineage<S: LineageStore + ?Sized>(store: &S) -> Result<()> {
    if let Some((first, _)) = find_duplicate_identities(store)?.first() {
        let (name, father_name) = store
            .person_by_id(first)?
            .map(|p| identity_key(&p))
            .unwrap_or_default();
        return Err(NasabError::DuplicateExact { name, father_name });
    }

    if let Some((a, b, distance)) = find_similar_siblings(store)?.into_iter().next() {
        let first = store.person_by_id(&a)?;
        let second = store.person_by_id(&b)?;
        return Err(NasabError::DuplicateSimilar {
            name: first.map(|p| p.name).unwrap_or(a),
            sibling: second.as_ref().map(|p| p.name.clone()).unwrap_or(b),
            father_name: second
                .and_then(|p| p.father_name)
                .unwrap_or_default(),
            distance,
        });
    }

    if let Some((id, reason)) = find_broken_lineage(store)?.into_iter().next() {
        return Err(NasabError::Persistence {
            op: "audit_lineage".to_string(),
            reason: format!("person {id}: {reason}"),
        });
    }

    if let Some((id, reason)) = find_edge_violations(store)?.into_iter().next() {
        return Err(NasabError::Persistence {
            op: "audit_lineage".to_string(),
            reason: format!("person {id}: {reason}"),
        });
    }

    for person in store.list_persons()? {
        if has_cycle(store, &person.id)? {
            return Err(NasabError::CycleDetected { id: person.id });
        }
    }

    Ok(())
}
