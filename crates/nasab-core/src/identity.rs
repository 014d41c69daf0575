//! Identity allocation for new persons.
//!
//! Uses collision-resistant random tokens (UUID v7) instead of a shared
//! counter: allocation needs no shared mutable state, so concurrent creates
//! never serialize on it. V7 keeps ids time-ordered, which makes listings
//! and logs easier to read than fully random v4.

use uuid::Uuid;

/// Allocate a globally unique id for a new person
pub fn allocate_person_id() -> String {
    Uuid::now_v7().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_ids_are_unique() {
        let ids: HashSet<String> = (0..1000).map(|_| allocate_person_id()).collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn test_id_is_parseable_uuid() {
        let id = allocate_person_id();
        assert!(Uuid::parse_str(&id).is_ok());
    }
}
