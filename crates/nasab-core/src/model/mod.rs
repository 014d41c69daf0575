pub mod gender;
pub mod kinship;
pub mod person;
pub mod selector;

pub use gender::Gender;
pub use kinship::{KinLabel, ParentEdge};
pub use person::{Person, PersonInput};
pub use selector::PersonSelector;

/// Normalize a name for comparison: trim surrounding whitespace and lowercase.
///
/// Every name comparison in the engine (duplicate checks, father lookup,
/// grandfather matching, trace start resolution) goes through this.
pub fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}
