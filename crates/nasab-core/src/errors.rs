use thiserror::Error;

/// Result type alias using NasabError
pub type Result<T> = std::result::Result<T, NasabError>;

/// Comprehensive error taxonomy for lineage operations
///
/// Every variant is terminal for the invoking operation: the engine never
/// retries and never swallows one. Validation variants are raised strictly
/// before any store mutation; `Persistence` covers the hard-constraint
/// backstop and store failures.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NasabError {
    // ===== Input Errors =====
    /// Candidate name is empty or whitespace-only
    #[error("Invalid name: {reason}")]
    InvalidName { reason: String },

    /// Gender value is not one of the accepted forms (m/male/f/female)
    #[error("Invalid gender: {value}")]
    InvalidGender { value: String },

    /// Structurally inconsistent input (e.g. grandfather without father)
    #[error("Invalid input: {reason}")]
    InvalidInput { reason: String },

    // ===== Admission Errors =====
    /// A person with the same (name, father_name) already exists
    #[error("Person already exists: {name} (father: {father_name})")]
    DuplicateExact { name: String, father_name: String },

    /// A sibling's name is within edit distance 2 of the candidate's
    #[error("Name '{name}' is too similar to sibling '{sibling}' under father '{father_name}' (distance {distance})")]
    DuplicateSimilar {
        name: String,
        sibling: String,
        father_name: String,
        distance: usize,
    },

    /// No person matches the candidate's father_name
    #[error("Father not found: {father_name}")]
    FatherNotFound { father_name: String },

    /// More than one person matches the candidate's father_name
    #[error("Father name '{father_name}' matches {count} persons")]
    AmbiguousFather { father_name: String, count: usize },

    /// The resolved father has no recorded father of his own
    #[error("Father '{father_name}' has no recorded father")]
    MissingGrandfather { father_name: String },

    /// The resolved father's father_name disagrees with the candidate's grandfather_name
    #[error("Grandfather mismatch: expected '{expected}', got '{got}'")]
    GrandfatherMismatch { expected: String, got: String },

    // ===== Resolution Errors =====
    /// No person matches the given selector
    #[error("Person not found: {selector}")]
    NotFound { selector: String },

    /// Trace start (name, father_name) matches more than one person
    #[error("Start '{name}' (father: {father_name}) matches {count} persons")]
    Ambiguous {
        name: String,
        father_name: String,
        count: usize,
    },

    /// Deletion selector matches more than one person
    #[error("Selector {selector} matches {count} persons")]
    AmbiguousSelector { selector: String, count: usize },

    // ===== Mutation Errors =====
    /// Person has recorded children and cannot be removed
    #[error("Person {id} has {child_count} children and cannot be deleted")]
    HasChildren { id: String, child_count: usize },

    /// Delete affected zero records after the target resolved
    #[error("Deletion of person {id} affected no records")]
    DeletionFailed { id: String },

    // ===== Traversal Errors =====
    /// Ancestor chain revisits a person or exceeds the depth bound
    #[error("Cycle detected in ancestor chain at person {id}")]
    CycleDetected { id: String },

    // ===== Access / Store Errors =====
    /// Caller is not authorized for the mutating operation
    #[error("Caller is not authorized for operation '{op}'")]
    Unauthorized { op: String },

    /// Store-level failure (constraint backstop, I/O, corruption)
    #[error("Store failure in '{op}': {reason}")]
    Persistence { op: String, reason: String },
}
