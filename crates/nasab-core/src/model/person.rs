use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::gender::Gender;

/// Person - the sole entity of the lineage graph
///
/// Immutable once created; the only lifecycle transition is atomic removal.
/// Roots have no `father_name` (and no `grandfather_name`); everyone else
/// has both and one outgoing parentage edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    /// Unique identifier (UUID v7), assigned at creation
    pub id: String,

    /// Given name, stored trimmed but with original casing
    pub name: String,

    /// Normalized gender
    pub gender: Gender,

    /// Father's name (None for roots)
    pub father_name: Option<String>,

    /// Grandfather's name; present iff father_name is present
    pub grandfather_name: Option<String>,

    /// Mother's name, informational
    pub mother_name: Option<String>,

    /// Marks a notable person; no structural effect
    pub notable: bool,

    /// Free-text notes
    pub notes: Option<String>,

    /// Timestamp when this person was recorded
    pub created_at: DateTime<Utc>,
}

impl Person {
    /// Create a new root person (no father) with current timestamp
    pub fn new(id: String, name: String, gender: Gender) -> Self {
        Self {
            id,
            name,
            gender,
            father_name: None,
            grandfather_name: None,
            mother_name: None,
            notable: false,
            notes: None,
            created_at: Utc::now(),
        }
    }

    /// Check if this person is a root (no recorded father)
    pub fn is_root(&self) -> bool {
        self.father_name.is_none()
    }
}

/// Candidate person record submitted for admission
///
/// Gender arrives as the caller's raw string and is parsed during creation;
/// all names are trimmed before storage and normalized for comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonInput {
    pub name: String,
    pub gender: String,
    pub father_name: Option<String>,
    pub grandfather_name: Option<String>,
    pub mother_name: Option<String>,
    #[serde(default)]
    pub notable: bool,
    pub notes: Option<String>,
}

impl PersonInput {
    /// Minimal input for a non-root person
    pub fn new(
        name: impl Into<String>,
        gender: impl Into<String>,
        father_name: impl Into<String>,
        grandfather_name: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            gender: gender.into(),
            father_name: Some(father_name.into()),
            grandfather_name: Some(grandfather_name.into()),
            mother_name: None,
            notable: false,
            notes: None,
        }
    }

    /// Minimal input for a root person (no father recorded)
    pub fn root(name: impl Into<String>, gender: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            gender: gender.into(),
            father_name: None,
            grandfather_name: None,
            mother_name: None,
            notable: false,
            notes: None,
        }
    }
}
