use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::gender::Gender;
use crate::errors::NasabError;

/// Label on a parentage edge, derived from the child's gender
///
/// The wire forms (`SON_OF` / `DAUGHTER_OF`) are what the store persists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KinLabel {
    SonOf,
    DaughterOf,
}

impl KinLabel {
    /// Derive the edge label for a child of the given gender
    pub fn for_gender(gender: Gender) -> Self {
        match gender {
            Gender::Male => KinLabel::SonOf,
            Gender::Female => KinLabel::DaughterOf,
        }
    }

    /// Stored string form
    pub fn as_str(&self) -> &'static str {
        match self {
            KinLabel::SonOf => "SON_OF",
            KinLabel::DaughterOf => "DAUGHTER_OF",
        }
    }
}

impl FromStr for KinLabel {
    type Err = NasabError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SON_OF" => Ok(KinLabel::SonOf),
            "DAUGHTER_OF" => Ok(KinLabel::DaughterOf),
            _ => Err(NasabError::InvalidInput {
                reason: format!("unknown kin label: {s}"),
            }),
        }
    }
}

/// Directed parentage edge from a child to their father
///
/// Non-root persons carry exactly one of these; roots carry none. The
/// `(child_id, father_id, label)` triple is the idempotency key for edge
/// upserts, and `child_id` alone is unique (single recorded father).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParentEdge {
    pub child_id: String,
    pub father_id: String,
    pub label: KinLabel,
}

impl ParentEdge {
    pub fn new(child_id: String, father_id: String, label: KinLabel) -> Self {
        Self {
            child_id,
            father_id,
            label,
        }
    }
}
