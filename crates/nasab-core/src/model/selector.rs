use serde::{Deserialize, Serialize};

/// Selector identifying a single person for deletion
///
/// An id is unique by construction; a name+father pair must be validated to
/// match exactly one record before any mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PersonSelector {
    ById(String),
    ByNameAndFather {
        name: String,
        father_name: Option<String>,
    },
}

impl std::fmt::Display for PersonSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PersonSelector::ById(id) => write!(f, "id={id}"),
            PersonSelector::ByNameAndFather { name, father_name } => write!(
                f,
                "name={name}, father={}",
                father_name.as_deref().unwrap_or("-")
            ),
        }
    }
}
