use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::NasabError;

/// Normalized gender of a person
///
/// Parsed case-insensitively from single-letter or word forms; anything
/// outside the four accepted spellings is rejected at the input boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// Canonical lowercase form, as stored
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }
}

impl FromStr for Gender {
    type Err = NasabError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "m" | "male" => Ok(Gender::Male),
            "f" | "female" => Ok(Gender::Female),
            _ => Err(NasabError::InvalidGender {
                value: s.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepted_forms() {
        assert_eq!("m".parse::<Gender>().unwrap(), Gender::Male);
        assert_eq!("Male".parse::<Gender>().unwrap(), Gender::Male);
        assert_eq!(" F ".parse::<Gender>().unwrap(), Gender::Female);
        assert_eq!("FEMALE".parse::<Gender>().unwrap(), Gender::Female);
    }

    #[test]
    fn test_parse_rejects_unknown() {
        let result = "other".parse::<Gender>();
        assert!(matches!(result, Err(NasabError::InvalidGender { .. })));
    }

    #[test]
    fn test_round_trip_as_str() {
        assert_eq!(Gender::Male.as_str().parse::<Gender>().unwrap(), Gender::Male);
        assert_eq!(
            Gender::Female.as_str().parse::<Gender>().unwrap(),
            Gender::Female
        );
    }
}
