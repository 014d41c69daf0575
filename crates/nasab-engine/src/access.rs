//! Access control seam.
//!
//! The engine never parses credentials; the transport resolves the caller
//! to a boolean decision and passes it per mutating call.

use nasab_core::errors::{NasabError, Result};

/// Pre-resolved authorization decision for a mutating call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    Granted,
    Denied,
}

impl AccessDecision {
    /// Reject denied callers before any validation or store access.
    ///
    /// # Errors
    ///
    /// Returns `Unauthorized` carrying the operation name when denied.
    pub fn ensure(self, op: &str) -> Result<()> {
        match self {
            AccessDecision::Granted => Ok(()),
            AccessDecision::Denied => Err(NasabError::Unauthorized { op: op.to_string() }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_granted_passes() {
        assert!(AccessDecision::Granted.ensure("create_person").is_ok());
    }

    #[test]
    fn test_denied_names_operation() {
        let err = AccessDecision::Denied.ensure("delete_person").unwrap_err();
        assert!(matches!(err, NasabError::Unauthorized { op } if op == "delete_person"));
    }
}
