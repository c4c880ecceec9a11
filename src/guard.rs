// 🔐 Access Guard - single-owner capability check
//
// The owner is fixed when the registry is created. There is no transfer.

use crate::error::{RegistryError, RegistryResult};
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// ADDRESS
// ============================================================================

/// Caller identity (`0x`-prefixed hex text)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address(String);

impl Address {
    pub fn new(value: impl Into<String>) -> Self {
        Address(value.into())
    }

    /// Fresh random address, used when no owner is configured
    pub fn generate() -> Self {
        Address(format!("0x{}", uuid::Uuid::new_v4().simple()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Address {
    fn from(value: &str) -> Self {
        Address::new(value)
    }
}

// ============================================================================
// GUARD
// ============================================================================

/// Admit `caller` only if it is `owner`.
///
/// Mutating operations call this before reading or writing any state.
pub fn ensure_owner(owner: &Address, caller: &Address) -> RegistryResult<()> {
    if caller == owner {
        Ok(())
    } else {
        tracing::warn!(%caller, "rejected non-owner caller");
        Err(RegistryError::Unauthorized {
            caller: caller.clone(),
        })
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_owner_is_admitted() {
        let owner = Address::new("0xowner");
        assert!(ensure_owner(&owner, &owner.clone()).is_ok());
    }

    #[test]
    fn test_stranger_is_rejected() {
        let owner = Address::new("0xowner");
        let stranger = Address::new("0xstranger");

        let err = ensure_owner(&owner, &stranger).unwrap_err();
        assert_eq!(err, RegistryError::Unauthorized { caller: stranger });
    }

    #[test]
    fn test_generated_addresses_are_unique() {
        let a = Address::generate();
        let b = Address::generate();

        assert!(a.as_str().starts_with("0x"));
        assert_eq!(a.as_str().len(), 34);
        assert_ne!(a, b);
    }

    #[test]
    fn test_address_serializes_as_plain_string() {
        let address = Address::new("0x1234");
        assert_eq!(serde_json::to_string(&address).unwrap(), "\"0x1234\"");
    }
}
