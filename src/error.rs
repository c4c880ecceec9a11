// 🚫 Registry Errors - closed set of failure kinds
//
// Every variant carries the offending value so callers can branch on
// structure instead of matching message text.

use crate::guard::Address;
use thiserror::Error;

// ============================================================================
// ERROR KIND
// ============================================================================

/// Coarse classification of a [`RegistryError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Caller is not the owner (mutating operations only)
    Authorization,

    /// Empty name or age outside `[1, 150]`
    Validation,

    /// Id was never assigned
    InvalidIdentifier,

    /// Id was assigned but the record has since been deleted
    NotFound,

    /// Position outside `[0, count)`
    Bounds,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Authorization => "Authorization",
            ErrorKind::Validation => "Validation",
            ErrorKind::InvalidIdentifier => "InvalidIdentifier",
            ErrorKind::NotFound => "NotFound",
            ErrorKind::Bounds => "Bounds",
        }
    }
}

// ============================================================================
// REGISTRY ERROR
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("Only owner can perform this action (caller {caller})")]
    Unauthorized { caller: Address },

    #[error("Name cannot be empty")]
    EmptyName,

    #[error("Invalid age: {age} (must be between 1 and 150)")]
    InvalidAge { age: i64 },

    #[error("Invalid student ID: {id}")]
    InvalidId { id: u64 },

    #[error("Student not found: {id}")]
    NotFound { id: u64 },

    #[error("Index out of bounds: {index} (count {count})")]
    IndexOutOfBounds { index: usize, count: usize },
}

impl RegistryError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RegistryError::Unauthorized { .. } => ErrorKind::Authorization,
            RegistryError::EmptyName | RegistryError::InvalidAge { .. } => ErrorKind::Validation,
            RegistryError::InvalidId { .. } => ErrorKind::InvalidIdentifier,
            RegistryError::NotFound { .. } => ErrorKind::NotFound,
            RegistryError::IndexOutOfBounds { .. } => ErrorKind::Bounds,
        }
    }

    /// Stable machine-readable code, one per variant
    pub fn code(&self) -> &'static str {
        match self {
            RegistryError::Unauthorized { .. } => "REGISTRY_UNAUTHORIZED",
            RegistryError::EmptyName => "REGISTRY_EMPTY_NAME",
            RegistryError::InvalidAge { .. } => "REGISTRY_INVALID_AGE",
            RegistryError::InvalidId { .. } => "REGISTRY_INVALID_ID",
            RegistryError::NotFound { .. } => "REGISTRY_NOT_FOUND",
            RegistryError::IndexOutOfBounds { .. } => "REGISTRY_INDEX_OUT_OF_BOUNDS",
        }
    }
}

pub type RegistryResult<T> = Result<T, RegistryError>;

// ============================================================================
// INVARIANT VIOLATION
// ============================================================================

/// First broken roster/index/counter invariant found by `verify_invariants`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    #[error("index has {indexed} entries but roster has {live} students")]
    IndexSizeMismatch { indexed: usize, live: usize },

    #[error("student id {id} outside assigned range (counter {counter})")]
    IdOutOfRange { id: u64, counter: u64 },

    #[error("student {id} not indexed at position {position}")]
    MisindexedStudent { id: u64, position: usize },

    #[error("student {id} has an empty name")]
    EmptyName { id: u64 },

    #[error("student {id} has invalid age {age}")]
    InvalidAge { id: u64, age: u16 },
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        let caller = Address::new("0xabc");
        assert_eq!(RegistryError::Unauthorized { caller }.kind(), ErrorKind::Authorization);
        assert_eq!(RegistryError::EmptyName.kind(), ErrorKind::Validation);
        assert_eq!(RegistryError::InvalidAge { age: 200 }.kind(), ErrorKind::Validation);
        assert_eq!(RegistryError::InvalidId { id: 999 }.kind(), ErrorKind::InvalidIdentifier);
        assert_eq!(RegistryError::NotFound { id: 2 }.kind(), ErrorKind::NotFound);
        assert_eq!(
            RegistryError::IndexOutOfBounds { index: 999, count: 3 }.kind(),
            ErrorKind::Bounds
        );
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(RegistryError::EmptyName.to_string(), "Name cannot be empty");
        assert!(RegistryError::InvalidAge { age: 0 }.to_string().starts_with("Invalid age"));
        assert!(RegistryError::InvalidId { id: 999 }.to_string().starts_with("Invalid student ID"));
        assert!(RegistryError::NotFound { id: 2 }.to_string().starts_with("Student not found"));
        assert!(RegistryError::IndexOutOfBounds { index: 9, count: 1 }
            .to_string()
            .starts_with("Index out of bounds"));
        assert!(RegistryError::Unauthorized { caller: Address::new("0x1") }
            .to_string()
            .starts_with("Only owner can perform this action"));
    }

    #[test]
    fn test_error_codes_are_distinct() {
        let errors = vec![
            RegistryError::Unauthorized { caller: Address::new("0x1") },
            RegistryError::EmptyName,
            RegistryError::InvalidAge { age: 0 },
            RegistryError::InvalidId { id: 0 },
            RegistryError::NotFound { id: 1 },
            RegistryError::IndexOutOfBounds { index: 0, count: 0 },
        ];
        let mut codes: Vec<&str> = errors.iter().map(|e| e.code()).collect();
        codes.sort();
        codes.dedup();
        assert_eq!(codes.len(), errors.len());
    }
}
