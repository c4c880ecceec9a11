// 🎓 Student Entity - numeric identity + mutable name/status
//
// "Student id is IDENTITY (never changes, never reused), name and status are VALUES"

use crate::error::{RegistryError, RegistryResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const MIN_AGE: u16 = 1;
pub const MAX_AGE: u16 = 150;

// ============================================================================
// STUDENT STATUS
// ============================================================================

/// Enrolment status. The numeric codes are part of the wire contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(u8)]
pub enum StudentStatus {
    /// Currently enrolled (default at registration)
    #[default]
    Active = 0,

    /// Enrolment paused
    Deferred = 1,

    /// Suspended by the school
    Rusticated = 2,
}

impl StudentStatus {
    pub const ALL: [StudentStatus; 3] = [
        StudentStatus::Active,
        StudentStatus::Deferred,
        StudentStatus::Rusticated,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StudentStatus::Active => "ACTIVE",
            StudentStatus::Deferred => "DEFERRED",
            StudentStatus::Rusticated => "RUSTICATED",
        }
    }

    pub fn code(&self) -> u8 {
        *self as u8
    }
}

impl TryFrom<u8> for StudentStatus {
    type Error = String;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(StudentStatus::Active),
            1 => Ok(StudentStatus::Deferred),
            2 => Ok(StudentStatus::Rusticated),
            other => Err(format!("Unknown status code: {}", other)),
        }
    }
}

impl FromStr for StudentStatus {
    type Err = String;

    /// Accepts the status name (any case) or its numeric code
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(code) = trimmed.parse::<u8>() {
            return StudentStatus::try_from(code);
        }

        match trimmed.to_uppercase().as_str() {
            "ACTIVE" => Ok(StudentStatus::Active),
            "DEFERRED" => Ok(StudentStatus::Deferred),
            "RUSTICATED" => Ok(StudentStatus::Rusticated),
            _ => Err(format!("Unknown status: {}", s)),
        }
    }
}

impl fmt::Display for StudentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// STUDENT ENTITY
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    /// Registry-assigned identity, 1-based
    pub id: u64,

    pub name: String,

    pub age: u16,

    pub status: StudentStatus,
}

impl Student {
    /// Build a freshly registered (ACTIVE) student. Inputs are not validated here.
    pub(crate) fn new(id: u64, name: String, age: u16) -> Self {
        Student {
            id,
            name,
            age,
            status: StudentStatus::Active,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == StudentStatus::Active
    }
}

impl fmt::Display for Student {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} {} (Age: {}, Status: {})", self.id, self.name, self.age, self.status)
    }
}

// ============================================================================
// FIELD VALIDATION
// ============================================================================

pub fn validate_name(name: &str) -> RegistryResult<()> {
    if name.is_empty() {
        return Err(RegistryError::EmptyName);
    }
    Ok(())
}

pub fn validate_age(age: u16) -> RegistryResult<()> {
    if !(MIN_AGE..=MAX_AGE).contains(&age) {
        return Err(RegistryError::InvalidAge { age: age.into() });
    }
    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================
