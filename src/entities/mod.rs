// Entity Models
//
// The registry holds a single entity kind: Student.
// - Numeric identity assigned by the registry, never reused
// - Name and status change in place; age is fixed at registration

pub mod student;

pub use student::{Student, StudentStatus, MAX_AGE, MIN_AGE};
