// 🗂️ Student Registry - dense roster + id→position index
//
// Three structures move together:
// - `student_id`: last id handed out (0 before the first registration)
// - `students`: live records, insertion order, no gaps
// - `positions`: live id → index into `students`
//
// Mutations are owner-only and validate everything before touching state.

use crate::entities::student::{validate_age, validate_name};
use crate::entities::{Student, StudentStatus};
use crate::error::{InvariantViolation, RegistryError, RegistryResult};
use crate::events::RegistryEvent;
use crate::guard::{ensure_owner, Address};
use std::collections::HashMap;

#[derive(Debug, Clone)]
pub struct StudentRegistry {
    owner: Address,
    student_id: u64,
    students: Vec<Student>,
    positions: HashMap<u64, usize>,
    events: Vec<RegistryEvent>,
}

impl StudentRegistry {
    /// Create an empty registry administered by `owner`
    pub fn new(owner: Address) -> Self {
        StudentRegistry {
            owner,
            student_id: 0,
            students: Vec::new(),
            positions: HashMap::new(),
            events: Vec::new(),
        }
    }

    pub fn owner(&self) -> &Address {
        &self.owner
    }

    /// Last id handed out. Deletions never lower it.
    pub fn student_id(&self) -> u64 {
        self.student_id
    }

    // ========================================================================
    // MUTATIONS (owner only)
    // ========================================================================

    pub fn register_student(&mut self, caller: &Address, name: &str, age: u16) -> RegistryResult<u64> {
        ensure_owner(&self.owner, caller)?;
        validate_name(name)?;
        validate_age(age)?;

        self.student_id += 1;
        let id = self.student_id;
        let student = Student::new(id, name.to_string(), age);

        self.positions.insert(id, self.students.len());
        self.events.push(RegistryEvent::registered(&student, caller));
        self.students.push(student);

        tracing::info!(id, name, age, "student registered");
        Ok(id)
    }

    pub fn update_student(&mut self, caller: &Address, id: u64, new_name: &str) -> RegistryResult<()> {
        ensure_owner(&self.owner, caller)?;
        let position = self.live_position(id)?;
        validate_name(new_name)?;

        self.students[position].name = new_name.to_string();
        self.events.push(RegistryEvent::updated(id, new_name, caller));

        tracing::info!(id, name = new_name, "student renamed");
        Ok(())
    }

    pub fn update_student_status(
        &mut self,
        caller: &Address,
        id: u64,
        status: StudentStatus,
    ) -> RegistryResult<()> {
        ensure_owner(&self.owner, caller)?;
        let position = self.live_position(id)?;

        self.students[position].status = status;
        self.events.push(RegistryEvent::status_updated(id, status, caller));

        tracing::info!(id, %status, "student status updated");
        Ok(())
    }

    /// Remove a student, keeping the relative order of everyone else.
    ///
    /// Records after the removed one shift down by one and are re-indexed.
    /// Swap-and-pop would reorder the roster, so it is not used.
    pub fn delete_by_id(&mut self, caller: &Address, id: u64) -> RegistryResult<()> {
        ensure_owner(&self.owner, caller)?;
        let position = self.live_position(id)?;

        let removed = self.students.remove(position);
        for (offset, student) in self.students[position..].iter().enumerate() {
            self.positions.insert(student.id, position + offset);
        }
        self.positions.remove(&removed.id);
        self.events.push(RegistryEvent::deleted(id, caller));

        tracing::info!(id, remaining = self.students.len(), "student deleted");
        Ok(())
    }

    // ========================================================================
    // QUERIES (any caller)
    // ========================================================================

    /// Look up a live student.
    ///
    /// Ids never handed out fail with `InvalidId`; ids that were handed out
    /// and later deleted fail with `NotFound`.
    pub fn get_by_id(&self, id: u64) -> RegistryResult<Student> {
        if id == 0 || id > self.student_id {
            return Err(RegistryError::InvalidId { id });
        }

        self.positions
            .get(&id)
            .map(|&position| self.students[position].clone())
            .ok_or(RegistryError::NotFound { id })
    }

    pub fn get_student_by_index(&self, index: usize) -> RegistryResult<Student> {
        self.students
            .get(index)
            .cloned()
            .ok_or(RegistryError::IndexOutOfBounds {
                index,
                count: self.students.len(),
            })
    }

    pub fn get_all(&self) -> Vec<Student> {
        self.students.clone()
    }

    pub fn get_student_count(&self) -> usize {
        self.students.len()
    }

    /// Exact, case-sensitive match over the live roster, in roster order
    pub fn find_student_by_name(&self, name: &str) -> Vec<Student> {
        let found: Vec<Student> = self
            .students
            .iter()
            .filter(|s| s.name == name)
            .cloned()
            .collect();

        tracing::debug!(name, matches = found.len(), "name lookup");
        found
    }

    pub fn events(&self) -> &[RegistryEvent] {
        &self.events
    }

    pub fn events_for_student(&self, id: u64) -> Vec<RegistryEvent> {
        self.events
            .iter()
            .filter(|e| e.student_id == id)
            .cloned()
            .collect()
    }

    /// Check the roster/index/counter invariants, reporting the first violation
    pub fn verify_invariants(&self) -> Result<(), InvariantViolation> {
        if self.positions.len() != self.students.len() {
            return Err(InvariantViolation::IndexSizeMismatch {
                indexed: self.positions.len(),
                live: self.students.len(),
            });
        }

        for (position, student) in self.students.iter().enumerate() {
            let id = student.id;
            if id == 0 || id > self.student_id {
                return Err(InvariantViolation::IdOutOfRange { id, counter: self.student_id });
            }
            if self.positions.get(&id) != Some(&position) {
                return Err(InvariantViolation::MisindexedStudent { id, position });
            }
            if student.name.is_empty() {
                return Err(InvariantViolation::EmptyName { id });
            }
            if validate_age(student.age).is_err() {
                return Err(InvariantViolation::InvalidAge { id, age: student.age });
            }
        }

        Ok(())
    }

    // ========================================================================
    // HELPERS
    // ========================================================================

    /// Position of a live record. Unknown and deleted ids are both `InvalidId` here.
    fn live_position(&self, id: u64) -> RegistryResult<usize> {
        self.positions
            .get(&id)
            .copied()
            .ok_or(RegistryError::InvalidId { id })
    }
}

// ============================================================================
// TESTS
// ============================================================================
