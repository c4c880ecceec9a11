// 🔒 Shared Registry - serialized writers, snapshot readers
//
// Mutations hold the write lock for the whole validate→mutate step.
// Reads hold the read lock and clone out, so no reader sees half a mutation.

use crate::entities::{Student, StudentStatus};
use crate::error::RegistryResult;
use crate::events::RegistryEvent;
use crate::guard::Address;
use crate::registry::StudentRegistry;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Debug, Clone)]
pub struct SharedRegistry {
    inner: Arc<RwLock<StudentRegistry>>,
}

impl SharedRegistry {
    pub fn new(owner: Address) -> Self {
        Self::from_registry(StudentRegistry::new(owner))
    }

    pub fn from_registry(registry: StudentRegistry) -> Self {
        SharedRegistry {
            inner: Arc::new(RwLock::new(registry)),
        }
    }

    // Registry operations never panic mid-mutation, so a poisoned lock still
    // guards consistent state.
    fn read(&self) -> RwLockReadGuard<'_, StudentRegistry> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, StudentRegistry> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn owner(&self) -> Address {
        self.read().owner().clone()
    }

    pub fn student_id(&self) -> u64 {
        self.read().student_id()
    }

    pub fn register_student(&self, caller: &Address, name: &str, age: u16) -> RegistryResult<u64> {
        self.write().register_student(caller, name, age)
    }

    pub fn update_student(&self, caller: &Address, id: u64, new_name: &str) -> RegistryResult<()> {
        self.write().update_student(caller, id, new_name)
    }

    pub fn update_student_status(
        &self,
        caller: &Address,
        id: u64,
        status: StudentStatus,
    ) -> RegistryResult<()> {
        self.write().update_student_status(caller, id, status)
    }

    /// Rename and read back the updated record under one write lock
    pub fn update_student_and_fetch(&self, caller: &Address, id: u64, new_name: &str) -> RegistryResult<Student> {
        let mut registry = self.write();
        registry.update_student(caller, id, new_name)?;
        registry.get_by_id(id)
    }

    /// Change status and read back the updated record under one write lock
    pub fn update_status_and_fetch(
        &self,
        caller: &Address,
        id: u64,
        status: StudentStatus,
    ) -> RegistryResult<Student> {
        let mut registry = self.write();
        registry.update_student_status(caller, id, status)?;
        registry.get_by_id(id)
    }

    pub fn delete_by_id(&self, caller: &Address, id: u64) -> RegistryResult<()> {
        self.write().delete_by_id(caller, id)
    }

    pub fn get_by_id(&self, id: u64) -> RegistryResult<Student> {
        self.read().get_by_id(id)
    }

    pub fn get_student_by_index(&self, index: usize) -> RegistryResult<Student> {
        self.read().get_student_by_index(index)
    }

    pub fn get_all(&self) -> Vec<Student> {
        self.read().get_all()
    }

    pub fn get_student_count(&self) -> usize {
        self.read().get_student_count()
    }

    pub fn find_student_by_name(&self, name: &str) -> Vec<Student> {
        self.read().find_student_by_name(name)
    }

    pub fn events(&self) -> Vec<RegistryEvent> {
        self.read().events().to_vec()
    }

    pub fn events_for_student(&self, id: u64) -> Vec<RegistryEvent> {
        self.read().events_for_student(id)
    }

    /// Run `f` against one consistent view of the registry
    pub fn with_snapshot<T>(&self, f: impl FnOnce(&StudentRegistry) -> T) -> T {
        f(&self.read())
    }
}
