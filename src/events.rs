// 📜 Audit Events - "Every change is an event"
//
// Each successful mutation appends exactly one event. Rejected calls append nothing.

use crate::entities::{Student, StudentStatus};
use crate::guard::Address;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventType {
    StudentRegistered,
    StudentUpdated,
    StudentStatusUpdated,
    StudentDeleted,
}

impl EventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::StudentRegistered => "StudentRegistered",
            EventType::StudentUpdated => "StudentUpdated",
            EventType::StudentStatusUpdated => "StudentStatusUpdated",
            EventType::StudentDeleted => "StudentDeleted",
        }
    }
}

/// Event for audit trail
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryEvent {
    pub event_id: String,
    pub timestamp: DateTime<Utc>,
    pub event_type: EventType,
    pub student_id: u64,
    pub data: serde_json::Value,
    pub actor: Address,
}

impl RegistryEvent {
    pub fn new(event_type: EventType, student_id: u64, data: serde_json::Value, actor: &Address) -> Self {
        Self {
            event_id: uuid::Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            event_type,
            student_id,
            data,
            actor: actor.clone(),
        }
    }

    pub fn registered(student: &Student, actor: &Address) -> Self {
        Self::new(
            EventType::StudentRegistered,
            student.id,
            serde_json::json!({ "name": student.name, "age": student.age }),
            actor,
        )
    }

    pub fn updated(id: u64, name: &str, actor: &Address) -> Self {
        Self::new(EventType::StudentUpdated, id, serde_json::json!({ "name": name }), actor)
    }

    pub fn status_updated(id: u64, status: StudentStatus, actor: &Address) -> Self {
        Self::new(
            EventType::StudentStatusUpdated,
            id,
            serde_json::json!({ "status": status, "code": status.code() }),
            actor,
        )
    }

    pub fn deleted(id: u64, actor: &Address) -> Self {
        Self::new(EventType::StudentDeleted, id, serde_json::json!({}), actor)
    }

    /// One-line description for logs and CLI output
    pub fn summary(&self) -> String {
        format!(
            "{} {} student #{} by {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S"),
            self.event_type.as_str(),
            self.student_id,
            self.actor
        )
    }
}
