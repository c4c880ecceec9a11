// School Registry - Core Library
// Exposes all modules for use in CLI, API server, and tests

pub mod entities;
pub mod error;
pub mod guard;
pub mod events;
pub mod registry;
pub mod shared;
pub mod roster;
pub mod config;

#[cfg(feature = "server")]
pub mod api;

// Re-export commonly used types
pub use entities::{Student, StudentStatus, MAX_AGE, MIN_AGE};
pub use error::{ErrorKind, InvariantViolation, RegistryError, RegistryResult};
pub use guard::{ensure_owner, Address};
pub use events::{EventType, RegistryEvent};
pub use registry::StudentRegistry;
pub use shared::SharedRegistry;
pub use roster::{load_roster, seed_registry, RosterRow};
pub use config::{init_tracing, RegistryConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
