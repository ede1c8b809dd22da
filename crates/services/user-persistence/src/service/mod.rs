//! Service layer.

mod user_persistence_service;

pub use user_persistence_service::{UserPersistence, UserPersistenceService};
