//! Store layer - persistence backends for users.

mod database;
pub mod entities;
mod json_lines;
mod memory;
mod user_store;

pub use database::DatabaseStore;
pub use json_lines::JsonLinesStore;
pub use memory::MemoryStore;
pub use user_store::Store;

#[cfg(any(test, feature = "test-utils"))]
pub use user_store::MockStore;
