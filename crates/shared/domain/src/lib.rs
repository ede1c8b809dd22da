//! Domain layer - Core business entities.
//!
//! This crate contains pure domain types with no infrastructure dependencies.
//! The persistence service and every store backend share these types.

pub mod constants;
pub mod error;
pub mod user;

pub use constants::*;
pub use error::{DomainError, DomainResult};
pub use user::User;
