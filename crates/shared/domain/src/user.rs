//! User domain entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::{EMAIL_SEPARATOR, MAX_EMAIL_LENGTH, MAX_NAME_LENGTH, MIN_NAME_LENGTH};
use crate::error::{DomainError, DomainResult};

/// User domain entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new user stamped with the current time
    pub fn new(id: i64, email: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id,
            email: email.into(),
            name: name.into(),
            created_at: Utc::now(),
        }
    }

    /// Check the record against the users table constraints.
    ///
    /// Persistence never calls this; it is offered to input surfaces
    /// such as the CLI that want to reject bad data early.
    pub fn validate(&self) -> DomainResult<()> {
        let name_len = self.name.trim().chars().count();
        if name_len < MIN_NAME_LENGTH {
            return Err(DomainError::validation("Name must not be empty"));
        }
        if name_len > MAX_NAME_LENGTH {
            return Err(DomainError::validation(format!(
                "Name must be at most {} characters",
                MAX_NAME_LENGTH
            )));
        }
        if !self.email.contains(EMAIL_SEPARATOR) {
            return Err(DomainError::validation("Email must contain '@'"));
        }
        if self.email.len() > MAX_EMAIL_LENGTH {
            return Err(DomainError::validation(format!(
                "Email must be at most {} characters",
                MAX_EMAIL_LENGTH
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_keeps_fields() {
        let user = User::new(42, "ada@example.com", "Ada");
        assert_eq!(user.id, 42);
        assert_eq!(user.email, "ada@example.com");
        assert_eq!(user.name, "Ada");
    }

    #[test]
    fn test_validate_accepts_well_formed_user() {
        assert!(User::new(1, "ada@example.com", "Ada").validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_blank_name() {
        let err = User::new(1, "ada@example.com", "   ").validate().unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn test_validate_rejects_email_without_separator() {
        let err = User::new(1, "ada.example.com", "Ada").validate().unwrap_err();
        assert_eq!(err, DomainError::validation("Email must contain '@'"));
    }

    #[test]
    fn test_user_serializes_with_rfc3339_timestamp() {
        let user = User::new(7, "bob@example.com", "Bob");
        let json = serde_json::to_string(&user).unwrap();
        let back: User = serde_json::from_str(&json).unwrap();
        assert_eq!(back, user);
        assert!(json.contains("\"id\":7"));
    }
}
