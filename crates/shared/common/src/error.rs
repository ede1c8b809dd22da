//! Unified error handling for persistence.
//!
//! Every store backend reports failures through [`AppError`], so callers of
//! the persistence service see one error type regardless of the medium.

use domain::DomainError;
use thiserror::Error;

/// Application error types.
#[derive(Error, Debug)]
pub enum AppError {
    // Persistence
    #[error("Persistence failure: {0}")]
    Persistence(String),

    #[cfg(feature = "database")]
    #[error("Database error")]
    Database(#[from] sea_orm::DbErr),

    #[error("I/O error")]
    Io(#[from] std::io::Error),

    #[error("Serialization error")]
    Serialization(#[from] serde_json::Error),

    // Input and setup
    #[error("{0}")]
    Validation(String),

    #[error("Invalid configuration: {0}")]
    Configuration(String),
}

impl AppError {
    /// Get stable error code
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Persistence(_) => "PERSISTENCE_FAILURE",
            #[cfg(feature = "database")]
            AppError::Database(_) => "DATABASE_ERROR",
            AppError::Io(_) => "IO_ERROR",
            AppError::Serialization(_) => "SERIALIZATION_ERROR",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::Configuration(_) => "CONFIGURATION_ERROR",
        }
    }

    /// Whether the error came from the persistence medium rather than input
    pub fn is_persistence_failure(&self) -> bool {
        match self {
            AppError::Persistence(_) | AppError::Io(_) | AppError::Serialization(_) => true,
            #[cfg(feature = "database")]
            AppError::Database(_) => true,
            _ => false,
        }
    }

    /// Get user-facing message (hides internal details)
    pub fn user_message(&self) -> String {
        match self {
            // Show full message for input errors
            AppError::Validation(msg) => msg.clone(),
            AppError::Persistence(msg) => {
                tracing::error!("Persistence failure: {}", msg);
                "The user could not be stored".to_string()
            }
            #[cfg(feature = "database")]
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                "A database error occurred".to_string()
            }
            AppError::Io(e) => {
                tracing::error!("I/O error: {:?}", e);
                "A storage I/O error occurred".to_string()
            }
            AppError::Serialization(e) => {
                tracing::error!("Serialization error: {:?}", e);
                "The user record could not be encoded".to_string()
            }
            _ => self.to_string(),
        }
    }
}

// =============================================================================
// Domain Error Conversion
// =============================================================================

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(msg) => AppError::Validation(msg),
        }
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Convenience constructors
impl AppError {
    pub fn persistence(msg: impl Into<String>) -> Self {
        AppError::Persistence(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn configuration(msg: impl Into<String>) -> Self {
        AppError::Configuration(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_validation_maps_to_validation() {
        let err = AppError::from(DomainError::validation("Name must not be empty"));
        assert!(matches!(err, AppError::Validation(ref m) if m == "Name must not be empty"));
        assert_eq!(err.code(), "VALIDATION_ERROR");
        assert!(!err.is_persistence_failure());
    }

    #[test]
    fn test_persistence_hides_details_from_users() {
        let err = AppError::persistence("disk quota exceeded on /var/lib/users");
        assert_eq!(err.code(), "PERSISTENCE_FAILURE");
        assert!(err.is_persistence_failure());
        assert_eq!(err.user_message(), "The user could not be stored");
    }

    #[test]
    fn test_io_error_is_persistence_failure() {
        let err = AppError::from(std::io::Error::new(std::io::ErrorKind::Other, "boom"));
        assert!(err.is_persistence_failure());
        assert_eq!(err.code(), "IO_ERROR");
    }
}
