//! User persistence configuration.

use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use common::{AppError, DatabaseConfig};

/// Default JSON-lines file for the `file` backend
pub const DEFAULT_STORE_FILE: &str = "users.jsonl";

/// Default database URL for the `database` backend
pub const DEFAULT_DATABASE_URL: &str = "sqlite::memory:";

/// Which persistence medium backs the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoreBackend {
    #[default]
    Memory,
    File,
    Database,
}

impl FromStr for StoreBackend {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(StoreBackend::Memory),
            "file" => Ok(StoreBackend::File),
            "database" | "db" => Ok(StoreBackend::Database),
            other => Err(AppError::configuration(format!(
                "unknown store backend '{}' (expected memory, file or database)",
                other
            ))),
        }
    }
}

impl StoreBackend {
    /// Read `USER_STORE_BACKEND`, defaulting to memory when unset.
    pub fn from_env() -> Result<Self, AppError> {
        match env::var("USER_STORE_BACKEND") {
            Ok(value) => value.parse(),
            Err(_) => Ok(StoreBackend::default()),
        }
    }
}

impl fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreBackend::Memory => write!(f, "memory"),
            StoreBackend::File => write!(f, "file"),
            StoreBackend::Database => write!(f, "database"),
        }
    }
}

/// User persistence configuration.
#[derive(Debug, Clone)]
pub struct UserPersistenceConfig {
    /// Selected store backend
    pub backend: StoreBackend,
    /// Target file for the `file` backend
    pub file_path: PathBuf,
    /// Connection settings for the `database` backend
    pub database: DatabaseConfig,
}

impl UserPersistenceConfig {
    /// Load configuration from environment variables.
    ///
    /// Fails only when `USER_STORE_BACKEND` names an unknown backend.
    pub fn from_env() -> Result<Self, AppError> {
        Ok(Self::from_env_with_backend(StoreBackend::from_env()?))
    }

    /// Load everything but the backend from environment variables.
    pub fn from_env_with_backend(backend: StoreBackend) -> Self {
        Self {
            backend,
            file_path: env::var("USER_STORE_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_STORE_FILE)),
            database: Self::database_from_env(),
        }
    }

    /// Database settings alone (for migrate commands).
    pub fn database_from_env() -> DatabaseConfig {
        DatabaseConfig {
            url: env::var("USER_PERSISTENCE_DATABASE_URL")
                .or_else(|_| env::var("DATABASE_URL"))
                .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
            ..DatabaseConfig::default()
        }
    }

    /// Same configuration with a different backend
    pub fn with_backend(mut self, backend: StoreBackend) -> Self {
        self.backend = backend;
        self
    }
}

impl Default for UserPersistenceConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::default(),
            file_path: PathBuf::from(DEFAULT_STORE_FILE),
            database: DatabaseConfig {
                url: DEFAULT_DATABASE_URL.to_string(),
                ..DatabaseConfig::default()
            },
        }
    }
}
