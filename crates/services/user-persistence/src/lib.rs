//! User Persistence Library
//!
//! A narrow service that saves users through an injected store.
//! The store can be chosen at runtime (memory, JSON-lines file, database)
//! or supplied directly by embedding code and tests.

pub mod config;
pub mod infra;
pub mod service;
pub mod store;

use tracing::info;

use common::{AppError, AppResult, DatabaseConfig};
use domain::User;

use crate::config::{StoreBackend, UserPersistenceConfig};
use crate::infra::Database;
use crate::service::{UserPersistence, UserPersistenceService};
use crate::store::{DatabaseStore, JsonLinesStore, MemoryStore, Store};

/// Build the store the configuration selects.
pub async fn build_store(config: &UserPersistenceConfig) -> AppResult<Box<dyn Store>> {
    let store: Box<dyn Store> = match config.backend {
        StoreBackend::Memory => Box::new(MemoryStore::new()),
        StoreBackend::File => Box::new(JsonLinesStore::new(&config.file_path)),
        StoreBackend::Database => {
            let db = Database::connect_with(&config.database).await?;
            Box::new(DatabaseStore::new(db.get_connection()))
        }
    };

    info!(backend = %config.backend, "Store ready");
    Ok(store)
}

/// Build a service over the configured store.
pub async fn build_service(
    config: &UserPersistenceConfig,
) -> AppResult<UserPersistenceService<Box<dyn Store>>> {
    Ok(UserPersistenceService::new(build_store(config).await?))
}

/// Validate a user and save it through a freshly built service (for CLI commands).
pub async fn run_save(config: &UserPersistenceConfig, user: &User) -> AppResult<()> {
    user.validate()?;

    let service = build_service(config).await?;
    service.save_user(user).await?;

    info!(user_id = user.id, backend = %config.backend, "User saved");
    Ok(())
}

/// One-line report of a failed save, safe to show to the person at the terminal.
pub fn describe_failure(err: &AppError) -> String {
    format!("error [{}]: {}", err.code(), err.user_message())
}

/// Run migrations (for CLI commands).
pub async fn run_migrations(database: &DatabaseConfig, action: MigrateAction) -> AppResult<()> {
    let db = Database::connect_without_migrations(database).await?;

    match action {
        MigrateAction::Up => {
            db.run_migrations().await?;
            info!("Migrations applied successfully");
        }
        MigrateAction::Down => {
            db.rollback_migration().await?;
            info!("Rolled back last migration");
        }
        MigrateAction::Status => {
            let status = db.migration_status().await?;
            for (name, applied) in status {
                let marker = if applied { "[x]" } else { "[ ]" };
                println!("{} {}", marker, name);
            }
        }
        MigrateAction::Fresh => {
            db.fresh_migrations().await?;
            info!("Database reset and migrations applied");
        }
    }

    Ok(())
}

/// Migration action type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrateAction {
    Up,
    Down,
    Status,
    Fresh,
}
