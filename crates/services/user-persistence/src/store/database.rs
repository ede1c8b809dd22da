//! Relational store backed by SeaORM.

use async_trait::async_trait;
use sea_orm::sea_query::OnConflict;
use sea_orm::{DatabaseConnection, EntityTrait};

use super::entities::user::{self, ActiveModel, Entity as UserEntity};
use super::Store;
use common::AppResult;
use domain::User;

/// Upserts users into the `users` table.
pub struct DatabaseStore {
    db: DatabaseConnection,
}

impl DatabaseStore {
    /// Create new store over an open connection
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl Store for DatabaseStore {
    async fn store(&self, user: &User) -> AppResult<()> {
        let active_model = ActiveModel::from(user);

        UserEntity::insert(active_model)
            .on_conflict(
                OnConflict::column(user::Column::Id)
                    .update_columns([user::Column::Email, user::Column::Name])
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await?;

        tracing::debug!(user_id = user.id, "User upserted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::Database;
    use common::AppError;

    async fn store() -> (Database, DatabaseStore) {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        let store = DatabaseStore::new(db.get_connection());
        (db, store)
    }

    #[tokio::test]
    async fn test_store_inserts_row() {
        let (db, store) = store().await;
        store.store(&User::new(42, "ada@example.com", "Ada")).await.unwrap();

        let row = UserEntity::find_by_id(42).one(db.connection()).await.unwrap().unwrap();
        assert_eq!(row.email, "ada@example.com");
        assert_eq!(row.name, "Ada");
    }

    #[tokio::test]
    async fn test_store_same_id_updates_row() {
        let (db, store) = store().await;
        store.store(&User::new(42, "ada@example.com", "Ada")).await.unwrap();
        store.store(&User::new(42, "ada@example.org", "Ada L.")).await.unwrap();

        let rows = UserEntity::find().all(db.connection()).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].email, "ada@example.org");
        assert_eq!(rows[0].name, "Ada L.");
    }

    #[tokio::test]
    async fn test_duplicate_email_is_database_error() {
        let (_db, store) = store().await;
        store.store(&User::new(1, "ada@example.com", "Ada")).await.unwrap();

        let err = store
            .store(&User::new(2, "ada@example.com", "Impostor"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Database(_)));
        assert!(err.is_persistence_failure());
    }
}
