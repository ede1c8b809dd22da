//! User persistence service - the single entry point for saving users.
//!
//! SOLID (SRP): Persists users and nothing else.
//! SOLID (DIP): Depends on the `Store` trait, never on a concrete medium.

use async_trait::async_trait;
use tracing::{debug, warn};

use common::AppResult;
use domain::User;

use crate::store::Store;

/// Persistence entry point for dependency injection.
#[async_trait]
pub trait UserPersistence: Send + Sync {
    /// Hand the user to the backing store.
    ///
    /// Errors are the store's own, returned unchanged.
    async fn save_user(&self, user: &User) -> AppResult<()>;
}

/// Owns exactly one store for its whole lifetime and forwards every save to it.
pub struct UserPersistenceService<S> {
    store: S,
}

impl<S: Store> UserPersistenceService<S> {
    /// Take ownership of the store
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Borrow the owned store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Consume the service, handing the store back
    pub fn into_store(self) -> S {
        self.store
    }
}

#[async_trait]
impl<S: Store> UserPersistence for UserPersistenceService<S> {
    async fn save_user(&self, user: &User) -> AppResult<()> {
        debug!(user_id = user.id, "Saving user");

        if let Err(err) = self.store.store(user).await {
            warn!(user_id = user.id, code = err.code(), error = %err, "Store rejected user");
            return Err(err);
        }

        Ok(())
    }
}
