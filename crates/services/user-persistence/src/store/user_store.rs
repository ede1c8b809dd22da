//! User store trait - the single persistence capability.

use std::sync::Arc;

use async_trait::async_trait;

use common::AppResult;
use domain::User;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Persistence capability for users.
///
/// Implementations decide the medium and any mutual exclusion they need.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait Store: Send + Sync {
    /// Durably record the user
    async fn store(&self, user: &User) -> AppResult<()>;
}

#[async_trait]
impl<S: Store + ?Sized> Store for Box<S> {
    async fn store(&self, user: &User) -> AppResult<()> {
        (**self).store(user).await
    }
}

#[async_trait]
impl<S: Store + ?Sized> Store for Arc<S> {
    async fn store(&self, user: &User) -> AppResult<()> {
        (**self).store(user).await
    }
}
