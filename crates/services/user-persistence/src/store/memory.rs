//! In-memory store.

use async_trait::async_trait;
use tokio::sync::RwLock;

use common::AppResult;
use domain::User;

use super::Store;

/// Keeps users in insertion order for the lifetime of the process.
///
/// Storing a user whose id is already present replaces that record in place.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<Vec<User>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every stored user, in first-stored order
    pub async fn records(&self) -> Vec<User> {
        self.records.read().await.clone()
    }

    /// Number of distinct users held
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    /// Whether nothing has been stored yet
    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn store(&self, user: &User) -> AppResult<()> {
        let mut records = self.records.write().await;
        match records.iter_mut().find(|existing| existing.id == user.id) {
            Some(existing) => *existing = user.clone(),
            None => records.push(user.clone()),
        }
        tracing::debug!(user_id = user.id, total = records.len(), "User held in memory");
        Ok(())
    }
}
