use async_trait::async_trait;
use tokio::sync::Mutex;

use super::{FeedbackRepository, UserRepository};
use crate::models::{FeedbackEntry, User};
use crate::utils::StoreError;

/// In-memory stores used by the handler and service tests
#[derive(Default)]
pub struct MemoryUserRepository {
    users: Mutex<Vec<User>>,
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn list(&self) -> Result<Vec<User>, StoreError> {
        Ok(self.users.lock().await.clone())
    }

    async fn replace_all(&self, users: &[User]) -> Result<(), StoreError> {
        *self.users.lock().await = users.to_vec();
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryFeedbackRepository {
    pub entries: Mutex<Vec<FeedbackEntry>>,
}

#[async_trait]
impl FeedbackRepository for MemoryFeedbackRepository {
    async fn append(&self, entry: &FeedbackEntry) -> Result<(), StoreError> {
        self.entries.lock().await.push(entry.clone());
        Ok(())
    }
}

pub const BROKEN_STORE_DETAIL: &str = "read-only file system: /var/data/users.json";

/// Store whose every operation fails with an I/O error
#[derive(Default)]
pub struct BrokenStore;

#[async_trait]
impl UserRepository for BrokenStore {
    async fn list(&self) -> Result<Vec<User>, StoreError> {
        Err(StoreError::Io(BROKEN_STORE_DETAIL.to_string()))
    }

    async fn replace_all(&self, _users: &[User]) -> Result<(), StoreError> {
        Err(StoreError::Io(BROKEN_STORE_DETAIL.to_string()))
    }
}

#[async_trait]
impl FeedbackRepository for BrokenStore {
    async fn append(&self, _entry: &FeedbackEntry) -> Result<(), StoreError> {
        Err(StoreError::Io(BROKEN_STORE_DETAIL.to_string()))
    }
}
