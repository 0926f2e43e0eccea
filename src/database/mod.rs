//! Flat-file persistence behind repository traits.
//!
//! Users live in one JSON array rewritten on every mutation; feedback is an
//! append-only JSON-lines log. Neither file is locked: concurrent writers
//! can lose updates (last writer wins).

pub mod json_file;
#[cfg(test)]
pub mod memory;

use async_trait::async_trait;

use crate::models::{FeedbackEntry, User};
use crate::utils::StoreError;

pub use json_file::{JsonFileUserRepository, JsonLinesFeedbackRepository};

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Full ordered contents of the store
    async fn list(&self) -> Result<Vec<User>, StoreError>;

    /// Rewrites the store wholesale
    async fn replace_all(&self, users: &[User]) -> Result<(), StoreError>;

    /// Adds one user at the end. No isolation between the read and the rewrite.
    async fn append(&self, user: User) -> Result<(), StoreError> {
        let mut users = self.list().await?;
        users.push(user);
        self.replace_all(&users).await
    }
}

#[async_trait]
pub trait FeedbackRepository: Send + Sync {
    async fn append(&self, entry: &FeedbackEntry) -> Result<(), StoreError>;
}
