use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;

use super::{FeedbackRepository, UserRepository};
use crate::models::{FeedbackEntry, User};
use crate::utils::StoreError;

/// Users stored as a pretty-printed JSON array in a single file
#[derive(Debug, Clone)]
pub struct JsonFileUserRepository {
    path: PathBuf,
}

impl JsonFileUserRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Creates the file as `[]` when it does not exist yet
    async fn ensure_exists(&self) -> Result<(), StoreError> {
        if fs::try_exists(&self.path).await? {
            return Ok(());
        }
        log::info!("🗂️  Creating user store at {}", self.path.display());
        fs::write(&self.path, b"[]").await?;
        Ok(())
    }
}

#[async_trait]
impl UserRepository for JsonFileUserRepository {
    async fn list(&self) -> Result<Vec<User>, StoreError> {
        self.ensure_exists().await?;
        let raw = fs::read(&self.path).await?;
        let users: Vec<User> = serde_json::from_slice(&raw)?;
        Ok(users)
    }

    async fn replace_all(&self, users: &[User]) -> Result<(), StoreError> {
        let body = serde_json::to_vec_pretty(users)?;
        fs::write(&self.path, body).await?;
        log::debug!("💾 Wrote {} users to {}", users.len(), self.path.display());
        Ok(())
    }
}

/// Feedback log, one JSON object per line
#[derive(Debug, Clone)]
pub struct JsonLinesFeedbackRepository {
    path: PathBuf,
}

impl JsonLinesFeedbackRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl FeedbackRepository for JsonLinesFeedbackRepository {
    async fn append(&self, entry: &FeedbackEntry) -> Result<(), StoreError> {
        let mut line = serde_json::to_string(entry)?;
        line.push('\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(line.as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn sample_user(email: &str) -> User {
        User {
            email: email.to_string(),
            password: "$2b$04$hash".to_string(),
            first_name: "Ana".to_string(),
            last_name: "Souza".to_string(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_missing_file_reads_empty_and_is_created() {
        let dir = tempfile::tempdir().unwrap();
        let repo = JsonFileUserRepository::new(dir.path().join("users.json"));

        let users = repo.list().await.unwrap();
        assert!(users.is_empty());

        let raw = std::fs::read_to_string(repo.path()).unwrap();
        assert_eq!(raw, "[]");
    }

    #[tokio::test]
    async fn test_append_keeps_order() {
        let dir = tempfile::tempdir().unwrap();
        let repo = JsonFileUserRepository::new(dir.path().join("users.json"));

        repo.append(sample_user("a@x.com")).await.unwrap();
        repo.append(sample_user("b@x.com")).await.unwrap();

        let emails: Vec<String> = repo.list().await.unwrap().into_iter().map(|u| u.email).collect();
        assert_eq!(emails, vec!["a@x.com", "b@x.com"]);
    }

    #[tokio::test]
    async fn test_replace_all_rewrites_wholesale() {
        let dir = tempfile::tempdir().unwrap();
        let repo = JsonFileUserRepository::new(dir.path().join("users.json"));

        repo.append(sample_user("a@x.com")).await.unwrap();
        repo.replace_all(&[sample_user("c@x.com")]).await.unwrap();

        let users = repo.list().await.unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].email, "c@x.com");
    }

    #[tokio::test]
    async fn test_corrupt_file_is_a_serialization_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("users.json");
        std::fs::write(&path, "{not json").unwrap();

        let repo = JsonFileUserRepository::new(path);
        assert!(matches!(repo.list().await, Err(StoreError::Serialization(_))));
    }

    #[tokio::test]
    async fn test_feedback_lines_are_appended() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("feedback.json");
        let repo = JsonLinesFeedbackRepository::new(&path);

        let first = FeedbackEntry {
            user: "a@x.com".to_string(),
            sentiment: Some("positive".to_string()),
            concern: None,
            timestamp: Utc::now(),
        };
        let second = FeedbackEntry {
            user: "b@x.com".to_string(),
            sentiment: None,
            concern: Some("slow replies".to_string()),
            timestamp: Utc::now(),
        };
        repo.append(&first).await.unwrap();
        repo.append(&second).await.unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = raw.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(serde_json::from_str::<FeedbackEntry>(lines[0]).unwrap(), first);
        assert_eq!(serde_json::from_str::<FeedbackEntry>(lines[1]).unwrap(), second);
        assert!(raw.ends_with('\n'));
    }
}
