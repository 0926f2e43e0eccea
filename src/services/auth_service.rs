use std::sync::Arc;

use bcrypt::{hash, verify, DEFAULT_COST};
use chrono::Utc;
use serde::Deserialize;

use crate::database::UserRepository;
use crate::models::{User, UserProfile};
use crate::utils::AuthError;

// Form payloads
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

/// Registration and credential checks over any user repository.
///
/// Every call reads the whole store; `register` also rewrites it. There is
/// no isolation between the duplicate check and the rewrite.
#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    hash_cost: u32,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self::with_cost(users, DEFAULT_COST)
    }

    pub fn with_cost(users: Arc<dyn UserRepository>, hash_cost: u32) -> Self {
        Self { users, hash_cost }
    }

    async fn find_user(&self, email: &str) -> Result<Option<User>, AuthError> {
        let users = self.users.list().await?;
        Ok(users.into_iter().find(|u| u.email == email))
    }

    pub async fn register(
        &self,
        email: &str,
        password: &str,
        first_name: &str,
        last_name: &str,
    ) -> Result<(), AuthError> {
        if self.find_user(email).await?.is_some() {
            return Err(AuthError::DuplicateEmail);
        }

        let cost = self.hash_cost;
        let plain = password.to_string();
        let password_hash = tokio::task::spawn_blocking(move || hash(plain, cost))
            .await
            .map_err(|e| AuthError::Hashing(e.to_string()))?
            .map_err(|e| AuthError::Hashing(e.to_string()))?;

        self.users
            .append(User {
                email: email.to_string(),
                password: password_hash,
                first_name: first_name.to_string(),
                last_name: last_name.to_string(),
                created_at: Utc::now(),
            })
            .await?;

        log::info!("👤 New user registered: {}", email);
        Ok(())
    }

    pub async fn verify(&self, email: &str, password: &str) -> Result<UserProfile, AuthError> {
        let user = self
            .find_user(email)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        // bcrypt is CPU-bound; keep it off the async workers
        let plain = password.to_string();
        let stored = user.password.clone();
        let checked = tokio::task::spawn_blocking(move || verify(plain, &stored))
            .await
            .map_err(|e| AuthError::Hashing(e.to_string()))?;

        // A stored value that is not a valid bcrypt hash can never match
        let valid = checked.unwrap_or_else(|e| {
            log::warn!("⚠️  Unreadable password hash for {}: {}", email, e);
            false
        });

        if !valid {
            return Err(AuthError::BadPassword);
        }

        Ok(UserProfile::from(&user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::memory::MemoryUserRepository;

    fn service() -> (AuthService, Arc<MemoryUserRepository>) {
        let repo = Arc::new(MemoryUserRepository::default());
        (AuthService::with_cost(repo.clone(), 4), repo)
    }

    #[tokio::test]
    async fn test_register_then_verify() {
        let (auth, _) = service();
        auth.register("a@x.com", "pw", "A", "B").await.unwrap();

        let profile = auth.verify("a@x.com", "pw").await.unwrap();
        assert_eq!(profile.email, "a@x.com");
        assert_eq!(profile.first_name, "A");
        assert_eq!(profile.last_name, "B");
    }

    #[tokio::test]
    async fn test_duplicate_email() {
        let (auth, repo) = service();
        auth.register("a@x.com", "pw", "A", "B").await.unwrap();

        let err = auth.register("a@x.com", "other", "C", "D").await.unwrap_err();
        assert!(matches!(err, AuthError::DuplicateEmail));
        assert_eq!(repo.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_email_match_is_case_sensitive() {
        let (auth, _) = service();
        auth.register("a@x.com", "pw", "A", "B").await.unwrap();
        auth.register("A@x.com", "pw", "A", "B").await.unwrap();

        assert!(matches!(
            auth.verify("A@X.COM", "pw").await,
            Err(AuthError::UserNotFound)
        ));
    }

    #[tokio::test]
    async fn test_wrong_password() {
        let (auth, _) = service();
        auth.register("a@x.com", "pw", "A", "B").await.unwrap();

        let err = auth.verify("a@x.com", "wrong").await.unwrap_err();
        assert!(matches!(err, AuthError::BadPassword));
        assert_eq!(err.to_string(), "Incorrect password");
    }

    #[tokio::test]
    async fn test_unknown_email() {
        let (auth, _) = service();
        let err = auth.verify("nobody@x.com", "pw").await.unwrap_err();
        assert!(matches!(err, AuthError::UserNotFound));
        assert_eq!(err.to_string(), "User not found");
    }

    #[tokio::test]
    async fn test_password_is_stored_hashed() {
        let (auth, repo) = service();
        auth.register("a@x.com", "secret-pw", "A", "B").await.unwrap();

        let stored = repo.list().await.unwrap().remove(0);
        assert_ne!(stored.password, "secret-pw");
        assert!(stored.password.starts_with("$2"));
    }

    #[tokio::test]
    async fn test_profile_never_carries_the_hash() {
        let (auth, repo) = service();
        auth.register("a@x.com", "pw", "A", "B").await.unwrap();
        let stored_hash = repo.list().await.unwrap().remove(0).password;

        let profile = auth.verify("a@x.com", "pw").await.unwrap();
        let json = serde_json::to_string(&profile).unwrap();
        assert!(!json.contains(&stored_hash));
        assert!(!json.contains("password"));
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_hashing_does_not_block_the_runtime() {
        let slow = AuthService::with_cost(Arc::new(MemoryUserRepository::default()), 10);

        // On a single-threaded runtime the ticker only finishes first if the
        // hash runs on another thread
        let ticker = async {
            for _ in 0..5 {
                tokio::time::sleep(std::time::Duration::from_millis(1)).await;
            }
            std::time::Instant::now()
        };
        let registration = async {
            slow.register("slow@x.com", "pw", "S", "L").await.unwrap();
            std::time::Instant::now()
        };

        let (ticked_at, registered_at) = tokio::join!(ticker, registration);
        assert!(ticked_at < registered_at);
        assert!(slow.verify("slow@x.com", "pw").await.is_ok());
    }

    #[tokio::test]
    async fn test_corrupt_hash_is_bad_password() {
        let (auth, repo) = service();
        repo.replace_all(&[User {
            email: "a@x.com".to_string(),
            password: "not-a-hash".to_string(),
            first_name: "A".to_string(),
            last_name: "B".to_string(),
            created_at: Utc::now(),
        }])
        .await
        .unwrap();

        assert!(matches!(
            auth.verify("a@x.com", "not-a-hash").await,
            Err(AuthError::BadPassword)
        ));
    }
}
