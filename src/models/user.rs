use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Stored account record. `email` is the unique key.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct User {
    pub email: String,
    pub password: String,  // bcrypt hash, never plaintext
    pub first_name: String,
    pub last_name: String,
    pub created_at: DateTime<Utc>,
}

/// Public view of a user, returned after a successful verification
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct UserProfile {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

impl From<&User> for UserProfile {
    fn from(user: &User) -> Self {
        Self {
            email: user.email.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
        }
    }
}

/// Per-request session context decoded from the signed cookie
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SessionUser {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

impl From<UserProfile> for SessionUser {
    fn from(profile: UserProfile) -> Self {
        Self {
            email: profile.email,
            first_name: profile.first_name,
            last_name: profile.last_name,
        }
    }
}
