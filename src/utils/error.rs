use std::fmt;

/// Failures of the flat-file repositories
#[derive(Debug)]
pub enum StoreError {
    Io(String),
    Serialization(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Io(msg) => write!(f, "Storage I/O error: {}", msg),
            StoreError::Serialization(msg) => write!(f, "Storage format error: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        StoreError::Io(e.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Serialization(e.to_string())
    }
}

#[derive(Debug)]
pub enum AuthError {
    DuplicateEmail,
    UserNotFound,
    BadPassword,
    Storage(StoreError),
    Hashing(String),
}

impl AuthError {
    /// Whether the message may be shown to the person filling in the form
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            AuthError::DuplicateEmail | AuthError::UserNotFound | AuthError::BadPassword
        )
    }
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::DuplicateEmail => write!(f, "Email already registered"),
            AuthError::UserNotFound => write!(f, "User not found"),
            AuthError::BadPassword => write!(f, "Incorrect password"),
            AuthError::Storage(e) => write!(f, "{}", e),
            AuthError::Hashing(msg) => write!(f, "Password hashing error: {}", msg),
        }
    }
}

impl std::error::Error for AuthError {}

impl From<StoreError> for AuthError {
    fn from(e: StoreError) -> Self {
        AuthError::Storage(e)
    }
}
