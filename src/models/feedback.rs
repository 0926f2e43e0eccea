use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One line of the feedback log
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct FeedbackEntry {
    pub user: String,
    pub sentiment: Option<String>,
    pub concern: Option<String>,
    pub timestamp: DateTime<Utc>,
}
