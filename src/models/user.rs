//! User record

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A user profile as returned by the user directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
    /// Last time the user was active
    pub last_seen: DateTime<Utc>,
}

impl User {
    /// Creates a new User last seen now.
    pub fn new(id: impl Into<String>, username: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            username: username.into(),
            email: email.into(),
            last_seen: Utc::now(),
        }
    }
}
