//! Account entity representing a registered user in the Signet system.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Self-reported sex of the account holder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sex {
    #[serde(rename = "M")]
    Male,
    #[serde(rename = "F")]
    Female,
}

impl Sex {
    /// Single-character representation as stored in the database
    pub fn as_str(&self) -> &'static str {
        match self {
            Sex::Male => "M",
            Sex::Female => "F",
        }
    }

    /// Parse the single-character representation
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "M" => Some(Sex::Male),
            "F" => Some(Sex::Female),
            _ => None,
        }
    }
}

/// Account entity representing a registered user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Unique identifier for the account
    pub id: Uuid,

    /// Unique username chosen at registration
    pub username: String,

    /// Encoded password hash; the plaintext is never stored
    pub password_hash: String,

    /// Unique email address, verified at registration
    pub email: String,

    /// Optional self-reported sex
    pub sex: Option<Sex>,

    /// Timestamp when the account was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the account was last updated
    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// Creates a new Account with server-set identifier and timestamps
    pub fn new(
        username: String,
        password_hash: String,
        email: String,
        sex: Option<Sex>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            username,
            password_hash,
            email,
            sex,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replaces the password hash and touches the modification timestamp
    pub fn set_password_hash(&mut self, password_hash: String) {
        self.password_hash = password_hash;
        self.updated_at = Utc::now();
    }
}
