//! Shared error response structures and wire-level error codes

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Standard error response structure used across all API endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code for client identification
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// Additional error details (field errors, etc.)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, serde_json::Value>>,

    /// Timestamp when the error occurred
    pub timestamp: DateTime<Utc>,
}

impl ErrorResponse {
    /// Create a new error response
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            details: None,
            timestamp: Utc::now(),
        }
    }

    /// Create an error response with details
    pub fn with_details(
        error: impl Into<String>,
        message: impl Into<String>,
        details: HashMap<String, serde_json::Value>,
    ) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            details: Some(details),
            timestamp: Utc::now(),
        }
    }
}

/// Error codes exposed on the wire
///
/// These are stable identifiers; clients branch on them, so renaming one is
/// a breaking API change.
pub mod error_codes {
    pub const PARAM_INVALID: &str = "PARAM_INVALID";
    pub const UNAUTHORIZED: &str = "UNAUTHORIZED";
    pub const USER_EXISTS: &str = "USER_EXISTS";
    pub const EMAIL_EXISTS: &str = "EMAIL_EXISTS";
    pub const USER_NOT_FOUND: &str = "USER_NOT_FOUND";
    pub const PASSWORD_WRONG: &str = "PASSWORD_WRONG";
    pub const CODE_INVALID: &str = "CODE_INVALID";
    pub const SYSTEM_ERROR: &str = "SYSTEM_ERROR";
}
