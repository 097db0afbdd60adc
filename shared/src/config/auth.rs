//! Session and verification-code configuration

use serde::{Deserialize, Serialize};

/// Authentication-related configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AuthConfig {
    /// Session token settings
    pub session: SessionConfig,

    /// Verification code settings
    pub verification: VerificationConfig,
}

impl AuthConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self {
            session: SessionConfig::from_env(),
            verification: VerificationConfig::from_env(),
        }
    }
}

/// Session token configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SessionConfig {
    /// Minutes before an unused session token expires
    pub ttl_minutes: i64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self { ttl_minutes: 30 }
    }
}

impl SessionConfig {
    pub fn from_env() -> Self {
        let ttl_minutes = std::env::var("SESSION_TTL_MINUTES")
            .unwrap_or_else(|_| "30".to_string())
            .parse()
            .unwrap_or(30);
        Self { ttl_minutes }
    }
}

/// Verification code configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VerificationConfig {
    /// Minutes before an issued code expires
    pub code_ttl_minutes: i64,

    /// Whether a mail delivery failure fails the whole send operation
    pub fail_on_mail_error: bool,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            code_ttl_minutes: 5,
            fail_on_mail_error: true,
        }
    }
}

impl VerificationConfig {
    pub fn from_env() -> Self {
        let code_ttl_minutes = std::env::var("VERIFICATION_CODE_TTL_MINUTES")
            .unwrap_or_else(|_| "5".to_string())
            .parse()
            .unwrap_or(5);
        let fail_on_mail_error = std::env::var("MAIL_FAILURE_BLOCKS_SEND")
            .map(|v| v != "false" && v != "0")
            .unwrap_or(true);
        Self {
            code_ttl_minutes,
            fail_on_mail_error,
        }
    }
}
