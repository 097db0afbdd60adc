//! Account endpoint DTOs
//!
//! The request structs carry the field rules as `validator` annotations;
//! the custom validators delegate to the shared predicates so the wire
//! layer and any other consumer agree on what a well-formed value is.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use sg_core::Account;
use sg_shared::validation::validators;

/// Request body for `POST /api/user/register`
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(custom = "validate_username")]
    pub username: String,

    #[validate(custom = "validate_password")]
    pub password: String,

    #[validate(custom = "validate_email")]
    pub email: String,

    /// Optional self-reported sex, `M` or `F`
    #[validate(custom = "validate_sex")]
    pub sex: Option<String>,

    /// Code previously mailed to `email`
    #[validate(custom = "validate_code")]
    pub verification_code: String,
}

/// Request body for `POST /api/user/login`
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "username is required"))]
    pub username: String,

    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

/// Query parameters for `GET /api/user/verification-code`
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SendCodeQuery {
    #[validate(custom = "validate_email")]
    pub email: String,
}

/// Request body for `POST /api/user/reset-password`
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ResetPasswordRequest {
    #[validate(custom = "validate_email")]
    pub email: String,

    /// Code previously mailed to `email`
    #[validate(custom = "validate_code")]
    pub verification_code: String,

    #[validate(custom = "validate_password")]
    pub new_password: String,
}

/// Public view of an account, without the credential fields
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountResponse {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub sex: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Account> for AccountResponse {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            username: account.username,
            email: account.email,
            sex: account.sex.map(|s| s.as_str().to_string()),
            created_at: account.created_at,
        }
    }
}

/// Response body for a successful login
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub account: AccountResponse,
    /// Opaque token to present in the `X-Session-Id` header
    pub session_token: String,
}

/// Plain confirmation message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

fn field_error(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Borrowed(message));
    error
}

fn validate_username(username: &str) -> Result<(), ValidationError> {
    if validators::is_valid_username(username) {
        Ok(())
    } else {
        Err(field_error(
            "username",
            "username must be 4-32 characters",
        ))
    }
}

fn validate_password(password: &str) -> Result<(), ValidationError> {
    if validators::is_valid_password(password) {
        Ok(())
    } else {
        Err(field_error(
            "password",
            "password must be at least 8 letters and digits with a lowercase, an uppercase, and a digit",
        ))
    }
}

fn validate_email(email: &str) -> Result<(), ValidationError> {
    if validators::is_valid_email(email) {
        Ok(())
    } else {
        Err(field_error("email", "email address is not valid"))
    }
}

fn validate_sex(sex: &str) -> Result<(), ValidationError> {
    if validators::is_valid_sex(sex) {
        Ok(())
    } else {
        Err(field_error("sex", "sex must be M or F"))
    }
}

fn validate_code(code: &str) -> Result<(), ValidationError> {
    if validators::is_valid_code(code) {
        Ok(())
    } else {
        Err(field_error(
            "verification_code",
            "verification code must be 6 digits",
        ))
    }
}
