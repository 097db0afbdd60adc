//! Authentication and account lifecycle error types

use thiserror::Error;

/// Errors raised by the account lifecycle operations
///
/// Each variant corresponds to one caller-visible failure kind; the HTTP
/// layer maps them to wire codes and status codes without inspecting
/// messages.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// The requested username is already registered
    #[error("user already exists")]
    UserAlreadyExists,

    /// The email address is already bound to an account
    #[error("email is already registered")]
    EmailAlreadyRegistered,

    /// No account matches the given username or email
    #[error("user not found")]
    UserNotFound,

    /// The password did not verify against the stored hash
    #[error("wrong password")]
    WrongPassword,

    /// The verification code is missing, expired, or does not match
    #[error("verification code is invalid or expired")]
    InvalidVerificationCode,
}
