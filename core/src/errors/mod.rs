//! Domain-specific error types and error handling.

mod types;

// Re-export all error types
pub use types::AuthError;

use thiserror::Error;

/// Core domain errors (general purpose)
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("validation error: {message}")]
    Validation { message: String },

    #[error("unauthorized access")]
    Unauthorized,

    #[error("internal error: {message}")]
    Internal { message: String },

    // Bridge to authentication-specific errors
    #[error(transparent)]
    Auth(#[from] AuthError),
}

pub type DomainResult<T> = Result<T, DomainError>;

impl DomainError {
    /// Wrap a collaborator failure message as an internal error
    ///
    /// Collaborator traits report failures as plain strings; services use
    /// this to normalize them without losing the cause.
    pub fn internal(context: &str, cause: impl std::fmt::Display) -> Self {
        DomainError::Internal {
            message: format!("{}: {}", context, cause),
        }
    }
}
