//! Verification code issuance and consumption
//!
//! Codes prove ownership of an email address during registration and
//! password reset. A code is a short-lived one-time value: issuing stores
//! it under the address with a TTL, consuming compares and deletes it so
//! it can never be replayed.

use async_trait::async_trait;
use rand::rngs::OsRng;
use rand::RngCore;
use std::sync::Arc;

use crate::errors::{DomainError, DomainResult};

/// Number of digits in a verification code
pub const CODE_LENGTH: usize = 6;

/// Default lifetime of an issued code in seconds
pub const DEFAULT_CODE_TTL_SECONDS: u64 = 300;

/// Trait for the verification code cache backend
#[async_trait]
pub trait VerificationCodeCacheTrait: Send + Sync {
    /// Store a code for an email address with expiration, replacing any live code
    async fn store_code(&self, email: &str, code: &str, ttl_seconds: u64) -> Result<(), String>;

    /// Fetch the live code for an email address, if any
    async fn get_code(&self, email: &str) -> Result<Option<String>, String>;

    /// Delete the code for an email address
    ///
    /// Returns whether a code was present.
    async fn delete_code(&self, email: &str) -> Result<bool, String>;
}

/// Service for issuing and consuming email verification codes
pub struct VerificationCodeService<C: VerificationCodeCacheTrait> {
    /// Cache backend holding live codes
    cache: Arc<C>,
    /// Lifetime applied to newly issued codes
    code_ttl_seconds: u64,
}

impl<C: VerificationCodeCacheTrait> VerificationCodeService<C> {
    /// Create a new verification code service
    ///
    /// # Arguments
    ///
    /// * `cache` - Cache backend implementation
    /// * `code_ttl_seconds` - Lifetime applied to issued codes
    pub fn new(cache: Arc<C>, code_ttl_seconds: u64) -> Self {
        Self {
            cache,
            code_ttl_seconds,
        }
    }

    /// Issue a fresh verification code for an email address
    ///
    /// Generates a 6-digit zero-padded code, stores it under the address
    /// with the configured TTL (overwriting any live code), and returns it
    /// so the caller can deliver it.
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - The issued code
    /// * `Err(DomainError)` - If storing the code fails
    pub async fn issue(&self, email: &str) -> DomainResult<String> {
        let code = Self::generate_code();

        self.cache
            .store_code(email, &code, self.code_ttl_seconds)
            .await
            .map_err(|e| DomainError::internal("failed to store verification code", e))?;

        Ok(code)
    }

    /// Consume a submitted code for an email address
    ///
    /// Compares the submission against the live code. On a match the code
    /// is deleted so it cannot be used twice. A missing or non-matching
    /// code returns `false` and leaves any live code in place; expiry and
    /// never-issued are indistinguishable here.
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - Code matched and was consumed
    /// * `Ok(false)` - No live code, or the submission did not match
    /// * `Err(DomainError)` - If the cache backend fails
    pub async fn consume(&self, email: &str, submitted: &str) -> DomainResult<bool> {
        let stored = self
            .cache
            .get_code(email)
            .await
            .map_err(|e| DomainError::internal("failed to read verification code", e))?;

        match stored {
            Some(code) if code == submitted => {
                self.cache
                    .delete_code(email)
                    .await
                    .map_err(|e| DomainError::internal("failed to delete verification code", e))?;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    /// Drop any live code for an email address
    pub async fn clear(&self, email: &str) -> DomainResult<()> {
        self.cache
            .delete_code(email)
            .await
            .map_err(|e| DomainError::internal("failed to delete verification code", e))?;
        Ok(())
    }

    /// Generate a new 6-digit verification code from the OS CSPRNG
    pub fn generate_code() -> String {
        let mut bytes = [0u8; 4];
        OsRng.fill_bytes(&mut bytes);
        let value = u32::from_le_bytes(bytes) % 1_000_000;
        format!("{:06}", value)
    }
}
