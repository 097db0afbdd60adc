//! Verification code cache implementation
//!
//! This module provides Redis-backed storage for email verification codes
//! using the key pattern `verification:code:{email}`. Code generation,
//! comparison, and lifetime policy live in the core layer; this store only
//! persists what it is handed for the requested TTL.

use async_trait::async_trait;
use tracing::{debug, info};

use sg_core::services::VerificationCodeCacheTrait;

use crate::cache::RedisClient;
use crate::InfrastructureError;

/// Redis-backed store for email verification codes
///
/// Implements the core cache trait so the verification service can run
/// against Redis in production and an in-memory map in tests.
#[derive(Clone)]
pub struct VerificationCodeCache {
    /// Redis client for cache operations
    redis_client: RedisClient,
}

impl VerificationCodeCache {
    /// Create a new verification code cache
    ///
    /// # Arguments
    /// * `redis_client` - Redis client for cache operations
    pub fn new(redis_client: RedisClient) -> Self {
        Self { redis_client }
    }

    /// Store a code for an email address with the given expiry
    pub async fn store(
        &self,
        email: &str,
        code: &str,
        ttl_seconds: u64,
    ) -> Result<(), InfrastructureError> {
        let code_key = Self::format_code_key(email);

        debug!(
            "Storing verification code for email: {}",
            Self::mask_email(email)
        );

        self.redis_client
            .set_with_expiry(&code_key, code, ttl_seconds)
            .await?;

        info!(
            "Verification code stored for email: {}",
            Self::mask_email(email)
        );

        Ok(())
    }

    /// Fetch the live code for an email address, if any
    pub async fn fetch(&self, email: &str) -> Result<Option<String>, InfrastructureError> {
        let code_key = Self::format_code_key(email);
        self.redis_client.get(&code_key).await
    }

    /// Remove the code for an email address
    ///
    /// Returns whether a code was present.
    pub async fn remove(&self, email: &str) -> Result<bool, InfrastructureError> {
        let code_key = Self::format_code_key(email);

        debug!(
            "Clearing verification code for email: {}",
            Self::mask_email(email)
        );

        self.redis_client.delete(&code_key).await
    }

    /// Format Redis key for verification code storage
    fn format_code_key(email: &str) -> String {
        format!("verification:code:{}", email)
    }

    /// Mask email address for logging (show only the first character and domain)
    fn mask_email(email: &str) -> String {
        match email.split_once('@') {
            Some((local, domain)) if !local.is_empty() => {
                let first = local.chars().next().map(String::from).unwrap_or_default();
                format!("{}***@{}", first, domain)
            }
            _ => "***".to_string(),
        }
    }
}

#[async_trait]
impl VerificationCodeCacheTrait for VerificationCodeCache {
    async fn store_code(&self, email: &str, code: &str, ttl_seconds: u64) -> Result<(), String> {
        self.store(email, code, ttl_seconds)
            .await
            .map_err(|e| e.to_string())
    }

    async fn get_code(&self, email: &str) -> Result<Option<String>, String> {
        self.fetch(email).await.map_err(|e| e.to_string())
    }

    async fn delete_code(&self, email: &str) -> Result<bool, String> {
        self.remove(email).await.map_err(|e| e.to_string())
    }
}
