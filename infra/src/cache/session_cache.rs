//! Session cache implementation
//!
//! This module provides Redis-backed storage for login sessions using the
//! key pattern `user:session:{token}`, where the value is the owning
//! account id. Tokens are opaque to this layer; TTL renewal and revocation
//! policy live in the core session service.

use async_trait::async_trait;
use tracing::{debug, info};

use sg_core::services::SessionCacheTrait;

use crate::cache::RedisClient;
use crate::InfrastructureError;

/// Key prefix shared by every session entry
const SESSION_KEY_PREFIX: &str = "user:session:";

/// Redis-backed store for login sessions
#[derive(Clone)]
pub struct SessionCache {
    /// Redis client for cache operations
    redis_client: RedisClient,
}

impl SessionCache {
    /// Create a new session cache
    ///
    /// # Arguments
    /// * `redis_client` - Redis client for cache operations
    pub fn new(redis_client: RedisClient) -> Self {
        Self { redis_client }
    }

    /// Bind a token to an account id with the given expiry
    pub async fn store(
        &self,
        token: &str,
        account_id: &str,
        ttl_seconds: u64,
    ) -> Result<(), InfrastructureError> {
        let session_key = Self::format_session_key(token);

        debug!("Storing session {}", Self::abbreviate_token(token));

        self.redis_client
            .set_with_expiry(&session_key, account_id, ttl_seconds)
            .await?;

        info!("Session stored: {}", Self::abbreviate_token(token));

        Ok(())
    }

    /// Fetch the account id bound to a token, if the session is live
    pub async fn fetch(&self, token: &str) -> Result<Option<String>, InfrastructureError> {
        let session_key = Self::format_session_key(token);
        self.redis_client.get(&session_key).await
    }

    /// Remove the binding for a token
    ///
    /// Returns whether a binding was present.
    pub async fn remove(&self, token: &str) -> Result<bool, InfrastructureError> {
        let session_key = Self::format_session_key(token);

        debug!("Removing session {}", Self::abbreviate_token(token));

        self.redis_client.delete(&session_key).await
    }

    /// Enumerate every live session token
    ///
    /// Scans the session keyspace and strips the key prefix, returning the
    /// bare tokens.
    pub async fn tokens(&self) -> Result<Vec<String>, InfrastructureError> {
        let pattern = format!("{}*", SESSION_KEY_PREFIX);
        let keys = self.redis_client.scan_match(&pattern).await?;

        let tokens = keys
            .into_iter()
            .filter_map(|key| {
                key.strip_prefix(SESSION_KEY_PREFIX)
                    .map(|token| token.to_string())
            })
            .collect();

        Ok(tokens)
    }

    /// Format Redis key for session storage
    fn format_session_key(token: &str) -> String {
        format!("{}{}", SESSION_KEY_PREFIX, token)
    }

    /// Shorten a token for logging; the full value never reaches the logs
    fn abbreviate_token(token: &str) -> String {
        let prefix: String = token.chars().take(8).collect();
        format!("{}...", prefix)
    }
}

#[async_trait]
impl SessionCacheTrait for SessionCache {
    async fn store_session(
        &self,
        token: &str,
        account_id: &str,
        ttl_seconds: u64,
    ) -> Result<(), String> {
        self.store(token, account_id, ttl_seconds)
            .await
            .map_err(|e| e.to_string())
    }

    async fn get_session(&self, token: &str) -> Result<Option<String>, String> {
        self.fetch(token).await.map_err(|e| e.to_string())
    }

    async fn delete_session(&self, token: &str) -> Result<bool, String> {
        self.remove(token).await.map_err(|e| e.to_string())
    }

    async fn scan_tokens(&self) -> Result<Vec<String>, String> {
        self.tokens().await.map_err(|e| e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CacheConfig;

    #[test]
    fn test_format_session_key() {
        assert_eq!(
            SessionCache::format_session_key("3f2b8c44-1111-2222-3333-444455556666"),
            "user:session:3f2b8c44-1111-2222-3333-444455556666"
        );
    }

    #[test]
    fn test_abbreviate_token() {
        assert_eq!(
            SessionCache::abbreviate_token("3f2b8c44-1111-2222-3333-444455556666"),
            "3f2b8c44..."
        );
        assert_eq!(SessionCache::abbreviate_token("abc"), "abc...");
    }

    #[tokio::test]
    #[ignore] // Requires actual Redis server
    async fn test_session_lifecycle() {
        let config = CacheConfig::new(
            std::env::var("REDIS_URL")
                .unwrap_or_else(|_| "redis://localhost:6379".to_string()),
        );

        let redis_client = RedisClient::new(config).await.unwrap();
        let cache = SessionCache::new(redis_client);

        let token = "integration-test-token";
        let account_id = "7c2f8a90-0000-0000-0000-000000000000";

        // Clean up from previous runs
        let _ = cache.remove(token).await;

        cache.store(token, account_id, 60).await.unwrap();

        let fetched = cache.fetch(token).await.unwrap();
        assert_eq!(fetched, Some(account_id.to_string()));

        let tokens = cache.tokens().await.unwrap();
        assert!(tokens.contains(&token.to_string()));

        let removed = cache.remove(token).await.unwrap();
        assert!(removed);

        let after_remove = cache.fetch(token).await.unwrap();
        assert_eq!(after_remove, None);
    }
}
