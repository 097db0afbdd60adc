//! Session token management
//!
//! A session is an opaque token bound to an account id with a TTL. The
//! token carries no claims of its own; the cache binding is the entire
//! session state, so expiry and revocation are both plain deletions.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::errors::{DomainError, DomainResult};

/// Default lifetime of a session in seconds
pub const DEFAULT_SESSION_TTL_SECONDS: u64 = 1800;

/// Trait for the session cache backend
#[async_trait]
pub trait SessionCacheTrait: Send + Sync {
    /// Bind a token to an account id with expiration
    async fn store_session(
        &self,
        token: &str,
        account_id: &str,
        ttl_seconds: u64,
    ) -> Result<(), String>;

    /// Fetch the account id bound to a token, if the session is live
    async fn get_session(&self, token: &str) -> Result<Option<String>, String>;

    /// Delete the binding for a token
    ///
    /// Returns whether a binding was present.
    async fn delete_session(&self, token: &str) -> Result<bool, String>;

    /// Enumerate all live session tokens
    async fn scan_tokens(&self) -> Result<Vec<String>, String>;
}

/// Service for creating, resolving, and revoking sessions
pub struct SessionService<S: SessionCacheTrait> {
    /// Cache backend holding live sessions
    cache: Arc<S>,
    /// Lifetime applied to newly created sessions
    session_ttl_seconds: u64,
}

impl<S: SessionCacheTrait> SessionService<S> {
    /// Create a new session service
    ///
    /// # Arguments
    ///
    /// * `cache` - Cache backend implementation
    /// * `session_ttl_seconds` - Lifetime applied to created sessions
    pub fn new(cache: Arc<S>, session_ttl_seconds: u64) -> Self {
        Self {
            cache,
            session_ttl_seconds,
        }
    }

    /// Create a session for an account
    ///
    /// The token is a freshly generated UUID string; it is bound to the
    /// account id with the configured TTL and returned to the caller.
    pub async fn create(&self, account_id: Uuid) -> DomainResult<String> {
        let token = Uuid::new_v4().to_string();

        self.cache
            .store_session(&token, &account_id.to_string(), self.session_ttl_seconds)
            .await
            .map_err(|e| DomainError::internal("failed to store session", e))?;

        Ok(token)
    }

    /// Resolve a token to the account id it is bound to
    ///
    /// An absent binding means the token was never issued, expired, or was
    /// revoked; the three are indistinguishable.
    pub async fn resolve(&self, token: &str) -> DomainResult<Option<Uuid>> {
        let bound = self
            .cache
            .get_session(token)
            .await
            .map_err(|e| DomainError::internal("failed to read session", e))?;

        match bound {
            Some(account_id) => {
                let id = account_id.parse::<Uuid>().map_err(|e| {
                    DomainError::internal("corrupt session binding", e)
                })?;
                Ok(Some(id))
            }
            None => Ok(None),
        }
    }

    /// Revoke a session
    ///
    /// Deleting an absent binding is not an error.
    pub async fn revoke(&self, token: &str) -> DomainResult<()> {
        self.cache
            .delete_session(token)
            .await
            .map_err(|e| DomainError::internal("failed to delete session", e))?;
        Ok(())
    }

    /// Revoke every session bound to an account
    ///
    /// Enumerates live tokens and deletes each binding whose account id
    /// matches. Linear in the number of live sessions.
    ///
    /// # Returns
    ///
    /// The number of sessions revoked.
    pub async fn revoke_all_for_account(&self, account_id: Uuid) -> DomainResult<u64> {
        let tokens = self
            .cache
            .scan_tokens()
            .await
            .map_err(|e| DomainError::internal("failed to enumerate sessions", e))?;

        let wanted = account_id.to_string();
        let mut revoked = 0u64;

        for token in tokens {
            let bound = self
                .cache
                .get_session(&token)
                .await
                .map_err(|e| DomainError::internal("failed to read session", e))?;

            if bound.as_deref() == Some(wanted.as_str())
                && self
                    .cache
                    .delete_session(&token)
                    .await
                    .map_err(|e| DomainError::internal("failed to delete session", e))?
            {
                revoked += 1;
            }
        }

        Ok(revoked)
    }
}
