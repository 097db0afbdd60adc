//! Mock implementation of AccountRepository for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::account::Account;
use crate::errors::{AuthError, DomainError};

use super::trait_::AccountRepository;

/// Mock account repository for testing
///
/// Enforces the same uniqueness rules as the database-backed
/// implementation and can simulate write failures.
pub struct MockAccountRepository {
    accounts: Arc<RwLock<HashMap<Uuid, Account>>>,
    /// Whether write operations should fail (for testing)
    fail_writes: Arc<AtomicBool>,
}

impl MockAccountRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            accounts: Arc::new(RwLock::new(HashMap::new())),
            fail_writes: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Enable or disable write failure simulation
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Insert an account directly, bypassing uniqueness checks
    pub async fn insert(&self, account: Account) {
        let mut accounts = self.accounts.write().await;
        accounts.insert(account.id, account);
    }

    /// Fetch an account by id for assertions
    pub async fn get(&self, id: Uuid) -> Option<Account> {
        let accounts = self.accounts.read().await;
        accounts.get(&id).cloned()
    }

    /// Number of stored accounts
    pub async fn count(&self) -> usize {
        let accounts = self.accounts.read().await;
        accounts.len()
    }

    fn check_writes(&self) -> Result<(), DomainError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(DomainError::Internal {
                message: "simulated repository failure".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for MockAccountRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AccountRepository for MockAccountRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, DomainError> {
        let accounts = self.accounts.read().await;
        Ok(accounts.values().find(|a| a.username == username).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, DomainError> {
        let accounts = self.accounts.read().await;
        Ok(accounts.values().find(|a| a.email == email).cloned())
    }

    async fn exists_by_username(&self, username: &str) -> Result<bool, DomainError> {
        let accounts = self.accounts.read().await;
        Ok(accounts.values().any(|a| a.username == username))
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError> {
        let accounts = self.accounts.read().await;
        Ok(accounts.values().any(|a| a.email == email))
    }

    async fn create(&self, account: Account) -> Result<Account, DomainError> {
        self.check_writes()?;
        let mut accounts = self.accounts.write().await;

        if accounts.values().any(|a| a.username == account.username) {
            return Err(AuthError::UserAlreadyExists.into());
        }
        if accounts.values().any(|a| a.email == account.email) {
            return Err(AuthError::EmailAlreadyRegistered.into());
        }

        accounts.insert(account.id, account.clone());
        Ok(account)
    }

    async fn update_password_hash(&self, id: Uuid, new_hash: &str) -> Result<(), DomainError> {
        self.check_writes()?;
        let mut accounts = self.accounts.write().await;

        match accounts.get_mut(&id) {
            Some(account) => {
                account.set_password_hash(new_hash.to_string());
                Ok(())
            }
            None => Err(AuthError::UserNotFound.into()),
        }
    }
}
