//! Account repository trait defining the interface for account persistence.
//!
//! This module defines the repository pattern interface for Account
//! entities. The trait is async-first and uses Result types for proper
//! error handling; the unique constraints on username and email are
//! enforced by the backing store and surfaced as typed errors.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::account::Account;
use crate::errors::DomainError;

/// Repository trait for Account entity persistence operations
///
/// Implementations handle the actual database operations while maintaining
/// the abstraction boundary between domain and infrastructure layers.
///
/// # Example Implementation
/// ```no_run
/// use async_trait::async_trait;
/// use uuid::Uuid;
/// use sg_core::repositories::AccountRepository;
/// use sg_core::domain::entities::account::Account;
/// use sg_core::errors::DomainError;
///
/// struct MySqlAccountRepository {
///     // database connection pool
/// }
///
/// #[async_trait]
/// impl AccountRepository for MySqlAccountRepository {
///     async fn find_by_username(&self, username: &str) -> Result<Option<Account>, DomainError> {
///         // Implementation here
///         Ok(None)
///     }
///
///     async fn find_by_email(&self, email: &str) -> Result<Option<Account>, DomainError> {
///         Ok(None)
///     }
///
///     async fn exists_by_username(&self, username: &str) -> Result<bool, DomainError> {
///         Ok(false)
///     }
///
///     async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError> {
///         Ok(false)
///     }
///
///     async fn create(&self, account: Account) -> Result<Account, DomainError> {
///         Ok(account)
///     }
///
///     async fn update_password_hash(
///         &self,
///         id: Uuid,
///         new_hash: &str,
///     ) -> Result<(), DomainError> {
///         Ok(())
///     }
/// }
/// ```
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Find an account by username
    ///
    /// # Returns
    /// * `Ok(Some(Account))` - Account found
    /// * `Ok(None)` - No account with the given username
    /// * `Err(DomainError)` - Database or other error occurred
    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, DomainError>;

    /// Find an account by email address
    ///
    /// # Returns
    /// * `Ok(Some(Account))` - Account found
    /// * `Ok(None)` - No account with the given email
    /// * `Err(DomainError)` - Database or other error occurred
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, DomainError>;

    /// Check whether an account exists with the given username
    ///
    /// Existence checks have no side effects and are used as fast-path
    /// guards before create; the unique index remains authoritative.
    async fn exists_by_username(&self, username: &str) -> Result<bool, DomainError>;

    /// Check whether an account exists with the given email address
    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError>;

    /// Persist a new account
    ///
    /// # Returns
    /// * `Ok(Account)` - The created account
    /// * `Err(DomainError::Auth(AuthError::UserAlreadyExists))` - Username
    ///   collided with an existing row
    /// * `Err(DomainError::Auth(AuthError::EmailAlreadyRegistered))` - Email
    ///   collided with an existing row
    /// * `Err(DomainError)` - Other database error
    async fn create(&self, account: Account) -> Result<Account, DomainError>;

    /// Replace the password hash of an existing account
    ///
    /// Also touches the modification timestamp. The write must be visible
    /// to reads issued immediately afterwards.
    ///
    /// # Returns
    /// * `Ok(())` - Hash updated
    /// * `Err(DomainError::Auth(AuthError::UserNotFound))` - No row for `id`
    /// * `Err(DomainError)` - Database error
    async fn update_password_hash(&self, id: Uuid, new_hash: &str) -> Result<(), DomainError>;
}
