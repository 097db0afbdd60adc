//! Account lifecycle service
//!
//! This service coordinates the account flows end to end:
//! - Registration gated by an emailed verification code
//! - Login with username and password, opening a session
//! - Verification code issuance and delivery
//! - Logout and password reset
//!
//! Collaborators are injected behind traits so the flows run unchanged
//! against the Redis, MySQL, and SMTP implementations or in-memory fakes.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::warn;

use crate::domain::entities::account::{Account, Sex};
use crate::errors::{AuthError, DomainError, DomainResult};
use crate::repositories::AccountRepository;
use crate::services::password::PasswordHasherTrait;
use crate::services::session::{SessionCacheTrait, SessionService};
use crate::services::verification::{VerificationCodeCacheTrait, VerificationCodeService};

/// Configuration for the account service
#[derive(Debug, Clone)]
pub struct AccountServiceConfig {
    /// Lifetime of an issued verification code in minutes
    pub code_ttl_minutes: u64,
    /// Lifetime of a session in minutes
    pub session_ttl_minutes: u64,
    /// Whether a mail delivery failure fails the whole send operation
    pub fail_on_mail_error: bool,
}

impl Default for AccountServiceConfig {
    fn default() -> Self {
        Self {
            code_ttl_minutes: 5,
            session_ttl_minutes: 30,
            fail_on_mail_error: true,
        }
    }
}

/// Trait for outbound mail delivery
#[async_trait]
pub trait MailServiceTrait: Send + Sync {
    /// Send a mail message
    ///
    /// # Returns
    /// * `Ok(String)` - Provider message id
    /// * `Err(String)` - Delivery failed
    async fn send_mail(&self, to: &str, subject: &str, body: &str) -> Result<String, String>;

    /// Send the standard verification code message
    async fn send_verification_code(&self, to: &str, code: &str) -> Result<String, String> {
        let body = format!(
            "Your verification code is {}. It expires in 5 minutes.",
            code
        );
        self.send_mail(to, "Your verification code", &body).await
    }
}

/// Result of a successful login
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    /// The authenticated account
    pub account: Account,
    /// Opaque bearer token for the opened session
    pub session_token: String,
}

/// Account service for managing the complete account lifecycle
pub struct AccountService<R, H, C, S, M>
where
    R: AccountRepository,
    H: PasswordHasherTrait,
    C: VerificationCodeCacheTrait,
    S: SessionCacheTrait,
    M: MailServiceTrait,
{
    /// Account repository for database operations
    account_repository: Arc<R>,
    /// Password hasher for credential handling
    password_hasher: Arc<H>,
    /// Verification code service for email code handling
    verification_service: Arc<VerificationCodeService<C>>,
    /// Session service for token handling
    session_service: Arc<SessionService<S>>,
    /// Mail service for code delivery
    mail_service: Arc<M>,
    /// Service configuration
    config: AccountServiceConfig,
}

impl<R, H, C, S, M> AccountService<R, H, C, S, M>
where
    R: AccountRepository,
    H: PasswordHasherTrait,
    C: VerificationCodeCacheTrait,
    S: SessionCacheTrait,
    M: MailServiceTrait,
{
    /// Create a new account service
    ///
    /// The verification code and session services are built here from the
    /// injected cache backends, with lifetimes taken from the configuration.
    ///
    /// # Arguments
    ///
    /// * `account_repository` - Repository for account persistence
    /// * `password_hasher` - Hasher for credential handling
    /// * `code_cache` - Cache backend for verification codes
    /// * `session_cache` - Cache backend for sessions
    /// * `mail_service` - Mail delivery implementation
    /// * `config` - Service configuration
    pub fn new(
        account_repository: Arc<R>,
        password_hasher: Arc<H>,
        code_cache: Arc<C>,
        session_cache: Arc<S>,
        mail_service: Arc<M>,
        config: AccountServiceConfig,
    ) -> Self {
        let verification_service = Arc::new(VerificationCodeService::new(
            code_cache,
            config.code_ttl_minutes * 60,
        ));
        let session_service = Arc::new(SessionService::new(
            session_cache,
            config.session_ttl_minutes * 60,
        ));

        Self {
            account_repository,
            password_hasher,
            verification_service,
            session_service,
            mail_service,
            config,
        }
    }

    /// Register a new account
    ///
    /// This method:
    /// 1. Rejects a taken username
    /// 2. Rejects an already registered email
    /// 3. Consumes the emailed verification code
    /// 4. Hashes the password and persists the account
    ///
    /// The pre-checks are advisory; the unique indexes behind `create`
    /// remain the authoritative guard, and a losing race surfaces the same
    /// typed errors.
    ///
    /// # Arguments
    ///
    /// * `username` - Login name, unique across accounts
    /// * `password` - Plaintext password, hashed before storage
    /// * `email` - Address that received the verification code
    /// * `sex` - Optional declared sex
    /// * `code` - The verification code sent to `email`
    ///
    /// # Returns
    ///
    /// * `Ok(Account)` - The created account
    /// * `Err(DomainError)` - Typed rule violation or internal failure
    pub async fn register(
        &self,
        username: &str,
        password: &str,
        email: &str,
        sex: Option<Sex>,
        code: &str,
    ) -> DomainResult<Account> {
        // Step 1: Reject a taken username
        if self.account_repository.exists_by_username(username).await? {
            return Err(AuthError::UserAlreadyExists.into());
        }

        // Step 2: Reject an already registered email
        if self.account_repository.exists_by_email(email).await? {
            return Err(AuthError::EmailAlreadyRegistered.into());
        }

        // Step 3: Consume the verification code, making it single-use
        if !self.verification_service.consume(email, code).await? {
            return Err(AuthError::InvalidVerificationCode.into());
        }

        // Step 4: Hash the password and persist the account
        let password_hash = self
            .password_hasher
            .hash_password(password)
            .await
            .map_err(|e| DomainError::internal("failed to hash password", e))?;

        let account = Account::new(username.to_string(), password_hash, email.to_string(), sex);

        self.account_repository.create(account).await
    }

    /// Authenticate an account and open a session
    ///
    /// This method:
    /// 1. Looks up the account by username
    /// 2. Checks the password against the stored hash
    /// 3. Creates a session token bound to the account
    ///
    /// # Returns
    ///
    /// * `Ok(LoginOutcome)` - The account and its new session token
    /// * `Err(DomainError)` - If the user is unknown, the password is
    ///   wrong, or a collaborator fails
    pub async fn login(&self, username: &str, password: &str) -> DomainResult<LoginOutcome> {
        // Step 1: Look up the account
        let account = self
            .account_repository
            .find_by_username(username)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        // Step 2: Check the password against the stored hash
        let matches = self
            .password_hasher
            .verify_password(&account.password_hash, password)
            .await
            .map_err(|e| DomainError::internal("failed to verify password", e))?;

        if !matches {
            return Err(AuthError::WrongPassword.into());
        }

        // Step 3: Open a session
        let session_token = self.session_service.create(account.id).await?;

        Ok(LoginOutcome {
            account,
            session_token,
        })
    }

    /// Issue a verification code and mail it to the address
    ///
    /// The code is stored before the mail is attempted, so when delivery
    /// failures are tolerated (`fail_on_mail_error` off) the code remains
    /// usable through other channels. No check is made that the address
    /// belongs to an account; registration and reset enforce their own
    /// rules when the code is consumed.
    pub async fn send_verification_code(&self, email: &str) -> DomainResult<()> {
        // Step 1: Issue a fresh code for the address
        let code = self.verification_service.issue(email).await?;

        // Step 2: Deliver it by mail
        if let Err(e) = self.mail_service.send_verification_code(email, &code).await {
            if self.config.fail_on_mail_error {
                return Err(DomainError::internal("failed to send verification mail", e));
            }
            warn!(
                email = %Self::mask_email(email),
                error = %e,
                "verification mail delivery failed, stored code stays usable"
            );
        }

        Ok(())
    }

    /// Close a session
    ///
    /// # Returns
    ///
    /// * `Ok(())` - The session was revoked
    /// * `Err(DomainError::Unauthorized)` - The token resolves to nothing:
    ///   never issued, expired, or already revoked
    pub async fn logout(&self, token: &str) -> DomainResult<()> {
        // Step 1: The token must resolve to a live session
        if self.session_service.resolve(token).await?.is_none() {
            return Err(DomainError::Unauthorized);
        }

        // Step 2: Drop the binding
        self.session_service.revoke(token).await
    }

    /// Reset an account password using an emailed verification code
    ///
    /// This method:
    /// 1. Consumes the verification code
    /// 2. Resolves the email to an account
    /// 3. Hashes and stores the new password
    /// 4. Drops the code key again in case a concurrent issuance revived it
    /// 5. Revokes every session of the account, forcing re-login
    ///
    /// Failures past the code and account checks are reported as internal
    /// errors with the cause in the message. Side effects already applied
    /// stay in place.
    pub async fn reset_password(
        &self,
        email: &str,
        code: &str,
        new_password: &str,
    ) -> DomainResult<()> {
        // Step 1: Consume the verification code
        if !self.verification_service.consume(email, code).await? {
            return Err(AuthError::InvalidVerificationCode.into());
        }

        // Step 2: The address must belong to an account
        let account = self
            .account_repository
            .find_by_email(email)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        // Step 3: Hash and store the new password
        let password_hash = self
            .password_hasher
            .hash_password(new_password)
            .await
            .map_err(|e| DomainError::internal("failed to hash password", e))?;

        self.account_repository
            .update_password_hash(account.id, &password_hash)
            .await
            .map_err(|e| DomainError::internal("failed to update password", e))?;

        // Step 4: Drop the code key again
        self.verification_service.clear(email).await?;

        // Step 5: Force re-login everywhere
        self.session_service
            .revoke_all_for_account(account.id)
            .await?;

        Ok(())
    }

    /// Mask an email address for logging (keep first character and domain)
    fn mask_email(email: &str) -> String {
        match email.split_once('@') {
            Some((local, domain)) => {
                let head = local.chars().next().map(String::from).unwrap_or_default();
                format!("{}***@{}", head, domain)
            }
            None => "***".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::MockAccountRepository;
    use crate::services::password::BcryptPasswordHasher;
    use std::collections::HashMap;
    use std::sync::Mutex;

    // Mock code cache for testing
    struct MockCodeCache {
        codes: Arc<Mutex<HashMap<String, String>>>,
    }

    impl MockCodeCache {
        fn new() -> Self {
            Self {
                codes: Arc::new(Mutex::new(HashMap::new())),
            }
        }

        fn insert(&self, email: &str, code: &str) {
            self.codes
                .lock()
                .unwrap()
                .insert(email.to_string(), code.to_string());
        }

        fn stored_code(&self, email: &str) -> Option<String> {
            self.codes.lock().unwrap().get(email).cloned()
        }
    }

    #[async_trait]
    impl VerificationCodeCacheTrait for MockCodeCache {
        async fn store_code(
            &self,
            email: &str,
            code: &str,
            _ttl_seconds: u64,
        ) -> Result<(), String> {
            self.insert(email, code);
            Ok(())
        }

        async fn get_code(&self, email: &str) -> Result<Option<String>, String> {
            Ok(self.codes.lock().unwrap().get(email).cloned())
        }

        async fn delete_code(&self, email: &str) -> Result<bool, String> {
            Ok(self.codes.lock().unwrap().remove(email).is_some())
        }
    }

    // Mock session cache for testing
    struct MockSessionCache {
        sessions: Arc<Mutex<HashMap<String, String>>>,
    }

    impl MockSessionCache {
        fn new() -> Self {
            Self {
                sessions: Arc::new(Mutex::new(HashMap::new())),
            }
        }

        fn len(&self) -> usize {
            self.sessions.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl SessionCacheTrait for MockSessionCache {
        async fn store_session(
            &self,
            token: &str,
            account_id: &str,
            _ttl_seconds: u64,
        ) -> Result<(), String> {
            self.sessions
                .lock()
                .unwrap()
                .insert(token.to_string(), account_id.to_string());
            Ok(())
        }

        async fn get_session(&self, token: &str) -> Result<Option<String>, String> {
            Ok(self.sessions.lock().unwrap().get(token).cloned())
        }

        async fn delete_session(&self, token: &str) -> Result<bool, String> {
            Ok(self.sessions.lock().unwrap().remove(token).is_some())
        }

        async fn scan_tokens(&self) -> Result<Vec<String>, String> {
            Ok(self.sessions.lock().unwrap().keys().cloned().collect())
        }
    }

    // Mock mail service for testing
    struct MockMailService {
        sent: Arc<Mutex<Vec<(String, String, String)>>>,
        should_fail: bool,
    }

    impl MockMailService {
        fn new(should_fail: bool) -> Self {
            Self {
                sent: Arc::new(Mutex::new(Vec::new())),
                should_fail,
            }
        }

        fn sent_count(&self) -> usize {
            self.sent.lock().unwrap().len()
        }

        fn last_mail(&self) -> Option<(String, String, String)> {
            self.sent.lock().unwrap().last().cloned()
        }
    }

    #[async_trait]
    impl MailServiceTrait for MockMailService {
        async fn send_mail(&self, to: &str, subject: &str, body: &str) -> Result<String, String> {
            if self.should_fail {
                return Err("smtp error".to_string());
            }
            let mut sent = self.sent.lock().unwrap();
            sent.push((to.to_string(), subject.to_string(), body.to_string()));
            Ok(format!("mock-mail-{}", sent.len()))
        }
    }

    type TestService = AccountService<
        MockAccountRepository,
        BcryptPasswordHasher,
        MockCodeCache,
        MockSessionCache,
        MockMailService,
    >;

    #[tokio::test]
    async fn test_register_success() {
        let repository = Arc::new(MockAccountRepository::new());
        let hasher = Arc::new(BcryptPasswordHasher::with_cost(4));
        let code_cache = Arc::new(MockCodeCache::new());
        let session_cache = Arc::new(MockSessionCache::new());
        let mailer = Arc::new(MockMailService::new(false));
        let service = AccountService::new(
            repository.clone(),
            hasher.clone(),
            code_cache.clone(),
            session_cache,
            mailer,
            AccountServiceConfig::default(),
        );

        code_cache.insert("a@b.com", "042517");
        let account = service
            .register("alice", "Abcdef12", "a@b.com", Some(Sex::Female), "042517")
            .await
            .unwrap();

        assert_eq!(account.username, "alice");
        assert_eq!(account.email, "a@b.com");
        assert_eq!(account.sex, Some(Sex::Female));
        assert_eq!(repository.count().await, 1);

        // Stored hash verifies against the original plaintext
        let stored = repository.get(account.id).await.unwrap();
        assert_ne!(stored.password_hash, "Abcdef12");
        assert!(hasher
            .verify_password(&stored.password_hash, "Abcdef12")
            .await
            .unwrap());

        // The code was consumed
        assert_eq!(code_cache.stored_code("a@b.com"), None);
    }

    #[tokio::test]
    async fn test_register_duplicate_username() {
        let repository = Arc::new(MockAccountRepository::new());
        let hasher = Arc::new(BcryptPasswordHasher::with_cost(4));
        let code_cache = Arc::new(MockCodeCache::new());
        let session_cache = Arc::new(MockSessionCache::new());
        let mailer = Arc::new(MockMailService::new(false));
        let service = AccountService::new(
            repository,
            hasher,
            code_cache.clone(),
            session_cache,
            mailer,
            AccountServiceConfig::default(),
        );

        code_cache.insert("a@b.com", "111111");
        service
            .register("alice", "Abcdef12", "a@b.com", None, "111111")
            .await
            .unwrap();

        code_cache.insert("c@d.com", "222222");
        let result = service
            .register("alice", "Abcdef12", "c@d.com", None, "222222")
            .await;
        match result.unwrap_err() {
            DomainError::Auth(AuthError::UserAlreadyExists) => {}
            other => panic!("Expected UserAlreadyExists, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_register_duplicate_email() {
        let repository = Arc::new(MockAccountRepository::new());
        let hasher = Arc::new(BcryptPasswordHasher::with_cost(4));
        let code_cache = Arc::new(MockCodeCache::new());
        let session_cache = Arc::new(MockSessionCache::new());
        let mailer = Arc::new(MockMailService::new(false));
        let service = AccountService::new(
            repository,
            hasher,
            code_cache.clone(),
            session_cache,
            mailer,
            AccountServiceConfig::default(),
        );

        code_cache.insert("a@b.com", "111111");
        service
            .register("alice", "Abcdef12", "a@b.com", None, "111111")
            .await
            .unwrap();

        code_cache.insert("a@b.com", "222222");
        let result = service
            .register("bob", "Abcdef12", "a@b.com", None, "222222")
            .await;
        match result.unwrap_err() {
            DomainError::Auth(AuthError::EmailAlreadyRegistered) => {}
            other => panic!("Expected EmailAlreadyRegistered, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_register_wrong_code() {
        let repository = Arc::new(MockAccountRepository::new());
        let hasher = Arc::new(BcryptPasswordHasher::with_cost(4));
        let code_cache = Arc::new(MockCodeCache::new());
        let session_cache = Arc::new(MockSessionCache::new());
        let mailer = Arc::new(MockMailService::new(false));
        let service = AccountService::new(
            repository.clone(),
            hasher,
            code_cache.clone(),
            session_cache,
            mailer,
            AccountServiceConfig::default(),
        );

        code_cache.insert("a@b.com", "111111");
        let result = service
            .register("alice", "Abcdef12", "a@b.com", None, "999999")
            .await;
        match result.unwrap_err() {
            DomainError::Auth(AuthError::InvalidVerificationCode) => {}
            other => panic!("Expected InvalidVerificationCode, got {:?}", other),
        }

        // Nothing was created and the code survives the failed attempt
        assert_eq!(repository.count().await, 0);
        assert_eq!(code_cache.stored_code("a@b.com"), Some("111111".to_string()));
    }

    #[tokio::test]
    async fn test_register_without_issued_code() {
        let repository = Arc::new(MockAccountRepository::new());
        let hasher = Arc::new(BcryptPasswordHasher::with_cost(4));
        let code_cache = Arc::new(MockCodeCache::new());
        let session_cache = Arc::new(MockSessionCache::new());
        let mailer = Arc::new(MockMailService::new(false));
        let service = AccountService::new(
            repository,
            hasher,
            code_cache,
            session_cache,
            mailer,
            AccountServiceConfig::default(),
        );

        let result = service
            .register("alice", "Abcdef12", "a@b.com", None, "123456")
            .await;
        match result.unwrap_err() {
            DomainError::Auth(AuthError::InvalidVerificationCode) => {}
            other => panic!("Expected InvalidVerificationCode, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_login_success() {
        let repository = Arc::new(MockAccountRepository::new());
        let hasher = Arc::new(BcryptPasswordHasher::with_cost(4));
        let code_cache = Arc::new(MockCodeCache::new());
        let session_cache = Arc::new(MockSessionCache::new());
        let mailer = Arc::new(MockMailService::new(false));
        let service = AccountService::new(
            repository,
            hasher,
            code_cache.clone(),
            session_cache,
            mailer,
            AccountServiceConfig::default(),
        );

        code_cache.insert("a@b.com", "111111");
        let registered = service
            .register("alice", "Abcdef12", "a@b.com", None, "111111")
            .await
            .unwrap();

        let outcome = service.login("alice", "Abcdef12").await.unwrap();
        assert_eq!(outcome.account.id, registered.id);
        assert!(!outcome.session_token.is_empty());

        // The token resolves to a live session
        service.logout(&outcome.session_token).await.unwrap();
    }

    #[tokio::test]
    async fn test_login_unknown_user() {
        let repository = Arc::new(MockAccountRepository::new());
        let hasher = Arc::new(BcryptPasswordHasher::with_cost(4));
        let code_cache = Arc::new(MockCodeCache::new());
        let session_cache = Arc::new(MockSessionCache::new());
        let mailer = Arc::new(MockMailService::new(false));
        let service = AccountService::new(
            repository,
            hasher,
            code_cache,
            session_cache,
            mailer,
            AccountServiceConfig::default(),
        );

        let result = service.login("nobody", "Abcdef12").await;
        match result.unwrap_err() {
            DomainError::Auth(AuthError::UserNotFound) => {}
            other => panic!("Expected UserNotFound, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let repository = Arc::new(MockAccountRepository::new());
        let hasher = Arc::new(BcryptPasswordHasher::with_cost(4));
        let code_cache = Arc::new(MockCodeCache::new());
        let session_cache = Arc::new(MockSessionCache::new());
        let mailer = Arc::new(MockMailService::new(false));
        let service = AccountService::new(
            repository,
            hasher,
            code_cache.clone(),
            session_cache.clone(),
            mailer,
            AccountServiceConfig::default(),
        );

        code_cache.insert("a@b.com", "111111");
        service
            .register("alice", "Abcdef12", "a@b.com", None, "111111")
            .await
            .unwrap();

        let result = service.login("alice", "Wrongpw12").await;
        match result.unwrap_err() {
            DomainError::Auth(AuthError::WrongPassword) => {}
            other => panic!("Expected WrongPassword, got {:?}", other),
        }

        // No session was opened
        assert_eq!(session_cache.len(), 0);
    }

    #[tokio::test]
    async fn test_send_verification_code_success() {
        let repository = Arc::new(MockAccountRepository::new());
        let hasher = Arc::new(BcryptPasswordHasher::with_cost(4));
        let code_cache = Arc::new(MockCodeCache::new());
        let session_cache = Arc::new(MockSessionCache::new());
        let mailer = Arc::new(MockMailService::new(false));
        let service = AccountService::new(
            repository,
            hasher,
            code_cache.clone(),
            session_cache,
            mailer.clone(),
            AccountServiceConfig::default(),
        );

        service.send_verification_code("a@b.com").await.unwrap();

        let code = code_cache.stored_code("a@b.com").unwrap();
        assert_eq!(code.len(), 6);
        assert!(code.chars().all(|c| c.is_ascii_digit()));

        assert_eq!(mailer.sent_count(), 1);
        let (to, subject, body) = mailer.last_mail().unwrap();
        assert_eq!(to, "a@b.com");
        assert_eq!(subject, "Your verification code");
        assert!(body.contains(&code));
    }

    #[tokio::test]
    async fn test_send_verification_code_mail_failure_propagates() {
        let repository = Arc::new(MockAccountRepository::new());
        let hasher = Arc::new(BcryptPasswordHasher::with_cost(4));
        let code_cache = Arc::new(MockCodeCache::new());
        let session_cache = Arc::new(MockSessionCache::new());
        let mailer = Arc::new(MockMailService::new(true));
        let service = AccountService::new(
            repository,
            hasher,
            code_cache.clone(),
            session_cache,
            mailer,
            AccountServiceConfig::default(),
        );

        let result = service.send_verification_code("a@b.com").await;
        match result.unwrap_err() {
            DomainError::Internal { message } => {
                assert!(message.contains("failed to send verification mail"));
            }
            other => panic!("Expected internal error, got {:?}", other),
        }

        // The code was stored before the delivery attempt
        assert!(code_cache.stored_code("a@b.com").is_some());
    }

    #[tokio::test]
    async fn test_send_verification_code_mail_failure_tolerated() {
        let repository = Arc::new(MockAccountRepository::new());
        let hasher = Arc::new(BcryptPasswordHasher::with_cost(4));
        let code_cache = Arc::new(MockCodeCache::new());
        let session_cache = Arc::new(MockSessionCache::new());
        let mailer = Arc::new(MockMailService::new(true));
        let config = AccountServiceConfig {
            fail_on_mail_error: false,
            ..Default::default()
        };
        let service = AccountService::new(
            repository,
            hasher,
            code_cache.clone(),
            session_cache,
            mailer.clone(),
            config,
        );

        service.send_verification_code("a@b.com").await.unwrap();

        assert!(code_cache.stored_code("a@b.com").is_some());
        assert_eq!(mailer.sent_count(), 0);
    }

    #[tokio::test]
    async fn test_logout_unknown_token() {
        let repository = Arc::new(MockAccountRepository::new());
        let hasher = Arc::new(BcryptPasswordHasher::with_cost(4));
        let code_cache = Arc::new(MockCodeCache::new());
        let session_cache = Arc::new(MockSessionCache::new());
        let mailer = Arc::new(MockMailService::new(false));
        let service = AccountService::new(
            repository,
            hasher,
            code_cache,
            session_cache,
            mailer,
            AccountServiceConfig::default(),
        );

        let result = service.logout("no-such-token").await;
        match result.unwrap_err() {
            DomainError::Unauthorized => {}
            other => panic!("Expected Unauthorized, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_logout_twice() {
        let repository = Arc::new(MockAccountRepository::new());
        let hasher = Arc::new(BcryptPasswordHasher::with_cost(4));
        let code_cache = Arc::new(MockCodeCache::new());
        let session_cache = Arc::new(MockSessionCache::new());
        let mailer = Arc::new(MockMailService::new(false));
        let service = AccountService::new(
            repository,
            hasher,
            code_cache.clone(),
            session_cache,
            mailer,
            AccountServiceConfig::default(),
        );

        code_cache.insert("a@b.com", "111111");
        service
            .register("alice", "Abcdef12", "a@b.com", None, "111111")
            .await
            .unwrap();
        let outcome = service.login("alice", "Abcdef12").await.unwrap();

        service.logout(&outcome.session_token).await.unwrap();

        let result = service.logout(&outcome.session_token).await;
        match result.unwrap_err() {
            DomainError::Unauthorized => {}
            other => panic!("Expected Unauthorized, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_reset_password_flow() {
        let repository = Arc::new(MockAccountRepository::new());
        let hasher = Arc::new(BcryptPasswordHasher::with_cost(4));
        let code_cache = Arc::new(MockCodeCache::new());
        let session_cache = Arc::new(MockSessionCache::new());
        let mailer = Arc::new(MockMailService::new(false));
        let service = AccountService::new(
            repository,
            hasher,
            code_cache.clone(),
            session_cache.clone(),
            mailer,
            AccountServiceConfig::default(),
        );

        code_cache.insert("a@b.com", "111111");
        service
            .register("alice", "Abcdef12", "a@b.com", None, "111111")
            .await
            .unwrap();

        // Two live sessions before the reset
        let first = service.login("alice", "Abcdef12").await.unwrap();
        let second = service.login("alice", "Abcdef12").await.unwrap();
        assert_eq!(session_cache.len(), 2);

        code_cache.insert("a@b.com", "222222");
        service
            .reset_password("a@b.com", "222222", "Newpass34")
            .await
            .unwrap();

        // Every prior session is gone
        assert_eq!(session_cache.len(), 0);
        assert!(service.logout(&first.session_token).await.is_err());
        assert!(service.logout(&second.session_token).await.is_err());

        // Old password no longer works, the new one does
        let old = service.login("alice", "Abcdef12").await;
        match old.unwrap_err() {
            DomainError::Auth(AuthError::WrongPassword) => {}
            other => panic!("Expected WrongPassword, got {:?}", other),
        }
        service.login("alice", "Newpass34").await.unwrap();
    }

    #[tokio::test]
    async fn test_reset_password_wrong_code() {
        let repository = Arc::new(MockAccountRepository::new());
        let hasher = Arc::new(BcryptPasswordHasher::with_cost(4));
        let code_cache = Arc::new(MockCodeCache::new());
        let session_cache = Arc::new(MockSessionCache::new());
        let mailer = Arc::new(MockMailService::new(false));
        let service = AccountService::new(
            repository,
            hasher,
            code_cache.clone(),
            session_cache,
            mailer,
            AccountServiceConfig::default(),
        );

        code_cache.insert("a@b.com", "111111");
        let result = service.reset_password("a@b.com", "999999", "Newpass34").await;
        match result.unwrap_err() {
            DomainError::Auth(AuthError::InvalidVerificationCode) => {}
            other => panic!("Expected InvalidVerificationCode, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_reset_password_unknown_email() {
        let repository = Arc::new(MockAccountRepository::new());
        let hasher = Arc::new(BcryptPasswordHasher::with_cost(4));
        let code_cache = Arc::new(MockCodeCache::new());
        let session_cache = Arc::new(MockSessionCache::new());
        let mailer = Arc::new(MockMailService::new(false));
        let service = AccountService::new(
            repository,
            hasher,
            code_cache.clone(),
            session_cache,
            mailer,
            AccountServiceConfig::default(),
        );

        code_cache.insert("ghost@b.com", "111111");
        let result = service
            .reset_password("ghost@b.com", "111111", "Newpass34")
            .await;
        match result.unwrap_err() {
            DomainError::Auth(AuthError::UserNotFound) => {}
            other => panic!("Expected UserNotFound, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_reset_password_repository_failure() {
        let repository = Arc::new(MockAccountRepository::new());
        let hasher = Arc::new(BcryptPasswordHasher::with_cost(4));
        let code_cache = Arc::new(MockCodeCache::new());
        let session_cache = Arc::new(MockSessionCache::new());
        let mailer = Arc::new(MockMailService::new(false));
        let service = AccountService::new(
            repository.clone(),
            hasher.clone(),
            code_cache.clone(),
            session_cache,
            mailer,
            AccountServiceConfig::default(),
        );

        let hash = hasher.hash_password("Abcdef12").await.unwrap();
        repository
            .insert(Account::new(
                "alice".to_string(),
                hash,
                "a@b.com".to_string(),
                None,
            ))
            .await;
        repository.set_fail_writes(true);

        code_cache.insert("a@b.com", "111111");
        let result = service.reset_password("a@b.com", "111111", "Newpass34").await;
        match result.unwrap_err() {
            DomainError::Internal { message } => {
                assert!(message.contains("failed to update password"));
            }
            other => panic!("Expected internal error, got {:?}", other),
        }
    }

    #[test]
    fn test_config_defaults() {
        let config = AccountServiceConfig::default();
        assert_eq!(config.code_ttl_minutes, 5);
        assert_eq!(config.session_ttl_minutes, 30);
        assert!(config.fail_on_mail_error);
    }

    #[test]
    fn test_mask_email() {
        assert_eq!(TestService::mask_email("alice@example.com"), "a***@example.com");
        assert_eq!(TestService::mask_email("a@b.com"), "a***@b.com");
        assert_eq!(TestService::mask_email("not-an-email"), "***");
    }
}
