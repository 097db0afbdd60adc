//! Business services containing domain logic and use cases.

pub mod account;
pub mod password;
pub mod session;
pub mod verification;

// Re-export commonly used types
pub use account::{AccountService, AccountServiceConfig, LoginOutcome, MailServiceTrait};
pub use password::{BcryptPasswordHasher, PasswordHasherTrait};
pub use session::{SessionCacheTrait, SessionService, DEFAULT_SESSION_TTL_SECONDS};
pub use verification::{
    VerificationCodeCacheTrait, VerificationCodeService, CODE_LENGTH, DEFAULT_CODE_TTL_SECONDS,
};
