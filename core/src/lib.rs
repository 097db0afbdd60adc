//! Core domain layer for the Signet backend
//!
//! This crate contains the business logic of the account lifecycle with no
//! I/O of its own: the account entity, typed domain errors, the collaborator
//! traits (repository, caches, hasher, mailer), and the services that
//! compose them. Infrastructure implementations live in `sg_infra`.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export the most commonly used items at crate root
pub use domain::entities::account::{Account, Sex};
pub use errors::{AuthError, DomainError, DomainResult};
pub use repositories::AccountRepository;
pub use services::account::{AccountService, AccountServiceConfig, LoginOutcome, MailServiceTrait};
pub use services::password::{BcryptPasswordHasher, PasswordHasherTrait};
pub use services::session::{SessionCacheTrait, SessionService};
pub use services::verification::{VerificationCodeCacheTrait, VerificationCodeService};
