//! Account endpoint handlers
//!
//! One module per endpoint. The handlers stay generic over the collaborator
//! traits so the tests can swap the backing stores for in-memory fakes.

pub mod login;
pub mod logout;
pub mod register;
pub mod reset_password;
pub mod send_code;

use std::sync::Arc;

use sg_core::services::account::{AccountService, MailServiceTrait};
use sg_core::services::password::PasswordHasherTrait;
use sg_core::services::session::SessionCacheTrait;
use sg_core::services::verification::VerificationCodeCacheTrait;
use sg_core::AccountRepository;

/// Application state shared across all handlers
pub struct AppState<R, H, C, S, M>
where
    R: AccountRepository,
    H: PasswordHasherTrait,
    C: VerificationCodeCacheTrait,
    S: SessionCacheTrait,
    M: MailServiceTrait,
{
    pub account_service: Arc<AccountService<R, H, C, S, M>>,
}
