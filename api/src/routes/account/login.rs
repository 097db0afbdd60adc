//! Handler for `POST /api/user/login`

use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::dto::account::{AccountResponse, LoginRequest, LoginResponse};
use crate::handlers::error::{handle_domain_error, handle_validation_errors};
use crate::routes::account::AppState;

use sg_core::services::account::MailServiceTrait;
use sg_core::services::password::PasswordHasherTrait;
use sg_core::services::session::SessionCacheTrait;
use sg_core::services::verification::VerificationCodeCacheTrait;
use sg_core::AccountRepository;
use sg_shared::ApiResponse;

/// Authenticate with username and password and open a session
pub async fn login<R, H, C, S, M>(
    state: web::Data<AppState<R, H, C, S, M>>,
    request: web::Json<LoginRequest>,
) -> HttpResponse
where
    R: AccountRepository + 'static,
    H: PasswordHasherTrait + 'static,
    C: VerificationCodeCacheTrait + 'static,
    S: SessionCacheTrait + 'static,
    M: MailServiceTrait + 'static,
{
    if let Err(errors) = request.validate() {
        return handle_validation_errors(&errors);
    }

    match state
        .account_service
        .login(&request.username, &request.password)
        .await
    {
        Ok(outcome) => HttpResponse::Ok().json(ApiResponse::success(LoginResponse {
            account: AccountResponse::from(outcome.account),
            session_token: outcome.session_token,
        })),
        Err(error) => handle_domain_error(error),
    }
}
