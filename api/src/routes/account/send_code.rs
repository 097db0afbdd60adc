//! Handler for `GET /api/user/verification-code`

use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::dto::account::{MessageResponse, SendCodeQuery};
use crate::handlers::error::{handle_domain_error, handle_validation_errors};
use crate::routes::account::AppState;

use sg_core::services::account::MailServiceTrait;
use sg_core::services::password::PasswordHasherTrait;
use sg_core::services::session::SessionCacheTrait;
use sg_core::services::verification::VerificationCodeCacheTrait;
use sg_core::AccountRepository;
use sg_shared::ApiResponse;

/// Issue a verification code and mail it to the given address
///
/// Registration and password reset both start here; the code is bound to
/// the address and consumed by whichever flow presents it first.
pub async fn send_code<R, H, C, S, M>(
    state: web::Data<AppState<R, H, C, S, M>>,
    query: web::Query<SendCodeQuery>,
) -> HttpResponse
where
    R: AccountRepository + 'static,
    H: PasswordHasherTrait + 'static,
    C: VerificationCodeCacheTrait + 'static,
    S: SessionCacheTrait + 'static,
    M: MailServiceTrait + 'static,
{
    if let Err(errors) = query.validate() {
        return handle_validation_errors(&errors);
    }

    match state
        .account_service
        .send_verification_code(&query.email)
        .await
    {
        Ok(()) => HttpResponse::Ok().json(ApiResponse::success(MessageResponse::new(
            "Verification code sent",
        ))),
        Err(error) => handle_domain_error(error),
    }
}
