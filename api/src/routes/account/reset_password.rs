//! Handler for `POST /api/user/reset-password`

use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::dto::account::{MessageResponse, ResetPasswordRequest};
use crate::handlers::error::{handle_domain_error, handle_validation_errors};
use crate::routes::account::AppState;

use sg_core::services::account::MailServiceTrait;
use sg_core::services::password::PasswordHasherTrait;
use sg_core::services::session::SessionCacheTrait;
use sg_core::services::verification::VerificationCodeCacheTrait;
use sg_core::AccountRepository;
use sg_shared::ApiResponse;

/// Replace the account password after verifying an emailed code
///
/// Every live session of the account is revoked on success, so other
/// devices must log in again with the new password.
pub async fn reset_password<R, H, C, S, M>(
    state: web::Data<AppState<R, H, C, S, M>>,
    request: web::Json<ResetPasswordRequest>,
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
        .reset_password(
            &request.email,
            &request.verification_code,
            &request.new_password,
        )
        .await
    {
        Ok(()) => HttpResponse::Ok().json(ApiResponse::success(MessageResponse::new(
            "Password reset successfully",
        ))),
        Err(error) => handle_domain_error(error),
    }
}
