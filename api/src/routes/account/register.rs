//! Handler for `POST /api/user/register`

use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::dto::account::{AccountResponse, RegisterRequest};
use crate::handlers::error::{handle_domain_error, handle_validation_errors};
use crate::routes::account::AppState;

use sg_core::services::account::MailServiceTrait;
use sg_core::services::password::PasswordHasherTrait;
use sg_core::services::session::SessionCacheTrait;
use sg_core::services::verification::VerificationCodeCacheTrait;
use sg_core::{AccountRepository, Sex};
use sg_shared::ApiResponse;

/// Register a new account
///
/// The request must carry a verification code previously mailed to the
/// address; the code is consumed on success.
pub async fn register<R, H, C, S, M>(
    state: web::Data<AppState<R, H, C, S, M>>,
    request: web::Json<RegisterRequest>,
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

    // Validation restricted sex to "M" or "F", so this parse cannot miss
    let sex = request.sex.as_deref().and_then(Sex::parse);

    match state
        .account_service
        .register(
            &request.username,
            &request.password,
            &request.email,
            sex,
            &request.verification_code,
        )
        .await
    {
        Ok(account) => {
            HttpResponse::Ok().json(ApiResponse::success(AccountResponse::from(account)))
        }
        Err(error) => handle_domain_error(error),
    }
}
