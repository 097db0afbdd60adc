//! Handler for `POST /api/user/logout`

use actix_web::{web, HttpRequest, HttpResponse};

use crate::dto::account::MessageResponse;
use crate::handlers::error::handle_domain_error;
use crate::routes::account::AppState;

use sg_core::services::account::MailServiceTrait;
use sg_core::services::password::PasswordHasherTrait;
use sg_core::services::session::SessionCacheTrait;
use sg_core::services::verification::VerificationCodeCacheTrait;
use sg_core::AccountRepository;
use sg_shared::errors::{error_codes, ErrorResponse};
use sg_shared::ApiResponse;

/// Name of the header carrying the session token
pub const SESSION_HEADER: &str = "X-Session-Id";

/// Revoke the session presented in the `X-Session-Id` header
pub async fn logout<R, H, C, S, M>(
    req: HttpRequest,
    state: web::Data<AppState<R, H, C, S, M>>,
) -> HttpResponse
where
    R: AccountRepository + 'static,
    H: PasswordHasherTrait + 'static,
    C: VerificationCodeCacheTrait + 'static,
    S: SessionCacheTrait + 'static,
    M: MailServiceTrait + 'static,
{
    let token = match session_token(&req) {
        Some(token) => token,
        None => {
            return HttpResponse::Unauthorized().json(ErrorResponse::new(
                error_codes::UNAUTHORIZED,
                "missing session token",
            ));
        }
    };

    match state.account_service.logout(&token).await {
        Ok(()) => HttpResponse::Ok().json(ApiResponse::success(MessageResponse::new(
            "Logged out successfully",
        ))),
        Err(error) => handle_domain_error(error),
    }
}

/// Extract a non-empty session token from the request headers
fn session_token(req: &HttpRequest) -> Option<String> {
    req.headers()
        .get(SESSION_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
}
