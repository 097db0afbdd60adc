//! Domain error to HTTP response mapping
//!
//! Every endpoint funnels failures through here so each error kind maps to
//! exactly one wire code and status, and internal causes stay in the logs
//! instead of the response body.

use actix_web::{error, HttpRequest, HttpResponse};
use validator::ValidationErrors;

use sg_core::errors::{AuthError, DomainError};
use sg_shared::errors::{error_codes, ErrorResponse};

/// Convert a domain error into its HTTP response
pub fn handle_domain_error(error: DomainError) -> HttpResponse {
    match error {
        DomainError::Auth(auth_error) => match auth_error {
            AuthError::UserAlreadyExists => HttpResponse::Conflict().json(ErrorResponse::new(
                error_codes::USER_EXISTS,
                "username is already taken",
            )),
            AuthError::EmailAlreadyRegistered => HttpResponse::Conflict().json(
                ErrorResponse::new(error_codes::EMAIL_EXISTS, "email is already registered"),
            ),
            AuthError::UserNotFound => HttpResponse::NotFound().json(ErrorResponse::new(
                error_codes::USER_NOT_FOUND,
                "user not found",
            )),
            AuthError::WrongPassword => HttpResponse::Unauthorized().json(ErrorResponse::new(
                error_codes::PASSWORD_WRONG,
                "wrong password",
            )),
            AuthError::InvalidVerificationCode => {
                HttpResponse::BadRequest().json(ErrorResponse::new(
                    error_codes::CODE_INVALID,
                    "verification code is invalid or expired",
                ))
            }
        },
        DomainError::Validation { message } => {
            HttpResponse::BadRequest().json(ErrorResponse::new(error_codes::PARAM_INVALID, message))
        }
        DomainError::Unauthorized => HttpResponse::Unauthorized().json(ErrorResponse::new(
            error_codes::UNAUTHORIZED,
            "missing or invalid session token",
        )),
        DomainError::Internal { message } => {
            log::error!("Internal error: {}", message);
            HttpResponse::InternalServerError().json(ErrorResponse::new(
                error_codes::SYSTEM_ERROR,
                "An internal server error occurred",
            ))
        }
    }
}

/// Convert request validation failures into a `PARAM_INVALID` response
///
/// Only the first violated constraint is reported; every operation returns
/// a single error outcome.
pub fn handle_validation_errors(errors: &ValidationErrors) -> HttpResponse {
    let message = first_violation_message(errors);
    log::warn!("Request validation failed: {}", message);
    HttpResponse::BadRequest().json(ErrorResponse::new(error_codes::PARAM_INVALID, message))
}

/// Map JSON body deserialization failures to the standard 400 envelope
pub fn json_error_handler(error: error::JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let response = HttpResponse::BadRequest().json(ErrorResponse::new(
        error_codes::PARAM_INVALID,
        error.to_string(),
    ));
    error::InternalError::from_response(error, response).into()
}

/// Map query string deserialization failures to the standard 400 envelope
pub fn query_error_handler(
    error: error::QueryPayloadError,
    _req: &HttpRequest,
) -> actix_web::Error {
    let response = HttpResponse::BadRequest().json(ErrorResponse::new(
        error_codes::PARAM_INVALID,
        error.to_string(),
    ));
    error::InternalError::from_response(error, response).into()
}

fn first_violation_message(errors: &ValidationErrors) -> String {
    for (field, field_errors) in errors.field_errors() {
        if let Some(error) = field_errors.first() {
            return match &error.message {
                Some(message) => message.to_string(),
                None => format!("invalid value for {}", field),
            };
        }
    }
    "invalid request".to_string()
}
