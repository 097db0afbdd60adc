//! Application factory
//!
//! Builds the actix-web `App` with state, middleware, and routes so the
//! server binary and the tests assemble the exact same application.

use actix_web::middleware::Logger;
use actix_web::{web, App, HttpResponse};

use crate::handlers::error::{json_error_handler, query_error_handler};
use crate::middleware::cors::create_cors;
use crate::routes::account::{
    login::login, logout::logout, register::register, reset_password::reset_password,
    send_code::send_code, AppState,
};

use sg_core::services::account::MailServiceTrait;
use sg_core::services::password::PasswordHasherTrait;
use sg_core::services::session::SessionCacheTrait;
use sg_core::services::verification::VerificationCodeCacheTrait;
use sg_core::AccountRepository;
use sg_shared::{AppConfig, ErrorResponse};

/// Create the application with all routes and middleware configured
pub fn create_app<R, H, C, S, M>(
    app_state: web::Data<AppState<R, H, C, S, M>>,
    config: &AppConfig,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    R: AccountRepository + 'static,
    H: PasswordHasherTrait + 'static,
    C: VerificationCodeCacheTrait + 'static,
    S: SessionCacheTrait + 'static,
    M: MailServiceTrait + 'static,
{
    let cors = create_cors(&config.cors);

    App::new()
        .app_data(app_state)
        .app_data(
            web::JsonConfig::default()
                .limit(config.server.max_payload_size)
                .error_handler(json_error_handler),
        )
        .app_data(web::QueryConfig::default().error_handler(query_error_handler))
        .wrap(Logger::default())
        .wrap(cors)
        .route("/health", web::get().to(health_check))
        .service(
            web::scope("/api/user")
                .route("/register", web::post().to(register::<R, H, C, S, M>))
                .route("/login", web::post().to(login::<R, H, C, S, M>))
                .route(
                    "/verification-code",
                    web::get().to(send_code::<R, H, C, S, M>),
                )
                .route("/logout", web::post().to(logout::<R, H, C, S, M>))
                .route(
                    "/reset-password",
                    web::post().to(reset_password::<R, H, C, S, M>),
                ),
        )
        .default_service(web::route().to(not_found))
}

/// Liveness endpoint for load balancers and monitoring
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "signet-api",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Fallback for unknown routes
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(
        "NOT_FOUND",
        "The requested resource was not found",
    ))
}
