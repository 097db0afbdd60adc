//! Signet API server binary
//!
//! Wires the MySQL repository, the Redis-backed caches, and the SMTP
//! sender into the account service, checks both backends before accepting
//! traffic, and serves the HTTP surface.

use std::io;
use std::sync::Arc;
use std::time::Duration;

use actix_web::{web, HttpServer};
use dotenv::dotenv;
use env_logger::Env;

use sg_api::app::create_app;
use sg_api::routes::account::AppState;
use sg_core::services::account::{AccountService, AccountServiceConfig};
use sg_core::BcryptPasswordHasher;
use sg_infra::cache::{RedisClient, SessionCache, VerificationCodeCache};
use sg_infra::database::{DatabasePool, MySqlAccountRepository};
use sg_infra::mail::SmtpMailSender;
use sg_infra::InfrastructureError;
use sg_shared::AppConfig;

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv().ok();

    let config = AppConfig::from_env();
    env_logger::init_from_env(Env::new().default_filter_or(config.logging.level.as_str()));

    log::info!(
        "Starting signet-api v{} ({} environment)",
        env!("CARGO_PKG_VERSION"),
        config.environment.as_str()
    );

    // Database pool, checked before the server binds
    let database = DatabasePool::new(config.database.clone())
        .await
        .map_err(startup_error)?;
    if !database.health_check().await.map_err(startup_error)? {
        return Err(io::Error::new(
            io::ErrorKind::Other,
            "MySQL health check failed",
        ));
    }
    log::info!("MySQL connection pool ready");

    // One Redis client shared by the verification code and session caches
    let redis_client = RedisClient::new(config.cache.clone())
        .await
        .map_err(startup_error)?;
    if !redis_client.health_check().await.map_err(startup_error)? {
        return Err(io::Error::new(
            io::ErrorKind::Other,
            "Redis health check failed",
        ));
    }
    log::info!("Redis connection ready");

    let account_repository = Arc::new(MySqlAccountRepository::new(database.get_pool().clone()));
    let password_hasher = Arc::new(BcryptPasswordHasher::new());
    let code_cache = Arc::new(VerificationCodeCache::new(redis_client.clone()));
    let session_cache = Arc::new(SessionCache::new(redis_client));
    let mail_service = Arc::new(SmtpMailSender::new(&config.mail).map_err(startup_error)?);

    let service_config = AccountServiceConfig {
        code_ttl_minutes: config.auth.verification.code_ttl_minutes as u64,
        session_ttl_minutes: config.auth.session.ttl_minutes as u64,
        fail_on_mail_error: config.auth.verification.fail_on_mail_error,
    };

    let account_service = Arc::new(AccountService::new(
        account_repository,
        password_hasher,
        code_cache,
        session_cache,
        mail_service,
        service_config,
    ));

    let app_state = web::Data::new(AppState { account_service });

    let bind_address = config.server.bind_address();
    let keep_alive = Duration::from_secs(config.server.keep_alive);
    let workers = config.server.workers;

    log::info!("Listening on http://{}", bind_address);

    let app_config = config.clone();
    let mut server = HttpServer::new(move || create_app(app_state.clone(), &app_config))
        .keep_alive(keep_alive);

    if workers > 0 {
        server = server.workers(workers);
    }

    server.bind(&bind_address)?.run().await
}

/// Convert an infrastructure failure into the binary's io::Error outcome
fn startup_error(error: InfrastructureError) -> io::Error {
    io::Error::new(io::ErrorKind::Other, error.to_string())
}
