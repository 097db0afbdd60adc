//! Example: verification code and session stores over a live Redis
//!
//! Walks the code issue/consume flow and the session lifecycle through the
//! core services running on the Redis-backed stores.
//!
//! Run with: cargo run --example redis_stores_demo -p sg_infra

use std::sync::Arc;

use sg_core::services::session::{SessionService, DEFAULT_SESSION_TTL_SECONDS};
use sg_core::services::verification::{VerificationCodeService, DEFAULT_CODE_TTL_SECONDS};
use sg_infra::cache::{CacheConfig, RedisClient, SessionCache, VerificationCodeCache};
use uuid::Uuid;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let client = RedisClient::new(CacheConfig::from_env()).await?;

    // Verification codes: issue, then consume wrong / right / reused
    let codes = VerificationCodeService::new(
        Arc::new(VerificationCodeCache::new(client.clone())),
        DEFAULT_CODE_TTL_SECONDS,
    );
    let email = "demo@example.com";

    let code = codes.issue(email).await?;
    println!("Issued code {} for {}", code, email);

    println!("\nTrying wrong code...");
    println!("Consumed: {}", codes.consume(email, "000000").await?);

    println!("\nTrying the issued code...");
    println!("Consumed: {}", codes.consume(email, &code).await?);

    println!("\nTrying to reuse the code...");
    println!("Consumed: {}", codes.consume(email, &code).await?);

    // Sessions: open, resolve, revoke
    let sessions = SessionService::new(
        Arc::new(SessionCache::new(client)),
        DEFAULT_SESSION_TTL_SECONDS,
    );
    let account_id = Uuid::new_v4();

    let token = sessions.create(account_id).await?;
    println!("\nOpened session {} for account {}", token, account_id);
    println!("Resolves to: {:?}", sessions.resolve(&token).await?);

    sessions.revoke(&token).await?;
    println!("After revoke: {:?}", sessions.resolve(&token).await?);

    println!("\nExample completed successfully!");
    Ok(())
}
