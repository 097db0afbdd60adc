//! Integration tests for the Redis-backed stores
//!
//! These tests require a running Redis instance to execute.
//! Run with: cargo test -p sg_infra --test redis_integration -- --ignored

use sg_core::services::{SessionCacheTrait, VerificationCodeCacheTrait};
use sg_infra::cache::{CacheConfig, RedisClient, SessionCache, VerificationCodeCache};

async fn connect() -> RedisClient {
    let config = CacheConfig::new(
        std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379".to_string()),
    );

    RedisClient::new(config)
        .await
        .expect("Failed to connect to Redis")
}

#[tokio::test]
#[ignore] // Requires Redis server
async fn test_redis_connection() {
    let client = connect().await;
    let healthy = client.health_check().await.unwrap();
    assert!(healthy);
}

#[tokio::test]
#[ignore] // Requires Redis server
async fn test_verification_code_store_through_trait() {
    let cache = VerificationCodeCache::new(connect().await);

    let email = "redis-it@example.com";
    let code = "123456";

    // Clean up from previous tests
    let _ = cache.delete_code(email).await;

    // Store with a 5 minute expiry, then read it back
    cache.store_code(email, code, 300).await.unwrap();

    let retrieved = cache.get_code(email).await.unwrap();
    assert_eq!(retrieved, Some(code.to_string()));

    // Delete reports whether a code was present
    assert!(cache.delete_code(email).await.unwrap());
    assert!(!cache.delete_code(email).await.unwrap());
}

#[tokio::test]
#[ignore] // Requires Redis server
async fn test_session_store_through_trait() {
    let cache = SessionCache::new(connect().await);

    let token = "redis-it-session-token";
    let account_id = "0d4ce25a-0000-0000-0000-000000000000";

    // Clean up from previous tests
    let _ = cache.delete_session(token).await;

    cache.store_session(token, account_id, 60).await.unwrap();

    let resolved = cache.get_session(token).await.unwrap();
    assert_eq!(resolved, Some(account_id.to_string()));

    // The token shows up in a keyspace scan without its prefix
    let tokens = cache.scan_tokens().await.unwrap();
    assert!(tokens.contains(&token.to_string()));

    assert!(cache.delete_session(token).await.unwrap());
    let after_delete = cache.get_session(token).await.unwrap();
    assert_eq!(after_delete, None);
}

#[tokio::test]
#[ignore] // Requires Redis server
async fn test_expiry() {
    let client = connect().await;

    let key = "test:expiry";
    let value = "will_expire";

    // Set with 2 second expiry
    client.set_with_expiry(key, value, 2).await.unwrap();

    // Should exist immediately
    assert_eq!(client.get(key).await.unwrap(), Some(value.to_string()));

    // Wait for expiry
    tokio::time::sleep(tokio::time::Duration::from_secs(3)).await;

    // Should no longer exist
    assert_eq!(client.get(key).await.unwrap(), None);
}
