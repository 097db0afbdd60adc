//! Cache module for Redis-based storage
//!
//! This module provides Redis caching functionality for the Signet backend,
//! including connection management, retry logic, and the keyed stores for
//! verification codes and login sessions.

pub mod redis_client;
pub mod session_cache;
pub mod verification_code_cache;

pub use redis_client::RedisClient;
pub use session_cache::SessionCache;
pub use verification_code_cache::VerificationCodeCache;

// Re-export commonly used types
pub use sg_shared::config::cache::CacheConfig;
