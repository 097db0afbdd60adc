//! # Infrastructure Layer
//!
//! This crate implements the infrastructure layer for the Signet backend.
//! It provides the concrete implementations behind the core collaborator
//! traits for database access, caching, and mail delivery.
//!
//! ## Architecture
//!
//! The infrastructure layer contains:
//! - **Database**: MySQL account repository using SQLx
//! - **Cache**: Redis client plus the verification code and session stores
//! - **Mail**: SMTP delivery via lettre, with a mock sender for development

/// Database module - MySQL implementations using SQLx
pub mod database;

/// Cache module - Redis client and operations
pub mod cache;

/// Mail delivery module - SMTP and mock senders
pub mod mail;

/// Configuration re-exports for infrastructure services
pub mod config {
    //! Configuration types consumed by the infrastructure layer

    pub use sg_shared::config::cache::CacheConfig;
    pub use sg_shared::config::database::DatabaseConfig;
    pub use sg_shared::config::mail::MailConfig;
}

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Redis cache error
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// Mail delivery error
    #[error("Mail delivery error: {0}")]
    Mail(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
