//! Environment configuration module

use serde::{Deserialize, Serialize};
use std::env;

/// Deployment environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Staging,
    Production,
}

impl Default for Environment {
    fn default() -> Self {
        Environment::Development
    }
}

impl Environment {
    /// Detect the environment from `APP_ENV`
    ///
    /// Accepts the common spellings (`prod`, `production`, `stage`,
    /// `staging`); anything else maps to development.
    pub fn from_env() -> Self {
        match env::var("APP_ENV")
            .unwrap_or_default()
            .to_lowercase()
            .as_str()
        {
            "production" | "prod" => Environment::Production,
            "staging" | "stage" => Environment::Staging,
            _ => Environment::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }

    pub fn is_development(&self) -> bool {
        matches!(self, Environment::Development)
    }

    /// Environment name as used in logs and health output
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Staging => "staging",
            Environment::Production => "production",
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Log level filter (error, warn, info, debug, trace)
    pub level: String,

    /// Emit logs as JSON (structured) instead of plain text
    #[serde(default)]
    pub json_format: bool,

    /// Include request bodies in debug logs
    #[serde(default)]
    pub log_request_bodies: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: String::from("info"),
            json_format: false,
            log_request_bodies: false,
        }
    }
}

impl LoggingConfig {
    /// Logging defaults appropriate for the given environment
    pub fn for_environment(env: Environment) -> Self {
        match env {
            Environment::Development => Self {
                level: String::from("debug"),
                json_format: false,
                log_request_bodies: true,
            },
            Environment::Staging => Self {
                level: String::from("info"),
                json_format: true,
                log_request_bodies: false,
            },
            Environment::Production => Self {
                level: String::from("info"),
                json_format: true,
                log_request_bodies: false,
            },
        }
    }
}
