//! Mail delivery configuration module

use serde::{Deserialize, Serialize};

/// SMTP mail delivery configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MailConfig {
    /// SMTP relay host
    pub smtp_host: String,

    /// SMTP port
    pub smtp_port: u16,

    /// SMTP username
    pub username: String,

    /// SMTP password
    pub password: String,

    /// Sender address placed in the From header
    pub from_address: String,

    /// Human-readable sender name
    #[serde(default = "default_from_name")]
    pub from_name: String,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            smtp_host: String::from("localhost"),
            smtp_port: 587,
            username: String::new(),
            password: String::new(),
            from_address: String::from("no-reply@signet.local"),
            from_name: default_from_name(),
        }
    }
}

impl MailConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self {
            smtp_host: std::env::var("SMTP_HOST").unwrap_or_else(|_| "localhost".to_string()),
            smtp_port: std::env::var("SMTP_PORT")
                .unwrap_or_else(|_| "587".to_string())
                .parse()
                .unwrap_or(587),
            username: std::env::var("SMTP_USERNAME").unwrap_or_default(),
            password: std::env::var("SMTP_PASSWORD").unwrap_or_default(),
            from_address: std::env::var("SMTP_FROM_ADDRESS")
                .unwrap_or_else(|_| "no-reply@signet.local".to_string()),
            from_name: std::env::var("SMTP_FROM_NAME").unwrap_or_else(|_| default_from_name()),
        }
    }

    /// Full From header value, e.g. `Signet <no-reply@signet.local>`
    pub fn from_header(&self) -> String {
        format!("{} <{}>", self.from_name, self.from_address)
    }

    /// Whether the relay requires authentication
    pub fn has_credentials(&self) -> bool {
        !self.username.is_empty()
    }
}

fn default_from_name() -> String {
    String::from("Signet")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mail_config_default() {
        let config = MailConfig::default();
        assert_eq!(config.smtp_port, 587);
        assert!(!config.has_credentials());
    }

    #[test]
    fn test_from_header() {
        let config = MailConfig {
            from_name: "Signet".to_string(),
            from_address: "no-reply@signet.io".to_string(),
            ..Default::default()
        };
        assert_eq!(config.from_header(), "Signet <no-reply@signet.io>");
    }
}
