//! Mock mail service implementation
//!
//! A mock implementation of mail delivery for development and testing.
//! This implementation logs messages to the console instead of sending them.

use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tracing::{info, warn};
use uuid::Uuid;

use sg_core::services::MailServiceTrait;
use sg_shared::utils::validation::validators::is_valid_email;

/// Mock mail service for development and testing
///
/// This implementation:
/// - Logs messages to console
/// - Validates recipient addresses
/// - Generates mock message IDs
/// - Tracks delivery count and captures the last message for assertions
#[derive(Clone)]
pub struct MockMailService {
    /// Counter for tracking number of messages sent
    message_count: Arc<AtomicU64>,
    /// Last accepted message as (to, subject, body)
    last_message: Arc<Mutex<Option<(String, String, String)>>>,
    /// Whether to simulate failures (for testing)
    simulate_failure: bool,
    /// Whether to print messages to console
    console_output: bool,
}

impl MockMailService {
    /// Create a new mock mail service
    pub fn new() -> Self {
        Self {
            message_count: Arc::new(AtomicU64::new(0)),
            last_message: Arc::new(Mutex::new(None)),
            simulate_failure: false,
            console_output: true,
        }
    }

    /// Create a mock service with configurable options
    pub fn with_options(console_output: bool, simulate_failure: bool) -> Self {
        Self {
            message_count: Arc::new(AtomicU64::new(0)),
            last_message: Arc::new(Mutex::new(None)),
            simulate_failure,
            console_output,
        }
    }

    /// Get the total number of messages sent
    pub fn get_message_count(&self) -> u64 {
        self.message_count.load(Ordering::SeqCst)
    }

    /// Reset the message counter
    pub fn reset_counter(&self) {
        self.message_count.store(0, Ordering::SeqCst);
    }

    /// Get the last accepted message as (to, subject, body)
    pub fn last_message(&self) -> Option<(String, String, String)> {
        self.last_message.lock().ok().and_then(|guard| guard.clone())
    }

    /// Enable or disable failure simulation
    pub fn set_simulate_failure(&mut self, simulate: bool) {
        self.simulate_failure = simulate;
    }
}

impl Default for MockMailService {
    fn default() -> Self {
        Self::new()
    }
}

/// Mask email address for logging (show only the first character and domain)
fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() => {
            let first = local.chars().next().map(String::from).unwrap_or_default();
            format!("{}***@{}", first, domain)
        }
        _ => "***".to_string(),
    }
}

#[async_trait]
impl MailServiceTrait for MockMailService {
    async fn send_mail(&self, to: &str, subject: &str, body: &str) -> Result<String, String> {
        // Validate recipient address format
        if !is_valid_email(to) {
            return Err(format!("Invalid recipient address: {}", mask_email(to)));
        }

        // Simulate failure if configured
        if self.simulate_failure {
            warn!(
                "Mock mail service simulating failure for recipient: {}",
                mask_email(to)
            );
            return Err("Simulated mail delivery failure".to_string());
        }

        // Generate mock message ID
        let message_id = format!("mock_{}", Uuid::new_v4());

        // Increment message counter
        let count = self.message_count.fetch_add(1, Ordering::SeqCst) + 1;

        if self.console_output {
            // Console output for development - show full message
            println!("\n{}", "=".repeat(60));
            println!("📧 MOCK MAIL SERVICE - MESSAGE #{}", count);
            println!("{}", "=".repeat(60));
            println!("To: {}", to);
            println!("Subject: {}", subject);
            println!("Message ID: {}", message_id);
            println!("Body: {}", body);
            println!("{}\n", "=".repeat(60));
        }

        // Structured logging for production
        info!(
            target: "mail_service",
            provider = "mock",
            recipient = %mask_email(to),
            message_id = %message_id,
            body_length = body.len(),
            "Mail sent successfully (mock)"
        );

        if let Ok(mut last) = self.last_message.lock() {
            *last = Some((to.to_string(), subject.to_string(), body.to_string()));
        }

        Ok(message_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_mail_send_success() {
        let service = MockMailService::with_options(false, false);
        let result = service
            .send_mail("alice@example.com", "Hello", "Test message")
            .await;

        assert!(result.is_ok());
        let message_id = result.unwrap();
        assert!(message_id.starts_with("mock_"));
        assert_eq!(service.get_message_count(), 1);

        let (to, subject, body) = service.last_message().unwrap();
        assert_eq!(to, "alice@example.com");
        assert_eq!(subject, "Hello");
        assert_eq!(body, "Test message");
    }

    #[tokio::test]
    async fn test_mock_mail_invalid_recipient() {
        let service = MockMailService::with_options(false, false);
        let result = service.send_mail("not-an-email", "Hello", "Test").await;

        assert!(result.is_err());
        assert!(result.unwrap_err().contains("Invalid recipient address"));
        assert_eq!(service.get_message_count(), 0);
    }

    #[tokio::test]
    async fn test_mock_mail_simulate_failure() {
        let mut service = MockMailService::with_options(false, false);
        service.set_simulate_failure(true);

        let result = service.send_mail("alice@example.com", "Hello", "Test").await;
        assert!(result.is_err());
        assert_eq!(service.get_message_count(), 0);
    }

    #[tokio::test]
    async fn test_mock_mail_verification_code() {
        let service = MockMailService::with_options(false, false);
        let result = service
            .send_verification_code("alice@example.com", "042517")
            .await;

        assert!(result.is_ok());
        assert_eq!(service.get_message_count(), 1);

        let (_, subject, body) = service.last_message().unwrap();
        assert_eq!(subject, "Your verification code");
        assert!(body.contains("042517"));
        assert!(body.contains("expires in 5 minutes"));
    }

    #[tokio::test]
    async fn test_mock_mail_counter() {
        let service = MockMailService::with_options(false, false);

        for i in 1..=3 {
            let _ = service
                .send_mail("alice@example.com", "Hello", &format!("Message {}", i))
                .await;
            assert_eq!(service.get_message_count(), i);
        }

        service.reset_counter();
        assert_eq!(service.get_message_count(), 0);
    }

    #[test]
    fn test_mask_email() {
        assert_eq!(mask_email("alice@example.com"), "a***@example.com");
        assert_eq!(mask_email("no-at-sign"), "***");
    }
}
