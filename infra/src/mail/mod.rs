//! Mail delivery module
//!
//! Outbound mail implementations behind the core mail trait:
//! - `SmtpMailSender` - production delivery through an SMTP relay via lettre
//! - `MockMailService` - console-logging sender for development and testing

pub mod mock_mail;
pub mod smtp;

pub use mock_mail::MockMailService;
pub use smtp::SmtpMailSender;

// Re-export commonly used types
pub use sg_shared::config::mail::MailConfig;
