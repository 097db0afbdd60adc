//! SMTP mail sender implementation
//!
//! Production mail delivery through an SMTP relay using lettre. The
//! transport performs blocking network IO, so sends run on the blocking
//! thread pool to keep the async workers free.

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use tracing::{debug, info};

use sg_core::services::MailServiceTrait;

use crate::config::MailConfig;
use crate::InfrastructureError;

/// SMTP-backed mail sender
///
/// Holds a shared transport; lettre pools relay connections internally, so
/// cloning this sender is cheap.
#[derive(Clone)]
pub struct SmtpMailSender {
    /// SMTP transport for message submission
    transport: SmtpTransport,
    /// From header applied to every outgoing message
    from: Mailbox,
}

impl SmtpMailSender {
    /// Create a new SMTP mail sender
    ///
    /// # Arguments
    /// * `config` - SMTP relay settings and sender identity
    ///
    /// # Returns
    /// * `Result<Self, InfrastructureError>` - Mail sender or configuration error
    ///
    /// # Example
    /// ```no_run
    /// use sg_infra::config::MailConfig;
    /// use sg_infra::mail::SmtpMailSender;
    ///
    /// fn create_sender() -> Result<SmtpMailSender, Box<dyn std::error::Error>> {
    ///     let config = MailConfig::from_env();
    ///     let sender = SmtpMailSender::new(&config)?;
    ///     Ok(sender)
    /// }
    /// ```
    pub fn new(config: &MailConfig) -> Result<Self, InfrastructureError> {
        let from: Mailbox = config
            .from_header()
            .parse()
            .map_err(|e| InfrastructureError::Config(format!("Invalid from address: {}", e)))?;

        let mut builder = SmtpTransport::relay(&config.smtp_host)
            .map_err(|e| InfrastructureError::Config(format!("Invalid SMTP relay: {}", e)))?
            .port(config.smtp_port);

        if config.has_credentials() {
            builder = builder.credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ));
        }

        info!(
            "SMTP mail sender configured for relay {}:{}",
            config.smtp_host, config.smtp_port
        );

        Ok(Self {
            transport: builder.build(),
            from,
        })
    }

    /// Build and deliver one message through the relay
    async fn deliver(
        &self,
        to: &str,
        subject: &str,
        body: &str,
    ) -> Result<String, InfrastructureError> {
        let message = Message::builder()
            .from(self.from.clone())
            .to(to
                .parse()
                .map_err(|e| InfrastructureError::Mail(format!("Invalid to address: {}", e)))?)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body.to_string())
            .map_err(|e| InfrastructureError::Mail(format!("Failed to build message: {}", e)))?;

        debug!("Submitting message to SMTP relay");

        // Transport::send blocks on network IO
        let transport = self.transport.clone();
        let response = tokio::task::spawn_blocking(move || transport.send(&message))
            .await
            .map_err(|e| InfrastructureError::Mail(format!("Send task failed: {}", e)))?
            .map_err(|e| InfrastructureError::Mail(format!("SMTP send failed: {}", e)))?;

        let reply = response.message().collect::<Vec<&str>>().join(" ");
        info!("Mail accepted by relay: {}", reply);

        Ok(reply)
    }
}

#[async_trait]
impl MailServiceTrait for SmtpMailSender {
    async fn send_mail(&self, to: &str, subject: &str, body: &str) -> Result<String, String> {
        self.deliver(to, subject, body)
            .await
            .map_err(|e| e.to_string())
    }
}
