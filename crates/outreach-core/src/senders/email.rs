use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use super::EmailSender;
use crate::config::SmtpConfig;
use crate::generator::EmailContent;
use crate::models::Prospect;

/// Substituted when the generated body is empty.
pub const DEFAULT_BODY: &str = "Thank you for your interest in our insurance solutions. \
We'll be in touch soon with more information tailored to your needs.";

/// Sends HTML email over SMTP with STARTTLS.
///
/// Without credentials the sender runs dry: the message is logged and
/// reported as delivered.
pub struct SmtpEmailSender {
    config: SmtpConfig,
}

impl SmtpEmailSender {
    pub fn new(config: SmtpConfig) -> Self {
        Self { config }
    }

    pub fn is_dry_run(&self) -> bool {
        !self.config.has_credentials()
    }

    fn tracking_pixel(&self, history_id: &str) -> String {
        format!(
            "<img src=\"https://{}/track/{}/open.png\" width=\"1\" height=\"1\" alt=\"\">",
            self.config.tracking_domain, history_id
        )
    }

    /// Body with the default text substituted and the tracking pixel appended.
    pub fn html_body(&self, content: &EmailContent, history_id: &str) -> String {
        let body = if content.body.trim().is_empty() {
            DEFAULT_BODY
        } else {
            content.body.as_str()
        };
        format!("{}{}", body, self.tracking_pixel(history_id))
    }

    fn build_message(
        &self,
        prospect: &Prospect,
        content: &EmailContent,
        history_id: &str,
    ) -> Result<Message, String> {
        let from: Mailbox = format!("{} <{}>", self.config.sender_name, self.config.sender())
            .parse()
            .map_err(|e| format!("invalid sender address: {}", e))?;
        let to: Mailbox = prospect
            .email
            .trim()
            .parse()
            .map_err(|e| format!("invalid recipient address: {}", e))?;

        Message::builder()
            .from(from)
            .to(to)
            .subject(content.subject.clone())
            .header(ContentType::TEXT_HTML)
            .body(self.html_body(content, history_id))
            .map_err(|e| format!("failed to build message: {}", e))
    }

    async fn deliver(&self, message: Message) -> Result<(), String> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.config.server)
            .map_err(|e| format!("SMTP relay setup failed: {}", e))?
            .port(self.config.port)
            .credentials(Credentials::new(
                self.config.username.clone(),
                self.config.password.clone(),
            ))
            .build();
        transport
            .send(message)
            .await
            .map(|_| ())
            .map_err(|e| format!("SMTP send failed: {}", e))
    }
}

#[async_trait]
impl EmailSender for SmtpEmailSender {
    async fn send_email(&self, prospect: &Prospect, content: &EmailContent, history_id: &str) -> bool {
        if self.is_dry_run() {
            tracing::warn!("SMTP credentials not configured, email not delivered");
            tracing::info!("Email sent to {}", prospect.email);
            tracing::info!("Subject: {}", content.subject);
            tracing::info!("Body:\n{}", content.body);
            return true;
        }

        let message = match self.build_message(prospect, content, history_id) {
            Ok(m) => m,
            Err(e) => {
                tracing::error!("Email sending error: {}", e);
                return false;
            }
        };

        match self.deliver(message).await {
            Ok(()) => {
                tracing::info!("Email sent to {}", prospect.email);
                true
            }
            Err(e) => {
                tracing::error!("Email sending error: {}", e);
                false
            }
        }
    }
}
