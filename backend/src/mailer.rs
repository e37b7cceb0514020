use crate::config::{ConfigError, SmtpConfig};
use async_trait::async_trait;
use booking_shared::BookingRequest;
use lettre::{
    message::{Mailbox, MultiPart},
    transport::smtp::{
        authentication::Credentials,
        client::{Tls, TlsParameters},
    },
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

pub const CONFIRMATION_SUBJECT: &str = "Appointment Confirmation";
pub const CONFIRMATION_TEXT: &str = "Your Appointment has been fixed";
pub const CONFIRMATION_HTML: &str = "<p>Your Appointment has been fixed</p>";

#[derive(Debug, Error)]
pub enum MailError {
    #[error("Invalid to address: {0}")]
    InvalidRecipient(String),
    #[error("Failed to build email: {0}")]
    Build(#[from] lettre::error::Error),
    #[error("Failed to send email: {0}")]
    Send(#[from] lettre::transport::smtp::Error),
}

/// The confirmation sent for every accepted booking. The content is fixed,
/// only the recipient comes from the booking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmationEmail {
    pub to: String,
    pub subject: String,
    pub text: String,
    pub html: String,
}

impl ConfirmationEmail {
    pub fn for_booking(booking: &BookingRequest) -> Self {
        Self {
            to: booking.email.clone(),
            subject: CONFIRMATION_SUBJECT.to_string(),
            text: CONFIRMATION_TEXT.to_string(),
            html: CONFIRMATION_HTML.to_string(),
        }
    }
}

#[async_trait]
pub trait ConfirmationMailer: Send + Sync {
    /// Delivers the email once and returns its message id.
    async fn send(&self, email: &ConfirmationEmail) -> Result<String, MailError>;
}

pub struct LettreMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl LettreMailer {
    /// Builds the transport without connecting. Port 465 gets implicit TLS,
    /// any other port upgrades with STARTTLS when the server offers it.
    pub fn new(config: &SmtpConfig) -> Result<Self, ConfigError> {
        let from: Mailbox = config
            .user
            .parse()
            .map_err(|_| ConfigError::InvalidSender(config.user.clone()))?;

        let builder = if config.implicit_tls() {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)
                .map_err(|e| ConfigError::Transport(e.to_string()))?
        } else {
            let tls = TlsParameters::new(config.host.clone())
                .map_err(|e| ConfigError::Transport(e.to_string()))?;
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(config.host.as_str())
                .tls(Tls::Opportunistic(tls))
        };

        let transport = builder
            .port(config.port)
            .credentials(Credentials::new(config.user.clone(), config.pass.clone()))
            .build();

        debug!(
            "SMTP transport for {}:{} (implicit tls: {})",
            config.host,
            config.port,
            config.implicit_tls()
        );
        Ok(Self { transport, from })
    }

    fn message_id(&self) -> String {
        format!("<{}@{}>", Uuid::new_v4(), self.from.email.domain())
    }
}

#[async_trait]
impl ConfirmationMailer for LettreMailer {
    async fn send(&self, email: &ConfirmationEmail) -> Result<String, MailError> {
        let to: Mailbox = email
            .to
            .parse()
            .map_err(|e| MailError::InvalidRecipient(format!("{}", e)))?;
        let message_id = self.message_id();
        let message = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(email.subject.as_str())
            .message_id(Some(message_id.clone()))
            .multipart(MultiPart::alternative_plain_html(
                email.text.clone(),
                email.html.clone(),
            ))?;

        self.transport.send(message).await?;
        Ok(message_id)
    }
}
