//! SMTP mailer adapter for the two templated notifications.

use std::time::Duration;

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor, message::Mailbox};
use tracing::debug;

use crate::domain::ports::{Mailer, MailerError};
use crate::domain::reset_token::ResetToken;
use crate::domain::user::EmailAddress;

/// SMTP relay settings for the mailer adapter.
#[derive(Debug, Clone)]
pub struct SmtpSettings {
    /// Relay hostname.
    pub host: String,
    /// Relay port (STARTTLS submission by default).
    pub port: u16,
    /// Optional relay credentials.
    pub credentials: Option<(String, String)>,
    /// Sender address for all notifications.
    pub from: String,
    /// Upper bound on a single delivery attempt.
    pub timeout: Duration,
}

/// Lettre-backed implementation of the `Mailer` port.
#[derive(Clone)]
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    /// Build a mailer from relay settings.
    pub fn new(settings: &SmtpSettings) -> Result<Self, MailerError> {
        let from: Mailbox = settings
            .from
            .parse()
            .map_err(|err| MailerError::compose(format!("invalid sender address: {err}")))?;

        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::relay(&settings.host)
            .map_err(|err| MailerError::transport(err.to_string()))?
            .port(settings.port)
            .timeout(Some(settings.timeout));
        if let Some((username, password)) = &settings.credentials {
            builder = builder.credentials(Credentials::new(username.clone(), password.clone()));
        }

        Ok(Self {
            transport: builder.build(),
            from,
        })
    }

    async fn send(
        &self,
        to: &EmailAddress,
        subject: &str,
        body: String,
    ) -> Result<(), MailerError> {
        let recipient: Mailbox = to
            .as_ref()
            .parse()
            .map_err(|err| MailerError::compose(format!("invalid recipient address: {err}")))?;
        let message = Message::builder()
            .from(self.from.clone())
            .to(recipient)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body)
            .map_err(|err| MailerError::compose(err.to_string()))?;

        self.transport
            .send(message)
            .await
            .map_err(|err| MailerError::transport(err.to_string()))?;
        debug!(to = %to, subject, "notification email sent");
        Ok(())
    }
}

fn welcome_body(to: &EmailAddress) -> String {
    format!(
        "Hello {to},\n\n\
         Your account has been created. You can now sign in and manage \
         your contacts.\n"
    )
}

fn reset_body(token: &ResetToken) -> String {
    format!(
        "A password reset was requested for this address.\n\n\
         Your reset token is: {token}\n\n\
         If you did not request this, you can ignore this email.\n"
    )
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send_welcome(&self, to: &EmailAddress) -> Result<(), MailerError> {
        self.send(to, "Welcome to AddressBook", welcome_body(to)).await
    }

    async fn send_password_reset(
        &self,
        to: &EmailAddress,
        token: &ResetToken,
    ) -> Result<(), MailerError> {
        self.send(to, "Password Reset Request", reset_body(token))
            .await
    }
}
