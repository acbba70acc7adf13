//! Port for templated notification email.

use async_trait::async_trait;

use crate::domain::reset_token::ResetToken;
use crate::domain::user::EmailAddress;

/// Errors surfaced by mailer adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MailerError {
    /// The message could not be composed (bad address, template failure).
    #[error("mail composition failed: {message}")]
    Compose {
        /// Adapter-supplied failure description.
        message: String,
    },
    /// The transport refused or failed to deliver the message.
    #[error("mail transport failed: {message}")]
    Transport {
        /// Adapter-supplied failure description.
        message: String,
    },
}

impl MailerError {
    /// Composition-class failure.
    pub fn compose(message: impl Into<String>) -> Self {
        Self::Compose {
            message: message.into(),
        }
    }

    /// Transport-class failure.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }
}

/// Driven port sending the two templated notifications.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Send the welcome email that follows a successful registration.
    async fn send_welcome(&self, to: &EmailAddress) -> Result<(), MailerError>;

    /// Send the password-reset email carrying the raw token.
    async fn send_password_reset(
        &self,
        to: &EmailAddress,
        token: &ResetToken,
    ) -> Result<(), MailerError>;
}
