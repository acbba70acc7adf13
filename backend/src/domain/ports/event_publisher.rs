//! Port for fire-and-forget contact mutation events.

use std::fmt;

use async_trait::async_trait;

use crate::domain::contact::ContactId;

/// Textual notification published to the message exchange on a mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactEvent {
    /// A contact was created.
    Added {
        /// Name of the new contact.
        name: String,
    },
    /// A contact's fields were changed.
    Updated {
        /// Name of the contact after the update.
        name: String,
    },
    /// A contact was removed.
    Deleted {
        /// Identifier of the removed contact.
        id: ContactId,
    },
}

impl fmt::Display for ContactEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Added { name } => write!(f, "Contact Added: {name}"),
            Self::Updated { name } => write!(f, "Contact Updated: {name}"),
            Self::Deleted { id } => write!(f, "Contact Deleted: {id}"),
        }
    }
}

/// Errors surfaced by event publisher adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EventPublishError {
    /// Exchange infrastructure is unavailable.
    #[error("event exchange is unavailable: {message}")]
    Unavailable {
        /// Adapter-supplied failure description.
        message: String,
    },
    /// The exchange refused the publication.
    #[error("event publication was rejected: {message}")]
    Rejected {
        /// Adapter-supplied failure description.
        message: String,
    },
}

impl EventPublishError {
    /// Exchange unavailable.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    /// Publication rejected.
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected {
            message: message.into(),
        }
    }
}

/// Driven port publishing mutation events to a named exchange/routing key.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Publish one event; best-effort, bounded by the adapter's timeout.
    async fn publish(&self, event: &ContactEvent) -> Result<(), EventPublishError>;
}
