//! Port abstraction for contact persistence adapters.

use async_trait::async_trait;

use crate::domain::contact::{Contact, ContactChanges, ContactDraft, ContactId};

/// Persistence errors raised by contact repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContactRepositoryError {
    /// Repository connection could not be established.
    #[error("contact repository connection failed: {message}")]
    Connection {
        /// Adapter-supplied failure description.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("contact repository query failed: {message}")]
    Query {
        /// Adapter-supplied failure description.
        message: String,
    },
}

impl ContactRepositoryError {
    /// Connection-class failure.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Query-class failure.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Driven port over the contact store.
///
/// The store owns identity generation: [`insert`](Self::insert) returns the
/// persisted record with its fresh id. `update` and `delete` report absence
/// through `Option`/`bool` so the service decides the NotFound policy.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContactRepository: Send + Sync {
    /// Fetch every contact.
    async fn find_all(&self) -> Result<Vec<Contact>, ContactRepositoryError>;

    /// Fetch a contact by identifier.
    async fn find_by_id(&self, id: ContactId) -> Result<Option<Contact>, ContactRepositoryError>;

    /// Persist a new contact and return it with its generated identifier.
    async fn insert(&self, draft: &ContactDraft) -> Result<Contact, ContactRepositoryError>;

    /// Apply name/phone changes to an existing contact.
    ///
    /// Returns `None` when no row with `id` exists.
    async fn update(
        &self,
        id: ContactId,
        changes: &ContactChanges,
    ) -> Result<Option<Contact>, ContactRepositoryError>;

    /// Delete a contact by identifier; `false` when no row existed.
    async fn delete(&self, id: ContactId) -> Result<bool, ContactRepositoryError>;
}
