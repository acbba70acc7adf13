//! Port interface for the read-through contact cache.
//!
//! Two key shapes exist: the "all contacts" list entry and one entry per
//! contact id. The mutation rules in the contact service decide which keys
//! to evict or refresh; adapters only implement the primitive operations.

use async_trait::async_trait;

use crate::domain::contact::{Contact, ContactId};

/// Errors surfaced by cache adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContactCacheError {
    /// Cache backend is unavailable or timing out.
    #[error("contact cache backend failure: {message}")]
    Backend {
        /// Adapter-supplied failure description.
        message: String,
    },
    /// Serialisation or deserialisation of cached content failed.
    #[error("contact cache serialisation failed: {message}")]
    Serialization {
        /// Adapter-supplied failure description.
        message: String,
    },
}

impl ContactCacheError {
    /// Backend-class failure.
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend {
            message: message.into(),
        }
    }

    /// Serialisation-class failure.
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }
}

/// Driven port over the contact cache.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContactCache: Send + Sync {
    /// Read the cached full contact list, if present.
    async fn get_all(&self) -> Result<Option<Vec<Contact>>, ContactCacheError>;

    /// Store the full contact list.
    async fn put_all(&self, contacts: &[Contact]) -> Result<(), ContactCacheError>;

    /// Read a cached contact by id, if present.
    async fn get(&self, id: ContactId) -> Result<Option<Contact>, ContactCacheError>;

    /// Store or replace a single contact entry.
    async fn put(&self, contact: &Contact) -> Result<(), ContactCacheError>;

    /// Evict the list entry and the entry for `id`.
    async fn invalidate(&self, id: ContactId) -> Result<(), ContactCacheError>;

    /// Evict the list entry and every per-id entry.
    async fn invalidate_all(&self) -> Result<(), ContactCacheError>;
}
