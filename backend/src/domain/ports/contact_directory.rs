//! Driving port for contact CRUD use-cases.
//!
//! Inbound adapters call this port so handler tests can substitute a test
//! double instead of wiring the repository, cache, and exchange.

use async_trait::async_trait;

use crate::domain::contact::{Contact, ContactChanges, ContactDraft, ContactId};
use crate::domain::error::Error;
use crate::domain::outcome::MutationOutcome;

/// Domain use-case port for the contact list.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContactDirectory: Send + Sync {
    /// Return all contacts, served from cache when available.
    async fn list(&self) -> Result<Vec<Contact>, Error>;

    /// Return one contact, served from cache when available.
    async fn get(&self, id: ContactId) -> Result<Contact, Error>;

    /// Persist a new contact, maintain the cache, publish an event.
    async fn add(&self, draft: ContactDraft) -> Result<MutationOutcome<Contact>, Error>;

    /// Apply name/phone changes, maintain the cache, publish an event.
    async fn update(
        &self,
        id: ContactId,
        changes: ContactChanges,
    ) -> Result<MutationOutcome<Contact>, Error>;

    /// Delete a contact, maintain the cache, publish an event.
    async fn delete(&self, id: ContactId) -> Result<MutationOutcome<()>, Error>;
}
