//! Contact CRUD orchestration over store, cache, and event exchange.
//!
//! Side effects are ordered: persist first, then maintain the cache, then
//! publish the mutation event. The persisted write is authoritative; cache
//! and publish failures are logged and surfaced as warnings on the outcome,
//! never rolled back. Cache read failures degrade to a store read.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::domain::contact::{Contact, ContactChanges, ContactDraft, ContactId};
use crate::domain::error::Error;
use crate::domain::outcome::{MutationOutcome, SideEffectWarning};
use crate::domain::ports::{
    ContactCache, ContactCacheError, ContactDirectory, ContactEvent, ContactRepository,
    ContactRepositoryError, EventPublisher,
};

/// Contact service implementing the [`ContactDirectory`] driving port.
#[derive(Clone)]
pub struct ContactService<R, C, E> {
    repository: Arc<R>,
    cache: Arc<C>,
    events: Arc<E>,
}

impl<R, C, E> ContactService<R, C, E> {
    /// Create a new service over the given adapters.
    pub fn new(repository: Arc<R>, cache: Arc<C>, events: Arc<E>) -> Self {
        Self {
            repository,
            cache,
            events,
        }
    }
}

fn map_repository_error(error: ContactRepositoryError) -> Error {
    match error {
        ContactRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("contact store unavailable: {message}"))
        }
        ContactRepositoryError::Query { message } => {
            Error::internal(format!("contact store error: {message}"))
        }
    }
}

fn not_found(id: ContactId) -> Error {
    Error::not_found(format!("Contact not found with id: {id}"))
}

impl<R, C, E> ContactService<R, C, E>
where
    R: ContactRepository,
    C: ContactCache,
    E: EventPublisher,
{
    /// Read from the cache, downgrading backend failures to a miss.
    async fn cached_list(&self) -> Option<Vec<Contact>> {
        match self.cache.get_all().await {
            Ok(hit) => hit,
            Err(err) => {
                warn!(error = %err, "contact cache read failed, falling back to store");
                None
            }
        }
    }

    async fn cached_contact(&self, id: ContactId) -> Option<Contact> {
        match self.cache.get(id).await {
            Ok(hit) => hit,
            Err(err) => {
                warn!(error = %err, %id, "contact cache read failed, falling back to store");
                None
            }
        }
    }

    fn note_cache_failure<T>(outcome: &mut MutationOutcome<T>, error: &ContactCacheError) {
        warn!(error = %error, "cache maintenance failed after persisted mutation");
        outcome.push_warning(SideEffectWarning::Cache {
            message: error.to_string(),
        });
    }

    async fn publish_event<T>(&self, outcome: &mut MutationOutcome<T>, event: ContactEvent) {
        if let Err(err) = self.events.publish(&event).await {
            warn!(error = %err, event = %event, "event publication failed");
            outcome.push_warning(SideEffectWarning::EventPublish {
                message: err.to_string(),
            });
        }
    }
}

#[async_trait]
impl<R, C, E> ContactDirectory for ContactService<R, C, E>
where
    R: ContactRepository,
    C: ContactCache,
    E: EventPublisher,
{
    async fn list(&self) -> Result<Vec<Contact>, Error> {
        if let Some(contacts) = self.cached_list().await {
            return Ok(contacts);
        }

        info!("fetching contacts from store (cache miss)");
        let contacts = self
            .repository
            .find_all()
            .await
            .map_err(map_repository_error)?;
        if let Err(err) = self.cache.put_all(&contacts).await {
            warn!(error = %err, "failed to populate contact list cache");
        }
        Ok(contacts)
    }

    async fn get(&self, id: ContactId) -> Result<Contact, Error> {
        if let Some(contact) = self.cached_contact(id).await {
            return Ok(contact);
        }

        info!(%id, "fetching contact from store (cache miss)");
        let contact = self
            .repository
            .find_by_id(id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| not_found(id))?;
        if let Err(err) = self.cache.put(&contact).await {
            warn!(error = %err, %id, "failed to populate contact cache entry");
        }
        Ok(contact)
    }

    async fn add(&self, draft: ContactDraft) -> Result<MutationOutcome<Contact>, Error> {
        let contact = self
            .repository
            .insert(&draft)
            .await
            .map_err(map_repository_error)?;
        info!(id = %contact.id, name = %contact.name, "contact persisted");

        let mut outcome = MutationOutcome::clean(contact);
        // A fresh row makes the list view and any cached per-id entries stale.
        if let Err(err) = self.cache.invalidate_all().await {
            Self::note_cache_failure(&mut outcome, &err);
        }
        let event = ContactEvent::Added {
            name: outcome.value.name.clone(),
        };
        self.publish_event(&mut outcome, event).await;
        Ok(outcome)
    }

    async fn update(
        &self,
        id: ContactId,
        changes: ContactChanges,
    ) -> Result<MutationOutcome<Contact>, Error> {
        let updated = self
            .repository
            .update(id, &changes)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| not_found(id))?;
        info!(%id, name = %updated.name, "contact updated");

        let mut outcome = MutationOutcome::clean(updated);
        // Evict the stale list entry, then refresh the per-id entry in place.
        if let Err(err) = self.cache.invalidate(id).await {
            Self::note_cache_failure(&mut outcome, &err);
        }
        if let Err(err) = self.cache.put(&outcome.value).await {
            Self::note_cache_failure(&mut outcome, &err);
        }
        let event = ContactEvent::Updated {
            name: outcome.value.name.clone(),
        };
        self.publish_event(&mut outcome, event).await;
        Ok(outcome)
    }

    async fn delete(&self, id: ContactId) -> Result<MutationOutcome<()>, Error> {
        let removed = self
            .repository
            .delete(id)
            .await
            .map_err(map_repository_error)?;
        if !removed {
            return Err(not_found(id));
        }
        info!(%id, "contact deleted");

        let mut outcome = MutationOutcome::clean(());
        // Mandatory invalidation: a deleted contact must never be served.
        if let Err(err) = self.cache.invalidate(id).await {
            Self::note_cache_failure(&mut outcome, &err);
        }
        self.publish_event(&mut outcome, ContactEvent::Deleted { id })
            .await;
        Ok(outcome)
    }
}

#[cfg(test)]
#[path = "contact_service_tests.rs"]
mod tests;
