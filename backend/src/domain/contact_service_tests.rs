//! Tests for the contact service.

use std::sync::Arc;

use super::*;
use crate::domain::error::ErrorCode;
use crate::domain::outcome::SideEffectWarning;
use crate::domain::ports::{
    EventPublishError, MockContactCache, MockContactRepository, MockEventPublisher,
};

fn contact(id: i64, name: &str, phone: &str) -> Contact {
    Contact {
        id: ContactId::new(id),
        name: name.to_owned(),
        email: "john@x.com".to_owned(),
        phone: phone.to_owned(),
    }
}

fn quiet_cache() -> MockContactCache {
    let mut cache = MockContactCache::new();
    cache.expect_get_all().returning(|| Ok(None));
    cache.expect_get().returning(|_| Ok(None));
    cache.expect_put_all().returning(|_| Ok(()));
    cache.expect_put().returning(|_| Ok(()));
    cache.expect_invalidate().returning(|_| Ok(()));
    cache.expect_invalidate_all().returning(|| Ok(()));
    cache
}

fn quiet_publisher() -> MockEventPublisher {
    let mut events = MockEventPublisher::new();
    events.expect_publish().returning(|_| Ok(()));
    events
}

fn service(
    repository: MockContactRepository,
    cache: MockContactCache,
    events: MockEventPublisher,
) -> ContactService<MockContactRepository, MockContactCache, MockEventPublisher> {
    ContactService::new(Arc::new(repository), Arc::new(cache), Arc::new(events))
}

#[tokio::test]
async fn list_loads_from_store_and_populates_cache_on_miss() {
    let mut repository = MockContactRepository::new();
    repository
        .expect_find_all()
        .times(1)
        .returning(|| Ok(vec![contact(1, "John Doe", "1234567890")]));

    let mut cache = MockContactCache::new();
    cache.expect_get_all().times(1).returning(|| Ok(None));
    cache
        .expect_put_all()
        .times(1)
        .withf(|contacts| contacts.len() == 1 && contacts[0].name == "John Doe")
        .returning(|_| Ok(()));

    let contacts = service(repository, cache, quiet_publisher())
        .list()
        .await
        .expect("list succeeds");
    assert_eq!(contacts.len(), 1);
}

#[tokio::test]
async fn list_serves_cache_hit_without_touching_store() {
    let mut repository = MockContactRepository::new();
    repository.expect_find_all().times(0);

    let mut cache = MockContactCache::new();
    cache
        .expect_get_all()
        .times(1)
        .returning(|| Ok(Some(vec![contact(1, "John Doe", "1234567890")])));

    let contacts = service(repository, cache, quiet_publisher())
        .list()
        .await
        .expect("list succeeds");
    assert_eq!(contacts[0].id, ContactId::new(1));
}

#[tokio::test]
async fn list_degrades_to_store_when_cache_read_fails() {
    let mut repository = MockContactRepository::new();
    repository.expect_find_all().times(1).returning(|| Ok(vec![]));

    let mut cache = MockContactCache::new();
    cache
        .expect_get_all()
        .times(1)
        .returning(|| Err(ContactCacheError::backend("redis down")));
    cache.expect_put_all().returning(|_| Ok(()));

    let contacts = service(repository, cache, quiet_publisher())
        .list()
        .await
        .expect("list succeeds despite cache failure");
    assert!(contacts.is_empty());
}

#[tokio::test]
async fn get_unknown_id_is_not_found() {
    let mut repository = MockContactRepository::new();
    repository
        .expect_find_by_id()
        .times(1)
        .returning(|_| Ok(None));

    let err = service(repository, quiet_cache(), quiet_publisher())
        .get(ContactId::new(3))
        .await
        .expect_err("missing contact must fail");
    assert_eq!(err.code(), ErrorCode::NotFound);
    assert_eq!(err.message(), "Contact not found with id: 3");
}

#[tokio::test]
async fn add_invalidates_whole_cache_and_publishes_added_event() {
    let draft = ContactDraft::try_new("John Doe", "1234567890", "john@x.com")
        .expect("valid draft");

    let mut repository = MockContactRepository::new();
    repository
        .expect_insert()
        .times(1)
        .withf(|draft| draft.name() == "John Doe")
        .returning(|_| Ok(contact(1, "John Doe", "1234567890")));

    let mut cache = MockContactCache::new();
    cache.expect_invalidate_all().times(1).returning(|| Ok(()));

    let mut events = MockEventPublisher::new();
    events
        .expect_publish()
        .times(1)
        .withf(|event| event.to_string() == "Contact Added: John Doe")
        .returning(|_| Ok(()));

    let outcome = service(repository, cache, events)
        .add(draft)
        .await
        .expect("add succeeds");
    assert_eq!(outcome.value.id, ContactId::new(1));
    assert!(outcome.warnings.is_empty());
}

#[tokio::test]
async fn add_surfaces_publish_failure_as_warning_not_error() {
    let draft = ContactDraft::try_new("John Doe", "1234567890", "john@x.com")
        .expect("valid draft");

    let mut repository = MockContactRepository::new();
    repository
        .expect_insert()
        .times(1)
        .returning(|_| Ok(contact(1, "John Doe", "1234567890")));

    let mut events = MockEventPublisher::new();
    events
        .expect_publish()
        .times(1)
        .returning(|_| Err(EventPublishError::unavailable("exchange gone")));

    let outcome = service(repository, quiet_cache(), events)
        .add(draft)
        .await
        .expect("persisted add must not fail on publish");
    assert_eq!(outcome.warnings.len(), 1);
    assert!(matches!(
        outcome.warnings[0],
        SideEffectWarning::EventPublish { .. }
    ));
}

#[tokio::test]
async fn update_refreshes_per_id_entry_and_publishes_updated_event() {
    let changes = ContactChanges::try_new("John Smith", "1234567890").expect("valid changes");

    let mut repository = MockContactRepository::new();
    repository
        .expect_update()
        .times(1)
        .withf(|id, changes| *id == ContactId::new(1) && changes.name() == "John Smith")
        .returning(|_, _| Ok(Some(contact(1, "John Smith", "1234567890"))));

    let mut cache = MockContactCache::new();
    cache
        .expect_invalidate()
        .times(1)
        .withf(|id| *id == ContactId::new(1))
        .returning(|_| Ok(()));
    cache
        .expect_put()
        .times(1)
        .withf(|contact| contact.name == "John Smith")
        .returning(|_| Ok(()));

    let mut events = MockEventPublisher::new();
    events
        .expect_publish()
        .times(1)
        .withf(|event| event.to_string() == "Contact Updated: John Smith")
        .returning(|_| Ok(()));

    let outcome = service(repository, cache, events)
        .update(ContactId::new(1), changes)
        .await
        .expect("update succeeds");
    assert_eq!(outcome.value.name, "John Smith");
    assert_eq!(outcome.value.id, ContactId::new(1));
}

#[tokio::test]
async fn update_unknown_id_is_not_found() {
    let changes = ContactChanges::try_new("New Name", "9999999999").expect("valid changes");

    let mut repository = MockContactRepository::new();
    repository
        .expect_update()
        .times(1)
        .returning(|_, _| Ok(None));

    let err = service(repository, quiet_cache(), quiet_publisher())
        .update(ContactId::new(3), changes)
        .await
        .expect_err("missing contact must fail");
    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[tokio::test]
async fn delete_invalidates_entries_and_publishes_deleted_event() {
    let mut repository = MockContactRepository::new();
    repository
        .expect_delete()
        .times(1)
        .withf(|id| *id == ContactId::new(1))
        .returning(|_| Ok(true));

    let mut cache = MockContactCache::new();
    cache
        .expect_invalidate()
        .times(1)
        .withf(|id| *id == ContactId::new(1))
        .returning(|_| Ok(()));

    let mut events = MockEventPublisher::new();
    events
        .expect_publish()
        .times(1)
        .withf(|event| event.to_string() == "Contact Deleted: 1")
        .returning(|_| Ok(()));

    let outcome = service(repository, cache, events)
        .delete(ContactId::new(1))
        .await
        .expect("delete succeeds");
    assert!(outcome.warnings.is_empty());
}

#[tokio::test]
async fn delete_unknown_id_is_not_found_and_publishes_nothing() {
    let mut repository = MockContactRepository::new();
    repository.expect_delete().times(1).returning(|_| Ok(false));

    let mut events = MockEventPublisher::new();
    events.expect_publish().times(0);

    let err = service(repository, quiet_cache(), events)
        .delete(ContactId::new(3))
        .await
        .expect_err("missing contact must fail");
    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[tokio::test]
async fn store_connection_failure_maps_to_service_unavailable() {
    let mut repository = MockContactRepository::new();
    repository
        .expect_find_all()
        .times(1)
        .returning(|| Err(ContactRepositoryError::connection("pool exhausted")));

    let err = service(repository, quiet_cache(), quiet_publisher())
        .list()
        .await
        .expect_err("store outage must fail the read");
    assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
}
