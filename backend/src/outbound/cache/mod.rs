//! Redis-backed contact cache adapter.
//!
//! Key shapes:
//! - `contacts:all` — JSON array of every contact.
//! - `contacts:<id>` — JSON object for one contact.
//! - `contacts:ids` — bookkeeping set of ids with a live per-id entry, so
//!   `invalidate_all` can evict exactly the keys this adapter created.
//!
//! Entries carry no TTL; eviction is driven entirely by the mutation rules
//! in the contact service. A TTL, if wanted, belongs to deployment
//! configuration, not this adapter.

use async_trait::async_trait;
use bb8_redis::redis::AsyncCommands;

use crate::domain::ports::{ContactCache, ContactCacheError};
use crate::domain::{Contact, ContactId};
use crate::outbound::redis::RedisPool;

const KEY_ALL: &str = "contacts:all";
const KEY_ID_SET: &str = "contacts:ids";

fn entry_key(id: ContactId) -> String {
    format!("contacts:{id}")
}

fn backend_error(err: impl std::fmt::Display) -> ContactCacheError {
    ContactCacheError::backend(err.to_string())
}

fn codec_error(err: serde_json::Error) -> ContactCacheError {
    ContactCacheError::serialization(err.to_string())
}

/// Redis implementation of the `ContactCache` port.
#[derive(Clone)]
pub struct RedisContactCache {
    pool: RedisPool,
}

impl RedisContactCache {
    /// Create a cache adapter over the shared Redis pool.
    pub fn new(pool: RedisPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ContactCache for RedisContactCache {
    async fn get_all(&self) -> Result<Option<Vec<Contact>>, ContactCacheError> {
        let mut conn = self.pool.get().await.map_err(backend_error)?;
        let payload: Option<String> = conn.get(KEY_ALL).await.map_err(backend_error)?;
        payload
            .map(|json| serde_json::from_str(&json).map_err(codec_error))
            .transpose()
    }

    async fn put_all(&self, contacts: &[Contact]) -> Result<(), ContactCacheError> {
        let json = serde_json::to_string(contacts).map_err(codec_error)?;
        let mut conn = self.pool.get().await.map_err(backend_error)?;
        let _: () = conn.set(KEY_ALL, json).await.map_err(backend_error)?;
        Ok(())
    }

    async fn get(&self, id: ContactId) -> Result<Option<Contact>, ContactCacheError> {
        let mut conn = self.pool.get().await.map_err(backend_error)?;
        let payload: Option<String> = conn.get(entry_key(id)).await.map_err(backend_error)?;
        payload
            .map(|json| serde_json::from_str(&json).map_err(codec_error))
            .transpose()
    }

    async fn put(&self, contact: &Contact) -> Result<(), ContactCacheError> {
        let json = serde_json::to_string(contact).map_err(codec_error)?;
        let mut conn = self.pool.get().await.map_err(backend_error)?;
        let _: () = conn
            .set(entry_key(contact.id), json)
            .await
            .map_err(backend_error)?;
        let _: () = conn
            .sadd(KEY_ID_SET, contact.id.value())
            .await
            .map_err(backend_error)?;
        Ok(())
    }

    async fn invalidate(&self, id: ContactId) -> Result<(), ContactCacheError> {
        let mut conn = self.pool.get().await.map_err(backend_error)?;
        let _: () = conn
            .del(vec![KEY_ALL.to_owned(), entry_key(id)])
            .await
            .map_err(backend_error)?;
        let _: () = conn
            .srem(KEY_ID_SET, id.value())
            .await
            .map_err(backend_error)?;
        Ok(())
    }

    async fn invalidate_all(&self) -> Result<(), ContactCacheError> {
        let mut conn = self.pool.get().await.map_err(backend_error)?;
        let ids: Vec<i64> = conn.smembers(KEY_ID_SET).await.map_err(backend_error)?;
        let mut keys: Vec<String> = ids
            .into_iter()
            .map(|id| entry_key(ContactId::new(id)))
            .collect();
        keys.push(KEY_ALL.to_owned());
        keys.push(KEY_ID_SET.to_owned());
        let _: () = conn.del(keys).await.map_err(backend_error)?;
        Ok(())
    }
}
