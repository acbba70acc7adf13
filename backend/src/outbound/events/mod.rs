//! Redis pub/sub event publisher adapter.
//!
//! Contact mutation events are plain-text strings published to a channel
//! derived from the configured exchange and routing key
//! (`<exchange>:<routing-key>`). Publication is fire-and-forget from the
//! caller's perspective; the contact service turns failures into warnings.

use async_trait::async_trait;
use bb8_redis::redis::AsyncCommands;
use tracing::debug;

use crate::domain::ports::{ContactEvent, EventPublishError, EventPublisher};
use crate::outbound::redis::RedisPool;

/// Redis implementation of the `EventPublisher` port.
#[derive(Clone)]
pub struct RedisEventPublisher {
    pool: RedisPool,
    channel: String,
}

impl RedisEventPublisher {
    /// Create a publisher for the given exchange/routing-key pair.
    pub fn new(pool: RedisPool, exchange: &str, routing_key: &str) -> Self {
        Self {
            pool,
            channel: format!("{exchange}:{routing_key}"),
        }
    }
}

#[async_trait]
impl EventPublisher for RedisEventPublisher {
    async fn publish(&self, event: &ContactEvent) -> Result<(), EventPublishError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| EventPublishError::unavailable(err.to_string()))?;
        let text = event.to_string();
        let _: () = conn
            .publish(self.channel.as_str(), text.as_str())
            .await
            .map_err(|err| EventPublishError::rejected(err.to_string()))?;
        debug!(channel = %self.channel, event = %text, "published contact event");
        Ok(())
    }
}
