//! Shared Redis connection pool for the cache and event adapters.

use bb8_redis::{RedisConnectionManager, bb8};

/// Pooled Redis connections shared by cache and publisher adapters.
pub type RedisPool = bb8::Pool<RedisConnectionManager>;

/// Failure to construct the Redis pool.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("failed to build redis pool: {message}")]
pub struct RedisPoolError {
    message: String,
}

/// Build a Redis pool for the given URL.
///
/// Connections are created lazily; an unreachable Redis surfaces on first
/// checkout rather than at startup.
pub async fn build_redis_pool(url: &str, max_size: u32) -> Result<RedisPool, RedisPoolError> {
    let manager = RedisConnectionManager::new(url).map_err(|err| RedisPoolError {
        message: err.to_string(),
    })?;
    bb8::Pool::builder()
        .max_size(max_size)
        .build(manager)
        .await
        .map_err(|err| RedisPoolError {
            message: err.to_string(),
        })
}
