//! Redis-backed implementation of the storage traits.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use bytes::Bytes;
use redis::AsyncCommands;
use redis::aio::ConnectionManager;

use super::config::RedisStorageConfig;
use super::{Storage, StorageError, StorageRead, StorageResult};

/// Storage backed by a Redis server.
///
/// Holds a fixed pool of multiplexed [`ConnectionManager`]s opened at
/// startup. Each manager reconnects on its own after a dropped connection;
/// commands are never retried here.
pub struct RedisStorage {
    connections: Vec<ConnectionManager>,
    next: AtomicUsize,
}

impl RedisStorage {
    /// Opens `pool_size` connections to the server at `config.url`.
    ///
    /// Fails with [`StorageError::Unavailable`] if the URL is empty or
    /// malformed or the server cannot be reached.
    pub async fn connect(config: &RedisStorageConfig) -> StorageResult<Self> {
        if config.url.is_empty() {
            return Err(StorageError::Unavailable(
                "no redis url configured (REDIS_URL)".to_string(),
            ));
        }
        let client = redis::Client::open(config.url.as_str())
            .map_err(|e| StorageError::Unavailable(format!("invalid redis url: {}", e)))?;

        let pool_size = config.pool_size.max(1);
        let mut connections = Vec::with_capacity(pool_size);
        for _ in 0..pool_size {
            let connection = client.get_connection_manager().await.map_err(|e| {
                StorageError::Unavailable(format!("failed to connect to redis: {}", e))
            })?;
            connections.push(connection);
        }
        tracing::info!(pool_size, "connected to redis");

        Ok(Self {
            connections,
            next: AtomicUsize::new(0),
        })
    }

    fn connection(&self) -> ConnectionManager {
        let index = self.next.fetch_add(1, Ordering::Relaxed) % self.connections.len();
        self.connections[index].clone()
    }
}

fn map_redis_error(err: redis::RedisError) -> StorageError {
    if err.is_io_error()
        || err.is_connection_refusal()
        || err.is_connection_dropped()
        || err.is_timeout()
    {
        StorageError::Unavailable(err.to_string())
    } else {
        StorageError::from_storage(err)
    }
}

#[async_trait]
impl StorageRead for RedisStorage {
    #[tracing::instrument(level = "trace", skip_all)]
    async fn hget(&self, key: &str, field: &str) -> StorageResult<Option<Bytes>> {
        let mut conn = self.connection();
        let value: Option<Vec<u8>> = conn.hget(key, field).await.map_err(map_redis_error)?;
        Ok(value.map(Bytes::from))
    }

    #[tracing::instrument(level = "trace", skip_all)]
    async fn hmget(&self, key: &str, fields: &[String]) -> StorageResult<Vec<Option<Bytes>>> {
        if fields.is_empty() {
            return Ok(Vec::new());
        }
        let mut conn = self.connection();
        // Issued explicitly: a single-field HMGET must still reply with an array.
        let values: Vec<Option<Vec<u8>>> = redis::cmd("HMGET")
            .arg(key)
            .arg(fields)
            .query_async(&mut conn)
            .await
            .map_err(map_redis_error)?;
        Ok(values.into_iter().map(|v| v.map(Bytes::from)).collect())
    }

    #[tracing::instrument(level = "trace", skip_all)]
    async fn hgetall(&self, key: &str) -> StorageResult<HashMap<String, Bytes>> {
        let mut conn = self.connection();
        let values: HashMap<String, Vec<u8>> =
            conn.hgetall(key).await.map_err(map_redis_error)?;
        Ok(values
            .into_iter()
            .map(|(field, value)| (field, Bytes::from(value)))
            .collect())
    }

    #[tracing::instrument(level = "trace", skip_all)]
    async fn zrevrange(&self, key: &str, start: isize, stop: isize) -> StorageResult<Vec<String>> {
        let mut conn = self.connection();
        conn.zrevrange(key, start, stop)
            .await
            .map_err(map_redis_error)
    }
}

#[async_trait]
impl Storage for RedisStorage {
    #[tracing::instrument(level = "trace", skip_all)]
    async fn hset(&self, key: &str, field: &str, value: Bytes) -> StorageResult<bool> {
        let mut conn = self.connection();
        let created: i64 = conn
            .hset(key, field, value.as_ref())
            .await
            .map_err(map_redis_error)?;
        Ok(created > 0)
    }

    #[tracing::instrument(level = "trace", skip_all)]
    async fn hdel(&self, key: &str, field: &str) -> StorageResult<bool> {
        let mut conn = self.connection();
        let removed: i64 = conn.hdel(key, field).await.map_err(map_redis_error)?;
        Ok(removed > 0)
    }

    #[tracing::instrument(level = "trace", skip_all)]
    async fn zadd(&self, key: &str, member: &str, score: f64) -> StorageResult<bool> {
        let mut conn = self.connection();
        let added: i64 = conn
            .zadd(key, member, score)
            .await
            .map_err(map_redis_error)?;
        Ok(added > 0)
    }

    #[tracing::instrument(level = "trace", skip_all)]
    async fn zrem(&self, key: &str, member: &str) -> StorageResult<bool> {
        let mut conn = self.connection();
        let removed: i64 = conn.zrem(key, member).await.map_err(map_redis_error)?;
        Ok(removed > 0)
    }
}
