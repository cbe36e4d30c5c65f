//! Key-value backend abstraction.
//!
//! Services describe their data in terms of two Redis-style structures
//! addressed by string keys:
//!
//! - **hashes**: a map of field → value under one key (`HSET`, `HGET`,
//!   `HMGET`, `HGETALL`, `HDEL`).
//! - **sorted sets**: members ordered by a floating point score under one key
//!   (`ZADD`, `ZREVRANGE`, `ZREM`).
//!
//! Each individual operation is atomic with respect to its key. Nothing in
//! this module spans several keys atomically; callers that keep two structures
//! in step do so with sequential writes.
//!
//! Read operations live on [`StorageRead`] and writes on [`Storage`], so that
//! read-only consumers can be handed a narrower handle.

use std::collections::HashMap;

use async_trait::async_trait;
use bytes::Bytes;

pub mod config;
pub mod factory;
pub mod in_memory;
pub mod redis;

/// Errors returned by storage backends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// The backend rejected or failed the operation.
    Storage(String),
    /// The backend could not be reached (connection refused, dropped or timed
    /// out) or was never initialized.
    Unavailable(String),
    /// Internal error (poisoned lock, invariant violation).
    Internal(String),
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageError::Storage(msg) => write!(f, "storage error: {}", msg),
            StorageError::Unavailable(msg) => write!(f, "storage unavailable: {}", msg),
            StorageError::Internal(msg) => write!(f, "internal storage error: {}", msg),
        }
    }
}

impl std::error::Error for StorageError {}

impl StorageError {
    /// Wraps an arbitrary backend error as [`StorageError::Storage`].
    pub fn from_storage(err: impl std::fmt::Display) -> Self {
        StorageError::Storage(err.to_string())
    }
}

pub type StorageResult<T> = std::result::Result<T, StorageError>;

/// Read operations over hashes and sorted sets.
#[async_trait]
pub trait StorageRead: Send + Sync {
    /// Returns the value of `field` in the hash at `key`, or `None` if either
    /// the key or the field is absent.
    async fn hget(&self, key: &str, field: &str) -> StorageResult<Option<Bytes>>;

    /// Returns the values of `fields` in the hash at `key`, positionally
    /// aligned with the request. Absent fields yield `None`.
    async fn hmget(&self, key: &str, fields: &[String]) -> StorageResult<Vec<Option<Bytes>>>;

    /// Returns every field/value pair of the hash at `key`. Iteration order is
    /// unspecified.
    async fn hgetall(&self, key: &str) -> StorageResult<HashMap<String, Bytes>>;

    /// Returns the members of the sorted set at `key` between ranks `start`
    /// and `stop` (both inclusive), ordered from the highest score to the
    /// lowest. Negative ranks count from the end (`-1` is the last member).
    async fn zrevrange(&self, key: &str, start: isize, stop: isize) -> StorageResult<Vec<String>>;
}

/// Read-write storage operations.
#[async_trait]
pub trait Storage: StorageRead {
    /// Sets `field` in the hash at `key`. Returns `true` if the field is new.
    async fn hset(&self, key: &str, field: &str, value: Bytes) -> StorageResult<bool>;

    /// Removes `field` from the hash at `key`. Returns `true` if it existed.
    async fn hdel(&self, key: &str, field: &str) -> StorageResult<bool>;

    /// Adds `member` to the sorted set at `key` with `score`, updating the
    /// score if the member already exists. Returns `true` if the member is new.
    async fn zadd(&self, key: &str, member: &str, score: f64) -> StorageResult<bool>;

    /// Removes `member` from the sorted set at `key`. Returns `true` if it
    /// existed.
    async fn zrem(&self, key: &str, member: &str) -> StorageResult<bool>;
}
