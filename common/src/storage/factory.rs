//! Storage factory for creating storage instances from configuration.

use std::sync::Arc;

use super::Storage;
use super::StorageResult;
use super::config::StorageConfig;
use super::in_memory::InMemoryStorage;
use super::redis::RedisStorage;

/// Creates a storage instance based on the provided configuration.
///
/// The Redis backend connects eagerly, so an unreachable server or a malformed
/// URL is reported here as [`StorageError::Unavailable`](super::StorageError::Unavailable)
/// rather than on the first request.
///
/// # Examples
///
/// ```rust,ignore
/// use common::storage::config::StorageConfig;
/// use common::storage::factory::create_storage;
///
/// let storage = create_storage(&StorageConfig::InMemory).await?;
/// ```
pub async fn create_storage(config: &StorageConfig) -> StorageResult<Arc<dyn Storage>> {
    match config {
        StorageConfig::InMemory => Ok(Arc::new(InMemoryStorage::new())),
        StorageConfig::Redis(redis_config) => {
            let storage = RedisStorage::connect(redis_config).await?;
            Ok(Arc::new(storage))
        }
    }
}
