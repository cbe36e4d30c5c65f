//! Configuration for opening an [`ExcuseStore`](crate::ExcuseStore).

use std::time::Duration;

use common::StorageConfig;

use crate::meta::DEFAULT_PAGE_SIZE;

/// Default deployment environment tag.
pub const DEFAULT_ENVIRONMENT: &str = "development";

/// Default bound on a single backend round-trip.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

/// Configuration for opening an [`ExcuseStore`](crate::ExcuseStore).
///
/// # Example
///
/// ```ignore
/// use codexcuse::{Config, ExcuseStore};
/// use common::StorageConfig;
///
/// let config = Config {
///     storage: StorageConfig::InMemory,
///     ..Config::default()
/// };
/// let store = ExcuseStore::open(config).await?;
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Storage backend configuration.
    pub storage: StorageConfig,

    /// Deployment environment tag, embedded in every key so that
    /// deployments sharing one backend do not see each other's data.
    pub environment: String,

    /// Number of excuses per page of [`ExcuseStore::get_all`](crate::ExcuseStore::get_all).
    pub page_size: u64,

    /// Upper bound on each backend round-trip. An expired call fails the
    /// operation; it is never retried.
    pub request_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage: StorageConfig::default(),
            environment: DEFAULT_ENVIRONMENT.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}
