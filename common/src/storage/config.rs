//! Storage configuration types.
//!
//! This module provides configuration structures for the supported storage
//! backends, allowing services to pick InMemory or Redis via CLI flags or a
//! YAML file.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Top-level storage configuration.
///
/// Defaults to `Redis` on `redis://localhost:6379`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum StorageConfig {
    InMemory,
    Redis(RedisStorageConfig),
}

impl Default for StorageConfig {
    fn default() -> Self {
        StorageConfig::Redis(RedisStorageConfig::default())
    }
}

/// Redis-specific configuration.
///
/// `Debug` output masks any credentials embedded in the URL.
#[derive(Clone, Serialize, Deserialize, PartialEq)]
pub struct RedisStorageConfig {
    /// Connection URL, e.g. `redis://:password@host:6379/0`.
    ///
    /// Credentials embedded in the URL are used for authentication.
    pub url: String,

    /// Number of multiplexed connections opened at startup. Requests are
    /// spread across them round-robin.
    #[serde(default = "default_pool_size")]
    pub pool_size: usize,
}

fn default_pool_size() -> usize {
    10
}

impl fmt::Debug for RedisStorageConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedisStorageConfig")
            .field("url", &redact_url(&self.url))
            .field("pool_size", &self.pool_size)
            .finish()
    }
}

/// Replaces the userinfo part of a URL (`user:password@`) with `***`.
fn redact_url(url: &str) -> String {
    let (scheme, rest) = match url.split_once("://") {
        Some((scheme, rest)) => (Some(scheme), rest),
        None => (None, url),
    };
    let authority_end = rest.find(['/', '?', '#']).unwrap_or(rest.len());
    let (authority, tail) = rest.split_at(authority_end);
    let Some(at) = authority.rfind('@') else {
        return url.to_string();
    };
    let host = &authority[at + 1..];
    match scheme {
        Some(scheme) => format!("{}://***@{}{}", scheme, host, tail),
        None => format!("***@{}{}", host, tail),
    }
}

impl Default for RedisStorageConfig {
    fn default() -> Self {
        Self {
            url: "redis://localhost:6379".to_string(),
            pool_size: default_pool_size(),
        }
    }
}
