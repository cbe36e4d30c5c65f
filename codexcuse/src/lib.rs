//! Codexcuse: excuse records stored per source on a key-value backend.
//!
//! Each excuse belongs to a caller-chosen *source* (for example a guild or
//! tenant id). Sources never see each other's data.
//!
//! # Storage layout
//!
//! A source maps onto two backend structures: a hash from excuse id to the
//! JSON record, and a sorted set of ids scored by insertion time in
//! milliseconds. The sorted set gives the canonical newest-first order used
//! for pagination and random picks. See [`KeySpace`] for the key format.
//!
//! # Key Concepts
//!
//! - **ExcuseStore**: add, look up, page through, pick at random, filter by
//!   author and delete excuses.
//! - **Meta**: pagination metadata computed from the total count, the page
//!   size and the requested page.
//! - **server** (feature `http-server`): the HTTP API in front of the store.
//!
//! # Example
//!
//! ```ignore
//! use codexcuse::{Config, Excuse, ExcuseStore, User};
//! use common::StorageConfig;
//!
//! let store = ExcuseStore::open(Config {
//!     storage: StorageConfig::InMemory,
//!     ..Config::default()
//! })
//! .await?;
//!
//! let id = store
//!     .add("guild-1", Excuse::new("t", "c", User::new("u1", "alice"), User::new("u2", "bob")))
//!     .await?;
//! let page = store.get_all("guild-1", 1).await?;
//! assert_eq!(page.meta.total_count, 1);
//! ```

mod config;
mod error;
mod keys;
mod meta;
mod model;
#[cfg(feature = "http-server")]
pub mod server;
mod store;

pub use config::{Config, DEFAULT_ENVIRONMENT, DEFAULT_REQUEST_TIMEOUT};
pub use error::{Error, Result};
pub use keys::{KEY_PREFIX, KeySpace};
pub use meta::DEFAULT_PAGE_SIZE;
pub use model::{Excuse, Meta, Page, User};
pub use store::ExcuseStore;
