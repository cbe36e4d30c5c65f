//! Shared building blocks for the codexcuse workspace.
//!
//! - [`storage`]: the key-value backend abstraction ([`Storage`], [`StorageRead`])
//!   exposing hash-map and sorted-set primitives, with in-memory and Redis
//!   implementations selected through [`StorageConfig`].
//! - [`clock`]: an injectable wall clock so time-ordered writes can be tested
//!   deterministically.

pub mod clock;
pub mod storage;

pub use clock::{Clock, MockClock, SystemClock};
pub use storage::config::{RedisStorageConfig, StorageConfig};
pub use storage::{Storage, StorageError, StorageRead, StorageResult};
