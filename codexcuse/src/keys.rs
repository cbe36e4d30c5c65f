//! Backend key layout.
//!
//! Each source owns two keys:
//!
//! ```text
//! <prefix>:<env>:Codexcuse:source:<source>      hash        id -> JSON record
//! <prefix>:<env>:CodexcuseIDs:source:<source>   sorted set  id scored by insertion ms
//! ```
//!
//! The prefix is fixed so data written by earlier deployments stays
//! addressable. `<env>` separates deployments sharing one server.

/// Literal prefix of every key.
pub const KEY_PREFIX: &str = "hook_manager";

const RECORD_FAMILY: &str = "Codexcuse";
const INDEX_FAMILY: &str = "CodexcuseIDs";

/// Builds keys for one deployment environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeySpace {
    base: String,
}

impl KeySpace {
    pub fn new(environment: &str) -> Self {
        Self {
            base: format!("{}:{}:", KEY_PREFIX, environment),
        }
    }

    /// Key of the hash mapping excuse ids to serialized records.
    pub fn record_key(&self, source: &str) -> String {
        format!("{}{}:source:{}", self.base, RECORD_FAMILY, source)
    }

    /// Key of the sorted set indexing excuse ids by insertion time.
    pub fn index_key(&self, source: &str) -> String {
        format!("{}{}:source:{}", self.base, INDEX_FAMILY, source)
    }
}
