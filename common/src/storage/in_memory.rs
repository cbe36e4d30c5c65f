//! In-memory storage backend mirroring Redis semantics for hashes and sorted
//! sets. Used for development and tests.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use bytes::Bytes;

use super::{Storage, StorageError, StorageRead, StorageResult};

const WRONG_TYPE: &str = "WRONGTYPE Operation against a key holding the wrong kind of value";

enum Entry {
    Hash(HashMap<String, Bytes>),
    SortedSet(HashMap<String, f64>),
}

/// HashMap-backed storage.
///
/// Like Redis, a key holds exactly one kind of structure, operating on it with
/// the other kind's commands fails, and a structure whose last element is
/// removed disappears.
#[derive(Default)]
pub struct InMemoryStorage {
    entries: RwLock<HashMap<String, Entry>>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> StorageResult<RwLockReadGuard<'_, HashMap<String, Entry>>> {
        self.entries
            .read()
            .map_err(|_| StorageError::Internal("lock poisoned".into()))
    }

    fn write(&self) -> StorageResult<RwLockWriteGuard<'_, HashMap<String, Entry>>> {
        self.entries
            .write()
            .map_err(|_| StorageError::Internal("lock poisoned".into()))
    }
}

fn wrong_type() -> StorageError {
    StorageError::Storage(WRONG_TYPE.to_string())
}

/// Members sorted by descending score; equal scores fall back to descending
/// lexicographic member order, as `ZREVRANGE` does.
fn rev_sorted(members: &HashMap<String, f64>) -> Vec<&String> {
    let mut sorted: Vec<(&String, f64)> = members.iter().map(|(m, s)| (m, *s)).collect();
    sorted.sort_by(|(ma, sa), (mb, sb)| sb.total_cmp(sa).then_with(|| mb.cmp(ma)));
    sorted.into_iter().map(|(m, _)| m).collect()
}

/// Resolves Redis-style inclusive rank bounds against a collection length.
/// Returns `None` when the range selects nothing.
fn resolve_range(len: usize, start: isize, stop: isize) -> Option<(usize, usize)> {
    if len == 0 {
        return None;
    }
    let len = len as isize;
    let start = if start < 0 { (len + start).max(0) } else { start };
    let stop = if stop < 0 { len + stop } else { stop.min(len - 1) };
    if start > stop || start >= len || stop < 0 {
        return None;
    }
    Some((start as usize, stop as usize))
}

#[async_trait]
impl StorageRead for InMemoryStorage {
    async fn hget(&self, key: &str, field: &str) -> StorageResult<Option<Bytes>> {
        let entries = self.read()?;
        match entries.get(key) {
            None => Ok(None),
            Some(Entry::Hash(hash)) => Ok(hash.get(field).cloned()),
            Some(Entry::SortedSet(_)) => Err(wrong_type()),
        }
    }

    async fn hmget(&self, key: &str, fields: &[String]) -> StorageResult<Vec<Option<Bytes>>> {
        let entries = self.read()?;
        match entries.get(key) {
            None => Ok(vec![None; fields.len()]),
            Some(Entry::Hash(hash)) => Ok(fields.iter().map(|f| hash.get(f).cloned()).collect()),
            Some(Entry::SortedSet(_)) => Err(wrong_type()),
        }
    }

    async fn hgetall(&self, key: &str) -> StorageResult<HashMap<String, Bytes>> {
        let entries = self.read()?;
        match entries.get(key) {
            None => Ok(HashMap::new()),
            Some(Entry::Hash(hash)) => Ok(hash.clone()),
            Some(Entry::SortedSet(_)) => Err(wrong_type()),
        }
    }

    async fn zrevrange(&self, key: &str, start: isize, stop: isize) -> StorageResult<Vec<String>> {
        let entries = self.read()?;
        let members = match entries.get(key) {
            None => return Ok(Vec::new()),
            Some(Entry::SortedSet(members)) => members,
            Some(Entry::Hash(_)) => return Err(wrong_type()),
        };
        let sorted = rev_sorted(members);
        Ok(match resolve_range(sorted.len(), start, stop) {
            Some((from, to)) => sorted[from..=to].iter().map(|m| (*m).clone()).collect(),
            None => Vec::new(),
        })
    }
}

#[async_trait]
impl Storage for InMemoryStorage {
    async fn hset(&self, key: &str, field: &str, value: Bytes) -> StorageResult<bool> {
        let mut entries = self.write()?;
        let entry = entries
            .entry(key.to_string())
            .or_insert_with(|| Entry::Hash(HashMap::new()));
        match entry {
            Entry::Hash(hash) => Ok(hash.insert(field.to_string(), value).is_none()),
            Entry::SortedSet(_) => Err(wrong_type()),
        }
    }

    async fn hdel(&self, key: &str, field: &str) -> StorageResult<bool> {
        let mut entries = self.write()?;
        let (removed, now_empty) = match entries.get_mut(key) {
            None => return Ok(false),
            Some(Entry::Hash(hash)) => (hash.remove(field).is_some(), hash.is_empty()),
            Some(Entry::SortedSet(_)) => return Err(wrong_type()),
        };
        if now_empty {
            entries.remove(key);
        }
        Ok(removed)
    }

    async fn zadd(&self, key: &str, member: &str, score: f64) -> StorageResult<bool> {
        if score.is_nan() {
            return Err(StorageError::Storage("score is not a valid float".into()));
        }
        let mut entries = self.write()?;
        let entry = entries
            .entry(key.to_string())
            .or_insert_with(|| Entry::SortedSet(HashMap::new()));
        match entry {
            Entry::SortedSet(members) => Ok(members.insert(member.to_string(), score).is_none()),
            Entry::Hash(_) => Err(wrong_type()),
        }
    }

    async fn zrem(&self, key: &str, member: &str) -> StorageResult<bool> {
        let mut entries = self.write()?;
        let (removed, now_empty) = match entries.get_mut(key) {
            None => return Ok(false),
            Some(Entry::SortedSet(members)) => {
                (members.remove(member).is_some(), members.is_empty())
            }
            Some(Entry::Hash(_)) => return Err(wrong_type()),
        };
        if now_empty {
            entries.remove(key);
        }
        Ok(removed)
    }
}
