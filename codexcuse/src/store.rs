//! The excuse store: maps excuse operations onto hash and sorted-set
//! primitives.
//!
//! Each source owns a record hash (id → JSON record) and an id index (sorted
//! set scored by insertion time in milliseconds). The index gives the
//! newest-first order used for pagination and random picks; the hash holds
//! the data. The two are kept in step by sequential writes, not a
//! transaction: a crash between them can leave an id in one structure only.
//! Reads tolerate that by skipping ids whose record is missing.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use common::clock::{Clock, SystemClock};
use common::storage::factory::create_storage;
use common::{Storage, StorageError, StorageResult};
use rand::Rng;
use uuid::Uuid;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::keys::KeySpace;
use crate::model::{Excuse, Meta, Page};

/// Excuse records partitioned by source.
///
/// Cheap to share behind an `Arc`; all methods take `&self` and hold no
/// in-process locks.
pub struct ExcuseStore {
    storage: Arc<dyn Storage>,
    keys: KeySpace,
    clock: Arc<dyn Clock>,
    page_size: u64,
    timeout: Duration,
}

impl ExcuseStore {
    /// Builds the storage backend described by `config.storage` and opens a
    /// store over it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BackendUnavailable`] if the backend cannot be created
    /// or reached.
    pub async fn open(config: Config) -> Result<Self> {
        let storage = create_storage(&config.storage)
            .await
            .map_err(|e| Error::BackendUnavailable(e.to_string()))?;
        Ok(Self::new(storage, &config))
    }

    /// Opens a store over an existing storage handle. `config.storage` is
    /// ignored.
    pub fn new(storage: Arc<dyn Storage>, config: &Config) -> Self {
        Self::with_clock(storage, config, Arc::new(SystemClock))
    }

    /// Like [`new`](Self::new) with an explicit clock for insertion scores.
    pub fn with_clock(storage: Arc<dyn Storage>, config: &Config, clock: Arc<dyn Clock>) -> Self {
        Self {
            storage,
            keys: KeySpace::new(&config.environment),
            clock,
            page_size: config.page_size.max(1),
            timeout: config.request_timeout,
        }
    }

    /// Stores a new excuse under `source` and returns its generated id.
    ///
    /// Any id already on `excuse` is replaced. The id is indexed before the
    /// record is written.
    #[tracing::instrument(level = "debug", skip(self, excuse))]
    pub async fn add(&self, source: &str, mut excuse: Excuse) -> Result<String> {
        excuse.id = Uuid::new_v4().to_string();
        let value = Bytes::from(serde_json::to_vec(&excuse)?);

        let index_key = self.keys.index_key(source);
        let score = self.clock.now_millis() as f64;
        let added = self
            .bounded(self.storage.zadd(&index_key, &excuse.id, score))
            .await
            .map_err(|e| Error::write("ZADD", &index_key, e))?;
        if !added {
            return Err(Error::WriteFailed {
                op: "ZADD",
                key: index_key,
                message: format!("id {} was already indexed", excuse.id),
            });
        }

        let record_key = self.keys.record_key(source);
        self.bounded(self.storage.hset(&record_key, &excuse.id, value))
            .await
            .map_err(|e| Error::write("HSET", &record_key, e))?;

        tracing::debug!(id = %excuse.id, "excuse added");
        Ok(excuse.id)
    }

    /// Returns the excuse with `id`, or `None` if there is none.
    #[tracing::instrument(level = "debug", skip(self))]
    pub async fn get(&self, source: &str, id: &str) -> Result<Option<Excuse>> {
        let record_key = self.keys.record_key(source);
        let value = self
            .bounded(self.storage.hget(&record_key, id))
            .await
            .map_err(|e| Error::read("HGET", &record_key, e))?;
        value.map(|bytes| decode(&bytes)).transpose()
    }

    /// Returns page `page` (1-based) of the excuses under `source`, newest
    /// first.
    ///
    /// A page past the end is empty but still carries accurate metadata.
    /// Indexed ids whose record is missing or undecodable are skipped, so a
    /// page may hold fewer items than the page size.
    #[tracing::instrument(level = "debug", skip(self))]
    pub async fn get_all(&self, source: &str, page: u64) -> Result<Page> {
        let index_key = self.keys.index_key(source);
        let total_count = self.index_ids(&index_key, 0, -1).await?.len() as u64;
        let meta = Meta::compute(total_count, self.page_size, page);

        let Some((start, stop)) = Meta::page_range(page, self.page_size) else {
            return Ok(Page {
                excuses: Vec::new(),
                meta,
            });
        };
        let ids = self.index_ids(&index_key, start, stop).await?;
        if ids.is_empty() {
            return Ok(Page {
                excuses: Vec::new(),
                meta,
            });
        }

        let record_key = self.keys.record_key(source);
        let values = self
            .bounded(self.storage.hmget(&record_key, &ids))
            .await
            .map_err(|e| Error::read("HMGET", &record_key, e))?;

        let excuses = ids
            .iter()
            .zip(values)
            .filter_map(|(id, value)| match value {
                Some(bytes) => decode_or_warn(&record_key, id, &bytes),
                None => {
                    tracing::warn!(key = %record_key, %id, "indexed excuse has no record");
                    None
                }
            })
            .collect();

        Ok(Page { excuses, meta })
    }

    /// Returns one excuse under `source` picked uniformly at random, or
    /// `None` if the source is empty.
    #[tracing::instrument(level = "debug", skip(self))]
    pub async fn get_random(&self, source: &str) -> Result<Option<Excuse>> {
        let index_key = self.keys.index_key(source);
        let mut ids = self.index_ids(&index_key, 0, -1).await?;
        if ids.is_empty() {
            return Ok(None);
        }
        let position = rand::thread_rng().gen_range(0..ids.len());
        let id = ids.swap_remove(position);
        self.get(source, &id).await
    }

    /// Returns every excuse under `source` whose author has `user_id`.
    ///
    /// Reads the whole record hash of the source. No ordering is guaranteed.
    #[tracing::instrument(level = "debug", skip(self))]
    pub async fn get_by_user(&self, source: &str, user_id: &str) -> Result<Vec<Excuse>> {
        let record_key = self.keys.record_key(source);
        let records = self
            .bounded(self.storage.hgetall(&record_key))
            .await
            .map_err(|e| Error::read("HGETALL", &record_key, e))?;

        Ok(records
            .iter()
            .filter_map(|(id, bytes)| decode_or_warn(&record_key, id, bytes))
            .filter(|excuse| excuse.author.id == user_id)
            .collect())
    }

    /// Removes the excuse with `id`. Deleting an absent id succeeds.
    #[tracing::instrument(level = "debug", skip(self))]
    pub async fn delete(&self, source: &str, id: &str) -> Result<()> {
        let record_key = self.keys.record_key(source);
        self.bounded(self.storage.hdel(&record_key, id))
            .await
            .map_err(|e| Error::write("HDEL", &record_key, e))?;

        let index_key = self.keys.index_key(source);
        self.bounded(self.storage.zrem(&index_key, id))
            .await
            .map_err(|e| Error::write("ZREM", &index_key, e))?;
        Ok(())
    }

    async fn index_ids(&self, index_key: &str, start: isize, stop: isize) -> Result<Vec<String>> {
        self.bounded(self.storage.zrevrange(index_key, start, stop))
            .await
            .map_err(|e| Error::read("ZREVRANGE", index_key, e))
    }

    async fn bounded<T>(&self, call: impl Future<Output = StorageResult<T>>) -> StorageResult<T> {
        match tokio::time::timeout(self.timeout, call).await {
            Ok(result) => result,
            Err(_) => Err(StorageError::Storage(format!(
                "timed out after {:?}",
                self.timeout
            ))),
        }
    }
}

fn decode(bytes: &[u8]) -> Result<Excuse> {
    Ok(serde_json::from_slice(bytes)?)
}

fn decode_or_warn(record_key: &str, id: &str, bytes: &[u8]) -> Option<Excuse> {
    match decode(bytes) {
        Ok(excuse) => Some(excuse),
        Err(e) => {
            tracing::warn!(key = %record_key, %id, error = %e, "skipping undecodable excuse");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::User;
    use async_trait::async_trait;
    use common::StorageRead;
    use common::clock::MockClock;
    use common::storage::in_memory::InMemoryStorage;
    use std::collections::{HashMap, HashSet};

    struct Fixture {
        store: ExcuseStore,
        storage: Arc<InMemoryStorage>,
        clock: Arc<MockClock>,
    }

    impl Fixture {
        fn new() -> Self {
            let storage = Arc::new(InMemoryStorage::new());
            let clock = Arc::new(MockClock::with_millis(1_700_000_000_000));
            let store = ExcuseStore::with_clock(
                storage.clone(),
                &test_config(),
                clock.clone(),
            );
            Self {
                store,
                storage,
                clock,
            }
        }

        /// Adds excuses one millisecond apart so insertion order is the
        /// index order.
        async fn add_many(&self, source: &str, titles: &[String], author_id: &str) -> Vec<String> {
            let mut ids = Vec::new();
            for title in titles {
                self.clock.advance(Duration::from_millis(1));
                ids.push(
                    self.store
                        .add(source, excuse(title, author_id))
                        .await
                        .unwrap(),
                );
            }
            ids
        }
    }

    fn test_config() -> Config {
        Config {
            storage: common::StorageConfig::InMemory,
            environment: "test".to_string(),
            ..Config::default()
        }
    }

    fn excuse(title: &str, author_id: &str) -> Excuse {
        Excuse::new(
            title,
            format!("content of {}", title),
            User::new(author_id, format!("user-{}", author_id)),
            User::new("reporter", "bob"),
        )
    }

    fn titles(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("excuse-{}", i)).collect()
    }

    #[tokio::test]
    async fn should_get_added_excuse_with_assigned_id() {
        // given
        let fixture = Fixture::new();
        let mut input = excuse("t", "u1");
        input.id = "caller-supplied".to_string();

        // when
        let id = fixture.store.add("g1", input.clone()).await.unwrap();
        let stored = fixture.store.get("g1", &id).await.unwrap().unwrap();

        // then
        assert_ne!(id, "caller-supplied");
        assert!(Uuid::parse_str(&id).is_ok());
        assert_eq!(stored.id, id);
        assert_eq!(stored.title, input.title);
        assert_eq!(stored.content, input.content);
        assert_eq!(stored.author, input.author);
        assert_eq!(stored.reporter, input.reporter);
    }

    #[tokio::test]
    async fn should_return_none_for_unknown_id() {
        // given
        let fixture = Fixture::new();

        // when
        let result = fixture.store.get("g1", "nope").await.unwrap();

        // then
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn should_write_index_before_record() {
        // given
        let fixture = Fixture::new();

        // when
        let id = fixture.store.add("g1", excuse("t", "u1")).await.unwrap();

        // then
        let keys = KeySpace::new("test");
        let ids = fixture
            .storage
            .zrevrange(&keys.index_key("g1"), 0, -1)
            .await
            .unwrap();
        assert_eq!(ids, vec![id.clone()]);
        let record = fixture
            .storage
            .hget(&keys.record_key("g1"), &id)
            .await
            .unwrap();
        assert!(record.is_some());
    }

    #[tokio::test]
    async fn should_list_single_excuse_with_meta() {
        // given
        let fixture = Fixture::new();
        fixture.store.add("g1", excuse("t", "u1")).await.unwrap();

        // when
        let page = fixture.store.get_all("g1", 1).await.unwrap();

        // then
        assert_eq!(page.excuses.len(), 1);
        assert_eq!(page.excuses[0].title, "t");
        assert!(!page.excuses[0].id.is_empty());
        assert_eq!(
            page.meta,
            Meta {
                current_page: 1,
                prev_page: None,
                next_page: None,
                total_pages: 1,
                total_count: 1,
            }
        );
    }

    #[tokio::test]
    async fn should_list_newest_first_in_pages() {
        // given
        let fixture = Fixture::new();
        fixture.add_many("g1", &titles(25), "u1").await;

        // when
        let first = fixture.store.get_all("g1", 1).await.unwrap();
        let last = fixture.store.get_all("g1", 3).await.unwrap();

        // then
        let first_titles: Vec<_> = first.excuses.iter().map(|e| e.title.as_str()).collect();
        let expected: Vec<String> = (15..25).rev().map(|i| format!("excuse-{}", i)).collect();
        assert_eq!(first_titles, expected);
        assert_eq!(first.meta.total_count, 25);
        assert_eq!(first.meta.total_pages, 3);
        assert_eq!(first.meta.next_page, Some(2));
        assert_eq!(first.meta.prev_page, None);

        let last_titles: Vec<_> = last.excuses.iter().map(|e| e.title.as_str()).collect();
        let expected: Vec<String> = (0..5).rev().map(|i| format!("excuse-{}", i)).collect();
        assert_eq!(last_titles, expected);
        assert_eq!(last.meta.next_page, None);
        assert_eq!(last.meta.prev_page, Some(2));
    }

    #[tokio::test]
    async fn should_return_empty_page_with_meta_past_the_end() {
        // given
        let fixture = Fixture::new();
        fixture.add_many("g1", &titles(3), "u1").await;

        // when
        let page = fixture.store.get_all("g1", 5).await.unwrap();

        // then
        assert!(page.excuses.is_empty());
        assert_eq!(page.meta.current_page, 5);
        assert_eq!(page.meta.total_pages, 1);
        assert_eq!(page.meta.total_count, 3);
        assert_eq!(page.meta.prev_page, Some(4));
        assert_eq!(page.meta.next_page, None);
    }

    #[tokio::test]
    async fn should_list_empty_source() {
        // given
        let fixture = Fixture::new();

        // when
        let page = fixture.store.get_all("empty", 1).await.unwrap();

        // then
        assert!(page.excuses.is_empty());
        assert_eq!(page.meta.total_pages, 0);
        assert_eq!(page.meta.total_count, 0);
        assert_eq!(page.meta.next_page, None);
        assert_eq!(page.meta.prev_page, None);
    }

    #[tokio::test]
    async fn should_saturate_page_zero_to_first_page() {
        // given
        let fixture = Fixture::new();
        fixture.add_many("g1", &titles(2), "u1").await;

        // when
        let page = fixture.store.get_all("g1", 0).await.unwrap();

        // then
        assert_eq!(page.excuses.len(), 2);
    }

    #[tokio::test]
    async fn should_use_configured_page_size() {
        // given
        let storage = Arc::new(InMemoryStorage::new());
        let clock = Arc::new(MockClock::with_millis(1));
        let config = Config {
            page_size: 3,
            ..test_config()
        };
        let store = ExcuseStore::with_clock(storage, &config, clock.clone());
        for title in titles(7) {
            clock.advance(Duration::from_millis(1));
            store.add("g1", excuse(&title, "u1")).await.unwrap();
        }

        // when
        let page = store.get_all("g1", 3).await.unwrap();

        // then
        assert_eq!(page.excuses.len(), 1);
        assert_eq!(page.excuses[0].title, "excuse-0");
        assert_eq!(page.meta.total_pages, 3);
    }

    #[tokio::test]
    async fn should_keep_sources_apart() {
        // given
        let fixture = Fixture::new();
        let id = fixture.store.add("g1", excuse("t", "u1")).await.unwrap();

        // when
        let other = fixture.store.get_all("g2", 1).await.unwrap();
        let cross = fixture.store.get("g2", &id).await.unwrap();

        // then
        assert!(other.excuses.is_empty());
        assert!(cross.is_none());
    }

    #[tokio::test]
    async fn should_skip_orphaned_and_undecodable_records_in_pages() {
        // given
        let fixture = Fixture::new();
        let keys = KeySpace::new("test");
        let ids = fixture.add_many("g1", &titles(3), "u1").await;
        fixture
            .storage
            .hdel(&keys.record_key("g1"), &ids[1])
            .await
            .unwrap();
        fixture
            .storage
            .hset(&keys.record_key("g1"), &ids[2], Bytes::from("not json"))
            .await
            .unwrap();

        // when
        let page = fixture.store.get_all("g1", 1).await.unwrap();

        // then
        assert_eq!(page.excuses.len(), 1);
        assert_eq!(page.excuses[0].id, ids[0]);
        assert_eq!(page.meta.total_count, 3);
    }

    #[tokio::test]
    async fn should_fail_get_on_undecodable_record() {
        // given
        let fixture = Fixture::new();
        let keys = KeySpace::new("test");
        fixture
            .storage
            .hset(&keys.record_key("g1"), "bad", Bytes::from("{"))
            .await
            .unwrap();

        // when
        let result = fixture.store.get("g1", "bad").await;

        // then
        assert!(matches!(result, Err(Error::Encoding(_))));
    }

    #[tokio::test]
    async fn should_return_none_for_random_on_empty_source() {
        // given
        let fixture = Fixture::new();

        // when
        let result = fixture.store.get_random("empty").await.unwrap();

        // then
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn should_pick_random_excuse_from_source() {
        // given
        let fixture = Fixture::new();
        let ids: HashSet<String> = fixture
            .add_many("g1", &titles(5), "u1")
            .await
            .into_iter()
            .collect();

        // when
        let mut picked = HashSet::new();
        for _ in 0..200 {
            let excuse = fixture.store.get_random("g1").await.unwrap().unwrap();
            picked.insert(excuse.id);
        }

        // then
        assert!(picked.is_subset(&ids));
        assert!(picked.len() > 1);
    }

    #[tokio::test]
    async fn should_return_none_for_random_orphan() {
        // given
        let fixture = Fixture::new();
        let keys = KeySpace::new("test");
        fixture
            .storage
            .zadd(&keys.index_key("g1"), "orphan", 1.0)
            .await
            .unwrap();

        // when
        let result = fixture.store.get_random("g1").await.unwrap();

        // then
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn should_filter_by_author() {
        // given
        let fixture = Fixture::new();
        let mine: HashSet<String> = fixture
            .add_many("g1", &titles(3), "u1")
            .await
            .into_iter()
            .collect();
        fixture.add_many("g1", &titles(2), "u2").await;
        fixture.add_many("g2", &titles(2), "u1").await;

        // when
        let excuses = fixture.store.get_by_user("g1", "u1").await.unwrap();

        // then
        let found: HashSet<String> = excuses.iter().map(|e| e.id.clone()).collect();
        assert_eq!(found, mine);
        assert!(excuses.iter().all(|e| e.author.id == "u1"));
    }

    #[tokio::test]
    async fn should_return_empty_list_for_unknown_user() {
        // given
        let fixture = Fixture::new();
        fixture.add_many("g1", &titles(2), "u1").await;

        // when
        let excuses = fixture.store.get_by_user("g1", "ghost").await.unwrap();

        // then
        assert!(excuses.is_empty());
    }

    #[tokio::test]
    async fn should_delete_from_record_and_index() {
        // given
        let fixture = Fixture::new();
        let ids = fixture.add_many("g1", &titles(2), "u1").await;

        // when
        fixture.store.delete("g1", &ids[0]).await.unwrap();

        // then
        assert!(fixture.store.get("g1", &ids[0]).await.unwrap().is_none());
        let page = fixture.store.get_all("g1", 1).await.unwrap();
        assert_eq!(page.meta.total_count, 1);
        assert_eq!(page.excuses[0].id, ids[1]);
    }

    #[tokio::test]
    async fn should_delete_idempotently() {
        // given
        let fixture = Fixture::new();
        let id = fixture.store.add("g1", excuse("t", "u1")).await.unwrap();
        fixture.store.delete("g1", &id).await.unwrap();

        // when
        let again = fixture.store.delete("g1", &id).await;
        let never = fixture.store.delete("g1", "never-existed").await;

        // then
        assert!(again.is_ok());
        assert!(never.is_ok());
    }

    /// Storage double whose every call fails with the configured error, or
    /// sleeps for `delay` before succeeding with empty results.
    struct BrokenStorage {
        error: Option<StorageError>,
        delay: Duration,
    }

    impl BrokenStorage {
        fn failing(error: StorageError) -> Self {
            Self {
                error: Some(error),
                delay: Duration::ZERO,
            }
        }

        fn slow(delay: Duration) -> Self {
            Self { error: None, delay }
        }

        async fn respond<T: Default>(&self) -> StorageResult<T> {
            tokio::time::sleep(self.delay).await;
            match &self.error {
                Some(e) => Err(e.clone()),
                None => Ok(T::default()),
            }
        }
    }

    #[async_trait]
    impl StorageRead for BrokenStorage {
        async fn hget(&self, _key: &str, _field: &str) -> StorageResult<Option<Bytes>> {
            self.respond().await
        }

        async fn hmget(&self, _key: &str, _fields: &[String]) -> StorageResult<Vec<Option<Bytes>>> {
            self.respond().await
        }

        async fn hgetall(&self, _key: &str) -> StorageResult<HashMap<String, Bytes>> {
            self.respond().await
        }

        async fn zrevrange(&self, _key: &str, _start: isize, _stop: isize) -> StorageResult<Vec<String>> {
            self.respond().await
        }
    }

    #[async_trait]
    impl Storage for BrokenStorage {
        async fn hset(&self, _key: &str, _field: &str, _value: Bytes) -> StorageResult<bool> {
            self.respond().await
        }

        async fn hdel(&self, _key: &str, _field: &str) -> StorageResult<bool> {
            self.respond().await
        }

        async fn zadd(&self, _key: &str, _member: &str, _score: f64) -> StorageResult<bool> {
            self.respond().await
        }

        async fn zrem(&self, _key: &str, _member: &str) -> StorageResult<bool> {
            self.respond().await
        }
    }

    fn store_over(storage: BrokenStorage, timeout: Duration) -> ExcuseStore {
        let config = Config {
            request_timeout: timeout,
            ..test_config()
        };
        ExcuseStore::new(Arc::new(storage), &config)
    }

    #[tokio::test]
    async fn should_report_read_failure_with_operation_and_key() {
        // given
        let store = store_over(
            BrokenStorage::failing(StorageError::Storage("boom".to_string())),
            Duration::from_secs(1),
        );

        // when
        let result = store.get("g1", "id").await;

        // then
        match result {
            Err(Error::ReadFailed { op, key, .. }) => {
                assert_eq!(op, "HGET");
                assert_eq!(key, "hook_manager:test:Codexcuse:source:g1");
            }
            other => panic!("expected read failure, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn should_report_write_failure_on_add() {
        // given
        let store = store_over(
            BrokenStorage::failing(StorageError::Storage("boom".to_string())),
            Duration::from_secs(1),
        );

        // when
        let result = store.add("g1", excuse("t", "u1")).await;

        // then
        assert!(matches!(result, Err(Error::WriteFailed { op: "ZADD", .. })));
    }

    #[tokio::test]
    async fn should_report_write_failure_on_delete() {
        // given
        let store = store_over(
            BrokenStorage::failing(StorageError::Internal("poisoned".to_string())),
            Duration::from_secs(1),
        );

        // when
        let result = store.delete("g1", "id").await;

        // then
        assert!(matches!(result, Err(Error::WriteFailed { op: "HDEL", .. })));
    }

    #[tokio::test]
    async fn should_report_unavailable_backend() {
        // given
        let store = store_over(
            BrokenStorage::failing(StorageError::Unavailable("connection refused".to_string())),
            Duration::from_secs(1),
        );

        // when
        let list = store.get_all("g1", 1).await;
        let by_user = store.get_by_user("g1", "u1").await;

        // then
        assert!(matches!(list, Err(Error::BackendUnavailable(_))));
        assert!(matches!(by_user, Err(Error::BackendUnavailable(_))));
    }

    #[tokio::test]
    async fn should_fail_when_backend_exceeds_timeout() {
        // given
        let store = store_over(
            BrokenStorage::slow(Duration::from_secs(5)),
            Duration::from_millis(20),
        );

        // when
        let read = store.get_random("g1").await;
        let write = store.add("g1", excuse("t", "u1")).await;

        // then
        assert!(matches!(read, Err(Error::ReadFailed { op: "ZREVRANGE", .. })));
        assert!(matches!(write, Err(Error::WriteFailed { op: "ZADD", .. })));
    }

    #[tokio::test]
    async fn should_reject_add_when_index_reports_existing_member() {
        // given
        // Every call succeeds with `false`, so ZADD claims the id was present.
        let store = store_over(BrokenStorage::slow(Duration::ZERO), Duration::from_secs(1));

        // when
        let result = store.add("g1", excuse("t", "u1")).await;

        // then
        assert!(matches!(result, Err(Error::WriteFailed { op: "ZADD", .. })));
    }

    #[tokio::test]
    async fn should_open_in_memory_store() {
        // given
        let store = ExcuseStore::open(test_config()).await.unwrap();

        // when
        let id = store.add("g1", excuse("t", "u1")).await.unwrap();

        // then
        assert!(store.get("g1", &id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn should_fail_to_open_without_redis_url() {
        // given
        let config = Config {
            storage: common::StorageConfig::Redis(common::RedisStorageConfig {
                url: String::new(),
                pool_size: 1,
            }),
            ..Config::default()
        };

        // when
        let result = ExcuseStore::open(config).await;

        // then
        assert!(matches!(result, Err(Error::BackendUnavailable(_))));
    }
}
