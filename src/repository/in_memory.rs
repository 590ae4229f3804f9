//! InMemoryRepository - Vec-backed record store for mock services.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use tracing::debug;

use super::latency::{LatencyProfile, Operation};
use super::repository::{Filter, Repository};
use crate::error::RepositoryError;
use crate::record::{next_id, now, sort_natural, Record, RecordId};

/// In-memory repository backed by a Vec, in insertion order.
///
/// Every operation waits out its simulated latency before touching the
/// records. Clone-friendly via Arc; clones share storage.
#[derive(Clone)]
pub struct InMemoryRepository<T> {
    records: Arc<RwLock<Vec<T>>>,
    latency: LatencyProfile,
}

impl<T: Record> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Record> InMemoryRepository<T> {
    /// Create an empty repository with no simulated latency.
    pub fn new() -> Self {
        Self::with_records(Vec::new(), LatencyProfile::none())
    }

    /// Create an empty repository with the given latency.
    pub fn with_latency(latency: LatencyProfile) -> Self {
        Self::with_records(Vec::new(), latency)
    }

    /// Create a repository seeded with `records`. Their ids are kept as-is.
    pub fn with_records(records: Vec<T>, latency: LatencyProfile) -> Self {
        Self {
            records: Arc::new(RwLock::new(records)),
            latency,
        }
    }

    pub fn latency(&self) -> &LatencyProfile {
        &self.latency
    }

    /// Apply `mutate` to the record with this id. Returns false if absent.
    pub async fn modify<F>(&self, id: RecordId, mutate: F) -> Result<bool, RepositoryError>
    where
        F: FnOnce(&mut T) + Send,
    {
        self.modify_if(id, |record| {
            mutate(record);
            true
        })
        .await
    }

    /// Like [`modify`](Self::modify), but the closure reports whether it
    /// applied a change. Returns false if the record is absent or the closure
    /// declined.
    pub async fn modify_if<F>(&self, id: RecordId, mutate: F) -> Result<bool, RepositoryError>
    where
        F: FnOnce(&mut T) -> bool + Send,
    {
        self.latency.wait(Operation::Mutate).await;
        self.modify_now(id, mutate)
    }

    fn read(&self, operation: Operation) -> Result<RwLockReadGuard<'_, Vec<T>>, RepositoryError> {
        self.records
            .read()
            .map_err(|_| RepositoryError::LockPoisoned(operation.as_str()))
    }

    fn write(
        &self,
        operation: Operation,
    ) -> Result<RwLockWriteGuard<'_, Vec<T>>, RepositoryError> {
        self.records
            .write()
            .map_err(|_| RepositoryError::LockPoisoned(operation.as_str()))
    }

    fn list_now(&self, filter: Option<&Filter<'_, T>>) -> Result<Vec<T>, RepositoryError> {
        let records = self.read(Operation::List)?;
        let mut selected: Vec<T> = records
            .iter()
            .filter(|record| filter.map_or(true, |accept| accept(*record)))
            .cloned()
            .collect();
        sort_natural(&mut selected);
        debug!(
            collection = T::COLLECTION,
            count = selected.len(),
            "listed records"
        );
        Ok(selected)
    }

    fn get_now(&self, id: RecordId) -> Result<Option<T>, RepositoryError> {
        let records = self.read(Operation::Get)?;
        Ok(records.iter().find(|record| record.id() == id).cloned())
    }

    fn create_now(&self, mut record: T) -> Result<T, RepositoryError> {
        let mut records = self.write(Operation::Create)?;
        let id = next_id(records.iter())
            .ok_or(RepositoryError::IdsExhausted(T::COLLECTION))?;
        record.set_id(id);
        record.stamp_created(now());
        records.push(record.clone());
        debug!(collection = T::COLLECTION, id, "record created");
        Ok(record)
    }

    fn update_now(&self, record: T) -> Result<bool, RepositoryError> {
        let mut records = self.write(Operation::Update)?;
        let id = record.id();
        match records.iter_mut().find(|existing| existing.id() == id) {
            Some(slot) => {
                *slot = record;
                debug!(collection = T::COLLECTION, id, "record updated");
                Ok(true)
            }
            None => {
                debug!(
                    collection = T::COLLECTION,
                    id,
                    "update skipped, no such record"
                );
                Ok(false)
            }
        }
    }

    fn delete_now(&self, id: RecordId) -> Result<bool, RepositoryError> {
        let mut records = self.write(Operation::Delete)?;
        match records.iter().position(|record| record.id() == id) {
            Some(index) => {
                records.remove(index);
                debug!(collection = T::COLLECTION, id, "record deleted");
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn modify_now<F>(&self, id: RecordId, mutate: F) -> Result<bool, RepositoryError>
    where
        F: FnOnce(&mut T) -> bool,
    {
        let mut records = self.write(Operation::Mutate)?;
        let applied = match records.iter_mut().find(|record| record.id() == id) {
            Some(record) => mutate(record),
            None => false,
        };
        debug!(collection = T::COLLECTION, id, applied, "record modified");
        Ok(applied)
    }
}

#[async_trait]
impl<T: Record> Repository<T> for InMemoryRepository<T> {
    async fn list(&self, filter: Option<&Filter<'_, T>>) -> Result<Vec<T>, RepositoryError> {
        self.latency.wait(Operation::List).await;
        self.list_now(filter)
    }

    async fn get_by_id(&self, id: RecordId) -> Result<Option<T>, RepositoryError> {
        self.latency.wait(Operation::Get).await;
        self.get_now(id)
    }

    async fn create(&self, record: T) -> Result<T, RepositoryError> {
        self.latency.wait(Operation::Create).await;
        self.create_now(record)
    }

    async fn update(&self, record: T) -> Result<bool, RepositoryError> {
        self.latency.wait(Operation::Update).await;
        self.update_now(record)
    }

    async fn delete(&self, id: RecordId) -> Result<bool, RepositoryError> {
        self.latency.wait(Operation::Delete).await;
        self.delete_now(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Timestamp;
    use serde::{Deserialize, Serialize};

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    struct Task {
        id: RecordId,
        title: String,
        rank: i32,
        created_at: Option<Timestamp>,
    }

    impl Record for Task {
        const COLLECTION: &'static str = "tasks";

        fn id(&self) -> RecordId {
            self.id
        }

        fn set_id(&mut self, id: RecordId) {
            self.id = id;
        }

        fn stamp_created(&mut self, now: Timestamp) {
            self.created_at = Some(now);
        }

        fn natural_order(&self, other: &Self) -> std::cmp::Ordering {
            self.rank.cmp(&other.rank).then(self.id.cmp(&other.id))
        }
    }

    fn task(title: &str, rank: i32) -> Task {
        Task {
            id: 0,
            title: title.into(),
            rank,
            created_at: None,
        }
    }

    #[tokio::test]
    async fn create_assigns_sequential_ids() {
        let repo = InMemoryRepository::new();
        let a = repo.create(task("a", 0)).await.unwrap();
        let b = repo.create(task("b", 0)).await.unwrap();
        let c = repo.create(task("c", 0)).await.unwrap();
        assert_eq!((a.id, b.id, c.id), (1, 2, 3));
    }

    #[tokio::test]
    async fn create_ignores_client_id_and_stamps_time() {
        let repo = InMemoryRepository::new();
        let mut input = task("a", 0);
        input.id = 77;
        let created = repo.create(input).await.unwrap();
        assert_eq!(created.id, 1);
        assert!(created.created_at.is_some());
    }

    #[tokio::test]
    async fn create_after_delete_reuses_nothing_below_max() {
        let repo = InMemoryRepository::new();
        for name in ["a", "b", "c"] {
            repo.create(task(name, 0)).await.unwrap();
        }
        assert!(repo.delete(2).await.unwrap());
        let d = repo.create(task("d", 0)).await.unwrap();
        assert_eq!(d.id, 4);
    }

    #[tokio::test]
    async fn list_sorts_and_filters() {
        let repo = InMemoryRepository::new();
        repo.create(task("low", 5)).await.unwrap();
        repo.create(task("high", 1)).await.unwrap();
        repo.create(task("mid", 3)).await.unwrap();

        let all = repo.list_all().await.unwrap();
        let titles: Vec<_> = all.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["high", "mid", "low"]);

        let over_two: &Filter<'_, Task> = &|t: &Task| t.rank > 2;
        let filtered = repo.list(Some(over_two)).await.unwrap();
        assert_eq!(filtered.len(), 2);
        assert_eq!(repo.count(over_two).await.unwrap(), 2);
        assert_eq!(
            repo.find_one(over_two).await.unwrap().map(|t| t.title),
            Some("mid".to_string())
        );
    }

    #[tokio::test]
    async fn filters_may_borrow_local_state() {
        let repo = InMemoryRepository::new();
        repo.create(task("mild", 1)).await.unwrap();
        repo.create(task("hot", 2)).await.unwrap();
        repo.create(task("minor", 3)).await.unwrap();

        let needle = String::from("mi");
        let matches: &Filter<'_, Task> = &|t: &Task| t.title.contains(needle.as_str());
        let store: &dyn Repository<Task> = &repo;
        let found = store.list(Some(matches)).await.unwrap();
        let titles: Vec<_> = found.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["mild", "minor"]);
        assert_eq!(store.count(matches).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn create_past_the_last_id_fails_cleanly() {
        let mut last = task("last", 0);
        last.id = RecordId::MAX;
        let repo = InMemoryRepository::with_records(vec![last], LatencyProfile::none());

        let err = repo.create(task("overflow", 0)).await.unwrap_err();
        assert_eq!(err, RepositoryError::IdsExhausted("tasks"));

        let all = repo.list_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id, RecordId::MAX);
    }

    #[tokio::test]
    async fn update_replaces_in_place() {
        let repo = InMemoryRepository::new();
        let mut created = repo.create(task("a", 0)).await.unwrap();
        created.title = "renamed".into();
        assert!(repo.update(created).await.unwrap());
        assert_eq!(repo.get_by_id(1).await.unwrap().unwrap().title, "renamed");
    }

    #[tokio::test]
    async fn update_missing_is_a_noop() {
        let repo = InMemoryRepository::new();
        repo.create(task("a", 0)).await.unwrap();
        let before = repo.list_all().await.unwrap();

        let mut ghost = task("ghost", 0);
        ghost.id = 42;
        assert!(!repo.update(ghost).await.unwrap());
        assert_eq!(repo.list_all().await.unwrap(), before);
    }

    #[tokio::test]
    async fn delete_twice() {
        let repo = InMemoryRepository::new();
        repo.create(task("a", 0)).await.unwrap();
        repo.create(task("b", 0)).await.unwrap();
        assert!(repo.delete(1).await.unwrap());
        assert!(!repo.delete(1).await.unwrap());
        let remaining = repo.list_all().await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, 2);
    }

    #[tokio::test]
    async fn get_missing_returns_none() {
        let repo: InMemoryRepository<Task> = InMemoryRepository::new();
        assert!(repo.get_by_id(9).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn modify_reports_existence() {
        let repo = InMemoryRepository::new();
        repo.create(task("a", 0)).await.unwrap();
        assert!(repo.modify(1, |t| t.rank = 9).await.unwrap());
        assert!(!repo.modify(2, |t| t.rank = 9).await.unwrap());
        assert!(!repo.modify_if(1, |_| false).await.unwrap());
        assert_eq!(repo.get_by_id(1).await.unwrap().unwrap().rank, 9);
    }

    #[tokio::test]
    async fn clone_shares_storage() {
        let repo = InMemoryRepository::new();
        let clone = repo.clone();
        repo.create(task("a", 0)).await.unwrap();
        assert_eq!(clone.list_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn usable_as_trait_object() {
        let repo: Box<dyn Repository<Task>> = Box::new(InMemoryRepository::new());
        repo.create(task("a", 0)).await.unwrap();
        assert_eq!(repo.list_all().await.unwrap().len(), 1);
    }
}
