use async_trait::async_trait;

use crate::error::RepositoryError;
use crate::record::{Record, RecordId};

/// Caller-supplied predicate for `list`.
pub type Filter<'a, T> = dyn Fn(&T) -> bool + Send + Sync + 'a;

/// The CRUD contract every entity store satisfies.
///
/// A missing id is a normal outcome: `get_by_id` returns `None`, `update` and
/// `delete` return `false`. `Err` is reserved for unexpected failures.
#[async_trait]
pub trait Repository<T: Record>: Send + Sync {
    /// All records accepted by `filter`, in the record's natural order.
    async fn list(&self, filter: Option<&Filter<'_, T>>) -> Result<Vec<T>, RepositoryError>;

    /// Look up one record by id.
    async fn get_by_id(&self, id: RecordId) -> Result<Option<T>, RepositoryError>;

    /// Assign a fresh id, stamp the creation time and append.
    /// Returns the record as stored.
    async fn create(&self, record: T) -> Result<T, RepositoryError>;

    /// Replace the record with the same id in place. Returns false if absent.
    async fn update(&self, record: T) -> Result<bool, RepositoryError>;

    /// Remove the record with this id. Returns false if absent.
    async fn delete(&self, id: RecordId) -> Result<bool, RepositoryError>;

    /// Every record, in natural order.
    async fn list_all(&self) -> Result<Vec<T>, RepositoryError> {
        self.list(None).await
    }

    /// First record (in natural order) matching `predicate`.
    async fn find_one(&self, predicate: &Filter<'_, T>) -> Result<Option<T>, RepositoryError> {
        Ok(self.list(Some(predicate)).await?.into_iter().next())
    }

    /// Number of records matching `predicate`.
    async fn count(&self, predicate: &Filter<'_, T>) -> Result<usize, RepositoryError> {
        Ok(self.list(Some(predicate)).await?.len())
    }
}
