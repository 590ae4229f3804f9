//! Record - the identity and ordering contract every stored entity satisfies.

use std::cmp::Ordering;

use serde::{de::DeserializeOwned, Serialize};

/// Repository-assigned identifier. Never supplied by the client.
pub type RecordId = u32;

/// Local wall-clock timestamp used by every entity.
pub type Timestamp = chrono::NaiveDateTime;

/// Trait for types that can be stored in a repository.
///
/// Usually implemented with `#[derive(Record)]`.
pub trait Record: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// The collection name for this record type (e.g., "calendar_events", "posts").
    /// Doubles as the resource path for HTTP-backed repositories.
    const COLLECTION: &'static str;

    /// Returns the identifier of this record.
    fn id(&self) -> RecordId;

    /// Overwrites the identifier. Only repositories call this, on create.
    fn set_id(&mut self, id: RecordId);

    /// Stamp the creation time. Called by repositories on create.
    fn stamp_created(&mut self, _now: Timestamp) {}

    /// The natural ordering of this record kind. Defaults to creation order.
    fn natural_order(&self, other: &Self) -> Ordering {
        self.id().cmp(&other.id())
    }
}

/// Current local wall-clock time.
pub fn now() -> Timestamp {
    chrono::Local::now().naive_local()
}

/// Next identifier for a collection: `max(ids) + 1`, or `1` when empty.
/// `None` once the id space is used up.
pub fn next_id<'a, T: Record>(records: impl IntoIterator<Item = &'a T>) -> Option<RecordId> {
    match records.into_iter().map(|record| record.id()).max() {
        Some(max) => max.checked_add(1),
        None => Some(1),
    }
}

/// Sort records by their natural order.
pub fn sort_natural<T: Record>(records: &mut [T]) {
    records.sort_by(|a, b| a.natural_order(b));
}
