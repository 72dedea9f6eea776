// ── Generic record collection ──
//
// Order-preserving storage keyed by `RecordId`. New records go to the
// front, removals keep the relative order of everything else.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use indexmap::IndexMap;

use crate::error::CoreError;
use crate::model::{Alert, RecordId, Report};

/// A record that lives in an [`EntityCollection`].
pub trait Record: Clone + Send + Sync + 'static {
    fn id(&self) -> RecordId;
}

impl Record for Alert {
    fn id(&self) -> RecordId {
        self.id
    }
}

impl Record for Report {
    fn id(&self) -> RecordId {
        self.id
    }
}

/// The repository behind one mutable fixture collection.
///
/// Critical sections are short and never span an `.await`.
pub(crate) struct EntityCollection<T: Record> {
    /// Primary storage in display order: Id -> record.
    entries: RwLock<IndexMap<RecordId, Arc<T>>>,
}

impl<T: Record> EntityCollection<T> {
    #[cfg(test)]
    pub(crate) fn new() -> Self {
        Self::from_records(Vec::new())
    }

    /// Seed a collection, keeping the given order. A later duplicate Id
    /// replaces the earlier record in place.
    pub(crate) fn from_records(records: Vec<T>) -> Self {
        let entries: IndexMap<RecordId, Arc<T>> = records
            .into_iter()
            .map(|r| (r.id(), Arc::new(r)))
            .collect();
        Self {
            entries: RwLock::new(entries),
        }
    }

    /// Look up a record by Id.
    pub(crate) fn get(&self, id: RecordId) -> Result<Option<Arc<T>>, CoreError> {
        Ok(self.read()?.get(&id).cloned())
    }

    /// Assign the next Id (`max + 1`, or `1` when empty), build the record
    /// with it, and insert it at the front. Id assignment and insertion
    /// happen under one write lock.
    pub(crate) fn insert_front_with(
        &self,
        build: impl FnOnce(RecordId) -> T,
    ) -> Result<Arc<T>, CoreError> {
        let mut entries = self.write()?;
        let id = next_id(entries.keys().copied())?;
        let record = Arc::new(build(id));
        entries.shift_insert(0, id, Arc::clone(&record));
        Ok(record)
    }

    /// Replace the record stored under `id` in place, keeping its position.
    /// Returns `None` if no such record exists.
    pub(crate) fn modify(
        &self,
        id: RecordId,
        f: impl FnOnce(T) -> T,
    ) -> Result<Option<Arc<T>>, CoreError> {
        let mut entries = self.write()?;
        let Some(slot) = entries.get_mut(&id) else {
            return Ok(None);
        };
        let merged = Arc::new(f(T::clone(slot)));
        *slot = Arc::clone(&merged);
        Ok(Some(merged))
    }

    /// Remove a record by Id. Returns the removed record if it existed.
    pub(crate) fn remove(&self, id: RecordId) -> Result<Option<Arc<T>>, CoreError> {
        Ok(self.write()?.shift_remove(&id))
    }

    /// Every record in display order.
    pub(crate) fn snapshot(&self) -> Result<Vec<Arc<T>>, CoreError> {
        Ok(self.read()?.values().cloned().collect())
    }

    /// Record count. Reads through a poisoned lock.
    pub(crate) fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // ── Private helpers ──────────────────────────────────────────────

    fn read(&self) -> Result<RwLockReadGuard<'_, IndexMap<RecordId, Arc<T>>>, CoreError> {
        self.entries
            .read()
            .map_err(|_| CoreError::Internal("record collection lock poisoned".into()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, IndexMap<RecordId, Arc<T>>>, CoreError> {
        self.entries
            .write()
            .map_err(|_| CoreError::Internal("record collection lock poisoned".into()))
    }
}

/// `max(ids) + 1`, or [`RecordId::FIRST`] for an empty collection.
fn next_id(ids: impl Iterator<Item = RecordId>) -> Result<RecordId, CoreError> {
    match ids.max() {
        None => Ok(RecordId::FIRST),
        Some(max) => max
            .next()
            .ok_or_else(|| CoreError::Internal(format!("record id space exhausted after {max}"))),
    }
}
