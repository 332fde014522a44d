//! In-process record store
//!
//! Mirrors the behaviour of the reference `/customers` backend: ids are
//! assigned sequentially from 1, emails are unique (exact match), and
//! listing returns records in insertion order.

use crate::error::StoreError;
use crate::store::RecordStore;
use crate::types::{RecordId, StoredRecord};
use async_trait::async_trait;
use parking_lot::RwLock;
use signup_schema::Record;

#[derive(Debug)]
struct Inner {
    records: Vec<StoredRecord>,
    next_id: RecordId,
}

impl Default for Inner {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            next_id: 1,
        }
    }
}

/// Thread-safe in-memory store
#[derive(Debug, Default)]
pub struct MemoryRecordStore {
    inner: RwLock<Inner>,
}

impl MemoryRecordStore {
    /// Create an empty store
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-filled with records
    ///
    /// # Errors
    /// `StoreError::Conflict` if two records share an email.
    pub fn with_records(records: impl IntoIterator<Item = Record>) -> Result<Self, StoreError> {
        let store = Self::new();
        for record in records {
            store.insert(record)?;
        }
        Ok(store)
    }

    /// Insert a record, enforcing email uniqueness
    ///
    /// # Errors
    /// `StoreError::Conflict` if the email is already stored.
    pub fn insert(&self, record: Record) -> Result<StoredRecord, StoreError> {
        let mut inner = self.inner.write();

        if inner.records.iter().any(|r| r.email == record.email) {
            return Err(StoreError::Conflict {
                email: record.email,
            });
        }

        let stored = StoredRecord::new(inner.next_id, record);
        inner.next_id += 1;
        inner.records.push(stored.clone());
        tracing::debug!(id = stored.id, "stored record");
        Ok(stored)
    }

    /// Replace every record, keeping the id sequence
    ///
    /// Records whose email collides with an earlier one in `records` are
    /// skipped.
    pub fn replace_all(&self, records: impl IntoIterator<Item = Record>) -> Vec<StoredRecord> {
        self.inner.write().records.clear();
        records
            .into_iter()
            .filter_map(|record| match self.insert(record) {
                Ok(stored) => Some(stored),
                Err(err) => {
                    tracing::warn!("skipping record while reseeding: {}", err);
                    None
                }
            })
            .collect()
    }

    /// Snapshot of stored records
    #[must_use]
    pub fn records(&self) -> Vec<StoredRecord> {
        self.inner.read().records.clone()
    }

    /// Number of stored records
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.read().records.len()
    }

    /// True when nothing is stored
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.read().records.is_empty()
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn create(&self, record: &Record) -> Result<StoredRecord, StoreError> {
        self.insert(record.clone())
    }

    async fn list(&self) -> Result<Vec<StoredRecord>, StoreError> {
        Ok(self.records())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ana() -> Record {
        Record::new("Ana", "ana@x.com", 30)
    }

    #[test]
    fn ids_are_sequential_from_one() {
        let store = MemoryRecordStore::new();
        let first = store.insert(ana()).unwrap();
        let second = store.insert(Record::new("Bo", "bo@y.org", 41)).unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn duplicate_email_conflicts() {
        let store = MemoryRecordStore::new();
        store.insert(ana()).unwrap();

        let err = store
            .insert(Record::new("Other", "ana@x.com", 50))
            .unwrap_err();
        assert_eq!(
            err,
            StoreError::Conflict {
                email: "ana@x.com".to_string()
            }
        );
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn email_uniqueness_is_exact_match() {
        let store = MemoryRecordStore::new();
        store.insert(ana()).unwrap();
        assert!(store.insert(Record::new("Ana", "Ana@x.com", 30)).is_ok());
    }

    #[test]
    fn with_records_rejects_duplicates() {
        let result = MemoryRecordStore::with_records([ana(), ana()]);
        assert!(matches!(result, Err(StoreError::Conflict { .. })));
    }

    #[test]
    fn replace_all_keeps_id_sequence() {
        let store = MemoryRecordStore::with_records([ana()]).unwrap();
        let replaced = store.replace_all([
            Record::new("Bo", "bo@y.org", 41),
            Record::new("Bo again", "bo@y.org", 42),
        ]);

        assert_eq!(replaced.len(), 1);
        assert_eq!(replaced[0].id, 2);
        assert_eq!(store.records(), replaced);
    }

    #[tokio::test]
    async fn trait_create_then_list() {
        let store = MemoryRecordStore::new();
        let created = store.create(&ana()).await.unwrap();
        let listed = store.list().await.unwrap();

        assert_eq!(listed, vec![created]);
    }
}
