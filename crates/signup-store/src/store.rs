//! The record store seam

use crate::error::StoreError;
use crate::types::StoredRecord;
use async_trait::async_trait;
use signup_schema::Record;
use std::sync::Arc;

/// Create/list persistence collaborator
///
/// Implementations own the persistent record set. Callers never mutate
/// records locally; they re-read with [`list`](Self::list) after a create
/// is acknowledged.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Persist a record, returning it with its assigned id
    ///
    /// # Errors
    /// - `StoreError::Conflict` if the email is already stored
    /// - transport, status or decode errors from remote stores
    async fn create(&self, record: &Record) -> Result<StoredRecord, StoreError>;

    /// All stored records in insertion order
    async fn list(&self) -> Result<Vec<StoredRecord>, StoreError>;
}

#[async_trait]
impl<S: RecordStore + ?Sized> RecordStore for Arc<S> {
    async fn create(&self, record: &Record) -> Result<StoredRecord, StoreError> {
        (**self).create(record).await
    }

    async fn list(&self) -> Result<Vec<StoredRecord>, StoreError> {
        (**self).list().await
    }
}
