//! Testing utilities for the sign-up workspace
//!
//! Shared fixtures and a scripted record store.

#![allow(missing_docs)]

use async_trait::async_trait;
use parking_lot::Mutex;
use signup_schema::{Candidate, Record};
use signup_store::{RecordStore, StoreError, StoredRecord};
use std::collections::VecDeque;
use std::time::Duration;

pub fn valid_candidate() -> Candidate {
    Candidate::new("Ana", "ana@x.com", "30")
}

pub fn ana() -> Record {
    Record::new("Ana", "ana@x.com", 30)
}

pub fn stored(id: u64, record: Record) -> StoredRecord {
    StoredRecord::new(id, record)
}

pub fn conflict(email: &str) -> StoreError {
    StoreError::Conflict {
        email: email.to_string(),
    }
}

pub fn unreachable() -> StoreError {
    StoreError::Transport("connection refused".to_string())
}

/// Record store that answers from a script and remembers every call.
///
/// Unscripted creates succeed with sequential ids starting at 1.
/// Unscripted lists return every record created so far.
#[derive(Debug, Default)]
pub struct ScriptedRecordStore {
    creates: Mutex<VecDeque<Result<StoredRecord, StoreError>>>,
    lists: Mutex<VecDeque<Result<Vec<StoredRecord>, StoreError>>>,
    created: Mutex<Vec<Record>>,
    accepted: Mutex<Vec<StoredRecord>>,
    list_calls: Mutex<usize>,
    delay: Mutex<Option<Duration>>,
}

impl ScriptedRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_listing(records: Vec<StoredRecord>) -> Self {
        let store = Self::new();
        *store.accepted.lock() = records;
        store
    }

    pub fn push_create(&self, result: Result<StoredRecord, StoreError>) -> &Self {
        self.creates.lock().push_back(result);
        self
    }

    pub fn push_list(&self, result: Result<Vec<StoredRecord>, StoreError>) -> &Self {
        self.lists.lock().push_back(result);
        self
    }

    /// Every call sleeps this long before answering.
    pub fn set_delay(&self, delay: Duration) {
        *self.delay.lock() = Some(delay);
    }

    pub fn create_calls(&self) -> Vec<Record> {
        self.created.lock().clone()
    }

    pub fn list_calls(&self) -> usize {
        *self.list_calls.lock()
    }

    async fn pause(&self) {
        let delay = *self.delay.lock();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
    }
}

#[async_trait]
impl RecordStore for ScriptedRecordStore {
    async fn create(&self, record: &Record) -> Result<StoredRecord, StoreError> {
        self.created.lock().push(record.clone());
        self.pause().await;

        let scripted = self.creates.lock().pop_front();
        let result = scripted.unwrap_or_else(|| {
            let id = self.accepted.lock().len() as u64 + 1;
            Ok(StoredRecord::new(id, record.clone()))
        });
        if let Ok(stored) = &result {
            self.accepted.lock().push(stored.clone());
        }
        result
    }

    async fn list(&self) -> Result<Vec<StoredRecord>, StoreError> {
        *self.list_calls.lock() += 1;
        self.pause().await;

        let scripted = self.lists.lock().pop_front();
        scripted.unwrap_or_else(|| Ok(self.accepted.lock().clone()))
    }
}
