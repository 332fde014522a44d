//! Stored record shape

use serde::{Deserialize, Serialize};
use signup_schema::Record;

/// Store-assigned record identifier
pub type RecordId = u64;

/// A record as held by the store, with its assigned id
///
/// Serializes flat: `{"id": 1, "name": "...", "email": "...", "age": 30}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredRecord {
    /// Store-assigned identifier
    pub id: RecordId,
    /// The record fields
    #[serde(flatten)]
    pub record: Record,
}

impl StoredRecord {
    /// Pair a record with its id
    #[inline]
    #[must_use]
    pub fn new(id: RecordId, record: Record) -> Self {
        Self { id, record }
    }
}

impl std::ops::Deref for StoredRecord {
    type Target = Record;

    fn deref(&self) -> &Self::Target {
        &self.record
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_flat() {
        let stored = StoredRecord::new(7, Record::new("Ana", "ana@x.com", 30));
        let json = serde_json::to_value(&stored).unwrap();

        assert_eq!(
            json,
            serde_json::json!({"id": 7, "name": "Ana", "email": "ana@x.com", "age": 30})
        );
    }

    #[test]
    fn deserializes_store_payload() {
        let stored: StoredRecord =
            serde_json::from_str(r#"{"age": 41, "email": "b@y.org", "id": 2, "name": "Bo"}"#)
                .unwrap();

        assert_eq!(stored.id, 2);
        assert_eq!(stored.name, "Bo");
        assert_eq!(stored.age, 41);
    }
}
