//! Field-to-message error mapping

use crate::field::Field;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// At most one message per field, keyed in form order
///
/// An empty mapping is the only state in which a record may be submitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors {
    inner: BTreeMap<Field, String>,
}

impl FieldErrors {
    /// Empty mapping
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the message for a field, replacing any previous one
    pub fn insert(&mut self, field: Field, message: impl Into<String>) {
        self.inner.insert(field, message.into());
    }

    /// Message for a field, if it currently fails
    #[inline]
    #[must_use]
    pub fn get(&self, field: Field) -> Option<&str> {
        self.inner.get(&field).map(String::as_str)
    }

    /// True when every field passes
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Number of failing fields
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Failing fields with their messages, in form order
    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> + '_ {
        self.inner.iter().map(|(f, m)| (*f, m.as_str()))
    }
}

impl FromIterator<(Field, String)> for FieldErrors {
    fn from_iter<I: IntoIterator<Item = (Field, String)>>(iter: I) -> Self {
        Self {
            inner: iter.into_iter().collect(),
        }
    }
}

impl std::fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}
