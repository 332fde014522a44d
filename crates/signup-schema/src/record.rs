//! Typed record produced by a successful admission

use serde::{Deserialize, Serialize};

/// A fully conformant sign-up record
///
/// Only [`Schema::admit`](crate::Schema::admit) builds one from user input,
/// so holding a `Record` means every rule passed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Record {
    /// Display name
    pub name: String,
    /// Contact email
    pub email: String,
    /// Age in whole years
    pub age: i64,
}

impl Record {
    /// Build a record directly, bypassing validation
    ///
    /// Intended for stores and fixtures that already hold trusted data.
    #[must_use]
    pub fn new(name: impl Into<String>, email: impl Into<String>, age: i64) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            age,
        }
    }
}

impl std::fmt::Display for Record {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} <{}>, age {}", self.name, self.email, self.age)
    }
}
