//! Field identifiers and the raw candidate record
//!
//! A [`Candidate`] holds exactly what the user typed. Every value is text,
//! `age` included, so nothing is lost before coercion.

use crate::error::SchemaError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// One of the three sign-up fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    /// Display name
    Name,
    /// Contact email, unique in the store
    Email,
    /// Age in whole years
    Age,
}

impl Field {
    /// All fields in form order
    pub const ALL: [Self; 3] = [Self::Name, Self::Email, Self::Age];

    /// Wire name of the field
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Age => "age",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Field {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(Self::Name),
            "email" => Ok(Self::Email),
            "age" => Ok(Self::Age),
            other => Err(SchemaError::UnknownField(other.to_string())),
        }
    }
}

/// Raw, possibly invalid form input
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    /// Raw name text
    pub name: String,
    /// Raw email text
    pub email: String,
    /// Raw age text, coerced only on admission
    pub age: String,
}

impl Candidate {
    /// Empty candidate, as shown when a form first opens
    #[inline]
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a candidate from three raw values
    #[must_use]
    pub fn new(name: impl Into<String>, email: impl Into<String>, age: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            age: age.into(),
        }
    }

    /// Raw value of a field
    #[inline]
    #[must_use]
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Age => &self.age,
        }
    }

    /// Overwrite a field with new raw text
    #[inline]
    pub fn set(&mut self, field: Field, raw: impl Into<String>) {
        let slot = match field {
            Field::Name => &mut self.name,
            Field::Email => &mut self.email,
            Field::Age => &mut self.age,
        };
        *slot = raw.into();
    }

    /// True when every field is empty
    #[must_use]
    pub fn is_blank(&self) -> bool {
        Field::ALL.iter().all(|f| self.get(*f).is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_round_trips_through_wire_name() {
        for field in Field::ALL {
            assert_eq!(field.as_str().parse::<Field>().unwrap(), field);
        }
    }

    #[test]
    fn unknown_field_rejected() {
        let err = "phone".parse::<Field>().unwrap_err();
        assert_eq!(err, SchemaError::UnknownField("phone".to_string()));
    }

    #[test]
    fn field_names_are_case_sensitive() {
        assert!("Name".parse::<Field>().is_err());
    }

    #[test]
    fn candidate_set_and_get() {
        let mut candidate = Candidate::empty();
        assert!(candidate.is_blank());

        candidate.set(Field::Age, "42");
        assert_eq!(candidate.get(Field::Age), "42");
        assert_eq!(candidate.get(Field::Name), "");
        assert!(!candidate.is_blank());
    }

    #[test]
    fn field_serializes_lowercase() {
        let json = serde_json::to_string(&Field::Email).unwrap();
        assert_eq!(json, "\"email\"");
    }
}
