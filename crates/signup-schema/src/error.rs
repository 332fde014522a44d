//! Error types for the schema crate
//!
//! Validation failures are never errors: they are returned as
//! [`FieldErrors`](crate::FieldErrors) data. The variants here cover
//! programming mistakes such as addressing a field that does not exist.

/// Schema-level errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    /// Field name is not one of `name`, `email`, `age`
    #[error("unknown field: '{0}'")]
    UnknownField(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_field_display() {
        let err = SchemaError::UnknownField("phone".to_string());
        assert_eq!(err.to_string(), "unknown field: 'phone'");
    }
}
