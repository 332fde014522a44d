//! Form state and its pure update functions
//!
//! The state is a plain value with a single owner. Values and errors only
//! change through the functions below, so they can be tested without a
//! session or a store. The session owns the pending flag.

use serde::Serialize;
use signup_schema::{Candidate, Field, FieldErrors, Record, Schema};

/// Transient per-session form state
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FormState {
    /// Raw text of every field
    pub values: Candidate,
    /// Current error per failing field
    pub errors: FieldErrors,
    /// True while a create call is outstanding
    pub submission_pending: bool,
}

impl FormState {
    /// Empty values, no errors, nothing pending
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

/// Write a field's raw text and recompute every error from scratch
pub fn apply_field_change(
    state: &mut FormState,
    schema: &Schema,
    field: Field,
    raw: impl Into<String>,
) {
    state.values.set(field, raw);
    state.errors = schema.evaluate(&state.values);
}

/// Recompute errors and coerce the current values for submission
///
/// Returns the typed record when the values are submittable; otherwise the
/// errors are left in the state.
pub fn admit(state: &mut FormState, schema: &Schema) -> Option<Record> {
    match schema.admit(&state.values) {
        Ok(record) => {
            state.errors = FieldErrors::new();
            Some(record)
        }
        Err(errors) => {
            state.errors = errors;
            None
        }
    }
}

/// Return to the initial empty state
pub fn reset(state: &mut FormState) {
    *state = FormState::default();
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use signup_schema::messages;

    #[test]
    fn new_state_is_empty_without_errors() {
        let state = FormState::new();
        assert!(state.values.is_blank());
        assert!(state.errors.is_empty());
        assert!(!state.submission_pending);
    }

    #[test]
    fn field_change_evaluates_whole_record() {
        let schema = Schema::signup();
        let mut state = FormState::new();

        apply_field_change(&mut state, &schema, Field::Name, "Ana");

        assert_eq!(state.values.name, "Ana");
        assert_eq!(state.errors.get(Field::Name), None);
        assert_eq!(state.errors.get(Field::Email), Some(messages::EMAIL_REQUIRED));
        assert_eq!(state.errors.get(Field::Age), Some(messages::AGE_NOT_INTEGER));
    }

    #[test]
    fn errors_are_replaced_not_merged() {
        let schema = Schema::signup();
        let mut state = FormState::new();
        apply_field_change(&mut state, &schema, Field::Age, "abc");
        assert_eq!(state.errors.get(Field::Age), Some(messages::AGE_NOT_INTEGER));

        apply_field_change(&mut state, &schema, Field::Age, "30");
        assert_eq!(state.errors.get(Field::Age), None);
    }

    #[test]
    fn malformed_keystrokes_are_kept() {
        let schema = Schema::signup();
        let mut state = FormState::new();
        apply_field_change(&mut state, &schema, Field::Age, "3x");

        assert_eq!(state.values.age, "3x");
    }

    #[test]
    fn admit_coerces_submittable_values() {
        let schema = Schema::signup();
        let mut state = FormState {
            values: Candidate::new("Ana", "ana@x.com", " 30 "),
            ..FormState::default()
        };
        assert_eq!(
            admit(&mut state, &schema),
            Some(Record::new("Ana", "ana@x.com", 30))
        );
        assert!(state.errors.is_empty());

        state.values.email = "bad".to_string();
        assert_eq!(admit(&mut state, &schema), None);
        assert_eq!(state.errors.get(Field::Email), Some(messages::EMAIL_INVALID));
        assert_eq!(state.errors.len(), 1);
    }

    #[test]
    fn reset_clears_everything() {
        let mut state = FormState {
            values: Candidate::new("Ana", "ana@x.com", "30"),
            errors: FieldErrors::new(),
            submission_pending: true,
        };
        reset(&mut state);
        assert_eq!(state, FormState::new());
    }
}
