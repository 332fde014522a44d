//! Schema evaluation
//!
//! A [`Schema`] is an ordered rule list per field. Evaluation walks each
//! list in order and keeps only the first failing rule's message, so a
//! field never reports more than one error.

use crate::errors::FieldErrors;
use crate::field::{Candidate, Field};
use crate::record::Record;
use crate::rule::{coerce_integer, Rule};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Fixed user-facing messages
pub mod messages {
    /// Empty name
    pub const NAME_REQUIRED: &str = "Must enter a name";
    /// Empty email when email is required
    pub const EMAIL_REQUIRED: &str = "Must enter email";
    /// Email that fails the grammar
    pub const EMAIL_INVALID: &str = "Invalid email";
    /// Age that does not coerce to an integer
    pub const AGE_NOT_INTEGER: &str = "Please enter an Integer";
    /// Empty age
    pub const AGE_REQUIRED: &str = "Must enter age";
    /// Age of zero or below
    pub const AGE_NOT_POSITIVE: &str = "Age must be a positive number";
}

/// Where the age `Required` rule sits relative to integer coercion
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AgeOrder {
    /// Coercion first: empty age reports "Please enter an Integer"
    #[default]
    CoerceFirst,
    /// Required first: empty age reports "Must enter age"
    RequiredFirst,
}

/// Tunable knobs for building the sign-up schema
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemaOptions {
    /// Whether an empty email is an error
    pub email_required: bool,
    /// Precedence of the age required check
    pub age_order: AgeOrder,
    /// Longest accepted name, in characters
    pub name_max_len: usize,
    /// Oldest accepted age
    pub age_max: i64,
}

impl Default for SchemaOptions {
    fn default() -> Self {
        Self {
            email_required: true,
            age_order: AgeOrder::CoerceFirst,
            name_max_len: 15,
            age_max: 125,
        }
    }
}

/// Ordered rules for one field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldRules {
    /// Field the rules apply to
    pub field: Field,
    /// Rules in precedence order
    pub rules: Vec<Rule>,
}

impl FieldRules {
    /// First failing rule's message, if any
    #[must_use]
    pub fn first_violation(&self, raw: &str) -> Option<&str> {
        self.rules
            .iter()
            .find(|rule| !rule.passes(raw))
            .map(Rule::message)
    }
}

/// Validation schema for a sign-up candidate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    fields: Vec<FieldRules>,
}

static SIGNUP: Lazy<Schema> = Lazy::new(Schema::signup);

impl Schema {
    /// The sign-up schema with default options
    #[must_use]
    pub fn signup() -> Self {
        Self::with_options(SchemaOptions::default())
    }

    /// The sign-up schema built from explicit options
    #[must_use]
    pub fn with_options(options: SchemaOptions) -> Self {
        let name = vec![
            Rule::required(messages::NAME_REQUIRED),
            Rule::max_length(
                options.name_max_len,
                format!("Name must be at most {} characters", options.name_max_len),
            ),
        ];

        let mut email = Vec::with_capacity(2);
        if options.email_required {
            email.push(Rule::required(messages::EMAIL_REQUIRED));
        }
        email.push(Rule::email(messages::EMAIL_INVALID));

        let coerce = Rule::integer(messages::AGE_NOT_INTEGER);
        let required = Rule::required(messages::AGE_REQUIRED);
        let mut age = match options.age_order {
            AgeOrder::CoerceFirst => vec![coerce, required],
            AgeOrder::RequiredFirst => vec![required, coerce],
        };
        age.push(Rule::positive(messages::AGE_NOT_POSITIVE));
        age.push(Rule::max_value(
            options.age_max,
            format!("Age must be at most {}", options.age_max),
        ));

        Self::from_rules(vec![
            FieldRules {
                field: Field::Name,
                rules: name,
            },
            FieldRules {
                field: Field::Email,
                rules: email,
            },
            FieldRules {
                field: Field::Age,
                rules: age,
            },
        ])
    }

    /// Schema from hand-written rule lists
    #[inline]
    #[must_use]
    pub fn from_rules(fields: Vec<FieldRules>) -> Self {
        Self { fields }
    }

    /// Rules for a field, empty if the schema does not mention it
    #[must_use]
    pub fn rules(&self, field: Field) -> &[Rule] {
        self.fields
            .iter()
            .find(|f| f.field == field)
            .map(|f| f.rules.as_slice())
            .unwrap_or(&[])
    }

    /// Evaluate a candidate against every field's rules
    ///
    /// Pure: the same candidate always yields the same mapping.
    #[must_use]
    pub fn evaluate(&self, candidate: &Candidate) -> FieldErrors {
        self.fields
            .iter()
            .filter_map(|rules| {
                rules
                    .first_violation(candidate.get(rules.field))
                    .map(|message| (rules.field, message.to_string()))
            })
            .collect()
    }

    /// Evaluate and, if conformant, coerce into a typed [`Record`]
    ///
    /// # Errors
    /// Returns the error mapping when any field fails.
    pub fn admit(&self, candidate: &Candidate) -> Result<Record, FieldErrors> {
        let mut errors = self.evaluate(candidate);
        if !errors.is_empty() {
            return Err(errors);
        }

        let Some(age) = coerce_integer(&candidate.age) else {
            // A hand-built schema may omit the integer rule
            errors.insert(Field::Age, messages::AGE_NOT_INTEGER);
            return Err(errors);
        };

        Ok(Record {
            name: candidate.name.clone(),
            email: candidate.email.clone(),
            age,
        })
    }
}

impl Default for Schema {
    fn default() -> Self {
        Self::signup()
    }
}

/// Evaluate a candidate against the default sign-up schema
#[must_use]
pub fn evaluate(candidate: &Candidate) -> FieldErrors {
    SIGNUP.evaluate(candidate)
}
