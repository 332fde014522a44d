//! Tagged validation rules
//!
//! Each field owns an ordered list of [`Rule`]s. A rule is a predicate over
//! the raw text plus the message shown when the predicate fails.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static INTEGER_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[+-]?[0-9]+$").expect("integer pattern compiles"));

// local@domain.tld with at least one dot in the domain
static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)+$",
    )
    .expect("email pattern compiles")
});

/// A single predicate with its failure message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Rule {
    /// Value must be non-blank
    Required { message: String },
    /// Value must be at most `max` characters
    MaxLength { max: usize, message: String },
    /// Non-empty value must match the email grammar
    Email { message: String },
    /// Value must coerce to a whole number
    Integer { message: String },
    /// Coerced value must be strictly greater than zero
    Positive { message: String },
    /// Coerced value must not exceed `max`
    MaxValue { max: i64, message: String },
}

impl Rule {
    /// Required rule
    #[must_use]
    pub fn required(message: impl Into<String>) -> Self {
        Self::Required {
            message: message.into(),
        }
    }

    /// Length ceiling rule
    #[must_use]
    pub fn max_length(max: usize, message: impl Into<String>) -> Self {
        Self::MaxLength {
            max,
            message: message.into(),
        }
    }

    /// Email grammar rule
    #[must_use]
    pub fn email(message: impl Into<String>) -> Self {
        Self::Email {
            message: message.into(),
        }
    }

    /// Integer coercion rule
    #[must_use]
    pub fn integer(message: impl Into<String>) -> Self {
        Self::Integer {
            message: message.into(),
        }
    }

    /// Positivity rule
    #[must_use]
    pub fn positive(message: impl Into<String>) -> Self {
        Self::Positive {
            message: message.into(),
        }
    }

    /// Value ceiling rule
    #[must_use]
    pub fn max_value(max: i64, message: impl Into<String>) -> Self {
        Self::MaxValue {
            max,
            message: message.into(),
        }
    }

    /// Message reported when this rule fails
    #[inline]
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Required { message }
            | Self::MaxLength { message, .. }
            | Self::Email { message }
            | Self::Integer { message }
            | Self::Positive { message }
            | Self::MaxValue { message, .. } => message,
        }
    }

    /// Check raw input against this rule
    ///
    /// Rules other than `Required` and `Integer` pass on input they cannot
    /// judge (empty text, or text that does not coerce), leaving that
    /// verdict to the rule responsible for it.
    #[must_use]
    pub fn passes(&self, raw: &str) -> bool {
        match self {
            Self::Required { .. } => !raw.trim().is_empty(),
            Self::MaxLength { max, .. } => raw.chars().count() <= *max,
            Self::Email { .. } => raw.is_empty() || EMAIL_PATTERN.is_match(raw),
            Self::Integer { .. } => coerce_integer(raw).is_some(),
            Self::Positive { .. } => !matches!(coerce_integer(raw), Some(v) if v <= 0),
            Self::MaxValue { max, .. } => !matches!(coerce_integer(raw), Some(v) if v > *max),
        }
    }
}

/// Coerce raw text to an integer
///
/// Surrounding whitespace is ignored. Decimal, empty or non-numeric text
/// yields `None`. Integer-shaped text beyond the `i64` range saturates.
#[must_use]
pub fn coerce_integer(raw: &str) -> Option<i64> {
    let trimmed = raw.trim();
    if !INTEGER_PATTERN.is_match(trimmed) {
        return None;
    }
    match trimmed.parse::<i64>() {
        Ok(value) => Some(value),
        Err(_) if trimmed.starts_with('-') => Some(i64::MIN),
        Err(_) => Some(i64::MAX),
    }
}

/// True when `raw` matches the email grammar
#[inline]
#[must_use]
pub fn is_email(raw: &str) -> bool {
    EMAIL_PATTERN.is_match(raw)
}
