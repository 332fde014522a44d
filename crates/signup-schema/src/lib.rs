//! Sign-up Schema - declarative validation for the sign-up record
//!
//! Each field carries an ordered list of tagged [`Rule`]s. Evaluation is a
//! pure function from a raw [`Candidate`] to a [`FieldErrors`] mapping that
//! holds the first violated rule's message per field:
//! - `name`: required, at most 15 characters
//! - `email`: required, `local@domain.tld` grammar
//! - `age`: integer, required, positive, at most 125
//!
//! # Example
//!
//! ```rust
//! use signup_schema::{evaluate, Candidate, Field};
//!
//! let errors = evaluate(&Candidate::new("Ana", "bad", "abc"));
//! assert_eq!(errors.get(Field::Email), Some("Invalid email"));
//! assert_eq!(errors.get(Field::Age), Some("Please enter an Integer"));
//! assert_eq!(errors.get(Field::Name), None);
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod error;
pub mod errors;
pub mod field;
pub mod record;
pub mod rule;
pub mod schema;

pub use error::SchemaError;
pub use errors::FieldErrors;
pub use field::{Candidate, Field};
pub use record::Record;
pub use rule::{coerce_integer, is_email, Rule};
pub use schema::{evaluate, messages, AgeOrder, FieldRules, Schema, SchemaOptions};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with the schema
    pub use crate::{evaluate, Candidate, Field, FieldErrors, Record, Rule, Schema, SchemaOptions};
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
