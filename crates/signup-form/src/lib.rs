//! Sign-up Form - session controller for the customer sign-up form
//!
//! A [`FormSession`] owns the raw field values, the current errors and the
//! submission gate for one session. It talks to any [`RecordStore`] and
//! never lets a non-conformant record reach it.
//!
//! # Example
//!
//! ```rust,ignore
//! use signup_form::prelude::*;
//! use signup_store::MemoryRecordStore;
//!
//! # async fn example() {
//! let mut session = FormSession::new(MemoryRecordStore::new(), &FormConfig::default());
//! session.mount().await;
//!
//! session.on_field_change(Field::Name, "Ana");
//! session.on_field_change(Field::Email, "ana@x.com");
//! session.on_field_change(Field::Age, "30");
//!
//! assert!(session.on_submit().await.is_accepted());
//! assert_eq!(session.listing().records().len(), 1);
//! # }
//! ```
//!
//! [`RecordStore`]: signup_store::RecordStore

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod config;
pub mod error;
pub mod listing;
pub mod phase;
pub mod session;
pub mod state;

pub use config::{FormConfig, DEFAULT_REQUEST_TIMEOUT_MS, DEFAULT_STORE_URL};
pub use error::{ConfigError, FailureKind, FormError, SubmissionFailure};
pub use listing::{Listing, ListingStatus};
pub use phase::{allowed_transitions, validate_transition, SessionPhase};
pub use session::{
    FormSession, FormView, RefreshOutcome, RefreshTicket, SessionId, SubmitOutcome, SubmitStart,
    SubmitTicket,
};
pub use state::FormState;

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for driving a form session
    pub use crate::{
        FormConfig, FormError, FormSession, RefreshOutcome, SubmissionFailure, SubmitOutcome,
    };
    pub use signup_schema::{Candidate, Field, FieldErrors};
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
