//! Error types for the form controller
//!
//! Provides error handling for:
//! - Programming errors (unknown field names, illegal phase transitions)
//! - Configuration loading
//! - Submission failures surfaced to the view

use crate::phase::SessionPhase;
use serde::Serialize;
use signup_schema::SchemaError;
use signup_store::StoreError;
use std::path::PathBuf;

/// Main controller error type
#[derive(Debug, thiserror::Error)]
pub enum FormError {
    /// Field name is not part of the form
    #[error("unknown field: '{0}'")]
    UnknownField(String),

    /// Phase change not permitted by the session state machine
    #[error("illegal phase transition: {from:?} -> {to:?}")]
    IllegalTransition {
        from: SessionPhase,
        to: SessionPhase,
    },

    /// Session was torn down
    #[error("session is closed")]
    SessionClosed,

    /// Configuration could not be loaded
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl From<SchemaError> for FormError {
    fn from(err: SchemaError) -> Self {
        match err {
            SchemaError::UnknownField(name) => Self::UnknownField(name),
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("io error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config text is not valid TOML for this schema
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Config parsed but a value is out of range
    #[error("invalid value for {key}: {reason}")]
    InvalidValue { key: &'static str, reason: String },
}

impl ConfigError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Why a submission did not go through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Email already registered; the user must change it
    Conflict,
    /// Network failure or timeout; retrying may help
    Transient,
    /// Store refused the record for another reason
    Rejected,
}

/// Submission-failed signal surfaced to the view
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmissionFailure {
    /// Failure classification
    pub kind: FailureKind,
    /// User-facing message
    pub message: String,
    /// Underlying store error text
    pub detail: String,
}

impl SubmissionFailure {
    /// True when resubmitting unchanged values may succeed
    #[inline]
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        self.kind == FailureKind::Transient
    }
}

impl From<&StoreError> for SubmissionFailure {
    fn from(err: &StoreError) -> Self {
        let (kind, message) = if err.is_conflict() {
            (FailureKind::Conflict, "That email is already registered")
        } else if err.is_retryable() {
            (
                FailureKind::Transient,
                "Could not reach the record store, please try again",
            )
        } else {
            (
                FailureKind::Rejected,
                "The record store rejected the submission",
            )
        };

        Self {
            kind,
            message: message.to_string(),
            detail: err.to_string(),
        }
    }
}

impl std::fmt::Display for SubmissionFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.detail)
    }
}
