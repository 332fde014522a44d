//! Error types for the record store
//!
//! Separates failures the user must act on (a conflicting email) from
//! failures a retry may fix (transport errors, timeouts, server faults).

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

/// Errors reported by a [`RecordStore`](crate::RecordStore)
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// A record with this email already exists
    #[error("email already registered: {email}")]
    Conflict { email: String },

    /// Store answered with a non-success status
    #[error("store responded with status {status}: {message}")]
    Status { status: u16, message: String },

    /// Request never completed (connection refused, reset, DNS)
    #[error("transport error: {0}")]
    Transport(String),

    /// Request exceeded its deadline
    #[error("request timed out after {duration_ms}ms")]
    Timeout { duration_ms: u64 },

    /// Response body did not match the record shape
    #[error("failed to decode response: {0}")]
    Decode(String),

    /// Store endpoint URL is malformed
    #[error("invalid store url: {0}")]
    InvalidUrl(String),
}

impl StoreError {
    /// True when the failure is a uniqueness conflict
    #[inline]
    #[must_use]
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict { .. })
    }

    /// True when retrying the same request may succeed
    #[inline]
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport(_) | Self::Timeout { .. } => true,
            Self::Status { status, .. } => *status >= 500,
            Self::Conflict { .. } | Self::Decode(_) | Self::InvalidUrl(_) => false,
        }
    }
}

/// Errors starting the `/customers` server
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Listener could not be bound
    #[error("failed to bind {addr}: {message}")]
    Bind { addr: SocketAddr, message: String },
}

/// JSON error body returned by the server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Human-readable failure description
    pub error: String,
}

impl From<&StoreError> for ErrorBody {
    fn from(err: &StoreError) -> Self {
        Self {
            error: err.to_string(),
        }
    }
}
