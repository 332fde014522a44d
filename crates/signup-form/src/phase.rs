//! Session phase state machine

use crate::error::FormError;
use serde::Serialize;

/// Lifecycle phase of a form session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    /// Accepting field changes; initial phase
    Editing,
    /// A create call is outstanding
    Submitting,
    /// Torn down; late results are discarded
    Closed,
}

/// Phases reachable from `from` in one step
#[must_use]
pub fn allowed_transitions(from: SessionPhase) -> &'static [SessionPhase] {
    use SessionPhase::{Closed, Editing, Submitting};
    match from {
        Editing => &[Submitting, Closed],
        Submitting => &[Editing, Closed],
        Closed => &[],
    }
}

/// Validates a phase transition.
///
/// A blocked submit is not a transition: the session simply stays in
/// `Editing`.
pub fn validate_transition(from: SessionPhase, to: SessionPhase) -> Result<(), FormError> {
    if allowed_transitions(from).contains(&to) {
        Ok(())
    } else {
        Err(FormError::IllegalTransition { from, to })
    }
}
