//! Form session controller
//!
//! Owns the form state for one session and mediates:
//! - field changes (write raw text, re-evaluate everything)
//! - submission (gate, validate, create, reset, refresh)
//! - listing fetches (initial mount and post-submit refresh)
//!
//! Each suspending operation has a split form (`begin_*` / `complete_*`)
//! for event-driven views, and an `async` form that awaits the store
//! directly. Tickets remember the session generation they were issued
//! under; a result presented after [`FormSession::close`] is discarded.
//! Only the most recently issued listing fetch may replace the listing.

use crate::config::FormConfig;
use crate::error::{FormError, SubmissionFailure};
use crate::listing::{Listing, ListingStatus};
use crate::phase::{validate_transition, SessionPhase};
use crate::state::{self, FormState};
use serde::{Deserialize, Serialize};
use signup_schema::{Candidate, Field, FieldErrors, Record, Schema};
use signup_store::{RecordStore, StoreError, StoredRecord};
use std::future::Future;
use std::time::Duration;
use ulid::Ulid;

/// Unique session identifier (ULID for sortability)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SessionId(pub Ulid);

impl SessionId {
    /// Generate new session ID
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self(Ulid::new())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Permission to issue one create call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitTicket {
    session: SessionId,
    generation: u64,
    record: Record,
}

impl SubmitTicket {
    /// Record to hand to the store, age already coerced
    #[inline]
    #[must_use]
    pub fn record(&self) -> &Record {
        &self.record
    }
}

/// Permission to issue one list call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshTicket {
    session: SessionId,
    generation: u64,
    seq: u64,
}

/// Result of asking to start a submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitStart {
    /// Values are conformant; issue the create call
    Ready(SubmitTicket),
    /// Validation failed; errors are now visible
    Blocked(FieldErrors),
    /// A create call is already outstanding
    AlreadyPending,
    /// The session was closed
    Closed,
}

/// Final result of a submission attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Store acknowledged the record; the form was reset
    Accepted {
        /// The stored record
        record: StoredRecord,
        /// Whether the follow-up listing fetch succeeded
        listing_refreshed: bool,
    },
    /// Validation failed; no create call was issued
    Blocked(FieldErrors),
    /// A create call was already outstanding; nothing was issued
    AlreadyPending,
    /// The store refused or could not be reached; values are kept
    Failed(SubmissionFailure),
    /// The session closed before the result arrived
    Discarded,
}

impl SubmitOutcome {
    /// True when the record was stored
    #[inline]
    #[must_use]
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted { .. })
    }
}

/// Result of a listing fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// Listing replaced with this many records
    Applied(usize),
    /// Fetch failed; previous records kept
    Failed(String),
    /// The session closed, or a newer fetch was issued, before the result
    /// arrived
    Discarded,
}

/// Serializable snapshot for the view layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormView {
    /// Session identifier
    pub session: SessionId,
    /// Current phase
    pub phase: SessionPhase,
    /// Raw values, errors and pending flag
    #[serde(flatten)]
    pub state: FormState,
    /// Records shown beneath the form
    pub listing: Listing,
}

/// Controller for a single form session
#[derive(Debug)]
pub struct FormSession<S> {
    id: SessionId,
    store: S,
    schema: Schema,
    state: FormState,
    phase: SessionPhase,
    listing: Listing,
    generation: u64,
    refresh_seq: u64,
    request_timeout: Duration,
}

impl<S: RecordStore> FormSession<S> {
    /// Create a session from configuration
    #[must_use]
    pub fn new(store: S, config: &FormConfig) -> Self {
        Self::with_schema(store, config.build_schema(), config.request_timeout())
    }

    /// Create a session with an explicit schema and deadline
    #[must_use]
    pub fn with_schema(store: S, schema: Schema, request_timeout: Duration) -> Self {
        let id = SessionId::new();
        tracing::debug!(session = %id, "opened form session");
        Self {
            id,
            store,
            schema,
            state: FormState::new(),
            phase: SessionPhase::Editing,
            listing: Listing::new(),
            generation: 0,
            refresh_seq: 0,
            request_timeout,
        }
    }

    /// Session identifier
    #[inline]
    #[must_use]
    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Current raw values
    #[inline]
    #[must_use]
    pub fn values(&self) -> &Candidate {
        &self.state.values
    }

    /// Current errors
    #[inline]
    #[must_use]
    pub fn errors(&self) -> &FieldErrors {
        &self.state.errors
    }

    /// True while a create call is outstanding
    #[inline]
    #[must_use]
    pub fn submission_pending(&self) -> bool {
        self.state.submission_pending
    }

    /// Current phase
    #[inline]
    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Whole form state
    #[inline]
    #[must_use]
    pub fn state(&self) -> &FormState {
        &self.state
    }

    /// Displayed listing
    #[inline]
    #[must_use]
    pub fn listing(&self) -> &Listing {
        &self.listing
    }

    /// Schema used for every evaluation
    #[inline]
    #[must_use]
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Underlying record store
    #[inline]
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// True once the session has been torn down
    #[inline]
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.phase == SessionPhase::Closed
    }

    /// Snapshot for rendering
    #[must_use]
    pub fn view(&self) -> FormView {
        FormView {
            session: self.id,
            phase: self.phase,
            state: self.state.clone(),
            listing: self.listing.clone(),
        }
    }

    /// Write raw text into a field and re-evaluate the whole record
    ///
    /// Malformed input is stored as typed. Changes to a closed session are
    /// ignored.
    pub fn on_field_change(&mut self, field: Field, raw: impl Into<String>) {
        if self.is_closed() {
            tracing::debug!(session = %self.id, %field, "ignoring change on closed session");
            return;
        }
        state::apply_field_change(&mut self.state, &self.schema, field, raw);
        tracing::debug!(
            session = %self.id,
            %field,
            errors = self.state.errors.len(),
            "field changed"
        );
    }

    /// Like [`on_field_change`](Self::on_field_change), addressing the field
    /// by its wire name
    ///
    /// # Errors
    /// - `FormError::UnknownField` if `name` is not `name`, `email` or `age`
    /// - `FormError::SessionClosed` once the session is torn down
    pub fn on_named_field_change(
        &mut self,
        name: &str,
        raw: impl Into<String>,
    ) -> Result<(), FormError> {
        let field: Field = name.parse()?;
        if self.is_closed() {
            return Err(FormError::SessionClosed);
        }
        self.on_field_change(field, raw);
        Ok(())
    }

    /// Validate and, if conformant, claim the right to issue a create call
    pub fn begin_submit(&mut self) -> SubmitStart {
        if self.is_closed() {
            return SubmitStart::Closed;
        }
        if self.state.submission_pending {
            tracing::debug!(session = %self.id, "submit ignored, create already outstanding");
            return SubmitStart::AlreadyPending;
        }

        let Some(record) = state::admit(&mut self.state, &self.schema) else {
            let errors = self.state.errors.clone();
            tracing::info!(session = %self.id, errors = errors.len(), "submit blocked by validation");
            return SubmitStart::Blocked(errors);
        };

        if let Err(err) = self.transition(SessionPhase::Submitting) {
            tracing::error!(session = %self.id, "{}", err);
            return SubmitStart::AlreadyPending;
        }
        self.state.submission_pending = true;
        tracing::info!(session = %self.id, "submitting record");

        SubmitStart::Ready(SubmitTicket {
            session: self.id,
            generation: self.generation,
            record,
        })
    }

    /// Apply the store's answer to a create call
    ///
    /// Success resets the form; failure keeps values and errors. The
    /// listing is not touched here: follow up with a refresh on success.
    pub fn complete_submit(
        &mut self,
        ticket: SubmitTicket,
        result: Result<StoredRecord, StoreError>,
    ) -> SubmitOutcome {
        if !self.is_current(ticket.session, ticket.generation) {
            tracing::debug!(session = %self.id, "discarding stale create result");
            return SubmitOutcome::Discarded;
        }

        self.state.submission_pending = false;
        if let Err(err) = self.transition(SessionPhase::Editing) {
            tracing::error!(session = %self.id, "{}", err);
        }

        match result {
            Ok(record) => {
                tracing::info!(session = %self.id, id = record.id, "record accepted");
                state::reset(&mut self.state);
                SubmitOutcome::Accepted {
                    record,
                    listing_refreshed: false,
                }
            }
            Err(err) => {
                let failure = SubmissionFailure::from(&err);
                tracing::warn!(session = %self.id, kind = ?failure.kind, "submission failed: {}", err);
                SubmitOutcome::Failed(failure)
            }
        }
    }

    /// Full submit: validate, create, reset and refresh the listing
    ///
    /// The listing fetch is only issued after the create is acknowledged.
    pub async fn on_submit(&mut self) -> SubmitOutcome {
        let ticket = match self.begin_submit() {
            SubmitStart::Ready(ticket) => ticket,
            SubmitStart::Blocked(errors) => return SubmitOutcome::Blocked(errors),
            SubmitStart::AlreadyPending => return SubmitOutcome::AlreadyPending,
            SubmitStart::Closed => return SubmitOutcome::Discarded,
        };

        let result = self.with_deadline(self.store.create(ticket.record())).await;

        match self.complete_submit(ticket, result) {
            SubmitOutcome::Accepted { record, .. } => {
                let refreshed = self.refresh_listing().await;
                SubmitOutcome::Accepted {
                    record,
                    listing_refreshed: matches!(refreshed, RefreshOutcome::Applied(_)),
                }
            }
            other => other,
        }
    }

    /// Mark the listing as refreshing and claim the right to issue a list call
    ///
    /// Returns `None` once the session is closed. Issuing a ticket
    /// supersedes every earlier one.
    pub fn begin_refresh(&mut self) -> Option<RefreshTicket> {
        if self.is_closed() {
            return None;
        }
        self.refresh_seq += 1;
        self.listing.begin();
        Some(RefreshTicket {
            session: self.id,
            generation: self.generation,
            seq: self.refresh_seq,
        })
    }

    /// Apply the store's answer to a list call
    pub fn complete_refresh(
        &mut self,
        ticket: RefreshTicket,
        result: Result<Vec<StoredRecord>, StoreError>,
    ) -> RefreshOutcome {
        if !self.is_current(ticket.session, ticket.generation) {
            tracing::debug!(session = %self.id, "discarding stale listing result");
            return RefreshOutcome::Discarded;
        }
        if ticket.seq != self.refresh_seq {
            tracing::debug!(
                session = %self.id,
                seq = ticket.seq,
                latest = self.refresh_seq,
                "discarding superseded listing result"
            );
            return RefreshOutcome::Discarded;
        }

        self.listing.apply(result);
        match self.listing.status() {
            ListingStatus::Failed { message } => {
                tracing::warn!(session = %self.id, "listing refresh failed: {}", message);
                RefreshOutcome::Failed(message.clone())
            }
            _ => {
                let count = self.listing.records().len();
                tracing::debug!(session = %self.id, count, "listing refreshed");
                RefreshOutcome::Applied(count)
            }
        }
    }

    /// Fetch the listing and replace the displayed records
    pub async fn refresh_listing(&mut self) -> RefreshOutcome {
        let Some(ticket) = self.begin_refresh() else {
            return RefreshOutcome::Discarded;
        };
        let result = self.with_deadline(self.store.list()).await;
        self.complete_refresh(ticket, result)
    }

    /// Initial listing fetch when the form is first shown
    pub async fn mount(&mut self) -> RefreshOutcome {
        tracing::info!(session = %self.id, "mounting form");
        self.refresh_listing().await
    }

    /// Tear down the session
    ///
    /// Results for calls still outstanding are discarded when presented.
    pub fn close(&mut self) {
        if self.is_closed() {
            return;
        }
        if let Err(err) = self.transition(SessionPhase::Closed) {
            tracing::error!(session = %self.id, "{}", err);
            return;
        }
        self.generation += 1;
        self.state.submission_pending = false;
        tracing::debug!(session = %self.id, "closed form session");
    }

    fn transition(&mut self, to: SessionPhase) -> Result<(), FormError> {
        validate_transition(self.phase, to)?;
        self.phase = to;
        Ok(())
    }

    fn is_current(&self, session: SessionId, generation: u64) -> bool {
        session == self.id && generation == self.generation && !self.is_closed()
    }

    async fn with_deadline<T, F>(&self, call: F) -> Result<T, StoreError>
    where
        F: Future<Output = Result<T, StoreError>>,
    {
        let deadline = self.request_timeout;
        tokio::time::timeout(deadline, call)
            .await
            .unwrap_or_else(|_| {
                Err(StoreError::Timeout {
                    duration_ms: u64::try_from(deadline.as_millis()).unwrap_or(u64::MAX),
                })
            })
    }
}
