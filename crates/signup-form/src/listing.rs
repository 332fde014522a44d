//! Read-only record listing with stale-while-revalidate refreshes

use serde::Serialize;
use signup_store::{StoreError, StoredRecord};

/// Freshness of the displayed listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ListingStatus {
    /// Never fetched
    NotLoaded,
    /// Last fetch succeeded
    Loaded,
    /// A fetch is outstanding; the previous records stay visible
    Refreshing,
    /// Last fetch failed; the previous records stay visible
    Failed {
        /// Error text from the failed fetch
        message: String,
    },
}

/// Records shown beneath the form
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Listing {
    records: Vec<StoredRecord>,
    status: ListingStatus,
}

impl Default for Listing {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            status: ListingStatus::NotLoaded,
        }
    }
}

impl Listing {
    /// Empty, never-fetched listing
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records currently displayed
    #[inline]
    #[must_use]
    pub fn records(&self) -> &[StoredRecord] {
        &self.records
    }

    /// Current freshness
    #[inline]
    #[must_use]
    pub fn status(&self) -> &ListingStatus {
        &self.status
    }

    /// True while a fetch is outstanding
    #[inline]
    #[must_use]
    pub fn is_refreshing(&self) -> bool {
        self.status == ListingStatus::Refreshing
    }

    /// True when the last fetch failed and a retry should be offered
    #[inline]
    #[must_use]
    pub fn needs_retry(&self) -> bool {
        matches!(self.status, ListingStatus::Failed { .. })
    }

    /// Mark a fetch as started without touching the records
    pub(crate) fn begin(&mut self) {
        self.status = ListingStatus::Refreshing;
    }

    /// Apply a fetch result
    ///
    /// Success replaces the records wholesale; failure keeps them.
    pub(crate) fn apply(&mut self, result: Result<Vec<StoredRecord>, StoreError>) {
        match result {
            Ok(records) => {
                self.records = records;
                self.status = ListingStatus::Loaded;
            }
            Err(err) => {
                self.status = ListingStatus::Failed {
                    message: err.to_string(),
                };
            }
        }
    }
}
