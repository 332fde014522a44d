//! HTTP record store client
//!
//! Talks to a `/customers` endpoint:
//! - `POST /customers` with `{name, email, age}`; only `200 OK` is success
//! - `GET /customers` returning a JSON array of stored records
//!
//! `409 Conflict` is reported as [`StoreError::Conflict`]; every other
//! non-200 status becomes [`StoreError::Status`].

use crate::error::StoreError;
use crate::store::RecordStore;
use crate::types::StoredRecord;
use async_trait::async_trait;
use reqwest::{StatusCode, Url};
use signup_schema::Record;
use std::time::Duration;

/// Collection path under the base URL
pub const CUSTOMERS_PATH: &str = "customers";

/// Default per-request deadline
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Record store reached over HTTP
#[derive(Debug, Clone)]
pub struct HttpRecordStore {
    endpoint: Url,
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpRecordStore {
    /// Client for `base_url` with the default timeout
    ///
    /// # Errors
    /// `StoreError::InvalidUrl` if `base_url` does not parse.
    pub fn new(base_url: &str) -> Result<Self, StoreError> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    /// Client for `base_url` with an explicit per-request timeout
    ///
    /// # Errors
    /// - `StoreError::InvalidUrl` if `base_url` does not parse
    /// - `StoreError::Transport` if the HTTP client cannot be built
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, StoreError> {
        let endpoint = customers_endpoint(base_url)?;
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| StoreError::Transport(e.to_string()))?;

        Ok(Self {
            endpoint,
            client,
            timeout,
        })
    }

    /// Resolved `/customers` URL
    #[inline]
    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Per-request deadline
    #[inline]
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn classify(&self, err: &reqwest::Error) -> StoreError {
        if err.is_timeout() {
            StoreError::Timeout {
                duration_ms: u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX),
            }
        } else if err.is_decode() {
            StoreError::Decode(err.to_string())
        } else {
            StoreError::Transport(err.to_string())
        }
    }

    async fn unexpected_status(response: reqwest::Response) -> StoreError {
        let status = response.status().as_u16();
        let message = response.text().await.unwrap_or_default();
        StoreError::Status { status, message }
    }
}

/// Resolve `<base>/customers`, tolerating a base with or without a
/// trailing slash
///
/// # Errors
/// `StoreError::InvalidUrl` if the base does not parse or cannot carry a path.
pub fn customers_endpoint(base_url: &str) -> Result<Url, StoreError> {
    let mut base = Url::parse(base_url).map_err(|e| StoreError::InvalidUrl(e.to_string()))?;
    if base.cannot_be_a_base() {
        return Err(StoreError::InvalidUrl(format!("not a base url: {base_url}")));
    }
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.join(CUSTOMERS_PATH)
        .map_err(|e| StoreError::InvalidUrl(e.to_string()))
}

#[async_trait]
impl RecordStore for HttpRecordStore {
    async fn create(&self, record: &Record) -> Result<StoredRecord, StoreError> {
        tracing::debug!(endpoint = %self.endpoint, "POST record");

        let response = self
            .client
            .post(self.endpoint.clone())
            .json(record)
            .send()
            .await
            .map_err(|e| self.classify(&e))?;

        match response.status() {
            StatusCode::OK => response
                .json::<StoredRecord>()
                .await
                .map_err(|e| self.classify(&e)),
            StatusCode::CONFLICT => Err(StoreError::Conflict {
                email: record.email.clone(),
            }),
            _ => Err(Self::unexpected_status(response).await),
        }
    }

    async fn list(&self) -> Result<Vec<StoredRecord>, StoreError> {
        tracing::debug!(endpoint = %self.endpoint, "GET records");

        let response = self
            .client
            .get(self.endpoint.clone())
            .send()
            .await
            .map_err(|e| self.classify(&e))?;

        if response.status() != StatusCode::OK {
            return Err(Self::unexpected_status(response).await);
        }

        response
            .json::<Vec<StoredRecord>>()
            .await
            .map_err(|e| self.classify(&e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_from_bare_host() {
        let url = customers_endpoint("http://127.0.0.1:5555").unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:5555/customers");
    }

    #[test]
    fn endpoint_keeps_base_path() {
        let url = customers_endpoint("http://example.com/api").unwrap();
        assert_eq!(url.as_str(), "http://example.com/api/customers");

        let url = customers_endpoint("http://example.com/api/").unwrap();
        assert_eq!(url.as_str(), "http://example.com/api/customers");
    }

    #[test]
    fn invalid_url_rejected() {
        assert!(matches!(
            customers_endpoint("not a url"),
            Err(StoreError::InvalidUrl(_))
        ));
        assert!(matches!(
            customers_endpoint("mailto:ana@x.com"),
            Err(StoreError::InvalidUrl(_))
        ));
    }

    #[test]
    fn client_keeps_timeout() {
        let store = HttpRecordStore::with_timeout("http://localhost:5555", Duration::from_millis(250))
            .unwrap();
        assert_eq!(store.timeout(), Duration::from_millis(250));
        assert_eq!(store.endpoint().path(), "/customers");
    }
}
