//! `/customers` HTTP server over any [`RecordStore`]
//!
//! - `GET /customers` → `200` with the JSON array of stored records
//! - `POST /customers` → `200` with the stored record, `409` when the email
//!   is taken, `400` for a malformed body

use crate::error::{ErrorBody, ServerError, StoreError};
use crate::store::RecordStore;
use signup_schema::Record;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use warp::http::StatusCode;
use warp::reply::Response;
use warp::{Filter, Rejection, Reply};

/// Largest accepted request body
pub const MAX_BODY_BYTES: u64 = 16 * 1024;

/// Route tree for the record store
pub fn routes<S>(store: Arc<S>) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone
where
    S: RecordStore + 'static,
{
    let with_store = warp::any().map(move || Arc::clone(&store));

    let list = warp::path!("customers")
        .and(warp::get())
        .and(with_store.clone())
        .and_then(list_records::<S>);

    let create = warp::path!("customers")
        .and(warp::post())
        .and(warp::body::content_length_limit(MAX_BODY_BYTES))
        .and(warp::body::json())
        .and(with_store)
        .and_then(create_record::<S>);

    list.or(create).unify().with(warp::trace::request())
}

/// Bind the server, returning the bound address and the serving future
///
/// The future resolves once `shutdown` completes.
///
/// # Errors
/// `ServerError::Bind` if the listener cannot be opened.
pub fn bind<S, F>(
    store: Arc<S>,
    addr: SocketAddr,
    shutdown: F,
) -> Result<(SocketAddr, impl Future<Output = ()>), ServerError>
where
    S: RecordStore + 'static,
    F: Future<Output = ()> + Send + 'static,
{
    warp::serve(routes(store))
        .try_bind_with_graceful_shutdown(addr, shutdown)
        .map_err(|e| ServerError::Bind {
            addr,
            message: e.to_string(),
        })
}

async fn list_records<S: RecordStore>(store: Arc<S>) -> Result<Response, Rejection> {
    match store.list().await {
        Ok(records) => {
            tracing::debug!(count = records.len(), "listing records");
            Ok(warp::reply::json(&records).into_response())
        }
        Err(err) => {
            tracing::error!("listing failed: {}", err);
            Ok(error_reply(&err))
        }
    }
}

async fn create_record<S: RecordStore>(record: Record, store: Arc<S>) -> Result<Response, Rejection> {
    match store.create(&record).await {
        Ok(stored) => {
            tracing::info!(id = stored.id, "created record");
            Ok(warp::reply::json(&stored).into_response())
        }
        Err(err) => {
            tracing::warn!("create rejected: {}", err);
            Ok(error_reply(&err))
        }
    }
}

fn error_reply(err: &StoreError) -> Response {
    let status = match err {
        StoreError::Conflict { .. } => StatusCode::CONFLICT,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    warp::reply::with_status(warp::reply::json(&ErrorBody::from(err)), status).into_response()
}
