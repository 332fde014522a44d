//! Functional tests for the HTTP client against the warp server.
//!
//! Each test binds the server on an ephemeral port and drives it through
//! `HttpRecordStore`, so both halves of the wire format are exercised.

use async_trait::async_trait;
use signup_schema::Record;
use signup_store::{
    server, HttpRecordStore, MemoryRecordStore, RecordStore, StoreError, StoredRecord,
};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::oneshot;

struct RunningServer {
    addr: SocketAddr,
    shutdown: Option<oneshot::Sender<()>>,
}

impl RunningServer {
    fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }
}

impl Drop for RunningServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
    }
}

fn start<S: RecordStore + 'static>(store: Arc<S>) -> RunningServer {
    let (tx, rx) = oneshot::channel::<()>();
    let (addr, serving) = server::bind(store, ([127, 0, 0, 1], 0).into(), async move {
        let _ = rx.await;
    })
    .expect("bind ephemeral port");
    tokio::spawn(serving);

    RunningServer {
        addr,
        shutdown: Some(tx),
    }
}

/// Store whose calls never finish in time
struct StalledStore;

#[async_trait]
impl RecordStore for StalledStore {
    async fn create(&self, _record: &Record) -> Result<StoredRecord, StoreError> {
        tokio::time::sleep(Duration::from_secs(30)).await;
        Err(StoreError::Transport("unreachable".to_string()))
    }

    async fn list(&self) -> Result<Vec<StoredRecord>, StoreError> {
        tokio::time::sleep(Duration::from_secs(30)).await;
        Ok(Vec::new())
    }
}

#[tokio::test]
async fn create_then_list_round_trips() {
    let server = start(Arc::new(MemoryRecordStore::new()));
    let client = HttpRecordStore::new(&server.base_url()).unwrap();

    let created = client
        .create(&Record::new("Ana", "ana@x.com", 30))
        .await
        .unwrap();
    assert_eq!(created.id, 1);
    assert_eq!(created.record, Record::new("Ana", "ana@x.com", 30));

    let listed = client.list().await.unwrap();
    assert_eq!(listed, vec![created]);
}

#[tokio::test]
async fn duplicate_email_maps_to_conflict() {
    let store = MemoryRecordStore::with_records([Record::new("Ana", "ana@x.com", 30)]).unwrap();
    let server = start(Arc::new(store));
    let client = HttpRecordStore::new(&server.base_url()).unwrap();

    let err = client
        .create(&Record::new("Ana Two", "ana@x.com", 31))
        .await
        .unwrap_err();

    assert_eq!(
        err,
        StoreError::Conflict {
            email: "ana@x.com".to_string()
        }
    );
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn refused_connection_is_transport_error() {
    // Bind and drop a listener so the port is known to be closed
    let addr = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap()
    };
    let client = HttpRecordStore::new(&format!("http://{addr}")).unwrap();

    let err = client.list().await.unwrap_err();
    assert!(matches!(err, StoreError::Transport(_)), "got {err:?}");
    assert!(err.is_retryable());
}

#[tokio::test]
async fn slow_store_times_out() {
    let server = start(Arc::new(StalledStore));
    let client =
        HttpRecordStore::with_timeout(&server.base_url(), Duration::from_millis(200)).unwrap();

    let err = client
        .create(&Record::new("Ana", "ana@x.com", 30))
        .await
        .unwrap_err();

    assert_eq!(err, StoreError::Timeout { duration_ms: 200 });
}

#[tokio::test]
async fn non_json_listing_is_decode_error() {
    use warp::Filter;

    let (tx, rx) = oneshot::channel::<()>();
    let route = warp::path!("customers").map(|| "definitely not json");
    let (addr, serving) = warp::serve(route).bind_with_graceful_shutdown(
        ([127, 0, 0, 1], 0),
        async move {
            let _ = rx.await;
        },
    );
    tokio::spawn(serving);

    let client = HttpRecordStore::new(&format!("http://{addr}")).unwrap();
    let err = client.list().await.unwrap_err();
    let _ = tx.send(());

    assert!(matches!(err, StoreError::Decode(_)), "got {err:?}");
}

/// Serve a fixed status and body on `/customers` for every method
fn start_fixed(status: warp::http::StatusCode, body: &'static str) -> RunningServer {
    use warp::Filter;

    let (tx, rx) = oneshot::channel::<()>();
    let route = warp::path!("customers").map(move || warp::reply::with_status(body, status));
    let (addr, serving) = warp::serve(route).bind_with_graceful_shutdown(
        ([127, 0, 0, 1], 0),
        async move {
            let _ = rx.await;
        },
    );
    tokio::spawn(serving);

    RunningServer {
        addr,
        shutdown: Some(tx),
    }
}

#[tokio::test]
async fn server_error_maps_to_retryable_status() {
    let server = start_fixed(warp::http::StatusCode::INTERNAL_SERVER_ERROR, "boom");
    let client = HttpRecordStore::new(&server.base_url()).unwrap();

    let err = client
        .create(&Record::new("Ana", "ana@x.com", 30))
        .await
        .unwrap_err();

    assert_eq!(
        err,
        StoreError::Status {
            status: 500,
            message: "boom".to_string()
        }
    );
    assert!(err.is_retryable());
    assert!(!err.is_conflict());
}

#[tokio::test]
async fn client_error_maps_to_final_status() {
    let server = start_fixed(warp::http::StatusCode::BAD_REQUEST, "bad record");
    let client = HttpRecordStore::new(&server.base_url()).unwrap();

    let err = client
        .create(&Record::new("Ana", "ana@x.com", 30))
        .await
        .unwrap_err();

    assert_eq!(
        err,
        StoreError::Status {
            status: 400,
            message: "bad record".to_string()
        }
    );
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn listing_failure_status_is_reported() {
    let server = start_fixed(warp::http::StatusCode::SERVICE_UNAVAILABLE, "down");
    let client = HttpRecordStore::new(&server.base_url()).unwrap();

    let err = client.list().await.unwrap_err();

    assert!(
        matches!(err, StoreError::Status { status: 503, .. }),
        "got {err:?}"
    );
    assert!(err.is_retryable());
}
