//! Sign-up Store - the record store collaborator
//!
//! The form controller only needs `create` and `list`. This crate provides
//! the [`RecordStore`] seam and three ways to satisfy it:
//! - [`MemoryRecordStore`]: in-process, unique emails, sequential ids
//! - [`HttpRecordStore`]: reqwest client for a remote `/customers` endpoint
//! - [`server::routes`]: warp server exposing any store as `/customers`
//!
//! # Example
//!
//! ```rust,ignore
//! use signup_store::{HttpRecordStore, RecordStore};
//!
//! # async fn example() -> Result<(), signup_store::StoreError> {
//! let store = HttpRecordStore::new("http://127.0.0.1:5555")?;
//! for record in store.list().await? {
//!     println!("{} {}", record.id, record.name);
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod error;
pub mod http;
pub mod memory;
pub mod seed;
pub mod server;
pub mod store;
pub mod types;

pub use error::{ErrorBody, ServerError, StoreError};
pub use http::{customers_endpoint, HttpRecordStore, CUSTOMERS_PATH, DEFAULT_TIMEOUT};
pub use memory::MemoryRecordStore;
pub use seed::fake_records;
pub use store::RecordStore;
pub use types::{RecordId, StoredRecord};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with record stores
    pub use crate::{HttpRecordStore, MemoryRecordStore, RecordStore, StoreError, StoredRecord};
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
