//! # sfdml-rest
//!
//! Record-level DML against the Salesforce REST API.
//!
//! ## Features
//!
//! - **Single records** - insert, update, upsert and delete one record
//! - **SObject Collections** - the same four operations on up to 200 records
//!   per request, with per-record results
//! - **SOQL Query** - first page, next page, or every page
//! - **Limits** - org API limits
//!
//! Records are generic key/value maps ([`Record`]); anything implementing
//! [`ToRecord`] can be passed in, including any `Serialize` type wrapped in
//! [`Typed`].
//!
//! An expired session is handled transparently: a request answered with
//! HTTP 401 triggers one session refresh and one replay. Nothing else is
//! retried.
//!
//! ## Example
//!
//! ```rust,ignore
//! use serde_json::json;
//! use sfdml_auth::{Authenticator, Credentials};
//! use sfdml_rest::SalesforceRestClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), sfdml_rest::Error> {
//!     let auth = Authenticator::new(Credentials::from_env()?)?;
//!     let client = SalesforceRestClient::connect(auth).await?;
//!
//!     let id = client.insert("Account", &json!({"Name": "Acme"})).await?;
//!
//!     let results = client
//!         .insert_collection(
//!             "Contact",
//!             &[json!({"LastName": "Lovelace"}), json!({"LastName": "Hopper"})],
//!             false,
//!         )
//!         .await?;
//!
//!     Ok(())
//! }
//! ```

mod client;
mod collections;
mod error;
mod query;
mod record;
mod sobject;

// Main client
pub use client::SalesforceRestClient;

// Collection operations
pub use collections::{
    BatchFailure, CollectionRequest, CollectionResult, RecordFailure, MAX_COLLECTION_SIZE,
};

// Error types
pub use error::{Error, ErrorKind, RemoteFailure, Result};

// Query types
pub use query::QueryResult;

// Record codec
pub use record::{
    encode_collection_insert, encode_collection_update, encode_collection_upsert,
    encode_for_insert, encode_for_update, encode_for_upsert, external_id, record_id,
    to_record_list, Record, ToRecord, Typed, ATTRIBUTES_FIELD, ID_FIELD,
};

// SObject types
pub use sobject::{RemoteError, SalesforceError};

// Re-export sfdml-client types that users might need
pub use sfdml_client::{ClientConfig, ClientConfigBuilder};
