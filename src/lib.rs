//! # sfdml
//!
//! Salesforce session management and DML for Rust.
//!
//! Authenticate once with one of three grant flows, then create, update,
//! upsert and delete records one at a time or in batches of up to 200
//! through SObject Collections. Expired sessions are renewed transparently.
//!
//! ## Security
//!
//! - Passwords, secrets and tokens are redacted in Debug output
//! - Tracing spans skip credentials and record bodies
//! - Error bodies are sanitized before they reach an error message
//!
//! ## Crates
//!
//! - **sfdml-client** - HTTP transport: request building, buffered responses, security helpers
//! - **sfdml-auth** - Grant flows, sessions, shared session with single-flight refresh
//! - **sfdml-rest** - Record codec, single-record and collection DML, SOQL query
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use serde_json::json;
//! use sfdml::{Authenticator, SalesforceRestClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // SF_DOMAIN, SF_CONSUMER_KEY, SF_CONSUMER_SECRET, ...
//!     let client = SalesforceRestClient::connect(Authenticator::from_env()?).await?;
//!
//!     let id = client.insert("Account", &json!({"Name": "Acme"})).await?;
//!     println!("created {:?}", id);
//!
//!     Ok(())
//! }
//! ```

// Re-export all crates for convenient access
#[cfg(feature = "auth")]
pub use sfdml_auth as auth;
#[cfg(feature = "client")]
pub use sfdml_client as client;
#[cfg(feature = "rest")]
pub use sfdml_rest as rest;

// Re-export commonly used types at the top level
#[cfg(feature = "auth")]
pub use sfdml_auth::{Authenticator, Credentials, GrantType, Session, SharedSession};
#[cfg(feature = "client")]
pub use sfdml_client::{ClientConfig, DEFAULT_API_VERSION};
#[cfg(feature = "rest")]
pub use sfdml_rest::{Record, SalesforceRestClient, ToRecord, Typed};
