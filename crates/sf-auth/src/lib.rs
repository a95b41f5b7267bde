//! # sfdml-auth
//!
//! Session management for the Salesforce REST API.
//!
//! ## Supported grant flows
//!
//! - **Username/password** - connected app key and secret plus a user's
//!   password and security token
//! - **Client credentials** - connected app key and secret only
//! - **Pre-issued access token** - a token obtained elsewhere, validated
//!   against the org before use
//!
//! The flow is picked from which [`Credentials`] fields are populated. A
//! [`Session`] remembers the flow that produced it so
//! [`Authenticator::refresh`] can re-run it when the token expires. Sessions
//! from a pre-issued token cannot be refreshed.
//!
//! ## Security
//!
//! - Passwords, secrets and tokens are redacted in `Debug` output
//! - Tracing spans skip credential parameters
//! - Error bodies are sanitized before they reach an error message
//!
//! ## Example
//!
//! ```rust,ignore
//! use sfdml_auth::{Authenticator, Credentials, SharedSession};
//!
//! let creds = Credentials::client_credentials(
//!     "https://mydomain.my.salesforce.com",
//!     "consumer_key",
//!     "consumer_secret",
//! );
//! let auth = Authenticator::new(creds)?;
//! let session = auth.authenticate().await?;
//!
//! // Share between tasks; expired tokens are refreshed once per rejection
//! let shared = SharedSession::new(auth, session);
//! ```

mod credentials;
mod error;
mod oauth;
mod session;
mod shared;

pub use credentials::Credentials;
pub use error::{Error, ErrorKind, Result};
pub use oauth::{Authenticator, TokenResponse};
pub use session::{GrantType, Session};
pub use shared::SharedSession;

/// Default Salesforce login URL for production.
pub const PRODUCTION_LOGIN_URL: &str = "https://login.salesforce.com";

/// Default Salesforce login URL for sandbox.
pub const SANDBOX_LOGIN_URL: &str = "https://test.salesforce.com";
