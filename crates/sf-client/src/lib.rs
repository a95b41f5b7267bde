//! # sfdml-client
//!
//! HTTP transport for the sfdml Salesforce client.
//!
//! This crate is the "send a request, get a status and a body back" layer
//! that the authentication and DML crates are built on:
//! - Request building with bearer auth, JSON and form bodies
//! - Buffered responses (status, headers, body) with no status interpretation
//! - Transport error classification (timeouts, connection failures, bad JSON)
//! - URL helpers for the REST API root of an org
//! - Security helpers for SOQL literals and URL path segments
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  sfdml-rest (records, collections, query)                   │
//! │  sfdml-auth (grant flows, session, refresh)                 │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    SfHttpClient                             │
//! │  - One exchange per call, no retries                        │
//! │  - Timeouts from ClientConfig                               │
//! │  - Returns (status, headers, body)                          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Status codes are not interpreted here. The DML layer decides which status
//! means success and replays a request once when the session has expired.
//!
//! ## Example
//!
//! ```rust,ignore
//! use sfdml_client::{ClientConfig, Endpoint, RequestBuilder, SfHttpClient};
//!
//! let http = SfHttpClient::new(ClientConfig::default())?;
//! let endpoint = Endpoint::new("https://na1.salesforce.com", "62.0");
//!
//! let response = http
//!     .execute(&RequestBuilder::get(endpoint.rest_url("limits")).bearer_auth(token))
//!     .await?;
//! println!("{} {}", response.status(), response.text());
//! ```

mod client;
mod config;
mod endpoint;
mod error;
mod request;
mod response;
pub mod security;

pub use client::SfHttpClient;
pub use config::{ClientConfig, ClientConfigBuilder, PoolConfig, CONNECT_TIMEOUT_ENV, TIMEOUT_ENV};
pub use endpoint::Endpoint;
pub use error::{Error, ErrorKind, Result};
pub use request::{RequestBody, RequestBuilder, RequestMethod};
pub use response::{parse_api_errors, sanitize_error_message, ApiError, Response};

/// Default Salesforce API version
pub const DEFAULT_API_VERSION: &str = "62.0";

/// User-Agent string for the client
pub const USER_AGENT: &str = concat!("sfdml/", env!("CARGO_PKG_VERSION"));
