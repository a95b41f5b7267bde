//! Error types for sfdml-rest.
//!
//! Every failure falls into one of five kinds: bad input caught locally,
//! authentication, transport, an error reported by the org, or a record
//! that could not be encoded.

use std::fmt;

use crate::collections::BatchFailure;
use crate::sobject::RemoteError;

/// Result type alias for sfdml-rest operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for sfdml-rest operations.
#[derive(Debug, thiserror::Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional source error.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl Error {
    /// Create a new error with the given kind.
    pub fn new(kind: ErrorKind) -> Self {
        Self { kind, source: None }
    }

    /// Create a new error with the given kind and source.
    pub fn with_source(
        kind: ErrorKind,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            source: Some(Box::new(source)),
        }
    }

    pub(crate) fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Config(message.into()))
    }

    /// Returns true if the operation was rejected before any request.
    pub fn is_config(&self) -> bool {
        matches!(self.kind, ErrorKind::Config(_))
    }

    /// Returns true if the session could not be established or renewed.
    pub fn is_authentication(&self) -> bool {
        matches!(self.kind, ErrorKind::Authentication(_))
    }

    /// Returns true if the request could not be completed.
    pub fn is_transport(&self) -> bool {
        matches!(self.kind, ErrorKind::Transport(_))
    }

    /// Returns true if the org reported an error.
    pub fn is_remote(&self) -> bool {
        matches!(self.kind, ErrorKind::Remote(_))
    }

    /// The per-record failures of a collection call, if that is what failed.
    pub fn batch_failure(&self) -> Option<&BatchFailure> {
        match &self.kind {
            ErrorKind::Remote(RemoteFailure::Batch(batch)) => Some(batch),
            _ => None,
        }
    }

    /// Error codes reported by the org, in order. Empty for local errors.
    pub fn error_codes(&self) -> Vec<&str> {
        match &self.kind {
            ErrorKind::Remote(RemoteFailure::Record { errors, .. }) => {
                errors.iter().map(|e| e.error_code.as_str()).collect()
            }
            ErrorKind::Remote(RemoteFailure::Batch(batch)) => batch
                .failures
                .iter()
                .flat_map(|f| f.errors.iter().map(|e| e.status_code.as_str()))
                .collect(),
            _ => Vec::new(),
        }
    }
}

/// The kind of error that occurred.
#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
    /// Invalid input detected locally; nothing was sent.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Authentication failed, or a rejected session could not be renewed.
    #[error("Authentication error: {0}")]
    Authentication(String),

    /// The request could not be completed.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The org answered with an error.
    #[error("{0}")]
    Remote(RemoteFailure),

    /// A record could not be encoded or a response decoded.
    #[error("Codec error: {0}")]
    Codec(String),
}

/// Errors reported by the org.
#[derive(Debug, Clone)]
pub enum RemoteFailure {
    /// A single exchange failed with an unexpected status.
    Record {
        /// HTTP status of the response.
        status: u16,
        /// Errors parsed from the response body.
        errors: Vec<RemoteError>,
    },
    /// A collection call succeeded as a whole but some records failed.
    Batch(BatchFailure),
}

impl fmt::Display for RemoteFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RemoteFailure::Record { status, errors } => {
                write!(f, "Salesforce error (HTTP {})", status)?;
                for (i, error) in errors.iter().enumerate() {
                    let sep = if i == 0 { ": " } else { "; " };
                    write!(f, "{}{}", sep, error)?;
                }
                Ok(())
            }
            RemoteFailure::Batch(batch) => write!(f, "{}", batch),
        }
    }
}

impl From<sfdml_auth::Error> for Error {
    fn from(err: sfdml_auth::Error) -> Self {
        let kind = if err.is_config_error() {
            ErrorKind::Config(err.to_string())
        } else if err.is_transport_error() {
            ErrorKind::Transport(err.to_string())
        } else {
            ErrorKind::Authentication(err.to_string())
        };
        Error::with_source(kind, err)
    }
}

impl From<sfdml_client::Error> for Error {
    fn from(err: sfdml_client::Error) -> Self {
        let kind = if err.is_json() {
            ErrorKind::Codec(err.to_string())
        } else if err.is_config() {
            ErrorKind::Config(err.to_string())
        } else {
            ErrorKind::Transport(err.to_string())
        };
        Error::with_source(kind, err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::with_source(ErrorKind::Codec(err.to_string()), err)
    }
}
