//! Single-record result and error types.

use serde::{Deserialize, Serialize};
use sfdml_client::{sanitize_error_message, ApiError, Response};

/// An error reported by the org for a single-record call.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RemoteError {
    #[serde(rename = "errorCode")]
    pub error_code: String,
    pub message: String,
    #[serde(default)]
    pub fields: Vec<String>,
}

impl std::fmt::Display for RemoteError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error_code, self.message)
    }
}

impl From<ApiError> for RemoteError {
    fn from(err: ApiError) -> Self {
        Self {
            error_code: err.error_code,
            message: err.message,
            fields: err.fields,
        }
    }
}

impl RemoteError {
    /// Errors carried by an unsuccessful response.
    ///
    /// Bodies that are not Salesforce error JSON become a single
    /// `HTTP_<status>` error holding the sanitized body text.
    pub fn from_response(response: &Response) -> Vec<RemoteError> {
        let parsed = response.api_errors();
        if !parsed.is_empty() {
            return parsed.into_iter().map(Into::into).collect();
        }

        let body = response.text();
        vec![RemoteError {
            error_code: format!("HTTP_{}", response.status()),
            message: sanitize_error_message(body.trim()),
            fields: Vec::new(),
        }]
    }
}

/// Error entry inside a collection result.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SalesforceError {
    #[serde(rename = "statusCode")]
    pub status_code: String,
    pub message: String,
    #[serde(default)]
    pub fields: Vec<String>,
}

impl std::fmt::Display for SalesforceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.status_code, self.message)
    }
}

/// Body of a successful create.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct CreateResponse {
    #[serde(default)]
    pub id: Option<String>,
}
