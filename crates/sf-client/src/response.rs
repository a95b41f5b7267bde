//! Buffered HTTP responses and Salesforce error body parsing.

use std::collections::HashMap;
use std::sync::OnceLock;

use bytes::Bytes;
use serde::de::DeserializeOwned;

use crate::error::Result;

/// A fully read HTTP response.
///
/// The body is buffered so callers can inspect the status first and then
/// decide how to interpret the payload (success shape or error shape).
#[derive(Debug, Clone)]
pub struct Response {
    status: u16,
    headers: HashMap<String, String>,
    body: Bytes,
}

impl Response {
    /// Build a response from its parts. Header names are matched
    /// case-insensitively.
    pub fn new(status: u16, headers: HashMap<String, String>, body: impl Into<Bytes>) -> Self {
        let headers = headers
            .into_iter()
            .map(|(k, v)| (k.to_ascii_lowercase(), v))
            .collect();

        Self {
            status,
            headers,
            body: body.into(),
        }
    }

    /// Drain a reqwest response into a buffered one.
    pub(crate) async fn read(response: reqwest::Response) -> Result<Self> {
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let body = response.bytes().await?;

        Ok(Self::new(status, headers, body))
    }

    /// Get the HTTP status code.
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Returns true if the response status is successful (2xx).
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Returns true for 401, which Salesforce uses for expired or invalid
    /// sessions.
    pub fn is_unauthorized(&self) -> bool {
        self.status == 401
    }

    /// Get a header value.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(|s| s.as_str())
    }

    /// Raw body bytes.
    pub fn bytes(&self) -> &Bytes {
        &self.body
    }

    /// Returns true if the body is empty or whitespace.
    pub fn is_empty(&self) -> bool {
        self.body.iter().all(|b| b.is_ascii_whitespace())
    }

    /// The body as text. Invalid UTF-8 sequences are replaced.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Deserialize the response body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_slice(&self.body)?)
    }

    /// Parse the body as Salesforce error descriptors.
    ///
    /// Returns an empty list when the body is not in either error shape.
    pub fn api_errors(&self) -> Vec<ApiError> {
        parse_api_errors(&self.text())
    }
}

/// One error descriptor from a Salesforce error body.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct ApiError {
    #[serde(rename = "errorCode")]
    pub error_code: String,
    pub message: String,
    #[serde(default)]
    pub fields: Vec<String>,
}

/// Parse a Salesforce error body.
///
/// Salesforce returns either an array of `{errorCode, message, fields}`
/// objects or, on some endpoints, a single such object. Messages are
/// sanitized before they are returned.
pub fn parse_api_errors(body: &str) -> Vec<ApiError> {
    let parsed = serde_json::from_str::<Vec<ApiError>>(body)
        .or_else(|_| serde_json::from_str::<ApiError>(body).map(|e| vec![e]))
        .unwrap_or_default();

    parsed
        .into_iter()
        .map(|mut e| {
            e.message = sanitize_error_message(&e.message);
            e
        })
        .collect()
}

/// Sanitize an error message to prevent exposing sensitive data.
///
/// Access tokens and session ids are redacted and messages longer than 500
/// characters are truncated.
pub fn sanitize_error_message(message: &str) -> String {
    const MAX_LENGTH: usize = 500;

    static TOKEN: OnceLock<regex_lite::Regex> = OnceLock::new();
    static SESSION: OnceLock<regex_lite::Regex> = OnceLock::new();

    // Salesforce tokens look like "<org id>!<opaque>"
    let token = TOKEN.get_or_init(|| {
        regex_lite::Regex::new(r"00[A-Za-z0-9]{13,}[!][A-Za-z0-9_.]+")
            .expect("valid token pattern")
    });
    let session = SESSION.get_or_init(|| {
        regex_lite::Regex::new(r"sid=[A-Za-z0-9]{20,}")
            .expect("valid session pattern")
    });

    let mut sanitized = token.replace_all(message, "[REDACTED_TOKEN]").to_string();
    sanitized = session
        .replace_all(&sanitized, "sid=[REDACTED]")
        .to_string();

    if sanitized.len() > MAX_LENGTH {
        let mut cut = MAX_LENGTH;
        while !sanitized.is_char_boundary(cut) {
            cut -= 1;
        }
        sanitized.truncate(cut);
        sanitized.push_str("...[truncated]");
    }

    sanitized
}
