//! Error types for sfdml-auth.
//!
//! Error messages never include credential values.

/// Result type alias for sfdml-auth operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for sfdml-auth operations.
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

    /// Returns true if the error was detected locally, before any request.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self.kind,
            ErrorKind::InvalidCredentials(_) | ErrorKind::EnvVar(_) | ErrorKind::Config(_)
        )
    }

    /// Returns true if the token endpoint or the org could not be reached.
    pub fn is_transport_error(&self) -> bool {
        matches!(self.kind, ErrorKind::Http(_))
    }
}

/// The kind of error that occurred.
#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
    /// OAuth error response from the token endpoint.
    #[error("OAuth error: {error} - {description}")]
    OAuth { error: String, description: String },

    /// The org rejected the access token.
    #[error("Token invalid: {0}")]
    TokenInvalid(String),

    /// The session was produced by a flow that cannot be re-run.
    #[error("Refresh unsupported: {0}")]
    RefreshUnsupported(String),

    /// The credentials do not match any grant flow.
    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),

    /// HTTP transport failure during authentication.
    #[error("HTTP error: {0}")]
    Http(String),

    /// Token endpoint answered with a body that is not a token.
    #[error("JSON error: {0}")]
    Json(String),

    /// Environment variable not set or not unicode.
    #[error("Environment variable not set: {0}")]
    EnvVar(String),

    /// Transport settings rejected before any request.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::with_source(ErrorKind::Json(err.to_string()), err)
    }
}

impl From<sfdml_client::Error> for Error {
    fn from(err: sfdml_client::Error) -> Self {
        let kind = match err.kind {
            sfdml_client::ErrorKind::Json(ref message) => ErrorKind::Json(message.clone()),
            sfdml_client::ErrorKind::Config(_) | sfdml_client::ErrorKind::InvalidUrl(_) => {
                ErrorKind::Config(err.to_string())
            }
            _ => {
                let message = err.to_string();
                if message.contains("Bearer") || message.contains("token") {
                    ErrorKind::Http("Client error (details redacted for security)".to_string())
                } else {
                    ErrorKind::Http(message)
                }
            }
        };
        Error::with_source(kind, err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind_display() {
        let err = ErrorKind::OAuth {
            error: "invalid_grant".to_string(),
            description: "authentication failure".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "OAuth error: invalid_grant - authentication failure"
        );

        let err = ErrorKind::RefreshUnsupported("access_token".to_string());
        assert_eq!(err.to_string(), "Refresh unsupported: access_token");
    }

    #[test]
    fn test_classification() {
        let err = Error::new(ErrorKind::InvalidCredentials("no flow".into()));
        assert!(err.is_config_error());
        assert!(!err.is_transport_error());

        let err = Error::new(ErrorKind::Http("connection refused".into()));
        assert!(err.is_transport_error());
        assert!(!err.is_config_error());

        let err = Error::new(ErrorKind::OAuth {
            error: "invalid_client".into(),
            description: "bad secret".into(),
        });
        assert!(!err.is_config_error());
        assert!(!err.is_transport_error());
    }

    #[test]
    fn test_client_json_error_stays_json() {
        let client_err = sfdml_client::Error::new(sfdml_client::ErrorKind::Json("eof".into()));
        let err: Error = client_err.into();
        assert!(matches!(err.kind, ErrorKind::Json(_)));
    }

    #[test]
    fn test_client_config_error_is_config() {
        let client_err = sfdml_client::Error::new(sfdml_client::ErrorKind::Config(
            "SF_HTTP_TIMEOUT_SECS must be a positive number of seconds".into(),
        ));
        let err: Error = client_err.into();
        assert!(err.is_config_error());
        assert!(!err.is_transport_error());
    }

    #[test]
    fn test_client_error_with_token_is_redacted() {
        let client_err = sfdml_client::Error::new(sfdml_client::ErrorKind::Request(
            "request with Bearer 00Dxx!secret failed".into(),
        ));
        let err: Error = client_err.into();
        assert!(!err.to_string().contains("00Dxx!secret"));
        assert!(err.is_transport_error());
    }
}
