//! Authenticated session state.

use chrono::{DateTime, Utc};

use crate::oauth::TokenResponse;

/// The grant flow that produced a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GrantType {
    /// Username/password flow.
    Password,
    /// Client-credentials flow.
    ClientCredentials,
    /// Access token issued outside this library.
    AccessToken,
}

impl GrantType {
    /// The `grant_type` value as sent to the token endpoint.
    pub fn as_str(&self) -> &'static str {
        match self {
            GrantType::Password => "password",
            GrantType::ClientCredentials => "client_credentials",
            GrantType::AccessToken => "access_token",
        }
    }

    /// Whether a session from this flow can be refreshed by re-running it.
    pub fn is_refreshable(&self) -> bool {
        !matches!(self, GrantType::AccessToken)
    }
}

impl std::fmt::Display for GrantType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A live session with an org.
///
/// Sessions only come out of [`Authenticator::authenticate`], so every field
/// the REST layer needs is present. The access token and signature are
/// redacted in Debug output.
///
/// [`Authenticator::authenticate`]: crate::Authenticator::authenticate
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    access_token: String,
    instance_url: String,
    id: Option<String>,
    token_type: Option<String>,
    scope: Option<String>,
    issued_at: Option<String>,
    signature: Option<String>,
    grant_type: GrantType,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("access_token", &"[REDACTED]")
            .field("instance_url", &self.instance_url)
            .field("id", &self.id)
            .field("token_type", &self.token_type)
            .field("scope", &self.scope)
            .field("issued_at", &self.issued_at)
            .field("signature", &self.signature.as_ref().map(|_| "[REDACTED]"))
            .field("grant_type", &self.grant_type)
            .finish()
    }
}

impl Session {
    pub(crate) fn from_token(token: TokenResponse, grant_type: GrantType) -> Self {
        Self {
            access_token: token.access_token,
            instance_url: token.instance_url.trim_end_matches('/').to_string(),
            id: token.id,
            token_type: token.token_type,
            scope: token.scope,
            issued_at: token.issued_at,
            signature: token.signature,
            grant_type,
        }
    }

    pub(crate) fn pre_issued(instance_url: &str, access_token: &str) -> Self {
        Self {
            access_token: access_token.to_string(),
            instance_url: instance_url.trim_end_matches('/').to_string(),
            id: None,
            token_type: None,
            scope: None,
            issued_at: None,
            signature: None,
            grant_type: GrantType::AccessToken,
        }
    }

    /// Take the token fields of a freshly issued session.
    ///
    /// Instance URL, token type, scope and grant type stay as they were.
    pub(crate) fn apply_refresh(&mut self, fresh: Session) {
        self.access_token = fresh.access_token;
        self.issued_at = fresh.issued_at;
        self.signature = fresh.signature;
        self.id = fresh.id;
    }

    /// The bearer token.
    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    /// Base URL of the org, without a trailing slash.
    pub fn instance_url(&self) -> &str {
        &self.instance_url
    }

    /// Identity URL of the authenticated user, if the token endpoint sent one.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Token type, usually `Bearer`.
    pub fn token_type(&self) -> Option<&str> {
        self.token_type.as_deref()
    }

    /// Granted scopes, space separated.
    pub fn scope(&self) -> Option<&str> {
        self.scope.as_deref()
    }

    /// Issuance time as sent by the token endpoint (epoch milliseconds).
    pub fn issued_at(&self) -> Option<&str> {
        self.issued_at.as_deref()
    }

    /// Issuance time as a timestamp, if it parses.
    pub fn issued_at_datetime(&self) -> Option<DateTime<Utc>> {
        self.issued_at
            .as_deref()
            .and_then(|raw| raw.parse::<i64>().ok())
            .and_then(DateTime::from_timestamp_millis)
    }

    /// Token signature, if any.
    pub fn signature(&self) -> Option<&str> {
        self.signature.as_deref()
    }

    /// The flow that produced this session.
    pub fn grant_type(&self) -> GrantType {
        self.grant_type
    }
}
