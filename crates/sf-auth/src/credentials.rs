//! Credential input for the grant flows.
//!
//! Sensitive fields are redacted in Debug output.

use crate::error::{Error, ErrorKind, Result};
use crate::session::GrantType;
use crate::PRODUCTION_LOGIN_URL;

/// Everything needed to start a session with an org.
///
/// Which fields are populated decides the grant flow, see
/// [`Credentials::grant_type`]. Empty strings count as absent.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    domain: String,
    username: Option<String>,
    password: Option<String>,
    security_token: Option<String>,
    consumer_key: Option<String>,
    consumer_secret: Option<String>,
    access_token: Option<String>,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("domain", &self.domain)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .field(
                "security_token",
                &self.security_token.as_ref().map(|_| "[REDACTED]"),
            )
            .field("consumer_key", &self.consumer_key)
            .field(
                "consumer_secret",
                &self.consumer_secret.as_ref().map(|_| "[REDACTED]"),
            )
            .field(
                "access_token",
                &self.access_token.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

fn non_empty(value: impl Into<String>) -> Option<String> {
    Some(value.into()).filter(|v| !v.is_empty())
}

impl Credentials {
    /// Start from a login domain with no secrets set.
    pub fn new(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            ..Self::default()
        }
    }

    /// Credentials for the username/password flow.
    ///
    /// The security token is appended to the password on the wire; pass an
    /// empty string when the org trusts the caller's IP range.
    pub fn password(
        domain: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
        security_token: impl Into<String>,
        consumer_key: impl Into<String>,
        consumer_secret: impl Into<String>,
    ) -> Self {
        Self::new(domain)
            .with_username(username)
            .with_password(password)
            .with_security_token(security_token)
            .with_consumer_key(consumer_key)
            .with_consumer_secret(consumer_secret)
    }

    /// Credentials for the client-credentials flow.
    pub fn client_credentials(
        domain: impl Into<String>,
        consumer_key: impl Into<String>,
        consumer_secret: impl Into<String>,
    ) -> Self {
        Self::new(domain)
            .with_consumer_key(consumer_key)
            .with_consumer_secret(consumer_secret)
    }

    /// Credentials wrapping an access token issued elsewhere.
    ///
    /// `domain` must be the org's instance URL, since no token exchange takes
    /// place to discover it.
    pub fn pre_issued(domain: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self::new(domain).with_access_token(access_token)
    }

    /// Load credentials from environment variables.
    ///
    /// - `SF_DOMAIN` (default: production login URL)
    /// - `SF_USERNAME`, `SF_PASSWORD`, `SF_SECURITY_TOKEN`
    /// - `SF_CONSUMER_KEY`, `SF_CONSUMER_SECRET`
    /// - `SF_ACCESS_TOKEN`
    ///
    /// Fails if the variables set do not make up any grant flow.
    pub fn from_env() -> Result<Self> {
        fn var(name: &str) -> Option<String> {
            std::env::var(name).ok().filter(|v| !v.is_empty())
        }

        let creds = Self {
            domain: var("SF_DOMAIN").unwrap_or_else(|| PRODUCTION_LOGIN_URL.to_string()),
            username: var("SF_USERNAME"),
            password: var("SF_PASSWORD"),
            security_token: var("SF_SECURITY_TOKEN"),
            consumer_key: var("SF_CONSUMER_KEY"),
            consumer_secret: var("SF_CONSUMER_SECRET"),
            access_token: var("SF_ACCESS_TOKEN"),
        };

        creds.grant_type().map_err(|_| {
            Error::new(ErrorKind::EnvVar(
                "SF_CONSUMER_KEY and SF_CONSUMER_SECRET, or SF_ACCESS_TOKEN".to_string(),
            ))
        })?;

        Ok(creds)
    }

    /// Set the username.
    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = non_empty(username);
        self
    }

    /// Set the password.
    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = non_empty(password);
        self
    }

    /// Set the security token.
    pub fn with_security_token(mut self, token: impl Into<String>) -> Self {
        self.security_token = non_empty(token);
        self
    }

    /// Set the connected app consumer key.
    pub fn with_consumer_key(mut self, key: impl Into<String>) -> Self {
        self.consumer_key = non_empty(key);
        self
    }

    /// Set the connected app consumer secret.
    pub fn with_consumer_secret(mut self, secret: impl Into<String>) -> Self {
        self.consumer_secret = non_empty(secret);
        self
    }

    /// Set a pre-issued access token.
    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = non_empty(token);
        self
    }

    /// The login domain, or the instance URL for a pre-issued token.
    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// The username, if set.
    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    /// The consumer key, if set.
    pub fn consumer_key(&self) -> Option<&str> {
        self.consumer_key.as_deref()
    }

    pub(crate) fn consumer_secret(&self) -> Option<&str> {
        self.consumer_secret.as_deref()
    }

    pub(crate) fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }

    /// The password with the security token appended.
    pub(crate) fn password_with_token(&self) -> Option<String> {
        self.password.as_ref().map(|password| {
            format!(
                "{}{}",
                password,
                self.security_token.as_deref().unwrap_or_default()
            )
        })
    }

    /// Pick the grant flow these credentials describe.
    ///
    /// Username, password, key and secret give the password flow. Key and
    /// secret without a username give client credentials. An access token on
    /// its own gives the pre-issued flow. Anything else is rejected.
    pub fn grant_type(&self) -> Result<GrantType> {
        let has_app = self.consumer_key.is_some() && self.consumer_secret.is_some();

        match (
            self.username.is_some(),
            self.password.is_some(),
            has_app,
            self.access_token.is_some(),
        ) {
            (true, true, true, _) => Ok(GrantType::Password),
            (false, _, true, _) => Ok(GrantType::ClientCredentials),
            (false, false, false, true) => Ok(GrantType::AccessToken),
            _ => Err(Error::new(ErrorKind::InvalidCredentials(
                "expected username, password, consumer key and consumer secret; \
                 consumer key and consumer secret; or an access token"
                    .to_string(),
            ))),
        }
    }
}
