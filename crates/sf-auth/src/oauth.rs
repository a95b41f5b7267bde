//! Grant flows against the OAuth 2.0 token endpoint.
//!
//! All flows post a form to `{domain}/services/oauth2/token`. The pre-issued
//! token flow makes no token request; it probes the org's `limits` resource
//! instead to prove the token works.

use serde::{Deserialize, Serialize};
use sfdml_client::{
    sanitize_error_message, ClientConfig, Endpoint, RequestBuilder, Response, SfHttpClient,
};
use tracing::{debug, info, instrument};

use crate::credentials::Credentials;
use crate::error::{Error, ErrorKind, Result};
use crate::session::{GrantType, Session};

const TOKEN_PATH: &str = "/services/oauth2/token";

/// Runs grant flows for one set of credentials.
///
/// The credentials are kept so that [`refresh`](Self::refresh) can repeat the
/// flow without the caller supplying them again.
#[derive(Clone)]
pub struct Authenticator {
    credentials: Credentials,
    http: SfHttpClient,
    api_version: String,
}

impl std::fmt::Debug for Authenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Authenticator")
            .field("credentials", &self.credentials)
            .field("api_version", &self.api_version)
            .finish_non_exhaustive()
    }
}

impl Authenticator {
    /// Create an authenticator with the default transport configuration.
    pub fn new(credentials: Credentials) -> Result<Self> {
        Self::with_config(credentials, ClientConfig::default())
    }

    /// Create an authenticator with a custom transport configuration.
    pub fn with_config(credentials: Credentials, config: ClientConfig) -> Result<Self> {
        Ok(Self {
            credentials,
            http: SfHttpClient::new(config)?,
            api_version: sfdml_client::DEFAULT_API_VERSION.to_string(),
        })
    }

    /// Build an authenticator from `SF_*` environment variables.
    ///
    /// See [`Credentials::from_env`] and [`ClientConfig::from_env`];
    /// `SF_API_VERSION` overrides the API version.
    pub fn from_env() -> Result<Self> {
        let auth = Self::with_config(Credentials::from_env()?, ClientConfig::from_env()?)?;
        match std::env::var("SF_API_VERSION") {
            Ok(version) if !version.is_empty() => Ok(auth.with_api_version(version)),
            _ => Ok(auth),
        }
    }

    /// Set the API version used for the validation probe and by REST clients
    /// built on this authenticator.
    pub fn with_api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = api_version.into();
        self
    }

    /// The credentials this authenticator was built with.
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// The API version, e.g. `62.0`.
    pub fn api_version(&self) -> &str {
        &self.api_version
    }

    /// The transport shared with REST clients built on this authenticator.
    pub fn http_client(&self) -> &SfHttpClient {
        &self.http
    }

    /// REST endpoint for a session.
    pub fn endpoint(&self, session: &Session) -> Endpoint {
        Endpoint::new(session.instance_url(), &self.api_version)
    }

    /// Start a session using the flow the credentials describe.
    ///
    /// Credentials that match no flow fail before any request is sent.
    #[instrument(skip(self), fields(domain = %self.credentials.domain()))]
    pub async fn authenticate(&self) -> Result<Session> {
        let grant_type = self.credentials.grant_type()?;

        let session = match grant_type {
            GrantType::AccessToken => self.pre_issued_flow().await?,
            flow => self.token_flow(flow).await?,
        };

        info!(
            grant_type = %grant_type,
            instance_url = %session.instance_url(),
            "Authenticated"
        );
        Ok(session)
    }

    /// Re-run the flow that produced `session` and take its new token.
    ///
    /// Only the access token, issuance time, signature and identity URL
    /// change. Sessions from a pre-issued token fail without a request.
    #[instrument(skip(self, session), fields(grant_type = %session.grant_type()))]
    pub async fn refresh(&self, session: &mut Session) -> Result<()> {
        let grant_type = session.grant_type();
        if !grant_type.is_refreshable() {
            return Err(Error::new(ErrorKind::RefreshUnsupported(format!(
                "sessions from the {} flow cannot be refreshed",
                grant_type
            ))));
        }

        let fresh = self.token_flow(grant_type).await?;
        session.apply_refresh(fresh);

        info!(instance_url = %session.instance_url(), "Session refreshed");
        Ok(())
    }

    /// Check the session against the org.
    ///
    /// Returns `Ok(false)` when the org answers with a non-success status and
    /// an error only when the probe could not be sent.
    #[instrument(skip(self, session))]
    pub async fn ensure_valid(&self, session: &Session) -> Result<bool> {
        let response = self
            .probe(session.instance_url(), session.access_token())
            .await?;
        Ok(response.is_success())
    }

    async fn probe(&self, instance_url: &str, access_token: &str) -> Result<Response> {
        let url = Endpoint::new(instance_url, &self.api_version).rest_url("limits");
        let request = RequestBuilder::get(url).bearer_auth(access_token);
        let response = self.http.execute(&request).await?;
        debug!(status = response.status(), "Session probe");
        Ok(response)
    }

    async fn pre_issued_flow(&self) -> Result<Session> {
        let access_token = self.credentials.access_token().ok_or_else(|| {
            Error::new(ErrorKind::InvalidCredentials(
                "access token missing".to_string(),
            ))
        })?;

        Endpoint::parse(self.credentials.domain(), &self.api_version)?;
        let session = Session::pre_issued(self.credentials.domain(), access_token);
        let response = self
            .probe(session.instance_url(), session.access_token())
            .await?;

        if !response.is_success() {
            return Err(Error::new(ErrorKind::TokenInvalid(format!(
                "org rejected the access token with HTTP {}",
                response.status()
            ))));
        }

        Ok(session)
    }

    async fn token_flow(&self, grant_type: GrantType) -> Result<Session> {
        let creds = &self.credentials;
        let missing = |field: &str| {
            Error::new(ErrorKind::InvalidCredentials(format!(
                "{} is required for the {} flow",
                field, grant_type
            )))
        };

        let client_id = creds.consumer_key().ok_or_else(|| missing("consumer key"))?;
        let client_secret = creds
            .consumer_secret()
            .ok_or_else(|| missing("consumer secret"))?;

        let mut params = vec![
            ("grant_type", grant_type.as_str().to_string()),
            ("client_id", client_id.to_string()),
            ("client_secret", client_secret.to_string()),
        ];

        if grant_type == GrantType::Password {
            let username = creds.username().ok_or_else(|| missing("username"))?;
            let password = creds
                .password_with_token()
                .ok_or_else(|| missing("password"))?;
            params.push(("username", username.to_string()));
            params.push(("password", password));
        }

        let url = Endpoint::parse(creds.domain(), &self.api_version)?.url(TOKEN_PATH);
        let request = RequestBuilder::post(url).form(params);
        let response = self.http.execute(&request).await?;

        let token = handle_token_response(&response)?;
        Ok(Session::from_token(token, grant_type))
    }
}

/// Check a token endpoint response and decode the token.
fn handle_token_response(response: &Response) -> Result<TokenResponse> {
    if response.status() != 200 {
        let (error, description) = match response.json::<OAuthErrorResponse>() {
            Ok(body) => (body.error, body.error_description),
            Err(_) => (
                format!("HTTP_{}", response.status()),
                sanitize_error_message(&response.text()),
            ),
        };
        return Err(Error::new(ErrorKind::OAuth { error, description }));
    }

    let token: TokenResponse = serde_json::from_slice(response.bytes())?;
    Ok(token)
}

/// Token response from the token endpoint.
///
/// `access_token` and `signature` are redacted in Debug output.
#[derive(Clone, Deserialize, Serialize)]
pub struct TokenResponse {
    /// Access token.
    pub access_token: String,
    /// Instance URL.
    pub instance_url: String,
    /// User ID URL.
    #[serde(default)]
    pub id: Option<String>,
    /// Token type (usually "Bearer").
    #[serde(default)]
    pub token_type: Option<String>,
    /// Scopes granted.
    #[serde(default)]
    pub scope: Option<String>,
    /// Signature for verification.
    #[serde(default)]
    pub signature: Option<String>,
    /// Issued at timestamp.
    #[serde(default)]
    pub issued_at: Option<String>,
}

impl std::fmt::Debug for TokenResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenResponse")
            .field("access_token", &"[REDACTED]")
            .field("instance_url", &self.instance_url)
            .field("id", &self.id)
            .field("token_type", &self.token_type)
            .field("scope", &self.scope)
            .field("signature", &self.signature.as_ref().map(|_| "[REDACTED]"))
            .field("issued_at", &self.issued_at)
            .finish()
    }
}

/// OAuth error response.
#[derive(Debug, Deserialize)]
struct OAuthErrorResponse {
    error: String,
    #[serde(default)]
    error_description: String,
}
