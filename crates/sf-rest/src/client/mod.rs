//! Salesforce REST API client.
//!
//! Every operation goes through [`SalesforceRestClient::send`], which attaches
//! the current bearer token and, when the org answers 401, refreshes the
//! session once and replays the same request.

use serde::de::DeserializeOwned;
use sfdml_auth::{Authenticator, Session, SharedSession};
use sfdml_client::security::soql;
use sfdml_client::{Endpoint, RequestBuilder, Response};
use tracing::{debug, warn};

use crate::collections::{classify, CollectionResult, MAX_COLLECTION_SIZE};
use crate::error::{Error, ErrorKind, RemoteFailure, Result};
use crate::sobject::RemoteError;

mod collections;
mod crud;
mod limits;
mod query;

/// Salesforce REST API client bound to one authenticated session.
///
/// Cloning is cheap; clones share the session, so a refresh triggered by one
/// clone is seen by all of them.
///
/// # Example
///
/// ```rust,ignore
/// use serde_json::json;
/// use sfdml_auth::{Authenticator, Credentials};
/// use sfdml_rest::SalesforceRestClient;
///
/// let auth = Authenticator::new(Credentials::client_credentials(domain, key, secret))?;
/// let client = SalesforceRestClient::connect(auth).await?;
///
/// let id = client.insert("Account", &json!({"Name": "Acme"})).await?;
/// client.update("Account", &json!({"Id": id, "Industry": "Energy"})).await?;
/// client.delete("Account", &json!({"Id": id})).await?;
/// ```
#[derive(Debug, Clone)]
pub struct SalesforceRestClient {
    session: SharedSession,
}

impl SalesforceRestClient {
    /// Authenticate and build a client on the resulting session.
    pub async fn connect(authenticator: Authenticator) -> Result<Self> {
        let session = authenticator.authenticate().await?;
        Ok(Self::from_session(authenticator, session))
    }

    /// Build a client on a session the authenticator already produced.
    pub fn from_session(authenticator: Authenticator, session: Session) -> Self {
        Self {
            session: SharedSession::new(authenticator, session),
        }
    }

    /// Build a client on an existing shared session.
    pub fn from_shared(session: SharedSession) -> Self {
        Self { session }
    }

    /// The shared session behind this client.
    pub fn shared_session(&self) -> &SharedSession {
        &self.session
    }

    /// Snapshot of the current session.
    pub async fn session(&self) -> Session {
        self.session.current().await
    }

    /// The API version requests are made against.
    pub fn api_version(&self) -> &str {
        self.session.authenticator().api_version()
    }

    /// Check the current session against the org.
    pub async fn ensure_valid(&self) -> Result<bool> {
        let session = self.session.current().await;
        Ok(self.session.authenticator().ensure_valid(&session).await?)
    }

    pub(crate) async fn endpoint(&self) -> Endpoint {
        let session = self.session.current().await;
        self.session.authenticator().endpoint(&session)
    }

    /// Send a request with the current token, refreshing once on 401.
    pub(crate) async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let http = self.session.authenticator().http_client();
        let session = self.session.current().await;

        debug!(method = request.method().as_str(), url = request.url(), "Sending request");
        let response = http
            .execute(&request.clone().bearer_auth(session.access_token()))
            .await?;
        debug!(status = response.status(), "Response received");

        if !response.is_unauthorized() {
            return Ok(response);
        }

        warn!(
            grant_type = %session.grant_type(),
            "Session rejected with 401, refreshing"
        );
        let refreshed = self.session.refresh_if_stale(session.access_token()).await?;

        let response = http
            .execute(&request.bearer_auth(refreshed.access_token()))
            .await?;
        debug!(status = response.status(), "Replayed response received");

        if response.is_unauthorized() {
            let reason = RemoteError::from_response(&response)
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("; ");
            return Err(Error::new(ErrorKind::Authentication(format!(
                "session rejected after refresh: {}",
                reason
            ))));
        }

        Ok(response)
    }

    /// Send a request and decode a JSON body from a 200 response.
    pub(crate) async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T> {
        let response = self.send(request).await?;
        let response = expect_status(response, &[200])?;
        Ok(response.json()?)
    }
}

/// Pass the response through if its status is one of `expected`.
pub(crate) fn expect_status(response: Response, expected: &[u16]) -> Result<Response> {
    if expected.contains(&response.status()) {
        Ok(response)
    } else {
        Err(remote_error(&response))
    }
}

/// Error for a response with an unexpected status.
pub(crate) fn remote_error(response: &Response) -> Error {
    Error::new(ErrorKind::Remote(RemoteFailure::Record {
        status: response.status(),
        errors: RemoteError::from_response(response),
    }))
}

/// Decode a collection response and split out per-record failures.
pub(crate) fn collection_results(response: Response) -> Result<Vec<CollectionResult>> {
    let response = expect_status(response, &[200])?;
    let results: Vec<CollectionResult> = response.json()?;
    classify(results).map_err(|batch| Error::new(ErrorKind::Remote(RemoteFailure::Batch(batch))))
}

pub(crate) fn check_sobject(sobject: &str) -> Result<()> {
    if soql::is_safe_sobject_name(sobject) {
        Ok(())
    } else {
        Err(Error::config(format!("invalid SObject name: {:?}", sobject)))
    }
}

pub(crate) fn check_field(field: &str) -> Result<()> {
    if soql::is_safe_field_name(field) {
        Ok(())
    } else {
        Err(Error::config(format!("invalid field name: {:?}", field)))
    }
}

pub(crate) fn check_batch_size(len: usize) -> Result<()> {
    if len == 0 {
        return Err(Error::config("collection request needs at least one record"));
    }
    if len > MAX_COLLECTION_SIZE {
        return Err(Error::config(format!(
            "collection request supports up to {} records at once, got {}",
            MAX_COLLECTION_SIZE, len
        )));
    }
    Ok(())
}
