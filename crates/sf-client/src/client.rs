//! Core HTTP client.

use tracing::{debug, instrument};

use crate::config::ClientConfig;
use crate::error::{Error, ErrorKind, Result};
use crate::request::{RequestBody, RequestBuilder};
use crate::response::Response;

/// HTTP client for Salesforce APIs.
///
/// Each [`execute`](Self::execute) is exactly one exchange. Non-2xx statuses
/// come back as a normal [`Response`]; only failures to complete the
/// exchange are errors.
#[derive(Debug, Clone)]
pub struct SfHttpClient {
    inner: reqwest::Client,
    config: ClientConfig,
}

impl SfHttpClient {
    /// Create a new HTTP client with the given configuration.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let inner = reqwest::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .pool_idle_timeout(config.pool.idle_timeout)
            .pool_max_idle_per_host(config.pool.max_idle_per_host)
            .user_agent(&config.user_agent)
            .gzip(config.accept_compressed)
            .deflate(config.accept_compressed)
            .build()
            .map_err(|e| Error::with_source(ErrorKind::Config(e.to_string()), e))?;

        Ok(Self { inner, config })
    }

    /// A client with [`ClientConfig::default`].
    pub fn default_client() -> Result<Self> {
        Self::new(ClientConfig::default())
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Send a request and buffer the response.
    #[instrument(skip(self, request), fields(method = request.method.as_str(), url = %request.url))]
    pub async fn execute(&self, request: &RequestBuilder) -> Result<Response> {
        let mut req = self
            .inner
            .request(request.method.to_reqwest(), &request.url);

        if let Some(ref token) = request.bearer_token {
            req = req.bearer_auth(token);
        }

        for (name, value) in &request.headers {
            req = req.header(name.as_str(), value.as_str());
        }

        if !request.query_params.is_empty() {
            req = req.query(&request.query_params);
        }

        if let Some(ref body) = request.body {
            req = match body {
                // Content-Type is already in the header list
                RequestBody::Json(value) => req.body(serde_json::to_vec(value)?),
                RequestBody::Form(pairs) => req.body(serde_urlencoded::to_string(pairs)?),
            };
        }

        if self.config.enable_tracing {
            debug!("Sending request");
        }

        let response = Response::read(req.send().await?).await?;

        if self.config.enable_tracing {
            debug!(
                status = response.status(),
                content_length = response.bytes().len(),
                "Response received"
            );
        }

        Ok(response)
    }
}
