//! URL construction for an org's REST API.

use crate::error::{Error, ErrorKind, Result};

/// Instance URL plus API version.
///
/// All REST resources live under `{instance_url}/services/data/v{api_version}/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    instance_url: String,
    api_version: String,
}

impl Endpoint {
    /// Create an endpoint. A trailing slash on the instance URL is dropped.
    pub fn new(instance_url: impl Into<String>, api_version: impl Into<String>) -> Self {
        let instance_url = instance_url.into().trim_end_matches('/').to_string();
        Self {
            instance_url,
            api_version: api_version.into(),
        }
    }

    /// Like [`new`](Self::new), but rejects anything that is not an
    /// absolute `http` or `https` URL.
    pub fn parse(instance_url: &str, api_version: impl Into<String>) -> Result<Self> {
        let parsed = url::Url::parse(instance_url)?;
        if !matches!(parsed.scheme(), "http" | "https") || !parsed.has_host() {
            return Err(Error::new(ErrorKind::InvalidUrl(format!(
                "expected an http(s) URL with a host, got {:?}",
                instance_url
            ))));
        }
        Ok(Self::new(instance_url, api_version))
    }

    /// The instance URL without a trailing slash.
    pub fn instance_url(&self) -> &str {
        &self.instance_url
    }

    /// The API version, e.g. `62.0`.
    pub fn api_version(&self) -> &str {
        &self.api_version
    }

    /// Build a URL on the instance.
    ///
    /// Absolute `http(s)://` URLs pass through unchanged, which is what
    /// `nextRecordsUrl` style links need.
    pub fn url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else if path.starts_with('/') {
            format!("{}{}", self.instance_url, path)
        } else {
            format!("{}/{}", self.instance_url, path)
        }
    }

    /// Build a URL under the REST API root.
    ///
    /// `rest_url("sobjects/Account")` gives
    /// `{instance}/services/data/v62.0/sobjects/Account`.
    pub fn rest_url(&self, path: &str) -> String {
        format!(
            "{}/services/data/v{}/{}",
            self.instance_url,
            self.api_version,
            path.trim_start_matches('/')
        )
    }
}
