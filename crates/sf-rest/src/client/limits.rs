use sfdml_client::RequestBuilder;
use tracing::instrument;

use crate::error::Result;

impl super::SalesforceRestClient {
    /// Get API limits for the org.
    #[instrument(skip(self))]
    pub async fn limits(&self) -> Result<serde_json::Value> {
        let url = self.endpoint().await.rest_url("limits");
        let request = RequestBuilder::get(url);
        self.send_json(request).await
    }
}
