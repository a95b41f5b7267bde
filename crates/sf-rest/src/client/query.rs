use serde::de::DeserializeOwned;
use sfdml_client::RequestBuilder;
use tracing::instrument;

use crate::error::Result;
use crate::query::QueryResult;

impl super::SalesforceRestClient {
    /// Execute a SOQL query and return the first page.
    ///
    /// Values taken from user input must be escaped with
    /// [`sfdml_client::security::soql::escape_string`] before they are
    /// placed in the query text.
    ///
    /// ```rust,ignore
    /// use sfdml_rest::Record;
    ///
    /// let page = client.query::<Record>("SELECT Id, Name FROM Account").await?;
    /// ```
    #[instrument(skip(self))]
    pub async fn query<T: DeserializeOwned>(&self, soql: &str) -> Result<QueryResult<T>> {
        let url = self.endpoint().await.rest_url("query");
        let request = RequestBuilder::get(url).query("q", soql);
        self.send_json(request).await
    }

    /// Fetch the page behind a `nextRecordsUrl`.
    #[instrument(skip(self))]
    pub async fn query_more<T: DeserializeOwned>(
        &self,
        next_records_url: &str,
    ) -> Result<QueryResult<T>> {
        let url = self.endpoint().await.url(next_records_url);
        let request = RequestBuilder::get(url);
        self.send_json(request).await
    }

    /// Execute a SOQL query and follow `nextRecordsUrl` until the last page.
    #[instrument(skip(self))]
    pub async fn query_all<T: DeserializeOwned>(&self, soql: &str) -> Result<Vec<T>> {
        let mut result: QueryResult<T> = self.query(soql).await?;
        let mut records = std::mem::take(&mut result.records);

        while result.has_more() {
            let Some(next) = result.next_records_url.take() else {
                break;
            };
            result = self.query_more(&next).await?;
            records.append(&mut result.records);
        }

        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use crate::client::test_support::connect;
    use crate::record::Record;
    use serde::Deserialize;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_query_first_page() {
        let server = MockServer::start().await;
        let client = connect(&server).await;

        Mock::given(method("GET"))
            .and(path("/services/data/v62.0/query"))
            .and(query_param("q", "SELECT Id, Name FROM Account WHERE Name = 'O\\'Brien'"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "totalSize": 1,
                "done": true,
                "records": [{"attributes": {"type": "Account"}, "Id": "001A", "Name": "O'Brien"}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let soql = format!(
            "SELECT Id, Name FROM Account WHERE Name = '{}'",
            sfdml_client::security::soql::escape_string("O'Brien")
        );
        let page = client.query::<Record>(&soql).await.unwrap();
        assert!(page.done);
        assert_eq!(page.records[0]["Id"], "001A");
    }

    #[tokio::test]
    async fn test_query_all_follows_next_records_url() {
        #[derive(Debug, Deserialize)]
        struct Account {
            #[serde(rename = "Id")]
            id: String,
        }

        let server = MockServer::start().await;
        let client = connect(&server).await;

        Mock::given(method("GET"))
            .and(path("/services/data/v62.0/query"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "totalSize": 3,
                "done": false,
                "nextRecordsUrl": "/services/data/v62.0/query/01gxx-2",
                "records": [{"Id": "001A"}, {"Id": "001B"}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/services/data/v62.0/query/01gxx-2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "totalSize": 3,
                "done": true,
                "records": [{"Id": "001C"}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let accounts: Vec<Account> = client.query_all("SELECT Id FROM Account").await.unwrap();
        let ids: Vec<_> = accounts.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["001A", "001B", "001C"]);
    }

    #[tokio::test]
    async fn test_query_all_stops_without_next_records_url() {
        let server = MockServer::start().await;
        let client = connect(&server).await;

        Mock::given(method("GET"))
            .and(path("/services/data/v62.0/query"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "totalSize": 5,
                "done": false,
                "records": [{"Id": "001A"}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let records: Vec<Record> = client.query_all("SELECT Id FROM Account").await.unwrap();
        assert_eq!(records.len(), 1);
    }

    #[tokio::test]
    async fn test_query_malformed_soql() {
        let server = MockServer::start().await;
        let client = connect(&server).await;

        Mock::given(method("GET"))
            .and(path("/services/data/v62.0/query"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!([{
                "message": "unexpected token: FORM",
                "errorCode": "MALFORMED_QUERY"
            }])))
            .mount(&server)
            .await;

        let err = client
            .query::<Record>("SELECT Id FORM Account")
            .await
            .unwrap_err();
        assert_eq!(err.error_codes(), vec!["MALFORMED_QUERY"]);
    }
}
