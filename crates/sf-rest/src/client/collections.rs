use sfdml_client::RequestBuilder;
use tracing::instrument;

use crate::collections::{CollectionRequest, CollectionResult};
use crate::error::Result;
use crate::record::{
    encode_collection_insert, encode_collection_update, encode_collection_upsert, external_id,
    record_id, to_record_list, ToRecord,
};

use super::{check_batch_size, check_field, check_sobject, collection_results};

impl super::SalesforceRestClient {
    /// Create up to 200 records in one request.
    ///
    /// With `all_or_none` unset, the org commits the records that succeed;
    /// any failure still comes back as a batch error listing every failed
    /// index alongside the full result list.
    #[instrument(skip(self, records), fields(count = records.len()))]
    pub async fn insert_collection<R: ToRecord>(
        &self,
        sobject: &str,
        records: &[R],
        all_or_none: bool,
    ) -> Result<Vec<CollectionResult>> {
        check_batch_size(records.len())?;
        check_sobject(sobject)?;

        let records = to_record_list(records)?
            .into_iter()
            .map(|r| encode_collection_insert(sobject, r))
            .collect();
        let body = CollectionRequest {
            all_or_none,
            records,
        };

        let url = self.endpoint().await.rest_url("composite/sobjects/");
        let request = RequestBuilder::post(url).json(&body)?;
        collection_results(self.send(request).await?)
    }

    /// Update up to 200 records in one request, each named by its `Id`.
    #[instrument(skip(self, records), fields(count = records.len()))]
    pub async fn update_collection<R: ToRecord>(
        &self,
        sobject: &str,
        records: &[R],
        all_or_none: bool,
    ) -> Result<Vec<CollectionResult>> {
        check_batch_size(records.len())?;
        check_sobject(sobject)?;

        let records = to_record_list(records)?;
        for record in &records {
            record_id(record)?;
        }
        let body = CollectionRequest {
            all_or_none,
            records: records
                .into_iter()
                .map(|r| encode_collection_update(sobject, r))
                .collect(),
        };

        let url = self.endpoint().await.rest_url("composite/sobjects/");
        let request = RequestBuilder::patch(url).json(&body)?;
        collection_results(self.send(request).await?)
    }

    /// Upsert up to 200 records in one request, matched on an external-ID
    /// field.
    #[instrument(skip(self, records), fields(count = records.len()))]
    pub async fn upsert_collection<R: ToRecord>(
        &self,
        sobject: &str,
        external_id_field: &str,
        records: &[R],
        all_or_none: bool,
    ) -> Result<Vec<CollectionResult>> {
        check_batch_size(records.len())?;
        check_sobject(sobject)?;
        check_field(external_id_field)?;

        let records = to_record_list(records)?;
        for record in &records {
            external_id(record, sobject, external_id_field)?;
        }
        let body = CollectionRequest {
            all_or_none,
            records: records
                .into_iter()
                .map(|r| encode_collection_upsert(sobject, r))
                .collect(),
        };

        let url = self
            .endpoint()
            .await
            .rest_url(&format!("composite/sobjects/{}/{}", sobject, external_id_field));
        let request = RequestBuilder::patch(url).json(&body)?;
        collection_results(self.send(request).await?)
    }

    /// Delete up to 200 records in one request, each named by its `Id`.
    ///
    /// IDs travel in the query string; the request has no body.
    #[instrument(skip(self, records), fields(count = records.len()))]
    pub async fn delete_collection<R: ToRecord>(
        &self,
        sobject: &str,
        records: &[R],
        all_or_none: bool,
    ) -> Result<Vec<CollectionResult>> {
        check_batch_size(records.len())?;
        check_sobject(sobject)?;

        let records = to_record_list(records)?;
        let ids = records
            .iter()
            .map(record_id)
            .collect::<Result<Vec<_>>>()?
            .join(",");

        let url = self.endpoint().await.rest_url("composite/sobjects/");
        let request = RequestBuilder::delete(url)
            .query("ids", ids)
            .query("allOrNone", all_or_none.to_string());
        collection_results(self.send(request).await?)
    }
}
