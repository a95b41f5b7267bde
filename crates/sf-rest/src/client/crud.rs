use sfdml_client::security::url as url_security;
use sfdml_client::RequestBuilder;
use tracing::{debug, instrument};

use crate::error::Result;
use crate::record::{
    encode_for_insert, encode_for_update, encode_for_upsert, external_id, record_id, ToRecord,
};
use crate::sobject::CreateResponse;

use super::{check_field, check_sobject, expect_status};

impl super::SalesforceRestClient {
    /// Create a record.
    ///
    /// Any `Id` in the record is ignored. Returns the new record's ID when the
    /// org reports one; an empty or unrecognised 201 body yields `None`.
    #[instrument(skip(self, record))]
    pub async fn insert<R: ToRecord + ?Sized>(
        &self,
        sobject: &str,
        record: &R,
    ) -> Result<Option<String>> {
        check_sobject(sobject)?;
        let body = encode_for_insert(sobject, record.to_record()?);

        let url = self.endpoint().await.rest_url(&format!("sobjects/{}", sobject));
        let request = RequestBuilder::post(url).json_value(body.into());

        let response = expect_status(self.send(request).await?, &[201])?;
        if response.is_empty() {
            return Ok(None);
        }
        match response.json::<CreateResponse>() {
            Ok(created) => Ok(created.id),
            Err(err) => {
                debug!(error = %err, "create response body not understood");
                Ok(None)
            }
        }
    }

    /// Update the record named by the record's `Id` field.
    #[instrument(skip(self, record))]
    pub async fn update<R: ToRecord + ?Sized>(&self, sobject: &str, record: &R) -> Result<()> {
        check_sobject(sobject)?;
        let record = record.to_record()?;
        let id = url_security::encode_param(record_id(&record)?);
        let body = encode_for_update(sobject, record);

        let url = self
            .endpoint()
            .await
            .rest_url(&format!("sobjects/{}/{}", sobject, id));
        let request = RequestBuilder::patch(url).json_value(body.into());

        expect_status(self.send(request).await?, &[204])?;
        Ok(())
    }

    /// Create or update the record matched by an external-ID field.
    ///
    /// Only a 200 answer counts as success.
    #[instrument(skip(self, record))]
    pub async fn upsert<R: ToRecord + ?Sized>(
        &self,
        sobject: &str,
        external_id_field: &str,
        record: &R,
    ) -> Result<()> {
        check_sobject(sobject)?;
        check_field(external_id_field)?;
        let record = record.to_record()?;
        let value = url_security::encode_param(external_id(&record, sobject, external_id_field)?);
        let body = encode_for_upsert(sobject, external_id_field, record);

        let url = self.endpoint().await.rest_url(&format!(
            "sobjects/{}/{}/{}",
            sobject, external_id_field, value
        ));
        let request = RequestBuilder::patch(url).json_value(body.into());

        expect_status(self.send(request).await?, &[200])?;
        Ok(())
    }

    /// Delete the record named by the record's `Id` field.
    #[instrument(skip(self, record))]
    pub async fn delete<R: ToRecord + ?Sized>(&self, sobject: &str, record: &R) -> Result<()> {
        check_sobject(sobject)?;
        let record = record.to_record()?;
        let id = url_security::encode_param(record_id(&record)?);

        let url = self
            .endpoint()
            .await
            .rest_url(&format!("sobjects/{}/{}", sobject, id));
        let request = RequestBuilder::delete(url);

        expect_status(self.send(request).await?, &[204])?;
        Ok(())
    }
}
