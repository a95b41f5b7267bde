//! Insert, update, query and delete an Account, then insert a batch of
//! Contacts in one collection call.
//!
//! ```text
//! SF_DOMAIN=https://mydomain.my.salesforce.com \
//! SF_CONSUMER_KEY=... SF_CONSUMER_SECRET=... \
//! RUST_LOG=sfdml=debug cargo run --example dml_roundtrip
//! ```

use anyhow::Context;
use serde::Serialize;
use serde_json::json;
use sfdml::client::security::soql;
use sfdml::{Authenticator, Record, SalesforceRestClient, Typed};
use tracing::{info, warn};

#[derive(Serialize)]
struct Contact<'a> {
    #[serde(rename = "LastName")]
    last_name: &'a str,
    #[serde(rename = "AccountId")]
    account_id: &'a str,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let auth = Authenticator::from_env().context("reading SF_* credentials")?;
    let client = SalesforceRestClient::connect(auth)
        .await
        .context("authenticating")?;

    let session = client.session().await;
    info!(
        instance_url = session.instance_url(),
        grant_type = %session.grant_type(),
        "Connected"
    );

    let name = "sfdml roundtrip";
    let account_id = client
        .insert("Account", &json!({"Name": name}))
        .await?
        .context("insert returned no id")?;
    info!(%account_id, "Inserted account");

    client
        .update("Account", &json!({"Id": account_id, "Industry": "Technology"}))
        .await?;

    let soql = format!(
        "SELECT Id, Name, Industry FROM Account WHERE Name = '{}'",
        soql::escape_string(name)
    );
    let found: Vec<Record> = client.query_all(&soql).await?;
    info!(count = found.len(), "Queried accounts");

    let contacts: Vec<_> = ["Lovelace", "Hopper", "Hamilton"]
        .into_iter()
        .map(|last_name| {
            Typed(Contact {
                last_name,
                account_id: &account_id,
            })
        })
        .collect();

    match client.insert_collection("Contact", &contacts, false).await {
        Ok(results) => info!(created = results.len(), "Inserted contacts"),
        Err(err) => match err.batch_failure() {
            Some(batch) => warn!(failed = ?batch.failed_indices(), "Some contacts failed"),
            None => return Err(err.into()),
        },
    }

    // Deleting the account cascades to its contacts
    client
        .delete("Account", &json!({"Id": account_id}))
        .await?;
    info!("Deleted account");

    Ok(())
}
