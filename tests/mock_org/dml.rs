//! Single-record operations.

use super::common::{api_path, connect, mount_token};
use serde::Serialize;
use serde_json::json;
use sfdml::rest::{ErrorKind, RemoteFailure};
use sfdml::Typed;
use wiremock::matchers::{any, body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Serialize)]
struct Account {
    #[serde(rename = "Id", skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Account_Number__c")]
    account_number: String,
}

#[tokio::test]
async fn test_record_lifecycle() {
    let server = MockServer::start().await;
    let client = connect(&server).await;

    Mock::given(method("POST"))
        .and(path(api_path("sobjects/Account")))
        .and(body_json(json!({
            "attributes": {"type": "Account"},
            "Name": "Acme",
            "Account_Number__c": "A-100"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "001xx000003DGb2AAG",
            "success": true,
            "errors": []
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("PATCH"))
        .and(path(api_path("sobjects/Account/001xx000003DGb2AAG")))
        .and(body_json(json!({
            "attributes": {"type": "Account"},
            "Name": "Acme Corp",
            "Account_Number__c": "A-100"
        })))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("PATCH"))
        .and(path(api_path("sobjects/Account/Account_Number__c/A-100")))
        .and(body_json(json!({
            "attributes": {"type": "Account"},
            "Name": "Acme Holdings"
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path(api_path("sobjects/Account/001xx000003DGb2AAG")))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let mut account = Account {
        id: None,
        name: "Acme".into(),
        account_number: "A-100".into(),
    };

    let id = client.insert("Account", &Typed(&account)).await.unwrap();
    account.id = id;
    assert_eq!(account.id.as_deref(), Some("001xx000003DGb2AAG"));

    account.name = "Acme Corp".into();
    client.update("Account", &Typed(&account)).await.unwrap();

    account.name = "Acme Holdings".into();
    client
        .upsert("Account", "Account_Number__c", &Typed(&account))
        .await
        .unwrap();

    client.delete("Account", &Typed(&account)).await.unwrap();
}

#[tokio::test]
async fn test_insert_required_field_missing() {
    let server = MockServer::start().await;
    let client = connect(&server).await;

    Mock::given(method("POST"))
        .and(path(api_path("sobjects/Account")))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!([{
            "message": "Required fields are missing: [Name]",
            "errorCode": "REQUIRED_FIELD_MISSING",
            "fields": ["Name"]
        }])))
        .mount(&server)
        .await;

    let err = client
        .insert("Account", &json!({"Industry": "Energy"}))
        .await
        .unwrap_err();

    assert!(matches!(
        err.kind,
        ErrorKind::Remote(RemoteFailure::Record { status: 400, .. })
    ));
    assert_eq!(err.error_codes(), vec!["REQUIRED_FIELD_MISSING"]);
}

#[tokio::test]
async fn test_missing_identifiers_fail_before_the_network() {
    let server = MockServer::start().await;
    let client = connect(&server).await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&server)
        .await;

    assert!(client
        .update("Account", &json!({"Name": "x"}))
        .await
        .unwrap_err()
        .is_config());
    assert!(client
        .delete("Account", &json!({"Id": null}))
        .await
        .unwrap_err()
        .is_config());
    assert!(client
        .upsert("Account", "Account_Number__c", &json!({"Name": "x"}))
        .await
        .unwrap_err()
        .is_config());
}

#[tokio::test]
async fn test_expired_session_is_renewed_and_request_replayed() {
    let server = MockServer::start().await;
    let client = connect(&server).await;
    mount_token(&server, "tok2", 1).await;

    Mock::given(method("POST"))
        .and(path(api_path("sobjects/Account")))
        .and(header("Authorization", "Bearer tok1"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!([{
            "message": "Session expired or invalid",
            "errorCode": "INVALID_SESSION_ID"
        }])))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path(api_path("sobjects/Account")))
        .and(header("Authorization", "Bearer tok2"))
        .and(body_json(json!({"attributes": {"type": "Account"}, "Name": "Acme"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": "001A"})))
        .expect(1)
        .mount(&server)
        .await;

    let id = client
        .insert("Account", &json!({"Name": "Acme"}))
        .await
        .unwrap();
    assert_eq!(id.as_deref(), Some("001A"));
}

#[tokio::test]
async fn test_second_401_surfaces_as_authentication_error() {
    let server = MockServer::start().await;
    let client = connect(&server).await;
    mount_token(&server, "tok2", 1).await;

    Mock::given(method("PATCH"))
        .and(path(api_path("sobjects/Account/001A")))
        .respond_with(ResponseTemplate::new(401))
        .expect(2)
        .mount(&server)
        .await;

    let err = client
        .update("Account", &json!({"Id": "001A", "Name": "x"}))
        .await
        .unwrap_err();
    assert!(err.is_authentication(), "got {:?}", err);
}
