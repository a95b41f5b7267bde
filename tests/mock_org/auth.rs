//! Session establishment and renewal.

use super::common::{api_path, client_credentials, init_tracing, mount_token, token_body};
use serde_json::json;
use sfdml::{Authenticator, Credentials, GrantType, SalesforceRestClient};
use wiremock::matchers::{any, body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ============================================================================
// Grant flows
// ============================================================================

#[tokio::test]
async fn test_each_flow_tags_the_session() {
    init_tracing();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/services/oauth2/token"))
        .and(body_string_contains("grant_type=password"))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_body(&server, "pw-token")))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/services/oauth2/token"))
        .and(body_string_contains("grant_type=client_credentials"))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_body(&server, "cc-token")))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(api_path("limits")))
        .and(header("Authorization", "Bearer pre-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let cases = [
        (
            Credentials::password(server.uri(), "user@example.com", "pw", "tok", "key", "secret"),
            GrantType::Password,
            "pw-token",
        ),
        (client_credentials(&server), GrantType::ClientCredentials, "cc-token"),
        (
            Credentials::pre_issued(server.uri(), "pre-token"),
            GrantType::AccessToken,
            "pre-token",
        ),
    ];

    for (creds, grant_type, token) in cases {
        let session = Authenticator::new(creds)
            .unwrap()
            .authenticate()
            .await
            .unwrap();
        assert_eq!(session.grant_type(), grant_type);
        assert_eq!(session.access_token(), token);
        assert_eq!(session.instance_url(), server.uri());
    }
}

#[tokio::test]
async fn test_unrecognized_credentials_never_touch_the_network() {
    init_tracing();
    let server = MockServer::start().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let creds = Credentials::new(server.uri())
        .with_username("user@example.com")
        .with_password("pw");
    let err = SalesforceRestClient::connect(Authenticator::new(creds).unwrap())
        .await
        .unwrap_err();

    assert!(err.is_config(), "got {:?}", err);
}

#[tokio::test]
async fn test_failed_login_is_authentication_error() {
    init_tracing();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/services/oauth2/token"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": "invalid_grant",
            "error_description": "authentication failure"
        })))
        .mount(&server)
        .await;

    let authenticator = Authenticator::new(client_credentials(&server)).unwrap();
    let err = SalesforceRestClient::connect(authenticator).await.unwrap_err();

    assert!(err.is_authentication());
    assert!(err.to_string().contains("invalid_grant"));
}

#[tokio::test]
async fn test_unreachable_login_is_transport_error() {
    init_tracing();
    let creds = Credentials::client_credentials("http://127.0.0.1:9", "key", "secret");
    let err = SalesforceRestClient::connect(Authenticator::new(creds).unwrap())
        .await
        .unwrap_err();

    assert!(err.is_transport(), "got {:?}", err);
}

// ============================================================================
// Refresh
// ============================================================================

#[tokio::test]
async fn test_refresh_of_pre_issued_session_always_fails() {
    init_tracing();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(api_path("limits")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let auth = Authenticator::new(Credentials::pre_issued(server.uri(), "pre")).unwrap();
    let mut session = auth.authenticate().await.unwrap();

    for _ in 0..2 {
        let err = auth.refresh(&mut session).await.unwrap_err();
        assert!(matches!(
            err.kind,
            sfdml::auth::ErrorKind::RefreshUnsupported(_)
        ));
    }
}

#[tokio::test]
async fn test_concurrent_401s_trigger_one_refresh() {
    let server = MockServer::start().await;
    let client = super::common::connect(&server).await;
    mount_token(&server, "tok2", 1).await;

    Mock::given(method("GET"))
        .and(path(api_path("limits")))
        .and(header("Authorization", "Bearer tok1"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(api_path("limits")))
        .and(header("Authorization", "Bearer tok2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(4)
        .mount(&server)
        .await;

    let tasks: Vec<_> = (0..4)
        .map(|_| {
            let client = client.clone();
            tokio::spawn(async move { client.limits().await })
        })
        .collect();

    for task in tasks {
        task.await.unwrap().unwrap();
    }
    assert_eq!(client.session().await.access_token(), "tok2");
}
