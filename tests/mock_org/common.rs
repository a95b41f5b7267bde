use serde_json::{json, Value};
use sfdml::{Authenticator, Credentials, SalesforceRestClient};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const API: &str = "/services/data/v62.0";

/// Route test logs through the test harness. Safe to call from every test.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("sfdml=debug")),
        )
        .with_test_writer()
        .try_init();
}

pub fn api_path(rest: &str) -> String {
    format!("{}/{}", API, rest)
}

pub fn token_body(server: &MockServer, access_token: &str) -> Value {
    json!({
        "access_token": access_token,
        "instance_url": server.uri(),
        "id": "https://login.salesforce.com/id/00Dxx0000000000EAA/005xx000000000QAAQ",
        "token_type": "Bearer",
        "scope": "api",
        "signature": "c2lnbmF0dXJl",
        "issued_at": "1700000000000"
    })
}

/// Serve exactly `times` token requests with `access_token`.
pub async fn mount_token(server: &MockServer, access_token: &str, times: u64) {
    Mock::given(method("POST"))
        .and(path("/services/oauth2/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_body(server, access_token)))
        .up_to_n_times(times)
        .expect(times)
        .mount(server)
        .await;
}

pub fn client_credentials(server: &MockServer) -> Credentials {
    Credentials::client_credentials(server.uri(), "consumer_key", "consumer_secret")
}

/// A REST client on a client-credentials session with token `tok1`.
pub async fn connect(server: &MockServer) -> SalesforceRestClient {
    init_tracing();
    mount_token(server, "tok1", 1).await;
    let auth = Authenticator::new(client_credentials(server)).expect("authenticator");
    SalesforceRestClient::connect(auth)
        .await
        .expect("client-credentials session")
}

pub fn success(id: &str) -> Value {
    json!({"id": id, "success": true, "errors": [], "created": true})
}

pub fn failure(code: &str, message: &str) -> Value {
    json!({
        "id": null,
        "success": false,
        "errors": [{"statusCode": code, "message": message, "fields": []}]
    })
}
