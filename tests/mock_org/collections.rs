//! SObject Collections.

use super::common::{api_path, connect, failure, success};
use serde_json::{json, Value};
use sfdml::rest::MAX_COLLECTION_SIZE;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn contacts(n: usize) -> Vec<Value> {
    (0..n)
        .map(|i| json!({"LastName": format!("Contact {i}")}))
        .collect()
}

#[tokio::test]
async fn test_batch_size_boundary() {
    let server = MockServer::start().await;
    let client = connect(&server).await;

    let results: Vec<Value> = (0..MAX_COLLECTION_SIZE)
        .map(|i| success(&format!("003{i:015}")))
        .collect();

    Mock::given(method("POST"))
        .and(path(api_path("composite/sobjects/")))
        .respond_with(ResponseTemplate::new(200).set_body_json(Value::Array(results)))
        .expect(1)
        .mount(&server)
        .await;

    let ok = client
        .insert_collection("Contact", &contacts(200), true)
        .await
        .unwrap();
    assert_eq!(ok.len(), 200);

    let err = client
        .insert_collection("Contact", &contacts(201), true)
        .await
        .unwrap_err();
    assert!(err.is_config());
}

#[tokio::test]
async fn test_partial_success_reports_only_failed_index() {
    let server = MockServer::start().await;
    let client = connect(&server).await;

    Mock::given(method("POST"))
        .and(path(api_path("composite/sobjects/")))
        .and(body_partial_json(json!({"allOrNone": "false"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            success("003A"),
            failure("REQUIRED_FIELD_MISSING", "Required fields are missing: [LastName]"),
            success("003C")
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let err = client
        .insert_collection(
            "Contact",
            &[
                json!({"LastName": "Lovelace"}),
                json!({"FirstName": "Nameless"}),
                json!({"LastName": "Hopper"}),
            ],
            false,
        )
        .await
        .unwrap_err();

    let batch = err.batch_failure().expect("batch failure");
    assert_eq!(batch.failed_indices(), vec![1]);
    assert_eq!(batch.results[0].id.as_deref(), Some("003A"));
    assert_eq!(batch.results[2].id.as_deref(), Some("003C"));
    assert!(err.to_string().contains("[1] REQUIRED_FIELD_MISSING"));
}

#[tokio::test]
async fn test_delete_collection_uses_query_string() {
    let server = MockServer::start().await;
    let client = connect(&server).await;

    Mock::given(method("DELETE"))
        .and(path(api_path("composite/sobjects/")))
        .and(query_param("ids", "003A,003B,003C"))
        .and(query_param("allOrNone", "false"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            success("003A"),
            success("003B"),
            failure("ENTITY_IS_DELETED", "entity is deleted")
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let err = client
        .delete_collection(
            "Contact",
            &[json!({"Id": "003A"}), json!({"Id": "003B"}), json!({"Id": "003C"})],
            false,
        )
        .await
        .unwrap_err();

    assert_eq!(err.batch_failure().unwrap().failed_indices(), vec![2]);
    assert_eq!(err.error_codes(), vec!["ENTITY_IS_DELETED"]);
}
