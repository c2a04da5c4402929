//! Integration tests for the parameters extension store using wiremock
//!
//! These tests verify request shape and status handling against a mock
//! extension endpoint.

use std::time::Duration;

use chaos_application::{ApplicationError, ConfigStorePort};
use chaos_infrastructure::{PARAMETERS_TOKEN_HEADER, ParameterExtensionStore};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{header, method, path, query_param},
};

const RECORD: &str = r#"{ "delay": 400, "isEnabled": true, "error_code": 404, "exception_msg": "I FAILED", "rate": 1 }"#;

fn parameter_body(name: &str, value: &str) -> serde_json::Value {
    serde_json::json!({
        "Parameter": {
            "ARN": format!("arn:aws:ssm:us-east-1:123456789012:parameter/{name}"),
            "DataType": "text",
            "LastModifiedDate": "2024-01-15T12:00:00.000Z",
            "Name": name,
            "Selector": null,
            "SourceResult": null,
            "Type": "String",
            "Value": value,
            "Version": 1
        },
        "ResultMetadata": {}
    })
}

fn store_for(server: &MockServer, token: Option<&str>) -> ParameterExtensionStore {
    ParameterExtensionStore::new(
        server.uri(),
        Duration::from_secs(2),
        token.map(str::to_string),
    )
    .unwrap()
}

#[tokio::test]
async fn fetch_parses_parameter_value() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/systemsmanager/parameters/get"))
        .and(query_param("name", "test.config"))
        .respond_with(ResponseTemplate::new(200).set_body_json(parameter_body("test.config", RECORD)))
        .expect(1)
        .mount(&server)
        .await;

    let record = store_for(&server, None).fetch("test.config").await.unwrap();

    assert!(record.is_enabled().unwrap());
    assert_eq!(record.delay_ms().unwrap(), 400);
    assert_eq!(record.exception_msg().unwrap(), "I FAILED");
}

#[tokio::test]
async fn fetch_sends_token_header() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/systemsmanager/parameters/get"))
        .and(header(PARAMETERS_TOKEN_HEADER, "session-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(parameter_body("test.config", RECORD)))
        .expect(1)
        .mount(&server)
        .await;

    let result = store_for(&server, Some("session-token")).fetch("test.config").await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn not_found_status_is_parameter_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/systemsmanager/parameters/get"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = store_for(&server, None).fetch("test.conf").await.unwrap_err();
    assert!(matches!(err, ApplicationError::ParameterNotFound(name) if name == "test.conf"));
}

#[tokio::test]
async fn bad_request_with_not_found_body_is_parameter_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/systemsmanager/parameters/get"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_string("an unexpected error occurred: ParameterNotFound: test.conf"),
        )
        .mount(&server)
        .await;

    let err = store_for(&server, None).fetch("test.conf").await.unwrap_err();
    assert!(matches!(err, ApplicationError::ParameterNotFound(_)));
}

#[tokio::test]
async fn other_bad_request_is_store_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/systemsmanager/parameters/get"))
        .respond_with(ResponseTemplate::new(400).set_body_string("missing token"))
        .mount(&server)
        .await;

    let err = store_for(&server, None).fetch("test.config").await.unwrap_err();
    assert!(matches!(err, ApplicationError::Store(ref msg) if msg.contains("missing token")));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn server_error_is_store_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = store_for(&server, None).fetch("test.config").await.unwrap_err();
    assert!(matches!(err, ApplicationError::Store(_)));
}

#[tokio::test]
async fn malformed_envelope_is_store_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = store_for(&server, None).fetch("test.config").await.unwrap_err();
    assert!(matches!(err, ApplicationError::Store(_)));
}

#[tokio::test]
async fn malformed_record_is_invalid_record() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(parameter_body("test.config", "[1, 2]")))
        .mount(&server)
        .await;

    let err = store_for(&server, None).fetch("test.config").await.unwrap_err();
    assert!(matches!(err, ApplicationError::InvalidRecord { parameter, .. } if parameter == "test.config"));
}

#[tokio::test]
async fn slow_extension_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(parameter_body("test.config", RECORD))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;

    let store =
        ParameterExtensionStore::new(server.uri(), Duration::from_millis(50), None).unwrap();
    let err = store.fetch("test.config").await.unwrap_err();
    assert!(matches!(err, ApplicationError::Store(_)));
}

#[tokio::test]
async fn health_check_reflects_reachability() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    assert!(store_for(&server, None).is_healthy().await);

    let unreachable =
        ParameterExtensionStore::new("http://127.0.0.1:1", Duration::from_millis(200), None)
            .unwrap();
    assert!(!unreachable.is_healthy().await);
}
