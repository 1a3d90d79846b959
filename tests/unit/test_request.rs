use crate::common::{client_for, client_with_timeout, closed_address, silent_server};
use dale_client::prelude::*;
use mockito::{Matcher, Server};
use reqwest::StatusCode;
use serde_json::{Value, json};
use std::time::Duration;

#[tokio::test]
async fn test_request_injects_bearer_token() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/ping")
        .match_header("authorization", "Bearer abc")
        .match_header("content-type", "application/json")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"ok":true}"#)
        .create_async()
        .await;

    let (client, _, _) = client_for(&server.url());
    client.session().set_tokens(Some("abc"), None, None).await;
    let data: Value = client.api().get("/ping").await.unwrap();

    assert_eq!(data, json!({"ok": true}));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_request_without_token_sends_no_authorization() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/ping")
        .match_header("authorization", Matcher::Missing)
        .with_status(200)
        .with_body("{}")
        .create_async()
        .await;

    let (client, _, _) = client_for(&server.url());
    let _: Value = client.api().get("/ping").await.unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn test_caller_headers_override_content_type_but_not_authorization() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/upload")
        .match_header("content-type", "text/plain")
        .match_header("x-trace", "t-1")
        .match_header("authorization", "Bearer abc")
        .match_body(Matcher::Json(json!({"a": 1})))
        .with_status(200)
        .with_body("{}")
        .create_async()
        .await;

    let (client, _, _) = client_for(&server.url());
    client.session().set_tokens(Some("abc"), None, None).await;
    let options = RequestOptions::post()
        .with_header("Content-Type", "text/plain")
        .with_header("X-Trace", "t-1")
        .with_header("Authorization", "Bearer spoofed")
        .with_body(json!({"a": 1}));
    let _: Value = client.api().request("/upload", options).await.unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn test_request_logs_numbered_lines() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/ping")
        .with_status(200)
        .with_body("{}")
        .expect(2)
        .create_async()
        .await;

    let (client, _, buffer) = client_for(&server.url());
    let base = server.url();
    let _: Value = client.api().get("/ping").await.unwrap();
    let _: Value = client.api().get("/ping").await.unwrap();

    let lines: Vec<String> = buffer.records().into_iter().map(|r| r.message).collect();
    assert!(lines[0].starts_with("[API] Base URL: "));
    assert_eq!(lines[1], format!("[API] Request 1 start GET {base}/ping"));
    assert!(lines[2].starts_with(&format!(
        "[API] Request 1 response GET {base}/ping status=200 duration="
    )));
    assert_eq!(lines[3], format!("[API] Request 2 start GET {base}/ping"));
    assert_eq!(client.api().requests_issued(), 2);
}

#[tokio::test]
async fn test_request_timeout() {
    let base = silent_server().await;
    let (client, buffer) = client_with_timeout(&base, Duration::from_millis(150));

    let err = client.api().get::<Value>("/slow").await.unwrap_err();
    assert!(err.is_timeout());
    assert_eq!(err.to_string(), "Request timed out");
    assert!(
        buffer
            .records()
            .iter()
            .any(|r| r.level == LogLevel::Warn && r.message.contains("Request 1 failed"))
    );
}

#[tokio::test]
async fn test_timeout_leaves_concurrent_calls_alone() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/ping")
        .with_status(200)
        .with_body(r#"{"ok":true}"#)
        .create_async()
        .await;

    let (slow, _) = client_with_timeout(&silent_server().await, Duration::from_millis(200));
    let (fast, _, _) = client_for(&server.url());

    let (slow_result, fast_result) = tokio::join!(
        slow.api().get::<Value>("/slow"),
        fast.api().get::<Value>("/ping")
    );

    assert!(slow_result.unwrap_err().is_timeout());
    assert_eq!(fast_result.unwrap(), json!({"ok": true}));
}

#[tokio::test]
async fn test_transport_error_is_not_a_timeout() {
    let (client, _, _) = client_for(&closed_address());
    let err = client.api().get::<Value>("/ping").await.unwrap_err();
    assert!(err.is_transport());
    assert!(!err.is_timeout());
}

#[tokio::test]
async fn test_non_json_body_is_a_parse_error() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/html")
        .with_status(200)
        .with_body("<html></html>")
        .create_async()
        .await;

    let (client, _, buffer) = client_for(&server.url());
    let err = client.api().get::<Value>("/html").await.unwrap_err();
    assert!(matches!(err, AppError::Json(_)));
    assert!(
        buffer
            .records()
            .iter()
            .any(|r| r.message.contains("failed to parse JSON"))
    );
}

#[tokio::test]
async fn test_bad_request_with_field_errors() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/table/notes/insert")
        .with_status(400)
        .with_body(r#"{"message":"Validation failed","data":{"slug":{"_errors":["taken","too short"]}}}"#)
        .create_async()
        .await;

    let (client, _, _) = client_for(&server.url());
    let err = client
        .api()
        .post::<_, Value>("/table/notes/insert", &json!({}))
        .await
        .unwrap_err();
    assert!(err.is_validation());
    assert_eq!(err.status(), Some(StatusCode::BAD_REQUEST));
    assert_eq!(err.to_string(), "slug: taken, too short");
}

#[tokio::test]
async fn test_server_error_messages() {
    let mut server = Server::new_async().await;
    let _boom = server
        .mock("GET", "/boom")
        .with_status(500)
        .with_body(r#"{"message":"boom"}"#)
        .create_async()
        .await;
    let _bare = server
        .mock("GET", "/bare")
        .with_status(502)
        .with_body("{}")
        .create_async()
        .await;

    let (client, _, _) = client_for(&server.url());
    let err = client.api().get::<Value>("/boom").await.unwrap_err();
    assert!(matches!(
        &err,
        AppError::Api { status, message } if *status == StatusCode::INTERNAL_SERVER_ERROR && message == "boom"
    ));

    let err = client.api().get::<Value>("/bare").await.unwrap_err();
    assert_eq!(err.to_string(), dale_client::error::GENERIC_API_ERROR);
    assert_eq!(err.status(), Some(StatusCode::BAD_GATEWAY));
}

#[tokio::test]
async fn test_invalid_header_fails_before_sending() {
    let (client, _, buffer) = client_for("http://127.0.0.1:9");
    let options = RequestOptions::get().with_header("bad header", "x");
    let err = client
        .api()
        .request::<Value>("/ping", options)
        .await
        .unwrap_err();
    assert!(err.is_precondition());
    assert_eq!(client.api().requests_issued(), 0);
    assert_eq!(buffer.len(), 1);
}
