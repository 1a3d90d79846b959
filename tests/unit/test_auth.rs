use crate::common::{client_for, closed_address, token_for, user_json};
use dale_client::prelude::*;
use mockito::{Matcher, Server};
use serde_json::json;

fn auth_body(user_id: &str) -> String {
    json!({
        "token": token_for(user_id),
        "refresh_token": "refresh-1",
        "verified": false,
        "record": user_json(user_id)
    })
    .to_string()
}

#[tokio::test]
async fn test_login_stores_tokens_and_user() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/table/users/auth/login-password")
        .match_body(Matcher::Json(json!({"identity": "ana", "password": "pw"})))
        .with_status(200)
        .with_body(auth_body("u1"))
        .create_async()
        .await;

    let (client, store, _) = client_for(&server.url());
    let result = client.auth().login("ana", "pw").await.unwrap();

    assert_eq!(result.record.id, "u1");
    assert_eq!(client.session().auth_token(), Some(token_for("u1")));
    assert_eq!(client.session().refresh_token().as_deref(), Some("refresh-1"));
    assert_eq!(client.session().current_user_id().as_deref(), Some("u1"));
    assert!(store.contains("dale:auth_user").await);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_failed_login_leaves_session_untouched() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/table/users/auth/login-password")
        .with_status(401)
        .with_body(r#"{"message":"Invalid credentials"}"#)
        .create_async()
        .await;

    let (client, store, _) = client_for(&server.url());
    let err = client.auth().login("ana", "wrong").await.unwrap_err();

    assert_eq!(err.to_string(), "Invalid credentials");
    assert!(!client.session().is_authenticated());
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_sign_up_sends_guest_role() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/table/users/auth/sign-up")
        .match_body(Matcher::PartialJson(json!({
            "username": "ana",
            "passwordConfirm": "pw",
            "role": "guest"
        })))
        .with_status(200)
        .with_body(auth_body("u2"))
        .create_async()
        .await;

    let (client, _, _) = client_for(&server.url());
    let request = SignUpRequest {
        username: "ana".to_string(),
        email: "ana@example.com".to_string(),
        password: "pw".to_string(),
        password_confirm: "pw".to_string(),
        name: "Ana".to_string(),
    };
    client.auth().sign_up(&request).await.unwrap();

    assert_eq!(client.session().current_user_id().as_deref(), Some("u2"));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_sign_up_validation_error() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/table/users/auth/sign-up")
        .with_status(400)
        .with_body(r#"{"data":{"email":{"_errors":["required"]}}}"#)
        .create_async()
        .await;

    let (client, _, _) = client_for(&server.url());
    let request = SignUpRequest {
        username: "ana".to_string(),
        email: String::new(),
        password: "pw".to_string(),
        password_confirm: "pw".to_string(),
        name: "Ana".to_string(),
    };
    let err = client.auth().sign_up(&request).await.unwrap_err();
    assert!(err.is_validation());
    assert_eq!(err.to_string(), "email: required");
}

#[tokio::test]
async fn test_logout_clears_session_even_when_server_fails() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/table/users/auth/logout")
        .match_header("authorization", "Bearer abc")
        .with_status(500)
        .with_body(r#"{"message":"down"}"#)
        .create_async()
        .await;

    let (client, store, _) = client_for(&server.url());
    client
        .session()
        .set_tokens(Some("abc"), Some("def"), None)
        .await;

    let err = client.auth().logout().await.unwrap_err();
    assert_eq!(err.to_string(), "down");
    assert_eq!(client.session().auth_token(), None);
    assert_eq!(client.session().refresh_token(), None);
    assert!(store.is_empty().await);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_refresh_without_token_sends_nothing() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/table/users/auth/refresh-token")
        .expect(0)
        .create_async()
        .await;

    let (client, _, _) = client_for(&server.url());
    let err = client.auth().refresh_token().await.unwrap_err();

    assert!(err.is_precondition());
    assert_eq!(err.to_string(), "No refresh token");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_refresh_replaces_tokens() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/table/users/auth/refresh-token")
        .match_body(Matcher::Json(json!({"refresh_token": "def"})))
        .with_status(200)
        .with_body(json!({"token": "new-access", "refresh_token": "new-refresh"}).to_string())
        .create_async()
        .await;

    let (client, store, _) = client_for(&server.url());
    client
        .session()
        .set_tokens(Some("abc"), Some("def"), None)
        .await;
    client.auth().refresh_token().await.unwrap();

    assert_eq!(client.session().auth_token().as_deref(), Some("new-access"));
    assert_eq!(
        store.get("dale:refresh_token").await.unwrap().as_deref(),
        Some("new-refresh")
    );
    mock.assert_async().await;
}

#[tokio::test]
async fn test_current_user_fetches_and_caches() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/table/users/view/u1")
        .with_status(200)
        .with_body(user_json("u1").to_string())
        .create_async()
        .await;

    let (client, _, _) = client_for(&server.url());
    assert!(client.auth().current_user().await.unwrap().is_none());

    client
        .session()
        .set_tokens(Some(&token_for("u1")), None, None)
        .await;
    let user = client.auth().current_user().await.unwrap().unwrap();

    assert_eq!(user.username, "ana");
    assert_eq!(client.session().stored_user().await, Some(user));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_restore_session_confirms_stored_token() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/table/users/view/u1")
        .with_status(200)
        .with_body(user_json("u1").to_string())
        .create_async()
        .await;

    let (client, store, _) = client_for(&server.url());
    store.set("dale:auth_token", &token_for("u1")).await.unwrap();

    let user = client.auth().restore_session().await;
    assert_eq!(user.map(|u| u.id).as_deref(), Some("u1"));
    assert!(client.session().is_authenticated());
}

#[tokio::test]
async fn test_restore_session_clears_rejected_token() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/table/users/view/u1")
        .with_status(401)
        .with_body(r#"{"error":"Unauthorized"}"#)
        .create_async()
        .await;

    let (client, store, _) = client_for(&server.url());
    store.set("dale:auth_token", &token_for("u1")).await.unwrap();
    store.set("dale:refresh_token", "def").await.unwrap();

    assert!(client.auth().restore_session().await.is_none());
    assert!(!client.session().is_authenticated());
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_restore_session_without_stored_token() {
    let mut server = Server::new_async().await;
    let mock = server.mock("GET", Matcher::Any).expect(0).create_async().await;

    let (client, _, _) = client_for(&server.url());
    assert!(client.auth().restore_session().await.is_none());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_restore_session_offline_keeps_tokens() {
    let (client, store, _) = client_for(&closed_address());
    store.set("dale:auth_token", &token_for("u1")).await.unwrap();
    store.set("dale:refresh_token", "def").await.unwrap();

    assert!(client.auth().restore_session().await.is_none());
    assert!(client.session().is_authenticated());
    assert_eq!(client.session().refresh_token().as_deref(), Some("def"));
    assert_eq!(store.len().await, 2);
}
