mod common;

use std::sync::Arc;

use serde_json::json;

use coowner_client::{
    config,
    storage::{FileStorage, MemoryStorage, Storage},
    ApiClient, Config, ForbiddenPolicy, History, Navigator, Outcome, SessionState, View,
};

#[tokio::test]
async fn request_without_token_has_no_authorization_header() {
    let stub = common::spawn().await;
    let (client, _) = stub.client(None, View::Login);

    let response = client.get("/echo").await.unwrap();
    assert_eq!(response.outcome, Outcome::Success);
    assert_eq!(response.payload, Some(json!({"authorization": null})));
}

#[tokio::test]
async fn stored_token_is_sent_as_bearer() {
    let stub = common::spawn().await;
    let token = common::mint_token();
    let (client, _) = stub.client(Some(token.as_str()), View::Groups);

    let response = client.get("echo").await.unwrap();
    assert_eq!(
        response.payload,
        Some(json!({"authorization": format!("Bearer {token}")}))
    );
}

#[tokio::test]
async fn unauthorized_clears_session_and_redirects_once() {
    let stub = common::spawn().await;
    let (client, history) = stub.client(Some(common::mint_token().as_str()), View::Groups);

    let response = client.get("/expired").await.unwrap();
    assert_eq!(response.outcome, Outcome::Unauthorized);
    assert_eq!(response.payload, Some(json!({"message": "expired"})));
    assert_eq!(client.session().token(), None);
    assert_eq!(client.session().state(), SessionState::Anonymous);
    assert_eq!(history.redirects(), vec![View::Login]);

    // Already on the login view now.
    client.get("/expired").await.unwrap();
    assert_eq!(history.redirects(), vec![View::Login]);
}

#[tokio::test]
async fn unauthorized_on_login_view_stays_put() {
    let stub = common::spawn().await;
    let (client, history) = stub.client(Some(common::mint_token().as_str()), View::Login);

    client.get("/expired").await.unwrap();
    assert_eq!(client.session().token(), None);
    assert!(history.redirects().is_empty());
}

#[tokio::test]
async fn no_content_has_no_payload() {
    let stub = common::spawn().await;
    let (client, _) = stub.client(Some(common::mint_token().as_str()), View::Groups);

    let response = client.get("/no-content").await.unwrap();
    assert_eq!(response.outcome, Outcome::NoContent);
    assert!(response.payload.is_none());
    assert!(response.into_unit().is_ok());
}

#[tokio::test]
async fn blank_json_body_is_absent() {
    let stub = common::spawn().await;
    let (client, _) = stub.client(None, View::Login);

    let response = client.get("/blank-json").await.unwrap();
    assert_eq!(response.outcome, Outcome::Success);
    assert!(response.payload.is_none());
}

#[tokio::test]
async fn non_json_forbidden_keeps_session_by_default() {
    let stub = common::spawn().await;
    let (client, history) = stub.client(None, View::Vehicles);

    let response = client.get("/forbidden-html").await.unwrap();
    assert_eq!(response.outcome, Outcome::Forbidden);
    assert_eq!(response.error_message(), config::FORBIDDEN_MESSAGE);
    assert!(history.redirects().is_empty());
}

#[tokio::test]
async fn legacy_policy_treats_tokenless_forbidden_as_login_required() {
    let stub = common::spawn().await;
    let (client, history) =
        stub.client_with_policy(None, View::Vehicles, ForbiddenPolicy::Legacy);

    let response = client.get("/forbidden-html").await.unwrap();
    assert_eq!(response.outcome, Outcome::Unauthorized);
    assert_eq!(response.error_message(), config::AUTH_REQUIRED_MESSAGE);
    assert_eq!(history.redirects(), vec![View::Login]);
}

#[tokio::test]
async fn legacy_policy_leaves_forbidden_with_token_alone() {
    let stub = common::spawn().await;
    let token = common::mint_token();
    let (client, history) =
        stub.client_with_policy(Some(token.as_str()), View::Vehicles, ForbiddenPolicy::Legacy);

    let response = client.get("/forbidden-html").await.unwrap();
    assert_eq!(response.outcome, Outcome::Forbidden);
    assert_eq!(client.session().token(), Some(token));
    assert!(history.redirects().is_empty());
}

#[tokio::test]
async fn forbidden_json_body_is_kept() {
    let stub = common::spawn().await;
    let (client, _) = stub.client(Some(common::mint_token().as_str()), View::Vehicles);

    let response = client.get("/forbidden-json").await.unwrap();
    assert_eq!(response.outcome, Outcome::Forbidden);
    assert_eq!(response.error_message(), "nope");
}

#[tokio::test]
async fn successful_protected_call_verifies_session() {
    let stub = common::spawn().await;
    let token = stub.issue("a@example.com");
    let (client, _) = stub.client(Some(token.as_str()), View::Groups);
    assert_eq!(client.session().state(), SessionState::Authenticated);

    let groups = client.groups().list().await.unwrap();
    assert_eq!(groups.len(), 1);
    assert_eq!(client.session().state(), SessionState::Verified);
}

#[tokio::test]
async fn session_survives_in_the_state_directory() {
    let stub = common::spawn().await;
    let dir = tempfile::tempdir().unwrap();
    let config = stub.config(dir.path());

    let storage = Arc::new(FileStorage::open(config.session_file()).unwrap());
    let (client, _) = common::client_for(&config, storage, View::Login);
    client.auth().login("a@example.com", "secret").await.unwrap();

    let history = Arc::new(History::starting_at(View::Groups));
    let reopened = ApiClient::open(&config, history.clone()).unwrap();
    assert!(reopened.session().is_authenticated());
    assert_eq!(reopened.session().email().as_deref(), Some("a@example.com"));
    assert_eq!(reopened.groups().list().await.unwrap().len(), 1);

    reopened.auth().logout().unwrap();
    assert_eq!(history.current(), View::Login);
    let storage = FileStorage::open(config.session_file()).unwrap();
    assert!(storage.get(config::STORAGE_TOKEN_KEY).is_none());
}

#[tokio::test]
async fn unauthorized_with_truncated_body_still_ends_session() {
    let addr = common::spawn_raw(
        "HTTP/1.1 401 Unauthorized\r\n\
         Content-Type: application/json\r\n\
         Content-Length: 100\r\n\
         Connection: close\r\n\r\n\
         {\"mess",
    )
    .await;
    let config = Config::new(format!("http://{addr}"), "unused");
    let storage = Arc::new(MemoryStorage::with_entry(config::STORAGE_TOKEN_KEY, "a.b.c"));
    let (client, history) = common::client_for(&config, storage, View::Groups);

    let response = client.get("/groups").await.unwrap();
    assert_eq!(response.outcome, Outcome::Unauthorized);
    assert_eq!(response.error_message(), config::SESSION_EXPIRED_MESSAGE);
    assert_eq!(client.session().token(), None);
    assert_eq!(history.redirects(), vec![View::Login]);
}

#[tokio::test]
async fn legacy_policy_keeps_forbidden_with_empty_json_body() {
    let stub = common::spawn().await;
    let (client, history) =
        stub.client_with_policy(None, View::Vehicles, ForbiddenPolicy::Legacy);

    let response = client.get("/forbidden-blank-json").await.unwrap();
    assert_eq!(response.outcome, Outcome::Forbidden);
    assert_eq!(response.error_message(), config::FORBIDDEN_MESSAGE);
    assert!(history.redirects().is_empty());
}

#[tokio::test]
async fn no_content_ignores_json_content_type() {
    let stub = common::spawn().await;
    let (client, _) = stub.client(Some(common::mint_token().as_str()), View::Groups);

    let response = client.get("/no-content-json").await.unwrap();
    assert_eq!(response.status.as_u16(), 204);
    assert_eq!(response.outcome, Outcome::NoContent);
    assert!(response.payload.is_none());
}

#[tokio::test]
async fn malformed_json_body_is_absent() {
    let stub = common::spawn().await;
    let (client, history) = stub.client(Some(common::mint_token().as_str()), View::Groups);

    let response = client.get("/malformed-json").await.unwrap();
    assert_eq!(response.outcome, Outcome::Success);
    assert!(response.payload.is_none());
    assert!(client.session().token().is_some());
    assert!(history.redirects().is_empty());
}
