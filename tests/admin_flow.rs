//! Integration tests for admin-only operations.

mod helpers;

use chrono::Duration;
use helpers::{PASSWORD, TestApp};
use http::StatusCode;
use uuid::Uuid;

use gatekeeper_database::store::ClientStore;
use gatekeeper_entity::client::Client;

fn suspend_body(id: Uuid) -> Option<serde_json::Value> {
    Some(serde_json::json!({ "id": id }))
}

#[tokio::test]
async fn test_suspend_blocks_sessions_and_login() {
    let app = TestApp::new();
    let admin = app.admin_token().await;
    let id = app.register_user("a@x.com", &[]).await;
    let token = app.login("a@x.com", PASSWORD).await;

    let before = app.request("GET", "/me", None, Some(&token)).await;
    assert_eq!(before.status, StatusCode::OK);

    let response = app
        .request("POST", "/suspend", suspend_body(id), Some(&admin))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["revocation"]["status"], "applied");

    let after = app.request("GET", "/me", None, Some(&token)).await;
    assert_eq!(after.status, StatusCode::UNAUTHORIZED);

    let login = app
        .request(
            "POST",
            "/login",
            Some(serde_json::json!({ "email": "a@x.com", "password": PASSWORD })),
            None,
        )
        .await;
    assert_eq!(login.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_suspended_and_unknown_subjects_look_the_same() {
    let app = TestApp::new();
    let admin = app.admin_token().await;
    let id = app.register_user("a@x.com", &[]).await;
    let token = app.login("a@x.com", PASSWORD).await;
    app.request("POST", "/suspend", suspend_body(id), Some(&admin))
        .await;

    let ghost = app
        .state
        .codec
        .issue(Uuid::new_v4(), &[], Some(Duration::minutes(5)))
        .expect("issue");

    let suspended = app.request("GET", "/me", None, Some(&token)).await;
    let unknown = app.request("GET", "/me", None, Some(&ghost.token)).await;
    assert_eq!(suspended.status, unknown.status);
    assert_eq!(suspended.body, unknown.body);
}

#[tokio::test]
async fn test_suspend_requires_exact_admin_group() {
    let app = TestApp::new();
    let target = app.register_user("a@x.com", &[]).await;
    app.register_user("b@x.com", &["Admin"]).await;
    let almost_admin = app.login("b@x.com", PASSWORD).await;

    let response = app
        .request("POST", "/suspend", suspend_body(target), Some(&almost_admin))
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let anonymous = app
        .request("POST", "/suspend", suspend_body(target), None)
        .await;
    assert_eq!(anonymous.status, StatusCode::UNAUTHORIZED);

    let stored = app.store.find_by_id(target).await.expect("lookup").expect("present");
    assert!(!stored.suspended);
}

#[tokio::test]
async fn test_suspend_unknown_target_is_not_found() {
    let app = TestApp::new();
    let admin = app.admin_token().await;

    let response = app
        .request("POST", "/suspend", suspend_body(Uuid::new_v4()), Some(&admin))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    let malformed = app
        .request(
            "POST",
            "/suspend",
            Some(serde_json::json!({ "id": "not-a-uuid" })),
            Some(&admin),
        )
        .await;
    assert_eq!(malformed.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_demoted_admin_loses_rights_immediately() {
    let app = TestApp::new();
    let admin = app.admin_token().await;
    let target = app.register_user("a@x.com", &[]).await;

    // Re-create the admin record under the same id without the group.
    let record = app
        .store
        .find_by_email("root@x.com")
        .await
        .expect("lookup")
        .expect("admin exists");
    app.store.delete(record.id).await.expect("delete");
    app.store
        .insert(&Client {
            groups: vec![],
            ..record
        })
        .await
        .expect("insert");

    let claims = app.state.codec.decode(&admin).expect("decode");
    assert_eq!(claims.groups, vec!["admin"]);

    let response = app
        .request("POST", "/suspend", suspend_body(target), Some(&admin))
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}
