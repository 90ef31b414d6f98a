//! Integration tests for self-delete and health.

mod helpers;

use helpers::{PASSWORD, TestApp};
use http::StatusCode;

use gatekeeper_cache::keys::DELETION_TOPIC;
use gatekeeper_core::traits::cache::CacheProvider;

#[tokio::test]
async fn test_delete_broadcasts_revokes_and_removes() {
    let app = TestApp::new();
    let mut deletions = app.cache.subscribe(DELETION_TOPIC);
    let id = app.register_user("a@x.com", &[]).await;
    let token = app.login("a@x.com", PASSWORD).await;

    let response = app.request("POST", "/delete", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data_id(), id);
    assert_eq!(response.body["data"]["removed"], true);
    assert_eq!(response.body["data"]["broadcast"]["status"], "applied");
    assert_eq!(response.body["data"]["revocation"]["status"], "applied");
    assert!(response.set_cookie().expect("cookie").contains("Max-Age=0"));

    assert_eq!(deletions.recv().await.expect("broadcast"), id.to_string());
    assert!(app.cache.exists(&id.to_string()).await.expect("exists"));
    assert!(app.store.is_empty());

    let me = app.request("GET", "/me", None, Some(&token)).await;
    assert_eq!(me.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_delete_requires_session() {
    let app = TestApp::new();
    app.register_user("a@x.com", &[]).await;

    let response = app.request("POST", "/delete", None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(app.store.len(), 1);
}

#[tokio::test]
async fn test_repeated_delete_still_broadcasts() {
    let app = TestApp::new();
    let mut deletions = app.cache.subscribe(DELETION_TOPIC);
    let id = app.register_user("a@x.com", &[]).await;

    let first = app.state.clients.delete_client(id).await.expect("first");
    let second = app.state.clients.delete_client(id).await.expect("second");
    assert!(first.removed);
    assert!(!second.removed);

    assert_eq!(deletions.recv().await.expect("first"), id.to_string());
    assert_eq!(deletions.recv().await.expect("second"), id.to_string());
}

#[tokio::test]
async fn test_health_reports_collaborators_and_counters() {
    let app = TestApp::new();
    let id = app.register_user("a@x.com", &[]).await;
    app.state.clients.delete_client(id).await.expect("delete");

    let response = app.request("GET", "/health", None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
    assert_eq!(response.body["store"], true);
    assert_eq!(response.body["cache"], true);
    assert_eq!(response.body["sideEffects"]["broadcastsPublished"], 1);
    assert_eq!(response.body["sideEffects"]["revocationsWritten"], 1);
}
