//! Integration tests for service clients.

mod helpers;

use helpers::TestApp;
use http::StatusCode;

async fn register_sensor_hub(app: &TestApp) -> helpers::TestResponse {
    app.request(
        "POST",
        "/register-service",
        Some(serde_json::json!({
            "email": "hub@x.com",
            "name": "sensor-hub",
            "groups": ["sensors"],
        })),
        None,
    )
    .await
}

#[tokio::test]
async fn test_service_token_never_expires() {
    let app = TestApp::new();
    let response = register_sensor_hub(&app).await;
    assert_eq!(response.status, StatusCode::CREATED);

    let token = response.body["data"]["serviceToken"]
        .as_str()
        .expect("service token");
    let claims = app.state.codec.decode(token).expect("decode");
    assert_eq!(claims.groups, vec!["sensors", "service"]);
    assert!(claims.exp.is_none());
    assert!(claims.expires_at().is_none());

    let cookie = response.set_cookie().expect("cookie");
    assert!(!cookie.contains("Max-Age"));
    assert!(!cookie.contains("Expires"));
    assert_eq!(response.session_cookie().as_deref(), Some(token));
}

#[tokio::test]
async fn test_service_can_call_authenticated_endpoints() {
    let app = TestApp::new();
    let response = register_sensor_hub(&app).await;
    let token = response.session_cookie().expect("token");

    let me = app.request("GET", "/me", None, Some(&token)).await;
    assert_eq!(me.status, StatusCode::OK);
    assert_eq!(me.body["data"]["kind"], "service");
    assert_eq!(me.body["data"]["name"], "sensor-hub");
    assert!(me.body["data"].get("firstName").is_none());
}

#[tokio::test]
async fn test_service_cannot_use_password_flows() {
    let app = TestApp::new();
    let response = register_sensor_hub(&app).await;
    let token = response.session_cookie().expect("token");

    let login = app
        .request(
            "POST",
            "/login",
            Some(serde_json::json!({ "email": "hub@x.com", "password": "anything-at-all" })),
            None,
        )
        .await;
    assert_eq!(login.status, StatusCode::UNAUTHORIZED);

    let refresh = app
        .request("POST", "/refresh-user-token", None, Some(&token))
        .await;
    assert_eq!(refresh.status, StatusCode::BAD_REQUEST);
    assert_eq!(refresh.message(), "Token does not expire");
}

#[tokio::test]
async fn test_service_cannot_request_admin() {
    let app = TestApp::new();
    let response = app
        .request(
            "POST",
            "/register-service",
            Some(serde_json::json!({
                "email": "hub@x.com",
                "name": "sensor-hub",
                "groups": ["service", "admin"],
            })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(app.store.is_empty());
}
