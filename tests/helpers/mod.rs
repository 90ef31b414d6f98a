//! Shared test helpers for integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use http::header::{CONTENT_TYPE, COOKIE, SET_COOKIE};
use http::{HeaderMap, Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use gatekeeper_api::AppState;
use gatekeeper_cache::memory::MemoryCacheProvider;
use gatekeeper_cache::provider::CacheManager;
use gatekeeper_core::config::AppConfig;
use gatekeeper_core::config::auth::BootstrapAdminConfig;
use gatekeeper_database::memory::MemoryClientStore;
use gatekeeper_database::store::ClientStore;

pub const PASSWORD: &str = "pw12345!";

/// Test application over in-memory collaborators
pub struct TestApp {
    /// The Axum app for making test requests
    pub router: Router,
    /// Wired state, for reaching services and the codec directly
    pub state: AppState,
    /// Credential store behind the app
    pub store: Arc<MemoryClientStore>,
    /// Cache behind the app; also used to subscribe to topics
    pub cache: MemoryCacheProvider,
}

impl TestApp {
    /// Create a new test application
    pub fn new() -> Self {
        let mut config = AppConfig::default();
        config.auth.jwt_secret = "integration-test-secret-0123456789abcdef".to_string();
        config.auth.argon2_memory_kib = 1024;
        config.auth.argon2_iterations = 1;
        config.database.provider = "memory".to_string();
        config.cache.provider = "memory".to_string();
        config.validate().expect("valid test config");

        let store = Arc::new(MemoryClientStore::new());
        let cache = MemoryCacheProvider::new(&config.cache.key_prefix);
        let manager = Arc::new(CacheManager::from_provider(Arc::new(cache.clone())));

        let state = AppState::new(
            config,
            Arc::clone(&store) as Arc<dyn ClientStore>,
            manager,
        )
        .expect("Failed to build state");
        let router = gatekeeper_api::build_app(state.clone());

        Self {
            router,
            state,
            store,
            cache,
        }
    }

    /// Make an HTTP request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header(CONTENT_TYPE, "application/json");

        if let Some(token) = token {
            req = req.header(COOKIE, format!("token={token}"));
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            headers,
            body,
        }
    }

    /// Register a human user and return their id
    pub async fn register_user(&self, email: &str, groups: &[&str]) -> Uuid {
        let response = self
            .request(
                "POST",
                "/register-user",
                Some(serde_json::json!({
                    "email": email,
                    "password": PASSWORD,
                    "firstName": "Test",
                    "lastName": "User",
                    "groups": groups,
                })),
                None,
            )
            .await;

        assert_eq!(
            response.status,
            StatusCode::CREATED,
            "Registration failed: {:?}",
            response.body
        );
        response.data_id()
    }

    /// Login and return the session token from the cookie
    pub async fn login(&self, email: &str, password: &str) -> String {
        let response = self
            .request(
                "POST",
                "/login",
                Some(serde_json::json!({ "email": email, "password": password })),
                None,
            )
            .await;

        assert_eq!(
            response.status,
            StatusCode::OK,
            "Login failed: {:?}",
            response.body
        );
        response.session_cookie().expect("No session cookie")
    }

    /// Seed an admin account and return its session token
    pub async fn admin_token(&self) -> String {
        self.state
            .admin
            .ensure_admin(&BootstrapAdminConfig {
                email: "root@x.com".to_string(),
                password: PASSWORD.to_string(),
                first_name: "Root".to_string(),
                last_name: "Admin".to_string(),
            })
            .await
            .expect("Failed to seed admin");
        self.login("root@x.com", PASSWORD).await
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Parsed JSON body
    pub body: Value,
}

impl TestResponse {
    /// Raw `Set-Cookie` header, if any
    pub fn set_cookie(&self) -> Option<&str> {
        self.headers.get(SET_COOKIE).and_then(|v| v.to_str().ok())
    }

    /// Value of the `token` cookie, if set and non-empty
    pub fn session_cookie(&self) -> Option<String> {
        let pair = self.set_cookie()?.split(';').next()?;
        let value = pair.strip_prefix("token=")?;
        (!value.is_empty()).then(|| value.to_string())
    }

    /// `data.id` of the response
    pub fn data_id(&self) -> Uuid {
        self.body["data"]["id"]
            .as_str()
            .and_then(|id| id.parse().ok())
            .expect("No data.id in response")
    }

    /// `message` of an error or success body
    pub fn message(&self) -> &str {
        self.body["message"].as_str().unwrap_or_default()
    }
}
