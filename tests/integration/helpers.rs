//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use clinic_api::AppState;
use clinic_api::build_app;
use clinic_auth::PasswordHasher;
use clinic_core::config::AppConfig;
use clinic_core::types::{RoleId, UserId};
use clinic_database::memory::{MemoryCredentialStore, MemoryRevocationStore, MemoryRoleStore};
use clinic_database::store::CredentialStore;
use clinic_entity::user::CreateUser;

/// Signing secret used by every test app.
pub const TEST_SECRET: &str = "integration-test-secret";

/// Seeded role IDs, matching the migration.
pub const SUPER_ADMIN: i64 = 1;
pub const ADMIN: i64 = 2;
pub const USER: i64 = 3;

/// Default password for users created with [`TestApp::create_user`].
pub const PASSWORD: &str = "password123";

/// Test application context over in-memory stores
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Credential store behind the router
    pub credentials: MemoryCredentialStore,
    /// Role store behind the router
    pub roles: MemoryRoleStore,
    /// Revocation store behind the router
    pub revocations: MemoryRevocationStore,
    /// Application config
    pub config: AppConfig,
}

impl TestApp {
    /// Create a new test application with the seeded roles
    pub fn new() -> Self {
        let mut config = AppConfig::default();
        config.auth.jwt_secret = TEST_SECRET.to_string();
        config.auth.jwt_expire = "1h".to_string();

        let roles = MemoryRoleStore::with_default_roles();
        let credentials = MemoryCredentialStore::new(roles.clone());
        let revocations = MemoryRevocationStore::new();

        let state = AppState::new(
            config.clone(),
            Arc::new(credentials.clone()),
            Arc::new(roles.clone()),
            Arc::new(revocations.clone()),
        );

        Self {
            router: build_app(state, &config.server.cors),
            credentials,
            roles,
            revocations,
            config,
        }
    }

    /// Create a user directly in the store with [`PASSWORD`] and return their ID
    pub async fn create_user(&self, username: &str, role_id: i64) -> UserId {
        let password_hash = PasswordHasher::new()
            .hash_password(PASSWORD)
            .expect("Failed to hash password");

        self.credentials
            .create(&CreateUser {
                username: username.to_string(),
                email: format!("{username}@clinic.test"),
                password_hash,
                role_id: RoleId::new(role_id),
            })
            .await
            .expect("Failed to create test user")
            .id
    }

    /// Create a user and log them in, returning `(id, token)`
    pub async fn create_and_login(&self, username: &str, role_id: i64) -> (UserId, String) {
        let id = self.create_user(username, role_id).await;
        let token = self.login(username, PASSWORD).await;
        (id, token)
    }

    /// Login and return the access token
    pub async fn login(&self, username: &str, password: &str) -> String {
        let body = serde_json::json!({
            "username": username,
            "password": password,
        });

        let response = self
            .request("POST", "/api/auth/login", Some(body), None)
            .await;

        assert_eq!(
            response.status,
            StatusCode::OK,
            "Login failed: {:?}",
            response.body
        );

        response.data()["access_token"]
            .as_str()
            .expect("No access_token in login response")
            .to_string()
    }

    /// Make an HTTP request with an optional bearer token
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let header = token.map(|t| format!("Bearer {t}"));
        self.request_with_authorization(method, path, body, header.as_deref())
            .await
    }

    /// Make an HTTP request with a raw `Authorization` header value
    pub async fn request_with_authorization(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        authorization: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(value) = authorization {
            req = req.header("Authorization", value);
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
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}

impl TestResponse {
    /// The `data` member of a success envelope
    pub fn data(&self) -> &Value {
        &self.body["data"]
    }

    /// Asserts the generic 401 body that hides the rejection reason
    pub fn assert_generic_unauthorized(&self) {
        assert_eq!(self.status, StatusCode::UNAUTHORIZED, "body: {:?}", self.body);
        assert_eq!(
            self.body,
            serde_json::json!({
                "success": false,
                "error": "UNAUTHORIZED",
                "message": "Unauthorized",
            })
        );
    }
}
